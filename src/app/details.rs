//! Side panel describing the selected entity

use std::collections::VecDeque;

use egui::{RichText, ScrollArea, Ui};

use super::canvas::color32;
use crate::render::StyleRegistry;
use crate::scene::{Galaxy, Provinces};
use crate::viewport::{EntityLayer, ProvinceId, StarId, ViewSignal, ViewState};

/// Selection history entries kept for the panel
pub const LOG_CAPACITY: usize = 8;

const LIST_HEIGHT: f32 = 260.0;

/// Selection history plus the per-map detail views
#[derive(Debug, Default)]
pub struct DetailsPanel {
    log: VecDeque<String>,
}

impl DetailsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a line, newest first
    pub fn record(&mut self, line: impl Into<String>) {
        self.log.push_front(line.into());
        self.log.truncate(LOG_CAPACITY);
    }

    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    pub fn record_star_signal(&mut self, signal: ViewSignal<StarId>, galaxy: &Galaxy) {
        match signal {
            ViewSignal::EntitySelected(id) => {
                let name = galaxy.star(id).map_or("unknown star", |s| s.name.as_str());
                self.record(format!("Selected star {}", name));
            }
            ViewSignal::SelectionCleared => self.record("Star selection cleared"),
        }
    }

    pub fn record_province_signal(&mut self, signal: ViewSignal<ProvinceId>, provinces: &Provinces) {
        match signal {
            ViewSignal::EntitySelected(id) => {
                let name = provinces
                    .province(id)
                    .map_or("unknown province", |p| p.name.as_str());
                self.record(format!("Selected province {}", name));
            }
            ViewSignal::SelectionCleared => self.record("Province selection cleared"),
        }
    }

    /// Star details and list; returns a star picked from the list
    pub fn show_galaxy(&self, ui: &mut Ui, galaxy: &Galaxy, view: &ViewState<StarId>) -> Option<StarId> {
        match view.selected().and_then(|id| galaxy.star(id)) {
            Some(star) => {
                ui.heading(&star.name);
                ui.label(format!("Class {}", star.class.label()));
                ui.label(format!(
                    "Position ({:.3}, {:.3})",
                    star.position.x, star.position.y
                ));
                ui.label(format!("Radius {:.1}px", star.radius_px));
            }
            None => {
                ui.label(RichText::new("No star selected").weak());
            }
        }
        ui.separator();

        let names: Vec<&str> = galaxy.stars().iter().map(|s| s.name.as_str()).collect();
        let picked = entity_list(ui, "stars", &names, view.selected().map(|id| id.0));
        picked.map(StarId)
    }

    /// Province details and list; returns a province picked from the list
    pub fn show_provinces(
        &self,
        ui: &mut Ui,
        provinces: &Provinces,
        view: &ViewState<ProvinceId>,
        styles: &StyleRegistry,
    ) -> Option<ProvinceId> {
        let selected = view.selected();
        match selected.and_then(|id| provinces.province(id).map(|p| (id, p))) {
            Some((id, province)) => {
                ui.heading(&province.name);
                ui.colored_label(
                    color32(styles.faction_color(province.owner)),
                    format!("Faction {}", province.owner + 1),
                );
                if let Some(centroid) = provinces.map().centroid(id) {
                    ui.label(format!("Centroid ({:.3}, {:.3})", centroid.x, centroid.y));
                }
                ui.label(format!("{} vertices", province.vertices.len()));
            }
            None => {
                ui.label(RichText::new("No province selected").weak());
            }
        }
        ui.separator();

        let names: Vec<&str> = provinces.provinces().iter().map(|p| p.name.as_str()).collect();
        let picked = entity_list(ui, "provinces", &names, selected.map(|id| id.0));
        picked
            .map(ProvinceId)
            .filter(|id| provinces.contains(*id))
    }

    pub fn show_log(&self, ui: &mut Ui) {
        ui.label(RichText::new("Recent").strong());
        if self.log.is_empty() {
            ui.label(RichText::new("Nothing yet").weak());
        }
        for line in self.log() {
            ui.label(line);
        }
    }
}

fn entity_list(ui: &mut Ui, id: &str, names: &[&str], selected: Option<usize>) -> Option<usize> {
    let row_height = ui.text_style_height(&egui::TextStyle::Body);
    let mut picked = None;
    ScrollArea::vertical()
        .id_salt(id)
        .max_height(LIST_HEIGHT)
        .auto_shrink([false, true])
        .show_rows(ui, row_height, names.len(), |ui, rows| {
            for index in rows {
                if ui
                    .selectable_label(selected == Some(index), names[index])
                    .clicked()
                {
                    picked = Some(index);
                }
            }
        });
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_keeps_newest_entries() {
        let mut panel = DetailsPanel::new();
        for i in 0..(LOG_CAPACITY + 3) {
            panel.record(format!("entry {}", i));
        }
        let log: Vec<&str> = panel.log().collect();
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log[0], format!("entry {}", LOG_CAPACITY + 2));
    }

    #[test]
    fn test_signals_are_named() {
        let galaxy = Galaxy::generate(7, 5);
        let mut panel = DetailsPanel::new();
        panel.record_star_signal(ViewSignal::EntitySelected(StarId(0)), &galaxy);
        panel.record_star_signal(ViewSignal::SelectionCleared, &galaxy);

        let expected = format!("Selected star {}", galaxy.stars()[0].name);
        let log: Vec<&str> = panel.log().collect();
        assert_eq!(log, vec!["Star selection cleared", expected.as_str()]);
    }
}
