//! Turns a view state and a scene into draw commands
//!
//! Builders are pure: the same state, params and time always produce the same
//! commands, so a frame can be rebuilt at any time.

use glam::DVec2;

use super::command::{DrawCommand, Rgba, Stroke};
use super::style::{StyleRegistry, keys};
use crate::scene::{Galaxy, Provinces};
use crate::viewport::{EntityLayer, ProvinceId, StarId, TransformParams, ViewState, ViewportSettings};

/// Stars closer than this many (zoomed) pixels to the widget edge are still drawn
const CULL_MARGIN_PX: f64 = 16.0;
/// Twinkle angular speed in radians per second
const TWINKLE_RATE: f64 = 1.7;
/// Selection ring radius relative to the drawn star radius
const RING_SCALE: f64 = 1.8;
/// Star labels hang this far below the disc
const LABEL_GAP_PX: f64 = 4.0;
const LABEL_SIZE: f32 = 13.0;
/// Unhighlighted province labels are hidden below this zoom
const PROVINCE_LABEL_MIN_ZOOM: f64 = 0.8;

/// Brightness multiplier for a star at `time` seconds
pub fn twinkle(time: f64, phase: f64) -> f32 {
    (0.75 + 0.25 * (time * TWINKLE_RATE + phase).sin()) as f32
}

/// Scale applied to an entity's drawn size
///
/// Selection wins over hover when an entity is both.
pub fn highlight_scale<I: PartialEq + Copy>(
    view: &ViewState<I>,
    id: I,
    settings: &ViewportSettings,
) -> f64 {
    if view.selected() == Some(id) {
        settings.selected_scale
    } else if view.hovered() == Some(id) {
        settings.hover_scale
    } else {
        1.0
    }
}

/// Draw commands for the star map
///
/// Stars outside the widget (plus a margin) are culled. Highlighted stars are
/// drawn last so they sit on top.
pub fn galaxy_commands(
    view: &ViewState<StarId>,
    galaxy: &Galaxy,
    params: &TransformParams,
    time: f64,
    styles: &StyleRegistry,
    settings: &ViewportSettings,
) -> Vec<DrawCommand> {
    let margin = DVec2::splat(params.scale_length(CULL_MARGIN_PX));
    let visible = galaxy.entities_in_rect(params, -margin, params.screen_size() + margin);

    let mut commands = Vec::with_capacity(visible.len() + 4);
    let (highlighted, plain): (Vec<StarId>, Vec<StarId>) = visible
        .into_iter()
        .partition(|id| view.selected() == Some(*id) || view.hovered() == Some(*id));

    for id in plain.into_iter().chain(highlighted) {
        let Some(star) = galaxy.star(id) else {
            continue;
        };
        let center = params.to_screen(star.position);
        let radius = params.scale_length(star.radius_px) * highlight_scale(view, id, settings);
        let brightness = twinkle(time, star.phase);

        commands.push(DrawCommand::Circle {
            center,
            radius,
            fill: styles.star_color(star.class).with_alpha(brightness),
            stroke: Stroke::NONE,
        });

        let ring = if view.selected() == Some(id) {
            Some(styles.stroke(keys::SELECTION))
        } else if view.hovered() == Some(id) {
            Some(styles.stroke(keys::HOVER))
        } else {
            None
        };

        if let Some(stroke) = ring {
            commands.push(DrawCommand::Circle {
                center,
                radius: radius * RING_SCALE,
                fill: Rgba::TRANSPARENT,
                stroke,
            });
            commands.push(DrawCommand::Text {
                pos: center + DVec2::new(0.0, radius * RING_SCALE + LABEL_GAP_PX),
                text: star.name.clone(),
                size: LABEL_SIZE,
                color: styles.color(keys::LABEL),
            });
        }
    }

    commands
}

/// Draw commands for the province map
///
/// Fills and borders first, then the selection outline, then labels at each
/// province's centroid.
pub fn province_commands(
    view: &ViewState<ProvinceId>,
    provinces: &Provinces,
    params: &TransformParams,
    styles: &StyleRegistry,
) -> Vec<DrawCommand> {
    let size = params.screen_size();
    let mut commands = Vec::new();
    let mut labels = Vec::new();
    let mut selected_outline = None;

    for (id, polygon, centroid) in provinces.map().iter() {
        let Some(province) = provinces.province(id) else {
            continue;
        };
        let points: Vec<DVec2> = polygon.vertices.iter().map(|v| params.to_screen(*v)).collect();
        if !overlaps_screen(&points, size) {
            continue;
        }

        let base = styles.faction_color(province.owner);
        let fill = if view.selected() == Some(id) {
            base.lighten(0.35)
        } else if view.hovered() == Some(id) {
            base.lighten(0.2)
        } else {
            base
        };

        if view.selected() == Some(id) {
            selected_outline = Some(points.clone());
        }

        commands.push(DrawCommand::Polygon {
            points,
            fill,
            stroke: styles.stroke(keys::BORDER),
        });

        let highlighted = view.selected() == Some(id) || view.hovered() == Some(id);
        if highlighted || params.zoom >= PROVINCE_LABEL_MIN_ZOOM {
            labels.push(DrawCommand::Text {
                pos: params.to_screen(centroid),
                text: province.name.clone(),
                size: LABEL_SIZE,
                color: if highlighted {
                    styles.color(keys::LABEL)
                } else {
                    styles.color(keys::LABEL_DIM)
                },
            });
        }
    }

    if let Some(points) = selected_outline {
        commands.push(DrawCommand::Polygon {
            points,
            fill: Rgba::TRANSPARENT,
            stroke: styles.stroke(keys::SELECTION),
        });
    }

    commands.extend(labels);
    commands
}

/// Bounding-box overlap with the widget
fn overlaps_screen(points: &[DVec2], size: DVec2) -> bool {
    let Some(first) = points.first() else {
        return false;
    };
    let (min, max) = points
        .iter()
        .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    max.x >= 0.0 && max.y >= 0.0 && min.x <= size.x && min.y <= size.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::command::{Canvas, CommandRecorder};
    use crate::scene::{Province, Star, StarClass};
    use crate::viewport::{ViewEvent, reduce};

    fn params() -> TransformParams {
        TransformParams::new(DVec2::new(800.0, 600.0), DVec2::ZERO, 1.0)
    }

    fn galaxy() -> Galaxy {
        let star = |name: &str, x: f64, y: f64| Star {
            name: name.to_string(),
            position: DVec2::new(x, y),
            radius_px: 4.0,
            class: StarClass::G,
            phase: 0.0,
        };
        Galaxy::from_stars(
            0,
            vec![star("Sol", 0.5, 0.5), star("Vega", 0.2, 0.2), star("Far", 3.0, 3.0)],
        )
    }

    fn with<I: Copy>(events: &[ViewEvent<I>]) -> ViewState<I> {
        events.iter().fold(ViewState::default(), |s, e| {
            reduce(*e, &s, &ViewportSettings::default()).state
        })
    }

    fn circle_radius(commands: &[DrawCommand], at: DVec2) -> Option<f64> {
        commands.iter().find_map(|c| match c {
            DrawCommand::Circle { center, radius, stroke, .. }
                if *center == at && *stroke == Stroke::NONE =>
            {
                Some(*radius)
            }
            _ => None,
        })
    }

    #[test]
    fn test_offscreen_stars_are_culled() {
        let view = ViewState::default();
        let commands = galaxy_commands(
            &view,
            &galaxy(),
            &params(),
            0.0,
            &StyleRegistry::standard(),
            &ViewportSettings::default(),
        );
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn test_highlight_scales() {
        let view = with(&[ViewEvent::Select(StarId(0)), ViewEvent::Hover(Some(StarId(1)))]);
        let commands = galaxy_commands(
            &view,
            &galaxy(),
            &params(),
            0.0,
            &StyleRegistry::standard(),
            &ViewportSettings::default(),
        );
        let sol = circle_radius(&commands, DVec2::new(400.0, 300.0)).unwrap_or_default();
        let vega = circle_radius(&commands, DVec2::new(160.0, 120.0)).unwrap_or_default();
        assert!((sol - 4.0 * 1.3).abs() < 1e-9);
        assert!((vega - 4.0 * 1.15).abs() < 1e-9);

        let mut canvas = CommandRecorder::new();
        canvas.draw_all(&commands);
        let labels: Vec<_> = canvas.texts().collect();
        assert_eq!(labels, vec!["Sol", "Vega"]);
    }

    #[test]
    fn test_selection_beats_hover() {
        let view = with(&[ViewEvent::Select(StarId(0)), ViewEvent::Hover(Some(StarId(0)))]);
        assert_eq!(
            highlight_scale(&view, StarId(0), &ViewportSettings::default()),
            1.3
        );
    }

    #[test]
    fn test_twinkle_is_pure_and_bounded() {
        for t in [0.0, 0.5, 13.2, 1000.0] {
            let b = twinkle(t, 1.0);
            assert_eq!(b, twinkle(t, 1.0));
            assert!((0.5..=1.0).contains(&b));
        }
    }

    #[test]
    fn test_galaxy_commands_are_idempotent() {
        let view = with(&[ViewEvent::Hover(Some(StarId(1)))]);
        let build = || {
            galaxy_commands(
                &view,
                &galaxy(),
                &params(),
                4.2,
                &StyleRegistry::standard(),
                &ViewportSettings::default(),
            )
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_province_labels_and_selection_outline() {
        let provinces = Provinces::from_provinces(
            0,
            vec![
                Province {
                    name: "Westmarch".to_string(),
                    vertices: vec![
                        DVec2::new(0.0, 0.0),
                        DVec2::new(0.5, 0.0),
                        DVec2::new(0.5, 1.0),
                        DVec2::new(0.0, 1.0),
                    ],
                    owner: 0,
                },
                Province {
                    name: "Eastmarch".to_string(),
                    vertices: vec![
                        DVec2::new(0.5, 0.0),
                        DVec2::new(1.0, 0.0),
                        DVec2::new(1.0, 1.0),
                        DVec2::new(0.5, 1.0),
                    ],
                    owner: 1,
                },
            ],
        );
        let view = with(&[ViewEvent::Select(ProvinceId(1))]);
        let commands = province_commands(&view, &provinces, &params(), &StyleRegistry::standard());

        let mut canvas = CommandRecorder::new();
        canvas.draw_all(&commands);
        // Two fills plus the selection outline
        assert_eq!(canvas.count("Polygon"), 3);
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["Westmarch", "Eastmarch"]);

        let label_pos = commands.iter().find_map(|c| match c {
            DrawCommand::Text { pos, text, .. } if text == "Eastmarch" => Some(*pos),
            _ => None,
        });
        let label_pos = label_pos.unwrap_or_default();
        assert!((label_pos - DVec2::new(600.0, 300.0)).length() < 1e-9);
    }

    #[test]
    fn test_zoomed_out_provinces_hide_plain_labels() {
        let provinces = Provinces::generate(1, 2, 2);
        let far = TransformParams::new(DVec2::new(800.0, 600.0), DVec2::ZERO, 0.5);
        let view = with(&[ViewEvent::Hover(Some(ProvinceId(2)))]);
        let commands = province_commands(&view, &provinces, &far, &StyleRegistry::standard());
        let labels = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count();
        assert_eq!(labels, 1);
    }
}
