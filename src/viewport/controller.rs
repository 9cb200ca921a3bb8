//! Viewport controller
//!
//! Turns raw pointer input for one widget into reducer events. Each input is
//! processed to completion before the next one: filter against the widget
//! rect, localize, build fresh transform params, hit-test, reduce, publish.

use glam::DVec2;
use tracing::debug;

use super::layer::EntityLayer;
use super::reducer::{ViewEvent, ViewSignal, reduce};
use super::settings::ViewportSettings;
use super::state::ViewState;
use super::transform::{ScreenRect, TransformParams};

/// Raw pointer input in window coordinates
///
/// `rect` is the widget's content rect as laid out for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportInput {
    Click { pos: DVec2, rect: ScreenRect },
    Hover { pos: DVec2, rect: ScreenRect },
    MouseUp,
    /// `delta_y` is in wheel units, positive zooms in
    Scroll {
        pos: DVec2,
        delta_y: f64,
        rect: ScreenRect,
    },
    /// The pointer left the window entirely
    PointerLeft,
}

/// Owns the view state of one map widget
#[derive(Debug, Clone)]
pub struct ViewportController<I> {
    name: String,
    settings: ViewportSettings,
    state: ViewState<I>,
}

impl<I: Copy + PartialEq + std::fmt::Debug> ViewportController<I> {
    pub fn new(name: impl Into<String>, settings: ViewportSettings) -> Self {
        Self {
            name: name.into(),
            settings: settings.validated(),
            state: ViewState::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &ViewportSettings {
        &self.settings
    }

    /// The latest published state
    pub fn state(&self) -> &ViewState<I> {
        &self.state
    }

    /// Transform for the widget's current rect
    pub fn params(&self, rect: &ScreenRect) -> TransformParams {
        self.state.params(rect.size)
    }

    /// Processes one raw input against `layer`
    pub fn handle<L>(&mut self, input: ViewportInput, layer: &L) -> Option<ViewSignal<I>>
    where
        L: EntityLayer<Id = I>,
    {
        let event = self.interpret(input, layer)?;
        self.apply(event)
    }

    /// Selects `id` if it exists in `layer`
    pub fn select<L>(&mut self, id: I, layer: &L) -> Option<ViewSignal<I>>
    where
        L: EntityLayer<Id = I>,
    {
        if !layer.contains(id) {
            debug!(viewport = %self.name, ?id, "Ignoring selection of unknown entity");
            return None;
        }
        self.apply(ViewEvent::Select(id))
    }

    pub fn deselect(&mut self) -> Option<ViewSignal<I>> {
        self.apply(ViewEvent::Deselect)
    }

    /// Zooms about the rect center, for keyboard bindings
    pub fn zoom_by(&mut self, delta: f64, rect: &ScreenRect) {
        let center = rect.local_center();
        self.apply(ViewEvent::Zoom {
            delta,
            anchor: center,
            center,
        });
    }

    /// Returns pan and zoom to their defaults, keeping hover and selection
    pub fn reset_view(&mut self) {
        self.apply(ViewEvent::SetView {
            pan: DVec2::ZERO,
            zoom: 1.0,
        });
    }

    /// Pans so that the entity's anchor sits at the widget center
    pub fn center_on<L>(&mut self, id: I, layer: &L, rect: &ScreenRect)
    where
        L: EntityLayer<Id = I>,
    {
        if rect.is_empty() {
            return;
        }
        let Some(norm) = layer.anchor(id) else {
            return;
        };
        let zoom = self.state.zoom;
        let center = rect.local_center();
        let pan = -(norm * rect.size - center) * zoom;
        self.apply(ViewEvent::SetView { pan, zoom });
    }

    /// Entities whose anchor lies in the rect-local rectangle spanned by `a` and `b`
    pub fn select_in_rect<L>(&self, layer: &L, rect: &ScreenRect, a: DVec2, b: DVec2) -> Vec<I>
    where
        L: EntityLayer<Id = I>,
    {
        if rect.is_empty() {
            return Vec::new();
        }
        layer.entities_in_rect(&self.params(rect), a, b)
    }

    fn interpret<L>(&self, input: ViewportInput, layer: &L) -> Option<ViewEvent<I>>
    where
        L: EntityLayer<Id = I>,
    {
        match input {
            ViewportInput::Click { pos, rect } => {
                if rect.is_empty() || !rect.contains(pos) {
                    return None;
                }
                let local = rect.localize(pos);
                let params = self.params(&rect);
                Some(match layer.entity_at(&params, local, &self.settings) {
                    Some(id) => ViewEvent::Select(id),
                    None => ViewEvent::PanStart(local),
                })
            }

            ViewportInput::Hover { pos, rect } => {
                if rect.is_empty() || !rect.contains(pos) {
                    return self.leave_event();
                }
                let local = rect.localize(pos);
                if self.state.is_dragging() {
                    return Some(ViewEvent::PanMove(local));
                }
                let params = self.params(&rect);
                let hit = layer.entity_at(&params, local, &self.settings);
                (hit != self.state.hovered).then_some(ViewEvent::Hover(hit))
            }

            ViewportInput::MouseUp => self.state.is_dragging().then_some(ViewEvent::PanEnd),

            ViewportInput::Scroll { pos, delta_y, rect } => {
                if rect.is_empty() || !rect.contains(pos) {
                    return None;
                }
                Some(ViewEvent::Zoom {
                    delta: delta_y,
                    anchor: rect.localize(pos),
                    center: rect.local_center(),
                })
            }

            ViewportInput::PointerLeft => self.leave_event(),
        }
    }

    /// Dragging takes precedence over clearing the hover
    fn leave_event(&self) -> Option<ViewEvent<I>> {
        if self.state.is_dragging() {
            Some(ViewEvent::PanEnd)
        } else if self.state.hovered.is_some() {
            Some(ViewEvent::Hover(None))
        } else {
            None
        }
    }

    fn apply(&mut self, event: ViewEvent<I>) -> Option<ViewSignal<I>> {
        let transition = reduce(event, &self.state, &self.settings);

        match event {
            ViewEvent::PanStart(at) => debug!(viewport = %self.name, ?at, "Pan started"),
            ViewEvent::PanEnd => debug!(viewport = %self.name, pan = ?transition.state.pan, "Pan ended"),
            _ => {}
        }
        if let Some(signal) = &transition.signal {
            debug!(viewport = %self.name, ?signal, "Selection changed");
        }

        self.state = transition.state;
        transition.signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::hit::PointEntity;
    use crate::viewport::layer::{StarField, StarId};

    fn rect() -> ScreenRect {
        ScreenRect::new(100.0, 50.0, 800.0, 600.0)
    }

    fn field() -> StarField {
        // Centered star lands at window (500, 350)
        StarField::new(vec![PointEntity {
            norm: DVec2::new(0.5, 0.5),
            radius_px: 4.0,
        }])
    }

    fn controller() -> ViewportController<StarId> {
        ViewportController::new("galaxy", ViewportSettings::default())
    }

    fn click(x: f64, y: f64) -> ViewportInput {
        ViewportInput::Click {
            pos: DVec2::new(x, y),
            rect: rect(),
        }
    }

    fn hover(x: f64, y: f64) -> ViewportInput {
        ViewportInput::Hover {
            pos: DVec2::new(x, y),
            rect: rect(),
        }
    }

    #[test]
    fn test_click_on_star_selects() {
        let mut c = controller();
        let signal = c.handle(click(501.0, 351.0), &field());
        assert_eq!(signal, Some(ViewSignal::EntitySelected(StarId(0))));
        assert!(!c.state().is_dragging());
    }

    #[test]
    fn test_click_on_empty_space_starts_pan_and_keeps_selection() {
        let mut c = controller();
        c.handle(click(500.0, 350.0), &field());
        let signal = c.handle(click(200.0, 100.0), &field());
        assert_eq!(signal, None);
        assert!(c.state().is_dragging());
        assert_eq!(c.state().selected(), Some(StarId(0)));
        assert_eq!(c.state().drag().map(|d| d.anchor), Some(DVec2::new(100.0, 50.0)));
    }

    #[test]
    fn test_click_outside_rect_is_ignored() {
        let mut c = controller();
        assert_eq!(c.handle(click(50.0, 50.0), &field()), None);
        assert!(!c.state().is_dragging());
    }

    #[test]
    fn test_drag_moves_pan_and_freezes_hover() {
        let mut c = controller();
        c.handle(click(200.0, 100.0), &field());
        // Passing over the star while dragging must not hover it
        c.handle(hover(500.0, 350.0), &field());
        assert_eq!(c.state().pan(), DVec2::new(300.0, 250.0));
        assert_eq!(c.state().hovered(), None);
        c.handle(ViewportInput::MouseUp, &field());
        assert!(!c.state().is_dragging());
    }

    #[test]
    fn test_hover_only_changes_on_new_target() {
        let mut c = controller();
        c.handle(hover(500.0, 350.0), &field());
        assert_eq!(c.state().hovered(), Some(StarId(0)));
        c.handle(hover(300.0, 300.0), &field());
        assert_eq!(c.state().hovered(), None);
    }

    #[test]
    fn test_leaving_rect_ends_drag_before_clearing_hover() {
        let mut c = controller();
        c.handle(hover(500.0, 350.0), &field());
        c.handle(click(200.0, 100.0), &field());
        c.handle(hover(5.0, 5.0), &field());
        assert!(!c.state().is_dragging());
        assert_eq!(c.state().hovered(), Some(StarId(0)));

        c.handle(ViewportInput::PointerLeft, &field());
        assert_eq!(c.state().hovered(), None);
    }

    #[test]
    fn test_scroll_uses_local_anchor() {
        let mut c = controller();
        c.handle(
            ViewportInput::Scroll {
                pos: DVec2::new(500.0, 350.0),
                delta_y: 10.0,
                rect: rect(),
            },
            &field(),
        );
        assert!((c.state().zoom() - 2.0).abs() < 1e-9);
        assert_eq!(c.state().pan(), DVec2::ZERO);
    }

    #[test]
    fn test_scroll_outside_rect_is_ignored() {
        let mut c = controller();
        c.handle(
            ViewportInput::Scroll {
                pos: DVec2::new(950.0, 350.0),
                delta_y: 3.0,
                rect: rect(),
            },
            &field(),
        );
        assert_eq!(c.state().zoom(), 1.0);
    }

    #[test]
    fn test_select_validates_against_layer() {
        let mut c = controller();
        assert_eq!(c.select(StarId(3), &field()), None);
        assert_eq!(c.state().selected(), None);
        assert_eq!(
            c.select(StarId(0), &field()),
            Some(ViewSignal::EntitySelected(StarId(0)))
        );
        assert_eq!(c.deselect(), Some(ViewSignal::SelectionCleared));
        assert_eq!(c.deselect(), None);
    }

    #[test]
    fn test_center_on_places_anchor_at_center() {
        let layer = StarField::new(vec![PointEntity {
            norm: DVec2::new(0.1, 0.2),
            radius_px: 3.0,
        }]);
        let mut c = controller();
        c.zoom_by(5.0, &rect());
        c.center_on(StarId(0), &layer, &rect());
        let screen = c.params(&rect()).to_screen(DVec2::new(0.1, 0.2));
        assert!((screen - rect().local_center()).length() < 1e-9);
    }

    #[test]
    fn test_reset_view() {
        let mut c = controller();
        c.zoom_by(4.0, &rect());
        c.handle(click(200.0, 100.0), &field());
        c.handle(hover(260.0, 140.0), &field());
        c.reset_view();
        assert_eq!(c.state().zoom(), 1.0);
        assert_eq!(c.state().pan(), DVec2::ZERO);
        assert!(!c.state().is_dragging());
    }

    #[test]
    fn test_select_in_rect_uses_local_coordinates() {
        let c = controller();
        let hits = c.select_in_rect(
            &field(),
            &rect(),
            DVec2::new(350.0, 250.0),
            DVec2::new(450.0, 350.0),
        );
        assert_eq!(hits, vec![StarId(0)]);
    }
}
