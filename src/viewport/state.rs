//! Per-widget view state
//!
//! A `ViewState` is replaced wholesale on every accepted transition. Nothing
//! outside the reducer builds a successor, so a renderer holding a copy
//! always sees a consistent snapshot.

use glam::DVec2;

use super::transform::TransformParams;

/// Where an in-progress pan drag started
///
/// Pan is recomputed from these two values on every move instead of being
/// accumulated, so a long drag never drifts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    /// Widget-local pointer position at drag start
    pub anchor: DVec2,
    /// Pan value at drag start
    pub start_pan: DVec2,
}

/// Pan, zoom, drag, hover and selection for one map widget
///
/// `I` is the widget's entity index type, so a province index can never be
/// stored in a galaxy view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState<I> {
    pub(super) pan: DVec2,
    pub(super) zoom: f64,
    pub(super) hovered: Option<I>,
    pub(super) selected: Option<I>,
    pub(super) drag: Option<DragAnchor>,
}

impl<I> Default for ViewState<I> {
    fn default() -> Self {
        Self {
            pan: DVec2::ZERO,
            zoom: 1.0,
            hovered: None,
            selected: None,
            drag: None,
        }
    }
}

impl<I: Copy> ViewState<I> {
    pub fn pan(&self) -> DVec2 {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn hovered(&self) -> Option<I> {
        self.hovered
    }

    pub fn selected(&self) -> Option<I> {
        self.selected
    }

    /// The active drag, if any. Its values are only meaningful while present.
    pub fn drag(&self) -> Option<DragAnchor> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Transform for a widget of the given size under this view
    pub fn params(&self, size: DVec2) -> TransformParams {
        TransformParams::new(size, self.pan, self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_state() {
        let state: ViewState<usize> = ViewState::default();
        assert_eq!(state.pan(), DVec2::ZERO);
        assert_eq!(state.zoom(), 1.0);
        assert_eq!(state.hovered(), None);
        assert_eq!(state.selected(), None);
        assert!(!state.is_dragging());
        assert!(state.drag().is_none());
    }

    #[test]
    fn test_params_reflect_state() {
        let state = ViewState::<usize> {
            pan: DVec2::new(5.0, -3.0),
            zoom: 2.0,
            ..Default::default()
        };
        let params = state.params(DVec2::new(640.0, 480.0));
        assert_eq!(params.screen_width, 640.0);
        assert_eq!(params.screen_height, 480.0);
        assert_eq!(params.pan(), DVec2::new(5.0, -3.0));
        assert_eq!(params.zoom, 2.0);
    }
}
