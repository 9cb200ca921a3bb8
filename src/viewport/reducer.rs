//! The view-state reducer
//!
//! Every interaction rule lives in [`reduce`]. It is a total function: no
//! event can fail, and an event that does not apply returns the state
//! unchanged.

use glam::DVec2;

use super::settings::ViewportSettings;
use super::state::{DragAnchor, ViewState};

/// A single view transition request
///
/// All positions are widget-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent<I> {
    /// Begin a pan drag at the pointer position
    PanStart(DVec2),
    /// Move the pointer during a pan drag
    PanMove(DVec2),
    /// Finish any pan drag
    PanEnd,
    /// Zoom by `delta` wheel units, keeping the content under `anchor` fixed
    ///
    /// `center` is the zoom fixed point of the transform (the widget center).
    Zoom {
        delta: f64,
        anchor: DVec2,
        center: DVec2,
    },
    /// Replace the hovered entity
    Hover(Option<I>),
    /// Select an entity
    Select(I),
    /// Clear the selection
    Deselect,
    /// Jump to an explicit pan and zoom (zoom is clamped, any drag ends)
    SetView { pan: DVec2, zoom: f64 },
}

/// Side signal for listeners outside the viewport (e.g. a detail panel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSignal<I> {
    EntitySelected(I),
    SelectionCleared,
}

/// Result of one reduction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<I> {
    pub state: ViewState<I>,
    pub signal: Option<ViewSignal<I>>,
}

impl<I> Transition<I> {
    fn quiet(state: ViewState<I>) -> Self {
        Self {
            state,
            signal: None,
        }
    }
}

/// Folds one event into the view state
pub fn reduce<I: Copy>(
    event: ViewEvent<I>,
    state: &ViewState<I>,
    settings: &ViewportSettings,
) -> Transition<I> {
    match event {
        ViewEvent::PanStart(pos) => Transition::quiet(ViewState {
            drag: Some(DragAnchor {
                anchor: pos,
                start_pan: state.pan,
            }),
            ..*state
        }),

        ViewEvent::PanMove(pos) => match state.drag {
            Some(drag) => Transition::quiet(ViewState {
                pan: drag.start_pan + (pos - drag.anchor),
                ..*state
            }),
            None => Transition::quiet(*state),
        },

        ViewEvent::PanEnd => Transition::quiet(ViewState {
            drag: None,
            ..*state
        }),

        ViewEvent::Zoom {
            delta,
            anchor,
            center,
        } => Transition::quiet(zoom_about(state, delta, anchor - center, settings)),

        ViewEvent::Hover(hovered) => Transition::quiet(ViewState { hovered, ..*state }),

        ViewEvent::Select(id) => Transition {
            state: ViewState {
                selected: Some(id),
                ..*state
            },
            signal: Some(ViewSignal::EntitySelected(id)),
        },

        ViewEvent::Deselect => Transition {
            state: ViewState {
                selected: None,
                ..*state
            },
            signal: state.selected.map(|_| ViewSignal::SelectionCleared),
        },

        ViewEvent::SetView { pan, zoom } => {
            let pan = if pan.is_finite() { pan } else { state.pan };
            Transition::quiet(ViewState {
                pan,
                zoom: settings.clamp_zoom(zoom),
                drag: None,
                ..*state
            })
        }
    }
}

/// Anchor-preserving zoom
///
/// `anchor` is relative to the zoom fixed point. The clamp runs before the
/// pan correction so the correction matches the zoom actually applied. An
/// active drag has its start pan shifted by the same correction, so the next
/// move continues from the zoomed view.
fn zoom_about<I: Copy>(
    state: &ViewState<I>,
    delta: f64,
    anchor: DVec2,
    settings: &ViewportSettings,
) -> ViewState<I> {
    if !delta.is_finite() || !anchor.is_finite() {
        return *state;
    }

    let factor = 1.0 + delta * settings.zoom_sensitivity;
    let zoom = settings.clamp_zoom(state.zoom * factor);
    let scale = zoom / state.zoom;
    let pan = anchor - (anchor - state.pan) * scale;
    let drag = state.drag.map(|drag| DragAnchor {
        start_pan: drag.start_pan + (pan - state.pan),
        ..drag
    });

    ViewState {
        pan,
        zoom,
        drag,
        ..*state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;
    const SIZE: DVec2 = DVec2::new(800.0, 600.0);

    fn settings() -> ViewportSettings {
        ViewportSettings::default()
    }

    fn run(state: ViewState<usize>, events: &[ViewEvent<usize>]) -> ViewState<usize> {
        events
            .iter()
            .fold(state, |s, e| reduce(*e, &s, &settings()).state)
    }

    fn zoom_event(delta: f64, anchor: DVec2) -> ViewEvent<usize> {
        ViewEvent::Zoom {
            delta,
            anchor,
            center: SIZE * 0.5,
        }
    }

    #[test]
    fn test_pan_drag_is_exact() {
        let start = ViewState {
            pan: DVec2::new(3.0, 4.0),
            ..Default::default()
        };
        let s = run(
            start,
            &[
                ViewEvent::PanStart(DVec2::new(10.0, 10.0)),
                ViewEvent::PanMove(DVec2::new(15.0, 18.0)),
            ],
        );
        assert_eq!(s.pan(), DVec2::new(8.0, 12.0));
    }

    #[test]
    fn test_pan_move_without_drag_is_noop() {
        let start = ViewState::<usize>::default();
        let s = run(start, &[ViewEvent::PanMove(DVec2::new(50.0, 50.0))]);
        assert_eq!(s, start);
    }

    #[test]
    fn test_pan_moves_do_not_accumulate() {
        let s = run(
            ViewState::default(),
            &[
                ViewEvent::PanStart(DVec2::new(0.0, 0.0)),
                ViewEvent::PanMove(DVec2::new(100.0, 0.0)),
                ViewEvent::PanMove(DVec2::new(40.0, 5.0)),
            ],
        );
        assert_eq!(s.pan(), DVec2::new(40.0, 5.0));
    }

    #[test]
    fn test_pan_end_clears_drag_and_keeps_pan() {
        let s = run(
            ViewState::default(),
            &[
                ViewEvent::PanStart(DVec2::new(0.0, 0.0)),
                ViewEvent::PanMove(DVec2::new(7.0, 9.0)),
                ViewEvent::PanEnd,
            ],
        );
        assert!(!s.is_dragging());
        assert_eq!(s.pan(), DVec2::new(7.0, 9.0));
    }

    #[test]
    fn test_second_pan_start_resets_anchor() {
        let s = run(
            ViewState::default(),
            &[
                ViewEvent::PanStart(DVec2::new(0.0, 0.0)),
                ViewEvent::PanMove(DVec2::new(10.0, 0.0)),
                ViewEvent::PanEnd,
                ViewEvent::PanStart(DVec2::new(100.0, 100.0)),
                ViewEvent::PanMove(DVec2::new(101.0, 102.0)),
            ],
        );
        assert_eq!(s.pan(), DVec2::new(11.0, 2.0));
        assert_eq!(
            s.drag().map(|d| d.start_pan),
            Some(DVec2::new(10.0, 0.0))
        );
    }

    #[test]
    fn test_zoom_at_center_keeps_pan() {
        let s = run(ViewState::default(), &[zoom_event(10.0, SIZE * 0.5)]);
        assert!((s.zoom() - 2.0).abs() < EPSILON);
        assert_eq!(s.pan(), DVec2::ZERO);
    }

    #[test]
    fn test_zoom_preserves_point_under_anchor() {
        let start = ViewState::<usize> {
            pan: DVec2::new(-35.0, 20.0),
            zoom: 1.4,
            ..Default::default()
        };
        let anchor = DVec2::new(610.0, 95.0);
        let before = start.params(SIZE).to_norm(anchor);

        for delta in [-3.0, -1.0, 1.0, 2.5, 6.0] {
            let s = run(start, &[zoom_event(delta, anchor)]);
            let after = s.params(SIZE).to_screen(before);
            assert!((after - anchor).length() < 1e-6, "delta {delta}");
        }
    }

    #[test]
    fn test_zoom_during_drag_keeps_following_pointer() {
        let grab = DVec2::new(600.0, 450.0);
        let zoomed = run(
            ViewState::default(),
            &[ViewEvent::PanStart(grab), zoom_event(5.0, grab)],
        );
        let under_grab = zoomed.params(SIZE).to_norm(grab);
        assert!(zoomed.is_dragging());

        let moved = run(zoomed, &[ViewEvent::PanMove(grab + DVec2::new(1.0, 0.0))]);
        let screen = moved.params(SIZE).to_screen(under_grab);
        assert!((screen - DVec2::new(601.0, 450.0)).length() < 1e-6, "{screen}");
        assert_eq!(moved.pan(), zoomed.pan() + DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_zoom_is_clamped_both_ways() {
        let zoomed_in = run(ViewState::default(), &[zoom_event(500.0, DVec2::ZERO); 4]);
        assert_eq!(zoomed_in.zoom(), 10.0);

        let zoomed_out = run(ViewState::default(), &[zoom_event(-9.5, DVec2::ZERO); 6]);
        assert_eq!(zoomed_out.zoom(), 0.1);
    }

    #[test]
    fn test_zoom_delta_past_minus_ten_still_positive() {
        // factor would be negative; clamp keeps zoom at the floor
        let s = run(ViewState::default(), &[zoom_event(-25.0, DVec2::new(10.0, 10.0))]);
        assert_eq!(s.zoom(), 0.1);
        assert!(s.pan().is_finite());
    }

    #[test]
    fn test_zoom_at_limit_does_not_drift_pan() {
        let at_max = ViewState::<usize> {
            zoom: 10.0,
            pan: DVec2::new(12.0, 34.0),
            ..Default::default()
        };
        let s = run(at_max, &[zoom_event(5.0, DVec2::new(700.0, 20.0))]);
        assert_eq!(s.zoom(), 10.0);
        assert_eq!(s.pan(), DVec2::new(12.0, 34.0));
    }

    #[test]
    fn test_zoom_ignores_non_finite_input() {
        let start = ViewState::<usize>::default();
        let s = run(start, &[zoom_event(f64::NAN, DVec2::ZERO)]);
        assert_eq!(s, start);
    }

    #[test]
    fn test_hover_does_not_select() {
        let s = run(ViewState::default(), &[ViewEvent::Hover(Some(3))]);
        assert_eq!(s.hovered(), Some(3));
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_select_emits_signal() {
        let t = reduce(ViewEvent::Select(7), &ViewState::default(), &settings());
        assert_eq!(t.state.selected(), Some(7));
        assert_eq!(t.signal, Some(ViewSignal::EntitySelected(7)));
    }

    #[test]
    fn test_deselect_signals_only_when_something_was_selected() {
        let empty = reduce(ViewEvent::<usize>::Deselect, &ViewState::default(), &settings());
        assert_eq!(empty.signal, None);

        let selected = run(ViewState::default(), &[ViewEvent::Select(2)]);
        let t = reduce(ViewEvent::Deselect, &selected, &settings());
        assert_eq!(t.state.selected(), None);
        assert_eq!(t.signal, Some(ViewSignal::SelectionCleared));
    }

    #[test]
    fn test_set_view_clamps_and_ends_drag() {
        let s = run(
            ViewState::default(),
            &[
                ViewEvent::PanStart(DVec2::ZERO),
                ViewEvent::SetView {
                    pan: DVec2::new(1.0, 2.0),
                    zoom: 99.0,
                },
            ],
        );
        assert_eq!(s.zoom(), 10.0);
        assert_eq!(s.pan(), DVec2::new(1.0, 2.0));
        assert!(!s.is_dragging());
    }

    #[test]
    fn test_events_leave_unrelated_fields_alone() {
        let start = run(
            ViewState::default(),
            &[ViewEvent::Select(1), ViewEvent::Hover(Some(4))],
        );
        let s = run(start, &[zoom_event(2.0, DVec2::new(100.0, 100.0))]);
        assert_eq!(s.selected(), Some(1));
        assert_eq!(s.hovered(), Some(4));
    }
}
