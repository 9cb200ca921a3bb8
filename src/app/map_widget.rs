//! Map widgets: one viewport controller bound to one entity layer

use std::any::Any;
use std::sync::Arc;

use tracing::debug;

use super::input::{
    EventContext, InputEvent, InputHandler, KeyCode, MouseButton, ViewportId, to_dvec2,
};
use crate::viewport::{
    EntityLayer, ScreenRect, ViewSignal, ViewState, ViewportController, ViewportInput,
    ViewportSettings,
};

/// Input priority of map widgets
pub const MAP_WIDGET_PRIORITY: u32 = 60;

/// Wheel lines per `+`/`-` key press
const KEY_ZOOM_LINES: f64 = 2.0;

/// An interactive map bound to the viewport registered under its id
///
/// Pointer input is only interpreted against the rect registered for this
/// widget during the latest layout pass. When the widget is not laid out
/// (another map is showing) pointer events only end drags and clear hover.
pub struct MapWidget<L: EntityLayer> {
    name: String,
    viewport: ViewportId,
    layer: Arc<L>,
    controller: ViewportController<L::Id>,
    signals: Vec<ViewSignal<L::Id>>,
}

impl<L: EntityLayer> MapWidget<L> {
    pub fn new(
        name: impl Into<String>,
        viewport: ViewportId,
        layer: Arc<L>,
        settings: ViewportSettings,
    ) -> Self {
        let name = name.into();
        Self {
            controller: ViewportController::new(name.clone(), settings),
            name,
            viewport,
            layer,
            signals: Vec::new(),
        }
    }

    pub fn viewport_id(&self) -> ViewportId {
        self.viewport
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    /// Snapshot of the current view state
    pub fn state(&self) -> ViewState<L::Id> {
        *self.controller.state()
    }

    pub fn settings(&self) -> &ViewportSettings {
        self.controller.settings()
    }

    /// Selects an entity programmatically (e.g. from a list)
    pub fn select(&mut self, id: L::Id) {
        if let Some(signal) = self.controller.select(id, self.layer.as_ref()) {
            self.signals.push(signal);
        }
    }

    pub fn deselect(&mut self) {
        if let Some(signal) = self.controller.deselect() {
            self.signals.push(signal);
        }
    }

    pub fn center_on(&mut self, id: L::Id, rect: &ScreenRect) {
        self.controller.center_on(id, self.layer.as_ref(), rect);
    }

    /// Selection signals emitted since the last call, oldest first
    pub fn take_signals(&mut self) -> Vec<ViewSignal<L::Id>> {
        std::mem::take(&mut self.signals)
    }

    fn feed(&mut self, input: ViewportInput) {
        if let Some(signal) = self.controller.handle(input, self.layer.as_ref()) {
            self.signals.push(signal);
        }
    }

    fn handle_key(&mut self, key: KeyCode, rect: ScreenRect) -> bool {
        match key {
            KeyCode::Escape => self.deselect(),
            KeyCode::Plus => self.controller.zoom_by(KEY_ZOOM_LINES, &rect),
            KeyCode::Minus => self.controller.zoom_by(-KEY_ZOOM_LINES, &rect),
            KeyCode::R => self.controller.reset_view(),
            KeyCode::C => match self.controller.state().selected() {
                Some(id) => self.center_on(id, &rect),
                None => return false,
            },
            _ => return false,
        }
        debug!(widget = %self.name, ?key, "Key handled");
        true
    }
}

impl<L> InputHandler for MapWidget<L>
where
    L: EntityLayer + 'static,
    L::Id: 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u32 {
        MAP_WIDGET_PRIORITY
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &EventContext<'_>) -> bool {
        let rect = ctx.viewport(self.viewport).map(|v| v.rect.to_screen_rect());

        match (event, rect) {
            (
                InputEvent::Click {
                    button: MouseButton::Left,
                    pos,
                    viewport,
                },
                Some(rect),
            ) => {
                self.feed(ViewportInput::Click {
                    pos: to_dvec2(*pos),
                    rect,
                });
                *viewport == Some(self.viewport)
            }

            (InputEvent::Hover { pos, .. }, Some(rect)) => {
                self.feed(ViewportInput::Hover {
                    pos: to_dvec2(*pos),
                    rect,
                });
                false
            }

            (InputEvent::Hover { .. }, None) | (InputEvent::PointerLeft, _) => {
                self.feed(ViewportInput::PointerLeft);
                false
            }

            (
                InputEvent::MouseUp {
                    button: MouseButton::Left,
                },
                _,
            ) => {
                self.feed(ViewportInput::MouseUp);
                false
            }

            (
                InputEvent::Scroll {
                    delta,
                    pos,
                    viewport,
                },
                Some(rect),
            ) => {
                self.feed(ViewportInput::Scroll {
                    pos: to_dvec2(*pos),
                    delta_y: delta[1] as f64,
                    rect,
                });
                *viewport == Some(self.viewport)
            }

            (InputEvent::KeyPress { key, .. }, Some(rect)) => self.handle_key(*key, rect),

            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
