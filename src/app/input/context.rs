//! Input event routing and distribution

use glam::DVec2;

use super::events::{InputEvent, ViewportId};
use super::handler::InputHandler;
use super::state::InputState;
use crate::viewport::ScreenRect;

/// Rectangular area for viewport hit testing, in logical window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Edge-inclusive containment
    pub fn contains(&self, pos: [f32; 2]) -> bool {
        pos[0] >= self.x
            && pos[0] <= self.x + self.width
            && pos[1] >= self.y
            && pos[1] <= self.y + self.height
    }

    /// The same rect in the viewport engine's units
    pub fn to_screen_rect(self) -> ScreenRect {
        ScreenRect::new(
            self.x as f64,
            self.y as f64,
            self.width as f64,
            self.height as f64,
        )
    }
}

/// Window position to viewport-engine position
pub fn to_dvec2(pos: [f32; 2]) -> DVec2 {
    DVec2::new(pos[0] as f64, pos[1] as f64)
}

/// A viewport registered during layout
#[derive(Debug, Clone)]
pub struct ViewportInfo {
    pub id: ViewportId,
    pub rect: Rect,
    pub name: String,
}

/// Read-only view handed to handlers with each event
pub struct EventContext<'a> {
    viewports: &'a [ViewportInfo],
}

impl<'a> EventContext<'a> {
    pub fn new(viewports: &'a [ViewportInfo]) -> Self {
        Self { viewports }
    }

    pub fn viewport(&self, id: ViewportId) -> Option<&'a ViewportInfo> {
        self.viewports.iter().find(|v| v.id == id)
    }
}

/// Central input routing and distribution system
pub struct InputContext {
    /// Registered input handlers, sorted by priority (highest first)
    handlers: Vec<Box<dyn InputHandler>>,
    /// Current input state
    state: InputState,
    /// Viewports in registration order
    viewports: Vec<ViewportInfo>,
    /// Debug: events dispatched last frame
    last_events: Vec<String>,
}

impl InputContext {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            state: InputState::new(),
            viewports: Vec::new(),
            last_events: Vec::new(),
        }
    }

    /// Register an input handler
    ///
    /// Handlers are kept sorted by priority (highest first). Equal priorities
    /// keep registration order.
    pub fn register_handler(&mut self, handler: Box<dyn InputHandler>) {
        self.handlers.push(handler);
        self.handlers.sort_by_key(|h| std::cmp::Reverse(h.priority()));
    }

    /// Update input state from collector
    pub fn update_state(&mut self, state: InputState) {
        self.state = state;
    }

    /// Register a viewport for hit testing
    ///
    /// Call during layout. Re-registering an id replaces its rect and name.
    pub fn register_viewport(&mut self, id: ViewportId, rect: Rect, name: impl Into<String>) {
        let info = ViewportInfo {
            id,
            rect,
            name: name.into(),
        };
        match self.viewports.iter_mut().find(|v| v.id == id) {
            Some(existing) => *existing = info,
            None => self.viewports.push(info),
        }
    }

    /// Clear all registered viewports
    ///
    /// Call at the start of layout so hidden widgets stop receiving input.
    pub fn clear_viewports(&mut self) {
        self.viewports.clear();
    }

    /// Dispatch a batch of events in arrival order
    ///
    /// Each event is tagged with the viewport under its position, then offered
    /// to handlers by priority until one consumes it.
    pub fn process(&mut self, events: Vec<InputEvent>) {
        self.last_events.clear();

        for event in events {
            let event = self.resolve_viewport(event);
            self.last_events.push(format!("{:?}", event));

            let ctx = EventContext::new(&self.viewports);
            for handler in &mut self.handlers {
                if handler.handle_event(&event, &ctx) {
                    break;
                }
            }
        }
    }

    fn resolve_viewport(&self, event: InputEvent) -> InputEvent {
        match event {
            InputEvent::Click { button, pos, .. } => InputEvent::Click {
                button,
                pos,
                viewport: self.find_viewport_at(pos),
            },
            InputEvent::Hover { pos, .. } => InputEvent::Hover {
                pos,
                viewport: self.find_viewport_at(pos),
            },
            InputEvent::Scroll { delta, pos, .. } => InputEvent::Scroll {
                delta,
                pos,
                viewport: self.find_viewport_at(pos),
            },
            other => other,
        }
    }

    /// First viewport, in registration order, containing `pos`
    fn find_viewport_at(&self, pos: [f32; 2]) -> Option<ViewportId> {
        self.viewports
            .iter()
            .find(|v| v.rect.contains(pos))
            .map(|v| v.id)
    }

    pub fn viewport_rect(&self, id: ViewportId) -> Option<Rect> {
        self.viewports.iter().find(|v| v.id == id).map(|v| v.rect)
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn viewport_count(&self) -> usize {
        self.viewports.len()
    }

    /// Get a mutable reference to a handler by name
    pub fn get_handler_mut(&mut self, name: &str) -> Option<&mut (dyn InputHandler + 'static)> {
        if let Some(boxed) = self.handlers.iter_mut().find(|h| h.name() == name) {
            Some(boxed.as_mut())
        } else {
            None
        }
    }

    /// Get a reference to a handler by name
    pub fn get_handler(&self, name: &str) -> Option<&dyn InputHandler> {
        self.handlers
            .iter()
            .find(|h| h.name() == name)
            .map(|b| b.as_ref())
    }

    /// Downcast a named handler
    pub fn handler<T: 'static>(&self, name: &str) -> Option<&T> {
        self.get_handler(name)?.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast a named handler
    pub fn handler_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_handler_mut(name)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn debug_viewports(&self) -> Vec<(ViewportId, Rect, String)> {
        self.viewports
            .iter()
            .map(|v| (v.id, v.rect, v.name.clone()))
            .collect()
    }

    pub fn debug_handlers(&self) -> Vec<(String, u32)> {
        self.handlers
            .iter()
            .map(|h| (h.name().to_string(), h.priority()))
            .collect()
    }

    /// Events dispatched last frame (for debugging)
    pub fn debug_last_events(&self) -> &[String] {
        &self.last_events
    }
}

impl Default for InputContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::app::input::events::MouseButton;

    /// Records every event and consumes clicks
    struct Recorder {
        name: &'static str,
        priority: u32,
        seen: Vec<InputEvent>,
    }

    impl InputHandler for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> u32 {
            self.priority
        }

        fn handle_event(&mut self, event: &InputEvent, _ctx: &EventContext<'_>) -> bool {
            self.seen.push(event.clone());
            matches!(event, InputEvent::Click { .. })
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn recorder(name: &'static str, priority: u32) -> Box<Recorder> {
        Box::new(Recorder {
            name,
            priority,
            seen: Vec::new(),
        })
    }

    #[test]
    fn test_viewport_is_resolved_per_event() {
        let mut ctx = InputContext::new();
        ctx.register_handler(recorder("low", 10));
        ctx.register_viewport(ViewportId(1), Rect::new(0.0, 0.0, 100.0, 100.0), "map");

        ctx.process(vec![
            InputEvent::Hover {
                pos: [50.0, 50.0],
                viewport: None,
            },
            InputEvent::Hover {
                pos: [150.0, 50.0],
                viewport: None,
            },
        ]);

        let seen = &ctx.handler::<Recorder>("low").map(|r| r.seen.clone()).unwrap_or_default();
        assert_eq!(
            seen[0],
            InputEvent::Hover {
                pos: [50.0, 50.0],
                viewport: Some(ViewportId(1))
            }
        );
        assert_eq!(
            seen[1],
            InputEvent::Hover {
                pos: [150.0, 50.0],
                viewport: None
            }
        );
    }

    #[test]
    fn test_consumed_events_stop_propagating() {
        let mut ctx = InputContext::new();
        ctx.register_handler(recorder("low", 10));
        ctx.register_handler(recorder("high", 200));

        ctx.process(vec![
            InputEvent::Click {
                button: MouseButton::Left,
                pos: [0.0, 0.0],
                viewport: None,
            },
            InputEvent::PointerLeft,
        ]);

        let high = ctx.handler::<Recorder>("high").map(|r| r.seen.len());
        let low = ctx.handler::<Recorder>("low").map(|r| r.seen.clone());
        assert_eq!(high, Some(2));
        assert_eq!(low, Some(vec![InputEvent::PointerLeft]));
        assert_eq!(ctx.debug_last_events().len(), 2);
    }

    #[test]
    fn test_handler_mut_reaches_named_handler() {
        let mut ctx = InputContext::new();
        ctx.register_handler(recorder("a", 10));
        ctx.register_handler(recorder("b", 20));

        if let Some(b) = ctx.handler_mut::<Recorder>("b") {
            b.seen.push(InputEvent::PointerLeft);
        }
        assert!(ctx.get_handler_mut("missing").is_none());
        assert_eq!(ctx.handler::<Recorder>("b").map(|r| r.seen.len()), Some(1));
        assert_eq!(ctx.handler::<Recorder>("a").map(|r| r.seen.len()), Some(0));
    }

    #[test]
    fn test_reregistering_viewport_replaces_it() {
        let mut ctx = InputContext::new();
        ctx.register_viewport(ViewportId(0), Rect::new(0.0, 0.0, 10.0, 10.0), "a");
        ctx.register_viewport(ViewportId(0), Rect::new(5.0, 5.0, 10.0, 10.0), "b");
        assert_eq!(ctx.viewport_count(), 1);
        assert_eq!(ctx.viewport_rect(ViewportId(0)).map(|r| r.x), Some(5.0));
        ctx.clear_viewports();
        assert_eq!(ctx.viewport_count(), 0);
    }

    #[test]
    fn test_rect_conversion() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).to_screen_rect();
        assert_eq!(r, ScreenRect::new(1.0, 2.0, 3.0, 4.0));
    }
}
