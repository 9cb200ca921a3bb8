//! Input handler trait for subsystems

use super::context::EventContext;
use super::events::InputEvent;

/// Trait for subsystems that handle input
///
/// Handlers are called in priority order (highest first).
/// When a handler consumes an event (returns true), propagation stops.
pub trait InputHandler {
    /// Name of this handler for lookup and debugging
    fn name(&self) -> &str;

    /// Priority for input routing (higher = earlier)
    ///
    /// Priority ranges:
    /// - 200+: Critical system handlers (debug overlays)
    /// - 100-199: UI handlers (panels, menus)
    /// - 50-99: Map widgets
    /// - 0-49: Global/fallback handlers (hotkeys)
    fn priority(&self) -> u32;

    /// Handle one input event
    ///
    /// `ctx` exposes the viewports registered during the last layout pass.
    ///
    /// Returns `true` if the event was consumed.
    fn handle_event(&mut self, event: &InputEvent, ctx: &EventContext<'_>) -> bool;

    /// Downcast to the concrete handler type
    fn as_any(&self) -> &dyn std::any::Any;

    /// Mutable downcast to the concrete handler type
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
