//! Input handling system
//!
//! Collects raw winit input into an ordered event queue and routes each event
//! to handlers in priority order. Pointer events are tagged with the viewport
//! under the cursor, using the rects registered during the last layout pass.
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → InputCollector → ordered InputEvent queue
//!                                          ↓
//!                                    InputContext
//!                                  (viewport tagging)
//!                                          ↓
//!                                   InputHandlers
//!                                   (by priority)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // In window_event()
//! collector.handle_window_event(&event);
//!
//! // Once per frame
//! input_context.update_state(collector.clone_state());
//! input_context.process(collector.drain_events());
//! collector.advance_frame();
//! ```

mod collector;
mod context;
mod events;
mod handler;
mod state;

pub use collector::InputCollector;
pub use context::{EventContext, InputContext, Rect, ViewportInfo, to_dvec2};
pub use events::{InputEvent, KeyCode, MouseButton, ViewportId};
pub use handler::InputHandler;
pub use state::{InputState, Modifiers};
