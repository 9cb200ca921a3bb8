//! Draw command building
//!
//! Maps view state and scene data to backend-agnostic [`DrawCommand`]s.
//! Nothing here touches the GPU.

pub mod builder;
pub mod command;
pub mod style;

pub use builder::{galaxy_commands, highlight_scale, province_commands, twinkle};
pub use command::{Canvas, CommandRecorder, DrawCommand, Rgba, Stroke};
pub use style::{StyleRegistry, keys};
