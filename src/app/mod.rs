//! Map viewer application module
//!
//! Handles windowing, rendering, and user input. The viewport engine itself
//! lives in [`crate::viewport`]; this layer feeds it winit input and paints
//! its draw commands with egui.

mod canvas;
pub mod config;
mod debug_ui;
mod details;
mod error;
pub mod input;
pub mod map_widget;
mod renderer;
mod runner;
mod window;

pub use canvas::EguiCanvas;
pub use config::{AppConfig, MapKind, SceneConfig, WindowConfig};
pub use error::AppError;
pub use map_widget::MapWidget;
pub use runner::App;
pub use window::{present_mode, window_attributes_from_config};
