//! Built-in health checks for core systems

pub mod build_info;
pub mod config;
pub mod render;
pub mod scene;
pub mod system_info;
pub mod viewport;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use render::RenderCheck;
pub use scene::SceneCheck;
pub use system_info::SystemInfoCheck;
pub use viewport::ViewportCheck;
