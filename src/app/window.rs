//! Window configuration and management

use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

use super::config::WindowConfig;

/// Smallest window that still leaves the map usable next to the side panel
const MIN_WINDOW_SIZE: LogicalSize<f64> = LogicalSize::new(480.0, 360.0);

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let size = LogicalSize::new(
        config.width.max(MIN_WINDOW_SIZE.width),
        config.height.max(MIN_WINDOW_SIZE.height),
    );

    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(size)
        .with_min_inner_size(MIN_WINDOW_SIZE)
        .with_resizable(config.resizable)
        .with_decorations(config.decorated);

    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    attrs
}

/// Present mode matching the vsync setting
pub fn present_mode(config: &WindowConfig) -> wgpu::PresentMode {
    if config.vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}
