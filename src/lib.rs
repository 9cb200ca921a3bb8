//! Starmap
//!
//! An interactive 2D map viewer: a pannable, zoomable star field and a
//! province map built on one viewport engine, with a winit + wgpu + egui shell.

/// Viewer application - windowing, rendering, and input handling
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Startup diagnostics
pub mod health;

/// Backend-agnostic draw commands and styles
pub mod render;

/// Procedurally generated maps
pub mod scene;

/// Coordinate transform, view state reducer and hit testing
pub mod viewport;
