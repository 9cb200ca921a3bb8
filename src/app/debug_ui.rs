//! Debug UI state and rendering

use std::time::Instant;

use glam::DVec2;
use sysinfo::System;

use super::config::MapKind;
use super::input::InputContext;
use super::renderer::FrameStats;

/// Frames averaged for the FPS readout
const FRAME_WINDOW: usize = 100;

/// Events listed in the input section
const MAX_LISTED_EVENTS: usize = 12;

/// Snapshot of the active map's view, taken right before the overlay draws
#[derive(Debug, Clone, Default)]
pub struct MapDebugInfo {
    pub kind: MapKind,
    pub zoom: f64,
    pub pan: DVec2,
    pub hovered: Option<String>,
    pub selected: Option<String>,
    pub dragging: bool,
    pub entity_count: usize,
}

/// Host details, gathered once since they do not change while running
#[derive(Debug, Clone)]
struct SystemSummary {
    os: String,
    kernel: String,
    physical_cores: usize,
    logical_cores: usize,
    memory_gb: f64,
}

impl SystemSummary {
    fn gather() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();

        let unknown = || "Unknown".to_string();
        Self {
            os: format!(
                "{} {}",
                System::name().unwrap_or_else(unknown),
                System::os_version().unwrap_or_else(unknown)
            ),
            kernel: System::kernel_version().unwrap_or_else(unknown),
            physical_cores: System::physical_core_count().unwrap_or(0),
            logical_cores: sys.cpus().len(),
            memory_gb: sys.total_memory() as f64 / 1_073_741_824.0,
        }
    }
}

/// Debug UI state for toggling different panels
#[derive(Debug, Clone)]
pub struct DebugUIState {
    pub show_window: bool,
    pub show_fps: bool,
    pub show_map_state: bool,
    pub show_input: bool,
    pub show_system_info: bool,
    frame_times: Vec<f32>,
    last_frame_time: Instant,
    render_stats: FrameStats,
    system: Option<SystemSummary>,
}

impl Default for DebugUIState {
    fn default() -> Self {
        Self {
            show_window: cfg!(debug_assertions),
            show_fps: true,
            show_map_state: true,
            show_input: false,
            show_system_info: false,
            frame_times: Vec::with_capacity(FRAME_WINDOW),
            last_frame_time: Instant::now(),
            render_stats: FrameStats::default(),
            system: None,
        }
    }
}

impl DebugUIState {
    /// Toggles the debug window visibility (debug builds only)
    #[cfg(debug_assertions)]
    pub fn toggle_window(&mut self) {
        self.show_window = !self.show_window;
    }

    /// Updates frame timing information
    pub fn update_frame_time(&mut self) {
        let now = Instant::now();
        self.record_frame_time((now - self.last_frame_time).as_secs_f32());
        self.last_frame_time = now;
    }

    fn record_frame_time(&mut self, frame_time: f32) {
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FRAME_WINDOW {
            self.frame_times.remove(0);
        }
    }

    /// Gets the current FPS
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg_frame_time: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// Keeps what the renderer submitted, shown on the next frame
    pub fn record_render(&mut self, stats: FrameStats) {
        self.render_stats = stats;
    }

    /// Duration of the most recent frame in milliseconds
    pub fn last_frame_ms(&self) -> f32 {
        self.frame_times.last().map_or(0.0, |t| t * 1000.0)
    }

    /// Renders the debug UI
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        map: &MapDebugInfo,
        surface_config: &wgpu::SurfaceConfiguration,
        input: &InputContext,
    ) {
        if !self.show_window {
            return;
        }

        self.update_frame_time();

        egui::Window::new("Debug Info")
            .default_pos([10.0, 40.0])
            .default_width(300.0)
            .resizable(true)
            .scroll([false, true])
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.checkbox(&mut self.show_fps, "FPS");
                    ui.checkbox(&mut self.show_map_state, "Map");
                    ui.checkbox(&mut self.show_input, "Input");
                    ui.checkbox(&mut self.show_system_info, "System");
                });

                ui.separator();

                if self.show_fps {
                    ui.heading("FPS");
                    ui.label(format!("FPS: {:.1}", self.fps()));
                    ui.label(format!("Frame time: {:.2}ms", self.last_frame_ms()));
                    ui.label(format!(
                        "Surface: {}x{} {:?}",
                        surface_config.width, surface_config.height, surface_config.present_mode
                    ));
                    let stats = self.render_stats;
                    ui.label(format!(
                        "Primitives: {}  textures +{} -{}",
                        stats.primitives, stats.textures_uploaded, stats.textures_freed
                    ));
                    ui.separator();
                }

                if self.show_map_state {
                    ui.heading(format!("Map: {}", map.kind));
                    ui.label(format!("Entities: {}", map.entity_count));
                    ui.label(format!("Zoom: {:.3}x", map.zoom));
                    ui.label(format!("Pan: ({:.1}, {:.1})", map.pan.x, map.pan.y));
                    ui.label(format!(
                        "Hovered: {}",
                        map.hovered.as_deref().unwrap_or("-")
                    ));
                    ui.label(format!(
                        "Selected: {}",
                        map.selected.as_deref().unwrap_or("-")
                    ));
                    ui.label(format!("Dragging: {}", map.dragging));
                    ui.separator();
                }

                if self.show_input {
                    ui.heading("Input");
                    let state = input.state();
                    match state.mouse.screen_pos {
                        Some([x, y]) => ui.label(format!("Cursor: ({:.1}, {:.1})", x, y)),
                        None => ui.label("Cursor: outside window"),
                    };
                    let buttons = state.mouse.buttons.down_labels();
                    ui.label(format!(
                        "Buttons: {}",
                        if buttons.is_empty() { "-" } else { buttons.as_str() }
                    ));
                    let m = state.keyboard.modifiers;
                    ui.label(format!(
                        "Modifiers: shift={} ctrl={} alt={} meta={}",
                        m.shift, m.ctrl, m.alt, m.meta
                    ));
                    for (id, rect, name) in input.debug_viewports() {
                        ui.label(format!(
                            "Viewport {} '{}': {:.0}x{:.0} at ({:.0}, {:.0})",
                            id.0, name, rect.width, rect.height, rect.x, rect.y
                        ));
                    }
                    for (name, priority) in input.debug_handlers() {
                        ui.label(format!("Handler '{}' (priority {})", name, priority));
                    }
                    for event in input.debug_last_events().iter().take(MAX_LISTED_EVENTS) {
                        ui.monospace(event);
                    }
                    ui.separator();
                }

                if self.show_system_info {
                    ui.heading("System Info");
                    let system = self.system.get_or_insert_with(SystemSummary::gather);
                    ui.label(format!("OS: {}", system.os));
                    ui.label(format!("Kernel: {}", system.kernel));
                    ui.label(format!("Physical cores: {}", system.physical_cores));
                    ui.label(format!("Logical cores: {}", system.logical_cores));
                    ui.label(format!("Memory: {:.1} GB", system.memory_gb));
                }
            });
    }
}
