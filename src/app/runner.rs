//! Main application handler for the map viewer

use std::sync::Arc;
use std::time::Instant;

use glam::DVec2;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use super::canvas::{EguiCanvas, color32};
use super::config::{AppConfig, MapKind};
use super::debug_ui::{DebugUIState, MapDebugInfo};
use super::details::DetailsPanel;
use super::error::AppError;
use super::input::{InputCollector, InputContext, Rect, ViewportId};
use super::map_widget::MapWidget;
use super::renderer::Renderer;
use super::window::{present_mode, window_attributes_from_config};
use crate::render::{Canvas, StyleRegistry, galaxy_commands, keys, province_commands};
use crate::scene::{Galaxy, Provinces};
use crate::viewport::{EntityLayer, ProvinceId, StarId};

const GALAXY_WIDGET: &str = "galaxy";
const PROVINCE_WIDGET: &str = "provinces";
const GALAXY_VIEWPORT: ViewportId = ViewportId(0);
const PROVINCE_VIEWPORT: ViewportId = ViewportId(1);

const SIDE_PANEL_WIDTH: f32 = 240.0;

/// True when the egui pointer is over a floating window such as the debug overlay
fn pointer_over_overlay(ctx: &egui::Context) -> bool {
    ctx.pointer_latest_pos()
        .is_some_and(|pos| overlay_at(ctx, pos))
}

/// Panels live on the background layer; anything above it floats over the map
fn overlay_at(ctx: &egui::Context, pos: egui::Pos2) -> bool {
    ctx.layer_id_at(pos)
        .is_some_and(|layer| layer.order != egui::Order::Background)
}

/// Main map viewer application
pub struct App {
    config: AppConfig,
    styles: StyleRegistry,
    galaxy: Arc<Galaxy>,
    provinces: Arc<Provinces>,
    active: MapKind,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    debug_ui: DebugUIState,
    details: DetailsPanel,
    started: Instant,
    // Input system
    input_collector: InputCollector,
    input_context: InputContext,
    /// Set when startup failed and the loop was asked to exit
    fatal: Option<AppError>,
}

impl App {
    /// Creates the application, generating both maps from the scene config
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting starmap");
        info!(?config.window, "Window configuration");

        let scene = &config.scene;
        let galaxy = Arc::new(Galaxy::generate(scene.seed, scene.star_count));
        let provinces = Arc::new(Provinces::generate(
            scene.seed,
            scene.province_cols,
            scene.province_rows,
        ));
        info!(
            seed = scene.seed,
            stars = galaxy.len(),
            provinces = provinces.len(),
            "Scene generated"
        );

        let mut input_context = InputContext::new();
        input_context.register_handler(Box::new(MapWidget::new(
            GALAXY_WIDGET,
            GALAXY_VIEWPORT,
            galaxy.clone(),
            config.viewport,
        )));
        input_context.register_handler(Box::new(MapWidget::new(
            PROVINCE_WIDGET,
            PROVINCE_VIEWPORT,
            provinces.clone(),
            config.viewport,
        )));

        Self {
            active: config.scene.initial_map,
            config,
            styles: StyleRegistry::standard(),
            galaxy,
            provinces,
            window: None,
            renderer: None,
            debug_ui: DebugUIState::default(),
            details: DetailsPanel::new(),
            started: Instant::now(),
            input_collector: InputCollector::new(),
            input_context,
            fatal: None,
        }
    }

    /// The map currently shown
    pub fn active_map(&self) -> MapKind {
        self.active
    }

    /// Takes the error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<AppError> {
        self.fatal.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!(error = %err, "Startup failed, exiting");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn switch_map(&mut self) {
        self.active = self.active.toggled();
        info!(map = %self.active, "Switched map");
        if let Some(window) = &self.window {
            window.set_title(&format!("{} - {}", self.config.window.title, self.active));
        }
    }

    /// Moves selection signals from both widgets into the details log
    fn drain_signals(&mut self) {
        let signals = self
            .input_context
            .handler_mut::<MapWidget<Galaxy>>(GALAXY_WIDGET)
            .map(|w| w.take_signals())
            .unwrap_or_default();
        for signal in signals {
            self.details.record_star_signal(signal, &self.galaxy);
        }

        let signals = self
            .input_context
            .handler_mut::<MapWidget<Provinces>>(PROVINCE_WIDGET)
            .map(|w| w.take_signals())
            .unwrap_or_default();
        for signal in signals {
            self.details.record_province_signal(signal, &self.provinces);
        }
    }

    fn map_debug_info(&self) -> MapDebugInfo {
        match self.active {
            MapKind::Galaxy => self
                .input_context
                .handler::<MapWidget<Galaxy>>(GALAXY_WIDGET)
                .map(|w| {
                    let view = w.state();
                    let name = |id| self.galaxy.star(id).map(|s| s.name.clone());
                    MapDebugInfo {
                        kind: MapKind::Galaxy,
                        zoom: view.zoom(),
                        pan: view.pan(),
                        hovered: view.hovered().and_then(name),
                        selected: view.selected().and_then(name),
                        dragging: view.is_dragging(),
                        entity_count: self.galaxy.len(),
                    }
                }),
            MapKind::Provinces => self
                .input_context
                .handler::<MapWidget<Provinces>>(PROVINCE_WIDGET)
                .map(|w| {
                    let view = w.state();
                    let name = |id| self.provinces.province(id).map(|p| p.name.clone());
                    MapDebugInfo {
                        kind: MapKind::Provinces,
                        zoom: view.zoom(),
                        pan: view.pan(),
                        hovered: view.hovered().and_then(name),
                        selected: view.selected().and_then(name),
                        dragging: view.is_dragging(),
                        entity_count: self.provinces.len(),
                    }
                }),
        }
        .unwrap_or_default()
    }
}

/// An entity picked from the side panel list
#[derive(Debug, Clone, Copy)]
enum Pick {
    Star(StarId),
    Province(ProvinceId),
}

/// Everything a frame's UI closure needs, borrowed apart from the renderer
struct Frame<'a> {
    active: MapKind,
    time: f64,
    styles: &'a StyleRegistry,
    galaxy: &'a Galaxy,
    provinces: &'a Provinces,
    details: &'a DetailsPanel,
    input: &'a mut InputContext,
    picked: Option<Pick>,
}

impl Frame<'_> {
    fn side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.active.title());
        ui.label(egui::RichText::new("Tab switch map · Esc deselect · R reset · C center").weak());
        ui.separator();

        self.picked = match self.active {
            MapKind::Galaxy => self
                .input
                .handler::<MapWidget<Galaxy>>(GALAXY_WIDGET)
                .and_then(|w| self.details.show_galaxy(ui, self.galaxy, &w.state()))
                .map(Pick::Star),
            MapKind::Provinces => self
                .input
                .handler::<MapWidget<Provinces>>(PROVINCE_WIDGET)
                .and_then(|w| {
                    self.details
                        .show_provinces(ui, self.provinces, &w.state(), self.styles)
                })
                .map(Pick::Province),
        };

        ui.separator();
        self.details.show_log(ui);
    }

    /// Selects and centers a list pick; runs after the map registered its rect
    fn apply_pick(&mut self) {
        match self.picked.take() {
            Some(Pick::Star(id)) => {
                let rect = self.input.viewport_rect(GALAXY_VIEWPORT);
                if let Some(widget) = self.input.handler_mut::<MapWidget<Galaxy>>(GALAXY_WIDGET) {
                    widget.select(id);
                    if let Some(rect) = rect {
                        widget.center_on(id, &rect.to_screen_rect());
                    }
                }
            }
            Some(Pick::Province(id)) => {
                let rect = self.input.viewport_rect(PROVINCE_VIEWPORT);
                if let Some(widget) =
                    self.input.handler_mut::<MapWidget<Provinces>>(PROVINCE_WIDGET)
                {
                    widget.select(id);
                    if let Some(rect) = rect {
                        widget.center_on(id, &rect.to_screen_rect());
                    }
                }
            }
            None => {}
        }
    }

    fn map_panel(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;
        let size = DVec2::new(rect.width() as f64, rect.height() as f64);

        let (id, name) = match self.active {
            MapKind::Galaxy => (GALAXY_VIEWPORT, GALAXY_WIDGET),
            MapKind::Provinces => (PROVINCE_VIEWPORT, PROVINCE_WIDGET),
        };
        self.input.register_viewport(
            id,
            Rect::new(rect.left(), rect.top(), rect.width(), rect.height()),
            name,
        );

        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }

        let commands = match self.active {
            MapKind::Galaxy => self
                .input
                .handler::<MapWidget<Galaxy>>(GALAXY_WIDGET)
                .map(|w| {
                    let view = w.state();
                    galaxy_commands(
                        &view,
                        self.galaxy,
                        &view.params(size),
                        self.time,
                        self.styles,
                        w.settings(),
                    )
                }),
            MapKind::Provinces => self
                .input
                .handler::<MapWidget<Provinces>>(PROVINCE_WIDGET)
                .map(|w| {
                    let view = w.state();
                    province_commands(&view, self.provinces, &view.params(size), self.styles)
                }),
        };

        if let Some(commands) = commands {
            EguiCanvas::new(&painter, rect.min).draw_all(&commands);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = window_attributes_from_config(&self.config.window);
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, AppError::Window(e)),
        };

        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            "Window created successfully"
        );
        window.set_title(&format!("{} - {}", self.config.window.title, self.active));

        // winit's event loop is synchronous, so renderer setup blocks on a runtime
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => return self.fail(event_loop, AppError::Runtime(e)),
        };
        let present_mode = present_mode(&self.config.window);
        match runtime.block_on(Renderer::new(
            window.clone(),
            present_mode,
            self.styles.color(keys::BACKGROUND),
        )) {
            Ok(renderer) => {
                info!("Renderer initialized successfully");
                self.input_collector
                    .set_scale_factor(window.scale_factor() as f32);
                self.renderer = Some(renderer);
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, AppError::Renderer(e)),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            return;
        }

        // Clone state BEFORE advancing so handlers see this frame's edges
        self.input_context
            .update_state(self.input_collector.clone_state());
        self.input_context
            .process(self.input_collector.drain_events());
        self.input_collector.advance_frame();

        self.drain_signals();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::ScaleFactorChanged { scale_factor, .. } = &event {
            self.input_collector.set_scale_factor(*scale_factor as f32);
        }

        // Feed events to input collector FIRST (before egui)
        let captured = self
            .renderer
            .as_ref()
            .is_some_and(|r| pointer_over_overlay(r.egui_ctx()));
        self.input_collector.set_pointer_captured(captured);
        self.input_collector.handle_window_event(&event);

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            let _ = renderer.handle_event(window, &event);
        }

        if let WindowEvent::KeyboardInput {
            event: key_event, ..
        } = &event
            && key_event.state.is_pressed()
            && !key_event.repeat
            && let PhysicalKey::Code(code) = key_event.physical_key
        {
            match code {
                WinitKeyCode::Tab => self.switch_map(),
                #[cfg(debug_assertions)]
                WinitKeyCode::Backquote => {
                    self.debug_ui.toggle_window();
                    return;
                }
                _ => {}
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

impl App {
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let map_info = self.map_debug_info();
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let surface_config = renderer.config().clone();
        let debug_ui = &mut self.debug_ui;
        let background = color32(self.styles.color(keys::BACKGROUND));
        let mut frame = Frame {
            active: self.active,
            time: self.started.elapsed().as_secs_f64(),
            styles: &self.styles,
            galaxy: &self.galaxy,
            provinces: &self.provinces,
            details: &self.details,
            input: &mut self.input_context,
            picked: None,
        };

        let result = renderer.draw(window, |ctx| {
            // Widgets that are not laid out this frame must not keep a rect
            frame.input.clear_viewports();

            egui::SidePanel::left("details_panel")
                .resizable(true)
                .default_width(SIDE_PANEL_WIDTH)
                .show(ctx, |ui| frame.side_panel(ui));

            egui::CentralPanel::default()
                .frame(egui::Frame::NONE.fill(background))
                .show(ctx, |ui| frame.map_panel(ui));
            frame.apply_pick();

            debug_ui.render(ctx, &map_info, &surface_config, frame.input);
        });

        match result {
            Ok(stats) => debug_ui.record_render(stats),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                renderer.resize(window.inner_size());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => {
                error!(error = %e, "Render error");
            }
        }
    }
}
