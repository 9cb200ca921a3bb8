//! wgpu surface and egui integration
//!
//! Maps are painted through egui shapes, so a frame is a single egui pass
//! rendered straight to the surface over the map background color.

use std::sync::Arc;

use egui::Context;
use tracing::{debug, info};
use wgpu::{Device, Queue, Surface, SurfaceConfiguration, TextureFormat};
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::render::Rgba;

/// What the last frame submitted, for the debug overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub primitives: usize,
    pub textures_uploaded: usize,
    pub textures_freed: usize,
}

/// Prefers an sRGB format so egui colors come out as authored
pub fn pick_surface_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first())
        .copied()
}

/// Surface settings for a window size; zero-sized windows get a 1x1 surface
pub fn surface_configuration(
    size: PhysicalSize<u32>,
    format: TextureFormat,
    alpha_mode: wgpu::CompositeAlphaMode,
    present_mode: wgpu::PresentMode,
) -> SurfaceConfiguration {
    SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    }
}

/// Clear value for a style color
///
/// Style colors are sRGB-encoded; an sRGB surface expects linear values.
pub fn clear_color(color: Rgba, srgb_surface: bool) -> wgpu::Color {
    let channel = |c: f32| {
        let c = c.clamp(0.0, 1.0) as f64;
        if !srgb_surface {
            c
        } else if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    wgpu::Color {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
        a: color.a.clamp(0.0, 1.0) as f64,
    }
}

/// Surface, device and the egui pipeline drawing into them
pub struct Renderer {
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    background: wgpu::Color,
    egui_ctx: Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub fn config(&self) -> &SurfaceConfiguration {
        &self.config
    }

    pub fn egui_ctx(&self) -> &Context {
        &self.egui_ctx
    }

    /// Creates a renderer for `window`, clearing each frame to `background`
    pub async fn new(
        window: Arc<Window>,
        present_mode: wgpu::PresentMode,
        background: Rgba,
    ) -> anyhow::Result<Self> {
        info!("Initializing wgpu renderer");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        info!(
            adapter.name = adapter.get_info().name,
            adapter.backend = ?adapter.get_info().backend,
            "Found GPU adapter"
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("starmap device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                experimental_features: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_surface_format(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = surface_configuration(window.inner_size(), format, alpha_mode, present_mode);
        surface.configure(&device, &config);

        info!(
            surface.width = config.width,
            surface.height = config.height,
            surface.format = ?config.format,
            surface.present_mode = ?config.present_mode,
            "Surface configured"
        );

        let egui_ctx = Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                ..Default::default()
            },
        );

        Ok(Self {
            surface,
            device,
            queue,
            background: clear_color(background, format.is_srgb()),
            config,
            egui_ctx,
            egui_state,
            egui_renderer,
        })
    }

    /// Feeds a window event to egui; returns whether egui consumed it
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    /// Reconfigures the surface; zero sizes (minimized windows) are skipped
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        info!(width = new_size.width, height = new_size.height, "Surface resized");
    }

    /// Runs one egui pass with `build_ui` and presents it
    pub fn draw(
        &mut self,
        window: &Window,
        mut build_ui: impl FnMut(&Context),
    ) -> Result<FrameStats, wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| build_ui(ctx));
        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let textures = &full_output.textures_delta;
        for (id, delta) in &textures.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("map frame"),
            });
        self.egui_renderer
            .update_buffers(&self.device, &self.queue, &mut encoder, &primitives, &screen);
        self.encode_pass(&mut encoder, &target, &primitives, &screen);

        for id in &textures.free {
            self.egui_renderer.free_texture(id);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        let stats = FrameStats {
            primitives: primitives.len(),
            textures_uploaded: textures.set.len(),
            textures_freed: textures.free.len(),
        };
        if stats.textures_uploaded > 0 {
            debug!(count = stats.textures_uploaded, "Uploaded egui textures");
        }
        Ok(stats)
    }

    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        primitives: &[egui::ClippedPrimitive],
        screen: &egui_wgpu::ScreenDescriptor,
    ) {
        let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("map pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.background),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        // egui_wgpu wants a 'static pass
        self.egui_renderer
            .render(&mut pass.forget_lifetime(), primitives, screen);
    }
}
