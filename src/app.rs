// ============================================================================
// app.rs — Aviary
// Application state and winit event-loop handler. RedrawRequested is the
// animation-frame callback: one engine step, one repaint, one reschedule.
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    keyboard::{Key, NamedKey},
    window::{Window, WindowAttributes},
};

use crate::config::ViewerConfig;
use crate::drift::DriftEngine;
use crate::engine::Engine;
use crate::frame::FrameController;
use crate::pipeline::{create_scene_pipeline, ScenePipeline};
use crate::renderer::StatsRenderer;
use crate::viewport::{Viewport, ViewportManager};

/// Logical gap between the canvas and the statistics text.
const PANEL_GUTTER: f64 = 16.0;

/// Frames between debug-level timing reports.
const DIAG_INTERVAL: u64 = 300;

// ======================== Application ========================

pub struct App {
    state: Option<AppState>,
    config: ViewerConfig,
}

struct AppState {
    // GPU
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,

    // Window
    window: Arc<Window>,

    // Rendering
    viewport_manager: ViewportManager,
    viewport: Viewport,
    controller: FrameController<DriftEngine>,
    scene: ScenePipeline,
    stats: StatsRenderer,

    // Timing
    last_redraw: Instant,
    fps: f32,
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: None,
            config,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let canvas_side = self.config.logical_size.unwrap_or(700);
        let window_attrs = WindowAttributes::default()
            .with_title("Aviary")
            .with_inner_size(LogicalSize::new(
                canvas_side + self.config.panel_width,
                canvas_side,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).unwrap();

        let (device, queue, surface_config) =
            pollster::block_on(init_gpu(&instance, &surface, &window, self.config.vsync));

        surface.configure(&device, &surface_config);

        let scene = create_scene_pipeline(&device, surface_config.format);
        let stats = StatsRenderer::new(&device, &queue, surface_config.format);

        let viewport_manager =
            ViewportManager::new(self.config.logical_size, self.config.panel_width);
        let scale = window.scale_factor();
        let logical: LogicalSize<f64> = window.inner_size().to_logical(scale);
        let viewport =
            match viewport_manager.reset(logical.width as u32, logical.height as u32, scale) {
                Ok(viewport) => viewport,
                Err(err) => {
                    log::error!("{}", err);
                    event_loop.exit();
                    return;
                }
            };

        let engine = DriftEngine::new(self.config.animals, self.config.food, self.config.seed);
        let mut controller = FrameController::new(engine, viewport);
        controller.start();

        log::info!(
            "Aviary initialized: {}px canvas at ratio {:.2}, {} animals / {} food",
            viewport.logical_px,
            viewport.pixel_ratio,
            self.config.animals,
            self.config.food,
        );

        self.state = Some(AppState {
            device,
            queue,
            surface,
            surface_config,
            window: window.clone(),
            viewport_manager,
            viewport,
            controller,
            scene,
            stats,
            last_redraw: Instant::now(),
            fps: 0.0,
        });

        // Initial redraw — required on macOS with winit 0.30
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput { event, .. } => {
                if !event.state.is_pressed() {
                    return;
                }
                match &event.logical_key {
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    Key::Named(NamedKey::Space) => {
                        if state.controller.is_running() {
                            state.controller.stop();
                            log::info!("Render loop stopped");
                        } else {
                            state.controller.start();
                            log::info!("Render loop started");
                            state.window.request_redraw();
                        }
                    }
                    _ => {}
                }
            }

            WindowEvent::Resized(new_size) => {
                if new_size.width > 0 && new_size.height > 0 {
                    state.surface_config.width = new_size.width;
                    state.surface_config.height = new_size.height;
                    state.surface.configure(&state.device, &state.surface_config);
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                redraw(state);
            }

            _ => {}
        }
    }
}

// ======================== GPU Initialization ========================

async fn init_gpu(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
    window: &Window,
    vsync: bool,
) -> (wgpu::Device, wgpu::Queue, wgpu::SurfaceConfiguration) {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .expect(
            "Failed to find a suitable GPU adapter.\n\
             Aviary requires a GPU with Vulkan, Metal, or DX12 support.",
        );

    log::info!("GPU: {}", adapter.get_info().name);

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("aviary_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        )
        .await
        .expect("Failed to create device");

    let size = window.inner_size();
    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .copied()
        .unwrap_or(surface_caps.formats[0]);

    // The loop runs one simulation step per displayed frame, so vsync keeps
    // simulation speed tied to the display refresh the way the host
    // animation-frame callback does.
    let present_mode = if vsync {
        wgpu::PresentMode::AutoVsync
    } else if surface_caps.present_modes.contains(&wgpu::PresentMode::Mailbox) {
        log::info!("Present mode: Mailbox (uncapped FPS)");
        wgpu::PresentMode::Mailbox
    } else if surface_caps.present_modes.contains(&wgpu::PresentMode::Immediate) {
        log::info!("Present mode: Immediate (uncapped FPS)");
        wgpu::PresentMode::Immediate
    } else {
        log::info!("Present mode: Fifo (VSync ON)");
        wgpu::PresentMode::Fifo
    };

    let surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode,
        alpha_mode: surface_caps.alpha_modes[0],
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };

    (device, queue, surface_config)
}

// ======================== Frame Rendering ========================

fn redraw(state: &mut AppState) {
    // FPS (exponential moving average)
    let now = Instant::now();
    let dt = now.duration_since(state.last_redraw).as_secs_f32().max(0.0001);
    state.last_redraw = now;
    state.fps = state.fps * 0.95 + (1.0 / dt) * 0.05;

    if state.controller.is_running() {
        // Reset the viewport from the current window geometry, then run one
        // frame cycle and upload its output.
        let scale = state.window.scale_factor();
        let logical: LogicalSize<f64> = state.window.inner_size().to_logical(scale);
        match state
            .viewport_manager
            .reset(logical.width as u32, logical.height as u32, scale)
        {
            Ok(viewport) => state.viewport = viewport,
            Err(err) => {
                log::error!("Viewport reset failed: {}", err);
                state.controller.stop();
            }
        }

        if let Err(err) = state.controller.run_frame(state.viewport) {
            // Fatal to the loop: the running flag is already down, so the
            // reschedule below never happens.
            log::error!("Engine fault, stopping render loop: {}", err);
        }

        state.scene.upload(
            &state.device,
            &state.queue,
            &state.viewport,
            state.controller.painter().vertices(),
        );

        let panel_left = ((state.viewport.logical_px as f64 + PANEL_GUTTER)
            * state.viewport.pixel_ratio) as f32;
        let panel_top = (PANEL_GUTTER * state.viewport.pixel_ratio) as f32;
        state.stats.prepare(
            &state.device,
            &state.queue,
            state.controller.stats_text(),
            panel_left,
            panel_top,
            state.surface_config.width,
            state.surface_config.height,
        );
    }

    let output = match state.surface.get_current_texture() {
        Ok(t) => t,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            state.surface.configure(&state.device, &state.surface_config);
            return;
        }
        Err(e) => {
            log::error!("Surface error: {:?}", e);
            return;
        }
    };

    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = state
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("frame_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.02,
                        g: 0.02,
                        b: 0.05,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        // Shapes are confined to the square canvas region; rounding can
        // overshoot the surface by a pixel, so clamp.
        let canvas_w = state.viewport.width_px.min(state.surface_config.width) as f32;
        let canvas_h = state.viewport.height_px.min(state.surface_config.height) as f32;
        pass.set_viewport(0.0, 0.0, canvas_w, canvas_h, 0.0, 1.0);
        state.scene.render(&mut pass);

        pass.set_viewport(
            0.0,
            0.0,
            state.surface_config.width as f32,
            state.surface_config.height as f32,
            0.0,
            1.0,
        );
        state.stats.render(&mut pass);
    }

    state.queue.submit(std::iter::once(encoder.finish()));
    output.present();
    state.stats.trim();

    if state.controller.frame() > 0 && state.controller.frame() % DIAG_INTERVAL == 0 {
        log::debug!(
            "frame {} | generation {} | fps {:.0}",
            state.controller.frame(),
            state.controller.engine().generation(),
            state.fps,
        );
    }

    // Cooperative scheduling point: the next cycle runs only after the host
    // signals readiness to repaint, and only while the controller runs.
    if state.controller.is_running() {
        state.window.request_redraw();
    }
}
