//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]. GPU resources are
//! created on the first `resumed` and released in `exiting`, scene resources
//! before the render context that owns the device.

use std::sync::Arc;

use orrery_bodies::{HierarchyError, SolarSystem};
use orrery_config::Config;
use orrery_input::{Bindings, FrameInput, KeyboardState, MouseState};
use orrery_render::{
    BodyBinding, BodyPipeline, BodyUniform, DepthBuffer, FrameBinding, FrameEncoder,
    FrameUniform, MeshBuffer, RenderContext, RenderContextError, RenderPassBuilder,
    SurfaceError, TextureError, TextureManager, generate_uv_sphere, init_render_context_blocking,
};
use orrery_texture::DEFAULT_RESOLUTION;
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::frame::{FrameControl, FramePlan, SimulationContext, synthesize_surfaces};
use crate::game_loop::GameLoop;

/// Failures while building the GPU scene. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Gpu(#[from] RenderContextError),

    #[error("failed to upload texture: {0}")]
    Texture(#[from] TextureError),
}

/// Failures that stop the application before or while the event loop runs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid body hierarchy: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width.max(1) as f64,
            config.window.height.max(1) as f64,
        ))
}

/// Background color from the config.
pub fn clear_color_from_config(config: &Config) -> wgpu::Color {
    let [r, g, b] = config.render.clear_color;
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

/// Texture edge length to synthesize: the configured value, or the default when
/// it is zero, capped at the device limit.
pub fn effective_texture_resolution(requested: u32, max_dimension: u32) -> u32 {
    let resolution = if requested == 0 {
        warn!("texture_resolution is 0, using {DEFAULT_RESOLUTION}");
        DEFAULT_RESOLUTION
    } else {
        requested
    };
    if resolution > max_dimension {
        warn!("texture_resolution {resolution} exceeds device limit {max_dimension}");
        return max_dimension;
    }
    resolution
}

/// GPU-side objects for drawing the system. Dropped before the [`RenderContext`].
pub struct SceneResources {
    mesh: MeshBuffer,
    textures: TextureManager,
    pipeline: BodyPipeline,
    frame_binding: FrameBinding,
    /// Indexed by [`orrery_bodies::BodyId::index`].
    body_bindings: Vec<BodyBinding>,
    depth: DepthBuffer,
    clear_color: wgpu::Color,
}

impl SceneResources {
    /// Build the mesh, pipeline and per-body uniforms, then synthesize and
    /// upload one texture per body.
    pub fn new(
        gpu: &RenderContext,
        config: &Config,
        system: &mut SolarSystem,
    ) -> Result<Self, SceneError> {
        let device = &gpu.device;

        let sphere = generate_uv_sphere(config.render.sphere_sectors, config.render.sphere_stacks);
        let mesh = MeshBuffer::new(device, "body-sphere", &sphere.vertices, &sphere.indices);
        info!(
            vertices = sphere.vertices.len(),
            triangles = sphere.indices.len() / 3,
            "Sphere mesh created"
        );

        let mut textures = TextureManager::new(device, &gpu.queue);
        let pipeline = BodyPipeline::new(device, gpu.surface_format, textures.bind_group_layout());
        let frame_binding = pipeline.create_frame_binding(device);

        let resolution = effective_texture_resolution(
            config.render.texture_resolution,
            device.limits().max_texture_dimension_2d,
        );
        for (id, surface) in synthesize_surfaces(system, resolution) {
            let label = system
                .get(id)
                .map_or_else(|| "body-surface".to_owned(), |b| format!("{}-surface", b.name));
            let handle = textures.upload_surface(device, &gpu.queue, &label, &surface)?;
            system.set_texture(id, handle);
        }
        info!(
            count = textures.len(),
            resolution, "Body textures synthesized and uploaded"
        );

        let body_bindings = system
            .iter()
            .map(|(_, body)| pipeline.create_body_binding(device, &body.name))
            .collect();

        let (width, height) = gpu.size();
        let depth = DepthBuffer::new(device, width, height);

        Ok(Self {
            mesh,
            textures,
            pipeline,
            frame_binding,
            body_bindings,
            depth,
            clear_color: clear_color_from_config(config),
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.resize(device, width, height);
    }

    /// Upload the plan's uniforms and record one pass drawing every body.
    pub fn render(&self, gpu: &RenderContext, plan: &FramePlan) -> Result<(), SurfaceError> {
        let frame = &plan.frame;
        self.frame_binding.write(
            &gpu.queue,
            &FrameUniform::new(
                frame.view,
                frame.projection,
                frame.light_position,
                frame.view_position,
            ),
        );
        for draw in &plan.draws {
            if let Some(binding) = self.body_bindings.get(draw.body.index()) {
                binding.write(
                    &gpu.queue,
                    &BodyUniform::new(
                        draw.model,
                        draw.color,
                        draw.light_color,
                        draw.textured,
                        draw.emissive,
                    ),
                );
            }
        }

        let surface_texture = gpu.get_current_texture()?;
        let mut encoder = FrameEncoder::new(&gpu.device, surface_texture);
        {
            let builder = RenderPassBuilder::new()
                .clear_color(self.clear_color)
                .depth(&self.depth.view, DepthBuffer::CLEAR_VALUE)
                .label("body-pass");
            let mut pass = encoder.begin_render_pass(&builder);
            self.pipeline
                .begin(&mut pass, &self.frame_binding, &self.mesh);
            for draw in &plan.draws {
                let Some(binding) = self.body_bindings.get(draw.body.index()) else {
                    continue;
                };
                let texture = self
                    .textures
                    .bind_group(draw.texture.filter(|_| draw.textured));
                self.pipeline.draw(&mut pass, binding, texture, &self.mesh);
            }
        }
        encoder.submit(&gpu.queue);
        Ok(())
    }
}

/// Application state driven by the winit event loop.
pub struct AppState {
    pub config: Config,
    pub context: SimulationContext,
    pub window: Option<Arc<Window>>,
    pub gpu: Option<RenderContext>,
    pub scene: Option<SceneResources>,
    pub game_loop: GameLoop,
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub bindings: Bindings,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, HierarchyError> {
        let context = SimulationContext::from_config(&config)?;
        Ok(Self {
            config,
            context,
            window: None,
            gpu: None,
            scene: None,
            game_loop: GameLoop::new(),
            keyboard: KeyboardState::new(),
            mouse: MouseState::default(),
            bindings: Bindings::default(),
        })
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SceneError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);
        let size = window.inner_size();
        info!("Window created: {}x{}", size.width, size.height);

        let gpu = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let scene = SceneResources::new(&gpu, &self.config, &mut self.context.system)?;

        let (width, height) = gpu.size();
        self.context
            .camera
            .set_aspect_ratio(width as f32, height as f32);

        window.request_redraw();
        self.scene = Some(scene);
        self.gpu = Some(gpu);
        self.window = Some(window);
        self.game_loop.reset_clock();
        Ok(())
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!("Ignoring zero-sized resize");
            return;
        }
        self.context
            .camera
            .set_aspect_ratio(width as f32, height as f32);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
            if let Some(scene) = &mut self.scene {
                scene.resize(&gpu.device, width, height);
            }
        }
        info!("Window resized to {}x{}", width, height);
    }

    /// One frame: input, simulation, transforms, draws.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let input = FrameInput::gather(&self.keyboard, &self.mouse, &self.bindings);
        self.keyboard.clear_transients();
        self.mouse.clear_transients();

        let frame_time = self.game_loop.measure();
        if self.context.apply_input(&input, frame_time as f32) == FrameControl::Exit {
            event_loop.exit();
            return;
        }

        let context = &mut self.context;
        self.game_loop
            .advance(frame_time, |dt, _sim_time| context.advance(dt as f32));

        let plan = self.context.plan_frame();
        if let (Some(gpu), Some(scene)) = (&self.gpu, &self.scene) {
            match scene.render(gpu, &plan) {
                Ok(()) => {}
                Err(SurfaceError::Timeout) => debug!("Surface timeout, skipping frame"),
                Err(SurfaceError::Lost) => warn!("Surface lost, skipping frame"),
                Err(SurfaceError::OutOfMemory) => {
                    error!("GPU out of memory, shutting down");
                    event_loop.exit();
                    return;
                }
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            error!("Initialization failed: {e}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size.width, new_size.height);
            }
            WindowEvent::Focused(false) => {
                self.keyboard.release_all();
                self.mouse.cancel_drag();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.scene = None;
        self.gpu = None;
        info!(
            frames = self.game_loop.frame_count(),
            sim_seconds = self.game_loop.total_sim_time(),
            "GPU resources released"
        );
    }
}

/// Create the event loop and run until the window closes.
#[instrument(skip_all)]
pub fn run(config: Config) -> Result<(), AppError> {
    let mut app = AppState::new(config)?;
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
