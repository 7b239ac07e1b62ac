//! Per-frame orchestration that does not touch the GPU.
//!
//! [`SimulationContext`] owns everything the frame loop mutates. Input is
//! applied first, the simulation is advanced, then [`SimulationContext::plan_frame`]
//! resolves transforms into a [`FramePlan`] that the renderer uploads as is.

use glam::{Mat4, Vec3};
use orrery_bodies::{BodyId, HierarchyError, SolarSystem, TextureHandle, presets};
use orrery_camera::{CameraController, CameraSettings};
use orrery_config::Config;
use orrery_input::FrameInput;
use orrery_texture::{SurfaceGenerator, SurfaceTexture};
use tracing::{debug, info};

/// Extra scale applied to the root body's model so its glow extends past the mesh.
pub const ROOT_GLOW_SCALE: f32 = 1.2;
/// Light color the root body is shaded with.
pub const ROOT_LIGHT_COLOR: Vec3 = Vec3::new(3.0, 2.5, 2.0);
/// Light color for every other body.
pub const BODY_LIGHT_COLOR: Vec3 = Vec3::ONE;

/// Synthesize a surface for every body at `resolution`.
///
/// Bodies with texturing disabled still get one, so flipping
/// `texture_enabled` later only switches between texture and flat color.
pub fn synthesize_surfaces(
    system: &SolarSystem,
    resolution: u32,
) -> Vec<(BodyId, SurfaceTexture)> {
    system
        .iter()
        .map(|(id, body)| (id, SurfaceGenerator::for_body(&body.name).generate(resolution)))
        .collect()
}

/// Whether the event loop should keep running after this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Exit,
}

/// Camera and light state shared by every draw in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub light_position: Vec3,
    pub view_position: Vec3,
}

/// One body draw, ready for upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub body: BodyId,
    pub model: Mat4,
    pub color: Vec3,
    pub light_color: Vec3,
    pub texture: Option<TextureHandle>,
    /// Sample the texture instead of the flat color.
    pub textured: bool,
    /// Glow and rim shading; no diffuse lighting.
    pub emissive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub frame: FrameUniforms,
    /// In body insertion order.
    pub draws: Vec<DrawCommand>,
}

/// Simulation state threaded through update and render.
pub struct SimulationContext {
    pub system: SolarSystem,
    pub camera: CameraController,
    /// Multiplier on every angular rate.
    pub time_scale: f32,
}

impl SimulationContext {
    pub fn new(system: SolarSystem, camera: CameraController, time_scale: f32) -> Self {
        Self {
            system,
            camera,
            time_scale,
        }
    }

    /// The Sol preset with camera and time scale taken from `config`.
    pub fn from_config(config: &Config) -> Result<Self, HierarchyError> {
        let settings = CameraSettings {
            mouse_sensitivity: config.camera.mouse_sensitivity,
            move_speed: config.camera.move_speed,
            boost_factor: config.camera.boost_factor,
        };
        let mut camera = CameraController::new(settings);
        camera.set_aspect_ratio(config.window.width as f32, config.window.height as f32);

        let system = presets::sol()?;
        info!(
            bodies = system.len(),
            time_scale = config.simulation.time_scale,
            "Simulation context ready"
        );
        Ok(Self::new(system, camera, config.simulation.time_scale))
    }

    /// Apply one frame of input to the camera. `dt` is the wall-clock frame time.
    ///
    /// A quit request short-circuits: nothing else in the frame is applied.
    pub fn apply_input(&mut self, input: &FrameInput, dt: f32) -> FrameControl {
        if input.quit {
            info!("Quit requested");
            return FrameControl::Exit;
        }
        if input.reset_view {
            self.camera.reset();
        }
        self.camera.look(input.look.x, input.look.y);
        if input.scroll != 0.0 {
            self.camera.zoom(input.scroll);
            debug!(fov = self.camera.fov(), "Zoom");
        }
        self.camera.translate(input.movement, dt);
        FrameControl::Continue
    }

    /// Advance every body by `dt` simulated seconds.
    pub fn advance(&mut self, dt: f32) {
        self.system.step_scaled(dt, self.time_scale);
    }

    /// Resolve world transforms and build this frame's uniforms and draws.
    pub fn plan_frame(&self) -> FramePlan {
        let transforms = self.system.world_transforms();
        let root = self.system.root();

        let light_position = root
            .and_then(|id| transforms.get(id.index()))
            .map_or(Vec3::ZERO, |m| m.w_axis.truncate());

        let draws = self
            .system
            .iter()
            .zip(transforms)
            .map(|((id, body), world)| {
                let is_root = Some(id) == root;
                let model = if is_root {
                    world * Mat4::from_scale(Vec3::splat(ROOT_GLOW_SCALE))
                } else {
                    world
                };
                DrawCommand {
                    body: id,
                    model,
                    color: body.color,
                    light_color: if is_root {
                        ROOT_LIGHT_COLOR
                    } else {
                        BODY_LIGHT_COLOR
                    },
                    texture: body.texture,
                    textured: body.texture_enabled && body.texture.is_some(),
                    emissive: is_root,
                }
            })
            .collect();

        FramePlan {
            frame: FrameUniforms {
                view: self.camera.view_matrix(),
                projection: self.camera.projection_matrix(),
                light_position,
                view_position: self.camera.position(),
            },
            draws,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use orrery_bodies::BodyDesc;
    use orrery_camera::{FOV_MAX, MoveIntent};

    fn context() -> SimulationContext {
        SimulationContext::from_config(&Config::default()).unwrap()
    }

    fn star_context() -> SimulationContext {
        let mut system = SolarSystem::new();
        let star = system
            .add_root(BodyDesc::new("Star", 1.0).spin(10.0))
            .unwrap();
        system
            .add_child(star, BodyDesc::new("Orbiter", 0.5).orbit(8.0, 80.0, 0.0))
            .unwrap();
        SimulationContext::new(system, CameraController::default(), 0.5)
    }

    #[test]
    fn test_root_draw_is_emissive_and_scaled() {
        let ctx = context();
        let plan = ctx.plan_frame();
        let root = ctx.system.root().unwrap();
        let world = ctx.system.world_transform(root).unwrap();

        let sun = &plan.draws[0];
        assert_eq!(sun.body, root);
        assert!(sun.emissive);
        assert_eq!(sun.light_color, ROOT_LIGHT_COLOR);
        let expected = world * Mat4::from_scale(Vec3::splat(ROOT_GLOW_SCALE));
        assert!(sun.model.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_planets_use_plain_lighting() {
        let ctx = context();
        let plan = ctx.plan_frame();
        assert_eq!(plan.draws.len(), ctx.system.len());
        for draw in &plan.draws[1..] {
            assert!(!draw.emissive);
            assert_eq!(draw.light_color, BODY_LIGHT_COLOR);
            let world = ctx.system.world_transform(draw.body).unwrap();
            assert!(draw.model.abs_diff_eq(world, 1e-5));
        }
    }

    #[test]
    fn test_draws_follow_insertion_order() {
        let ctx = context();
        let ids: Vec<_> = ctx.system.iter().map(|(id, _)| id).collect();
        let drawn: Vec<_> = ctx.plan_frame().draws.iter().map(|d| d.body).collect();
        assert_eq!(ids, drawn);
    }

    #[test]
    fn test_light_follows_root_position() {
        let mut ctx = star_context();
        ctx.advance(3.0);
        let plan = ctx.plan_frame();
        let root = ctx.system.root().unwrap();
        let expected = ctx.system.world_position(root).unwrap();
        assert!(plan.frame.light_position.abs_diff_eq(expected, 1e-5));

        let orbiter = plan.draws[1].model.w_axis.truncate();
        assert!(orbiter.distance(plan.frame.light_position) > 7.9);
    }

    #[test]
    fn test_light_at_origin_without_root() {
        let ctx = SimulationContext::new(SolarSystem::new(), CameraController::default(), 1.0);
        let plan = ctx.plan_frame();
        assert!(plan.draws.is_empty());
        assert_eq!(plan.frame.light_position, Vec3::ZERO);
    }

    #[test]
    fn test_textured_needs_handle_and_flag() {
        let mut ctx = context();
        assert!(ctx.plan_frame().draws.iter().all(|d| !d.textured));

        let earth = ctx.system.find("Earth").unwrap();
        let mars = ctx.system.find("Mars").unwrap();
        ctx.system.set_texture(earth, TextureHandle(0));
        ctx.system.set_texture(mars, TextureHandle(1));
        ctx.system.get_mut(mars).unwrap().texture_enabled = false;

        let plan = ctx.plan_frame();
        let earth_draw = plan.draws.iter().find(|d| d.body == earth).unwrap();
        let mars_draw = plan.draws.iter().find(|d| d.body == mars).unwrap();
        assert!(earth_draw.textured);
        assert_eq!(earth_draw.texture, Some(TextureHandle(0)));
        assert!(!mars_draw.textured);
    }

    #[test]
    fn test_surfaces_cover_disabled_bodies() {
        let mut ctx = context();
        let mars = ctx.system.find("Mars").unwrap();
        ctx.system.get_mut(mars).unwrap().texture_enabled = false;

        let surfaces = synthesize_surfaces(&ctx.system, 8);
        assert_eq!(surfaces.len(), ctx.system.len());
        for (slot, (id, surface)) in surfaces.iter().enumerate() {
            assert_eq!(surface.size, 8);
            ctx.system.set_texture(*id, TextureHandle(slot as u32));
        }
        assert!(!ctx.plan_frame().draws.iter().any(|d| d.body == mars && d.textured));

        ctx.system.get_mut(mars).unwrap().texture_enabled = true;
        let plan = ctx.plan_frame();
        let mars_draw = plan.draws.iter().find(|d| d.body == mars).unwrap();
        assert!(mars_draw.textured);
        assert!(mars_draw.texture.is_some());
    }

    #[test]
    fn test_frame_uniforms_track_camera() {
        let mut ctx = context();
        ctx.camera.set_position(Vec3::new(1.0, 2.0, 3.0));
        let plan = ctx.plan_frame();
        assert_eq!(plan.frame.view_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(plan.frame.view, ctx.camera.view_matrix());
        assert_eq!(plan.frame.projection, ctx.camera.projection_matrix());
    }

    #[test]
    fn test_quit_short_circuits() {
        let mut ctx = context();
        let before = ctx.camera.position();
        let input = FrameInput {
            quit: true,
            movement: MoveIntent {
                forward: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ctx.apply_input(&input, 1.0), FrameControl::Exit);
        assert_eq!(ctx.camera.position(), before);
    }

    #[test]
    fn test_reset_then_move_in_same_frame() {
        let mut ctx = context();
        ctx.camera.zoom(30.0);
        let input = FrameInput {
            reset_view: true,
            ..Default::default()
        };
        assert_eq!(ctx.apply_input(&input, 0.016), FrameControl::Continue);
        assert_eq!(ctx.camera.fov(), FOV_MAX);
        assert_eq!(ctx.camera.position(), Vec3::new(0.0, 15.0, 30.0));
    }

    #[test]
    fn test_look_and_zoom_reach_camera() {
        let mut ctx = context();
        let input = FrameInput {
            look: Vec2::new(100.0, 50.0),
            scroll: 5.0,
            ..Default::default()
        };
        ctx.apply_input(&input, 0.016);
        assert!((ctx.camera.yaw() - 280.0).abs() < 1e-4);
        assert!((ctx.camera.pitch() - 5.0).abs() < 1e-4);
        assert_eq!(ctx.camera.fov(), FOV_MAX - 5.0);
    }

    #[test]
    fn test_movement_scales_with_frame_time() {
        let mut ctx = context();
        let start = ctx.camera.position();
        let input = FrameInput {
            movement: MoveIntent {
                forward: true,
                ..Default::default()
            },
            ..Default::default()
        };
        ctx.apply_input(&input, 0.5);
        let travelled = ctx.camera.position().distance(start);
        assert!((travelled - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_advance_uses_context_time_scale() {
        let mut ctx = star_context();
        ctx.time_scale = 1.0;
        let orbiter = ctx.system.find("Orbiter").unwrap();
        ctx.advance(20.0);
        let angle = ctx.system.get(orbiter).unwrap().orbital_angle;
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_from_config_applies_settings() {
        let mut config = Config::default();
        config.camera.move_speed = 42.0;
        config.simulation.time_scale = 2.0;
        let ctx = SimulationContext::from_config(&config).unwrap();
        assert_eq!(ctx.camera.settings.move_speed, 42.0);
        assert_eq!(ctx.time_scale, 2.0);
        assert!((ctx.camera.aspect_ratio() - 1.5).abs() < 1e-6);
    }
}
