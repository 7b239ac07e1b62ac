//! Solar system viewer application.
//!
//! Owns the winit event loop and drives input, simulation and rendering once
//! per frame.

pub mod frame;
pub mod game_loop;
pub mod platform;
pub mod window;

pub use frame::{
    DrawCommand, FrameControl, FramePlan, FrameUniforms, SimulationContext, synthesize_surfaces,
};
pub use game_loop::GameLoop;
pub use platform::{PlatformDirs, PlatformError};
pub use window::{AppError, AppState, SceneError, SceneResources, run};
