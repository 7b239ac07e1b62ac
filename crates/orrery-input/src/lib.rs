//! Keyboard and mouse state gathered from winit events into per-frame snapshots.

pub mod bindings;
pub mod frame;
pub mod keyboard;
pub mod mouse;

pub use bindings::{Bindings, ControlAction};
pub use frame::FrameInput;
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
