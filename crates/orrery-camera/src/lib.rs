//! Free-fly viewer camera driven by yaw/pitch angles.

mod controller;

pub use controller::{
    CameraController, CameraSettings, FOV_MAX, FOV_MIN, MoveIntent, PITCH_LIMIT,
};
