//! Yaw/pitch camera with zoom, free-fly movement and a reset view.

use glam::{Mat4, Vec3};

/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]` degrees.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view in degrees (fully zoomed in).
pub const FOV_MIN: f32 = 1.0;
/// Widest field of view in degrees.
pub const FOV_MAX: f32 = 45.0;

const RESET_POSITION: Vec3 = Vec3::new(0.0, 15.0, 30.0);
/// Facing -Z.
const RESET_YAW: f32 = 270.0;
const RESET_PITCH: f32 = -20.0;

/// Tunables for look and movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    /// Degrees of rotation per unit of mouse delta.
    pub mouse_sensitivity: f32,
    /// World units per second.
    pub move_speed: f32,
    /// Speed multiplier while boosting.
    pub boost_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.1,
            move_speed: 10.0,
            boost_factor: 5.0,
        }
    }
}

/// Held movement keys for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub boost: bool,
}

impl MoveIntent {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right || self.up || self.down)
    }
}

/// Free-flying perspective camera.
///
/// Orientation is stored as yaw/pitch in degrees; `front` is derived from them
/// whenever either changes and is always unit length.
#[derive(Clone, Debug)]
pub struct CameraController {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    aspect_ratio: f32,
    /// Near clip plane distance (positive).
    pub near: f32,
    /// Far clip plane distance (positive, > near).
    pub far: f32,
    pub settings: CameraSettings,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl CameraController {
    /// Camera at `(0, 0, 10)` looking down -Z.
    pub fn new(settings: CameraSettings) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            yaw: RESET_YAW,
            pitch: 0.0,
            fov: FOV_MAX,
            aspect_ratio: 1200.0 / 800.0,
            near: 0.1,
            far: 1000.0,
            settings,
        };
        camera.update_front();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit strafe direction.
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize()
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Rotate by a mouse delta. Positive `dy` looks up.
    pub fn look(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let sensitivity = self.settings.mouse_sensitivity;
        self.set_orientation(self.yaw + dx * sensitivity, self.pitch + dy * sensitivity);
    }

    /// Set yaw and pitch directly. Yaw wraps into `[0, 360)` and pitch is
    /// clamped; non-finite values are ignored.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        if yaw.is_finite() {
            self.yaw = wrap_yaw(yaw);
        }
        if pitch.is_finite() {
            self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.update_front();
    }

    /// Narrow (positive) or widen (negative) the field of view.
    pub fn zoom(&mut self, scroll: f32) {
        if scroll.is_finite() {
            self.fov = (self.fov - scroll).clamp(FOV_MIN, FOV_MAX);
        }
    }

    /// Move along the camera basis for `dt` seconds.
    pub fn translate(&mut self, intent: MoveIntent, dt: f32) {
        if intent.is_idle() || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let mut speed = self.settings.move_speed * dt;
        if intent.boost {
            speed *= self.settings.boost_factor;
        }

        let right = self.right();
        let mut step = Vec3::ZERO;
        if intent.forward {
            step += self.front;
        }
        if intent.backward {
            step -= self.front;
        }
        if intent.right {
            step += right;
        }
        if intent.left {
            step -= right;
        }
        if intent.up {
            step += self.up;
        }
        if intent.down {
            step -= self.up;
        }
        self.position += step * speed;
    }

    /// Restore the overview position, orientation and zoom in one update.
    pub fn reset(&mut self) {
        self.position = RESET_POSITION;
        self.yaw = RESET_YAW;
        self.pitch = RESET_PITCH;
        self.fov = FOV_MAX;
        self.update_front();
        tracing::debug!(position = ?self.position, "Camera reset to overview");
    }

    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.front, self.up)
    }

    /// Reverse-Z perspective: near maps to depth 1, far to 0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.far,
            self.near,
        )
    }

    fn update_front(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
    }
}

fn wrap_yaw(yaw: f32) -> f32 {
    let wrapped = yaw.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
