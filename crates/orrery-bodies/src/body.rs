//! Body nodes and their construction parameters.

use glam::{Mat4, Vec3};
use orrery_texture::BodyKind;

/// Stable handle to a body inside one [`SolarSystem`](crate::SolarSystem).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque reference to a GPU texture owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Construction parameters for a body.
///
/// ```
/// use orrery_bodies::BodyDesc;
///
/// let earth = BodyDesc::new("Earth", 0.16)
///     .orbit(8.0, 40.0, 90.0)
///     .spin(1.0)
///     .color([0.2, 0.5, 1.0]);
/// assert_eq!(earth.distance, 8.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDesc {
    pub name: String,
    pub radius: f32,
    pub distance: f32,
    pub orbital_period: f32,
    pub orbital_angle: f32,
    pub rotation_period: f32,
    pub color: Vec3,
    pub texture_enabled: bool,
}

impl BodyDesc {
    pub fn new(name: impl Into<String>, radius: f32) -> Self {
        Self {
            name: name.into(),
            radius,
            distance: 0.0,
            orbital_period: 0.0,
            orbital_angle: 0.0,
            rotation_period: 0.0,
            color: Vec3::ONE,
            texture_enabled: true,
        }
    }

    /// Circular orbit at `distance` from the parent, starting at `initial_angle` degrees.
    pub fn orbit(mut self, distance: f32, period: f32, initial_angle: f32) -> Self {
        self.distance = distance;
        self.orbital_period = period;
        self.orbital_angle = initial_angle;
        self
    }

    /// Spin period; negative for retrograde.
    pub fn spin(mut self, period: f32) -> Self {
        self.rotation_period = period;
        self
    }

    pub fn color(mut self, rgb: [f32; 3]) -> Self {
        self.color = Vec3::from_array(rgb);
        self
    }

    pub fn texture_enabled(mut self, enabled: bool) -> Self {
        self.texture_enabled = enabled;
        self
    }
}

/// One node of the hierarchy.
#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub name: String,
    pub kind: BodyKind,
    pub radius: f32,
    pub distance: f32,
    pub orbital_period: f32,
    /// Degrees, kept in `[0, 360)`.
    pub orbital_angle: f32,
    pub rotation_period: f32,
    /// Degrees, kept in `[0, 360)`.
    pub rotation_angle: f32,
    pub color: Vec3,
    pub texture: Option<TextureHandle>,
    pub texture_enabled: bool,
    pub(crate) parent: Option<BodyId>,
    pub(crate) children: Vec<BodyId>,
}

impl CelestialBody {
    pub(crate) fn from_desc(desc: BodyDesc, parent: Option<BodyId>) -> Self {
        Self {
            kind: BodyKind::from_name(&desc.name),
            name: desc.name,
            radius: desc.radius,
            distance: desc.distance,
            orbital_period: desc.orbital_period,
            orbital_angle: wrap_degrees(desc.orbital_angle),
            rotation_period: desc.rotation_period,
            rotation_angle: 0.0,
            color: desc.color,
            texture: None,
            texture_enabled: desc.texture_enabled,
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    /// Children in creation order.
    pub fn children(&self) -> &[BodyId] {
        &self.children
    }

    /// Placement relative to the parent frame.
    ///
    /// Orbit (rotate by the orbital angle, then push out along +X), then spin,
    /// then scale. The orbit step is skipped for bodies at distance 0.
    pub fn local_transform(&self) -> Mat4 {
        let orbit = if self.distance > 0.0 {
            Mat4::from_rotation_y(self.orbital_angle.to_radians())
                * Mat4::from_translation(Vec3::new(self.distance, 0.0, 0.0))
        } else {
            Mat4::IDENTITY
        };
        orbit
            * Mat4::from_rotation_y(self.rotation_angle.to_radians())
            * Mat4::from_scale(Vec3::splat(self.radius))
    }

    /// Advance both phase angles. Zero periods disable the matching motion.
    pub(crate) fn advance(&mut self, dt: f32, scale: f32) {
        if self.orbital_period != 0.0 {
            let rate = 360.0 / self.orbital_period.abs();
            self.orbital_angle = wrap_degrees(self.orbital_angle + rate * dt * scale);
        }
        if self.rotation_period != 0.0 {
            let rate = 360.0 / self.rotation_period;
            self.rotation_angle = wrap_degrees(self.rotation_angle + rate * dt * scale);
        }
    }
}

/// Wrap into `[0, 360)`. `rem_euclid` can round tiny negatives up to 360.
fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
