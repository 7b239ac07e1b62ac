//! Closed set of body kinds with a dedicated surface pattern.

/// Surface pattern family, chosen once from a body's name.
///
/// Names are matched exactly (case-sensitive). Anything unrecognized maps to
/// [`BodyKind::Other`], which renders a noisy gray surface instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Solar surface: granules and sparse sunspots.
    Sun,
    /// Continents, oceans and clouds.
    Earth,
    /// Rust-toned surface with dark crater blotches.
    Mars,
    /// Two-tone latitude bands with a storm spot.
    Jupiter,
    /// Pale, low-contrast bands.
    Saturn,
    /// Pale blue-green, faint bands.
    Uranus,
    /// Deep blue with scattered white clouds.
    Neptune,
    /// Fallback for unrecognized names.
    Other,
}

impl BodyKind {
    /// All kinds, in declaration order.
    pub const ALL: [BodyKind; 8] = [
        BodyKind::Sun,
        BodyKind::Earth,
        BodyKind::Mars,
        BodyKind::Jupiter,
        BodyKind::Saturn,
        BodyKind::Uranus,
        BodyKind::Neptune,
        BodyKind::Other,
    ];

    /// Select the pattern family for a body name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Sun" => BodyKind::Sun,
            "Earth" => BodyKind::Earth,
            "Mars" => BodyKind::Mars,
            "Jupiter" => BodyKind::Jupiter,
            "Saturn" => BodyKind::Saturn,
            "Uranus" => BodyKind::Uranus,
            "Neptune" => BodyKind::Neptune,
            _ => BodyKind::Other,
        }
    }

    /// Whether the pattern consumes a noise sample per pixel.
    pub(crate) fn uses_noise(self) -> bool {
        !matches!(
            self,
            BodyKind::Jupiter | BodyKind::Saturn | BodyKind::Uranus
        )
    }
}
