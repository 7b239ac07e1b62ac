//! Hierarchy construction errors.

use crate::BodyId;

/// Errors raised while building a [`SolarSystem`](crate::SolarSystem).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HierarchyError {
    /// A second root was added.
    #[error("system already has a root body")]
    RootAlreadyExists,

    /// The root must sit at the origin.
    #[error("root body '{name}' has orbital distance {distance}, expected 0")]
    RootOrbits { name: String, distance: f32 },

    /// A child referenced a parent handle not present in this system.
    #[error("unknown parent body {0:?}")]
    UnknownParent(BodyId),

    /// Names key textures and lookups, so they must be unique.
    #[error("a body named '{0}' already exists")]
    DuplicateName(String),

    /// Radius must be finite and positive.
    #[error("body '{name}' has invalid radius {radius}")]
    InvalidRadius { name: String, radius: f32 },

    /// A child was added before any root.
    #[error("cannot add '{0}' before a root body exists")]
    MissingRoot(String),
}
