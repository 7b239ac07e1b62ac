//! Celestial body hierarchy, transform resolution and orbital stepping.
//!
//! Bodies live in a [`SolarSystem`] arena and refer to each other through
//! [`BodyId`] handles. The arena owns every node; dropping it drops the whole
//! tree at once.

mod body;
mod error;
pub mod presets;
mod system;

pub use body::{BodyDesc, BodyId, CelestialBody, TextureHandle};
pub use error::HierarchyError;
pub use system::{SolarSystem, TIME_SCALE};
