//! Procedural surface textures for celestial bodies.
//!
//! Every texture is a pure function of the body's name and a square resolution:
//! the name selects a [`BodyKind`] pattern and also seeds the pseudo-random
//! generator, so the same body always produces byte-identical pixels.

mod kind;
mod pattern;
mod surface;

pub use kind::BodyKind;
pub use surface::{
    CHANNELS, DEFAULT_RESOLUTION, SurfaceGenerator, SurfaceTexture, seed_for_name, synthesize,
};
