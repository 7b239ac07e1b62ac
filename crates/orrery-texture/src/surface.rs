//! Deterministic surface texture generation.

use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

use crate::{BodyKind, pattern};

/// Square resolution used for body textures unless configured otherwise.
pub const DEFAULT_RESOLUTION: u32 = 512;

/// Bytes per texel in [`SurfaceTexture::pixels`].
pub const CHANNELS: usize = 3;

/// A square, tightly packed RGB8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceTexture {
    pub kind: BodyKind,
    pub size: u32,
    /// Row-major RGB bytes, `size * size * CHANNELS` long.
    pub pixels: Vec<u8>,
}

impl SurfaceTexture {
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// RGB triple at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let i = (y as usize * self.size as usize + x as usize) * CHANNELS;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    /// Expand to RGBA8 with opaque alpha, the layout GPU textures expect.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / CHANNELS * 4);
        for rgb in self.pixels.chunks_exact(CHANNELS) {
            out.extend_from_slice(rgb);
            out.push(u8::MAX);
        }
        out
    }

    /// Mean of each channel over all texels, in `[0, 255]`. Zero for an empty image.
    pub fn mean_rgb(&self) -> [f32; 3] {
        let count = self.pixels.len() / CHANNELS;
        if count == 0 {
            return [0.0; 3];
        }
        let mut sum = [0u64; 3];
        for rgb in self.pixels.chunks_exact(CHANNELS) {
            for (acc, &c) in sum.iter_mut().zip(rgb) {
                *acc += u64::from(c);
            }
        }
        sum.map(|s| s as f32 / count as f32)
    }
}

/// Stable 64-bit seed derived from a body name.
pub fn seed_for_name(name: &str) -> u64 {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    hasher.finish()
}

/// Generates surface textures for one pattern kind from a fixed seed.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceGenerator {
    kind: BodyKind,
    seed: u64,
}

impl SurfaceGenerator {
    pub fn new(kind: BodyKind, seed: u64) -> Self {
        Self { kind, seed }
    }

    /// Kind and seed both derived from the body name.
    pub fn for_body(name: &str) -> Self {
        Self::new(BodyKind::from_name(name), seed_for_name(name))
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Generate a `size x size` texture.
    ///
    /// The generator is reseeded on every call, so repeated calls return
    /// identical buffers.
    pub fn generate(&self, size: u32) -> SurfaceTexture {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let noisy = self.kind.uses_noise();
        let extent = size as f32;
        let mut pixels = Vec::with_capacity(size as usize * size as usize * CHANNELS);

        for y in 0..size {
            let v = y as f32 / extent;
            for x in 0..size {
                let u = x as f32 / extent;
                let n = if noisy {
                    rng.random_range(0..100u32) as f32 / 100.0
                } else {
                    0.0
                };
                pixels.extend_from_slice(&pattern::shade(self.kind, u, v, n));
            }
        }

        log::debug!(
            "Synthesized {:?} surface {}x{} (seed {:#018x})",
            self.kind,
            size,
            size,
            self.seed
        );

        SurfaceTexture {
            kind: self.kind,
            size,
            pixels,
        }
    }
}

/// Synthesize the surface texture for a named body at `size x size`.
///
/// Unrecognized names fall back to the gray [`BodyKind::Other`] pattern.
pub fn synthesize(name: &str, size: u32) -> SurfaceTexture {
    SurfaceGenerator::for_body(name).generate(size)
}
