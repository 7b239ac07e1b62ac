//! Latitude/longitude unit sphere shared by every body.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::buffer::VertexPositionNormalUv;

/// CPU-side sphere geometry.
#[derive(Clone, Debug)]
pub struct SphereMesh {
    pub vertices: Vec<VertexPositionNormalUv>,
    pub indices: Vec<u32>,
}

/// Generate a unit sphere with `sectors` longitude and `stacks` latitude divisions.
///
/// +Y is the pole axis, matching the spin axis of bodies. The seam column is
/// duplicated so `u` runs from 0 to 1 without wrapping. Triangles wind
/// counter-clockwise seen from outside; pole rows emit one triangle per sector.
/// Divisions below 3 sectors or 2 stacks are raised to those minimums.
pub fn generate_uv_sphere(sectors: u32, stacks: u32) -> SphereMesh {
    let sectors = sectors.max(3);
    let stacks = stacks.max(2);
    let row = sectors + 1;

    let mut vertices = Vec::with_capacity((row * (stacks + 1)) as usize);
    for i in 0..=stacks {
        let phi = FRAC_PI_2 - i as f32 * PI / stacks as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for j in 0..=sectors {
            let theta = j as f32 * TAU / sectors as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let p = [cos_phi * sin_theta, sin_phi, cos_phi * cos_theta];
            vertices.push(VertexPositionNormalUv {
                position: p,
                normal: p,
                uv: [j as f32 / sectors as f32, i as f32 / stacks as f32],
            });
        }
    }

    let mut indices = Vec::with_capacity((6 * sectors * (stacks - 1)) as usize);
    for i in 0..stacks {
        for j in 0..sectors {
            let k1 = i * row + j;
            let k2 = k1 + row;
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
        }
    }

    SphereMesh { vertices, indices }
}
