//! Per-kind surface pattern functions.
//!
//! Each function maps normalized coordinates `(u, v)` and a noise sample `n`
//! in `[0, 1)` to unclamped RGB channel values. Clamping and narrowing happen
//! once in [`shade`].

use std::f32::consts::PI;

use crate::BodyKind;

type Rgb = [f32; 3];

const CLOUD: Rgb = [200.0, 200.0, 200.0];

/// Shade one texel for `kind`. `n` is ignored by kinds that do not use noise.
pub(crate) fn shade(kind: BodyKind, u: f32, v: f32, n: f32) -> [u8; 3] {
    let rgb = match kind {
        BodyKind::Sun => sun(u, v, n),
        BodyKind::Earth => earth(u, v, n),
        BodyKind::Mars => mars(u, v, n),
        BodyKind::Jupiter => jupiter(u, v),
        BodyKind::Saturn => saturn(v),
        BodyKind::Uranus => uranus(v),
        BodyKind::Neptune => neptune(u, v, n),
        BodyKind::Other => other(n),
    };
    [channel(rgb[0]), channel(rgb[1]), channel(rgb[2])]
}

/// Clamp to the displayable range and narrow. NaN maps to 0.
pub(crate) fn channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

fn sun(u: f32, v: f32, n: f32) -> Rgb {
    let granule = (u * 50.0).sin() * (v * 50.0).cos() * 0.1;
    let sunspot = (u * PI).sin() * (v * 2.1).sin();
    if sunspot > 0.8 && n > 0.95 {
        return [180.0, 150.0, 100.0];
    }
    [255.0, 220.0 + n * 35.0 + granule * 255.0, 150.0 + n * 50.0]
}

fn continents(u: f32, v: f32) -> f32 {
    (u * 8.0).sin() * (v * 6.0).cos() + (u * 12.0).sin() * (v * 9.0).cos()
}

fn earth(u: f32, v: f32, n: f32) -> Rgb {
    if n > 0.85 {
        return CLOUD;
    }
    if continents(u, v) > 0.3 {
        [50.0 + n * 100.0, 120.0 + n * 80.0, 50.0 + n * 50.0]
    } else {
        [20.0 + n * 30.0, 80.0 + n * 60.0, 150.0 + n * 50.0]
    }
}

fn mars(u: f32, v: f32, n: f32) -> Rgb {
    let craters = (u * 20.0).sin() * (v * 15.0).cos() + (u * 30.0).sin() * (v * 25.0).cos();
    if craters > 0.7 {
        return [120.0, 50.0, 20.0];
    }
    [180.0 + n * 40.0, 80.0 + n * 30.0, 40.0 + n * 20.0]
}

const STORM_CENTER: (f32, f32) = (0.7, 0.5);
const STORM_RADIUS: f32 = 0.1;

fn jupiter(u: f32, v: f32) -> Rgb {
    let (du, dv) = (u - STORM_CENTER.0, v - STORM_CENTER.1);
    if (du * du + dv * dv).sqrt() < STORM_RADIUS {
        return [180.0, 80.0, 60.0];
    }
    let band = (v * 20.0).sin() * 0.5 + 0.5;
    if band > 0.5 {
        [200.0, 150.0, 100.0]
    } else {
        [160.0, 100.0, 60.0]
    }
}

fn saturn(v: f32) -> Rgb {
    let b = (v * 15.0).sin() * 0.3 + 0.7;
    [200.0 + b * 30.0, 180.0 + b * 20.0, 140.0 + b * 20.0]
}

fn uranus(v: f32) -> Rgb {
    let b = (v * 10.0).sin() * 0.2 + 0.8;
    [120.0 + b * 20.0, 160.0 + b * 30.0, 180.0 + b * 20.0]
}

fn neptune(u: f32, v: f32, n: f32) -> Rgb {
    if (u * 8.0).sin() * (v * 6.0).cos() > 0.8 && n > 0.7 {
        return CLOUD;
    }
    [60.0 + n * 20.0, 100.0 + n * 30.0, 180.0 + n * 40.0]
}

fn other(n: f32) -> Rgb {
    let gray = 128.0 + n * 127.0;
    [gray, gray, gray]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_clamps_both_ends() {
        assert_eq!(channel(-12.0), 0);
        assert_eq!(channel(300.0), 255);
        assert_eq!(channel(f32::NAN), 0);
        assert_eq!(channel(127.9), 127);
    }

    #[test]
    fn test_sun_bright_branch_saturates() {
        // Granule peak plus top noise exceeds 255 before clamping.
        let raw = sun(0.0314, 0.0, 0.94);
        assert!(raw[1] > 255.0);
        assert_eq!(shade(BodyKind::Sun, 0.0314, 0.0, 0.94)[1], 255);
    }

    #[test]
    fn test_jupiter_storm_at_fixed_point() {
        assert_eq!(shade(BodyKind::Jupiter, 0.7, 0.5, 0.0), [180, 80, 60]);
        assert_ne!(shade(BodyKind::Jupiter, 0.1, 0.5, 0.0), [180, 80, 60]);
    }

    #[test]
    fn test_earth_clouds_override_land_and_ocean() {
        assert_eq!(shade(BodyKind::Earth, 0.2, 0.3, 0.9), [200, 200, 200]);
        let clear = shade(BodyKind::Earth, 0.2, 0.3, 0.5);
        assert_ne!(clear, [200, 200, 200]);
    }

    #[test]
    fn test_other_is_gray() {
        let [r, g, b] = shade(BodyKind::Other, 0.4, 0.6, 0.5);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!(r >= 128);
    }

    #[test]
    fn test_banded_patterns_ignore_u() {
        for kind in [BodyKind::Saturn, BodyKind::Uranus] {
            assert_eq!(shade(kind, 0.0, 0.37, 0.0), shade(kind, 0.9, 0.37, 0.99));
        }
    }
}
