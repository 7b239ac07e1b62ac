//! Ready-made systems.

use crate::{BodyDesc, HierarchyError, SolarSystem};

/// Sun radius in world units.
pub const SUN_RADIUS: f32 = 2.0;

/// The Sun and eight planets with illustrative, non-Keplerian parameters.
///
/// Distances are measured in the Sun's frame, periods in simulation seconds.
/// Initial orbital angles are spread 45 degrees apart.
pub fn sol() -> Result<SolarSystem, HierarchyError> {
    let mut system = SolarSystem::new();
    let sun = system.add_root(
        BodyDesc::new("Sun", SUN_RADIUS)
            .spin(27.0)
            .color([1.0, 1.0, 0.0]),
    )?;

    let planets = [
        ("Mercury", 0.08, 4.0, 10.0, 58.6, [0.7, 0.7, 0.7]),
        ("Venus", 0.15, 6.0, 25.0, -243.0, [1.0, 0.8, 0.6]),
        ("Earth", 0.16, 8.0, 40.0, 1.0, [0.2, 0.5, 1.0]),
        ("Mars", 0.12, 10.0, 75.0, 1.03, [1.0, 0.3, 0.2]),
        ("Jupiter", 0.45, 14.0, 200.0, 0.41, [0.9, 0.7, 0.5]),
        ("Saturn", 0.38, 18.0, 500.0, 0.45, [0.9, 0.8, 0.6]),
        ("Uranus", 0.27, 22.0, 1000.0, -0.72, [0.6, 0.8, 0.9]),
        ("Neptune", 0.26, 26.0, 2000.0, 0.67, [0.3, 0.5, 0.9]),
    ];

    for (i, (name, radius, distance, orbit, spin, color)) in planets.into_iter().enumerate() {
        let initial_angle = i as f32 * 45.0;
        system.add_child(
            sun,
            BodyDesc::new(name, radius)
                .orbit(distance, orbit, initial_angle)
                .spin(spin)
                .color(color),
        )?;
    }

    log::info!("Built Sol preset with {} bodies", system.len());
    Ok(system)
}
