//! The body arena: construction, transform resolution and stepping.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;

use crate::{BodyDesc, BodyId, CelestialBody, HierarchyError, TextureHandle};

/// Global slow-down applied to all angular rates.
pub const TIME_SCALE: f32 = 0.5;

/// Arena of celestial bodies rooted at a single non-orbiting star.
///
/// Bodies are only ever appended, so a parent's index is always lower than
/// any of its children's.
#[derive(Clone, Debug, Default)]
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
    names: FxHashMap<String, BodyId>,
    root: Option<BodyId>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the root body. It must have distance 0.
    pub fn add_root(&mut self, desc: BodyDesc) -> Result<BodyId, HierarchyError> {
        if self.root.is_some() {
            return Err(HierarchyError::RootAlreadyExists);
        }
        if desc.distance != 0.0 {
            return Err(HierarchyError::RootOrbits {
                name: desc.name,
                distance: desc.distance,
            });
        }
        let id = self.insert(desc, None)?;
        self.root = Some(id);
        Ok(id)
    }

    /// Add a body orbiting `parent`. Appended after the parent's existing children.
    pub fn add_child(&mut self, parent: BodyId, desc: BodyDesc) -> Result<BodyId, HierarchyError> {
        if self.root.is_none() {
            return Err(HierarchyError::MissingRoot(desc.name));
        }
        if parent.index() >= self.bodies.len() {
            return Err(HierarchyError::UnknownParent(parent));
        }
        let id = self.insert(desc, Some(parent))?;
        self.bodies[parent.index()].children.push(id);
        Ok(id)
    }

    fn insert(&mut self, desc: BodyDesc, parent: Option<BodyId>) -> Result<BodyId, HierarchyError> {
        if !desc.radius.is_finite() || desc.radius <= 0.0 {
            return Err(HierarchyError::InvalidRadius {
                name: desc.name,
                radius: desc.radius,
            });
        }
        if self.names.contains_key(&desc.name) {
            return Err(HierarchyError::DuplicateName(desc.name));
        }
        let id = BodyId(self.bodies.len() as u32);
        self.names.insert(desc.name.clone(), id);
        log::debug!("Added body '{}' as {:?} (parent {:?})", desc.name, id, parent);
        self.bodies.push(CelestialBody::from_desc(desc, parent));
        Ok(id)
    }

    pub fn root(&self) -> Option<BodyId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(id.index())
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.names.get(name).copied()
    }

    /// All bodies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyId(i as u32), body))
    }

    /// Attach a renderer texture. Returns `false` for an unknown id.
    pub fn set_texture(&mut self, id: BodyId, handle: TextureHandle) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.texture = Some(handle);
                true
            }
            None => false,
        }
    }

    /// World transform of `id`: every ancestor's local transform composed
    /// root-first, followed by the body's own.
    ///
    /// Recomputed on every call from the current phase angles.
    pub fn world_transform(&self, id: BodyId) -> Option<Mat4> {
        let body = self.get(id)?;
        let parent = match body.parent {
            Some(parent) => self.world_transform(parent)?,
            None => Mat4::IDENTITY,
        };
        Some(parent * body.local_transform())
    }

    /// World transforms of every body, indexed like [`iter`](Self::iter).
    pub fn world_transforms(&self) -> Vec<Mat4> {
        let mut out: Vec<Mat4> = Vec::with_capacity(self.bodies.len());
        for body in &self.bodies {
            let parent = body.parent.map_or(Mat4::IDENTITY, |p| out[p.index()]);
            out.push(parent * body.local_transform());
        }
        out
    }

    pub fn world_position(&self, id: BodyId) -> Option<Vec3> {
        self.world_transform(id).map(|m| m.w_axis.truncate())
    }

    /// Advance the simulation by `dt` seconds at the default [`TIME_SCALE`].
    pub fn step(&mut self, dt: f32) {
        self.step_scaled(dt, TIME_SCALE);
    }

    /// Advance every body exactly once, parents before children.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn step_scaled(&mut self, dt: f32, scale: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if dt == 0.0 {
            return;
        }
        let Some(root) = self.root else {
            return;
        };

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let body = &mut self.bodies[id.index()];
            body.advance(dt, scale);
            stack.extend(body.children.iter().rev());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn star_and_orbiter(orbiter_radius: f32) -> (SolarSystem, BodyId, BodyId) {
        let mut system = SolarSystem::new();
        let star = system
            .add_root(BodyDesc::new("Star", 1.0).spin(27.0))
            .unwrap();
        let orbiter = system
            .add_child(
                star,
                BodyDesc::new("Orbiter", orbiter_radius)
                    .orbit(8.0, 40.0, 90.0)
                    .spin(1.0),
            )
            .unwrap();
        (system, star, orbiter)
    }

    fn angle_eq(a: f32, b: f32) -> bool {
        let d = (a - b).rem_euclid(360.0);
        d < EPS || 360.0 - d < EPS
    }

    #[test]
    fn test_star_orbiter_scenario() {
        let (mut system, star, orbiter) = star_and_orbiter(0.5);
        system.step(40.0);

        let body = system.get(orbiter).unwrap();
        assert!(angle_eq(body.orbital_angle, 270.0), "{}", body.orbital_angle);

        // Offset in the star's frame is the orbit radius swept to 270 degrees.
        let star_world = system.world_transform(star).unwrap();
        let orbiter_world = system.world_transform(orbiter).unwrap();
        let local = (star_world.inverse() * orbiter_world).w_axis.truncate();
        let theta = 270f32.to_radians();
        let expected = Vec3::new(8.0 * theta.cos(), 0.0, -8.0 * theta.sin());
        assert!((local - expected).length() < EPS, "{local:?} vs {expected:?}");

        let world = system.world_position(orbiter).unwrap();
        let root = system.world_position(star).unwrap();
        assert!(((world - root).length() - 8.0).abs() < EPS);
        assert!(world.y.abs() < EPS);
    }

    #[test]
    fn test_orbiter_pivot_independent_of_its_radius() {
        let (mut small, _, a) = star_and_orbiter(0.1);
        let (mut large, _, b) = star_and_orbiter(4.0);
        small.step(13.0);
        large.step(13.0);
        let pa = small.world_position(a).unwrap();
        let pb = large.world_position(b).unwrap();
        assert!((pa - pb).length() < EPS);
    }

    #[test]
    fn test_transform_order_is_load_bearing() {
        let (mut system, _, orbiter) = star_and_orbiter(1.0);
        system.get_mut(orbiter).unwrap().rotation_angle = 60.0;
        let body = system.get(orbiter).unwrap();

        let correct = body.local_transform().w_axis.truncate();
        let swapped = (Mat4::from_rotation_y(body.orbital_angle.to_radians())
            * Mat4::from_rotation_y(body.rotation_angle.to_radians())
            * Mat4::from_translation(Vec3::new(body.distance, 0.0, 0.0))
            * Mat4::from_scale(Vec3::splat(body.radius)))
        .w_axis
        .truncate();

        assert!((correct - swapped).length() > 1.0);
    }

    #[test]
    fn test_root_without_orbit_period_never_orbits() {
        let (mut system, star, _) = star_and_orbiter(1.0);
        let before = system.get(star).unwrap().orbital_angle;
        for dt in [0.016, 1.0, 250.0, 3.3] {
            system.step(dt);
        }
        assert_eq!(system.get(star).unwrap().orbital_angle, before);
        assert!(system.world_position(star).unwrap().length() < EPS);
    }

    #[test]
    fn test_rotation_rate_independent_of_depth() {
        let mut system = SolarSystem::new();
        let root = system.add_root(BodyDesc::new("Root", 1.0).spin(7.0)).unwrap();
        let mid = system
            .add_child(root, BodyDesc::new("Mid", 1.0).orbit(3.0, 11.0, 0.0).spin(7.0))
            .unwrap();
        let leaf = system
            .add_child(mid, BodyDesc::new("Leaf", 1.0).orbit(1.0, 5.0, 0.0).spin(7.0))
            .unwrap();

        let t = 2.5;
        system.step(t);
        let expected = (360.0 / 7.0 * t * TIME_SCALE).rem_euclid(360.0);
        for id in [root, mid, leaf] {
            assert!(angle_eq(system.get(id).unwrap().rotation_angle, expected));
        }
    }

    #[test]
    fn test_every_body_stepped_exactly_once() {
        let mut system = SolarSystem::new();
        let root = system.add_root(BodyDesc::new("Root", 1.0)).unwrap();
        let a = system
            .add_child(root, BodyDesc::new("A", 1.0).orbit(2.0, 360.0, 0.0))
            .unwrap();
        let b = system
            .add_child(a, BodyDesc::new("B", 1.0).orbit(1.0, 360.0, 0.0))
            .unwrap();
        let c = system
            .add_child(root, BodyDesc::new("C", 1.0).orbit(5.0, 360.0, 0.0))
            .unwrap();

        // 1 degree per second at unit scale.
        system.step_scaled(1.0, 1.0);
        for id in [a, b, c] {
            assert!(angle_eq(system.get(id).unwrap().orbital_angle, 1.0));
        }
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let (mut system, _, orbiter) = star_and_orbiter(1.0);
        let before = system.get(orbiter).unwrap().orbital_angle;
        system.step(-1.0);
        system.step(f32::NAN);
        system.step(f32::INFINITY);
        assert_eq!(system.get(orbiter).unwrap().orbital_angle, before);
    }

    #[test]
    fn test_angles_stay_bounded() {
        let (mut system, star, orbiter) = star_and_orbiter(1.0);
        for _ in 0..10_000 {
            system.step(1.7);
        }
        for id in [star, orbiter] {
            let body = system.get(id).unwrap();
            assert!((0.0..360.0).contains(&body.orbital_angle));
            assert!((0.0..360.0).contains(&body.rotation_angle));
        }
    }

    #[test]
    fn test_children_keep_creation_order() {
        let mut system = SolarSystem::new();
        let root = system.add_root(BodyDesc::new("Root", 1.0)).unwrap();
        let ids: Vec<_> = ["One", "Two", "Three"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                system
                    .add_child(root, BodyDesc::new(name, 1.0).orbit(i as f32 + 1.0, 1.0, 0.0))
                    .unwrap()
            })
            .collect();
        assert_eq!(system.get(root).unwrap().children(), ids.as_slice());
        assert_eq!(system.get(ids[1]).unwrap().parent(), Some(root));
        assert_eq!(system.find("Three"), Some(ids[2]));
    }

    #[test]
    fn test_batch_transforms_match_single() {
        let (mut system, _, _) = star_and_orbiter(0.3);
        system.step(17.0);
        let all = system.world_transforms();
        for (id, _) in system.iter() {
            let single = system.world_transform(id).unwrap();
            assert!(all[id.index()].abs_diff_eq(single, 1e-5));
        }
    }

    #[test]
    fn test_construction_errors() {
        let mut system = SolarSystem::new();
        let err = system
            .add_child(BodyId(0), BodyDesc::new("Early", 1.0))
            .unwrap_err();
        assert_eq!(err, HierarchyError::MissingRoot("Early".into()));

        let err = system
            .add_root(BodyDesc::new("Drifter", 1.0).orbit(3.0, 1.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, HierarchyError::RootOrbits { .. }));

        let root = system.add_root(BodyDesc::new("Sun", 2.0)).unwrap();
        assert_eq!(
            system.add_root(BodyDesc::new("Other", 1.0)),
            Err(HierarchyError::RootAlreadyExists)
        );
        assert_eq!(
            system.add_child(BodyId(42), BodyDesc::new("Lost", 1.0)),
            Err(HierarchyError::UnknownParent(BodyId(42)))
        );
        assert_eq!(
            system.add_child(root, BodyDesc::new("Sun", 1.0)),
            Err(HierarchyError::DuplicateName("Sun".into()))
        );
        for radius in [0.0, -1.0, f32::NAN] {
            let err = system
                .add_child(root, BodyDesc::new("Bad", radius))
                .unwrap_err();
            assert!(matches!(err, HierarchyError::InvalidRadius { .. }));
        }
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn test_set_texture() {
        let (mut system, star, _) = star_and_orbiter(1.0);
        assert!(system.set_texture(star, TextureHandle(3)));
        assert_eq!(system.get(star).unwrap().texture, Some(TextureHandle(3)));
        assert!(!system.set_texture(BodyId(99), TextureHandle(0)));
    }
}
