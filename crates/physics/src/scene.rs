//! Flat collider list answering nearest-hit gaze queries.

use crate::{Aabb, Ray, RaycastHit, RaycastQuery};
use gazekit_core::{ActivatableHandle, ActivatableSet, TargetId};
use tracing::trace;

/// An object that can be hit by the gaze ray.
pub struct SceneObject {
    /// Stable identity handed to the controller.
    pub id: TargetId,
    /// Display name for diagnostics.
    pub name: String,
    /// Collision bounds.
    pub bounds: Aabb,
    /// Capabilities attached to the object.
    pub activatables: ActivatableSet,
}

/// Collection of colliders with a brute-force nearest-hit query.
pub struct Scene {
    objects: Vec<SceneObject>,
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }

    /// Add an inert collider and return its identity.
    pub fn add(&mut self, name: impl Into<String>, bounds: Aabb) -> TargetId {
        self.add_with(name, bounds, Vec::new())
    }

    /// Add a collider carrying the given capabilities.
    pub fn add_with(
        &mut self,
        name: impl Into<String>,
        bounds: Aabb,
        activatables: ActivatableSet,
    ) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            name: name.into(),
            bounds,
            activatables,
        });
        id
    }

    /// Attach a capability to an existing object. Returns false if the id is unknown.
    pub fn attach(&mut self, id: TargetId, activatable: ActivatableHandle) -> bool {
        match self.object_mut(id) {
            Some(object) => {
                object.activatables.push(activatable);
                true
            }
            None => false,
        }
    }

    /// Remove an object from the scene.
    pub fn remove(&mut self, id: TargetId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    /// Look up an object by id.
    pub fn object(&self, id: TargetId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Mutable lookup by id.
    pub fn object_mut(&mut self, id: TargetId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Look up an object by name.
    pub fn find_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl RaycastQuery for Scene {
    fn cast_ray(&self, ray: &Ray) -> Option<RaycastHit> {
        if ray.is_degenerate() {
            return None;
        }

        let mut nearest: Option<(f32, &SceneObject)> = None;
        for object in &self.objects {
            let Some(distance) = object.bounds.ray_intersection(ray) else {
                continue;
            };
            // Ties keep the earlier object so results stay deterministic.
            if nearest.map_or(true, |(best, _)| distance < best) {
                nearest = Some((distance, object));
            }
        }

        let (distance, object) = nearest?;
        trace!(target_id = object.id.0, distance, "gaze ray hit");
        Some(RaycastHit {
            target: object.id,
            name: object.name.clone(),
            distance,
            point: ray.at(distance),
            activatables: object.activatables.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazekit_core::{shared, Activatable};
    use glam::Vec3;

    struct Always;

    impl Activatable for Always {
        fn check_conditions(&mut self) -> bool {
            true
        }
        fn activate(&mut self) {}
        fn deactivate(&mut self) {}
    }

    fn cube(center: Vec3) -> Aabb {
        Aabb::from_center_size(center, Vec3::ONE)
    }

    #[test]
    fn nearest_object_wins() {
        let mut scene = Scene::new();
        let far = scene.add("far", cube(Vec3::new(0.0, 0.0, -10.0)));
        let near = scene.add("near", cube(Vec3::new(0.0, 0.0, -3.0)));

        let hit = scene
            .cast_ray(&Ray::new(Vec3::ZERO, Vec3::NEG_Z))
            .expect("ray should hit");
        assert_eq!(hit.target, near);
        assert_eq!(hit.name, "near");
        assert!((hit.distance - 2.5).abs() < 0.001);
        assert!((hit.point - Vec3::new(0.0, 0.0, -2.5)).length() < 0.001);

        scene.remove(near);
        let hit = scene
            .cast_ray(&Ray::new(Vec3::ZERO, Vec3::NEG_Z))
            .expect("ray should hit");
        assert_eq!(hit.target, far);
    }

    #[test]
    fn hit_carries_attached_capabilities() {
        let mut scene = Scene::new();
        let inert = scene.add("wall", cube(Vec3::new(0.0, 0.0, -3.0)));
        assert!(!scene
            .cast_ray(&Ray::new(Vec3::ZERO, Vec3::NEG_Z))
            .expect("hit")
            .is_interactive());

        assert!(scene.attach(inert, shared(Always)));
        let hit = scene
            .cast_ray(&Ray::new(Vec3::ZERO, Vec3::NEG_Z))
            .expect("hit");
        assert!(hit.is_interactive());
        assert_eq!(hit.activatables.len(), 1);
        assert!(!scene.attach(TargetId(99), shared(Always)));
    }

    #[test]
    fn empty_scene_and_degenerate_ray_miss() {
        let mut scene = Scene::new();
        assert!(scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).is_none());

        scene.add("box", cube(Vec3::new(0.0, 0.0, -3.0)));
        assert!(scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::ZERO)).is_none());
    }

    #[test]
    fn default_scene_ids_start_at_one() {
        let mut scene = Scene::default();
        assert_eq!(scene.add("a", cube(Vec3::ZERO)), TargetId(1));
        assert_eq!(scene.add("b", cube(Vec3::ONE)), TargetId(2));
        assert_eq!(scene.len(), 2);
        assert!(scene.find_by_name("b").is_some());
    }
}
