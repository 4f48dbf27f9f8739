//! Probe activatables and a scripted ray query for driving controllers in tests.

use gazekit_core::{Activatable, ActivatableHandle, ActivatableSet, TargetId};
use gazekit_physics::{Ray, RaycastHit, RaycastQuery};
use std::cell::RefCell;
use std::rc::Rc;

/// Activatable that counts every call made on it.
#[derive(Debug, Default, Clone)]
pub struct Probe {
    /// Value returned by `check_conditions`.
    pub conditions: bool,
    /// After this many condition checks, report false regardless of `conditions`.
    pub fail_after_checks: Option<u32>,
    /// Number of `check_conditions` calls.
    pub checks: u32,
    /// Number of `activate` calls.
    pub activations: u32,
    /// Number of `deactivate` calls.
    pub deactivations: u32,
}

/// Shared handle to a [`Probe`] so tests can inspect it after handing it to a scene.
pub type ProbeHandle = Rc<RefCell<Probe>>;

impl Activatable for Probe {
    fn check_conditions(&mut self) -> bool {
        self.checks += 1;
        match self.fail_after_checks {
            Some(limit) if self.checks > limit => false,
            _ => self.conditions,
        }
    }

    fn activate(&mut self) {
        self.activations += 1;
    }

    fn deactivate(&mut self) {
        self.deactivations += 1;
    }
}

/// Create a probe with fixed conditions.
pub fn probe(conditions: bool) -> ProbeHandle {
    Rc::new(RefCell::new(Probe {
        conditions,
        ..Default::default()
    }))
}

/// Erase probe handles into an [`ActivatableSet`].
pub fn activatable_set(probes: &[&ProbeHandle]) -> ActivatableSet {
    probes
        .iter()
        .map(|p| Rc::clone(p) as ActivatableHandle)
        .collect()
}

/// Ray query whose answer is set by the test before each tick.
///
/// The ray itself is ignored apart from computing the hit point.
#[derive(Default)]
pub struct ScriptedQuery {
    current: Option<(TargetId, String, ActivatableSet)>,
}

impl ScriptedQuery {
    /// Start out hitting nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent casts hit `target` carrying `activatables`.
    pub fn look_at(&mut self, target: TargetId, name: &str, activatables: ActivatableSet) {
        self.current = Some((target, name.to_string(), activatables));
    }

    /// Make subsequent casts miss.
    pub fn look_away(&mut self) {
        self.current = None;
    }
}

impl RaycastQuery for ScriptedQuery {
    fn cast_ray(&self, ray: &Ray) -> Option<RaycastHit> {
        let (target, name, activatables) = self.current.as_ref()?;
        Some(RaycastHit {
            target: *target,
            name: name.clone(),
            distance: 1.0,
            point: ray.at(1.0),
            activatables: activatables.clone(),
        })
    }
}

/// The forward ray used with [`ScriptedQuery`].
pub fn forward_ray() -> Ray {
    Ray::new(glam::Vec3::ZERO, glam::Vec3::NEG_Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_fails_after_limit() {
        let p = probe(true);
        p.borrow_mut().fail_after_checks = Some(1);
        assert!(p.borrow_mut().check_conditions());
        assert!(!p.borrow_mut().check_conditions());
        assert_eq!(p.borrow().checks, 2);
    }

    #[test]
    fn scripted_query_follows_script() {
        let mut query = ScriptedQuery::new();
        assert!(query.cast_ray(&forward_ray()).is_none());

        let p = probe(true);
        query.look_at(TargetId(7), "orb", activatable_set(&[&p]));
        let hit = query.cast_ray(&forward_ray()).expect("scripted hit");
        assert_eq!(hit.target, TargetId(7));
        assert_eq!(hit.name, "orb");
        assert!(hit.is_interactive());

        query.look_away();
        assert!(query.cast_ray(&forward_ray()).is_none());
    }
}
