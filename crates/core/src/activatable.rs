//! Target-side capability contract for gaze interaction.

use std::cell::RefCell;
use std::rc::Rc;

/// Implemented by any component that wants to react to being looked at.
///
/// A target may carry several implementations. Each one is gated by its own
/// [`Activatable::check_conditions`] when activation is dispatched.
pub trait Activatable {
    /// Whether this component is currently willing to be activated.
    ///
    /// Polled every tick while the target is gazed at, so repeated calls must
    /// not change the answer on their own.
    fn check_conditions(&mut self) -> bool;

    /// Fired when the dwell timer completes (or every tick under rapid activation).
    fn activate(&mut self);

    /// Fired once when gaze leaves a target that had been activated.
    fn deactivate(&mut self);
}

/// Shared handle to an activatable component.
///
/// The scene owns its components; the controller keeps a clone of the last
/// hit's handles so it can still deactivate them after gaze has moved away.
pub type ActivatableHandle = Rc<RefCell<dyn Activatable>>;

/// Ordered set of activatables attached to one target. Empty means inert.
pub type ActivatableSet = Vec<ActivatableHandle>;

/// Wrap a component into an [`ActivatableHandle`].
pub fn shared<A: Activatable + 'static>(activatable: A) -> ActivatableHandle {
    Rc::new(RefCell::new(activatable))
}

/// True when at least one component reports its conditions as met.
pub fn any_conditions_met(set: &[ActivatableHandle]) -> bool {
    set.iter().any(|a| a.borrow_mut().check_conditions())
}

/// Activate every component whose own conditions hold right now.
///
/// Conditions are re-read here rather than reused from [`any_conditions_met`].
/// Returns the number of components activated.
pub fn dispatch_activate(set: &[ActivatableHandle]) -> usize {
    let mut fired = 0;
    for activatable in set {
        let mut activatable = activatable.borrow_mut();
        if activatable.check_conditions() {
            activatable.activate();
            fired += 1;
        }
    }
    fired
}

/// Deactivate every component in the set. Returns the number notified.
pub fn dispatch_deactivate(set: &[ActivatableHandle]) -> usize {
    for activatable in set {
        activatable.borrow_mut().deactivate();
    }
    set.len()
}
