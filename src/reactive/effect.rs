use super::runtime::{run_effect, with_runtime, EffectId};

/// A side effect that re-runs whenever a signal it read changes.
///
/// The effect runs once on creation. Dropping the handle disposes it.
pub struct Effect {
    id: EffectId,
}

impl Effect {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let id = with_runtime(|rt| rt.allocate_effect(Box::new(f)));
        run_effect(id);
        Self { id }
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        // Dropped after the borrow ends: captured signals release themselves
        let callback = with_runtime(|rt| rt.dispose_effect(self.id));
        drop(callback);
    }
}

pub fn create_effect<F>(f: F) -> Effect
where
    F: FnMut() + 'static,
{
    Effect::new(f)
}
