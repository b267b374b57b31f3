use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

pub type SignalId = usize;
pub type EffectId = usize;

/// Signal ids are unique across threads, so a signal created on one thread
/// is never mistaken for another thread's signal.
static NEXT_SIGNAL_ID: AtomicUsize = AtomicUsize::new(0);

/// Bookkeeping for one effect: its callback and the signals it read during
/// its last run. The callback is taken out of the slot while it runs so the
/// runtime is not borrowed across user code.
#[derive(Default)]
struct EffectSlot {
    callback: Option<Box<dyn FnMut()>>,
    dependencies: HashSet<SignalId>,
    running: bool,
    disposed: bool,
}

type Callback = Box<dyn FnMut()>;

#[derive(Default)]
pub struct Runtime {
    current_effect: Option<EffectId>,
    effects: Vec<EffectSlot>,
    /// Disposed slots that are not running and can be handed out again
    free_effects: Vec<EffectId>,
    /// Only signals created on this thread have an entry
    signal_subscribers: HashMap<SignalId, HashSet<EffectId>>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_signal(&mut self) -> SignalId {
        let id = NEXT_SIGNAL_ID.fetch_add(1, Ordering::Relaxed);
        self.signal_subscribers.insert(id, HashSet::new());
        id
    }

    /// Forget a dropped signal. Effects that read it lose the dependency.
    pub fn dispose_signal(&mut self, signal_id: SignalId) {
        let Some(subscribers) = self.signal_subscribers.remove(&signal_id) else {
            return;
        };
        for effect_id in subscribers {
            if let Some(slot) = self.effects.get_mut(effect_id) {
                slot.dependencies.remove(&signal_id);
            }
        }
    }

    pub fn allocate_effect(&mut self, callback: Callback) -> EffectId {
        let slot = EffectSlot {
            callback: Some(callback),
            ..Default::default()
        };
        match self.free_effects.pop() {
            Some(id) => {
                self.effects[id] = slot;
                id
            }
            None => {
                self.effects.push(slot);
                self.effects.len() - 1
            }
        }
    }

    fn track_read(&mut self, signal_id: SignalId) {
        let Some(effect_id) = self.current_effect else {
            return;
        };
        // Signals created on another thread have no entry here
        if let Some(subscribers) = self.signal_subscribers.get_mut(&signal_id) {
            subscribers.insert(effect_id);
            self.effects[effect_id].dependencies.insert(signal_id);
        }
    }

    fn subscribers_of(&self, signal_id: SignalId) -> Vec<EffectId> {
        self.signal_subscribers
            .get(&signal_id)
            .map(|subs| subs.iter().copied().collect())
            .unwrap_or_default()
    }

    fn unsubscribe(&mut self, effect_id: EffectId, dependencies: HashSet<SignalId>) {
        for signal_id in dependencies {
            if let Some(subscribers) = self.signal_subscribers.get_mut(&signal_id) {
                subscribers.remove(&effect_id);
            }
        }
    }

    fn begin_effect(&mut self, effect_id: EffectId) -> Option<(Callback, Option<EffectId>)> {
        let slot = self.effects.get_mut(effect_id)?;
        // None while the effect is already running or after disposal
        let callback = slot.callback.take()?;
        slot.running = true;
        let dependencies = std::mem::take(&mut slot.dependencies);
        self.unsubscribe(effect_id, dependencies);

        let prev_effect = self.current_effect.replace(effect_id);
        Some((callback, prev_effect))
    }

    /// Put the callback back, or hand it back to the caller to drop outside
    /// the runtime borrow when the effect was disposed while running.
    fn finish_effect(
        &mut self,
        effect_id: EffectId,
        callback: Callback,
        prev_effect: Option<EffectId>,
    ) -> Option<Callback> {
        self.current_effect = prev_effect;
        let slot = &mut self.effects[effect_id];
        slot.running = false;
        if slot.disposed {
            self.free_effects.push(effect_id);
            Some(callback)
        } else {
            slot.callback = Some(callback);
            None
        }
    }

    /// Dispose an effect. The returned callback must be dropped by the
    /// caller once the runtime is released: it may own signals whose drop
    /// needs the runtime.
    pub fn dispose_effect(&mut self, effect_id: EffectId) -> Option<Callback> {
        let slot = self.effects.get_mut(effect_id)?;
        if slot.disposed {
            return None;
        }
        slot.disposed = true;
        let callback = slot.callback.take();
        let dependencies = std::mem::take(&mut slot.dependencies);
        let running = slot.running;
        self.unsubscribe(effect_id, dependencies);
        if !running {
            self.free_effects.push(effect_id);
        }
        callback
    }

    pub fn effect_slots(&self) -> usize {
        self.effects.len()
    }

    pub fn signal_count(&self) -> usize {
        self.signal_subscribers.len()
    }
}

pub fn with_runtime<F, R>(f: F) -> R
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Access the runtime if it is not already borrowed.
///
/// Returns None instead of panicking when the runtime is busy or already
/// destroyed, so signal access stays safe from any context.
pub fn try_with_runtime<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Runtime) -> R,
{
    // try_with: signals owned by effects may drop while the thread-local is torn down
    RUNTIME
        .try_with(|rt| rt.try_borrow_mut().ok().map(|mut runtime| f(&mut runtime)))
        .ok()
        .flatten()
}

/// Record that the running effect (if any) depends on `signal_id`.
pub fn track_read(signal_id: SignalId) {
    try_with_runtime(|rt| rt.track_read(signal_id));
}

/// Re-run every effect subscribed to `signal_id`.
pub fn notify_write(signal_id: SignalId) {
    let pending = try_with_runtime(|rt| rt.subscribers_of(signal_id)).unwrap_or_default();
    for effect_id in pending {
        run_effect(effect_id);
    }
}

/// Run an effect with dependency tracking, outside of any runtime borrow.
pub fn run_effect(effect_id: EffectId) {
    let Some((mut callback, prev_effect)) =
        try_with_runtime(|rt| rt.begin_effect(effect_id)).flatten()
    else {
        return;
    };
    callback();
    let leftover =
        try_with_runtime(|rt| rt.finish_effect(effect_id, callback, prev_effect)).flatten();
    drop(leftover);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{create_effect, create_signal};

    #[test]
    fn test_dropped_signal_frees_its_entry() {
        let before = with_runtime(|rt| rt.signal_count());
        let signal = create_signal(0.5f32);
        let copy = signal.clone();
        assert_eq!(with_runtime(|rt| rt.signal_count()), before + 1);

        drop(signal);
        assert_eq!(with_runtime(|rt| rt.signal_count()), before + 1);
        drop(copy);
        assert_eq!(with_runtime(|rt| rt.signal_count()), before);
    }

    #[test]
    fn test_disposed_effect_slots_are_reused() {
        let value = create_signal(0);
        let first = {
            let reader = value.clone();
            create_effect(move || {
                reader.get();
            })
        };
        drop(first);
        let slots = with_runtime(|rt| rt.effect_slots());

        for _ in 0..8 {
            let reader = value.clone();
            let effect = create_effect(move || {
                reader.get();
            });
            drop(effect);
        }
        assert_eq!(with_runtime(|rt| rt.effect_slots()), slots);
    }

    #[test]
    fn test_effect_dropping_its_signal_releases_entry() {
        let before = with_runtime(|rt| rt.signal_count());
        let owned = create_signal(1);
        let effect = create_effect(move || {
            owned.get();
        });
        drop(effect);
        assert_eq!(with_runtime(|rt| rt.signal_count()), before);
    }
}
