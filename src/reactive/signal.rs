use std::sync::{Arc, RwLock};

use super::invalidation::request_frame;
use super::runtime::{notify_write, track_read, try_with_runtime, with_runtime, SignalId};

struct SignalInner<T> {
    id: SignalId,
    value: RwLock<T>,
}

impl<T> Drop for SignalInner<T> {
    fn drop(&mut self) {
        // Dropping on another thread finds no entry there
        try_with_runtime(|rt| rt.dispose_signal(self.id));
    }
}

/// A reactive value owned by the host.
///
/// A slider never writes its value signal itself: it reports proposed values
/// through its callbacks and the host decides whether to `set` them.
///
/// # Thread Safety
/// Values can be read and written from any thread. Effects only run on the
/// thread that created the signal; writes from elsewhere update the value
/// and request a frame, and the next render picks the new value up.
#[derive(Clone)]
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        let id = with_runtime(|rt| rt.allocate_signal());
        Self {
            inner: Arc::new(SignalInner {
                id,
                value: RwLock::new(value),
            }),
        }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        track_read(self.inner.id);
        self.with_untracked(f)
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        match self.inner.value.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

impl<T: PartialEq> Signal<T> {
    /// Sets the signal's value, only notifying when the value actually changed.
    pub fn set(&self, value: T) {
        let Ok(mut guard) = self.inner.value.write() else {
            return; // Lock poisoned, skip update silently
        };
        if *guard != value {
            *guard = value;
            drop(guard);
            self.changed();
        }
    }

    fn changed(&self) {
        notify_write(self.inner.id);
        request_frame();
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Updates the value in place, only notifying when it changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let Ok(mut guard) = self.inner.value.write() else {
            return;
        };
        let old_value = guard.clone();
        f(&mut guard);
        if *guard != old_value {
            drop(guard);
            self.changed();
        }
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_updates_value() {
        let signal = create_signal(0.5f32);
        signal.set(0.8);
        assert_eq!(signal.get(), 0.8);
    }

    #[test]
    fn test_update_with_closure() {
        let signal = create_signal(0.25f32);
        signal.update(|v| *v += 0.25);
        assert_eq!(signal.get(), 0.5);
    }

    #[test]
    fn test_clone_shares_underlying_value() {
        let host = create_signal(0.1f32);
        let widget_side = host.clone();
        host.set(0.9);
        assert_eq!(widget_side.get_untracked(), 0.9);
    }

    #[test]
    fn test_with_borrows_value() {
        let signal = create_signal(String::from("seek"));
        assert_eq!(signal.with(|s| s.len()), 4);
    }

    #[test]
    fn test_set_from_background_thread() {
        let signal = create_signal(0.0f32);
        let remote = signal.clone();
        std::thread::spawn(move || remote.set(0.6))
            .join()
            .expect("writer thread panicked");
        assert_eq!(signal.get(), 0.6);
    }

    #[test]
    fn test_signal_from_other_thread_does_not_wake_local_effects() {
        use std::cell::Cell;
        use std::rc::Rc;

        use crate::reactive::create_effect;

        let local = create_signal(0);
        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        let reader = local.clone();
        let _effect = create_effect(move || {
            reader.get();
            runs_clone.set(runs_clone.get() + 1);
        });

        let foreign = std::thread::spawn(|| create_signal(0))
            .join()
            .expect("creator thread panicked");
        foreign.set(5);

        assert_eq!(foreign.get(), 5);
        assert_eq!(runs.get(), 1);

        local.set(1);
        assert_eq!(runs.get(), 2);
    }
}
