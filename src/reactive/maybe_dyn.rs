use std::rc::Rc;

use super::signal::Signal;

/// A value that can be either static or dynamic (reactive).
/// This allows widget properties to accept both plain values and signals.
pub enum MaybeDyn<T: 'static> {
    Static(T),
    Dynamic(Rc<dyn Fn() -> T>),
}

impl<T: Clone + 'static> MaybeDyn<T> {
    /// Get the current value. If dynamic, this calls the getter.
    pub fn get(&self) -> T {
        match self {
            MaybeDyn::Static(v) => v.clone(),
            MaybeDyn::Dynamic(getter) => getter(),
        }
    }
}

impl<T: Clone + 'static> Clone for MaybeDyn<T> {
    fn clone(&self) -> Self {
        match self {
            MaybeDyn::Static(v) => MaybeDyn::Static(v.clone()),
            MaybeDyn::Dynamic(getter) => MaybeDyn::Dynamic(getter.clone()),
        }
    }
}

/// Trait for types that can be converted into `MaybeDyn<T>`
pub trait IntoMaybeDyn<T: Clone + 'static> {
    fn into_maybe_dyn(self) -> MaybeDyn<T>;
}

// No blanket impl for static values: it would overlap with the closure impl below.

impl IntoMaybeDyn<f32> for f32 {
    fn into_maybe_dyn(self) -> MaybeDyn<f32> {
        MaybeDyn::Static(self)
    }
}

impl IntoMaybeDyn<f32> for f64 {
    fn into_maybe_dyn(self) -> MaybeDyn<f32> {
        MaybeDyn::Static(self as f32)
    }
}

// Whole-number bounds: max(1), max(100)
impl IntoMaybeDyn<f32> for i32 {
    fn into_maybe_dyn(self) -> MaybeDyn<f32> {
        MaybeDyn::Static(self as f32)
    }
}

impl IntoMaybeDyn<f32> for u32 {
    fn into_maybe_dyn(self) -> MaybeDyn<f32> {
        MaybeDyn::Static(self as f32)
    }
}

impl<T, F> IntoMaybeDyn<T> for F
where
    T: Clone + 'static,
    F: Fn() -> T + 'static,
{
    fn into_maybe_dyn(self) -> MaybeDyn<T> {
        MaybeDyn::Dynamic(Rc::new(self))
    }
}

impl<T: Clone + 'static> IntoMaybeDyn<T> for Signal<T> {
    fn into_maybe_dyn(self) -> MaybeDyn<T> {
        MaybeDyn::Dynamic(Rc::new(move || self.get()))
    }
}

impl<T: Clone + 'static> IntoMaybeDyn<T> for &Signal<T> {
    fn into_maybe_dyn(self) -> MaybeDyn<T> {
        self.clone().into_maybe_dyn()
    }
}

impl<T: Clone + 'static> IntoMaybeDyn<T> for MaybeDyn<T> {
    fn into_maybe_dyn(self) -> MaybeDyn<T> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::signal::create_signal;

    #[test]
    fn test_float_is_static() {
        let value: MaybeDyn<f32> = 0.4f32.into_maybe_dyn();
        assert!(matches!(value, MaybeDyn::Static(v) if v == 0.4));
    }

    #[test]
    fn test_integer_into_f32() {
        let value: MaybeDyn<f32> = 100i32.into_maybe_dyn();
        assert_eq!(value.get(), 100.0);
    }

    #[test]
    fn test_closure_is_reevaluated() {
        let signal = create_signal(0.1f32);
        let reader = signal.clone();
        let value: MaybeDyn<f32> = (move || reader.get() * 2.0).into_maybe_dyn();
        assert_eq!(value.get(), 0.2);

        signal.set(0.3);
        assert_eq!(value.get(), 0.6);
    }

    #[test]
    fn test_signal_reference_tracks_updates() {
        let signal = create_signal(0.5f32);
        let value: MaybeDyn<f32> = (&signal).into_maybe_dyn();
        assert!(matches!(value, MaybeDyn::Dynamic(_)));

        signal.set(0.75);
        assert_eq!(value.get(), 0.75);
    }
}
