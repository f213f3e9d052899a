//! Outcome slots: where an enclosing function keeps the error it will return

/// A caller-owned location holding the error a function will return
///
/// Implemented for `Result<T, E>`, the usual shape of a return value under
/// construction, and for `Option<E>`, a bare "error or none" slot.
pub trait OutcomeSlot {
    type Error;

    /// Whether the slot already holds an error
    fn has_failed(&self) -> bool;

    /// Store `error` in the slot, replacing whatever it held
    fn fail(&mut self, error: Self::Error);
}

impl<T, E> OutcomeSlot for Result<T, E> {
    type Error = E;

    fn has_failed(&self) -> bool {
        self.is_err()
    }

    fn fail(&mut self, error: E) {
        *self = Err(error);
    }
}

impl<E> OutcomeSlot for Option<E> {
    type Error = E;

    fn has_failed(&self) -> bool {
        self.is_some()
    }

    fn fail(&mut self, error: E) {
        *self = Some(error);
    }
}
