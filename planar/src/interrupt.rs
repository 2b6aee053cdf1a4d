use crate::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation handle.
///
/// An `Interrupt` can be installed on the long-running operations (noding,
/// overlay); their inner loops poll it and abort with [`Error::Interrupted`]
/// once raised. Cloning shares the flag. There is no global interrupt state:
/// every operation owns the handle it was given.
#[derive(Clone, Debug, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Interrupt::default()
    }

    /// Request cancellation; observed at the next poll point.
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> Result<(), Error> {
        if self.is_requested() {
            Err(Error::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Poll an optional interrupt handle.
pub(crate) fn check_interrupt(interrupt: Option<&Interrupt>) -> Result<(), Error> {
    match interrupt {
        Some(interrupt) => interrupt.check(),
        None => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn raised_flag_is_observed() {
        let interrupt = Interrupt::new();
        assert!(interrupt.check().is_ok());
        let clone = interrupt.clone();
        clone.request();
        assert_eq!(interrupt.check(), Err(Error::Interrupted));
    }
}
