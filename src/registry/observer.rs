//! Observer callback types
//!
//! Observers are plain closures. A closure may return `()` when it cannot
//! fail, or `Result<(), E>` for any displayable `E`; the [`ObserverOutcome`]
//! trait folds both into the form the fan-out loop inspects.

use std::rc::Rc;

use super::error::ObserverError;
use super::store::Registry;

/// Type-erased observer stored in a slot
pub(crate) type Observer<K, M> = Rc<dyn Fn(&Registry<K, M>, &M) -> Result<(), ObserverError>>;

/// Conversion from an observer's return value into a delivery outcome
pub trait ObserverOutcome {
    /// Convert into `Ok(())` on success or the observer's failure
    fn into_outcome(self) -> Result<(), ObserverError>;
}

impl ObserverOutcome for () {
    fn into_outcome(self) -> Result<(), ObserverError> {
        Ok(())
    }
}

impl<E: std::fmt::Display> ObserverOutcome for Result<(), E> {
    fn into_outcome(self) -> Result<(), ObserverError> {
        self.map_err(ObserverError::new)
    }
}
