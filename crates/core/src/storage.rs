//! Storage trait — where the agenda lives between runs.
//!
//! A backend loads and replaces the whole agenda at once; there is no
//! incremental log.

use crate::agenda::Agenda;
use crate::error::StorageError;

pub trait AgendaStorage: Send + Sync {
    /// Backend name (e.g., "json", "memory").
    fn name(&self) -> &str;

    /// Read the full agenda. A missing store is an empty agenda, not an error.
    fn load(&self) -> Result<Agenda, StorageError>;

    /// Overwrite the stored agenda with `agenda`.
    fn persist(&self, agenda: &Agenda) -> Result<(), StorageError>;
}

impl<T: AgendaStorage + ?Sized> AgendaStorage for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self) -> Result<Agenda, StorageError> {
        (**self).load()
    }

    fn persist(&self, agenda: &Agenda) -> Result<(), StorageError> {
        (**self).persist(agenda)
    }
}
