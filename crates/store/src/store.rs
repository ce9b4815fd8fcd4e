//! The assignment store: the live agenda plus the backend it is saved to.
//!
//! Loaded once at startup, written back in full after every successful
//! mutation. Reads never touch the backend.

use agendabot_core::agenda::{Agenda, Assignment};
use agendabot_core::date::DueDate;
use agendabot_core::error::StoreError;
use agendabot_core::storage::AgendaStorage;
use tracing::{info, warn};

pub struct AgendaStore {
    agenda: Agenda,
    storage: Box<dyn AgendaStorage>,
}

impl AgendaStore {
    /// Load the agenda from `storage`.
    ///
    /// An unreadable or corrupt store is logged and replaced by an empty
    /// agenda; it never fails the caller.
    pub fn open(storage: Box<dyn AgendaStorage>) -> Self {
        let agenda = match storage.load() {
            Ok(agenda) => agenda,
            Err(e) => {
                warn!(backend = storage.name(), error = %e, "Could not load agenda, starting empty");
                Agenda::new()
            }
        };
        info!(
            backend = storage.name(),
            subjects = agenda.subject_count(),
            assignments = agenda.len(),
            "Agenda loaded"
        );
        Self { agenda, storage }
    }

    /// Append an assignment under `subject` and persist.
    ///
    /// The only failure is the write itself, in which case the agenda is
    /// left as it was before the call.
    pub fn add(
        &mut self,
        subject: &str,
        description: &str,
        date: DueDate,
    ) -> Result<(), StoreError> {
        let previous = self.agenda.clone();
        self.agenda.add(subject, Assignment::new(description, date));
        self.commit(previous)?;
        info!(subject, description, date = %date, "Assignment added");
        Ok(())
    }

    /// Remove the first case-insensitive match of `description` under
    /// `subject` and persist. Nothing is written when nothing matched, and
    /// a failed write puts the assignment back.
    pub fn remove(&mut self, subject: &str, description: &str) -> Result<Assignment, StoreError> {
        let previous = self.agenda.clone();
        let removed = self.agenda.remove(subject, description)?;
        self.commit(previous)?;
        info!(subject, description = %removed.description, "Assignment removed");
        Ok(removed)
    }

    /// Persist the current agenda, or roll back to `previous` if the write fails.
    fn commit(&mut self, previous: Agenda) -> Result<(), StoreError> {
        if let Err(e) = self.persist() {
            warn!(backend = self.storage.name(), error = %e, "Write failed, change rolled back");
            self.agenda = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Read-only view of the whole agenda.
    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    /// Write the whole agenda to the backend.
    pub fn persist(&self) -> Result<(), StoreError> {
        self.storage.persist(&self.agenda)?;
        Ok(())
    }

    pub fn backend(&self) -> &str {
        self.storage.name()
    }
}
