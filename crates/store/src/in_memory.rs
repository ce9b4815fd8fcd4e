//! In-memory storage — useful for testing and ephemeral sessions.

use agendabot_core::agenda::Agenda;
use agendabot_core::error::StorageError;
use agendabot_core::storage::AgendaStorage;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Keeps the last persisted agenda in memory.
#[derive(Default)]
pub struct InMemoryStorage {
    agenda: Mutex<Agenda>,
    writes: AtomicUsize,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that starts out holding `agenda`.
    pub fn with_agenda(agenda: Agenda) -> Self {
        Self {
            agenda: Mutex::new(agenda),
            writes: AtomicUsize::new(0),
        }
    }

    /// Copy of what is currently stored.
    pub fn snapshot(&self) -> Agenda {
        self.agenda.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of persists so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl AgendaStorage for InMemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> Result<Agenda, StorageError> {
        Ok(self.snapshot())
    }

    fn persist(&self, agenda: &Agenda) -> Result<(), StorageError> {
        *self.agenda.lock().unwrap_or_else(|e| e.into_inner()) = agenda.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agendabot_core::agenda::Assignment;
    use agendabot_core::date::normalize;

    #[test]
    fn starts_empty() {
        let storage = InMemoryStorage::new();
        assert!(storage.load().unwrap().is_empty());
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn persist_replaces_snapshot() {
        let storage = InMemoryStorage::new();
        let mut agenda = Agenda::new();
        agenda.add("Math", Assignment::new("Essay", normalize("01/05/2025").unwrap()));

        storage.persist(&agenda).unwrap();
        assert_eq!(storage.load().unwrap(), agenda);
        assert_eq!(storage.writes(), 1);
    }
}
