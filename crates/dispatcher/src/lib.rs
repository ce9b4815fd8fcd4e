//! Command dispatcher for Agendabot.
//!
//! Turns parsed chat commands into store operations and reply texts. The
//! store sits behind an async mutex, so concurrent commands run one at a
//! time through their whole read, mutate, persist sequence.

pub mod replies;

use std::sync::Arc;

use agendabot_core::command::{self, Command, CommandRegistrar};
use agendabot_core::date::{self, Clock, SystemClock};
use agendabot_core::error::StoreError;
use agendabot_core::report;
use agendabot_store::AgendaStore;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub struct Dispatcher {
    store: Mutex<AgendaStore>,
    clock: Arc<dyn Clock>,
}

impl Dispatcher {
    /// Dispatcher over `store`, using the local calendar for "today".
    pub fn new(store: AgendaStore) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: AgendaStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(store),
            clock,
        }
    }

    /// Route a parsed command to its handler.
    pub async fn handle(&self, command: Command) -> String {
        match command {
            Command::Add {
                subject,
                description,
                date,
            } => self.handle_add(&subject, &description, &date).await,
            Command::Remove {
                subject,
                description,
            } => self.handle_remove(&subject, &description).await,
            Command::List => self.handle_list().await,
        }
    }

    /// `/add`: the confirmation echoes the date exactly as typed.
    pub async fn handle_add(&self, subject: &str, description: &str, date_text: &str) -> String {
        let due = match date::normalize(date_text) {
            Ok(due) => due,
            Err(e) => {
                info!(subject, date = date_text, error = %e, "Rejected malformed date");
                return replies::invalid_date(date_text, &e);
            }
        };

        let mut store = self.store.lock().await;
        match store.add(subject, description, due) {
            Ok(()) => replies::added(subject, description, date_text),
            Err(e) => {
                error!(error = %e, "Failed to persist agenda after add");
                replies::save_failed()
            }
        }
    }

    /// `/remove`
    pub async fn handle_remove(&self, subject: &str, description: &str) -> String {
        let mut store = self.store.lock().await;
        match store.remove(subject, description) {
            Ok(_) => replies::removed(subject, description),
            Err(StoreError::SubjectNotFound(_)) => replies::subject_not_found(subject),
            Err(StoreError::AssignmentNotFound { .. }) => {
                replies::assignment_not_found(subject, description)
            }
            Err(StoreError::Storage(e)) => {
                error!(error = %e, "Failed to persist agenda after remove");
                replies::save_failed()
            }
        }
    }

    /// `/list`: the agenda table in a code block, trimmed to the earliest
    /// rows when the whole table would not fit in one chat message.
    pub async fn handle_list(&self) -> String {
        let table = self.table().await;
        let message = replies::code_block(&table);
        let length = message.chars().count();
        if length <= replies::MESSAGE_LIMIT {
            return message;
        }
        warn!(
            length,
            limit = replies::MESSAGE_LIMIT,
            "Agenda does not fit in one message, trimming"
        );
        replies::trimmed_code_block(&table)
    }

    /// The full agenda table as of today, untrimmed.
    pub async fn table(&self) -> String {
        let store = self.store.lock().await;
        report::render(store.agenda(), self.clock.today())
    }

    /// Number of subjects currently on the agenda.
    pub async fn subject_count(&self) -> usize {
        self.store.lock().await.agenda().subject_count()
    }
}

/// Declare the command schema to the platform registry.
///
/// Failures are logged and reported as `false`; the bot keeps serving
/// whatever commands the platform already knows.
pub async fn register_schema(registrar: &dyn CommandRegistrar) -> bool {
    let schema = command::schema();
    info!(registry = registrar.name(), commands = schema.len(), "Registering commands");
    match registrar.register(&schema).await {
        Ok(()) => {
            info!(registry = registrar.name(), "Commands registered");
            true
        }
        Err(e) => {
            error!(registry = registrar.name(), error = %e, "Command registration failed");
            false
        }
    }
}
