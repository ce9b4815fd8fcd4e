//! # Agendabot Core
//!
//! Domain types, traits, and error definitions for the Agendabot homework
//! assistant. Other crates implement against what is defined here:
//! storage backends, the chat platform adapter, and the command dispatcher.
//!
//! - [`date`] — `dd/mm/yyyy` parsing and canonical due dates
//! - [`agenda`] — subjects and their assignment ledgers
//! - [`report`] — the chronological agenda table
//! - [`command`] — command schema and parsed commands

pub mod agenda;
pub mod command;
pub mod date;
pub mod error;
pub mod report;
pub mod storage;

// Re-export key types at crate root for ergonomics
pub use agenda::{Agenda, Assignment};
pub use command::{Command, CommandRegistrar, CommandSpec, OptionKind, OptionSpec};
pub use date::{Clock, DueDate, FixedClock, SystemClock};
pub use error::{ChannelError, CommandError, DateError, StorageError, StoreError};
pub use report::{RelativeDay, ReportRow};
pub use storage::AgendaStorage;
