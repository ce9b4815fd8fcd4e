//! Assignment store and storage backends for Agendabot.

pub mod in_memory;
pub mod json_file;
pub mod store;

pub use in_memory::InMemoryStorage;
pub use json_file::JsonFileStorage;
pub use store::AgendaStore;
