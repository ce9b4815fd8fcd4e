pub mod agenda;
pub mod doctor;
pub mod register;
pub mod serve;

use agendabot_config::AppConfig;
use agendabot_core::storage::AgendaStorage;
use agendabot_dispatcher::Dispatcher;
use agendabot_store::{AgendaStore, InMemoryStorage, JsonFileStorage};

pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Open the configured agenda and wrap it in a dispatcher.
pub fn open_dispatcher(config: &AppConfig, ephemeral: bool) -> Dispatcher {
    let storage: Box<dyn AgendaStorage> = if ephemeral {
        Box::new(InMemoryStorage::new())
    } else {
        Box::new(JsonFileStorage::new(config.storage.path.clone()))
    };
    Dispatcher::new(AgendaStore::open(storage))
}
