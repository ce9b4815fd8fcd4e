//! File-based storage — the whole agenda as one pretty-printed JSON document.
//!
//! ```json
//! {
//!   "Math": [
//!     { "description": "Problem Set", "date": "2025-05-01" }
//!   ]
//! }
//! ```
//!
//! Every persist rewrites the full document. The new content goes to a
//! sibling `.tmp` file first and is renamed over the old one, so a crash
//! mid-write leaves the previous agenda intact.

use agendabot_core::agenda::Agenda;
use agendabot_core::error::StorageError;
use agendabot_core::storage::AgendaStorage;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A JSON file holding the agenda.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage at `path`. The file is created on first persist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "agenda.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, e: impl std::fmt::Display) -> StorageError {
        StorageError::Write {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

impl AgendaStorage for JsonFileStorage {
    fn name(&self) -> &str {
        "json"
    }

    fn load(&self) -> Result<Agenda, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No agenda file yet, starting empty");
                return Ok(Agenda::new());
            }
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| StorageError::Parse {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn persist(&self, agenda: &Agenda) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let content = serde_json::to_string_pretty(agenda).map_err(|e| self.write_error(e))?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, content).map_err(|e| self.write_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.write_error(e))?;

        debug!(
            path = %self.path.display(),
            subjects = agenda.subject_count(),
            "Agenda written"
        );
        Ok(())
    }
}
