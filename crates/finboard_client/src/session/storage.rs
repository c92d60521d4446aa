use std::path::PathBuf;

use finboard_core::domain::User;
use finboard_core::paths;
use log::warn;
use serde::{Deserialize, Serialize};

/// The only session fields that survive a process restart. Everything else
/// is recomputed at bootstrap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user: Option<User>,
    pub token: Option<String>,
}

/// Durable home of the session record, one fixed path per process.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(path: PathBuf) -> Self {
        SessionStorage { path }
    }

    pub fn at_default_location() -> Self {
        Self::new(paths::session_json_path())
    }

    /// A missing record loads as `None`; a corrupt one is discarded with a
    /// warning so bootstrap degrades to the anonymous path.
    pub fn load(&self) -> Option<SessionRecord> {
        if !self.path.exists() {
            return None;
        }
        match paths::load_json::<SessionRecord>(&self.path) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Discarding unreadable session record: {err}");
                None
            }
        }
    }

    /// Best effort: the in-memory session is authoritative, so a persistence
    /// fault is logged rather than failing the mutation that triggered it.
    pub fn save(&self, record: &SessionRecord) {
        if let Err(err) = paths::save_json(&self.path, record) {
            warn!("Failed to persist session record: {err}");
        }
    }
}
