//! Save-game serialization.
//!
//! A save is the full `WorldState` snapshot wrapped with the crate
//! version and a wall-clock timestamp. Loading ignores the timestamp;
//! the version is logged when it differs from the running build.

use crate::state::WorldState;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to access save file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize save: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: String,
    /// Seconds since the Unix epoch at save time.
    pub timestamp: u64,
    pub state: WorldState,
}

impl SaveGame {
    pub fn new(state: WorldState) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp,
            state,
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), SaveError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved turn {} to {}", self.state.turn, path.display());
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, SaveError> {
        let json = std::fs::read_to_string(path)?;
        let save: SaveGame = serde_json::from_str(&json)?;
        if save.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Save was written by version {}, running {}",
                save.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        Ok(save)
    }
}
