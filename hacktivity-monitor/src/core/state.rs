/*!
Flat-file persistence for the disclosure snapshot
*/

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::report::Snapshot;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Owns the snapshot file between runs. The file's absence signals a first
/// run; a corrupt file aborts the run instead of silently starting over.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<Snapshot, StateError> {
        if !self.path.exists() {
            debug!("No state file at {:?}, treating as first run", self.path);
            return Ok(Snapshot::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Overwrite the state file with the full snapshot, pretty-printed.
    /// Best effort only: no atomic rename, no fsync.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StateError> {
        let contents = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, contents)?;
        info!("Stored {} entries to {:?}", snapshot.len(), self.path);
        Ok(())
    }
}
