//! Database backup management.
//!
//! Keeps one pristine copy of the database dump next to the file being
//! patched. A sidecar records hashes of the states we have seen, so a
//! re-run recognizes its own earlier output and never replaces the pristine
//! backup with an already-patched file.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sidecar metadata tracking which database states the backup has seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupState {
    /// Hash of the database when the backup was taken.
    pub pristine_hash: String,

    /// Hash of the database after the most recent patch run.
    pub patched_hash: String,
}

/// Backup paths and decisions for one database file.
pub struct DbBackup {
    db_path: PathBuf,
    backup_path: PathBuf,
    state_path: PathBuf,
}

impl DbBackup {
    /// Backup handling for the given database file. The backup lives next
    /// to it as `<name>.bak`, the sidecar as `<name>.bak.json`.
    pub fn for_database<P: AsRef<Path>>(db_path: P) -> Self {
        let db_path = db_path.as_ref().to_path_buf();
        let mut backup = db_path.as_os_str().to_os_string();
        backup.push(".bak");
        let mut state = backup.clone();
        state.push(".json");
        DbBackup {
            db_path,
            backup_path: PathBuf::from(backup),
            state_path: PathBuf::from(state),
        }
    }

    /// Where the backup copy lives.
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Make sure a pristine backup exists before the database is rewritten.
    ///
    /// A new backup is taken when none exists, or when the current file
    /// matches neither the recorded pristine state nor our own last output
    /// (the user swapped in a fresh dump). Returns whether a backup was
    /// written.
    pub fn ensure(&self) -> Result<bool, BackupError> {
        if !self.backup_path.exists() {
            self.take_backup()?;
            return Ok(true);
        }

        // Backup without a sidecar: keep it, it may be the only pristine copy.
        let Some(state) = self.read_state()? else {
            return Ok(false);
        };

        let current = hash_file(&self.db_path)?;
        if current == state.pristine_hash || current == state.patched_hash {
            return Ok(false);
        }

        self.take_backup()?;
        Ok(true)
    }

    /// Record the freshly written database as our own output.
    pub fn record_patched(&self) -> Result<(), BackupError> {
        let patched_hash = hash_file(&self.db_path)?;
        let state = match self.read_state()? {
            Some(mut state) => {
                state.patched_hash = patched_hash;
                state
            }
            None => BackupState {
                pristine_hash: patched_hash.clone(),
                patched_hash,
            },
        };
        self.write_state(&state)
    }

    fn take_backup(&self) -> Result<(), BackupError> {
        fs::copy(&self.db_path, &self.backup_path)?;
        let hash = hash_file(&self.db_path)?;
        self.write_state(&BackupState {
            pristine_hash: hash.clone(),
            patched_hash: hash,
        })
    }

    fn read_state(&self) -> Result<Option<BackupState>, BackupError> {
        if !self.state_path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.state_path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn write_state(&self, state: &BackupState) -> Result<(), BackupError> {
        fs::write(&self.state_path, serde_json::to_string_pretty(state)?)?;
        Ok(())
    }
}

/// SHA-256 of a file's contents, hex-encoded.
pub fn hash_file(path: &Path) -> Result<String, BackupError> {
    let data = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}
