//! File-backed storage sink
//!
//! Stands in for the robot brain's SD card: tuning logs land as flat files
//! in a directory, one per run, ready for the plotting tool.

use std::fs;
use std::path::PathBuf;

use log::debug;

use pivot_core::traits::{StorageError, StorageSink};

use crate::error::SimError;

/// Directory-backed implementation of the storage contract.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (creating if needed) the output directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SimError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Absolute or relative path a given log name resolves to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl StorageSink for FileStorage {
    fn write(&mut self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        // a removed directory is the SD-card-pulled case
        if !self.dir.is_dir() {
            return Err(StorageError::NoMedium);
        }
        let path = self.path_for(name);
        fs::write(&path, data).map_err(|_| StorageError::WriteFailed)?;
        debug!("wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}
