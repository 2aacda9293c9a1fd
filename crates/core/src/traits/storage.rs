//! Storage sink contract
//!
//! Tuning logs are flushed as a single whole-buffer, append-once write at
//! loop exit. If the write fails the rows already encoded in memory are
//! still owned by the recorder; only the persisted copy is lost.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// Errors from flushing a log to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// No storage medium present (e.g. SD card not inserted)
    NoMedium,
    /// Medium present but the write failed
    WriteFailed,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NoMedium => write!(f, "no storage medium present"),
            StorageError::WriteFailed => write!(f, "storage write failed"),
        }
    }
}

impl core::error::Error for StorageError {}

/// Whole-buffer, append-once storage for named flat files.
pub trait StorageSink {
    /// Writes `data` as the complete content of `name`.
    fn write(&mut self, name: &str, data: &[u8]) -> Result<(), StorageError>;
}

/// In-memory sink for host tests. Keeps every written file by name.
#[derive(Default)]
pub struct MemorySink {
    files: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of the most recent write under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Number of writes performed.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl StorageSink for MemorySink {
    fn write(&mut self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        self.files.push((name.to_string(), data.to_vec()));
        Ok(())
    }
}
