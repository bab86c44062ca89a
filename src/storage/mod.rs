//! Storage
//!
//! Synchronous, string-valued key-value slots that outlive the process (or
//! page). The cart is written to a single key on every mutation.

use thiserror::Error;

pub mod file;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be mapped onto the backend (e.g. contains a path separator).
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend is not reachable (e.g. browser storage is disabled).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A key-value slot store.
///
/// Writes overwrite unconditionally; there is no compare-and-swap, so two
/// writers sharing a backend race with last-write-wins.
pub trait Storage: std::fmt::Debug {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
