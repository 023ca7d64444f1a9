//! Singleton block-height storage.
//!
//! Defines the [`HeightStore`] trait and two backends: an in-memory store
//! ([`MemoryStore`]) and a JSON document on disk ([`FileStore`]). Both hold
//! the record in a single slot, so replacing it is one upsert and there is
//! never more than one record to reconcile.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{BlockHeightRecord, ReplaceOutcome};

/// Operations on the one "current height" record.
#[async_trait]
pub trait HeightStore: Send + Sync {
    /// The stored record, or `None` if nothing has been written yet.
    async fn current(&self) -> Result<Option<BlockHeightRecord>, CoreError>;

    /// Create the record if absent, overwrite it otherwise.
    async fn replace(&self, height: u64) -> Result<ReplaceOutcome, CoreError>;

    /// Set `height` on the existing record. Returns `None` and creates
    /// nothing when the store is empty.
    async fn update(&self, height: u64) -> Result<Option<BlockHeightRecord>, CoreError>;

    /// Release the backend. Every later call fails with a store error.
    async fn close(&self) -> Result<(), CoreError>;
}

// ==============================================================================
// Connection URI
// ==============================================================================

/// Where the store lives, parsed from a connection URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

impl StoreLocation {
    /// Accepts `memory://`, `file://<path>`, or a bare filesystem path.
    pub fn parse(uri: &str) -> Result<Self, CoreError> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(CoreError::Store("store URI must not be empty".to_owned()));
        }

        match uri.split_once("://") {
            Some(("memory", rest)) if rest.is_empty() => Ok(Self::Memory),
            Some(("memory", rest)) => Err(CoreError::Store(format!(
                "memory store URI takes no location, got `{rest}`"
            ))),
            Some(("file", "")) => Err(CoreError::Store(
                "file store URI is missing a path".to_owned(),
            )),
            Some(("file", path)) => Ok(Self::File(PathBuf::from(path))),
            Some((scheme, _)) => Err(CoreError::Store(format!(
                "unsupported store URI scheme `{scheme}`"
            ))),
            None => Ok(Self::File(PathBuf::from(uri))),
        }
    }
}

/// Connect to the store named by `uri`.
pub async fn open_store(uri: &str) -> Result<Arc<dyn HeightStore>, CoreError> {
    match StoreLocation::parse(uri)? {
        StoreLocation::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreLocation::File(path) => Ok(Arc::new(FileStore::open(path).await?)),
    }
}

fn closed_error() -> CoreError {
    CoreError::Store("store is closed".to_owned())
}
