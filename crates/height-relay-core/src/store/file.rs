use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::types::{BlockHeightRecord, ReplaceOutcome};

use super::{closed_error, HeightStore};

struct Document {
    record: Option<BlockHeightRecord>,
    closed: bool,
}

/// Store backed by a single JSON document (`{"height": n}`) on disk.
///
/// The document is read once on open and kept in memory; every mutation
/// rewrites it through a temporary sibling file and a rename. The in-memory
/// copy only changes after the write has landed.
pub struct FileStore {
    path: PathBuf,
    doc: RwLock<Document>,
}

impl FileStore {
    /// Open (or prepare) the document at `path`. A missing file is an empty
    /// store; an unreadable or malformed one fails the open.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::Store(format!(
                    "create store directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let record = read_document(&path).await?;
        debug!(path = %path.display(), has_record = record.is_some(), "opened file store");

        Ok(Self {
            path,
            doc: RwLock::new(Document {
                record,
                closed: false,
            }),
        })
    }

    async fn persist(&self, record: BlockHeightRecord) -> Result<(), CoreError> {
        let content = serde_json::to_vec(&record)
            .map_err(|e| CoreError::Store(format!("encode height document: {e}")))?;

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        if let Err(e) = tokio::fs::write(&tmp_path, content).await {
            discard_tmp(&tmp_path).await;
            return Err(CoreError::Store(format!("write {}: {e}", tmp_path.display())));
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            discard_tmp(&tmp_path).await;
            return Err(CoreError::Store(format!("replace {}: {e}", self.path.display())));
        }
        Ok(())
    }
}

/// Best-effort removal of a temporary document left by a failed write.
async fn discard_tmp(tmp_path: &Path) {
    match tokio::fs::remove_file(tmp_path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %tmp_path.display(), error = %e, "failed to remove temporary document"),
    }
}

async fn read_document(path: &Path) -> Result<Option<BlockHeightRecord>, CoreError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(CoreError::Store(format!("read {}: {e}", path.display())));
        }
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| CoreError::Store(format!("malformed height document {}: {e}", path.display())))
}

#[async_trait]
impl HeightStore for FileStore {
    async fn current(&self) -> Result<Option<BlockHeightRecord>, CoreError> {
        let doc = self.doc.read().await;
        if doc.closed {
            return Err(closed_error());
        }
        Ok(doc.record)
    }

    async fn replace(&self, height: u64) -> Result<ReplaceOutcome, CoreError> {
        let mut doc = self.doc.write().await;
        if doc.closed {
            return Err(closed_error());
        }
        let record = BlockHeightRecord { height };
        self.persist(record).await?;

        let outcome = match doc.record.replace(record) {
            Some(_) => ReplaceOutcome::Replaced,
            None => ReplaceOutcome::Created,
        };
        Ok(outcome)
    }

    async fn update(&self, height: u64) -> Result<Option<BlockHeightRecord>, CoreError> {
        let mut doc = self.doc.write().await;
        if doc.closed {
            return Err(closed_error());
        }
        if doc.record.is_none() {
            return Ok(None);
        }
        let record = BlockHeightRecord { height };
        self.persist(record).await?;
        doc.record = Some(record);
        Ok(Some(record))
    }

    async fn close(&self) -> Result<(), CoreError> {
        self.doc.write().await.closed = true;
        debug!(path = %self.path.display(), "closed file store");
        Ok(())
    }
}
