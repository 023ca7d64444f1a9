use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::types::{BlockHeightRecord, ReplaceOutcome};

use super::{closed_error, HeightStore};

struct Slot {
    record: Option<BlockHeightRecord>,
    closed: bool,
}

/// Process-local store. Contents are lost on restart.
pub struct MemoryStore {
    slot: RwLock<Slot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(Slot {
                record: None,
                closed: false,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HeightStore for MemoryStore {
    async fn current(&self) -> Result<Option<BlockHeightRecord>, CoreError> {
        let slot = self.slot.read().await;
        if slot.closed {
            return Err(closed_error());
        }
        Ok(slot.record)
    }

    async fn replace(&self, height: u64) -> Result<ReplaceOutcome, CoreError> {
        let mut slot = self.slot.write().await;
        if slot.closed {
            return Err(closed_error());
        }
        let outcome = match slot.record {
            Some(_) => ReplaceOutcome::Replaced,
            None => ReplaceOutcome::Created,
        };
        slot.record = Some(BlockHeightRecord { height });
        Ok(outcome)
    }

    async fn update(&self, height: u64) -> Result<Option<BlockHeightRecord>, CoreError> {
        let mut slot = self.slot.write().await;
        if slot.closed {
            return Err(closed_error());
        }
        Ok(slot.record.as_mut().map(|record| {
            record.height = height;
            *record
        }))
    }

    async fn close(&self) -> Result<(), CoreError> {
        self.slot.write().await.closed = true;
        Ok(())
    }
}
