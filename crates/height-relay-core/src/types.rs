//! Shared domain types for the height store and the upstream provider.
//!
//! Only [`BlockHeightRecord`] is ever persisted. Everything else is passed
//! through from the provider and reshaped for clients.

use serde::{Deserialize, Serialize};

// ==============================================================================
// Stored Record
// ==============================================================================

/// The singleton "current height" record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeightRecord {
    pub height: u64,
}

/// What `replace` did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The store was empty and a record was created.
    Created,
    /// An existing record was overwritten.
    Replaced,
}

// ==============================================================================
// Provider Pass-Through
// ==============================================================================

/// A plaintext upstream body, forwarded byte-for-byte together with its
/// content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainText {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// One entry of the upstream `blocks` array. Fields we do not forward
/// (notably the `tx` list) are dropped during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamBlock {
    pub hash: String,
    pub ver: i64,
    pub prev_block: String,
    pub mrkl_root: String,
    pub time: u64,
    pub bits: u64,
    pub nonce: u64,
    pub height: u64,
    #[serde(default)]
    pub next_block: Vec<String>,
}

// ==============================================================================
// Block Info Response
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockHeader {
    pub version: i64,
    pub previous_hash: String,
    pub merkle_root: String,
    pub time: u64,
    pub bits: u64,
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSummary {
    pub hash: String,
    pub prev_block: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_block: Option<String>,
    /// Echoed from the caller, never fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<serde_json::Value>,
    pub height: u64,
}

/// Block header plus chain-position info, as served by `/block-info/{height}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockInfo {
    pub header: BlockHeader,
    pub info: BlockSummary,
}

impl BlockInfo {
    pub fn from_upstream(block: UpstreamBlock, difficulty: Option<serde_json::Value>) -> Self {
        let next_block = block.next_block.into_iter().next();
        Self {
            header: BlockHeader {
                version: block.ver,
                previous_hash: block.prev_block.clone(),
                merkle_root: block.mrkl_root,
                time: block.time,
                bits: block.bits,
                nonce: block.nonce,
            },
            info: BlockSummary {
                hash: block.hash,
                prev_block: block.prev_block,
                next_block,
                difficulty,
                height: block.height,
            },
        }
    }
}
