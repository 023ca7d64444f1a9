use serde::Deserialize;

use crate::error::CoreError;
use crate::types::UpstreamBlock;

#[derive(Deserialize)]
struct BlockHeightResponse {
    blocks: Vec<serde_json::Value>,
}

/// Extract the first block from a `block-height/{h}?format=json` body.
///
/// Heights can hold several blocks during a reorg; the provider lists the
/// main-chain block first.
pub fn parse_block_height_body(body: &str) -> Result<UpstreamBlock, CoreError> {
    let response: BlockHeightResponse = serde_json::from_str(body)
        .map_err(|e| CoreError::InvalidBlockData(format!("decode block-height response: {e}")))?;

    let first = response
        .blocks
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::InvalidBlockData("response contains no blocks".into()))?;

    serde_json::from_value(first)
        .map_err(|e| CoreError::InvalidBlockData(format!("invalid block entry: {e}")))
}
