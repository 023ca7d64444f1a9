//! Upstream chain-data provider abstraction.
//!
//! Defines the [`HeightProvider`] trait and an HTTP implementation
//! ([`HttpProvider`]) for blockchain.info-compatible endpoints.

mod http;
mod parsing;

pub use http::HttpProvider;
pub use parsing::parse_block_height_body;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{PlainText, UpstreamBlock};

/// Read-only queries against the upstream provider. Each call is a single
/// outbound request; nothing is cached or retried.
#[async_trait]
pub trait HeightProvider: Send + Sync {
    /// Current block count, as the provider's raw body.
    async fn latest_height(&self) -> Result<PlainText, CoreError>;

    /// Current network difficulty, as the provider's raw body.
    async fn current_difficulty(&self) -> Result<PlainText, CoreError>;

    /// The first block the provider reports at `height`.
    async fn block_at_height(&self, height: u64) -> Result<UpstreamBlock, CoreError>;
}
