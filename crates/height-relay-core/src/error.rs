#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("store failure: {0}")]
    Store(String),

    #[error("upstream provider failure: {0}")]
    Provider(String),

    #[error("invalid block data: {0}")]
    InvalidBlockData(String),
}
