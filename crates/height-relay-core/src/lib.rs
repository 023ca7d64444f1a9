pub mod error;
pub mod provider;
pub mod store;
pub mod types;

pub use error::CoreError;
pub use types::{BlockHeightRecord, BlockInfo};
