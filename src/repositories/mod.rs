pub mod memory_repo;
pub mod sqlite_repo;

pub use memory_repo::*;
pub use sqlite_repo::*;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Replaceable key-value backend for learner state. What the browser kept in
/// local storage lives behind this seam instead.
#[cfg_attr(test, mockall::automock)]
pub trait StateStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
