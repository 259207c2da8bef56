// src/error.rs
//
// Error taxonomy for shard bookkeeping. Per-store scrape failures are NOT
// represented here: the runner records them as data (see ShardResult) and
// never aborts a shard over one store.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShardError {
    /// Bad operator input, e.g. stores-per-shard of zero.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Shard ID outside the manifest's 1..=N range.
    #[error("shard {0} not found")]
    NotFound(u32),

    /// I/O failure reading or writing shard/result files.
    #[error("persistence failure: {0}")]
    Persistence(#[from] io::Error),

    /// Shard or manifest JSON that no longer parses.
    #[error("malformed shard data: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShardError>;
