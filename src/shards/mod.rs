// src/shards/mod.rs
//
// Shard bookkeeping: partition the store list into fixed-size batches,
// persist them under shards/, and answer questions about the current set.
// The manifest is a derived cache over the shard files, never the sole
// source of truth (see catalog::rebuild_manifest).

pub mod catalog;
pub mod planner;

use serde::{Deserialize, Serialize};

use crate::store::Store;

/// Summary record for the current shard set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub total_stores: usize,
    pub stores_per_shard: usize,
    pub shard_ids: Vec<u32>,
}

/// One ordered, non-empty slice of the store list. IDs are 1-based and
/// contiguous across the whole set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shard {
    pub shard_id: u32,
    pub stores: Vec<Store>,
}

pub fn shard_file_name(shard_id: u32) -> String {
    format!("shard_{}.json", shard_id)
}
