// src/config/options.rs
use std::path::PathBuf;
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    CreateShards,
    ListShards,
    RunShard(u32),
    RebuildManifest,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub command: Command,
    pub stores_per_shard: usize,     // partition size for create-shards
    pub stores_file: PathBuf,        // local versioned store list
    pub shards_dir: PathBuf,
    pub results_dir: PathBuf,
    pub workers: usize,              // bounded concurrency inside run-shard
    pub verbose: bool,               // echo progress lines to stderr
}

impl Options {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            stores_per_shard: DEFAULT_STORES_PER_SHARD,
            stores_file: PathBuf::from(DEFAULT_STORES_FILE),
            shards_dir: PathBuf::from(SHARDS_DIR),
            results_dir: PathBuf::from(RESULTS_DIR),
            workers: WORKERS,
            verbose: false,
        }
    }
}
