// src/config/consts.rs

// Net config
pub const HOST: &str = "www.homedepot.ca";
pub const STORE_DETAILS_PREFIX: &str = "/store-details/";

// Shard layout
pub const SHARDS_DIR: &str = "shards";
pub const RESULTS_DIR: &str = "results";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const DEFAULT_STORES_PER_SHARD: usize = 8;

// Store list (local, versioned — no network call to enumerate stores)
pub const DEFAULT_STORES_FILE: &str = "data/stores.json";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
