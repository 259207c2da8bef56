// src/shards/planner.rs

use std::fs;
use std::path::Path;

use crate::config::consts::MANIFEST_FILE;
use crate::error::{Result, ShardError};
use crate::file::{ensure_directory, replace_directory, staging_dir_for};
use crate::store::Store;

use super::{shard_file_name, Manifest, Shard};

/// Slice the ordered store list into consecutive windows of
/// `stores_per_shard`. The final shard may be smaller, never empty.
pub fn partition(stores: &[Store], stores_per_shard: usize) -> Result<Vec<Shard>> {
    if stores_per_shard == 0 {
        return Err(ShardError::InvalidConfiguration(s!(
            "stores-per-shard must be at least 1"
        )));
    }

    let shards = stores
        .chunks(stores_per_shard)
        .enumerate()
        .map(|(i, window)| Shard {
            shard_id: (i + 1) as u32,
            stores: window.to_vec(),
        })
        .collect();

    Ok(shards)
}

fn manifest_for(stores: &[Store], stores_per_shard: usize, shards: &[Shard]) -> Manifest {
    Manifest {
        total_stores: stores.len(),
        stores_per_shard,
        shard_ids: shards.iter().map(|s| s.shard_id).collect(),
    }
}

/// Partition `stores` and publish the full shard set under `shards_dir`.
///
/// The whole set is staged in a scratch directory and swapped in only after
/// every file is written, so a re-plan with a new size can never leave a
/// mix of old and new shard files behind.
pub fn create_shards(
    shards_dir: &Path,
    stores: &[Store],
    stores_per_shard: usize,
) -> Result<Manifest> {
    let shards = partition(stores, stores_per_shard)?;
    let manifest = manifest_for(stores, stores_per_shard, &shards);

    let staged = staging_dir_for(shards_dir);
    if staged.exists() {
        fs::remove_dir_all(&staged)?;
    }
    ensure_directory(&staged)?;

    for shard in &shards {
        let path = staged.join(shard_file_name(shard.shard_id));
        let json = serde_json::to_string_pretty(&shard.stores)?;
        fs::write(&path, json)?;
        logd!(
            "planner: staged shard {} ({} stores)",
            shard.shard_id,
            shard.stores.len()
        );
    }

    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(staged.join(MANIFEST_FILE), json)?;

    replace_directory(&staged, shards_dir)?;
    logf!(
        "planner: published {} shards for {} stores (size {})",
        manifest.shard_ids.len(),
        manifest.total_stores,
        stores_per_shard
    );

    Ok(manifest)
}
