// src/shards/catalog.rs
//
// Read-only view over shards/. No side effects except rebuild_manifest,
// which regenerates the manifest cache from the shard files themselves.

use std::fs;
use std::path::Path;

use crate::config::consts::MANIFEST_FILE;
use crate::error::{Result, ShardError};
use crate::store::Store;

use super::{shard_file_name, Manifest};

/// One line of `list-shards` output: a shard and how many stores it holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShardEntry {
    pub shard_id: u32,
    pub store_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    pub total_stores: usize,
    pub stores_per_shard: usize,
    pub shards: Vec<ShardEntry>,
    /// Some shard file is larger than the recorded stores-per-shard; the
    /// files predate the manifest's configuration.
    pub stale: bool,
}

impl Listing {
    fn empty() -> Self {
        Self { total_stores: 0, stores_per_shard: 0, shards: Vec::new(), stale: false }
    }
}

pub fn load_manifest(shards_dir: &Path) -> Result<Option<Manifest>> {
    let path = shards_dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path)?;
    let manifest: Manifest = serde_json::from_str(&text)?;
    Ok(Some(manifest))
}

fn read_shard_file(shards_dir: &Path, shard_id: u32) -> Result<Vec<Store>> {
    let text = fs::read_to_string(shards_dir.join(shard_file_name(shard_id)))?;
    let stores: Vec<Store> = serde_json::from_str(&text)?;
    Ok(stores)
}

/// Per-shard ID and size in ascending ID order, plus totals.
/// A missing manifest means "no shards", not an error.
pub fn list(shards_dir: &Path) -> Result<Listing> {
    let Some(manifest) = load_manifest(shards_dir)? else {
        return Ok(Listing::empty());
    };

    let mut ids = manifest.shard_ids.clone();
    ids.sort_unstable();

    let mut shards = Vec::with_capacity(ids.len());
    let mut stale = false;
    for id in ids {
        let count = read_shard_file(shards_dir, id)?.len();
        if count > manifest.stores_per_shard {
            stale = true;
        }
        shards.push(ShardEntry { shard_id: id, store_count: count });
    }

    Ok(Listing {
        total_stores: manifest.total_stores,
        stores_per_shard: manifest.stores_per_shard,
        shards,
        stale,
    })
}

/// Ordered store list for one shard. Unknown IDs (no manifest, or outside
/// the recorded set) fail with NotFound before any file is touched.
pub fn resolve(shards_dir: &Path, shard_id: u32) -> Result<Vec<Store>> {
    let Some(manifest) = load_manifest(shards_dir)? else {
        return Err(ShardError::NotFound(shard_id));
    };
    if !manifest.shard_ids.contains(&shard_id) {
        return Err(ShardError::NotFound(shard_id));
    }
    read_shard_file(shards_dir, shard_id)
}

fn parse_shard_id(file_name: &str) -> Option<u32> {
    let stem = file_name.strip_prefix("shard_")?.strip_suffix(".json")?;
    stem.parse().ok()
}

/// Regenerate the manifest by scanning shard files. The manifest is a
/// cache; the shard files win whenever the two disagree.
///
/// stores-per-shard is taken from shard 1. Every shard except the last
/// must match it, and IDs must be contiguous from 1, otherwise the set
/// on disk was not produced by a single planning run.
pub fn rebuild_manifest(shards_dir: &Path) -> Result<Manifest> {
    let mut found: Vec<(u32, usize)> = Vec::new();

    if shards_dir.is_dir() {
        for entry in fs::read_dir(shards_dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else { continue };
            let Some(id) = parse_shard_id(name) else { continue };
            let count = read_shard_file(shards_dir, id)?.len();
            found.push((id, count));
        }
    }

    found.sort_unstable_by_key(|&(id, _)| id);

    for (i, &(id, _)) in found.iter().enumerate() {
        let expected = (i + 1) as u32;
        if id != expected {
            return Err(ShardError::InvalidConfiguration(format!(
                "shard files are not contiguous: expected shard_{}.json, found shard_{}.json",
                expected, id
            )));
        }
    }

    let stores_per_shard = found.first().map(|&(_, count)| count).unwrap_or(0);
    for &(id, count) in found.iter().take(found.len().saturating_sub(1)) {
        if count != stores_per_shard {
            return Err(ShardError::InvalidConfiguration(format!(
                "shard {} holds {} stores but shard 1 holds {}",
                id, count, stores_per_shard
            )));
        }
    }
    if let Some(&(id, count)) = found.last() {
        if count > stores_per_shard {
            return Err(ShardError::InvalidConfiguration(format!(
                "shard {} holds {} stores, more than shard 1's {}",
                id, count, stores_per_shard
            )));
        }
    }

    let manifest = Manifest {
        total_stores: found.iter().map(|&(_, count)| count).sum(),
        stores_per_shard,
        shard_ids: found.iter().map(|&(id, _)| id).collect(),
    };

    ensure_dir_then_write(shards_dir, &manifest)?;
    logf!(
        "catalog: rebuilt manifest ({} shards, {} stores)",
        manifest.shard_ids.len(),
        manifest.total_stores
    );
    Ok(manifest)
}

fn ensure_dir_then_write(shards_dir: &Path, manifest: &Manifest) -> Result<()> {
    crate::file::ensure_directory(shards_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(shards_dir.join(MANIFEST_FILE), json)?;
    Ok(())
}
