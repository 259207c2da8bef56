// src/runner.rs
//
// Per-shard scrape loop. One store failing never aborts the shard: the
// failure is folded into that store's ShardResult and the run continues.
// A run is complete when every store has a terminal record.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::{
    config::consts::REQUEST_PAUSE_MS,
    config::options::Options,
    csv,
    error::Result,
    file::ensure_directory,
    progress::Progress,
    scrape::{Scraper, StoreDetails},
    shards::catalog,
    store::Store,
};

/// Terminal record for one store within a shard run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardResult {
    pub store: Store,
    pub details: Option<StoreDetails>,
    pub ok: bool,
    pub error: Option<String>,
}

impl ShardResult {
    pub fn csv_headers() -> Vec<String> {
        ["store_number", "name", "city", "province", "postal_code", "slug", "url", "ok", "error"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Flat row matching csv_headers(). Scraped fields win over the listed
    /// record; the listed value stands in where the scrape yielded nothing.
    pub fn csv_row(&self) -> Vec<String> {
        let d = self.details.as_ref();
        let pick = |scraped: Option<&String>, listed: Option<&String>| {
            scraped.or(listed).cloned().unwrap_or_default()
        };
        vec![
            self.store.store_number.clone(),
            pick(d.and_then(|d| d.name.as_ref()), self.store.name.as_ref()),
            pick(d.and_then(|d| d.city.as_ref()), self.store.city.as_ref()),
            pick(d.and_then(|d| d.province.as_ref()), self.store.province.as_ref()),
            pick(d.and_then(|d| d.postal_code.as_ref()), self.store.postal_code.as_ref()),
            pick(d.and_then(|d| d.slug.as_ref()), self.store.slug.as_ref()),
            self.store.url.clone().unwrap_or_default(),
            self.ok.to_string(),
            self.error.clone().unwrap_or_default(),
        ]
    }
}

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub shard_id: u32,
    pub succeeded: usize,
    pub failed: usize,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
}

/// Run one shard end to end: resolve, scrape every store, persist.
///
/// Fails fast on an unknown shard ID (before any scraping) and on any I/O
/// error while persisting. Re-running overwrites only this shard's output.
pub fn run_shard(
    opts: &Options,
    shard_id: u32,
    scraper: &dyn Scraper,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary> {
    let stores = catalog::resolve(&opts.shards_dir, shard_id)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(stores.len());
        p.log(&format!("Shard {}: {} stores", shard_id, stores.len()));
    }

    let results = scrape_stores(&stores, scraper, opts.workers, progress.as_deref_mut());

    let succeeded = results.iter().filter(|r| r.ok).count();
    let failed = results.len() - succeeded;

    ensure_directory(&opts.results_dir)?;
    let json_path = opts.results_dir.join(format!("shard_{}_results.json", shard_id));
    let csv_path = opts.results_dir.join(format!("shard_{}_results.csv", shard_id));

    let json = serde_json::to_string_pretty(&results)?;
    fs::write(&json_path, json)?;

    let rows: Vec<Vec<String>> = results.iter().map(ShardResult::csv_row).collect();
    let contents = csv::rows_to_string(&rows, &Some(ShardResult::csv_headers()), csv::SEP);
    fs::write(&csv_path, contents)?;

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!(
        "runner: shard {} complete ({} ok, {} failed)",
        shard_id, succeeded, failed
    );

    Ok(RunSummary { shard_id, succeeded, failed, json_path, csv_path })
}

/// Scrape every store once, concurrently up to `workers`, collecting one
/// terminal record per store in input order.
fn scrape_stores(
    stores: &[Store],
    scraper: &dyn Scraper,
    workers: usize,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Vec<ShardResult> {
    let workers = workers.min(stores.len()).max(1);

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(usize, std::result::Result<StoreDetails, String>)>();

    let mut slots: Vec<Option<ShardResult>> = vec![None; stores.len()];

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;
            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= stores.len() {
                        break;
                    }
                    let outcome = match scraper.scrape(&stores[i]) {
                        Ok(details) => Ok(details),
                        Err(e) => Err(e.to_string()),
                    };
                    let _ = tx.send((i, outcome));
                    thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS)); // be polite
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for _ in 0..stores.len() {
            match res_rx.recv() {
                Ok((i, Ok(details))) => {
                    slots[i] = Some(ShardResult {
                        store: stores[i].clone(),
                        details: Some(details),
                        ok: true,
                        error: None,
                    });
                    if let Some(p) = progress.as_deref_mut() {
                        p.log(&stores[i].label());
                        p.item_done(i);
                    }
                }
                Ok((i, Err(msg))) => {
                    loge!("store {}: {}", stores[i].store_number, msg);
                    slots[i] = Some(ShardResult {
                        store: stores[i].clone(),
                        details: None,
                        ok: false,
                        error: Some(msg),
                    });
                    if let Some(p) = progress.as_deref_mut() {
                        p.log(&format!("{} FAILED", stores[i].label()));
                        p.item_done(i);
                    }
                }
                Err(_) => break, // workers ended early; bail gracefully
            }
        }
    });

    // Any slot a worker never reported (it can't happen unless a worker
    // panicked) still gets a terminal failure record.
    slots
        .into_iter()
        .zip(stores)
        .map(|(slot, store)| {
            slot.unwrap_or_else(|| ShardResult {
                store: store.clone(),
                details: None,
                ok: false,
                error: Some(s!("scrape worker exited before reporting")),
            })
        })
        .collect()
}
