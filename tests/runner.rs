// tests/runner.rs
//
// Shard runs against a stub scraper: partial-failure semantics, ordering,
// idempotent overwrite, and the dual-format output.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use store_scrape::config::options::{Command, Options};
use store_scrape::csv;
use store_scrape::error::ShardError;
use store_scrape::runner::{self, ShardResult};
use store_scrape::scrape::{Scraper, StoreDetails};
use store_scrape::shards::planner;
use store_scrape::store::Store;

fn store(n: u32) -> Store {
    Store {
        store_number: n.to_string(),
        name: Some(format!("Store {}", n)),
        city: Some("Ottawa".into()),
        province: Some("ON".into()),
        postal_code: Some("K1A 0B1".into()),
        slug: Some(format!("{}-ottawa-on", n)),
        url: Some(format!("https://example.test/store-details/{}", n)),
    }
}

fn stores(n: u32) -> Vec<Store> {
    (1..=n).map(store).collect()
}

/// Succeeds unless the store number is listed in `fail`; counts calls.
struct StubScraper {
    fail: Vec<String>,
    calls: AtomicUsize,
    jitter: bool,
}

impl StubScraper {
    fn ok() -> Self {
        Self { fail: Vec::new(), calls: AtomicUsize::new(0), jitter: false }
    }
    fn failing(ids: &[&str]) -> Self {
        Self {
            fail: ids.iter().map(|s| s.to_string()).collect(),
            calls: AtomicUsize::new(0),
            jitter: false,
        }
    }
}

impl Scraper for StubScraper {
    fn scrape(&self, store: &Store) -> Result<StoreDetails, Box<dyn Error>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.jitter {
            // Stagger completions so the runner has to restore input order.
            thread::sleep(Duration::from_millis(((n % 3) * 10) as u64));
        }
        if self.fail.contains(&store.store_number) {
            return Err(format!("connection refused for store {}", store.store_number).into());
        }
        Ok(StoreDetails {
            name: Some(format!("Confirmed {}", store.store_number)),
            ..StoreDetails::default()
        })
    }
}

fn options_in(root: &Path, command: Command) -> Options {
    let mut options = Options::new(command);
    options.shards_dir = root.join("shards");
    options.results_dir = root.join("results");
    options.workers = 3;
    options
}

fn read_results(path: &Path) -> Vec<ShardResult> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn shard_three_of_twenty_by_eight_yields_four_records_and_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), Command::RunShard(3));
    planner::create_shards(&options.shards_dir, &stores(20), 8).unwrap();

    let scraper = StubScraper::ok();
    let summary = runner::run_shard(&options, 3, &scraper, None).unwrap();

    assert_eq!(summary.succeeded, 4);
    assert_eq!(summary.failed, 0);
    assert!(summary.json_path.ends_with("shard_3_results.json"));
    assert!(summary.csv_path.ends_with("shard_3_results.csv"));
    assert!(summary.json_path.exists());
    assert!(summary.csv_path.exists());

    let results = read_results(&summary.json_path);
    assert_eq!(results.len(), 4);
    let ids: Vec<&str> = results.iter().map(|r| r.store.store_number.as_str()).collect();
    assert_eq!(ids, vec!["17", "18", "19", "20"], "results follow shard order");
}

#[test]
fn a_failed_store_is_recorded_and_the_run_still_completes() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), Command::RunShard(1));
    planner::create_shards(&options.shards_dir, &stores(5), 5).unwrap();

    let scraper = StubScraper::failing(&["2", "4"]);
    let summary = runner::run_shard(&options, 1, &scraper, None).unwrap();

    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 2);

    let results = read_results(&summary.json_path);
    assert_eq!(results.len(), 5, "every store gets a terminal record");
    let failed: Vec<&ShardResult> = results.iter().filter(|r| !r.ok).collect();
    assert_eq!(failed.len(), 2);
    for r in failed {
        assert!(r.details.is_none());
        assert!(r.error.as_deref().unwrap_or("").contains("connection refused"));
    }
}

#[test]
fn unknown_shard_fails_before_any_scraping() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), Command::RunShard(9));
    planner::create_shards(&options.shards_dir, &stores(4), 2).unwrap();

    let scraper = StubScraper::ok();
    let err = runner::run_shard(&options, 9, &scraper, None).unwrap_err();
    assert!(matches!(err, ShardError::NotFound(9)));
    assert_eq!(scraper.calls.load(Ordering::SeqCst), 0);
    assert!(!options.results_dir.exists());
}

#[test]
fn rerunning_a_shard_overwrites_its_own_output_only() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), Command::RunShard(1));
    planner::create_shards(&options.shards_dir, &stores(4), 2).unwrap();

    // First pass fails everything, second succeeds.
    runner::run_shard(&options, 1, &StubScraper::failing(&["1", "2"]), None).unwrap();
    runner::run_shard(&options, 2, &StubScraper::ok(), None).unwrap();
    let summary = runner::run_shard(&options, 1, &StubScraper::ok(), None).unwrap();

    let results = read_results(&summary.json_path);
    assert_eq!(results.len(), 2, "no stale duplicate entries after re-run");
    assert!(results.iter().all(|r| r.ok));

    // The sibling shard's output is untouched.
    let other = read_results(&options.results_dir.join("shard_2_results.json"));
    assert_eq!(other.len(), 2);
}

#[test]
fn concurrent_workers_still_emit_results_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), Command::RunShard(1));
    planner::create_shards(&options.shards_dir, &stores(12), 12).unwrap();

    let mut scraper = StubScraper::ok();
    scraper.jitter = true;
    let summary = runner::run_shard(&options, 1, &scraper, None).unwrap();

    let results = read_results(&summary.json_path);
    let ids: Vec<String> = results.iter().map(|r| r.store.store_number.clone()).collect();
    let expected: Vec<String> = (1..=12).map(|n| n.to_string()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn csv_output_has_a_header_and_one_row_per_store() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_in(dir.path(), Command::RunShard(1));
    planner::create_shards(&options.shards_dir, &stores(3), 3).unwrap();

    let summary = runner::run_shard(&options, 1, &StubScraper::failing(&["3"]), None).unwrap();

    let text = fs::read_to_string(&summary.csv_path).unwrap();
    let rows = csv::parse_rows(&text, csv::SEP);
    assert_eq!(rows.len(), 4, "header + 3 rows");
    assert_eq!(rows[0], ShardResult::csv_headers());

    // Scraped name wins over the listed one; failures carry their message.
    assert_eq!(rows[1][1], "Confirmed 1");
    assert_eq!(rows[3][7], "false");
    assert!(rows[3][8].contains("connection refused"));
}
