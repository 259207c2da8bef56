// src/cli.rs
use std::{env, path::PathBuf};

use crate::config::options::{Command, Options};
use crate::progress::Progress;
use crate::runner;
use crate::scrape::HttpScraper;
use crate::shards::{catalog, planner};
use crate::store;

pub fn parse_cli() -> Result<Options, Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);

    let command = match args.next().as_deref() {
        Some("create-shards") => Command::CreateShards,
        Some("list-shards") => Command::ListShards,
        Some("run-shard") => {
            let v = args.next().ok_or("Missing shard ID for run-shard")?;
            let id: u32 = v.parse().map_err(|_| format!("Invalid shard ID: {}", v))?;
            Command::RunShard(id)
        }
        Some("rebuild-manifest") => Command::RebuildManifest,
        Some("-h") | Some("--help") | None => {
            eprintln!("{}", include_str!("cli_help.txt"));
            std::process::exit(0);
        }
        Some(other) => return Err(format!("Unknown command: {}", other).into()),
    };

    let mut options = Options::new(command);

    while let Some(a) = args.next() {
        match a.as_str() {
            "--stores-per-shard" => {
                let v = args.next().ok_or("Missing value for --stores-per-shard")?;
                options.stores_per_shard = v
                    .parse()
                    .map_err(|_| format!("Invalid stores-per-shard: {}", v))?;
            }
            "--stores" => {
                let v = args.next().ok_or("Missing value for --stores")?;
                options.stores_file = PathBuf::from(v);
            }
            "--shards-dir" => {
                let v = args.next().ok_or("Missing value for --shards-dir")?;
                options.shards_dir = PathBuf::from(v);
            }
            "--results-dir" => {
                let v = args.next().ok_or("Missing value for --results-dir")?;
                options.results_dir = PathBuf::from(v);
            }
            "--workers" => {
                let v = args.next().ok_or("Missing value for --workers")?;
                options.workers = v.parse().map_err(|_| format!("Invalid workers: {}", v))?;
            }
            "--verbose" | "-v" => options.verbose = true,
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(options)
}

pub fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    match options.command {
        Command::CreateShards => create_shards(options),
        Command::ListShards => list_shards(options),
        Command::RunShard(id) => run_shard(options, id),
        Command::RebuildManifest => rebuild_manifest(options),
    }
}

fn create_shards(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let stores = store::load_list(&options.stores_file)?;
    let manifest = planner::create_shards(&options.shards_dir, &stores, options.stores_per_shard)?;

    println!(
        "Created {} shards from {} stores ({} per shard)",
        manifest.shard_ids.len(),
        manifest.total_stores,
        manifest.stores_per_shard
    );
    println!("Use list-shards to see the set.");
    Ok(())
}

fn list_shards(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let listing = catalog::list(&options.shards_dir)?;

    if listing.shards.is_empty() {
        println!("No shards. Run create-shards first.");
        return Ok(());
    }

    println!("Total stores: {}", listing.total_stores);
    println!("Stores per shard: {}", listing.stores_per_shard);
    println!("Total shards: {}", listing.shards.len());
    for entry in &listing.shards {
        println!("  shard {:>3}: {} stores", entry.shard_id, entry.store_count);
    }
    if listing.stale {
        eprintln!("Warning: shard files are larger than the recorded stores-per-shard; re-run create-shards.");
    }
    Ok(())
}

fn run_shard(options: &Options, shard_id: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut progress = CliProgress::default();
    let progress: Option<&mut dyn Progress> =
        if options.verbose { Some(&mut progress) } else { None };

    let summary = runner::run_shard(options, shard_id, &HttpScraper, progress)?;

    println!(
        "Shard {} complete: {} ok, {} failed",
        summary.shard_id, summary.succeeded, summary.failed
    );
    println!("Wrote {}", summary.json_path.display());
    println!("Wrote {}", summary.csv_path.display());
    Ok(())
}

fn rebuild_manifest(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = catalog::rebuild_manifest(&options.shards_dir)?;
    println!(
        "Manifest rebuilt: {} shards, {} stores",
        manifest.shard_ids.len(),
        manifest.total_stores
    );
    Ok(())
}

/// Prints progress lines to stderr, leaving stdout for the summary.
#[derive(Default)]
struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }
    fn item_done(&mut self, _index: usize) {
        self.done += 1;
        eprintln!("  [{}/{}]", self.done, self.total);
    }
}
