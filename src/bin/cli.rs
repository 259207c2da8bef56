// src/bin/cli.rs
use color_eyre::eyre::eyre;

use store_scrape::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let options = cli::parse_cli().map_err(|e| eyre!("{e}"))?;
    cli::run(&options).map_err(|e| eyre!("{e}"))
}
