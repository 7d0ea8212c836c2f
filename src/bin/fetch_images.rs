// src/bin/fetch_images.rs
// Pulls the legacy site's images into data/alte-website-bilder. Individual
// failures don't stop the batch and don't fail the run.

use std::path::PathBuf;

use color_eyre::eyre::eyre;

use abf_scrape::images;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/alte-website-bilder"));

    println!("Downloading {} images to {}", images::ASSETS.len(), root.display());
    let tally = images::download_all(&root).map_err(|e| eyre!("{e}"))?;
    println!(
        "Done: {} new, {} skipped, {} failed",
        tally.ok, tally.skipped, tally.failed
    );
    Ok(())
}
