//! Example: load the song catalog and report timing.
//!
//! Run with: cargo run --package catalog --example load_catalog

use catalog::CandidateTable;
use encoder::HashEmbedder;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let path = Path::new("data/songs.csv");
    println!("Loading song catalog from {}...\n", path.display());

    let start = Instant::now();
    let table = CandidateTable::load_from_file(path, &HashEmbedder::new())?;
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Songs: {}", table.len());
    println!("Dimension: {:?}", table.dimension());
    for item in table.iter().take(5) {
        println!("  {}. {} - {} ({})", item.id, item.title, item.artist, item.mood);
    }

    Ok(())
}
