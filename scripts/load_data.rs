//! Load data script for the voting center directory
//!
//! Resets every slot to its default (seed centers, default emergency contact,
//! default passwords, logged out), then optionally applies a backup file.
//! Run: cargo run --bin load_data [-- --backup epz_army_backup_2026-01-05.json]

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use center_directory::config::Config;
use center_directory::logging;
use center_directory::search::stats;
use center_directory::storage::Storage;
use center_directory::transfer;

#[derive(Parser)]
#[command(name = "load_data")]
struct Args {
    #[arg(short, long)]
    data_dir: Option<String>,

    /// Backup file applied on top of the defaults
    #[arg(short, long)]
    backup: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = Config::load();
    let _guard = logging::init(&config);

    let data_dir = args.data_dir.unwrap_or(config.data_dir);
    let storage = Storage::open(&data_dir)?;
    let mut slots = storage.reset()?;
    info!(data_dir = %data_dir, "Store reset to defaults");

    if let Some(path) = args.backup {
        let backup = transfer::read_backup(&path).await?;
        backup.apply(&mut slots);
        storage.persist(&slots)?;
        info!(path = %path.display(), "Applied backup");
    }

    let stats = stats(&slots.centers);
    println!(
        "Loaded {} centers with {} personnel into {}",
        stats.total_centers, stats.total_personnel, data_dir
    );
    Ok(())
}
