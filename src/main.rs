//! Voting center directory shell
//!
//! Opens the local store and runs the interactive directory: one command per
//! line, the current screen redrawn after each command.
//!
//! Usage:
//!   cargo run --bin load_data            # optional: reset to seed data
//!   cargo run --bin center-directory     # start the shell
//!   > login EPZArmy
//!   > open 1

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use center_directory::config::Config;
use center_directory::directory::Directory;
use center_directory::logging;
use center_directory::shell::{Shell, Step};
use center_directory::storage::Storage;

#[derive(Parser)]
#[command(name = "center-directory")]
#[command(about = "Voting center directory", long_about = None)]
struct Args {
    /// Store directory (overrides CENTER_DIRECTORY_DATA)
    #[arg(short, long)]
    data_dir: Option<String>,

    /// Keep admin-entered center numbers instead of renumbering 01..N
    #[arg(long)]
    manual_numbers: bool,

    /// Default directory for exported backups
    #[arg(short, long, default_value = ".")]
    export_dir: PathBuf,
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mut config = Config::load();
    let _guard = logging::init(&config);

    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if args.manual_numbers {
        config.renumber = false;
    }

    info!(data_dir = %config.data_dir, "Opening store");
    let storage = Storage::open(&config.data_dir)?;
    let directory = Directory::open(storage, config.renumber)?;
    let mut shell = Shell::new(directory, config.maps_api_key.clone(), args.export_dir);

    print!("{}", shell.render());
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match shell.handle_line(&line).await {
            Step::Quit => break,
            Step::Continue(message) => {
                if let Some(message) = message {
                    println!("{message}");
                }
            }
        }
        print!("{}", shell.render());
        prompt()?;
    }

    info!("Shutting down");
    Ok(())
}
