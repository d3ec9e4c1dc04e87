use std::path::PathBuf;

use clap::{Parser, Subcommand};

use center_directory::config::Config;
use center_directory::links;
use center_directory::logging;
use center_directory::search::{search, stats};
use center_directory::storage::Storage;
use center_directory::transfer::{self, Backup};

#[derive(Parser)]
#[command(name = "directory-cli")]
#[command(about = "Operator tool for the voting center directory store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Store directory (overrides CENTER_DIRECTORY_DATA)
    #[arg(short, long)]
    data_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    List {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    Show {
        #[arg(short, long)]
        id: String,
    },
    Stats,
    Sos,
    Export {
        /// File or directory; a directory gets a dated file name
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    Import {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();
    let _guard = logging::init(&config);

    let data_dir = cli.data_dir.unwrap_or(config.data_dir);
    let storage = Storage::open(&data_dir)?;
    let mut slots = storage.load()?;

    match cli.command {
        Commands::List { query } => {
            for center in search(&slots.centers, &query) {
                println!("{}\t{}\t{}", center.id, center.center_number, center.name);
            }
        }
        Commands::Show { id } => {
            let Some(center) = slots.centers.iter().find(|c| c.id == id) else {
                println!("No center with id {id}");
                return Ok(());
            };
            println!("{}", serde_json::to_string_pretty(center)?);
            if let Some(url) = links::map_embed_url(&center.location_link, config.maps_api_key.as_deref()) {
                println!("Map: {url}");
            }
        }
        Commands::Stats => {
            let stats = stats(&slots.centers);
            println!("Centers: {}", stats.total_centers);
            println!("Personnel: {}", stats.total_personnel);
        }
        Commands::Sos => {
            let contact = &slots.emergency_contact;
            println!("{} {}", contact.name, links::tel_uri(&contact.mobile));
        }
        Commands::Export { out } => {
            let path = transfer::write_backup(&out, &Backup::from_slots(&slots)).await?;
            println!("Exported to {}", path.display());
        }
        Commands::Import { file } => {
            let backup = transfer::read_backup(&file).await?;
            backup.apply(&mut slots);
            storage.persist(&slots)?;
            println!("Imported {} centers", slots.centers.len());
        }
    }

    Ok(())
}
