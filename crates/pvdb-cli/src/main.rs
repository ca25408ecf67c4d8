use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pvdb_core::{filter::MAX_PAGE_LIMIT, IncidentFilter};
use pvdb_store::Store;

#[derive(Debug, Parser)]
#[command(name = "pvdb-cli")]
#[command(about = "PVDB command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print summary statistics for the seeded catalog as JSON
    Stats,
    /// Write the incidents CSV to stdout or a file
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store = Store::seeded();

    match cli.command {
        Commands::Stats => {
            let stats = store.statistics(&IncidentFilter::default()).await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Export { out } => {
            let filter = IncidentFilter {
                limit: Some(MAX_PAGE_LIMIT),
                ..IncidentFilter::default()
            };
            let page = store.list_incidents(&filter).await;
            let csv = pvdb_store::export::incidents_to_csv(&page.incidents);
            match out {
                Some(path) => {
                    std::fs::write(&path, &csv)?;
                    tracing::info!(path = %path.display(), rows = page.total, "export written");
                }
                None => println!("{csv}"),
            }
        }
    }

    Ok(())
}
