mod scrape;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "glossy")]
#[command(about = "GLOSSY deals aggregator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every configured store and upload the results
    Scrape {
        /// Pages to visit per store (overrides GLOSSY_SCRAPER_PAGES_PER_STORE)
        #[arg(long)]
        pages: Option<u32>,

        /// Restrict the run to a single store (by name)
        #[arg(long)]
        store: Option<String>,

        /// Scrape and report without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// List the configured stores
    Stores,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape {
            pages,
            store,
            dry_run,
        } => {
            let config = glossy_core::load_app_config()?;
            scrape::run_scrape(&config, pages, store.as_deref(), dry_run).await
        }
        Commands::Stores => {
            for store in glossy_scraper::default_stores() {
                println!("{:<12} {}", store.name, store.base_url);
            }
            Ok(())
        }
    }
}
