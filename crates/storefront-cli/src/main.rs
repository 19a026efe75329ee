mod ingest;
mod tools;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront product ingestion pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build products and collections from an extraction run
    Ingest {
        /// Listing cards from the shop page scan (JSON array)
        #[arg(long)]
        listings: PathBuf,
        /// Per-listing enrichment map (JSON object keyed by listing id)
        #[arg(long)]
        details: Option<PathBuf>,
        /// Keyword table; defaults to `STOREFRONT_COLLECTIONS_PATH`
        #[arg(long)]
        collections: Option<PathBuf>,
        /// Artifact directory; defaults to `STOREFRONT_OUTPUT_DIR`
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Earlier products file used to report new listings
        #[arg(long)]
        previous: Option<PathBuf>,
        /// Print a summary without writing artifacts
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the slug for a product title
    Slug {
        title: String,
        #[arg(long)]
        listing_id: Option<String>,
    },
    /// Print the collections a title (and tags) would be placed in
    Classify {
        title: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Convert description markup to plain text (reads stdin without a path)
    Normalize { path: Option<PathBuf> },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ingest {
            listings,
            details,
            collections,
            out_dir,
            previous,
            dry_run,
        } => ingest::run_ingest(
            &config,
            &ingest::IngestArgs {
                listings,
                details,
                collections,
                out_dir,
                previous,
                dry_run,
            },
        )?,
        Commands::Slug { title, listing_id } => {
            println!("{}", tools::slug_for(&title, listing_id.as_deref()));
        }
        Commands::Classify { title, tags } => {
            for label in tools::run_classify(&config, &title, &tags)? {
                println!("{label}");
            }
        }
        Commands::Normalize { path } => {
            println!("{}", tools::run_normalize(path.as_deref())?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
