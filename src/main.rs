pub mod config;
pub mod data;
pub mod render;
pub mod server;
pub mod style;
pub mod survey;
pub mod types;

use clap::{Parser, Subcommand};
use data::{FileSource, WardSource};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the community feedback page
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Check the ward boundary file and report what will render
    Validate {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { config } => {
            println!("Serving feedback page with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            // Load ward boundaries once. A failed load is not fatal; the
            // page just renders without an overlay.
            let source = FileSource::new(app_config.input.wards_geojson.clone());
            let wards = data::load_or_empty(&source);

            let handler = Arc::new(survey::LogHandler);
            server::start_server(app_config, wards, handler).await?;
        }
        Commands::Validate { config } => {
            println!("Validating ward data with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            let source = FileSource::new(app_config.input.wards_geojson.clone());
            let raw = source.load()?;
            let total = raw.features.len();
            let kept = data::sanitize(raw).features.len();

            println!("{} features in file, {} will render as overlay shapes", total, kept);
        }
    }

    Ok(())
}
