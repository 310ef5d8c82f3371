//! Flarezone - Entry Point
//!
//! Loads region tables and the name corpus, generates one sector and prints
//! its summary (or the JSON snapshot a map renderer consumes).

use clap::Parser;
use std::path::PathBuf;

use flarezone::core::config::SectorConfig;
use flarezone::core::error::Result;
use flarezone::data::GeneratorData;
use flarezone::sector::SectorGenerator;

/// Generate a sector of linked worlds
#[derive(Parser, Debug)]
#[command(name = "flarezone")]
#[command(about = "Generate a sector of linked worlds for the Elysium Flare RPG")]
struct Args {
    /// Directory holding regions/, planets.txt and suffixes.txt
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Sector config (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Region of the capital world; random when omitted
    #[arg(long)]
    region: Option<String>,

    /// Random seed for reproducible sectors
    #[arg(long)]
    seed: Option<u32>,

    /// Print the renderer JSON snapshot instead of the text summary
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("flarezone=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SectorConfig::load_from_toml(path)?,
        None => SectorConfig::default(),
    };
    let data = GeneratorData::load_dir(&args.data)?;
    let generator = SectorGenerator::new(&data, config)?;

    let sector = generator.generate(args.region.as_deref(), args.seed)?;

    let rendered = if args.json {
        sector.snapshot().to_json()?
    } else {
        sector.summary()
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            tracing::info!("Wrote sector {} to {}", sector.name(), path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
