//! geodist: CLI for great-circle distance calculations.

use anyhow::Context;
use clap::{Parser, Subcommand};
use geodist::{DistanceEngine, DistanceUnit, EarthModel, EngineConfig, GeoPoint};
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "geodist")]
#[command(about = "Great-circle distance calculator")]
#[command(version)]
struct Cli {
    /// Path to a geodist.toml configuration file
    #[arg(long, global = true, env = "GEODIST_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distance between two points given as "lat,lon"
    Distance {
        /// Starting point
        #[arg(allow_hyphen_values = true)]
        from: GeoPoint,
        /// Ending point
        #[arg(allow_hyphen_values = true)]
        to: GeoPoint,
        /// Output unit (km, mi, m, nmi, ft)
        #[arg(short, long)]
        unit: Option<DistanceUnit>,
        /// Earth model (spherical, wgs84, grs80)
        #[arg(short, long)]
        model: Option<EarthModel>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Distances for a JSON file of {"from": .., "to": ..} pairs
    Batch {
        /// Path to JSON file
        path: PathBuf,
        /// Output unit (km, mi, m, nmi, ft)
        #[arg(short, long)]
        unit: Option<DistanceUnit>,
        /// Earth model (spherical, wgs84, grs80)
        #[arg(short, long)]
        model: Option<EarthModel>,
    },
    /// List Earth radii for every model and unit
    Units,
}

#[derive(Deserialize)]
struct PairInput {
    from: GeoPoint,
    to: GeoPoint,
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = EngineConfig::load(cli.config.as_deref())?;
    let engine = DistanceEngine::with_config(&config)?;

    match cli.command {
        Commands::Distance { from, to, unit, model, json } => {
            let unit = unit.unwrap_or(engine.default_unit());
            let model = model.unwrap_or(engine.default_model());
            let distance = engine.distance(&from, &to, unit, model)?;

            if json {
                let result = serde_json::json!({
                    "from": from,
                    "to": to,
                    "unit": unit,
                    "model": model,
                    "distance": distance,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{:.3} {}", distance, unit);
            }
        }

        Commands::Batch { path, unit, model } => {
            let data = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let inputs: Vec<PairInput> = serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            let pairs: Vec<(GeoPoint, GeoPoint)> =
                inputs.into_iter().map(|p| (p.from, p.to)).collect();

            let unit = unit.unwrap_or(engine.default_unit());
            let model = model.unwrap_or(engine.default_model());
            let distances = engine.batch_distance(&pairs, unit, model)?;

            tracing::debug!(stats = ?engine.cache_stats(), "Batch complete");
            println!("{}", serde_json::to_string_pretty(&distances)?);
        }

        Commands::Units => {
            for model in EarthModel::ALL {
                let radii: Vec<String> = DistanceUnit::ALL
                    .iter()
                    .map(|&unit| match engine.radius(model, unit) {
                        Ok(r) => format!("{:.4} {}", r, unit),
                        Err(_) => format!("- {}", unit),
                    })
                    .collect();
                println!("{:<10} {}", model, radii.join(", "));
            }
        }
    }

    Ok(())
}
