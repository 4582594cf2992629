//! Class Breaks Command Line Tool
//!
//! Loads a JSON dataset, classifies one numeric field of a layer and prints
//! the resulting SLD document to stdout.
//!
//! # Usage
//!
//! ```bash
//! class-breaks <dataset.json> <layer> <field> [classes] [classifier] [geofield]
//!
//! class-breaks network.json hydrant pipeline__diameter 5 quantiles location
//! ```
//!
//! Omitted arguments fall back to the configuration file.
//!
//! # Environment Variables
//!
//! - `CLASS_BREAKS_CONFIG`: Path to the TOML configuration file
//!   (default: `class_breaks.toml` in the standard locations)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use class_breaks::config::GeneratorConfig;
use class_breaks::models::{Classifier, FieldPath, SourceQuery};
use class_breaks::parsing::load_dataset;
use class_breaks::services::generate;

const USAGE: &str =
    "Usage: class-breaks <dataset.json> <layer> <field> [classes] [classifier] [geofield]";

fn load_config() -> Result<GeneratorConfig> {
    if let Ok(path) = env::var("CLASS_BREAKS_CONFIG") {
        return GeneratorConfig::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path));
    }
    match GeneratorConfig::from_default_location() {
        Ok(config) => Ok(config),
        Err(e) => {
            info!("{}; using built-in defaults", e);
            Ok(GeneratorConfig::default())
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the document
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        anyhow::bail!("{}", USAGE);
    }
    let dataset_path = Path::new(&args[1]);
    let layer = &args[2];
    let field = FieldPath::parse(&args[3]).map_err(|e| anyhow::anyhow!(e))?;

    let config = load_config()?;
    let mut request = config.request(SourceQuery::new(layer.as_str()), field);
    if let Some(classes) = args.get(4) {
        request.class_count = classes
            .parse()
            .with_context(|| format!("Invalid class count: {}", classes))?;
    }
    if let Some(name) = args.get(5) {
        request.classifier = name
            .parse::<Classifier>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    if let Some(geofield) = args.get(6) {
        request.geometry_field = geofield.clone();
    }

    info!("Loading dataset {}", dataset_path.display());
    let repo = load_dataset(dataset_path)?;

    let sld = generate(&repo, &request).context("Failed to generate style")?;
    info!("Generated {} rules", sld.rules().len());
    println!("{}", sld.to_xml());

    Ok(())
}
