//! JSON dataset loader.
//!
//! A dataset lists layers with their column types and records:
//!
//! ```json
//! {
//!   "layers": [
//!     {
//!       "name": "reservoir",
//!       "fields": { "volume": "float", "coastline": "polygon" },
//!       "records": [ { "id": 1, "volume": 10000.0 } ]
//!     },
//!     {
//!       "name": "pipeline",
//!       "fields": { "diameter": "integer", "reservoir": "foreign_key:reservoir" },
//!       "records": [ { "diameter": 3, "reservoir": 1 } ]
//!     }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::db::{FeatureRepository, LocalRepository};
use crate::models::FieldType;

/// Raw JSON structure for a dataset file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetJson {
    layers: Vec<LayerJson>,
}

/// Raw JSON structure for one layer
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerJson {
    name: String,
    fields: BTreeMap<String, String>,
    #[serde(default)]
    records: Vec<serde_json::Value>,
}

/// Load a dataset file into a new repository.
pub fn load_dataset(path: &Path) -> Result<LocalRepository> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
    load_dataset_str(&content)
        .with_context(|| format!("Failed to load dataset: {}", path.display()))
}

/// Load a dataset from JSON text into a new repository.
pub fn load_dataset_str(json_str: &str) -> Result<LocalRepository> {
    let repo = LocalRepository::new();
    load_into(&repo, json_str)?;
    Ok(repo)
}

/// Add the layers of a JSON dataset to an existing repository.
///
/// All layers are declared before any record is inserted, so relations may
/// point at layers defined later in the file.
pub fn load_into(repo: &LocalRepository, json_str: &str) -> Result<()> {
    let deserializer = &mut serde_json::Deserializer::from_str(json_str);
    let dataset: DatasetJson = serde_path_to_error::deserialize(deserializer).map_err(|e| {
        anyhow::anyhow!("Dataset deserialization error at '{}': {}", e.path(), e.inner())
    })?;

    let mut schemas = Vec::with_capacity(dataset.layers.len());
    for layer in &dataset.layers {
        let schema = layer
            .fields
            .iter()
            .map(|(field, type_name)| {
                type_name
                    .parse::<FieldType>()
                    .map(|t| (field.clone(), t))
                    .map_err(|e| anyhow::anyhow!("Layer '{}', field '{}': {}", layer.name, field, e))
            })
            .collect::<Result<Vec<_>>>()?;
        schemas.push(schema);
    }

    let mut known: HashSet<String> = repo.list_layers()?.into_iter().collect();
    known.extend(dataset.layers.iter().map(|l| l.name.clone()));
    for (layer, schema) in dataset.layers.iter().zip(&schemas) {
        for (field, field_type) in schema {
            if let Some(target) = field_type.related_layer() {
                if !known.contains(target) {
                    anyhow::bail!(
                        "Layer '{}', field '{}' refers to unknown layer '{}'",
                        layer.name,
                        field,
                        target
                    );
                }
            }
        }
    }

    for (layer, schema) in dataset.layers.iter().zip(schemas) {
        repo.create_layer(&layer.name, schema)
            .with_context(|| format!("Failed to create layer '{}'", layer.name))?;
    }

    for layer in dataset.layers {
        let count = layer.records.len();
        for (idx, record) in layer.records.into_iter().enumerate() {
            repo.insert_record(&layer.name, record)
                .with_context(|| format!("Invalid record {} in layer '{}'", idx, layer.name))?;
        }
        info!("Loaded {} records into layer '{}'", count, layer.name);
    }

    Ok(())
}
