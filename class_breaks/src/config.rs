//! Generator configuration file support.
//!
//! Defaults applied to requests that do not spell out every option, read
//! from a TOML file:
//!
//! ```toml
//! [defaults]
//! geometry_field = "geom"
//! class_count = 5
//! classifier = { kind = "quantiles" }
//!
//! [style]
//! title = "Class breaks"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::RepositoryError;
use crate::models::{
    ClassificationRequest, Classifier, FieldPath, SourceQuery, DEFAULT_GEOMETRY_FIELD,
};

/// Generator configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub defaults: DefaultSettings,
    #[serde(default)]
    pub style: StyleSettings,
}

/// Request defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSettings {
    #[serde(default = "default_geometry_field")]
    pub geometry_field: String,
    #[serde(default = "default_class_count")]
    pub class_count: usize,
    #[serde(default)]
    pub classifier: Classifier,
}

/// Optional labels written into every generated style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSettings {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

fn default_geometry_field() -> String {
    DEFAULT_GEOMETRY_FIELD.to_string()
}

fn default_class_count() -> usize {
    5
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            geometry_field: default_geometry_field(),
            class_count: default_class_count(),
            classifier: Classifier::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(GeneratorConfig)` if successful
    /// * `Err(RepositoryError::ConfigurationError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text and validate it.
    pub fn from_toml(content: &str) -> Result<Self, RepositoryError> {
        let config: GeneratorConfig = toml::from_str(content).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `class_breaks.toml` in:
    /// 1. Current directory
    /// 2. `class_breaks/` directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("class_breaks.toml"),
            PathBuf::from("class_breaks/class_breaks.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::ConfigurationError(
            "No class_breaks.toml found in standard locations".to_string(),
        ))
    }

    pub fn validate(&self) -> Result<(), RepositoryError> {
        if self.defaults.class_count == 0 {
            return Err(RepositoryError::ConfigurationError(
                "defaults.class_count must be at least 1".to_string(),
            ));
        }
        if self.defaults.geometry_field.trim().is_empty() {
            return Err(RepositoryError::ConfigurationError(
                "defaults.geometry_field must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a request for `value_field` on `source` with the configured defaults.
    pub fn request(&self, source: SourceQuery, value_field: FieldPath) -> ClassificationRequest {
        let mut request = ClassificationRequest::new(source, value_field, self.defaults.class_count)
            .with_geometry_field(self.defaults.geometry_field.clone())
            .with_classifier(self.defaults.classifier.clone());
        request.style_title = self.style.title.clone();
        request.style_name = self.style.name.clone();
        request
    }
}
