//! Number field overrides loaded from TOML
//!
//! ```toml
//! [[fields]]
//! entity = "bag"
//! metric = "max_weight"
//! gte = 0.0
//! lte = 30.0
//! decimals = 1
//!
//! [fields.messages]
//! min_gt_max = "Lower bound must not exceed upper bound"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use packgauge_domain::model::{FieldMessages, NumberFieldConfig, NumberFieldTable};
use packgauge_types::{ConfigError, Entity, Error, FieldKey, Metric, Result};

#[derive(Debug, Deserialize)]
struct FieldEntry {
    entity: Entity,
    metric: Metric,
    gte: f64,
    lte: f64,
    #[serde(default)]
    decimals: u32,
    #[serde(default)]
    messages: FieldMessages,
}

/// Container for parsing fields.toml
#[derive(Debug, Deserialize)]
struct FieldsFile {
    #[serde(default)]
    fields: Vec<FieldEntry>,
}

/// Parsed field overrides
#[derive(Debug)]
pub struct NumberFieldLoader {
    overrides: Vec<(FieldKey, NumberFieldConfig)>,
}

impl NumberFieldLoader {
    /// Load overrides from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read number field file {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load overrides from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: FieldsFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse number field TOML: {}",
                e
            )))
        })?;

        let overrides = file
            .fields
            .into_iter()
            .map(|entry| {
                let key = FieldKey::new(entry.entity, entry.metric);
                let config = NumberFieldConfig {
                    gte: entry.gte,
                    lte: entry.lte,
                    decimals: entry.decimals,
                    messages: entry.messages,
                };
                (key, config)
            })
            .collect();

        Ok(Self { overrides })
    }

    pub fn count(&self) -> usize {
        self.overrides.len()
    }

    /// Apply the overrides on top of `base`. The first invalid entry aborts
    /// the whole load.
    pub fn apply(self, mut base: NumberFieldTable) -> Result<NumberFieldTable> {
        for (key, config) in self.overrides {
            base.insert(key, config)?;
        }
        Ok(base)
    }

    /// Built-in table with these overrides applied
    pub fn into_table(self) -> Result<NumberFieldTable> {
        self.apply(NumberFieldTable::builtin())
    }
}

/// Build the field table, reading overrides from `path` when given
pub fn load_number_fields(path: Option<&Path>) -> Result<NumberFieldTable> {
    match path {
        Some(path) => {
            let loader = NumberFieldLoader::load_from_file(path)?;
            tracing::debug!(path = %path.display(), overrides = loader.count(), "loaded number field overrides");
            loader.into_table()
        }
        None => Ok(NumberFieldTable::builtin()),
    }
}
