//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Environment variable naming the YAML file to load
pub const CONFIG_ENV_VAR: &str = "CATEGORY_DESK_CONFIG";

/// Which backend stores the records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Volatile store, lost when the process exits
    #[default]
    InMemory,

    /// SQLite database file (requires the `sqlite` feature)
    Sqlite { url: String },
}

/// The fixed choices offered by each combo box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSets {
    pub brands: Vec<String>,
    pub types: Vec<String>,
    pub sizes: Vec<String>,
    pub units: Vec<String>,
}

impl Default for OptionSets {
    fn default() -> Self {
        fn owned(values: &[&str]) -> Vec<String> {
            values.iter().map(|v| v.to_string()).collect()
        }

        Self {
            brands: owned(&["Nike", "Adidas", "Puma", "Reebok", "Under Armour"]),
            types: owned(&["Shoes", "T-shirt", "Shorts", "Jacket", "Socks"]),
            sizes: owned(&["XS", "S", "M", "L", "XL", "XXL"]),
            units: owned(&["kg", "g", "lb", "oz"]),
        }
    }
}

impl OptionSets {
    /// The option list for a form field name
    pub fn for_field(&self, field: &str) -> Option<&[String]> {
        match field {
            "brand" => Some(self.brands.as_slice()),
            "type" => Some(self.types.as_slice()),
            "size" => Some(self.sizes.as_slice()),
            "unit" => Some(self.units.as_slice()),
            _ => None,
        }
    }

    fn named(&self) -> [(&'static str, &[String]); 4] {
        [
            ("brands", self.brands.as_slice()),
            ("types", self.types.as_slice()),
            ("sizes", self.sizes.as_slice()),
            ("units", self.units.as_slice()),
        ]
    }
}

/// Complete configuration for the catalog form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    /// Business id prefix (e.g. `CAT`)
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Digits after the prefix
    #[serde(default = "default_id_width")]
    pub id_width: u32,

    #[serde(default)]
    pub options: OptionSets,
}

fn default_id_prefix() -> String {
    "CAT".to_string()
}

fn default_id_width() -> u32 {
    3
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by `CATEGORY_DESK_CONFIG`, or the defaults
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => {
                tracing::info!(path = %path, "loading configuration");
                Self::from_yaml_file(&path)
            }
            _ => {
                tracing::debug!("no configuration file set, using defaults");
                Ok(Self::default_config())
            }
        }
    }

    /// Check the configuration for inconsistencies
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("id_prefix must not be empty".into()));
        }

        if !(1..=6).contains(&self.id_width) {
            return Err(ConfigError::Invalid(format!(
                "id_width must be between 1 and 6, got {}",
                self.id_width
            )));
        }

        for (name, values) in self.options.named() {
            if values.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "option set '{}' must not be empty",
                    name
                )));
            }

            let mut seen = HashSet::new();
            if let Some(dup) = values.iter().find(|v| !seen.insert(v.as_str())) {
                return Err(ConfigError::Invalid(format!(
                    "option set '{}' lists '{}' twice",
                    name, dup
                )));
            }
        }

        Ok(())
    }

    /// Default configuration: in-memory storage, `CAT-NNN` ids, stock options
    pub fn default_config() -> Self {
        Self {
            storage: StorageConfig::InMemory,
            id_prefix: default_id_prefix(),
            id_width: default_id_width(),
            options: OptionSets::default(),
        }
    }
}
