//! Table configuration via TOML
//!
//! A table needs very little configuration: whether reads enrich display
//! labels by default, and optional sizing hints for the concurrent map.

use serde::{Deserialize, Serialize};
use std::path::Path;

use brickhouse_core::{Error, Result};

/// Table configuration
///
/// # Example
///
/// ```toml
/// # Attach display labels to reference fields on read
/// fill_dis = true
///
/// # Pre-size the map
/// initial_capacity = 10000
///
/// # Drop these fields from every stored record
/// strip_fields = ["mod"]
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableConfig {
    /// Enrich display labels when the caller does not say
    #[serde(default)]
    pub fill_dis: bool,
    /// Expected number of records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_capacity: Option<usize>,
    /// Number of map shards; a power of two greater than one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_amount: Option<usize>,
    /// Fields the store manages; stripped from records before storing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strip_fields: Vec<String>,
}

impl TableConfig {
    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `shard_amount` is not a power of two
    /// greater than one.
    pub fn validate(&self) -> Result<()> {
        if let Some(shards) = self.shard_amount {
            if shards < 2 || !shards.is_power_of_two() {
                return Err(Error::invalid_config(format!(
                    "shard_amount must be a power of two greater than 1, got {}",
                    shards
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the text is not valid TOML for this
    /// structure or fails [`TableConfig::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TableConfig =
            toml::from_str(content).map_err(|e| Error::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML text
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::invalid_config(e.to_string()))
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Brickhouse table configuration
#
# Attach referent display labels to reference fields on read,
# unless the caller asks otherwise (default: false)
fill_dis = false

# Expected number of records, to pre-size the map (optional)
# initial_capacity = 10000

# Number of map shards, a power of two greater than 1 (optional)
# shard_amount = 64

# Fields managed by the store itself; removed from records before storing
# strip_fields = ["mod"]
"#
    }
}
