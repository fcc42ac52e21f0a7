//! Engine-wide planner settings.
//!
//! The host engine keeps block size, tuple header size and per-unit costs as
//! process-wide configuration. Here they are an explicit [`Settings`] value
//! passed into the planner callbacks, loadable from TOML:
//!
//! ```toml
//! block_size = 8192
//! log_level = "debug"
//!
//! [cost]
//! seq_page_cost = 1.0
//! cpu_tuple_cost = 0.01
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML for [`Settings`].
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has an out-of-range value.
    #[error("invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Per-unit planner costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Cost of a sequentially fetched page.
    pub seq_page_cost: f64,
    /// Cost of processing one row.
    pub cpu_tuple_cost: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            seq_page_cost: default_seq_page_cost(),
            cpu_tuple_cost: default_cpu_tuple_cost(),
        }
    }
}

/// Planner and logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Size of one storage block in bytes.
    pub block_size: u32,
    /// Unaligned size of a stored row header in bytes.
    pub heap_tuple_header_size: u32,
    /// Alignment applied to the row header.
    pub max_align: u32,
    /// Per-unit costs.
    pub cost: CostModel,
    /// Default log level when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            heap_tuple_header_size: default_heap_tuple_header_size(),
            max_align: default_max_align(),
            cost: CostModel::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_block_size() -> u32 {
    8192
}

fn default_heap_tuple_header_size() -> u32 {
    23
}

fn default_max_align() -> u32 {
    8
}

fn default_seq_page_cost() -> f64 {
    1.0
}

fn default_cpu_tuple_cost() -> f64 {
    0.01
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Loads settings from a TOML file and validates them.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from a TOML string and validates them.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that every setting is usable by the planner.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.block_size == 0 {
            return Err(SettingsError::Invalid {
                name: "block_size",
                reason: "must be positive".to_string(),
            });
        }
        if self.heap_tuple_header_size == 0 {
            return Err(SettingsError::Invalid {
                name: "heap_tuple_header_size",
                reason: "must be positive".to_string(),
            });
        }
        if self.max_align == 0 || !self.max_align.is_power_of_two() {
            return Err(SettingsError::Invalid {
                name: "max_align",
                reason: format!("{} is not a power of two", self.max_align),
            });
        }
        for (name, value) in [
            ("cost.seq_page_cost", self.cost.seq_page_cost),
            ("cost.cpu_tuple_cost", self.cost.cpu_tuple_cost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid {
                    name,
                    reason: format!("{} is not a non-negative number", value),
                });
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(SettingsError::Invalid {
                name: "log_level",
                reason: format!(
                    "'{}' must be one of: {}",
                    self.log_level,
                    valid_levels.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Row header size rounded up to the alignment boundary.
    pub fn aligned_tuple_header_size(&self) -> u32 {
        let align = self.max_align;
        self.heap_tuple_header_size.div_ceil(align) * align
    }
}
