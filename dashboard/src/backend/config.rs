//! # Dashboard Configuration
//!
//! User settings live in a single YAML file, by default
//! `<config dir>/wellness-dashboard/config.yaml`. Every field has a default, so a
//! partial file (or no file at all) is valid.
//!
//! ## YAML Format
//!
//! ```yaml
//! data_directory: /home/me/.local/share/wellness-dashboard
//! export_directory: /home/me/Documents
//! format:
//!   locale: en-IN
//!   currency_symbol: null
//!   currency_decimals: 2
//! default_page_sort:
//!   expenses:
//!     field: date
//!     order: descending
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::{ExpenseField, GoalField, MoodField, SortOrder, TaskField, ViewParams};

use crate::backend::domain::FormatConfig;

const APP_DIRECTORY: &str = "wellness-dashboard";
const CONFIG_FILE: &str = "config.yaml";

/// Initial sort of one list page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SortPreference<F> {
    pub field: F,
    pub order: SortOrder,
}

impl<F: Copy> SortPreference<F> {
    pub fn new(field: F, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Fresh view parameters starting from this sort
    pub fn to_params(&self) -> ViewParams<F> {
        ViewParams::new(self.field, self.order)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSortDefaults {
    pub expenses: SortPreference<ExpenseField>,
    pub tasks: SortPreference<TaskField>,
    pub goals: SortPreference<GoalField>,
    pub moods: SortPreference<MoodField>,
}

impl Default for PageSortDefaults {
    fn default() -> Self {
        Self {
            expenses: SortPreference::new(ExpenseField::Date, SortOrder::Descending),
            tasks: SortPreference::new(TaskField::DueDate, SortOrder::Ascending),
            goals: SortPreference::new(GoalField::TargetDate, SortOrder::Ascending),
            moods: SortPreference::new(MoodField::Date, SortOrder::Descending),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where the JSON collections live; the platform data dir when unset
    pub data_directory: Option<PathBuf>,
    pub format: FormatConfig,
    pub default_page_sort: PageSortDefaults,
    /// Target of CSV exports; the documents folder when unset
    pub export_directory: Option<PathBuf>,
}

impl DashboardConfig {
    /// `<config dir>/wellness-dashboard/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIRECTORY).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let yaml_content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        if yaml_content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: DashboardConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("⚙️ Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config atomically: temp file first, then rename
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml_content = serde_yaml::to_string(self)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, path)?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// The configured data directory, else the platform data dir, else `./data`
    pub fn resolved_data_directory(&self) -> PathBuf {
        self.data_directory
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIRECTORY)))
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}
