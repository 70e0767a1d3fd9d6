//! @ai:module:intent Load scanner configuration from TOML
//! @ai:module:layer infrastructure
//! @ai:module:public_api ScanConfig, CategoryConfig, CONFIG_FILE_NAME
//! @ai:module:depends_on category, wrapper, position, pattern, scanner, error
//! @ai:module:stateless true

use crate::category::{default_categories, MarkerCategory, Severity};
use crate::error::{Error, Result};
use crate::pattern::{default_wrappers, PatternTable};
use crate::position::PositionEncoding;
use crate::scanner::Scanner;
use crate::wrapper::Wrapper;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up by [`ScanConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "annoscan.toml";

/// @ai:intent Complete scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    #[serde(default = "default_category_configs")]
    pub categories: Vec<CategoryConfig>,
    #[serde(default = "default_wrappers")]
    pub wrappers: Vec<Wrapper>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub position_encoding: PositionEncoding,
    #[serde(default)]
    pub max_lines: Option<usize>,
}

/// @ai:intent One category entry as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryConfig {
    pub code: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub severity: Severity,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            categories: default_category_configs(),
            wrappers: default_wrappers(),
            extensions: default_extensions(),
            position_encoding: PositionEncoding::default(),
            max_lines: None,
        }
    }
}

fn default_category_configs() -> Vec<CategoryConfig> {
    default_categories().into_iter().map(CategoryConfig::from).collect()
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

impl From<MarkerCategory> for CategoryConfig {
    fn from(category: MarkerCategory) -> Self {
        Self {
            code: category.code,
            keywords: category.keywords,
            severity: category.severity,
        }
    }
}

impl From<CategoryConfig> for MarkerCategory {
    fn from(config: CategoryConfig) -> Self {
        MarkerCategory::new(config.code, config.keywords, config.severity)
    }
}

impl ScanConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// @ai:intent Load annoscan.toml from a directory, or fall back to defaults
    /// @ai:effects fs:read
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
            Ok(Self::default())
        }
    }

    /// @ai:intent Compile the configured categories into a scanner
    /// @ai:effects pure
    pub fn build_scanner(&self) -> Result<Scanner> {
        let categories = self
            .categories
            .iter()
            .cloned()
            .map(MarkerCategory::from)
            .collect();
        let table = PatternTable::new(categories, self.wrappers.clone())?;

        Ok(Scanner::new(table)
            .with_encoding(self.position_encoding)
            .with_max_lines(self.max_lines))
    }

    /// @ai:intent Check whether a file should be scanned based on its extension
    /// @ai:example ("notes.MD") -> true with default extensions
    /// @ai:effects pure
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}
