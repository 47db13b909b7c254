use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, VercheckError};

/// Represents the complete configuration for vercheck.
///
/// Every key is optional; command-line flags override what is set here.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Prefix stripped from tags before comparison, e.g. `v`
    #[serde(default)]
    pub tag_prefix: Option<String>,

    #[serde(default)]
    pub extract: ExtractConfig,
}

/// How version extraction from a module is performed.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStrategy {
    /// Scan the module text for the version assignment
    #[default]
    Static,
    /// Run the module with an interpreter (trusted input only)
    Execute,
}

/// A packaging metadata directory naming convention.
///
/// `dir_suffix` identifies the directory, `file_name` the metadata file inside it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct MetadataLayout {
    pub dir_suffix: String,
    pub file_name: String,
}

impl MetadataLayout {
    pub fn new(dir_suffix: impl Into<String>, file_name: impl Into<String>) -> Self {
        MetadataLayout {
            dir_suffix: dir_suffix.into(),
            file_name: file_name.into(),
        }
    }
}

fn default_attribute() -> String {
    "__version__".to_string()
}

fn default_module_extension() -> String {
    "py".to_string()
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_layouts() -> Vec<MetadataLayout> {
    vec![
        MetadataLayout::new(".egg-info", "PKG-INFO"),
        MetadataLayout::new(".dist-info", "METADATA"),
    ]
}

/// Configuration for version extraction.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExtractConfig {
    #[serde(default = "default_attribute")]
    pub attribute: String,

    #[serde(default = "default_module_extension")]
    pub module_extension: String,

    #[serde(default)]
    pub module_strategy: ModuleStrategy,

    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    #[serde(default = "default_layouts")]
    pub layouts: Vec<MetadataLayout>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            attribute: default_attribute(),
            module_extension: default_module_extension(),
            module_strategy: ModuleStrategy::default(),
            interpreter: default_interpreter(),
            layouts: default_layouts(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `vercheck.toml` in current directory
/// 3. `.vercheck.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(VercheckError::Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return read_config(Path::new(path));
    }

    let local = Path::new("./vercheck.toml");
    if local.exists() {
        return read_config(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(".vercheck.toml");
        if user.exists() {
            return read_config(&user);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(path).map_err(|e| {
        VercheckError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
        .map_err(|e| VercheckError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration from TOML text.
pub fn parse_config(config_str: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(config_str)
}
