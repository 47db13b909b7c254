//! Version extraction from project metadata
//!
//! Two sources are supported:
//! - `module` / `interpreter` - a metadata module declaring a version attribute
//! - `pkg_info` - a packaging metadata file, or a directory holding one

pub mod interpreter;
pub mod module;
pub mod pkg_info;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{ExtractConfig, ModuleStrategy};
use crate::error::Result;

/// How a version is read from a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Read the version attribute of a metadata module
    Module(ModuleStrategy),
    /// Scan a metadata file (or a directory containing one) for `Version:`
    MetadataFile,
}

/// A version and where it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedVersion {
    pub version: String,
    /// File the version was read from
    pub source: PathBuf,
    /// Set when `source` was located by searching a directory
    pub searched_dir: Option<PathBuf>,
}

/// Picks the strategy for `path` from its extension.
pub fn select_strategy(path: &Path, config: &ExtractConfig) -> Strategy {
    let is_module = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == config.module_extension);

    if is_module {
        Strategy::Module(config.module_strategy)
    } else {
        Strategy::MetadataFile
    }
}

/// Reads the version from `path` using `strategy`.
///
/// Every failure is fatal to the check and is returned, never reported here.
pub fn extract(path: &Path, strategy: Strategy, config: &ExtractConfig) -> Result<ExtractedVersion> {
    let extracted = match strategy {
        Strategy::Module(ModuleStrategy::Static) => ExtractedVersion {
            version: module::read_module_version(path, &config.attribute)?,
            source: path.to_path_buf(),
            searched_dir: None,
        },
        Strategy::Module(ModuleStrategy::Execute) => ExtractedVersion {
            version: interpreter::run_module_version(
                path,
                &config.attribute,
                &config.interpreter,
            )?,
            source: path.to_path_buf(),
            searched_dir: None,
        },
        Strategy::MetadataFile if path.is_dir() => {
            let file = pkg_info::resolve_metadata_file(path, &config.layouts)?;
            ExtractedVersion {
                version: pkg_info::read_version_field(&file)?,
                source: file,
                searched_dir: Some(path.to_path_buf()),
            }
        }
        Strategy::MetadataFile => ExtractedVersion {
            version: pkg_info::read_version_field(path)?,
            source: path.to_path_buf(),
            searched_dir: None,
        },
    };

    info!(
        version = %extracted.version,
        source = %extracted.source.display(),
        "extracted version"
    );
    Ok(extracted)
}
