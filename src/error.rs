use std::path::PathBuf;

use thiserror::Error;

/// Exit status for a run that found discrepancies between version and tag.
pub const EXIT_DISCREPANCY: i32 = 1;

/// Exit status for extraction failures and command-line usage errors.
pub const EXIT_EXTRACTION: i32 = 2;

/// Exit status for configuration files that cannot be read or parsed.
pub const EXIT_CONFIG: i32 = 3;

/// Unified error type for vercheck operations
///
/// Every variant is fatal to the check: no version could be determined, so
/// no comparison is attempted.
#[derive(Error, Debug)]
pub enum VercheckError {
    #[error("No filename provided and no {patterns} directory found in '{}'", dir.display())]
    NoMetadataDir { dir: PathBuf, patterns: String },

    #[error("Multiple metadata directories found in '{}': {}", dir.display(), candidates.join(", "))]
    AmbiguousMetadataDir {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("Error loading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No Version found in '{}'", path.display())]
    MissingVersionField { path: PathBuf },

    #[error("Error loading file {}: {reason}", path.display())]
    ModuleLoad { path: PathBuf, reason: String },

    #[error("Module {} has no {attribute} attribute", path.display())]
    MissingAttribute { path: PathBuf, attribute: String },

    #[error("Version in {} is not a string", path.display())]
    NotText { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Usage error: {0}")]
    Usage(String),
}

/// Convenience type alias for Results in vercheck
pub type Result<T> = std::result::Result<T, VercheckError>;

impl VercheckError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VercheckError::Config(msg.into())
    }

    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        VercheckError::Usage(msg.into())
    }

    /// Create a module load error for `path`
    pub fn module_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        VercheckError::ModuleLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Process exit status the binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VercheckError::Config(_) => EXIT_CONFIG,
            _ => EXIT_EXTRACTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VercheckError::config("bad key");
        assert_eq!(err.to_string(), "Configuration error: bad key");
    }

    #[test]
    fn test_read_error_keeps_path_and_source() {
        let err = VercheckError::Read {
            path: PathBuf::from("pkg/PKG-INFO"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("pkg/PKG-INFO"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_metadata_dir_messages_are_distinct() {
        let none = VercheckError::NoMetadataDir {
            dir: PathBuf::from("."),
            patterns: "'*.egg-info'".to_string(),
        };
        let many = VercheckError::AmbiguousMetadataDir {
            dir: PathBuf::from("."),
            candidates: vec!["a.egg-info".to_string(), "b.egg-info".to_string()],
        };
        assert!(none.to_string().contains("no '*.egg-info' directory"));
        assert!(many.to_string().contains("a.egg-info, b.egg-info"));
        assert_ne!(none.to_string(), many.to_string());
    }

    #[test]
    fn test_module_errors_name_the_file() {
        let missing = VercheckError::MissingAttribute {
            path: PathBuf::from("about.py"),
            attribute: "__version__".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "Module about.py has no __version__ attribute"
        );

        let not_text = VercheckError::NotText {
            path: PathBuf::from("about.py"),
        };
        assert_eq!(not_text.to_string(), "Version in about.py is not a string");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(VercheckError::config("x").exit_code(), EXIT_CONFIG);
        assert_eq!(VercheckError::usage("x").exit_code(), EXIT_EXTRACTION);
        assert_eq!(
            VercheckError::module_load("a.py", "boom").exit_code(),
            EXIT_EXTRACTION
        );
        assert_eq!(
            VercheckError::MissingVersionField {
                path: PathBuf::from("PKG-INFO")
            }
            .exit_code(),
            EXIT_EXTRACTION
        );
        assert_ne!(EXIT_DISCREPANCY, EXIT_EXTRACTION);
    }
}
