use std::fmt;

use tracing::debug;

use crate::version;

/// A single reason why a version and a tag cannot be released together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    /// The declared version and the tag differ textually
    Mismatch { version: String, tag: String },
    /// The tag does not match the version grammar
    InvalidTag { tag: String },
    /// The declared version does not match the version grammar
    InvalidVersion { version: String },
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::Mismatch { version, tag } => {
                write!(f, "Version {} does not match tag {}", version, tag)
            }
            Discrepancy::InvalidTag { tag } => {
                write!(f, "Tag name '{}' is not PEP-386 compliant", tag)
            }
            Discrepancy::InvalidVersion { version } => {
                write!(f, "Version {} is not PEP-386 compliant", version)
            }
        }
    }
}

/// Compares a declared version against a release tag.
///
/// Textual equality, tag grammar and version grammar are checked
/// independently; every failing check contributes one entry, in that order.
/// An empty result means the pair is releasable.
pub fn compare(version: &str, tag: &str) -> Vec<Discrepancy> {
    let mut discrepancies = Vec::new();

    if version != tag {
        discrepancies.push(Discrepancy::Mismatch {
            version: version.to_string(),
            tag: tag.to_string(),
        });
    }
    if let Some(invalid) = check_tag(tag) {
        discrepancies.push(invalid);
    }
    if !version::is_valid(version) {
        discrepancies.push(Discrepancy::InvalidVersion {
            version: version.to_string(),
        });
    }

    debug!(
        version,
        tag,
        found = discrepancies.len(),
        "compared version against tag"
    );
    discrepancies
}

/// Checks only the tag's grammar.
pub fn check_tag(tag: &str) -> Option<Discrepancy> {
    if version::is_valid(tag) {
        None
    } else {
        Some(Discrepancy::InvalidTag {
            tag: tag.to_string(),
        })
    }
}
