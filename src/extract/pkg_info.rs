//! Packaging metadata files (`PKG-INFO`, `METADATA`).

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::MetadataLayout;
use crate::error::{Result, VercheckError};

const VERSION_FIELD: &str = "Version:";

/// Resolves a directory to the single metadata file it contains.
///
/// Looks for immediate subdirectories whose name ends with one of the layout
/// suffixes and appends that layout's file name. Exactly one candidate must
/// exist across all layouts.
pub fn resolve_metadata_file(dir: &Path, layouts: &[MetadataLayout]) -> Result<PathBuf> {
    let read_err = |source| VercheckError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let entries = fs::read_dir(dir).map_err(read_err)?;
    let candidates = find_candidates(entries.map(|entry| entry.map(|e| e.path())), layouts)
        .map_err(read_err)?;

    match candidates.as_slice() {
        [] => Err(VercheckError::NoMetadataDir {
            dir: dir.to_path_buf(),
            patterns: layouts
                .iter()
                .map(|l| format!("'*{}'", l.dir_suffix))
                .collect::<Vec<_>>()
                .join(" or "),
        }),
        [(found, layout)] => {
            debug!(dir = %found.display(), "resolved metadata directory");
            Ok(found.join(&layout.file_name))
        }
        many => Err(VercheckError::AmbiguousMetadataDir {
            dir: dir.to_path_buf(),
            candidates: many
                .iter()
                .filter_map(|(p, _)| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

/// Collects the directories matching a layout, sorted by path.
///
/// An entry that cannot be read fails the whole search, since it may be a
/// second candidate.
fn find_candidates<'a, I>(
    entries: I,
    layouts: &'a [MetadataLayout],
) -> std::io::Result<Vec<(PathBuf, &'a MetadataLayout)>>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry?;
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(layout) = layouts.iter().find(|l| name.ends_with(&l.dir_suffix)) {
            candidates.push((path, layout));
        }
    }
    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(candidates)
}

/// Returns the value of the first line starting with `Version:`, trimmed.
///
/// Everything after the first colon is kept, so `Version: 1.0:extra` yields
/// `1.0:extra` rather than only the text up to a second colon; such a value
/// then fails the version grammar.
pub fn find_version_field<I, S>(lines: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().find_map(|line| {
        let line = line.as_ref();
        line.strip_prefix(VERSION_FIELD)
            .map(|value| value.trim().to_string())
    })
}

/// Reads the version declared in a metadata file.
///
/// The file handle is released before returning on every path.
pub fn read_version_field(path: &Path) -> Result<String> {
    let read_err = |source| VercheckError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .map_err(read_err)?;

    find_version_field(&lines).ok_or_else(|| VercheckError::MissingVersionField {
        path: path.to_path_buf(),
    })
}
