//! Main check workflow
//!
//! Ties extraction, comparison and reporting together. Nothing here exits the
//! process: the outcome is returned and `main` maps it to an exit status.

use std::path::PathBuf;

use tracing::debug;

use crate::compare::{self, Discrepancy};
use crate::config::{Config, ModuleStrategy};
use crate::error::{Result, VercheckError, EXIT_DISCREPANCY};
use crate::extract::{self, ExtractedVersion, Strategy};
use crate::ui;
use crate::version;

/// Arguments for the check workflow
///
/// Mirrors the CLI arguments without depending on clap, so the workflow can be
/// called programmatically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckArgs {
    /// Release tag to check
    pub tag: String,

    /// Metadata module, metadata file or directory; `None` searches the
    /// current directory
    pub path: Option<PathBuf>,

    /// Only validate the tag's grammar
    pub check_only: bool,

    /// Run metadata modules instead of scanning them (trusted input only)
    pub execute: bool,

    /// Prefix stripped from the tag; overrides the configured one
    pub tag_prefix: Option<String>,
}

/// Outcome of a check that got as far as comparing
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    /// Tag after prefix stripping
    pub tag: String,

    /// `None` in check-only mode
    pub extracted: Option<ExtractedVersion>,

    pub discrepancies: Vec<Discrepancy>,
}

impl CheckReport {
    pub fn is_success(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// 0 when releasable, 1 when any discrepancy was found
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            EXIT_DISCREPANCY
        }
    }
}

/// Strips `prefix` from `tag` when present.
pub fn normalize_tag<'a>(tag: &'a str, prefix: Option<&str>) -> &'a str {
    match prefix {
        Some(prefix) if !prefix.is_empty() => tag.strip_prefix(prefix).unwrap_or(tag),
        _ => tag,
    }
}

/// Runs one version check.
///
/// 1. Normalize the tag
/// 2. In check-only mode, validate the tag and stop
/// 3. Pick the extraction strategy from the path (warning when the path is
///    not a module, or when a module is scanned without running it) and
///    extract the version
/// 4. Compare version and tag
///
/// # Returns
/// * `Ok(CheckReport)` - comparison ran; inspect `discrepancies`
/// * `Err` - extraction failed or the arguments conflict; nothing was compared
pub fn run_check(args: &CheckArgs, config: &Config) -> Result<CheckReport> {
    let prefix = args.tag_prefix.as_deref().or(config.tag_prefix.as_deref());
    let tag = normalize_tag(&args.tag, prefix).to_string();
    if tag != args.tag {
        debug!(raw = %args.tag, tag = %tag, "stripped tag prefix");
    }

    if args.check_only {
        if let Some(path) = &args.path {
            return Err(VercheckError::usage(format!(
                "--check-only does not take a path (got '{}')",
                path.display()
            )));
        }
        return Ok(CheckReport {
            discrepancies: compare::check_tag(&tag).into_iter().collect(),
            tag,
            extracted: None,
        });
    }

    let mut extract_config = config.extract.clone();
    if args.execute {
        extract_config.module_strategy = ModuleStrategy::Execute;
    }

    let path = match &args.path {
        Some(path) => path.clone(),
        None => {
            ui::display_status("No filename provided, searching the current directory");
            PathBuf::from(".")
        }
    };

    let strategy = extract::select_strategy(&path, &extract_config);
    if strategy == Strategy::MetadataFile && args.path.is_some() {
        ui::display_warning(&format!(
            "filename {} does not end with '.{}'",
            path.display(),
            extract_config.module_extension
        ));
        ui::display_status(&format!("Checking version in {}", path.display()));
    }
    if strategy == Strategy::Module(ModuleStrategy::Static) {
        ui::display_warning(&format!(
            "module {} was not executed; import-time errors are not detected (use --execute for trusted modules)",
            path.display()
        ));
    }

    let extracted = extract::extract(&path, strategy, &extract_config)?;
    if extracted.searched_dir.is_some() {
        let metadata_dir = extracted.source.parent().unwrap_or(&extracted.source);
        ui::display_status(&format!("Found '{}'", metadata_dir.display()));
    }

    let discrepancies = compare::compare(&extracted.version, &tag);
    Ok(CheckReport {
        tag,
        extracted: Some(extracted),
        discrepancies,
    })
}

/// Prints a report: each discrepancy to stderr, or a success line to stdout.
pub fn report(report: &CheckReport) {
    if !report.is_success() {
        for discrepancy in &report.discrepancies {
            ui::display_discrepancy(discrepancy);
        }
        return;
    }

    let description = version::parse(&report.tag)
        .map(|parts| ui::describe_version(&parts))
        .unwrap_or_default();
    match &report.extracted {
        Some(extracted) => ui::display_success(&format!(
            "Version {} in {} matches tag {} ({})",
            extracted.version,
            extracted.source.display(),
            report.tag,
            description
        )),
        None => ui::display_success(&format!(
            "Tag {} is a valid version ({})",
            report.tag, description
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("v1.0", Some("v")), "1.0");
        assert_eq!(normalize_tag("1.0", Some("v")), "1.0");
        assert_eq!(normalize_tag("v1.0", None), "v1.0");
        assert_eq!(normalize_tag("v1.0", Some("")), "v1.0");
        assert_eq!(normalize_tag("release-1.0", Some("release-")), "1.0");
    }

    #[test]
    fn test_check_only_valid_tag() {
        let args = CheckArgs {
            tag: "0.1.0".to_string(),
            check_only: true,
            ..CheckArgs::default()
        };
        let report = run_check(&args, &Config::default()).unwrap();
        assert!(report.is_success());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.extracted, None);
    }

    #[test]
    fn test_check_only_invalid_tag() {
        let args = CheckArgs {
            tag: "0.1.0a".to_string(),
            check_only: true,
            ..CheckArgs::default()
        };
        let report = run_check(&args, &Config::default()).unwrap();
        assert_eq!(report.exit_code(), 1);
        assert_eq!(
            report.discrepancies,
            vec![Discrepancy::InvalidTag {
                tag: "0.1.0a".to_string()
            }]
        );
    }

    #[test]
    fn test_check_only_rejects_path() {
        let args = CheckArgs {
            tag: "0.1.0".to_string(),
            path: Some(PathBuf::from("pkg.egg-info")),
            check_only: true,
            ..CheckArgs::default()
        };
        let err = run_check(&args, &Config::default()).unwrap_err();
        assert!(matches!(err, VercheckError::Usage(_)));
    }

    #[test]
    fn test_configured_prefix_and_override() {
        let config = Config {
            tag_prefix: Some("v".to_string()),
            ..Config::default()
        };
        let args = CheckArgs {
            tag: "v2.0".to_string(),
            check_only: true,
            ..CheckArgs::default()
        };
        assert_eq!(run_check(&args, &config).unwrap().tag, "2.0");

        let args = CheckArgs {
            tag: "release-2.0".to_string(),
            check_only: true,
            tag_prefix: Some("release-".to_string()),
            ..CheckArgs::default()
        };
        assert_eq!(run_check(&args, &config).unwrap().tag, "2.0");
    }

    #[test]
    fn test_report_exit_codes() {
        let ok = CheckReport {
            tag: "1.0".to_string(),
            extracted: None,
            discrepancies: vec![],
        };
        assert_eq!(ok.exit_code(), 0);
        report(&ok);

        let bad = CheckReport {
            discrepancies: vec![Discrepancy::InvalidTag {
                tag: "x".to_string(),
            }],
            ..ok
        };
        assert_eq!(bad.exit_code(), 1);
        report(&bad);
    }
}
