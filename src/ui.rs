//! Terminal output.
//!
//! Progress and warnings go to stdout, discrepancies and fatal errors to
//! stderr. Styling is dropped automatically when the stream is not a terminal.

use console::style;

use crate::compare::Discrepancy;
use crate::version::VersionParts;

/// Print a fatal error in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print one discrepancy as `Error: <message>`.
pub fn display_discrepancy(discrepancy: &Discrepancy) {
    eprintln!("{} {}", style("Error:").red(), discrepancy);
}

/// Print a non-fatal warning.
pub fn display_warning(message: &str) {
    println!("{} {}", style("Warning:").yellow(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Human-readable summary of a version's components.
///
/// e.g. `1.2.3rc1.dev4` → `release 1.2.3, pre-release rc1, dev 4`
pub fn describe_version(parts: &VersionParts) -> String {
    let mut description = format!("release {}", parts.release.join("."));
    if let Some(pre) = &parts.pre_release {
        description.push_str(&format!(", pre-release {}", pre));
    }
    if let Some(post) = &parts.post {
        description.push_str(&format!(", post {}", post));
    }
    if let Some(dev) = &parts.dev {
        description.push_str(&format!(", dev {}", dev));
    }
    description
}
