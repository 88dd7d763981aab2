//! Formatting functions for run output.
//!
//! Line builders are pure and return strings; the `display_*` wrappers print
//! them to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::VersionBump;

/// Format an error message with a red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red(), message)
}

/// Format the failure line for the current environment.
///
/// Inside GitHub Actions this is an `::error::` workflow command so the
/// runner annotates the step; elsewhere it is a styled error line.
pub fn format_failure(message: &str, in_actions: bool) -> String {
    if in_actions {
        // Workflow commands are single-line; escape as the runner expects.
        let escaped = message
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");
        format!("::error::{}", escaped)
    } else {
        format_error(message)
    }
}

/// Format the "previous -> next" summary line.
pub fn format_version_change(previous_tag: &str, new_tag: &str, bump: VersionBump) -> String {
    format!(
        "{} {} {} ({} bump)",
        style(previous_tag).red(),
        style("->").bold(),
        style(new_tag).green(),
        bump
    )
}

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print the single failure message of a run.
pub fn display_failure(message: &str, in_actions: bool) {
    if in_actions {
        // Annotations are read from stdout by the runner.
        println!("{}", format_failure(message, true));
    } else {
        eprintln!("{}", format_failure(message, false));
    }
}

/// Print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Print the resolved and proposed tags.
pub fn display_version_change(previous_tag: &str, new_tag: &str, bump: VersionBump) {
    eprintln!("{}", format_version_change(previous_tag, new_tag, bump));
}

/// Print a boundary warning with a yellow warning icon.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}
