//! Pure formatting functions for UI output.
//!
//! Functions here only print; colouring goes through `console` so it is
//! dropped automatically when the stream is not a terminal.

use console::style;

use crate::sync::SyncAction;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Format the header line of a sync plan
pub fn sync_plan_header(actions: usize, dry_run: bool) -> String {
    match (actions, dry_run) {
        (0, _) => "Jira versions are up to date".to_string(),
        (n, true) => format!("Dry run: {} change(s) would be made", n),
        (n, false) => format!("Applying {} change(s)", n),
    }
}

/// Display every planned sync action.
///
/// # Arguments
/// * `actions` - Actions in execution order
/// * `dry_run` - Whether the actions are only previewed
pub fn display_sync_plan(actions: &[SyncAction], dry_run: bool) {
    println!("{}", style(sync_plan_header(actions.len(), dry_run)).bold());
    for action in actions {
        println!("  - {}", action);
    }
}
