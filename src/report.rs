//! Plain-text status lines for build outcomes and run summaries.

use std::path::Path;

use crate::build::{Action, BuildStats, NodeOutcome};
use crate::tree::TreeStats;

/// Escape control characters so names read from arbitrary text cannot
/// inject terminal control sequences.
pub fn sanitize_terminal_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02X}", code));
                } else {
                    out.push_str(&format!("\\u{{{:X}}}", code));
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// `path` relative to `root` when possible, sanitized.
pub fn display_path(path: &Path, root: &Path) -> String {
    let shown = match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => Path::new("."),
        Ok(rel) => rel,
        Err(_) => path,
    };
    sanitize_terminal_text(&shown.to_string_lossy())
}

/// Fixed-width tag for an action.
pub fn action_tag(action: &Action) -> &'static str {
    match action {
        Action::RootWrap | Action::Skipped | Action::ExistingDir => "[SKIP]",
        Action::CreatedDir => "[DIR ]",
        Action::Moved { renamed: false, .. } => "[MOVE]",
        Action::Moved { renamed: true, .. } | Action::Scaffolded { renamed: true } => "[REN ]",
        Action::Scaffolded { renamed: false } => "[FILE]",
        Action::Failed { .. } => "[FAIL]",
    }
}

/// One status line for an outcome.
///
/// Pre-existing targets produce no line; they only show up in the summary.
pub fn status_line(outcome: &NodeOutcome, root: &Path) -> Option<String> {
    let details = match &outcome.action {
        Action::ExistingDir | Action::Skipped => return None,
        Action::RootWrap => Some("root wrapper mapped to working root".to_string()),
        Action::Moved { from, renamed } => {
            let from = display_path(from, root);
            Some(if *renamed {
                format!("collision detected, renamed from {from}")
            } else {
                format!("from ./{from}")
            })
        }
        Action::Scaffolded { renamed: true } => Some(format!(
            "collision detected, placeholder for {}",
            sanitize_terminal_text(&outcome.name)
        )),
        Action::Failed { error } => Some(sanitize_terminal_text(error)),
        Action::CreatedDir | Action::Scaffolded { renamed: false } => None,
    };

    let tag = action_tag(&outcome.action);
    let path = match outcome.action {
        Action::RootWrap => sanitize_terminal_text(&outcome.name),
        _ => display_path(&outcome.path, root),
    };
    Some(match details {
        Some(details) => format!(" {tag}  {path:<50} ({details})"),
        None => format!(" {tag}  {path}"),
    })
}

/// Closing summary of a build.
pub fn summary_line(stats: &BuildStats) -> String {
    let mut line = format!(
        "Summary: {} Dirs | {} Files | {} Moved",
        stats.dirs_created, stats.files_scaffolded, stats.files_moved
    );
    if stats.files_renamed > 0 {
        line.push_str(&format!(" ({} renamed)", stats.files_renamed));
    }
    line.push_str(&format!(" | {} Skipped", stats.files_skipped));
    if stats.failures > 0 {
        line.push_str(&format!(" | {} Failed", stats.failures));
    }
    line
}

/// Counts line for a serialized tree.
pub fn tree_stats_line(stats: &TreeStats) -> String {
    format!("Files: {} | Dirs: {}", stats.files, stats.dirs)
}
