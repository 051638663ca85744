use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::layout::compute_tree_structure;
use super::{EntryKind, SerializeConfig, Serialized, TreeStats};

/// Names never listed, regardless of ignore rules.
pub const SYSTEM_EXCLUDES: &[&str] = &[
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    "node_modules",
    ".DS_Store",
    ".env",
    ".gitignore",
    "thumbs.db",
    ".idea",
    ".vscode",
];

/// Entry data collected during traversal, before layout.
#[derive(Debug, Clone)]
pub(super) struct RawEntry {
    pub depth: usize,
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Serialize the tree below `root`.
///
/// Symlinks are listed but never followed. Directories that cannot be read
/// contribute no children.
pub fn serialize(root: &Path, config: &SerializeConfig) -> Serialized {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    // filter_entry keeps excluded directories from being descended at all.
    let iter = walker.into_iter().filter_entry(|entry| {
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        let relative = entry.path().strip_prefix(root).unwrap_or_else(|_| entry.path());
        config.includes(&name, relative)
    });

    let mut raw_entries = Vec::new();
    for entry_result in iter {
        match entry_result {
            Ok(entry) => {
                if entry.depth() == 0 {
                    continue;
                }
                let file_type = entry.file_type();
                let kind = if file_type.is_symlink() {
                    EntryKind::Symlink {
                        target: std::fs::read_link(entry.path())
                            .ok()
                            .map(|t| t.to_string_lossy().to_string()),
                    }
                } else if file_type.is_dir() {
                    EntryKind::Dir
                } else {
                    EntryKind::File
                };
                raw_entries.push(RawEntry {
                    depth: entry.depth(),
                    name: entry.file_name().to_string_lossy().to_string(),
                    path: entry.path().to_path_buf(),
                    kind,
                });
            }
            Err(e) => tracing::debug!("skipping unreadable branch: {}", e),
        }
    }

    let entries = compute_tree_structure(&raw_entries);
    let mut stats = TreeStats::default();
    let mut text = String::new();
    for entry in &entries {
        match entry.kind {
            EntryKind::Dir => stats.dirs += 1,
            EntryKind::File | EntryKind::Symlink { target: Some(_) } => stats.files += 1,
            EntryKind::Symlink { target: None } => {}
        }
        text.push_str(&entry.line());
        text.push('\n');
    }

    Serialized {
        entries,
        text,
        stats,
    }
}
