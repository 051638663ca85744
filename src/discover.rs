//! Finding a structure file in a directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::textfile::read_text_file;
use crate::tree::STRUCTURE_FILE;

/// File names tried first, in order.
pub const CANDIDATE_NAMES: &[&str] = &[
    STRUCTURE_FILE,
    "dir-structure.txt",
    "structure.txt",
    "tree.txt",
];

/// Extensions scanned when no candidate name exists.
const SCAN_EXTENSIONS: &[&str] = &["txt", "md"];

/// Lines inspected by [`looks_like_structure`].
const HEAD_LINES: usize = 15;

const TREE_MARKERS: &[&str] = &["├──", "└──", "+--", "|--"];

/// `|` followed by two whitespace characters, as in an ASCII continuation
/// column.
fn has_pipe_gap(line: &str) -> bool {
    line.match_indices('|').any(|(i, _)| {
        let mut rest = line[i + 1..].chars();
        rest.next().is_some_and(char::is_whitespace) && rest.next().is_some_and(char::is_whitespace)
    })
}

/// A `-` bullet after optional indentation, followed by whitespace.
fn is_bullet(line: &str) -> bool {
    let mut chars = line.trim_start().chars();
    chars.next() == Some('-') && chars.next().is_some_and(char::is_whitespace)
}

/// Heuristic: does this text look like a directory tree?
pub fn looks_like_structure<S: AsRef<str>>(lines: &[S]) -> bool {
    let head: Vec<&str> = lines.iter().take(HEAD_LINES).map(|l| l.as_ref()).collect();

    let has_marker = head.iter().any(|line| {
        TREE_MARKERS.iter().any(|m| line.contains(m)) || has_pipe_gap(line) || is_bullet(line)
    });
    if has_marker {
        return true;
    }

    let indented = head
        .iter()
        .filter(|line| line.starts_with(|c: char| c == ' ' || c == '\t'))
        .count();
    indented > 3
}

/// Locate a structure file directly inside `dir`.
///
/// Known names win; otherwise the first `.txt`/`.md` file, by name, whose
/// head looks like a tree.
pub fn locate_structure_file(dir: &Path) -> Option<PathBuf> {
    if let Some(found) = CANDIDATE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
    {
        tracing::info!("found {}", found.display());
        return Some(found);
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .is_some_and(|n| !n.to_string_lossy().starts_with('.'))
        })
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SCAN_EXTENSIONS.contains(&e))
        })
        .collect();
    candidates.sort();

    let found = candidates
        .into_iter()
        .find(|p| read_text_file(p).is_some_and(|lines| looks_like_structure(&lines)));
    match &found {
        Some(p) => tracing::info!("detected tree content in {}", p.display()),
        None => tracing::info!("no structure file in {}", dir.display()),
    }
    found
}
