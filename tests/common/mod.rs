#![allow(dead_code)]

use dircontrol::{parse_nodes, BuildReport, KnownDirs, TreeBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    populate(tmp.path(), paths);
    tmp
}

/// Same as `create_fixture`, below an existing directory.
pub fn populate(root: &Path, paths: &[&str]) {
    for p in paths {
        let full = root.join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
}

/// A working root with a predictable name inside a fresh temp dir.
pub fn named_root(name: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join(name);
    fs::create_dir(&root).unwrap();
    (tmp, root)
}

/// Parse `text` with the default directory names and build it under `root`.
pub fn build_from_text(root: &Path, text: &str) -> BuildReport {
    let lines: Vec<&str> = text.lines().collect();
    let nodes = parse_nodes(&lines, &KnownDirs::default());
    TreeBuilder::new(root).build(&nodes)
}

/// Relative paths of every file and directory below `root`, sorted.
pub fn list_tree(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    collect(root, root, &mut out);
    out.sort();
    out
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        let rel = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
        if path.is_dir() && !path.is_symlink() {
            out.push(format!("{rel}/"));
            collect(root, &path, out);
        } else {
            out.push(rel);
        }
    }
}
