//! Ignore patterns read from the root's ignore file.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

use crate::textfile::read_text_file;

/// Ignore file looked up in the serialization root.
pub const IGNORE_FILE: &str = ".gitignore";

/// Ordered glob patterns, matched against bare names and root-relative
/// paths.
#[derive(Debug, Clone)]
pub struct IgnoreRuleSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl Default for IgnoreRuleSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnoreRuleSet {
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    /// Build from ignore-file lines. Blank and `#` lines are skipped,
    /// surrounding `/` removed, and invalid globs dropped with a warning.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut patterns = Vec::new();
        let mut invalid = Vec::new();

        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let pattern = line.trim_end_matches('/').trim_start_matches('/');
            if pattern.is_empty() {
                continue;
            }
            match Glob::new(pattern) {
                Ok(g) => {
                    builder.add(g);
                    patterns.push(pattern.to_string());
                }
                Err(_) => invalid.push(pattern.to_string()),
            }
        }
        if !invalid.is_empty() {
            tracing::warn!("invalid ignore pattern(s), skipped: {:?}", invalid);
        }

        let set = builder.build().unwrap_or_else(|e| {
            tracing::warn!("failed to build ignore set: {}", e);
            GlobSet::empty()
        });
        Self { patterns, set }
    }

    /// Load `root/.gitignore`; a missing or unreadable file means no rules.
    pub fn load(root: &Path) -> Self {
        match read_text_file(&root.join(IGNORE_FILE)) {
            Some(lines) => {
                let rules = Self::from_lines(&lines);
                tracing::info!("loaded {} patterns from {}", rules.len(), IGNORE_FILE);
                rules
            }
            None => Self::empty(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_ignored(&self, name: &str, relative: &Path) -> bool {
        !self.is_empty() && (self.set.is_match(name) || self.set.is_match(relative))
    }
}
