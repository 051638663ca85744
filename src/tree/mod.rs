//! Serializing a directory into the textual tree notation.

mod ignore;
mod layout;
pub(crate) mod walk;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub use ignore::{IgnoreRuleSet, IGNORE_FILE};
pub use walk::{serialize, SYSTEM_EXCLUDES};

/// Default name of the generated structure file.
pub const STRUCTURE_FILE: &str = "directory-structure.txt";

/// What a rendered entry is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    /// Never descended. `target` is `None` if the link could not be read.
    Symlink { target: Option<String> },
}

/// A single entry in the serialized tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// File name component only.
    pub name: String,
    pub path: PathBuf,
    /// Nesting depth (1 = direct child of root).
    pub depth: usize,
    pub kind: EntryKind,
    /// Whether this is the last sibling in its parent group.
    pub is_last: bool,
    /// Box-drawing prefix, connector included.
    pub prefix: String,
}

impl TreeEntry {
    /// The entry as one line of tree text, without a newline.
    pub fn line(&self) -> String {
        match &self.kind {
            EntryKind::Dir => format!("{}{}/", self.prefix, self.name),
            EntryKind::File => format!("{}{}", self.prefix, self.name),
            EntryKind::Symlink { target: Some(t) } => {
                format!("{}{} -> {}", self.prefix, self.name, t)
            }
            EntryKind::Symlink { target: None } => format!("{}{} (link)", self.prefix, self.name),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Regular files plus readable symlinks.
    pub files: usize,
    pub dirs: usize,
}

/// Output of [`serialize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Serialized {
    pub entries: Vec<TreeEntry>,
    /// One line per entry, each newline-terminated.
    pub text: String,
    pub stats: TreeStats,
}

/// Filters applied while serializing.
#[derive(Debug, Clone)]
pub struct SerializeConfig {
    /// Patterns from the root's ignore file.
    pub ignore: IgnoreRuleSet,
    /// Exact names that are never listed.
    pub excludes: Vec<String>,
    /// File the document is written to, relative to the root.
    pub output_name: String,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self::with_output(STRUCTURE_FILE)
    }
}

impl SerializeConfig {
    /// System excludes, no ignore patterns. `output_name` is skipped at the
    /// root only.
    pub fn with_output(output_name: &str) -> Self {
        Self {
            ignore: IgnoreRuleSet::empty(),
            excludes: SYSTEM_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            output_name: output_name.to_string(),
        }
    }

    /// Like [`SerializeConfig::with_output`], with the ignore file under
    /// `root` loaded.
    pub fn for_root(root: &Path, output_name: &str) -> Self {
        Self {
            ignore: IgnoreRuleSet::load(root),
            ..Self::with_output(output_name)
        }
    }

    /// Whether an entry named `name` at `relative` (to the root) is listed.
    pub fn includes(&self, name: &str, relative: &Path) -> bool {
        if name.starts_with('.') || self.excludes.iter().any(|e| e == name) {
            return false;
        }
        if relative == Path::new(&self.output_name) {
            return false;
        }
        !self.ignore.is_ignored(name, relative)
    }
}

/// The full structure document: header, root line, tree.
pub fn structure_document(root_name: &str, serialized: &Serialized) -> String {
    format!(
        "# Generated Structure\n# Files: {} | Dirs: {}\n\n{}/\n{}",
        serialized.stats.files, serialized.stats.dirs, root_name, serialized.text
    )
}

/// Result of [`generate_structure_file`].
#[derive(Debug, Clone)]
pub struct Generated {
    pub path: PathBuf,
    pub serialized: Serialized,
}

/// Serialize `root` and write the document to `root/<output_name>`.
pub fn generate_structure_file(root: &Path, config: &SerializeConfig) -> Result<Generated> {
    let serialized = serialize(root, config);
    let root_name = root_name(root);
    let document = structure_document(&root_name, &serialized);

    let path = root.join(&config.output_name);
    fs::write(&path, document).map_err(|e| Error::io(&path, e))?;
    tracing::info!(
        "wrote {} ({} files, {} dirs)",
        path.display(),
        serialized.stats.files,
        serialized.stats.dirs
    );
    Ok(Generated { path, serialized })
}

/// Display name of a root directory, resolving `.` and friends.
pub fn root_name(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .or_else(|| root.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string())
}
