//! Materializing a typed node list under a working root.
//!
//! The builder walks the nodes in order, keeping a stack of open ancestors
//! keyed by indent. Each node resolves to one [`NodeOutcome`]; a failing node
//! never stops the rest of the run, and nothing that already exists is
//! overwritten.

mod collision;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use crate::parse::Node;

pub use collision::{is_occupied, numbered_path, resolve_collision};

/// Text written into a newly scaffolded file.
pub fn placeholder_content(name: &str) -> String {
    format!("# Placeholder for {name}")
}

/// What happened for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// First node repeats the working root's name; mapped onto the root.
    RootWrap,
    CreatedDir,
    /// Directory was already there.
    ExistingDir,
    /// Loose file adopted from the working root.
    Moved { from: PathBuf, renamed: bool },
    Scaffolded { renamed: bool },
    /// Target file already exists and was left alone.
    Skipped,
    Failed { error: String },
}

/// Result for a single node, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeOutcome {
    pub name: String,
    /// Final path the action applied to.
    pub path: PathBuf,
    pub action: Action,
}

/// Aggregate counters for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub dirs_created: usize,
    pub files_scaffolded: usize,
    /// Includes renamed moves.
    pub files_moved: usize,
    pub files_renamed: usize,
    pub files_skipped: usize,
    pub failures: usize,
}

impl BuildStats {
    fn record(&mut self, action: &Action) {
        match action {
            Action::CreatedDir => self.dirs_created += 1,
            Action::Moved { renamed, .. } => {
                self.files_moved += 1;
                if *renamed {
                    self.files_renamed += 1;
                }
            }
            Action::Scaffolded { .. } => self.files_scaffolded += 1,
            Action::Skipped => self.files_skipped += 1,
            Action::Failed { .. } => self.failures += 1,
            Action::RootWrap | Action::ExistingDir => {}
        }
    }

    /// Whether the run changed anything on disk.
    pub fn changed_anything(&self) -> bool {
        self.dirs_created + self.files_scaffolded + self.files_moved > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub outcomes: Vec<NodeOutcome>,
    pub stats: BuildStats,
}

/// Open ancestors, strictly increasing in indent from bottom to top.
#[derive(Debug, Default)]
struct AncestorStack(Vec<(usize, PathBuf)>);

impl AncestorStack {
    /// Drop entries that are siblings or deeper than `indent`, then return
    /// the nearest remaining ancestor.
    fn parent_for<'a>(&'a mut self, indent: usize, root: &'a Path) -> &'a Path {
        while self.0.last().is_some_and(|(top, _)| *top >= indent) {
            self.0.pop();
        }
        self.0.last().map(|(_, path)| path.as_path()).unwrap_or(root)
    }

    fn push(&mut self, indent: usize, path: PathBuf) {
        self.0.push((indent, path));
    }
}

/// Applies node lists to the filesystem below a fixed working root.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    working_root: PathBuf,
}

impl TreeBuilder {
    pub fn new(working_root: impl Into<PathBuf>) -> Self {
        Self {
            working_root: working_root.into(),
        }
    }

    pub fn working_root(&self) -> &Path {
        &self.working_root
    }

    /// Apply `nodes` in order. Untyped nodes are treated as files.
    pub fn build(&self, nodes: &[Node]) -> BuildReport {
        let mut stack = AncestorStack::default();
        let mut report = BuildReport::default();

        for (i, node) in nodes.iter().enumerate() {
            if i == 0 && self.is_root_wrap(node) {
                tracing::info!(
                    "{}: root wrapper mapped to {}",
                    node.name,
                    self.working_root.display()
                );
                stack.push(node.indent, self.working_root.clone());
                report.outcomes.push(NodeOutcome {
                    name: node.name.clone(),
                    path: self.working_root.clone(),
                    action: Action::RootWrap,
                });
                continue;
            }

            let target = stack
                .parent_for(node.indent, &self.working_root)
                .join(&node.name);

            // Children of a rejected directory resolve under it and are
            // rejected as well.
            if node.is_dir() {
                stack.push(node.indent, target.clone());
            }

            let result = if !self.is_contained(&target) {
                Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "path leaves the working root",
                ))
            } else if node.is_dir() {
                create_dir(&target).map(|action| (target.clone(), action))
            } else {
                self.place_file(&node.name, &target)
            };

            let (path, action) = result.unwrap_or_else(|e| {
                tracing::warn!("{}: {}", target.display(), e);
                (
                    target,
                    Action::Failed {
                        error: e.to_string(),
                    },
                )
            });
            tracing::debug!("{} -> {:?}", path.display(), action);
            report.stats.record(&action);
            report.outcomes.push(NodeOutcome {
                name: node.name.clone(),
                path,
                action,
            });
        }

        report
    }

    /// Whether `target` lies below the working root using only plain
    /// path components.
    fn is_contained(&self, target: &Path) -> bool {
        target.strip_prefix(&self.working_root).is_ok_and(|rel| {
            rel.components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        })
    }

    fn is_root_wrap(&self, node: &Node) -> bool {
        if !node.is_dir() {
            return false;
        }
        self.working_root
            .file_name()
            .map(|root| root.to_string_lossy().to_lowercase() == node.name.to_lowercase())
            .unwrap_or(false)
    }

    /// Skip, adopt, or scaffold a file node.
    fn place_file(&self, name: &str, target: &Path) -> io::Result<(PathBuf, Action)> {
        if is_occupied(target) {
            return Ok((target.to_path_buf(), Action::Skipped));
        }

        let loose = self.working_root.join(name);
        if loose.is_file() {
            let (dest, renamed) = resolve_collision(target);
            create_parent(&dest)?;
            move_file(&loose, &dest)?;
            return Ok((
                dest,
                Action::Moved {
                    from: loose,
                    renamed,
                },
            ));
        }

        create_parent(target)?;
        let (dest, renamed) = resolve_collision(target);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dest)?;
        file.write_all(placeholder_content(name).as_bytes())?;
        Ok((dest, Action::Scaffolded { renamed }))
    }
}

fn create_dir(target: &Path) -> io::Result<Action> {
    match fs::metadata(target) {
        Ok(meta) if meta.is_dir() => Ok(Action::ExistingDir),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "exists and is not a directory",
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(target)?;
            Ok(Action::CreatedDir)
        }
        Err(e) => Err(e),
    }
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.is_dir() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Rename, falling back to copy and delete when the rename cannot cross
/// filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    let Err(rename_err) = fs::rename(from, to) else {
        return Ok(());
    };
    if fs::copy(from, to).is_err() {
        return Err(rename_err);
    }
    fs::remove_file(from)
}
