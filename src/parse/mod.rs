//! Parsing of textual directory trees into typed, indent-annotated nodes.

mod classify;
mod typing;

pub use classify::{classify_line, indent_width, sanitize_name, strip_comment, TAB_WIDTH};
pub use typing::{assign_types, KnownDirs, TypeRule, DEFAULT_DIR_NAMES, TYPE_RULES};

/// Whether a node names a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Dir,
    File,
}

/// One entry parsed from the structure text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Sanitized entry name.
    pub name: String,
    /// Prefix width in columns; only meaningful relative to neighbours.
    pub indent: usize,
    /// Resolved type, `None` until [`assign_types`] runs.
    pub kind: Option<NodeKind>,
    /// The rule that decided `kind`.
    pub rule: Option<TypeRule>,
}

impl Node {
    /// An untyped node.
    pub fn new(name: impl Into<String>, indent: usize) -> Self {
        Self {
            name: name.into(),
            indent,
            kind: None,
            rule: None,
        }
    }

    /// A node with its type already fixed, as used when building from
    /// hand-assembled node lists.
    pub fn typed(name: impl Into<String>, indent: usize, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            indent,
            kind: Some(kind),
            rule: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == Some(NodeKind::Dir)
    }
}

/// Classify every line and type the resulting nodes.
///
/// Lines that carry no entry are dropped; order is preserved.
pub fn parse_nodes<S: AsRef<str>>(lines: &[S], known: &KnownDirs) -> Vec<Node> {
    let mut nodes: Vec<Node> = lines
        .iter()
        .filter_map(|line| classify_line(line.as_ref()))
        .map(|(name, indent)| Node::new(name, indent))
        .collect();
    assign_types(&mut nodes, known);
    tracing::debug!("parsed {} nodes from {} lines", nodes.len(), lines.len());
    nodes
}
