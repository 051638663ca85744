//! File/directory inference as an ordered rule chain.

use std::collections::HashSet;

use super::{Node, NodeKind};

const SEPARATORS: &[char] = &['/', '\\'];

/// Names treated as directories when nothing else decides.
pub const DEFAULT_DIR_NAMES: &[&str] = &[
    "src",
    "public",
    "assets",
    "components",
    "bin",
    "lib",
    "tests",
    "docs",
    "config",
    "dist",
    "build",
    "utils",
    "styles",
];

/// Lowercase set of names recognised as directories by [`TypeRule::KnownDirName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownDirs(HashSet<String>);

impl Default for KnownDirs {
    fn default() -> Self {
        Self::from_names(DEFAULT_DIR_NAMES.iter().copied())
    }
}

impl KnownDirs {
    pub fn empty() -> Self {
        Self(HashSet::new())
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(names);
        set
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.0
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One inference rule. Rules are tried in [`TYPE_RULES`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRule {
    /// `name/` or `name\`.
    TrailingSeparator,
    /// `name.ext`, but not a dotfile.
    DottedName,
    /// The next node is indented further.
    HasChildren,
    /// Last resort; always decides.
    KnownDirName,
}

pub const TYPE_RULES: [TypeRule; 4] = [
    TypeRule::TrailingSeparator,
    TypeRule::DottedName,
    TypeRule::HasChildren,
    TypeRule::KnownDirName,
];

impl TypeRule {
    /// The verdict of this rule for `name`, or `None` to defer to the next.
    ///
    /// `next_indent` is the indent of the following node, if any.
    pub fn verdict(
        self,
        name: &str,
        indent: usize,
        next_indent: Option<usize>,
        known: &KnownDirs,
    ) -> Option<NodeKind> {
        match self {
            TypeRule::TrailingSeparator => name
                .ends_with(SEPARATORS)
                .then_some(NodeKind::Dir),
            TypeRule::DottedName => (name.contains('.') && !name.starts_with('.'))
                .then_some(NodeKind::File),
            TypeRule::HasChildren => next_indent
                .is_some_and(|next| next > indent)
                .then_some(NodeKind::Dir),
            TypeRule::KnownDirName => Some(if known.contains(name) {
                NodeKind::Dir
            } else {
                NodeKind::File
            }),
        }
    }
}

/// Resolve `kind` for every node in one left-to-right pass.
///
/// Directory names decided by a trailing separator have the separator
/// stripped.
pub fn assign_types(nodes: &mut [Node], known: &KnownDirs) {
    for i in 0..nodes.len() {
        let next_indent = nodes.get(i + 1).map(|n| n.indent);
        let node = &mut nodes[i];

        let (rule, kind) = TYPE_RULES
            .iter()
            .find_map(|rule| {
                rule.verdict(&node.name, node.indent, next_indent, known)
                    .map(|kind| (*rule, kind))
            })
            .unwrap_or((TypeRule::KnownDirName, NodeKind::File));

        if rule == TypeRule::TrailingSeparator {
            node.name = node.name.trim_end_matches(SEPARATORS).to_string();
        }
        tracing::trace!("{} -> {:?} by {:?}", node.name, kind, rule);
        node.kind = Some(kind);
        node.rule = Some(rule);
    }
}
