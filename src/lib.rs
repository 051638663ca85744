#![forbid(unsafe_code)]
//! dircontrol: reconcile textual directory trees with real directories.
//!
//! A structure file (as printed by `tree`, written by hand, or produced by an
//! assistant) is parsed into indent-annotated nodes, typed as files or
//! directories, and materialized under a working root without overwriting
//! anything. The reverse direction snapshots a directory into the same
//! notation.

pub mod build;
pub mod cli;
pub mod discover;
pub mod error;
pub mod logging;
pub mod parse;
pub mod report;
pub mod textfile;
pub mod tree;

pub use build::{Action, BuildReport, BuildStats, NodeOutcome, TreeBuilder};
pub use error::{Error, Result};
pub use parse::{parse_nodes, KnownDirs, Node, NodeKind};
pub use tree::{generate_structure_file, serialize, SerializeConfig, Serialized};
