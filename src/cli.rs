use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::tree::STRUCTURE_FILE;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dircontrol",
    version,
    about = "Build a project layout from a text directory tree, or snapshot a directory into one",
    after_help = "Examples:\n  dircontrol generate\n  dircontrol build tree.txt\n  dircontrol build -y --dir-name scripts"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors (and the confirmation prompt unless --yes)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scan a directory and write its structure file
    Generate {
        /// Directory to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file name, written inside the scanned directory
        #[arg(short = 'o', long = "output", default_value = STRUCTURE_FILE)]
        output: String,
    },

    /// Create folders and files described by a structure file
    Build {
        /// Structure file (default: search the working root)
        file: Option<PathBuf>,

        /// Working root to build into (default: current directory)
        #[arg(short = 'r', long = "root", default_value = ".")]
        root: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,

        /// Extra name treated as a directory when nothing else decides (repeatable)
        #[arg(long = "dir-name", action = clap::ArgAction::Append)]
        dir_names: Vec<String>,

        /// Do not use the built-in directory name list
        #[arg(long = "no-default-dir-names")]
        no_default_dir_names: bool,
    },
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.quiet {
            self.verbose = 0;
        }
        self
    }
}
