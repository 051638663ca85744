#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use dircontrol::cli::{Args, Command};
use dircontrol::discover::locate_structure_file;
use dircontrol::report::{sanitize_terminal_text, status_line, summary_line, tree_stats_line};
use dircontrol::textfile::read_text_file;
use dircontrol::tree::{generate_structure_file, SerializeConfig, IGNORE_FILE};
use dircontrol::{logging, parse_nodes, Error, KnownDirs, TreeBuilder};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("dircontrol: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    logging::init(args.verbose, args.quiet);

    ctrlc::set_handler(|| {
        println!("\nExited by user.");
        std::process::exit(0);
    })
    .context("failed to install interrupt handler")?;

    match args.command {
        Command::Generate { path, output } => run_generate(&path, &output, args.quiet),
        Command::Build {
            file,
            root,
            yes,
            dir_names,
            no_default_dir_names,
        } => {
            let mut known = if no_default_dir_names {
                KnownDirs::empty()
            } else {
                KnownDirs::default()
            };
            known.extend(&dir_names);
            run_build(file, &root, &known, yes, args.quiet)
        }
    }
}

/// Canonicalize a root argument and make sure it is a directory.
fn resolve_root(path: &Path) -> Result<PathBuf> {
    let root = path
        .canonicalize()
        .with_context(|| format!("{}: failed to resolve path", path.display()))?;
    if !root.is_dir() {
        return Err(Error::NotADirectory(root).into());
    }
    Ok(root)
}

fn run_generate(path: &Path, output: &str, quiet: bool) -> Result<()> {
    let root = resolve_root(path)?;
    let config = SerializeConfig::for_root(&root, output);
    if !quiet && !config.ignore.is_empty() {
        println!(" i Loaded {} patterns from {}", config.ignore.len(), IGNORE_FILE);
    }

    let generated = generate_structure_file(&root, &config)?;
    if !quiet {
        println!("\n{}\n", sanitize_terminal_text(generated.serialized.text.trim_end()));
        println!(" {}", tree_stats_line(&generated.serialized.stats));
        println!(" Saved to {}", generated.path.display());
    }
    Ok(())
}

fn run_build(
    file: Option<PathBuf>,
    root: &Path,
    known: &KnownDirs,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let root = resolve_root(root)?;
    let file = match file {
        Some(file) => file,
        None => locate_structure_file(&root).ok_or_else(|| Error::NoStructureFile(root.clone()))?,
    };

    let lines = read_text_file(&file).ok_or_else(|| Error::UnreadableSource(file.clone()))?;
    let nodes = parse_nodes(&lines, known);
    if nodes.is_empty() {
        return Err(Error::NoNodes(file).into());
    }

    if !quiet {
        println!("Preview: {}", file.display());
        println!(" Working Root: {}", root.display());
        println!(" Parsed Items: {}", nodes.len());
        println!(
            " Warning: this will create folders and move existing files to match the structure."
        );
    }

    if !yes && !confirm("Are you sure you want to proceed? (y/n): ")? {
        if !quiet {
            println!("\n - Cancelled -");
        }
        return Ok(());
    }

    let report = TreeBuilder::new(&root).build(&nodes);
    if quiet {
        return Ok(());
    }
    println!("{}", "-".repeat(70));
    for line in report.outcomes.iter().filter_map(|o| status_line(o, &root)) {
        println!("{line}");
    }
    println!("{}", "-".repeat(70));
    println!("{}", summary_line(&report.stats));
    Ok(())
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "\n{prompt}")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
