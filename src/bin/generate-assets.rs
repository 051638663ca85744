#![forbid(unsafe_code)]

use clap::CommandFactory;
use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use dircontrol::cli::Args;
use std::fs;
use std::path::PathBuf;

/// Writes shell completions and man pages for `dircontrol`.
///
/// The output directory is the first argument, `dist` by default.
fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));
    let completions_dir = out_dir.join("completions");
    let man_dir = out_dir.join("man");

    fs::create_dir_all(&completions_dir)?;
    fs::create_dir_all(&man_dir)?;

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
        let mut cmd = Args::command();
        let written = generate_to(shell, &mut cmd, "dircontrol", &completions_dir)?;
        eprintln!("wrote {}", written.display());
    }

    let cmd = Args::command();
    for sub in cmd.get_subcommands() {
        let name = format!("dircontrol-{}", sub.get_name());
        let mut buffer = Vec::new();
        Man::new(sub.clone()).render(&mut buffer)?;
        fs::write(man_dir.join(format!("{name}.1")), buffer)?;
    }

    let mut buffer = Vec::new();
    Man::new(cmd).render(&mut buffer)?;
    fs::write(man_dir.join("dircontrol.1"), buffer)?;

    eprintln!(
        "generated shell completions and man pages under {}",
        out_dir.display()
    );
    Ok(())
}
