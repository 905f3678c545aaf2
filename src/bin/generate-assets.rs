#![forbid(unsafe_code)]
//! Writes shell completions and man pages for `foldertree`.
//!
//! Usage: `generate-assets [OUT_DIR]` (default `dist`).

use anyhow::Context;
use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use foldertree::cli::Args;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));
    let completions_dir = out_dir.join("completions");
    let man_dir = out_dir.join("man");

    for dir in [&completions_dir, &man_dir] {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    for shell in Shell::value_variants() {
        let mut cmd = Args::command();
        generate_to(*shell, &mut cmd, "foldertree", &completions_dir)
            .with_context(|| format!("writing {shell} completions"))?;
    }

    let cmd = Args::command();
    write_man(&man_dir, "foldertree", cmd.clone())?;
    for sub in cmd.get_subcommands() {
        let name = format!("foldertree-{}", sub.get_name());
        write_man(&man_dir, &name, sub.clone())?;
    }

    eprintln!(
        "generated shell completions and man pages under {}",
        out_dir.display()
    );
    Ok(())
}

fn write_man(dir: &Path, name: &str, cmd: clap::Command) -> anyhow::Result<()> {
    let mut buffer = Vec::new();
    Man::new(cmd).title(name.to_uppercase()).render(&mut buffer)?;
    let path = dir.join(format!("{name}.1"));
    fs::write(&path, buffer).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
