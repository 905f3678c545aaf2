#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use foldertree::cli::{Args, Command, GenerateArgs};
use foldertree::{logging, structure};
use std::io::Write as _;
use std::path::Path;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("foldertree: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    logging::init_logging(args.verbose, args.quiet);

    match &args.command {
        Command::Create { input, target } => run_create(input, target, args.quiet),
        Command::Generate(generate) => run_generate(generate, args.quiet),
        Command::Validate { input } => {
            structure::validate_file(input)
                .with_context(|| format!("{}: invalid tree text", input.display()))?;
            if !args.quiet {
                println!("{} is valid", input.display());
            }
            Ok(())
        }
    }
}

fn run_create(input: &Path, target: &Path, quiet: bool) -> Result<()> {
    let report = structure::create_from_text(input, target)
        .with_context(|| format!("failed to create structure from {}", input.display()))?;

    if !report.is_complete() {
        eprintln!(
            "foldertree: {} entr{} could not be created",
            report.failures.len(),
            if report.failures.len() == 1 { "y" } else { "ies" }
        );
    }
    if !quiet {
        println!("Structure created successfully in {}", target.display());
    }
    Ok(())
}

fn run_generate(generate: &GenerateArgs, quiet: bool) -> Result<()> {
    let options = generate.options();
    match &generate.output {
        Some(output) => {
            structure::generate_text(&generate.source, output, &options)
                .context("failed to generate structure file")?;
            if !quiet {
                println!("Structure file generated successfully at {}", output.display());
            }
        }
        None => {
            let text = structure::render_directory(&generate.source, &options)
                .context("failed to generate structure")?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
