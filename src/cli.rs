use crate::structure::GenerateOptions;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  foldertree create ./structure.txt ./my-project
  foldertree generate ./my-project ./structure.txt
  foldertree generate ./my-project -I '*.tmp' --include-hidden";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "foldertree",
    version,
    about = "Create folder structures from tree text and tree text from folders",
    after_help = EXAMPLES
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create folders and empty files from a tree-text file
    #[command(visible_aliases = ["create-folders", "c"])]
    Create {
        /// Tree-text file to read
        input: PathBuf,
        /// Directory to create the structure in
        target: PathBuf,
    },

    /// Generate tree text from an existing directory
    #[command(visible_aliases = ["generate-file", "g"])]
    Generate(GenerateArgs),

    /// Check a tree-text file without creating anything
    Validate {
        /// Tree-text file to check
        input: PathBuf,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Directory to scan
    pub source: PathBuf,

    /// File to write (default: stdout)
    pub output: Option<PathBuf>,

    /// Do not apply the built-in ignore list (.git, node_modules, .env, ...)
    #[arg(short = 'a', long = "include-hidden")]
    pub include_hidden: bool,

    /// Gitignore-style patterns to exclude (repeatable)
    #[arg(short = 'I', long = "ignore", action = ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Additional gitignore files to load (repeatable)
    #[arg(long = "ignore-file", action = ArgAction::Append)]
    pub ignore_files: Vec<PathBuf>,

    /// Do not load <source>/.gitignore
    #[arg(long = "no-gitignore")]
    pub no_gitignore: bool,
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

impl GenerateArgs {
    pub fn options(&self) -> GenerateOptions {
        let mut ignore_files = Vec::new();
        if !self.no_gitignore {
            ignore_files.push(self.source.join(".gitignore"));
        }
        ignore_files.extend(self.ignore_files.iter().cloned());
        GenerateOptions {
            include_hidden: self.include_hidden,
            ignore_files,
            extra_patterns: self.ignore.clone(),
        }
    }
}
