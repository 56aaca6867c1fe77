//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  vale-frontmatter \"docs/**/*.md\"
      Lint all markdown files in the docs directory
  vale-frontmatter --filter=\".Name != 'AwesomeCo.Passive'\" \"content/*.md\"
      Lint with a custom filter";

/// Lint markdown front matter with Vale while preserving line numbers
#[derive(Parser, Debug)]
#[command(name = "vale-frontmatter")]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// File patterns to lint [default: **/*.md]
    pub patterns: Vec<String>,

    /// Vale filter to apply
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Run with verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Linter program to run instead of `vale`
    #[arg(long, value_name = "PROGRAM")]
    pub linter: Option<String>,

    /// Give up on the linter after this many seconds (0 waits indefinitely)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}
