//! Command-line interface for docdown
//!
//! Converts exported `.doc` files (HTML or MHTML inside) to Markdown.
//!
//! Usage:
//!   docdown [INPUT] [-o DIR]    - Convert a file or every matching file of a directory
//!   docdown - < page.doc        - Convert stdin to stdout

mod batch;
mod config;
mod error;
mod frontmatter;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::config::ConvertConfig;

#[derive(Debug, Parser)]
#[command(name = "docdown", version, about = "Convert .doc files containing HTML to Markdown")]
struct Cli {
    /// Path to a .doc file or directory, or `-` for stdin
    #[arg(default_value = "docIn")]
    input: PathBuf,

    /// Directory to store Markdown files
    #[arg(short, long, default_value = "docOut")]
    output: PathBuf,

    /// Extension of the files to convert
    #[arg(long, default_value = "doc")]
    extension: String,

    /// Prefix each document with YAML frontmatter
    #[arg(long)]
    metadata: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for ConvertConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            output_dir: cli.output,
            extension: cli.extension,
            metadata: cli.metadata,
        }
    }
}

fn init_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ConvertConfig::from(cli);
    match batch::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
