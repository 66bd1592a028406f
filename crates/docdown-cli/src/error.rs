use std::io;
use std::path::PathBuf;

/// Error type for the docdown binary
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Input path '{}' does not exist", .0.display())]
    MissingInput(PathBuf),

    #[error("No .{0} files found to convert")]
    NothingToConvert(String),

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;
