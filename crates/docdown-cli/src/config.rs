//! Batch conversion settings.

use std::path::{Path, PathBuf};

/// Where `docdown` reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// A file, a directory, or `-` for stdin
    pub input: PathBuf,

    /// Directory receiving one `.md` file per input
    pub output_dir: PathBuf,

    /// Extension of the files to convert, without the dot
    pub extension: String,

    /// Prefix each document with YAML frontmatter
    pub metadata: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("docIn"),
            output_dir: PathBuf::from("docOut"),
            extension: "doc".to_string(),
            metadata: false,
        }
    }
}

impl ConvertConfig {
    /// Whether the input is standard input
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    /// Whether `path` carries the configured extension (case-insensitive)
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension.trim_start_matches('.')))
    }

    /// Output path for `input`: its stem with `.md` inside the output directory
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or(input.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".md");
        self.output_dir.join(name)
    }
}
