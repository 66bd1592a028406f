//! File discovery and per-file conversion.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::ConvertConfig;
use crate::error::{CliError, Result};
use crate::frontmatter::add_metadata;

/// Files to convert for `config`, sorted by name.
///
/// A directory is scanned without recursion. A single file is taken when its
/// extension matches.
pub fn collect_inputs(config: &ConvertConfig) -> Result<Vec<PathBuf>> {
    let input = &config.input;
    if !input.exists() {
        return Err(CliError::MissingInput(input.clone()));
    }

    let mut files = Vec::new();
    if input.is_file() {
        if config.matches_extension(input) {
            files.push(input.clone());
        }
    } else if input.is_dir() {
        let entries = fs::read_dir(input).map_err(|source| CliError::Read {
            path: input.clone(),
            source,
        })?;
        for entry in entries {
            let path = entry
                .map_err(|source| CliError::Read {
                    path: input.clone(),
                    source,
                })?
                .path();
            if path.is_file() && config.matches_extension(&path) {
                files.push(path);
            }
        }
        files.sort();
    }

    if files.is_empty() {
        return Err(CliError::NothingToConvert(
            config.extension.trim_start_matches('.').to_string(),
        ));
    }
    log::debug!("found {} file(s) under {}", files.len(), input.display());
    Ok(files)
}

/// Convert raw document bytes, adding frontmatter when configured
pub fn render(bytes: &[u8], source: &Path, config: &ConvertConfig) -> String {
    let markdown = docdown::convert_document(bytes);
    if markdown.is_empty() {
        log::warn!("{} produced no Markdown", source.display());
    }
    if config.metadata {
        add_metadata(&markdown, source, Local::now().naive_local())
    } else {
        markdown
    }
}

/// Convert one file into the output directory and return the written path
pub fn convert_file(input: &Path, config: &ConvertConfig) -> Result<PathBuf> {
    let bytes = fs::read(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let markdown = render(&bytes, input, config);

    let output = config.output_path(input);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|source| CliError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&output, markdown).map_err(|source| CliError::Write {
        path: output.clone(),
        source,
    })?;
    Ok(output)
}

/// Convert every input, printing one line per converted file
pub fn run(config: &ConvertConfig) -> Result<()> {
    if config.reads_stdin() {
        return convert_stdin(config);
    }

    for input in collect_inputs(config)? {
        let output = convert_file(&input, config)?;
        println!("Converted {} -> {}", input.display(), output.display());
    }
    Ok(())
}

fn convert_stdin(config: &ConvertConfig) -> Result<()> {
    let stdin_path = PathBuf::from("-");
    let mut bytes = Vec::new();
    io::stdin()
        .read_to_end(&mut bytes)
        .map_err(|source| CliError::Read {
            path: stdin_path.clone(),
            source,
        })?;

    let markdown = render(&bytes, Path::new("stdin"), config);
    io::stdout()
        .write_all(markdown.as_bytes())
        .map_err(|source| CliError::Write {
            path: stdin_path,
            source,
        })
}
