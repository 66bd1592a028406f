//! YAML frontmatter for converted documents.

use std::path::Path;

use chrono::NaiveDateTime;

/// Prefix `markdown` with a frontmatter block describing its source.
///
/// The title is the first level-one heading, or the file stem with `_` and
/// `-` read as spaces and title-cased.
pub fn add_metadata(markdown: &str, source: &Path, converted: NaiveDateTime) -> String {
    let title = first_heading(markdown).unwrap_or_else(|| title_from_stem(source));
    let source_file = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!(
        "---\n\
         title: \"{}\"\n\
         source_file: \"{}\"\n\
         converted_date: \"{}\"\n\
         format: \"markdown\"\n\
         ---\n\n\
         {}",
        yaml_escape(&title),
        yaml_escape(&source_file),
        converted.format("%Y-%m-%dT%H:%M:%S%.6f"),
        markdown
    )
}

fn first_heading(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

fn title_from_stem(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_default();

    let mut title = String::with_capacity(stem.len());
    let mut prev_alphabetic = false;
    for c in stem.chars() {
        if prev_alphabetic {
            title.extend(c.to_lowercase());
        } else {
            title.extend(c.to_uppercase());
        }
        prev_alphabetic = c.is_alphabetic();
    }
    title
}

/// Escape for a double-quoted YAML scalar
fn yaml_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
