//! Text normalization and the final whitespace pass.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::decode_text;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize a text run outside preformatted content.
///
/// Entities are decoded and non-breaking spaces become plain spaces. A run
/// that is only whitespace becomes a single space. Anything else has its
/// whitespace collapsed, keeping one space at either edge where the source
/// text had whitespace there.
pub fn normalize_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let decoded = decode_text(raw).replace('\u{a0}', " ");
    let stripped = decoded.trim();
    if stripped.is_empty() {
        return " ".to_string();
    }

    let collapsed = WHITESPACE_RUN.replace_all(stripped, " ");
    let mut out = String::with_capacity(collapsed.len() + 2);
    if raw.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&collapsed);
    if raw.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out
}

/// Canonicalize rendered output.
///
/// Every line is right-trimmed, runs of three or more newlines shrink to a
/// single blank line and the document is trimmed. A non-empty result ends
/// with exactly one newline; an empty one stays empty.
pub fn canonicalize(output: &str) -> String {
    let trimmed_lines = output
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    let collapsed = EXCESS_NEWLINES.replace_all(&trimmed_lines, "\n\n");
    let clean = collapsed.trim();
    if clean.is_empty() {
        return String::new();
    }
    format!("{clean}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(normalize_text("Hello"), "Hello");
    }

    #[test]
    fn test_collapses_internal_whitespace() {
        assert_eq!(normalize_text("a \n\t  b"), "a b");
    }

    #[test]
    fn test_keeps_one_edge_space() {
        assert_eq!(normalize_text("\n   word  \n"), " word ");
        assert_eq!(normalize_text(" word"), " word");
        assert_eq!(normalize_text("word\t"), "word ");
    }

    #[test]
    fn test_whitespace_only_becomes_single_space() {
        assert_eq!(normalize_text("\n\n   \t"), " ");
        assert_eq!(normalize_text("&nbsp;"), " ");
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(normalize_text("Fish &amp; Chips"), "Fish & Chips");
        assert_eq!(normalize_text("&lt;tag&gt; &#169; &#x2713;"), "<tag> © ✓");
    }

    #[test]
    fn test_decodes_legacy_and_windows_1252_references() {
        assert_eq!(normalize_text("AT&amp T &copy 2020"), "AT& T \u{a9} 2020");
        assert_eq!(normalize_text("&#128;5 &#0;"), "\u{20ac}5 \u{fffd}");
    }

    #[test]
    fn test_nbsp_becomes_space_and_collapses() {
        assert_eq!(normalize_text("a&nbsp;&nbsp;b"), "a b");
        assert_eq!(normalize_text("a\u{a0}b"), "a b");
    }

    #[test]
    fn test_edge_spaces_follow_undecoded_text() {
        // the leading entity decodes to whitespace, but the source began with '&'
        assert_eq!(normalize_text("&nbsp;word"), "word");
    }

    #[test]
    fn test_markdown_characters_pass_through() {
        assert_eq!(normalize_text("*a* _b_ `c` [d]"), "*a* _b_ `c` [d]");
    }

    #[test]
    fn test_canonicalize_trims_lines_and_document() {
        assert_eq!(canonicalize("\n\n# Title  \n\ntext \t\n\n"), "# Title\n\ntext\n");
    }

    #[test]
    fn test_canonicalize_collapses_blank_runs() {
        assert_eq!(canonicalize("a\n\n\n\n\nb"), "a\n\nb\n");
        assert_eq!(canonicalize("a\n  \n \n\nb"), "a\n\nb\n");
    }

    #[test]
    fn test_canonicalize_empty() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize(" \n\n \t"), "");
    }

    #[test]
    fn test_canonicalize_keeps_leading_indent_of_inner_lines() {
        assert_eq!(canonicalize("- a\n  - b\n"), "- a\n  - b\n");
    }
}
