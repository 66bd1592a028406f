//! The closed set of tag rules.

use crate::context::ListKind;
use crate::utilities::ascii_lowercase;

/// How an element is rendered, chosen by tag name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Render children only (also the fallback for unknown tags)
    Transparent,
    /// Render nothing, children included
    Suppressed,
    /// `h1`..`h6` with its level
    Heading(u8),
    /// `p`
    Paragraph,
    /// `strong`, `b`
    Bold,
    /// `em`, `i`
    Italic,
    /// `br`
    LineBreak,
    /// `hr`
    HorizontalRule,
    /// `a`
    Anchor,
    /// Inline `code`
    Code,
    /// `pre`
    Pre,
    /// `ul` / `ol`
    List(ListKind),
    /// `li`
    ListItem,
    /// `img`
    Image,
    /// `table`
    Table,
    /// `thead`, `tbody`, `tfoot`, `tr`, `td`, `th`: only meaningful to table
    /// extraction, transparent anywhere else
    TableSectionOrRow,
}

impl Rule {
    /// Find the rule for a tag name (case-insensitive)
    pub fn for_tag(tag: &str) -> Self {
        let tag = ascii_lowercase(tag);
        match &*tag {
            "html" | "body" | "span" | "font" | "div" | "section" | "article" => Rule::Transparent,
            "head" | "style" | "script" => Rule::Suppressed,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                Rule::Heading(tag.as_bytes()[1] - b'0')
            }
            "p" => Rule::Paragraph,
            "strong" | "b" => Rule::Bold,
            "em" | "i" => Rule::Italic,
            "br" => Rule::LineBreak,
            "hr" => Rule::HorizontalRule,
            "a" => Rule::Anchor,
            "code" => Rule::Code,
            "pre" => Rule::Pre,
            "ul" => Rule::List(ListKind::Unordered),
            "ol" => Rule::List(ListKind::Ordered),
            "li" => Rule::ListItem,
            "img" => Rule::Image,
            "table" => Rule::Table,
            "thead" | "tbody" | "tfoot" | "tr" | "td" | "th" => Rule::TableSectionOrRow,
            _ => Rule::Transparent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(Rule::for_tag("h1"), Rule::Heading(1));
        assert_eq!(Rule::for_tag("H6"), Rule::Heading(6));
        // not a heading level
        assert_eq!(Rule::for_tag("h7"), Rule::Transparent);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Rule::for_tag("b"), Rule::for_tag("strong"));
        assert_eq!(Rule::for_tag("i"), Rule::for_tag("em"));
        assert_eq!(Rule::for_tag("ol"), Rule::List(ListKind::Ordered));
        assert_eq!(Rule::for_tag("ul"), Rule::List(ListKind::Unordered));
    }

    #[test]
    fn test_suppressed() {
        for tag in ["head", "style", "script"] {
            assert_eq!(Rule::for_tag(tag), Rule::Suppressed);
        }
    }

    #[test]
    fn test_unknown_tags_are_transparent() {
        for tag in ["blockquote", "center", "o:p", "x-custom", "document"] {
            assert_eq!(Rule::for_tag(tag), Rule::Transparent);
        }
    }

    #[test]
    fn test_table_parts() {
        assert_eq!(Rule::for_tag("table"), Rule::Table);
        for tag in ["thead", "tbody", "tfoot", "tr", "td", "th"] {
            assert_eq!(Rule::for_tag(tag), Rule::TableSectionOrRow);
        }
    }
}
