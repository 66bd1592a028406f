//! Markdown replacements for each rule.
//!
//! Every function receives the element's already rendered content (where the
//! rule uses it) and returns the fragment to splice into the output. Block
//! fragments carry their own surrounding newlines; the final canonicalization
//! pass squeezes the excess.

use crate::node::Node;

pub fn heading(level: u8, content: &str) -> String {
    let content = content.trim();
    if content.is_empty() {
        return String::new();
    }
    format!("\n\n{} {}\n\n", "#".repeat(usize::from(level)), content)
}

pub fn paragraph(content: &str) -> String {
    let content = content.trim();
    if content.is_empty() {
        return String::new();
    }
    format!("\n\n{content}\n\n")
}

pub fn strong(content: &str) -> String {
    wrap_trimmed(content, "**")
}

pub fn emphasis(content: &str) -> String {
    wrap_trimmed(content, "*")
}

fn wrap_trimmed(content: &str, delimiter: &str) -> String {
    let content = content.trim();
    if content.is_empty() {
        return String::new();
    }
    format!("{delimiter}{content}{delimiter}")
}

pub fn line_break() -> String {
    "\n".to_string()
}

pub fn horizontal_rule() -> String {
    "\n\n---\n\n".to_string()
}

/// `[text](href)`; the href doubles as text for an empty link
pub fn anchor(node: &Node, content: &str) -> String {
    let href = node.attr_or_empty("href").trim();
    let content = match content.trim() {
        "" => href,
        text => text,
    };
    if content.is_empty() {
        return String::new();
    }
    if href.is_empty() {
        return content.to_string();
    }
    format!("[{content}]({href})")
}

/// Inline code keeps its content exactly, whitespace included
pub fn code(content: &str) -> String {
    format!("`{content}`")
}

/// Fenced block. Only newlines are stripped from the edges so indentation on
/// the first line survives.
pub fn pre(content: &str) -> String {
    let content = content.trim_matches('\n');
    format!("\n\n```\n{content}\n```\n\n")
}

/// Join rendered items, dropping blank ones
pub fn list<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let content: String = items
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .collect();
    if content.is_empty() {
        return String::new();
    }
    format!("\n{content}\n")
}

/// One list item, indented by `levels` nesting levels of two spaces.
///
/// Continuation lines get two more spaces so they sit under the item text
/// rather than under the marker. A list nested inside an item arrives as
/// continuation lines of that item, so `levels` only counts the lists that
/// were not already indented that way.
pub fn list_item(bullet: &str, levels: usize, content: &str) -> String {
    let indent = "  ".repeat(levels);
    let mut lines = content.trim().lines();
    let Some(first) = lines.next() else {
        return format!("{indent}{bullet}\n");
    };

    let mut out = format!("{indent}{bullet}{first}");
    for line in lines {
        out.push('\n');
        out.push_str(&indent);
        out.push_str("  ");
        out.push_str(line);
    }
    out.push('\n');
    out
}

/// `![alt](src "title")`; nothing without a source
pub fn image(node: &Node) -> String {
    let alt = node.attr_or_empty("alt").trim();
    let src = node.attr_or_empty("src").trim();
    let title = node.attr_or_empty("title").trim();

    if src.is_empty() {
        return String::new();
    }

    let title_part = if title.is_empty() {
        String::new()
    } else {
        format!(" \"{title}\"")
    };

    format!("![{alt}]({src}{title_part})")
}
