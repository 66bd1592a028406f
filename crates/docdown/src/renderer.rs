//! MarkdownRenderer - walks a parsed tree and produces Markdown.

use crate::context::{ListFrame, ListKind, RenderContext};
use crate::node::{Child, Node};
use crate::rules::{self, commonmark, Rule};
use crate::text::{canonicalize, normalize_text};

/// Renders a [`Node`] tree to Markdown.
///
/// Rendering is a pure function of the tree: the renderer keeps no state
/// between calls, so one instance can be reused for any number of documents.
///
/// # Example
///
/// ```rust
/// use docdown::{parse_html, MarkdownRenderer};
///
/// let root = parse_html("<h3>Title</h3><p>Body</p>");
/// let markdown = MarkdownRenderer::new().render(&root);
/// assert_eq!(markdown, "### Title\n\nBody\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the children of `root` and canonicalize the result.
    ///
    /// The root's own tag is not rendered; it is normally the synthetic
    /// `document` node returned by [`parse_html`](crate::parse_html).
    pub fn render(&self, root: &Node) -> String {
        let raw = self.render_children(root, RenderContext::new());
        canonicalize(&raw)
    }

    fn render_children(&self, node: &Node, ctx: RenderContext<'_>) -> String {
        node.children()
            .iter()
            .map(|child| self.render_child(child, ctx))
            .collect()
    }

    fn render_child(&self, child: &Child, ctx: RenderContext<'_>) -> String {
        match child {
            Child::Element(node) => self.render_node(node, ctx),
            Child::Text(text) if ctx.is_pre() => text.clone(),
            Child::Text(text) => normalize_text(text),
        }
    }

    fn render_node(&self, node: &Node, ctx: RenderContext<'_>) -> String {
        match Rule::for_tag(node.tag_name()) {
            Rule::Transparent | Rule::TableSectionOrRow => self.render_children(node, ctx),
            Rule::Suppressed => String::new(),
            Rule::Heading(level) => commonmark::heading(level, &self.render_children(node, ctx)),
            Rule::Paragraph => commonmark::paragraph(&self.render_children(node, ctx)),
            Rule::Bold => commonmark::strong(&self.render_children(node, ctx)),
            Rule::Italic => commonmark::emphasis(&self.render_children(node, ctx)),
            Rule::LineBreak => commonmark::line_break(),
            Rule::HorizontalRule => commonmark::horizontal_rule(),
            Rule::Anchor => commonmark::anchor(node, &self.render_children(node, ctx)),
            Rule::Code => commonmark::code(&self.render_children(node, ctx.with_pre(true))),
            Rule::Pre => commonmark::pre(&self.render_children(node, ctx.with_pre(true))),
            Rule::List(kind) => self.render_list(node, kind, ctx),
            Rule::ListItem => self.render_list_item(node, ctx),
            Rule::Image => commonmark::image(node),
            Rule::Table => rules::table(&self.table_rows(node, ctx)),
        }
    }

    fn render_list(&self, node: &Node, kind: ListKind, ctx: RenderContext<'_>) -> String {
        let frame = ListFrame::new(kind, ctx.list());
        let ctx = ctx.with_list(&frame);
        commonmark::list(
            node.children()
                .iter()
                .map(|child| self.render_child(child, ctx)),
        )
    }

    fn render_list_item(&self, node: &Node, ctx: RenderContext<'_>) -> String {
        // The bullet is claimed before the content so nested items number after it
        let bullet = match ctx.list() {
            Some(frame) if frame.kind() == ListKind::Ordered => {
                format!("{}. ", frame.next_index())
            }
            _ => "- ".to_string(),
        };
        // Lists opened directly inside another list, with no item between
        // them, still need their own indent
        let depth = ctx.list_depth();
        let levels = depth.saturating_sub(1).saturating_sub(ctx.item_depth());
        let content = self.render_children(node, ctx.with_item_depth(depth));
        commonmark::list_item(&bullet, levels, &content)
    }

    /// Collect table rows through `thead`/`tbody`/`tfoot` wrappers.
    ///
    /// Only `td`/`th` children of a `tr` become cells. Rows without cells are
    /// dropped.
    fn table_rows(&self, node: &Node, ctx: RenderContext<'_>) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        for child in node.element_children() {
            match child.tag_name() {
                "thead" | "tbody" | "tfoot" => rows.extend(self.table_rows(child, ctx)),
                "tr" => {
                    let row: Vec<String> = child
                        .element_children()
                        .filter(|cell| cell.is("td") || cell.is("th"))
                        .map(|cell| self.render_children(cell, ctx).trim().to_string())
                        .collect();
                    if !row.is_empty() {
                        rows.push(row);
                    }
                }
                _ => {}
            }
        }
        rows
    }
}
