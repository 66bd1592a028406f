//! HTML parsing support.
//!
//! Builds a [`Node`] tree from the tokenizer's output with a stack of open
//! elements. Recovery is positional only: an end tag closes the nearest open
//! element with the same name and everything opened after it, and an end tag
//! with no open counterpart is ignored.

use crate::node::Node;
use crate::tokenizer::{Token, Tokenizer};

/// Maximum number of open elements, the root included.
///
/// Rendering recurses once per tree level. Start tags arriving at this depth
/// become leaf children of the deepest open element instead of being opened,
/// so their text lands in that element and the tree is at most one level
/// deeper than the stack.
pub const MAX_NESTING: usize = 256;

/// Parse an HTML string into a Node tree.
///
/// The returned node is the synthetic `document` root. Parsing never fails:
/// markup that cannot be matched up is repaired or ignored, and whatever is
/// still open at end of input is closed implicitly.
///
/// # Example
///
/// ```rust
/// use docdown::parse_html;
///
/// let root = parse_html("<h1>Hello <em>World</em></h1>");
/// assert_eq!(root.tag_name(), "document");
/// assert_eq!(root.text_content(), "Hello World");
/// ```
pub fn parse_html(html: &str) -> Node {
    let mut builder = TreeBuilder::new();
    for token in Tokenizer::new(html) {
        builder.process(token);
    }
    builder.finish()
}

/// Stack-based tree construction.
///
/// The stack owns the elements that are still open; `open[0]` is the document
/// root. Closing an element moves it into its parent's children, which is the
/// entry below it. Since a parent cannot receive any other child while one of
/// its children is open, appending on close keeps document order.
pub struct TreeBuilder {
    open: Vec<Node>,
}

impl TreeBuilder {
    /// Create a builder whose stack holds only the document root
    pub fn new() -> Self {
        Self {
            open: vec![Node::document()],
        }
    }

    /// Number of open elements, the root included
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    fn current_mut(&mut self) -> &mut Node {
        // The root is never popped, so the stack is never empty
        let last = self.open.len() - 1;
        &mut self.open[last]
    }

    /// Feed one token
    pub fn process(&mut self, token: Token) {
        match token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let mut node = Node::element(&name);
                for (key, value) in &attributes {
                    node.set_attr(key, value);
                }
                if self_closing || node.is_void_element() {
                    self.current_mut().add_child(node);
                } else if self.open.len() >= MAX_NESTING {
                    log::trace!("nesting limit reached, not opening <{}>", node.tag_name());
                    self.current_mut().add_child(node);
                } else {
                    self.open.push(node);
                }
            }
            Token::EndTag(name) => self.close(&name),
            Token::Text(text) => self.current_mut().add_text(&text),
            Token::Comment(_) => {}
        }
    }

    /// Close the nearest open element named `name` and everything above it.
    /// The root never matches.
    fn close(&mut self, name: &str) {
        let Some(index) = self
            .open
            .iter()
            .skip(1)
            .rposition(|node| node.is(name))
            .map(|i| i + 1)
        else {
            log::trace!("ignoring unmatched end tag </{name}>");
            return;
        };

        let implied = self.open.len() - 1 - index;
        if implied > 0 {
            log::trace!("</{name}> implicitly closes {implied} open element(s)");
        }
        while self.open.len() > index {
            self.pop();
        }
    }

    fn pop(&mut self) {
        if self.open.len() > 1 {
            if let Some(node) = self.open.pop() {
                self.current_mut().add_child(node);
            }
        }
    }

    /// Close everything still open and return the document root
    pub fn finish(mut self) -> Node {
        while self.open.len() > 1 {
            self.pop();
        }
        self.open.pop().unwrap_or_else(Node::document)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
