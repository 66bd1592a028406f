//! # docdown
//!
//! Convert tag-soup HTML, as found in exported office documents, to clean
//! Markdown.
//!
//! ## Design
//!
//! Conversion runs in two passes over an owned tree:
//!
//! - **Parsing** never fails. A permissive tokenizer feeds a stack-based tree
//!   builder that closes elements by name and ignores end tags it cannot match.
//! - **Rendering** is a recursive walk over a fixed rule table followed by a
//!   single whitespace canonicalization pass.
//!
//! With the default `envelope` feature the crate also unwraps MHTML style
//! exports (MIME multipart, quoted-printable or base64, any charset) before
//! conversion.
//!
//! ## Example
//!
//! ```rust
//! let markdown = docdown::convert("<h1>Hello</h1><ul><li>one</li><li>two</li></ul>");
//! assert_eq!(markdown, "# Hello\n\n- one\n- two\n");
//! ```
//!
//! ## Example (tree)
//!
//! ```rust
//! use docdown::{parse_html, MarkdownRenderer};
//!
//! let root = parse_html("<p>a<br/>b</p>");
//! assert_eq!(MarkdownRenderer::new().render(&root), "a\nb\n");
//! ```

pub mod context;
mod entities;
#[cfg(feature = "envelope")]
pub mod envelope;
pub mod html;
pub mod node;
mod renderer;
mod rules;
mod text;
pub mod tokenizer;
mod utilities;

pub use context::{ListFrame, ListKind, RenderContext};
#[cfg(feature = "envelope")]
pub use envelope::{convert_document, decode_document, extract_html};
pub use html::{parse_html, TreeBuilder, MAX_NESTING};
pub use node::{Child, Node, DOCUMENT_TAG};
pub use renderer::MarkdownRenderer;
pub use rules::Rule;
pub use text::{canonicalize, normalize_text};
pub use tokenizer::{tokenize, Token, Tokenizer};
pub use utilities::{is_raw_text, is_void, RAW_TEXT_ELEMENTS, VOID_ELEMENTS};

/// Parse `html` and render it to Markdown.
///
/// Any input is accepted; markup that yields no content converts to an empty
/// string.
pub fn convert(html: &str) -> String {
    let root = parse_html(html);
    MarkdownRenderer::new().render(&root)
}

/// Error type for docdown operations
#[derive(Debug, thiserror::Error)]
pub enum DocdownError {
    #[error("Multipart message without a boundary parameter (content type {content_type})")]
    MissingBoundary { content_type: String },

    #[cfg(feature = "envelope")]
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, DocdownError>;
