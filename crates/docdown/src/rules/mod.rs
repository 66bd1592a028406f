//! Rule system for HTML to Markdown conversion.
//!
//! [`Rule`] picks the treatment for a tag; the functions in `commonmark` and
//! `table` produce the Markdown for it.

pub(crate) mod commonmark;
mod rule;
mod table;

pub use rule::Rule;
pub(crate) use table::table;
