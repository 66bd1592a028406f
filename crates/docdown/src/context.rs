//! Rendering state threaded through the recursive walk.
//!
//! A [`RenderContext`] is a `Copy` value. Entering a list or a preformatted
//! element derives a new context for that subtree only; the caller's context is
//! never touched, so popping a list frame is just returning from the call that
//! pushed it.

use std::cell::Cell;

/// Kind of list a frame was pushed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `<ul>`
    Unordered,
    /// `<ol>`
    Ordered,
}

/// One level of list nesting.
///
/// Frames form a stack through `parent` links and live on the call stack of
/// the list renderer that pushed them. The counter is shared by every item
/// rendered beneath the frame, including items that tag soup nested inside a
/// sibling item, so numbering continues across the whole list.
#[derive(Debug)]
pub struct ListFrame<'a> {
    kind: ListKind,
    counter: Cell<usize>,
    depth: usize,
    parent: Option<&'a ListFrame<'a>>,
}

impl<'a> ListFrame<'a> {
    /// Create a frame on top of `parent`
    pub fn new(kind: ListKind, parent: Option<&'a ListFrame<'a>>) -> Self {
        Self {
            kind,
            counter: Cell::new(0),
            depth: parent.map_or(1, |p| p.depth + 1),
            parent,
        }
    }

    /// Kind of list this frame belongs to
    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// Nesting depth, 1 for an outermost list
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enclosing list frame, if any
    pub fn parent(&self) -> Option<&'a ListFrame<'a>> {
        self.parent
    }

    /// Advance the item counter and return the new value
    pub fn next_index(&self) -> usize {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        next
    }
}

/// Immutable rendering state: the innermost list frame, the pre flag and the
/// list depth of the nearest enclosing list item.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext<'a> {
    list: Option<&'a ListFrame<'a>>,
    pre: bool,
    item_depth: usize,
}

impl<'a> RenderContext<'a> {
    /// Context with no enclosing list, outside preformatted text
    pub fn new() -> Self {
        Self::default()
    }

    /// Innermost enclosing list frame
    pub fn list(&self) -> Option<&'a ListFrame<'a>> {
        self.list
    }

    /// Number of enclosing lists
    pub fn list_depth(&self) -> usize {
        self.list.map_or(0, ListFrame::depth)
    }

    /// List depth at the nearest enclosing `li`, 0 outside any item.
    ///
    /// A list nested inside an item is already indented by that item's
    /// continuation prefix, so only the levels above this one need their own
    /// indent.
    pub fn item_depth(&self) -> usize {
        self.item_depth
    }

    /// Whether text must be emitted verbatim
    pub fn is_pre(&self) -> bool {
        self.pre
    }

    /// Copy of this context with the pre flag overridden
    pub fn with_pre(self, pre: bool) -> Self {
        Self { pre, ..self }
    }

    /// Copy of this context entering a list item at `depth`
    pub fn with_item_depth(self, depth: usize) -> Self {
        Self {
            item_depth: depth,
            ..self
        }
    }

    /// Copy of this context with `frame` as the innermost list
    pub fn with_list<'b>(self, frame: &'b ListFrame<'b>) -> RenderContext<'b>
    where
        'a: 'b,
    {
        RenderContext {
            list: Some(frame),
            pre: self.pre,
            item_depth: self.item_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context() {
        let ctx = RenderContext::new();
        assert!(ctx.list().is_none());
        assert_eq!(ctx.list_depth(), 0);
        assert_eq!(ctx.item_depth(), 0);
        assert!(!ctx.is_pre());
    }

    #[test]
    fn test_with_pre_leaves_original_untouched() {
        let ctx = RenderContext::new();
        let pre = ctx.with_pre(true);
        assert!(pre.is_pre());
        assert!(!ctx.is_pre());
    }

    #[test]
    fn test_list_frames_nest() {
        let ctx = RenderContext::new();
        let outer = ListFrame::new(ListKind::Ordered, ctx.list());
        let outer_ctx = ctx.with_list(&outer);
        let inner = ListFrame::new(ListKind::Unordered, outer_ctx.list());
        let inner_ctx = outer_ctx.with_list(&inner);

        assert_eq!(outer_ctx.list_depth(), 1);
        assert_eq!(inner_ctx.list_depth(), 2);
        assert_eq!(inner.parent().map(ListFrame::kind), Some(ListKind::Ordered));
        assert_eq!(ctx.list_depth(), 0);
    }

    #[test]
    fn test_item_depth_survives_nested_lists() {
        let outer = ListFrame::new(ListKind::Unordered, None);
        let item_ctx = RenderContext::new().with_list(&outer).with_item_depth(1);
        let inner = ListFrame::new(ListKind::Unordered, item_ctx.list());
        let inner_ctx = item_ctx.with_list(&inner).with_pre(true);

        assert_eq!(inner_ctx.list_depth(), 2);
        assert_eq!(inner_ctx.item_depth(), 1);
        assert_eq!(RenderContext::new().with_list(&outer).item_depth(), 0);
    }

    #[test]
    fn test_counter_is_shared_by_copies() {
        let frame = ListFrame::new(ListKind::Ordered, None);
        let ctx = RenderContext::new().with_list(&frame);
        let copy = ctx.with_pre(true);

        assert_eq!(ctx.list().map(ListFrame::next_index), Some(1));
        assert_eq!(copy.list().map(ListFrame::next_index), Some(2));
        assert_eq!(frame.next_index(), 3);
    }
}
