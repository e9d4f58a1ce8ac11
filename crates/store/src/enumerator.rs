//! Prefix enumeration over the field-state tree
//!
//! Iterative pre-order walk with an explicit stack, so deep trees cannot
//! overflow the call stack. Containers are walked through but never
//! yielded. Each call to [`FieldStateStore::enumerate`] starts a fresh
//! traversal; the borrow it holds keeps the tree unchanged while it runs.
//!
//! [`FieldStateStore::enumerate`]: crate::FieldStateStore::enumerate

use crate::node::FieldEntry;
use smallvec::SmallVec;

/// Lazy pre-order iterator over the non-container entries of a subtree.
#[derive(Debug, Clone)]
pub struct PrefixIter<'a> {
    stack: SmallVec<[&'a FieldEntry; 16]>,
}

impl<'a> PrefixIter<'a> {
    /// Walk the subtree rooted at `start`. `None` yields nothing.
    pub(crate) fn new(start: Option<&'a FieldEntry>) -> Self {
        let mut stack = SmallVec::new();
        if let Some(node) = start {
            stack.push(node);
        }
        Self { stack }
    }
}

impl<'a> Iterator for PrefixIter<'a> {
    type Item = &'a FieldEntry;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // Reverse push so the smallest sibling is visited first.
            self.stack.extend(node.children().iter().rev());
            if !node.is_container() {
                return Some(node);
            }
        }
        None
    }
}

impl std::iter::FusedIterator for PrefixIter<'_> {}

/// `(key, entry)` pairs in enumeration order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: PrefixIter<'a>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(inner: PrefixIter<'a>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a FieldEntry);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (entry.key(), entry))
    }
}

impl std::iter::FusedIterator for Iter<'_> {}
