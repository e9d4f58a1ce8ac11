//! Tree node of the field-state store
//!
//! Each node stands for one path segment. Children are kept in a `Vec`
//! sorted by [`compare_segments`], so lookup is a binary search and an
//! insert lands at the search's insertion point. A node starts out as a
//! container: it exists only because a deeper path does, and it stays
//! invisible to exact lookup and enumeration until something is recorded
//! on it.

use fieldstate_core::path::{compare_segments, tokenize};
use fieldstate_core::{FieldError, RawValue, ValidationState};

/// State recorded for one field path, and the root of its subtree.
#[derive(Debug, Clone)]
pub struct FieldEntry {
    segment: Box<str>,
    key: Option<String>,
    children: Vec<FieldEntry>,
    is_container: bool,
    raw_value: Option<RawValue>,
    attempted_value: Option<String>,
    errors: Vec<FieldError>,
    validation_state: ValidationState,
}

impl FieldEntry {
    /// A fresh container node for `segment`.
    pub(crate) fn container(segment: &str) -> Self {
        Self {
            segment: segment.into(),
            key: None,
            children: Vec::new(),
            is_container: true,
            raw_value: None,
            attempted_value: None,
            errors: Vec::new(),
            validation_state: ValidationState::Unvalidated,
        }
    }

    /// The root node: empty segment, empty key.
    pub(crate) fn root() -> Self {
        let mut root = Self::container("");
        root.key = Some(String::new());
        root
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Full key as first written by the caller (original case kept).
    ///
    /// Pure containers that were never addressed directly have no key and
    /// report `""`.
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or("")
    }

    /// This node's segment relative to its parent.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// `true` while nothing has been recorded on this node.
    pub fn is_container(&self) -> bool {
        self.is_container
    }

    /// Bound value, if one was set.
    pub fn raw_value(&self) -> Option<&RawValue> {
        self.raw_value.as_ref()
    }

    /// String form of the bound value, if one was set.
    pub fn attempted_value(&self) -> Option<&str> {
        self.attempted_value.as_deref()
    }

    /// Errors recorded on this node, in insertion order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// This node's own validation state (children not considered).
    pub fn validation_state(&self) -> ValidationState {
        self.validation_state
    }

    /// Child nodes, sorted by segment. Includes containers.
    pub fn children(&self) -> &[FieldEntry] {
        &self.children
    }

    /// Direct child addressed by a single segment such as `name` or `[0]`.
    ///
    /// Unlike store lookup this returns container children too, so a caller
    /// can walk down from any entry.
    pub fn child(&self, segment: &str) -> Option<&FieldEntry> {
        self.find_child(segment)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[inline]
    fn search(&self, segment: &str) -> Result<usize, usize> {
        self.children
            .binary_search_by(|child| compare_segments(&child.segment, segment))
    }

    /// Matching child, or `self` for the empty segment.
    #[inline]
    pub(crate) fn find_child(&self, segment: &str) -> Option<&FieldEntry> {
        if segment.is_empty() {
            return Some(self);
        }
        self.search(segment).ok().map(|index| &self.children[index])
    }

    #[inline]
    fn find_child_mut(&mut self, segment: &str) -> Option<&mut FieldEntry> {
        if segment.is_empty() {
            return Some(self);
        }
        match self.search(segment) {
            Ok(index) => Some(&mut self.children[index]),
            Err(_) => None,
        }
    }

    /// Matching child, creating a container at the insertion point on a miss.
    #[inline]
    pub(crate) fn get_or_create_child(&mut self, segment: &str) -> &mut FieldEntry {
        if segment.is_empty() {
            return self;
        }
        let index = match self.search(segment) {
            Ok(index) => index,
            Err(index) => {
                self.children.insert(index, FieldEntry::container(segment));
                index
            }
        };
        &mut self.children[index]
    }

    /// Node reached by walking every segment of `key`, containers included.
    pub(crate) fn descend(&self, key: &str) -> Option<&FieldEntry> {
        let mut current = self;
        for segment in tokenize(key) {
            current = current.find_child(segment.text)?;
        }
        Some(current)
    }

    /// Mutable counterpart of [`descend`](Self::descend).
    pub(crate) fn descend_mut(&mut self, key: &str) -> Option<&mut FieldEntry> {
        let mut current = self;
        for segment in tokenize(key) {
            current = current.find_child_mut(segment.text)?;
        }
        Some(current)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    pub(crate) fn set_key_if_absent(&mut self, key: &str) {
        if self.key.is_none() {
            self.key = Some(key.to_string());
        }
    }

    /// Make the node visible. Returns `true` if it was a container.
    pub(crate) fn mark_non_container(&mut self) -> bool {
        std::mem::replace(&mut self.is_container, false)
    }

    pub(crate) fn set_value(&mut self, raw_value: RawValue, attempted_value: Option<String>) {
        self.raw_value = Some(raw_value);
        self.attempted_value = attempted_value;
    }

    pub(crate) fn set_validation_state(&mut self, state: ValidationState) {
        self.validation_state = state;
    }

    /// Record an error and mark the node invalid.
    pub(crate) fn push_error(&mut self, error: FieldError) {
        self.validation_state = ValidationState::Invalid;
        self.errors.push(error);
    }

    /// Drop all errors and return to `Unvalidated`. Returns how many errors went.
    pub(crate) fn clear_validation(&mut self) -> usize {
        let cleared = self.errors.len();
        self.errors.clear();
        self.validation_state = ValidationState::Unvalidated;
        cleared
    }

    /// [`clear_validation`](Self::clear_validation) on every non-container
    /// node of the subtree. Returns the total number of errors dropped.
    pub(crate) fn clear_validation_in_subtree(&mut self) -> usize {
        let mut cleared = 0;
        let mut stack: Vec<&mut FieldEntry> = vec![self];
        while let Some(node) = stack.pop() {
            if !node.is_container {
                cleared += node.clear_validation();
            }
            stack.extend(node.children.iter_mut());
        }
        cleared
    }

    /// Overwrite value, attempted text, errors and state from `source`.
    pub(crate) fn copy_from(&mut self, source: &FieldEntry) {
        self.raw_value = source.raw_value.clone();
        self.attempted_value = source.attempted_value.clone();
        self.errors.clone_from(&source.errors);
        self.validation_state = source.validation_state;
    }

    /// Back to container state. Key, segment and children are kept.
    pub(crate) fn reset(&mut self) {
        self.is_container = true;
        self.raw_value = None;
        self.attempted_value = None;
        self.errors.clear();
        self.validation_state = ValidationState::Unvalidated;
    }

    pub(crate) fn clear_children(&mut self) {
        self.children.clear();
    }

    /// `true` when every child list in the subtree is strictly sorted.
    #[cfg(test)]
    pub(crate) fn is_sorted_strictly(&self) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            let sorted = node.children.windows(2).all(|pair| {
                compare_segments(&pair[0].segment, &pair[1].segment).is_lt()
            });
            if !sorted {
                return false;
            }
            stack.extend(node.children.iter());
        }
        true
    }
}
