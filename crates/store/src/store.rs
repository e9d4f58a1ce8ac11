//! The field-state store
//!
//! One [`FieldStateStore`] belongs to one binding pass. Binders record raw
//! values and errors against dotted/bracketed keys; validators mark fields
//! valid or skipped; callers read back per-field entries, enumerate a
//! prefix, or ask for the aggregate validity of a subtree.
//!
//! # Bounds
//!
//! - Inserting a key with more segments than `max_insert_depth` fails with
//!   [`FieldStateError::PathTooDeep`].
//! - Aggregation ignores nodes at or below `max_aggregation_depth` relative
//!   to the queried prefix.
//! - At most `max_errors` errors accumulate. The last slot holds a single
//!   "too many errors" sentinel at the root key.
//!
//! # Thread Safety
//!
//! None internally. A store is owned by one pass at a time; parallel
//! binders each fill their own store and [`merge`](FieldStateStore::merge)
//! afterwards.

use crate::enumerator::{Iter, PrefixIter};
use crate::messages::FieldMetadata;
use crate::node::FieldEntry;
use fieldstate_core::path::tokenize;
use fieldstate_core::{
    Fault, FieldError, FieldStateError, FieldStateResult, RawValue, StoreOptions, ValidationState,
};
use smallvec::SmallVec;

/// Hierarchical store of per-field binding and validation state.
#[derive(Debug, Clone)]
pub struct FieldStateStore {
    root: FieldEntry,
    options: StoreOptions,
    entry_count: usize,
    error_count: usize,
    max_errors_reached: bool,
}

impl FieldStateStore {
    /// Create an empty store with default bounds.
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Create an empty store with the given bounds.
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            root: FieldEntry::root(),
            options,
            entry_count: 0,
            error_count: 0,
            max_errors_reached: false,
        }
    }

    /// Copy `other` into a new store with the same bounds.
    ///
    /// Entries and the error count are carried over. The sentinel flag is
    /// not, so the copy records its own sentinel if it hits the cap.
    pub fn from_store(other: &FieldStateStore) -> FieldStateResult<Self> {
        let mut store = Self::with_options(other.options.clone());
        store.merge(other)?;
        Ok(store)
    }

    // =========================================================================
    // Counters and options
    // =========================================================================

    /// Number of non-container entries.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// `true` when no entry has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Errors recorded so far, sentinel included.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// `true` once the sentinel has been recorded.
    pub fn max_errors_reached(&self) -> bool {
        self.max_errors_reached
    }

    /// `true` when the error count is at or above the cap.
    pub fn has_reached_max_errors(&self) -> bool {
        self.error_count >= self.options.max_errors
    }

    /// Current bounds.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Change the error cap. Already recorded errors are kept.
    pub fn set_max_errors(&mut self, max_errors: usize) {
        self.options.max_errors = max_errors;
    }

    /// Change the insert depth bound. Applies to later inserts only.
    pub fn set_max_insert_depth(&mut self, depth: Option<usize>) {
        self.options.max_insert_depth = depth;
    }

    /// Change the aggregation depth bound.
    pub fn set_max_aggregation_depth(&mut self, depth: Option<usize>) {
        self.options.max_aggregation_depth = depth;
    }

    /// Read-only view of the root entry (key `""`).
    pub fn root(&self) -> &FieldEntry {
        &self.root
    }

    // =========================================================================
    // Internal traversal
    // =========================================================================

    /// Walk `key` from `root`, creating containers along the way.
    ///
    /// Takes the root explicitly so callers can keep updating the store's
    /// counters while holding the returned entry.
    fn get_or_create<'s>(
        root: &'s mut FieldEntry,
        max_depth: Option<usize>,
        key: &str,
    ) -> FieldStateResult<&'s mut FieldEntry> {
        let mut current = root;
        for (depth, segment) in tokenize(key).enumerate() {
            if let Some(max) = max_depth {
                if depth >= max {
                    tracing::debug!(
                        target: "fieldstate::store",
                        key,
                        max_depth = max,
                        "rejected key deeper than insert bound"
                    );
                    return Err(FieldStateError::path_too_deep(key, max));
                }
            }
            current = current.get_or_create_child(segment.text);
        }
        current.set_key_if_absent(key);
        Ok(current)
    }

    /// `true` if one more error would reach the cap.
    fn error_cap_reached(&self) -> bool {
        self.error_count + 1 >= self.options.max_errors
    }

    /// Record the sentinel at the root key, once per store.
    fn record_max_errors_reached(&mut self) {
        if self.max_errors_reached {
            return;
        }
        tracing::warn!(
            target: "fieldstate::store",
            max_errors = self.options.max_errors,
            "error cap reached, further errors are dropped"
        );
        if self.root.mark_non_container() {
            self.entry_count += 1;
        }
        self.root.push_error(FieldError::Fault(Fault::too_many_errors()));
        self.max_errors_reached = true;
        self.error_count += 1;
    }

    /// Record `error` at `key` without consulting the cap.
    fn add_error_core(&mut self, key: &str, error: FieldError) -> FieldStateResult<()> {
        let entry = Self::get_or_create(&mut self.root, self.options.max_insert_depth, key)?;
        if entry.mark_non_container() {
            self.entry_count += 1;
        }
        entry.push_error(error);
        self.error_count += 1;
        Ok(())
    }

    // =========================================================================
    // Recording
    // =========================================================================

    /// Store the raw value and its string form at `key`.
    pub fn set_value(
        &mut self,
        key: &str,
        raw_value: impl Into<RawValue>,
        attempted_value: impl Into<String>,
    ) -> FieldStateResult<()> {
        let entry = Self::get_or_create(&mut self.root, self.options.max_insert_depth, key)?;
        if entry.mark_non_container() {
            self.entry_count += 1;
        }
        entry.set_value(raw_value.into(), Some(attempted_value.into()));
        Ok(())
    }

    /// Store the values a value provider produced for `key`.
    ///
    /// One value is stored as a string, several as an array of strings,
    /// none as `null`. The attempted text is the values joined with `,`.
    pub fn set_value_result<S: AsRef<str>>(
        &mut self,
        key: &str,
        values: &[S],
    ) -> FieldStateResult<()> {
        let raw_value = match values {
            [] => RawValue::Null,
            [single] => RawValue::from(single.as_ref()),
            many => RawValue::Array(many.iter().map(|v| RawValue::from(v.as_ref())).collect()),
        };
        let attempted = values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        self.set_value(key, raw_value, attempted)
    }

    /// Record an error message at `key` and mark it invalid.
    ///
    /// Returns `Ok(false)` without recording anything once the cap is hit.
    /// The first refused call records the sentinel instead.
    pub fn add_error(&mut self, key: &str, message: impl Into<String>) -> FieldStateResult<bool> {
        if self.error_cap_reached() {
            self.record_max_errors_reached();
            return Ok(false);
        }
        self.add_error_core(key, FieldError::Message(message.into()))?;
        Ok(true)
    }

    /// Record a fault at `key`.
    ///
    /// Client-safe faults with a message are stored as that message. Other
    /// faults are stored as-is.
    pub fn add_fault(&mut self, key: &str, fault: Fault) -> FieldStateResult<bool> {
        let fault = fault.into_recorded();
        if fault.kind.is_client_safe() && !fault.message.is_empty() {
            return self.add_error(key, fault.message);
        }
        if self.error_cap_reached() {
            self.record_max_errors_reached();
            return Ok(false);
        }
        self.add_error_core(key, FieldError::Fault(fault))?;
        Ok(true)
    }

    /// Record a fault at `key`, rendering conversion faults through
    /// `metadata.messages`.
    ///
    /// Format and overflow faults are replaced by a user-facing message
    /// built from the field's name and the attempted value already stored
    /// at `key`.
    pub fn add_fault_with_metadata(
        &mut self,
        key: &str,
        fault: Fault,
        metadata: &FieldMetadata<'_>,
    ) -> FieldStateResult<bool> {
        if self.error_cap_reached() {
            self.record_max_errors_reached();
            return Ok(false);
        }

        if fault.kind.is_conversion() {
            let attempted = self
                .lookup(key)
                .map(|entry| entry.attempted_value().unwrap_or_default().to_string());
            let message = metadata.invalid_value_message(attempted.as_deref());
            return self.add_error(key, message);
        }

        self.add_fault(key, fault)
    }

    /// Mark `key` valid.
    pub fn mark_valid(&mut self, key: &str) -> FieldStateResult<()> {
        self.mark(key, ValidationState::Valid)
    }

    /// Mark `key` skipped.
    pub fn mark_skipped(&mut self, key: &str) -> FieldStateResult<()> {
        self.mark(key, ValidationState::Skipped)
    }

    fn mark(&mut self, key: &str, target: ValidationState) -> FieldStateResult<()> {
        let entry = Self::get_or_create(&mut self.root, self.options.max_insert_depth, key)?;
        if entry.validation_state() == ValidationState::Invalid {
            tracing::debug!(
                target: "fieldstate::store",
                key,
                state = %target,
                "refused to clear invalid field"
            );
            return Err(FieldStateError::invalid_transition(key, target));
        }
        if entry.mark_non_container() {
            self.entry_count += 1;
        }
        entry.set_validation_state(target);
        Ok(())
    }

    // =========================================================================
    // Reading
    // =========================================================================

    /// Entry recorded at exactly `key`. Containers are not entries.
    pub fn lookup(&self, key: &str) -> Option<&FieldEntry> {
        self.root.descend(key).filter(|entry| !entry.is_container())
    }

    /// `true` if an entry is recorded at exactly `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Own state of the entry at `key`, or `Unvalidated` if there is none.
    pub fn validation_state(&self, key: &str) -> ValidationState {
        self.lookup(key)
            .map(FieldEntry::validation_state)
            .unwrap_or_default()
    }

    /// Combined state of the node at `prefix` and everything below it.
    ///
    /// `Unvalidated` anywhere wins outright. Otherwise `Invalid` if any
    /// entry is invalid, else `Valid`. Skipped entries count as valid. An
    /// absent prefix is `Valid`.
    pub fn aggregate_validity(&self, prefix: &str) -> ValidationState {
        let Some(start) = self.root.descend(prefix) else {
            return ValidationState::Valid;
        };
        let max_depth = self.options.max_aggregation_depth;

        let mut invalid = false;
        let mut stack: SmallVec<[(&FieldEntry, usize); 16]> = SmallVec::new();
        stack.push((start, 0));
        while let Some((node, depth)) = stack.pop() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            if !node.is_container() {
                match node.validation_state() {
                    ValidationState::Unvalidated => return ValidationState::Unvalidated,
                    ValidationState::Invalid => invalid = true,
                    ValidationState::Valid | ValidationState::Skipped => {}
                }
            }
            stack.extend(node.children().iter().map(|child| (child, depth + 1)));
        }

        if invalid {
            ValidationState::Invalid
        } else {
            ValidationState::Valid
        }
    }

    /// Aggregate state of the whole store.
    pub fn validation_state_of_root(&self) -> ValidationState {
        self.aggregate_validity("")
    }

    /// `true` when the whole store aggregates to `Valid` or `Skipped`.
    pub fn is_valid(&self) -> bool {
        self.validation_state_of_root().is_acceptable()
    }

    /// Entries at and below `prefix`, pre-order, siblings in segment order.
    pub fn enumerate(&self, prefix: &str) -> PrefixIter<'_> {
        PrefixIter::new(self.root.descend(prefix))
    }

    /// `(key, entry)` for every entry in the store.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.enumerate(""))
    }

    /// Keys of every entry in the store.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.enumerate("").map(FieldEntry::key)
    }

    /// Every entry in the store.
    pub fn values(&self) -> PrefixIter<'_> {
        self.enumerate("")
    }

    // =========================================================================
    // Removal and bulk operations
    // =========================================================================

    /// Turn the entry at `key` back into a container.
    ///
    /// Descendants are untouched. Returns `false` if no entry was recorded
    /// at exactly `key`.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.root.descend_mut(key) {
            Some(entry) if !entry.is_container() => {
                self.entry_count -= 1;
                self.error_count = self.error_count.saturating_sub(entry.errors().len());
                entry.reset();
                true
            }
            _ => false,
        }
    }

    /// Drop errors and reset state to `Unvalidated` for every entry at and
    /// below `prefix`. Values are kept.
    pub fn clear_validation_state(&mut self, prefix: &str) {
        if let Some(start) = self.root.descend_mut(prefix) {
            let cleared = start.clear_validation_in_subtree();
            self.error_count = self.error_count.saturating_sub(cleared);
        }
    }

    /// Remove every entry and reset all counters.
    pub fn clear(&mut self) {
        self.root.reset();
        self.root.clear_children();
        self.entry_count = 0;
        self.error_count = 0;
        self.max_errors_reached = false;
    }

    /// Copy every entry of `other` into this store, overwriting value,
    /// attempted text, errors and state at matching keys.
    ///
    /// Entries of `self` absent from `other` are left alone. Copying stops
    /// at the first key this store's insert bound rejects.
    pub fn merge(&mut self, other: &FieldStateStore) -> FieldStateResult<()> {
        let before = self.entry_count;
        for source in other.values() {
            let target =
                Self::get_or_create(&mut self.root, self.options.max_insert_depth, source.key())?;
            if target.mark_non_container() {
                self.entry_count += 1;
            }
            self.error_count =
                (self.error_count + source.errors().len()).saturating_sub(target.errors().len());
            target.copy_from(source);
        }
        tracing::debug!(
            target: "fieldstate::store",
            merged = other.entry_count,
            added = self.entry_count - before,
            "merged field state"
        );
        Ok(())
    }
}

impl Default for FieldStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a FieldStateStore {
    type Item = (&'a str, &'a FieldEntry);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
