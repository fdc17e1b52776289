//! Failure policies.
//!
//! Operations fall into two groups with opposite handling of partial
//! failure:
//!
//! - [`BestEffortAggregate`]: aggregate reads (shell lists, submodels of
//!   shells, concept descriptions). A failing item is omitted; the caller
//!   never sees it.
//! - [`FailLoudDualWrite`]: create/update/delete across repository and
//!   registry. A failing second write fails the whole operation even though
//!   the first write persists; the two stores are then inconsistent and no
//!   compensation is attempted.

use crate::error::ServiceError;
use std::fmt::Display;

/// Collects the successes of an aggregate read, dropping failures.
#[derive(Debug)]
pub struct BestEffortAggregate<T> {
    operation: &'static str,
    items: Vec<T>,
    skipped: usize,
}

impl<T> BestEffortAggregate<T> {
    /// Start collecting items for `operation`.
    #[must_use]
    pub const fn new(operation: &'static str) -> Self {
        Self {
            operation,
            items: Vec::new(),
            skipped: 0,
        }
    }

    /// Keep the item on success, skip it on failure.
    pub fn record<E: Display>(&mut self, id: &str, result: Result<T, E>) {
        match result {
            Ok(item) => self.items.push(item),
            Err(e) => {
                self.skipped += 1;
                tracing::debug!(operation = self.operation, id, error = %e, "Skipping item");
            }
        }
    }

    /// Number of items skipped so far.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// The collected items.
    #[must_use]
    pub fn finish(self) -> Vec<T> {
        if self.skipped > 0 {
            tracing::info!(
                operation = self.operation,
                kept = self.items.len(),
                skipped = self.skipped,
                "Aggregate read dropped failing items"
            );
        }
        self.items
    }
}

/// Tracks a write mirrored into a second store.
#[derive(Debug)]
pub struct FailLoudDualWrite<'a> {
    operation: &'static str,
    id: &'a str,
    first_done: bool,
}

impl<'a> FailLoudDualWrite<'a> {
    /// Start a dual write of entity `id`.
    #[must_use]
    pub const fn new(operation: &'static str, id: &'a str) -> Self {
        Self {
            operation,
            id,
            first_done: false,
        }
    }

    /// Outcome of one of the writes.
    ///
    /// A failure after an earlier write succeeded is logged as an
    /// inconsistency and returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the write's own error.
    pub fn step<T, E>(&mut self, store: &'static str, result: Result<T, E>) -> Result<T, ServiceError>
    where
        E: Into<ServiceError>,
    {
        match result {
            Ok(value) => {
                self.first_done = true;
                Ok(value)
            }
            Err(e) => {
                let err = e.into();
                if self.first_done {
                    tracing::warn!(
                        operation = self.operation,
                        id = self.id,
                        store,
                        error = %err,
                        "Write failed after the other store was already changed; stores are inconsistent"
                    );
                } else {
                    tracing::debug!(operation = self.operation, id = self.id, store, error = %err, "Write failed");
                }
                Err(err)
            }
        }
    }
}
