use crate::record;
use crate::refs::{SpanRef, TransactionRef};

/// Operations every execution-context backend provides: one optional
/// transaction plus a LIFO stack of spans, scoped to the calling execution
/// context.
///
/// Absence of a transaction or span is a normal state, not a failure, so
/// every read yields an `Option` and no operation can error.
pub trait ExecutionContext {
    /// The transaction visible in this execution context, or `None` if no
    /// unit of work is active. With `clear` the stored value is taken in the
    /// same step, leaving `None` behind.
    fn get_transaction(&self, clear: bool) -> Option<TransactionRef>;

    /// Overwrites the transaction for this execution context. `None` clears
    /// it explicitly. Contexts that branched off earlier keep their copy.
    fn set_transaction(&self, transaction: Option<TransactionRef>);

    /// The currently active span: the most recently set, not yet unset one.
    fn get_span(&self) -> Option<SpanRef>;

    /// Activates `span`. The previously active span is retained beneath it
    /// and becomes active again once `span` is unset, so callers never track
    /// parent spans themselves.
    fn set_span(&self, span: SpanRef);

    /// Deactivates and returns the active span; the one beneath it (if any)
    /// becomes active. With `clear_all` the whole stack is discarded in one
    /// step and the span that had been active is still returned. Popping an
    /// empty stack is a no-op yielding `None`.
    fn unset_span(&self, clear_all: bool) -> Option<SpanRef>;
}

/// Thread-local backed [`ExecutionContext`].
///
/// Storage lives in a per-thread cell, so concurrently running threads never
/// alias each other's state and no locking is involved. Async tasks get the
/// same isolation through [`FutureExt`](crate::FutureExt), which
/// re-establishes the task's own record around every poll.
#[derive(Debug, Default)]
pub struct ExecutionContextStore;

impl ExecutionContextStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExecutionContext for ExecutionContextStore {
    fn get_transaction(&self, clear: bool) -> Option<TransactionRef> {
        record::with_record(|record| {
            if clear {
                // take() reads and clears inside a single borrow of the
                // record, indivisible from this context's point of view.
                record.transaction.take()
            } else {
                record.transaction.clone()
            }
        })
    }

    fn set_transaction(&self, transaction: Option<TransactionRef>) {
        record::with_record(|record| record.transaction = transaction);
    }

    fn get_span(&self) -> Option<SpanRef> {
        record::with_record(|record| record.spans.last().cloned())
    }

    fn set_span(&self, span: SpanRef) {
        record::with_record(|record| record.spans.push(span));
    }

    fn unset_span(&self, clear_all: bool) -> Option<SpanRef> {
        record::with_record(|record| {
            if clear_all {
                let tail = record.spans.last().cloned();
                record.spans.clear();
                tail
            } else {
                record.spans.pop()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_is_empty() {
        let context = ExecutionContextStore::new();
        assert!(context.get_transaction(false).is_none());
        assert!(context.get_span().is_none());
    }

    #[test]
    fn transaction_round_trip() {
        let context = ExecutionContextStore::new();
        let transaction = TransactionRef::new("GET /users");
        context.set_transaction(Some(transaction.clone()));
        assert_eq!(context.get_transaction(false), Some(transaction.clone()));
        // a plain read leaves the value in place
        assert_eq!(context.get_transaction(false), Some(transaction));
    }

    #[test]
    fn clearing_read_takes_the_transaction() {
        let context = ExecutionContextStore::new();
        let transaction = TransactionRef::new("POST /orders");
        context.set_transaction(Some(transaction.clone()));
        assert_eq!(context.get_transaction(true), Some(transaction));
        assert!(context.get_transaction(false).is_none());
    }

    #[test]
    fn set_transaction_none_clears() {
        let context = ExecutionContextStore::new();
        context.set_transaction(Some(TransactionRef::new("job")));
        context.set_transaction(None);
        assert!(context.get_transaction(false).is_none());
    }

    #[test]
    fn spans_nest_in_lifo_order() {
        let context = ExecutionContextStore::new();
        let outer = SpanRef::new("outer");
        let inner = SpanRef::new("inner");

        context.set_span(outer.clone());
        context.set_span(inner.clone());
        assert_eq!(context.get_span(), Some(inner.clone()));

        assert_eq!(context.unset_span(false), Some(inner));
        assert_eq!(context.get_span(), Some(outer.clone()));
        assert_eq!(context.unset_span(false), Some(outer));
        assert!(context.get_span().is_none());
    }

    #[test]
    fn popping_an_empty_stack_is_a_no_op() {
        let context = ExecutionContextStore::new();
        assert!(context.unset_span(false).is_none());
        assert!(context.unset_span(true).is_none());
        assert!(context.get_span().is_none());
    }

    #[test]
    fn clear_all_returns_the_active_span() {
        let context = ExecutionContextStore::new();
        let first = SpanRef::new("first");
        let second = SpanRef::new("second");
        context.set_span(first);
        context.set_span(second.clone());

        assert_eq!(context.unset_span(true), Some(second));
        assert!(context.get_span().is_none());
        assert!(context.unset_span(false).is_none());
    }

    #[test]
    fn get_span_does_not_mutate() {
        let context = ExecutionContextStore::new();
        let span = SpanRef::new("only");
        context.set_span(span.clone());
        assert_eq!(context.get_span(), Some(span.clone()));
        assert_eq!(context.get_span(), Some(span));
    }
}
