use crate::refs::{SpanRef, TransactionRef};
use std::cell::RefCell;

thread_local! {
    // Record of the strand currently running on this thread. Tasks that hop
    // between worker threads carry their own record and swap it in around
    // every poll, see propagation::future.
    static ACTIVE_RECORD: RefCell<ContextRecord> = RefCell::new(ContextRecord::default());
}

/// The tracing state of one execution context: the active transaction (if
/// any) and the stack of active spans, innermost last.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContextRecord {
    pub transaction: Option<TransactionRef>,
    pub spans: Vec<SpanRef>,
}

/// Runs `f` with mutable access to the calling strand's record. The record is
/// materialized lazily as empty on first access, never shared with another
/// strand.
pub(crate) fn with_record<T>(f: impl FnOnce(&mut ContextRecord) -> T) -> T {
    ACTIVE_RECORD.with(|record| f(&mut record.borrow_mut()))
}

/// Installs `record` as the calling strand's state and returns the record it
/// displaced.
pub(crate) fn replace(record: ContextRecord) -> ContextRecord {
    ACTIVE_RECORD.with(|cell| cell.replace(record))
}

/// Copy of the calling strand's current record.
pub(crate) fn snapshot() -> ContextRecord {
    ACTIVE_RECORD.with(|cell| cell.borrow().clone())
}
