use crate::record::{self, ContextRecord};
use std::marker::PhantomData;

/// Frozen copy of one execution context's tracing state.
///
/// Captured at a spawn boundary and attached inside the child context, it
/// gives the child the parent's transaction and span stack as starting
/// values. The copy is taken at capture time; once attached, the two
/// contexts evolve independently in both directions.
#[derive(Clone, Debug)]
pub struct ContextSnapshot {
    record: ContextRecord,
}

impl ContextSnapshot {
    /// Snapshot of the calling execution context's current state.
    pub fn capture() -> Self {
        Self {
            record: record::snapshot(),
        }
    }

    /// Snapshot with no transaction and no spans. Attaching it detaches the
    /// current strand from any traced unit of work.
    pub fn empty() -> Self {
        Self {
            record: ContextRecord::default(),
        }
    }

    /// Installs this snapshot as the calling strand's state. The returned
    /// guard puts the displaced state back when dropped, so attachments
    /// nest like scopes.
    pub fn attach(self) -> AttachGuard {
        AttachGuard {
            prior: Some(record::replace(self.record)),
            _not_send: PhantomData,
        }
    }

    pub(crate) fn into_record(self) -> ContextRecord {
        self.record
    }
}

/// Restores the state a [`ContextSnapshot::attach`] displaced.
///
/// `!Send`: the guard must be dropped on the thread it was created on, since
/// the displaced record lives in that thread's storage.
#[derive(Debug)]
pub struct AttachGuard {
    prior: Option<ContextRecord>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for AttachGuard {
    fn drop(&mut self) {
        if let Some(prior) = self.prior.take() {
            record::replace(prior);
        }
    }
}
