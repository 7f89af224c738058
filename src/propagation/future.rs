use super::ContextSnapshot;
use crate::record::{self, ContextRecord};
use std::{
    future::Future,
    mem,
    pin::Pin,
    task::{Context, Poll},
};

/// Future that runs inside its own execution context.
///
/// The future owns its tracing record. Every poll installs that record for
/// the worker thread, polls the inner future, and takes the (possibly
/// mutated) record back out. The task therefore keeps its state when the
/// executor migrates it between threads, and nothing it writes leaks into
/// the thread it happened to be polled on.
pub struct ScopedFuture<F> {
    record: ContextRecord,
    inner: F,
}

impl<F: Future> Future for ScopedFuture<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Safety: `inner` is re-pinned immediately and never moved out.
        let unpinned = unsafe { Pin::get_unchecked_mut(self) };

        let scope = EnteredRecord::enter(mem::take(&mut unpinned.record));
        let poll = unsafe { Pin::new_unchecked(&mut unpinned.inner) }.poll(cx);
        unpinned.record = scope.exit();
        poll
    }
}

/// Worker-thread record displaced while a task's record is installed. Drop
/// restores it even if the inner poll panics (the task's record is lost with
/// the task in that case).
struct EnteredRecord {
    prior: Option<ContextRecord>,
}

impl EnteredRecord {
    fn enter(record: ContextRecord) -> Self {
        Self {
            prior: Some(record::replace(record)),
        }
    }

    fn exit(mut self) -> ContextRecord {
        record::replace(self.prior.take().unwrap_or_default())
    }
}

impl Drop for EnteredRecord {
    fn drop(&mut self) {
        if let Some(prior) = self.prior.take() {
            record::replace(prior);
        }
    }
}

/// Attaches an execution context to a future at the point it is handed to a
/// spawn function or executor.
pub trait FutureExt: Sized {
    /// Runs this future inside `snapshot`'s tracing state.
    fn with_context(self, snapshot: ContextSnapshot) -> ScopedFuture<Self>;

    /// Runs this future inside a snapshot of the caller's current tracing
    /// state, taken now. The task and the caller evolve independently from
    /// here on.
    fn with_current_context(self) -> ScopedFuture<Self>;
}

impl<F: Future> FutureExt for F {
    fn with_context(self, snapshot: ContextSnapshot) -> ScopedFuture<Self> {
        ScopedFuture {
            record: snapshot.into_record(),
            inner: self,
        }
    }

    fn with_current_context(self) -> ScopedFuture<Self> {
        self.with_context(ContextSnapshot::capture())
    }
}
