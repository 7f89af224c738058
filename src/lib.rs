#[macro_use]
extern crate derivative;

mod propagation;
mod record;
mod refs;
mod store;

pub use propagation::{spawn_with_context, AttachGuard, ContextSnapshot, FutureExt, ScopedFuture};
pub use refs::{SpanRef, TransactionRef};
pub use store::{ExecutionContext, ExecutionContextStore};
