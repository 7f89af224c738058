mod future;
mod snapshot;
mod thread;

pub use future::{FutureExt, ScopedFuture};
pub use snapshot::{AttachGuard, ContextSnapshot};
pub use thread::spawn_with_context;
