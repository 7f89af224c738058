use super::ContextSnapshot;
use eyre::{eyre, Result};
use std::thread::{self, JoinHandle};

/// Spawns an OS thread whose tracing state starts as a snapshot of the
/// caller's, taken here at the spawn point. The child's later writes stay in
/// the child; the caller's state is untouched.
pub fn spawn_with_context<F, T>(f: F) -> Result<JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let snapshot = ContextSnapshot::capture();
    thread::Builder::new()
        .spawn(move || {
            let _scope = snapshot.attach();
            f()
        })
        .map_err(|e| eyre!("failed to spawn thread: {}", e))
}
