//! The process-wide lock that keeps concurrent lines from interleaving on stderr.
//!
//! A locked [`LogLine`](crate::LogLine) takes this lock before writing its
//! header and keeps it until its line has been written and flushed, so the
//! whole lifetime of concurrently active lines is serialized. The lock is not
//! reentrant: a thread that creates a second locked line while its first one
//! is still alive blocks forever.

use std::sync::{Mutex, MutexGuard, PoisonError};

static LINE_LOCK: Mutex<()> = Mutex::new(());

/// Held while a locked line is alive. Dropping it releases the lock.
#[must_use = "dropping the guard immediately releases the line lock"]
#[derive(Debug)]
pub struct LineLock {
    _guard: MutexGuard<'static, ()>,
}

/// Blocks until the process-wide line lock is free.
///
/// A lock poisoned by a panicking holder is taken over as-is: the guarded
/// state is `()`, so there is nothing to repair.
pub fn acquire() -> LineLock {
    let guard = LINE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    LineLock { _guard: guard }
}
