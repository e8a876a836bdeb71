//! Test-only helpers for the CLI crate.

use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serialize tests that mutate process-wide environment variables.
pub fn lock_env() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
