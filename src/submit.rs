use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Registry of submissions currently in flight, keyed by actor and target.
/// One actor resubmitting the same form while the first request is still
/// running gets refused instead of firing a second backend call.
#[derive(Clone, Default)]
pub struct SubmitGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Holds a slot in the registry; dropping it frees the slot, so a failed
/// or aborted submission is immediately retryable.
pub struct SubmitPermit {
    in_flight: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self, key: impl Into<String>) -> Option<SubmitPermit> {
        let key = key.into();
        let mut held = self.lock();
        if !held.insert(key.clone()) {
            return None;
        }
        drop(held);
        Some(SubmitPermit {
            in_flight: Arc::clone(&self.in_flight),
            key,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // A poisoned lock only means a panicking task held it; the set
        // itself is still consistent for insert/remove.
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        let mut held = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        held.remove(&self.key);
    }
}
