//! Append-only in-memory record of accepted payments.

use std::sync::{Mutex, MutexGuard};

use crate::payment::PaymentLogEntry;

/// Append-only sequence of [`PaymentLogEntry`] values.
///
/// Entries are never mutated or removed. Readers get cloned snapshots.
#[derive(Debug, Default)]
pub struct PaymentLog {
    entries: Mutex<Vec<PaymentLogEntry>>,
}

impl PaymentLog {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry
    // (push is the only mutation), so a poisoned guard is still usable.
    fn entries(&self) -> MutexGuard<'_, Vec<PaymentLogEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an entry.
    pub fn append(&self, entry: PaymentLogEntry) {
        self.entries().push(entry);
    }

    /// The most recent `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<PaymentLogEntry> {
        let entries = self.entries();
        let start = entries.len().saturating_sub(n);
        entries[start..].to_vec()
    }

    /// Copy of every entry, oldest first.
    pub fn snapshot(&self) -> Vec<PaymentLogEntry> {
        self.entries().clone()
    }

    /// Total number of entries ever appended.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
