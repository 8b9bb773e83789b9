//! In-flight operation registry
//!
//! Each network operation registers itself for as long as its guard lives.
//! The store is busy while any entry remains, so one operation finishing
//! never hides another that is still running.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Operation kinds a store runs against the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update(i64),
    Delete(i64),
    Total,
}

#[derive(Debug, Default)]
pub struct InFlight {
    next_id: AtomicU64,
    running: Mutex<BTreeMap<u64, Operation>>,
}

impl InFlight {
    pub fn begin(&self, op: Operation) -> InFlightGuard<'_> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.running.lock().insert(id, op);
        InFlightGuard { registry: self, id }
    }

    pub fn is_busy(&self) -> bool {
        !self.running.lock().is_empty()
    }

    /// Running operations, oldest first
    pub fn snapshot(&self) -> Vec<Operation> {
        self.running.lock().values().copied().collect()
    }
}

/// Removes its entry on drop (success, error, or cancelled future)
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    registry: &'a InFlight,
    id: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.registry.running.lock().remove(&self.id);
    }
}
