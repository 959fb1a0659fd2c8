use std::sync::{Condvar, Mutex};
use std::time::Duration;

use crate::domain::cancel::CancelToken;
use crate::domain::resource::{RESOURCE_COUNT, ResourceKind};

// Upper bound on a single condvar park. Keeps cancellation observable
// even if no release ever arrives to wake the waiter.
const WAIT_SLICE: Duration = Duration::from_millis(50);

/// The shared kitchen: one available-unit counter per resource, all
/// guarded by a single mutex so every acquire/release is atomic with
/// respect to the others.
///
/// Counters move only through `try_acquire`/`acquire` (decrement) and
/// `release` (increment). A release that would push a counter past its
/// capacity means a caller returned a unit it never took; that is a
/// programming defect and the pool fails fast instead of clamping.
#[derive(Debug)]
pub struct KitchenPool {
    available: Mutex<[u32; RESOURCE_COUNT]>,
    released: Condvar,
}

/// Read-only view of the pool counters, for the monitor and the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSnapshot {
    available: [u32; RESOURCE_COUNT],
}

impl PoolSnapshot {
    pub fn available(&self, kind: ResourceKind) -> u32 {
        self.available[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL.iter().map(|kind| (*kind, self.available[kind.index()]))
    }

    /// True iff every counter sits at its full capacity.
    pub fn is_fully_stocked(&self) -> bool {
        ResourceKind::ALL.iter().all(|kind| self.available(*kind) == kind.capacity())
    }
}

impl KitchenPool {
    pub fn new() -> Self {
        let mut available = [0u32; RESOURCE_COUNT];
        for kind in ResourceKind::ALL {
            available[kind.index()] = kind.capacity();
        }
        Self { available: Mutex::new(available), released: Condvar::new() }
    }

    /// Non-blocking acquire of one unit. Returns false when no unit is
    /// available; never waits.
    pub fn try_acquire(&self, kind: ResourceKind) -> bool {
        let mut counts = self.available.lock().expect("kitchen pool mutex poisoned");
        if counts[kind.index()] == 0 {
            return false;
        }
        counts[kind.index()] -= 1;
        true
    }

    /// Blocking acquire of one unit.
    ///
    /// Parks on the pool condvar until a unit becomes available or the
    /// cancellation token fires. Returns false, without acquiring,
    /// on cancellation.
    pub fn acquire(&self, kind: ResourceKind, cancel: &CancelToken) -> bool {
        let mut counts = self.available.lock().expect("kitchen pool mutex poisoned");
        loop {
            if counts[kind.index()] > 0 {
                counts[kind.index()] -= 1;
                return true;
            }
            if cancel.is_cancelled() {
                return false;
            }
            let (guard, _timeout) = self
                .released
                .wait_timeout(counts, WAIT_SLICE)
                .expect("kitchen pool condvar wait failed");
            counts = guard;
        }
    }

    /// Returns one unit and wakes every waiter.
    ///
    /// Panics if the counter is already at capacity.
    pub fn release(&self, kind: ResourceKind) {
        let mut counts = self.available.lock().expect("kitchen pool mutex poisoned");
        let index = kind.index();
        if counts[index] >= kind.capacity() {
            log::error!(
                "{} released beyond capacity ({} / {})",
                kind.label(),
                counts[index],
                kind.capacity()
            );
            panic!("release without matching acquire: {}", kind.label());
        }
        counts[index] += 1;
        drop(counts);
        self.released.notify_all();
    }

    /// Parks the caller until some unit (of any kind) is released, the
    /// bound elapses, or cancellation fires.
    ///
    /// Bakers call this between failed `try_acquire` rounds instead of
    /// sleeping a fixed interval, so a release wakes them immediately
    /// while a quiet pool costs no CPU.
    pub fn wait_for_release(&self, bound: Duration, cancel: &CancelToken) {
        if cancel.is_cancelled() {
            return;
        }
        let counts = self.available.lock().expect("kitchen pool mutex poisoned");
        let _ = self
            .released
            .wait_timeout(counts, bound.min(WAIT_SLICE))
            .expect("kitchen pool condvar wait failed");
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        let counts = self.available.lock().expect("kitchen pool mutex poisoned");
        PoolSnapshot { available: *counts }
    }
}

impl Default for KitchenPool {
    fn default() -> Self {
        Self::new()
    }
}
