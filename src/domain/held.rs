use crate::domain::pool::KitchenPool;
use crate::domain::resource::{RESOURCE_COUNT, ResourceKind};

/// Per-baker record of which resources are currently held.
///
/// The flags are the baker's side of the release bookkeeping: a unit is
/// returned to the pool exactly once per acquire, and `release_all` is
/// the rollback path a disruption or cancellation uses to hand back
/// everything at once.
#[derive(Debug, Default)]
pub struct HeldResources {
    held: [bool; RESOURCE_COUNT],
}

impl HeldResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holds(&self, kind: ResourceKind) -> bool {
        self.held[kind.index()]
    }

    pub fn mark_acquired(&mut self, kind: ResourceKind) {
        debug_assert!(!self.held[kind.index()], "double acquire of {}", kind.label());
        self.held[kind.index()] = true;
    }

    pub fn mark_released(&mut self, kind: ResourceKind) {
        debug_assert!(self.held[kind.index()], "release of {} that is not held", kind.label());
        self.held[kind.index()] = false;
    }

    pub fn is_empty(&self) -> bool {
        self.held.iter().all(|flag| !flag)
    }

    /// Returns every held unit to the pool and clears the flags.
    pub fn release_all(&mut self, pool: &KitchenPool) {
        for kind in ResourceKind::ALL {
            if self.held[kind.index()] {
                pool.release(kind);
                self.held[kind.index()] = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_all_restores_the_pool_and_clears_flags() {
        let pool = KitchenPool::new();
        let mut held = HeldResources::new();

        for kind in [ResourceKind::Bowl, ResourceKind::Spoon, ResourceKind::Mixer] {
            assert!(pool.try_acquire(kind));
            held.mark_acquired(kind);
        }
        assert!(!held.is_empty());
        assert!(!pool.snapshot().is_fully_stocked());

        held.release_all(&pool);

        assert!(held.is_empty());
        assert!(pool.snapshot().is_fully_stocked(), "every unit must be back after rollback");
    }

    #[test]
    fn release_all_on_empty_record_is_a_no_op() {
        let pool = KitchenPool::new();
        let mut held = HeldResources::new();
        held.release_all(&pool);
        assert!(pool.snapshot().is_fully_stocked());
    }
}
