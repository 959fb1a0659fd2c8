use log::{error, info};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::domain::baker::{BakerCard, BakerId, BakerSnapshot, BakerState};
use crate::domain::cancel::CancelToken;
use crate::domain::pool::{KitchenPool, PoolSnapshot};

/// Append-only record of finishing order.
///
/// Single writer (the monitor); the set guards against recording a
/// baker twice without rescanning the list.
#[derive(Debug, Default)]
pub struct FinishLog {
    order: Vec<BakerId>,
    seen: HashSet<BakerId>,
}

impl FinishLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an id the first time it is seen. Returns false on a
    /// repeat observation.
    pub fn record(&mut self, id: BakerId) -> bool {
        if !self.seen.insert(id) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn order(&self) -> &[BakerId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_order(self) -> Vec<BakerId> {
        self.order
    }
}

/// Observes the bakers on a fixed cadence and detects completion.
///
/// The monitor only reads baker cards and the pool; it never takes part
/// in resource acquisition.
pub struct Monitor {
    cards: Vec<Arc<BakerCard>>,
    pool: Arc<KitchenPool>,
    cadence: Duration,
    cancel: CancelToken,
}

impl Monitor {
    pub fn new(
        cards: Vec<Arc<BakerCard>>,
        pool: Arc<KitchenPool>,
        cadence: Duration,
        cancel: CancelToken,
    ) -> Self {
        Self { cards, pool, cadence, cancel }
    }

    /// Polls until every baker is recorded finished or cancellation
    /// fires. Joins each baker's thread the first time it is observed
    /// finished, and hands a fresh snapshot pair to `on_tick` each
    /// cycle for rendering.
    pub fn watch<F>(&self, handles: Vec<JoinHandle<bool>>, mut on_tick: F) -> FinishLog
    where
        F: FnMut(&[BakerSnapshot], &PoolSnapshot, Duration),
    {
        let mut handles: Vec<Option<JoinHandle<bool>>> = handles.into_iter().map(Some).collect();
        debug_assert_eq!(handles.len(), self.cards.len(), "one thread handle per baker");

        let start = Instant::now();
        let mut log = FinishLog::new();

        loop {
            let mut all_finished = true;
            for (slot, card) in self.cards.iter().enumerate() {
                if card.state() == BakerState::Finished {
                    if log.record(card.id()) {
                        Self::join_baker(&mut handles[slot], card.id());
                        info!("baker {} has finished ({} of {})", card.id(), log.len(), self.cards.len());
                    }
                } else {
                    all_finished = false;
                }
            }

            if all_finished {
                break;
            }
            if self.cancel.is_cancelled() {
                info!("monitor stopping: challenge cancelled");
                break;
            }

            let snapshots: Vec<BakerSnapshot> = self.cards.iter().map(|card| card.snapshot()).collect();
            on_tick(&snapshots, &self.pool.snapshot(), start.elapsed());
            thread::sleep(self.cadence);
        }

        // Reap whatever is still running (bounded: every wait in the
        // baker protocol observes the cancellation token).
        for (slot, card) in self.cards.iter().enumerate() {
            Self::join_baker(&mut handles[slot], card.id());
        }

        log
    }

    fn join_baker(slot: &mut Option<JoinHandle<bool>>, id: BakerId) {
        if let Some(handle) = slot.take() {
            if handle.join().is_err() {
                error!("baker {} thread panicked", id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_log_records_each_id_once_in_order() {
        let mut log = FinishLog::new();
        assert!(log.record(2));
        assert!(log.record(0));
        assert!(!log.record(2), "repeat observation must not re-record");
        assert!(log.record(1));
        assert_eq!(log.order(), &[2, 0, 1]);
        assert_eq!(log.len(), 3);
    }
}
