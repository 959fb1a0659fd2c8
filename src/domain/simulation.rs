use log::info;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::baker::{Baker, BakerCard, BakerId, BakerSnapshot, Timings};
use crate::domain::cancel::CancelToken;
use crate::domain::catalog::RecipeCatalog;
use crate::domain::disruption::{DisruptionPolicy, RandomInjector, SharedInjector};
use crate::domain::monitor::Monitor;
use crate::domain::pool::{KitchenPool, PoolSnapshot};
use crate::error::{Error, Result};

/// Tunables for one challenge run.
///
/// The defaults mirror the interactive challenge: 10% disruption
/// chance consumed at most once per baker, one-second work steps,
/// half-second status cadence.
#[derive(Debug, Clone)]
pub struct ChallengeConfig {
    pub bakers: usize,
    pub probability: f64,
    pub policy: DisruptionPolicy,
    pub timings: Timings,
    pub monitor_cadence: Duration,
}

impl ChallengeConfig {
    pub fn new(bakers: usize) -> Self {
        Self {
            bakers,
            probability: 0.1,
            policy: DisruptionPolicy::OncePerBaker,
            timings: Timings::default(),
            monitor_cadence: Duration::from_millis(500),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.bakers == 0 {
            return Err(Error::ConfigError("baker count must be > 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(Error::ConfigError(format!(
                "disruption probability must be within [0, 1], got {}",
                self.probability
            )));
        }
        Ok(())
    }
}

/// What a finished (or cancelled) run reports back.
#[derive(Debug)]
pub struct ChallengeOutcome {
    /// Baker ids in the order the monitor first observed them finished.
    pub finish_order: Vec<BakerId>,
    /// Total disruptions across all bakers.
    pub disruptions: u32,
    pub elapsed: Duration,
    pub cancelled: bool,
}

/// One bake-off: the pool, the catalog, the bakers and the monitor.
///
/// The pool is owned here and shared out by `Arc`; it outlives every
/// baker thread and is torn down with the challenge, so no teardown
/// path depends on bakers having released anything first.
#[derive(Debug)]
pub struct Challenge {
    config: ChallengeConfig,
    catalog: Arc<RecipeCatalog>,
    pool: Arc<KitchenPool>,
    injector: SharedInjector,
    cancel: CancelToken,
    cards: Vec<Arc<BakerCard>>,
}

impl Challenge {
    /// Builds a challenge with the built-in catalog and the random
    /// injector derived from the config.
    pub fn new(config: ChallengeConfig) -> Result<Self> {
        let injector =
            SharedInjector(Arc::new(RandomInjector::new(config.probability, config.policy)));
        let catalog = Arc::new(RecipeCatalog::builtin().clone());
        Self::with_parts(config, catalog, injector)
    }

    /// Fully parameterized constructor: custom catalog and injector.
    pub fn with_parts(
        config: ChallengeConfig,
        catalog: Arc<RecipeCatalog>,
        injector: SharedInjector,
    ) -> Result<Self> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(Error::CatalogError("catalog contains no recipes".to_string()));
        }
        let cards = (0..config.bakers).map(|id| Arc::new(BakerCard::new(id))).collect();
        Ok(Self {
            config,
            catalog,
            pool: Arc::new(KitchenPool::new()),
            injector,
            cancel: CancelToken::new(),
            cards,
        })
    }

    /// Token for cancelling the run from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn pool(&self) -> Arc<KitchenPool> {
        Arc::clone(&self.pool)
    }

    /// Spawns one thread per baker, then runs the monitor loop on the
    /// calling thread until everyone finished (or the token fired).
    ///
    /// `on_tick` receives baker and pool snapshots once per monitor
    /// cycle; pass a no-op to run headless.
    pub fn run<F>(self, on_tick: F) -> ChallengeOutcome
    where
        F: FnMut(&[BakerSnapshot], &PoolSnapshot, Duration),
    {
        info!(
            "challenge starting: {} bakers, {} recipes, disruption chance {}",
            self.config.bakers,
            self.catalog.len(),
            self.config.probability
        );

        let start = Instant::now();
        let mut handles = Vec::with_capacity(self.config.bakers);
        for card in &self.cards {
            let baker = Baker::new(
                Arc::clone(card),
                Arc::clone(&self.pool),
                Arc::clone(&self.catalog),
                self.injector.clone(),
                self.config.timings,
                self.cancel.clone(),
            );
            let name = format!("baker-{}", card.id());
            let handle = thread::Builder::new()
                .name(name)
                .spawn(move || baker.run())
                .expect("failed to spawn baker thread");
            handles.push(handle);
        }

        let monitor = Monitor::new(
            self.cards.clone(),
            Arc::clone(&self.pool),
            self.config.monitor_cadence,
            self.cancel.clone(),
        );
        let finish_log = monitor.watch(handles, on_tick);

        let cancelled = self.cancel.is_cancelled();
        let disruptions = self.cards.iter().map(|card| card.disruptions()).sum();
        let outcome = ChallengeOutcome {
            finish_order: finish_log.into_order(),
            disruptions,
            elapsed: start.elapsed(),
            cancelled,
        };

        info!(
            "challenge over after {:.1?}: {} of {} finished, {} disruptions{}",
            outcome.elapsed,
            outcome.finish_order.len(),
            self.config.bakers,
            outcome.disruptions,
            if outcome.cancelled { " (cancelled)" } else { "" }
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bakers_is_a_config_error() {
        let err = Challenge::new(ChallengeConfig::new(0)).expect_err("zero bakers");
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn out_of_range_probability_is_a_config_error() {
        let mut config = ChallengeConfig::new(2);
        config.probability = 1.5;
        assert!(Challenge::new(config).is_err());
    }
}
