use rand::Rng;
use std::sync::Arc;

use crate::domain::baker::BakerId;

/// How often the disruption draw may fire for a single baker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisruptionPolicy {
    /// A baker that has already been sent back once is safe for the rest
    /// of the run. Bounds total retries to one per baker.
    OncePerBaker,
    /// Every checkpoint draws independently.
    PerCheckpoint,
}

/// Decides, at each mixing/baking checkpoint, whether the head chef
/// sends the baker back to the start of the current recipe.
///
/// Injected as a capability so tests can force or suppress disruption
/// deterministically. The caller owns recovery: on `true` it must
/// release every held resource and retry the same recipe.
pub trait FailureInjector: std::fmt::Debug + Send + Sync {
    fn should_disrupt(&self, baker: BakerId, prior_disruptions: u32) -> bool;
    fn clone_box(&self) -> SharedInjector;
}

#[derive(Debug)]
pub struct SharedInjector(pub Arc<dyn FailureInjector>);

impl Clone for SharedInjector {
    fn clone(&self) -> Self {
        self.0.clone_box()
    }
}

impl std::ops::Deref for SharedInjector {
    type Target = dyn FailureInjector;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

/// The production injector: a uniform draw in [0, 1) against a fixed
/// probability shared by all bakers. Probability 0.0 disables
/// disruption for the whole run.
#[derive(Debug, Clone)]
pub struct RandomInjector {
    probability: f64,
    policy: DisruptionPolicy,
}

impl RandomInjector {
    pub fn new(probability: f64, policy: DisruptionPolicy) -> Self {
        Self { probability, policy }
    }
}

impl FailureInjector for RandomInjector {
    fn should_disrupt(&self, _baker: BakerId, prior_disruptions: u32) -> bool {
        if self.policy == DisruptionPolicy::OncePerBaker && prior_disruptions > 0 {
            return false;
        }
        if self.probability <= 0.0 {
            return false;
        }
        rand::rng().random::<f64>() < self.probability
    }

    fn clone_box(&self) -> SharedInjector {
        SharedInjector(Arc::new(self.clone()))
    }
}

/// Deterministic double: never disrupts.
#[derive(Debug, Clone)]
pub struct NeverInjector;

impl FailureInjector for NeverInjector {
    fn should_disrupt(&self, _baker: BakerId, _prior_disruptions: u32) -> bool {
        false
    }

    fn clone_box(&self) -> SharedInjector {
        SharedInjector(Arc::new(self.clone()))
    }
}

/// Deterministic double: disrupts at every checkpoint the policy allows.
#[derive(Debug, Clone)]
pub struct AlwaysInjector {
    policy: DisruptionPolicy,
}

impl AlwaysInjector {
    pub fn new(policy: DisruptionPolicy) -> Self {
        Self { policy }
    }
}

impl FailureInjector for AlwaysInjector {
    fn should_disrupt(&self, _baker: BakerId, prior_disruptions: u32) -> bool {
        match self.policy {
            DisruptionPolicy::OncePerBaker => prior_disruptions == 0,
            DisruptionPolicy::PerCheckpoint => true,
        }
    }

    fn clone_box(&self) -> SharedInjector {
        SharedInjector(Arc::new(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_zero_never_disrupts() {
        let injector = RandomInjector::new(0.0, DisruptionPolicy::PerCheckpoint);
        for _ in 0..100 {
            assert!(!injector.should_disrupt(0, 0));
        }
    }

    #[test]
    fn probability_one_disrupts_until_policy_blocks_it() {
        let injector = RandomInjector::new(1.0, DisruptionPolicy::OncePerBaker);
        assert!(injector.should_disrupt(0, 0));
        assert!(!injector.should_disrupt(0, 1), "a disrupted baker is safe afterwards");

        let per_checkpoint = RandomInjector::new(1.0, DisruptionPolicy::PerCheckpoint);
        assert!(per_checkpoint.should_disrupt(0, 3));
    }

    #[test]
    fn always_injector_respects_policy() {
        let once = AlwaysInjector::new(DisruptionPolicy::OncePerBaker);
        assert!(once.should_disrupt(7, 0));
        assert!(!once.should_disrupt(7, 1));

        let every = AlwaysInjector::new(DisruptionPolicy::PerCheckpoint);
        assert!(every.should_disrupt(7, 5));
    }

    #[test]
    fn shared_injector_clones_through_the_trait_object() {
        let shared = SharedInjector(Arc::new(NeverInjector));
        let clone = shared.clone();
        assert!(!clone.should_disrupt(0, 0));
    }
}
