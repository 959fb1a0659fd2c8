use bakehouse::domain::baker::Timings;
use bakehouse::domain::catalog::RecipeCatalog;
use bakehouse::domain::disruption::{
    AlwaysInjector, DisruptionPolicy, FailureInjector, NeverInjector,
};
use bakehouse::domain::simulation::{Challenge, ChallengeConfig};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

fn fast_config(bakers: usize) -> ChallengeConfig {
    let mut config = ChallengeConfig::new(bakers);
    config.probability = 0.0;
    config.timings = Timings {
        grab: Duration::from_millis(1),
        mix: Duration::from_millis(1),
        bake: Duration::from_millis(1),
        retry_wait: Duration::from_millis(2),
    };
    config.monitor_cadence = Duration::from_millis(5);
    config
}

fn builtin_catalog() -> Arc<RecipeCatalog> {
    Arc::new(RecipeCatalog::builtin().clone())
}

#[test]
fn single_baker_without_disruption_runs_clean() {
    let challenge =
        Challenge::with_parts(fast_config(1), builtin_catalog(), NeverInjector.clone_box())
            .expect("valid setup");
    let pool = challenge.pool();

    let outcome = challenge.run(|_, _, _| {});

    assert_eq!(outcome.finish_order, vec![0]);
    assert_eq!(outcome.disruptions, 0);
    assert!(!outcome.cancelled);
    assert!(pool.snapshot().is_fully_stocked(), "pool must return to initial capacities");
}

#[test]
fn forced_disruption_restarts_once_then_completes() {
    let injector = AlwaysInjector::new(DisruptionPolicy::OncePerBaker).clone_box();
    let challenge =
        Challenge::with_parts(fast_config(1), builtin_catalog(), injector).expect("valid setup");

    let outcome = challenge.run(|_, _, _| {});

    assert_eq!(outcome.finish_order, vec![0]);
    assert_eq!(outcome.disruptions, 1);
}

#[test]
fn crowded_kitchen_finishes_everyone_exactly_once() {
    let bakers = 6;
    let challenge =
        Challenge::with_parts(fast_config(bakers), builtin_catalog(), NeverInjector.clone_box())
            .expect("valid setup");
    let pool = challenge.pool();

    // Watch the pool while the challenge runs.
    let done = Arc::new(AtomicBool::new(false));
    let watcher = {
        let pool = Arc::clone(&pool);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::SeqCst) {
                for (kind, available) in pool.snapshot().iter() {
                    assert!(
                        available <= kind.capacity(),
                        "{} availability {} out of range",
                        kind.label(),
                        available
                    );
                }
                thread::sleep(Duration::from_millis(1));
            }
        })
    };

    let outcome = challenge.run(|_, _, _| {});
    done.store(true, Ordering::SeqCst);
    watcher.join().expect("watcher panicked");

    let mut seen = outcome.finish_order.clone();
    seen.sort_unstable();
    assert_eq!(seen, (0..bakers).collect::<Vec<_>>(), "each baker recorded exactly once");
    assert!(pool.snapshot().is_fully_stocked());
}

#[test]
fn status_callback_reports_every_baker() {
    let bakers = 3;
    let challenge =
        Challenge::with_parts(fast_config(bakers), builtin_catalog(), NeverInjector.clone_box())
            .expect("valid setup");

    let mut ticks = 0usize;
    let outcome = challenge.run(|snapshots, pool, _| {
        ticks += 1;
        assert_eq!(snapshots.len(), bakers);
        assert!(pool.available(bakehouse::domain::resource::ResourceKind::Spoon) <= 5);
    });

    assert_eq!(outcome.finish_order.len(), bakers);
    // Ticks only happen while someone is still working, so a very fast
    // run may render zero tables; that is fine.
    let _ = ticks;
}

#[test]
fn cancellation_tears_down_promptly_and_cleanly() {
    let mut config = fast_config(3);
    // Slow the bake so cancellation lands mid-run.
    config.timings.bake = Duration::from_millis(50);
    let challenge =
        Challenge::with_parts(config, builtin_catalog(), NeverInjector.clone_box())
            .expect("valid setup");
    let pool = challenge.pool();
    let token = challenge.cancel_token();

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(30));
        token.cancel();
    });

    let start = std::time::Instant::now();
    let outcome = challenge.run(|_, _, _| {});
    canceller.join().expect("canceller panicked");

    assert!(outcome.cancelled);
    assert!(outcome.finish_order.len() < 3, "cancellation must preempt some baker");
    assert!(
        start.elapsed() < Duration::from_secs(5),
        "teardown must be bounded, not hang on in-flight bakers"
    );
    assert!(
        pool.snapshot().is_fully_stocked(),
        "no unit may stay acquired-but-untracked after teardown"
    );
}
