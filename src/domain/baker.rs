use log::{debug, info};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::domain::cancel::CancelToken;
use crate::domain::catalog::{Recipe, RecipeCatalog};
use crate::domain::disruption::SharedInjector;
use crate::domain::held::HeldResources;
use crate::domain::ingredient::StorageArea;
use crate::domain::pool::KitchenPool;
use crate::domain::resource::{MIXING_TOOLS, ResourceKind};

pub type BakerId = usize;

/// Shown as the current recipe once a baker has worked through the
/// whole catalog.
pub const COMPLETE_LABEL: &str = "Complete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BakerState {
    AwaitingIngredients,
    InPantry,
    InFridge,
    AwaitingTools,
    Mixing,
    AwaitingOven,
    Baking,
    Disrupted,
    Finished,
}

impl BakerState {
    pub fn label(&self) -> &'static str {
        match self {
            BakerState::AwaitingIngredients => "Waiting for Ingredients",
            BakerState::InPantry => "In the Pantry",
            BakerState::InFridge => "In the Fridge",
            BakerState::AwaitingTools => "Waiting for Mixing Tools",
            BakerState::Mixing => "Mixing Ingredients",
            BakerState::AwaitingOven => "Waiting for Oven",
            BakerState::Baking => "Baking",
            BakerState::Disrupted => "Getting chewed out",
            BakerState::Finished => "Finished",
        }
    }
}

/// Point-in-time copy of a baker's card, for the monitor/renderer.
#[derive(Debug, Clone)]
pub struct BakerSnapshot {
    pub id: BakerId,
    pub state: BakerState,
    pub recipe: Option<String>,
    pub disruptions: u32,
}

#[derive(Debug)]
struct CardInner {
    state: BakerState,
    recipe: Option<String>,
    disruptions: u32,
}

/// The monitor-visible record of one baker.
///
/// Written only by the owning baker thread; read by the monitor. The
/// mutex makes each field update atomic, nothing more — there is no
/// cross-baker coordination here.
#[derive(Debug)]
pub struct BakerCard {
    id: BakerId,
    inner: Mutex<CardInner>,
}

impl BakerCard {
    pub fn new(id: BakerId) -> Self {
        Self {
            id,
            inner: Mutex::new(CardInner {
                state: BakerState::AwaitingIngredients,
                recipe: None,
                disruptions: 0,
            }),
        }
    }

    pub fn id(&self) -> BakerId {
        self.id
    }

    pub fn state(&self) -> BakerState {
        self.inner.lock().expect("baker card mutex poisoned").state
    }

    pub fn disruptions(&self) -> u32 {
        self.inner.lock().expect("baker card mutex poisoned").disruptions
    }

    pub fn snapshot(&self) -> BakerSnapshot {
        let inner = self.inner.lock().expect("baker card mutex poisoned");
        BakerSnapshot {
            id: self.id,
            state: inner.state,
            recipe: inner.recipe.clone(),
            disruptions: inner.disruptions,
        }
    }

    fn set_state(&self, state: BakerState) {
        self.inner.lock().expect("baker card mutex poisoned").state = state;
    }

    fn set_recipe(&self, name: &str) {
        self.inner.lock().expect("baker card mutex poisoned").recipe = Some(name.to_string());
    }

    fn record_disruption(&self) {
        self.inner.lock().expect("baker card mutex poisoned").disruptions += 1;
    }
}

/// Simulated-work delays for the baker protocol. Small values keep the
/// test suite fast; defaults mirror the interactive challenge.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub grab: Duration,
    pub mix: Duration,
    pub bake: Duration,
    pub retry_wait: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            grab: Duration::from_secs(1),
            mix: Duration::from_secs(1),
            bake: Duration::from_secs(1),
            retry_wait: Duration::from_millis(50),
        }
    }
}

enum RecipeOutcome {
    Completed,
    Disrupted,
    Cancelled,
}

/// One competitor working through the catalog.
///
/// Runs on its own thread. All shared state lives in the pool and the
/// card; the baker never touches another baker's record.
pub struct Baker {
    card: Arc<BakerCard>,
    pool: Arc<KitchenPool>,
    catalog: Arc<RecipeCatalog>,
    injector: SharedInjector,
    timings: Timings,
    cancel: CancelToken,
    held: HeldResources,
    disruptions: u32,
}

impl Baker {
    pub fn new(
        card: Arc<BakerCard>,
        pool: Arc<KitchenPool>,
        catalog: Arc<RecipeCatalog>,
        injector: SharedInjector,
        timings: Timings,
        cancel: CancelToken,
    ) -> Self {
        Self {
            card,
            pool,
            catalog,
            injector,
            timings,
            cancel,
            held: HeldResources::new(),
            disruptions: 0,
        }
    }

    /// Works through every recipe in catalog order. Returns true when
    /// the whole catalog is done, false when cancelled mid-run.
    pub fn run(mut self) -> bool {
        let catalog = Arc::clone(&self.catalog);
        let mut index = 0;
        while let Some(recipe) = catalog.get(index) {
            self.card.set_recipe(&recipe.name);
            match self.run_recipe(recipe) {
                RecipeOutcome::Completed => {
                    debug!("baker {} completed '{}'", self.card.id(), recipe.name);
                    index += 1;
                }
                RecipeOutcome::Disrupted => {
                    // Same recipe again, from the top.
                }
                RecipeOutcome::Cancelled => {
                    self.held.release_all(&self.pool);
                    info!("baker {} stopping: challenge cancelled", self.card.id());
                    return false;
                }
            }
        }

        self.card.set_recipe(COMPLETE_LABEL);
        self.card.set_state(BakerState::Finished);
        debug_assert!(self.held.is_empty(), "finished baker still holds resources");
        true
    }

    fn run_recipe(&mut self, recipe: &Recipe) -> RecipeOutcome {
        let mut pantry_needed = recipe.units_needed(StorageArea::Pantry);
        let mut fridge_needed = recipe.units_needed(StorageArea::Fridge);

        // Ingredient phase: one unit per grab, storage area held only
        // for the duration of the grab. Never blocks while a grab from
        // the other area might succeed.
        self.card.set_state(BakerState::AwaitingIngredients);
        while pantry_needed > 0 || fridge_needed > 0 {
            if self.cancel.is_cancelled() {
                return RecipeOutcome::Cancelled;
            }
            if pantry_needed > 0 && self.try_grab(ResourceKind::Pantry, BakerState::InPantry) {
                pantry_needed -= 1;
                continue;
            }
            if fridge_needed > 0 && self.try_grab(ResourceKind::Fridge, BakerState::InFridge) {
                fridge_needed -= 1;
                continue;
            }
            self.card.set_state(BakerState::AwaitingIngredients);
            self.pool.wait_for_release(self.timings.retry_wait, &self.cancel);
        }

        // Tool phase: the one place partial holds persist across
        // retries. Already-held tools are kept while the missing ones
        // are polled.
        self.card.set_state(BakerState::AwaitingTools);
        loop {
            if self.cancel.is_cancelled() {
                return RecipeOutcome::Cancelled;
            }
            for tool in MIXING_TOOLS {
                if !self.held.holds(tool) && self.pool.try_acquire(tool) {
                    self.held.mark_acquired(tool);
                }
            }
            if MIXING_TOOLS.iter().all(|tool| self.held.holds(*tool)) {
                break;
            }
            self.pool.wait_for_release(self.timings.retry_wait, &self.cancel);
        }

        self.card.set_state(BakerState::Mixing);
        thread::sleep(self.timings.mix);
        if self.checkpoint(recipe) {
            return RecipeOutcome::Disrupted;
        }
        for tool in MIXING_TOOLS {
            self.pool.release(tool);
            self.held.mark_released(tool);
        }

        // Oven phase: blocking acquire. Nothing else is held at this
        // point, so waiting here cannot starve anyone.
        self.card.set_state(BakerState::AwaitingOven);
        if !self.pool.acquire(ResourceKind::Oven, &self.cancel) {
            return RecipeOutcome::Cancelled;
        }
        self.held.mark_acquired(ResourceKind::Oven);

        self.card.set_state(BakerState::Baking);
        thread::sleep(self.timings.bake);
        if self.checkpoint(recipe) {
            return RecipeOutcome::Disrupted;
        }
        self.pool.release(ResourceKind::Oven);
        self.held.mark_released(ResourceKind::Oven);

        RecipeOutcome::Completed
    }

    /// Grab one ingredient unit: acquire the storage area, simulate the
    /// grab, release immediately.
    fn try_grab(&mut self, area: ResourceKind, state: BakerState) -> bool {
        if !self.pool.try_acquire(area) {
            return false;
        }
        self.held.mark_acquired(area);
        self.card.set_state(state);
        thread::sleep(self.timings.grab);
        self.pool.release(area);
        self.held.mark_released(area);
        true
    }

    /// Disruption checkpoint. On trigger, every held resource goes back
    /// to the pool and the caller restarts the current recipe.
    fn checkpoint(&mut self, recipe: &Recipe) -> bool {
        if !self.injector.should_disrupt(self.card.id(), self.disruptions) {
            return false;
        }
        self.disruptions += 1;
        self.card.record_disruption();
        self.held.release_all(&self.pool);
        self.card.set_state(BakerState::Disrupted);
        info!("baker {} sent back to the start of '{}'", self.card.id(), recipe.name);
        true
    }
}
