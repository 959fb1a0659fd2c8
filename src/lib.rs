use std::sync::Arc;

use crate::api::catalog_dto::CatalogDto;
use crate::domain::catalog::RecipeCatalog;
use crate::domain::disruption::{RandomInjector, SharedInjector};
use crate::domain::simulation::Challenge;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod render;

pub use crate::domain::simulation::{ChallengeConfig, ChallengeOutcome};

/// Runs a headless challenge: built-in or file-based catalog, random
/// disruption per the config, no status rendering.
///
/// Library entry point for embedding the simulation; the CLI wires the
/// same pieces itself so it can attach the status table.
pub fn run_challenge(config: ChallengeConfig, catalog_path: Option<&str>) -> Result<ChallengeOutcome> {
    logger::init();
    log::info!("Logger initialized. Starting challenge construction.");

    let catalog = load_catalog(catalog_path)?;
    catalog.log_summary();

    let injector = SharedInjector(Arc::new(RandomInjector::new(config.probability, config.policy)));
    let challenge = Challenge::with_parts(config, catalog, injector)?;
    Ok(challenge.run(|_, _, _| {}))
}

/// Loads the recipe catalog from a JSON file, or hands out the built-in
/// one when no path is given.
pub fn load_catalog(path: Option<&str>) -> Result<Arc<RecipeCatalog>> {
    match path {
        Some(path) => {
            let dto: CatalogDto = parse_json_file(path)?;
            log::info!("Recipe catalog parsed from '{}'.", path);
            Ok(Arc::new(RecipeCatalog::from_dto(dto)?))
        }
        None => Ok(Arc::new(RecipeCatalog::builtin().clone())),
    }
}
