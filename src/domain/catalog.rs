use lazy_static::lazy_static;
use log::{debug, info};

use crate::api::catalog_dto::{CatalogDto, RecipeDto};
use crate::domain::ingredient::{Ingredient, StorageArea};
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_str;

// Catalog shipped inside the binary; used when no file is supplied.
const DEFAULT_CATALOG_JSON: &str = include_str!("../data/recipes.json");

lazy_static! {
    static ref DEFAULT_CATALOG: RecipeCatalog = {
        let dto: CatalogDto =
            parse_json_str(DEFAULT_CATALOG_JSON).expect("embedded recipe catalog is malformed");
        RecipeCatalog::from_dto(dto).expect("embedded recipe catalog is invalid")
    };
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    fn from_dto(dto: RecipeDto) -> Result<Self> {
        if dto.ingredients.is_empty() {
            return Err(Error::CatalogError(format!("recipe '{}' has no ingredients", dto.name)));
        }
        let mut ingredients = Vec::with_capacity(dto.ingredients.len());
        for name in &dto.ingredients {
            let ingredient = Ingredient::from_name(name).ok_or_else(|| {
                Error::CatalogError(format!("recipe '{}' uses unknown ingredient '{}'", dto.name, name))
            })?;
            ingredients.push(ingredient);
        }
        Ok(Recipe { name: dto.name, ingredients })
    }

    /// How many ingredient units this recipe draws from the given
    /// storage area. Each listed ingredient is fetched one unit at a time.
    pub fn units_needed(&self, area: StorageArea) -> u32 {
        self.ingredients.iter().filter(|i| i.storage_area() == area).count() as u32
    }
}

/// The ordered, read-only sequence of recipes every baker completes.
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn from_dto(dto: CatalogDto) -> Result<Self> {
        if dto.recipes.is_empty() {
            return Err(Error::CatalogError("catalog contains no recipes".to_string()));
        }
        let recipes = dto.recipes.into_iter().map(Recipe::from_dto).collect::<Result<Vec<_>>>()?;
        Ok(RecipeCatalog { recipes })
    }

    /// The catalog baked into the binary: the five classic challenge
    /// recipes, in challenge order.
    pub fn builtin() -> &'static RecipeCatalog {
        &DEFAULT_CATALOG
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Logs the catalog contents the way the run log reads best: one
    /// info line per recipe, ingredient detail at debug.
    pub fn log_summary(&self) {
        info!("--- Recipe Catalog ---");
        info!("Total recipes: {}", self.recipes.len());
        for (i, recipe) in self.recipes.iter().enumerate() {
            info!(
                "  {}. {} (pantry: {}, fridge: {})",
                i + 1,
                recipe.name,
                recipe.units_needed(StorageArea::Pantry),
                recipe.units_needed(StorageArea::Fridge)
            );
            for ingredient in &recipe.ingredients {
                debug!("     - {}", ingredient.name());
            }
        }
        info!("----------------------");
    }
}
