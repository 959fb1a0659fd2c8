use serde::{Deserialize, Serialize};

/// Wire format of a recipe catalog file.
///
/// Ingredients are referenced by name; resolution against the known
/// ingredient set happens during domain conversion, so a typo in a
/// catalog file surfaces as a `CatalogError` instead of a panic.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDto {
    pub recipes: Vec<RecipeDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDto {
    pub name: String,
    pub ingredients: Vec<String>,
}
