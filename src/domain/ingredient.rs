use serde::{Deserialize, Serialize};

/// Where an ingredient is stored in the kitchen.
///
/// Each ingredient lives in exactly one storage area, and each storage
/// area maps to one capacity-limited kitchen resource a baker must hold
/// while grabbing from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    Pantry,
    Fridge,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ingredient {
    Flour,
    Sugar,
    Yeast,
    BakingSoda,
    Salt,
    Cinnamon,
    Egg,
    Milk,
    Butter,
}

impl Ingredient {
    pub fn storage_area(&self) -> StorageArea {
        match self {
            Ingredient::Flour
            | Ingredient::Sugar
            | Ingredient::Yeast
            | Ingredient::BakingSoda
            | Ingredient::Salt
            | Ingredient::Cinnamon => StorageArea::Pantry,
            Ingredient::Egg | Ingredient::Milk | Ingredient::Butter => StorageArea::Fridge,
        }
    }

    /// Resolves an ingredient name from a catalog file.
    ///
    /// Accepts the canonical CamelCase spelling as well as the spaced
    /// form ("Baking Soda") that shows up in hand-written catalogs.
    pub fn from_name(name: &str) -> Option<Ingredient> {
        match name {
            "Flour" => Some(Ingredient::Flour),
            "Sugar" => Some(Ingredient::Sugar),
            "Yeast" => Some(Ingredient::Yeast),
            "BakingSoda" | "Baking Soda" => Some(Ingredient::BakingSoda),
            "Salt" => Some(Ingredient::Salt),
            "Cinnamon" => Some(Ingredient::Cinnamon),
            "Egg" => Some(Ingredient::Egg),
            "Milk" => Some(Ingredient::Milk),
            "Butter" => Some(Ingredient::Butter),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ingredient::Flour => "Flour",
            Ingredient::Sugar => "Sugar",
            Ingredient::Yeast => "Yeast",
            Ingredient::BakingSoda => "Baking Soda",
            Ingredient::Salt => "Salt",
            Ingredient::Cinnamon => "Cinnamon",
            Ingredient::Egg => "Egg",
            Ingredient::Milk => "Milk",
            Ingredient::Butter => "Butter",
        }
    }
}
