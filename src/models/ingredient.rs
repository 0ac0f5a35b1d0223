use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe.
///
/// Consolidation treats two ingredients as the same item when their names
/// match case-insensitively; quantity and unit are carried as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,

    pub category: String,

    pub quantity: f64,

    pub unit: String,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            quantity,
            unit: unit.into(),
        }
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Copy of this ingredient carrying a different quantity.
    pub fn with_quantity(&self, quantity: f64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}
