use serde::{Deserialize, Serialize};

use crate::models::Ingredient;

/// A catalog recipe with its macro breakdown and ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub calories: f64,

    #[serde(default)]
    pub protein: f64,

    #[serde(default)]
    pub carbs: f64,

    #[serde(default)]
    pub fat: f64,

    /// Minutes of hands-on preparation.
    #[serde(default)]
    pub prep_time: u32,

    /// Minutes of cooking.
    #[serde(default)]
    pub cook_time: u32,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Absolute calorie distance from a target.
    #[inline]
    pub fn calorie_distance(&self, target: f64) -> f64 {
        (self.calories - target).abs()
    }

    pub fn total_time(&self) -> u32 {
        self.prep_time + self.cook_time
    }

    /// Lowercase ingredient names in recipe order, duplicates kept.
    pub fn ingredient_keys(&self) -> Vec<String> {
        self.ingredients.iter().map(Ingredient::key).collect()
    }
}
