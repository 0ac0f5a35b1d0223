use std::collections::HashMap;

use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::grocery::{bulk_savings, consolidate_unit_aware, round_quantity, UnitConversions};
use crate::models::{Ingredient, Recipe};
use crate::planner::constants::*;

/// Candidate recipe with its fixed calorie-fit score.
#[derive(Debug)]
struct Candidate<'a> {
    recipe: &'a Recipe,
    base_score: f64,
    ingredients: Vec<String>,
}

/// How closely `calories` fits a per-meal target.
///
/// 1.0 is a perfect match; poor fits go negative and still order correctly.
pub fn calorie_fit_score(calories: f64, per_meal: f64) -> f64 {
    1.0 - (calories - per_meal).abs() / per_meal
}

/// Bonus for reusing ingredients already on the list.
///
/// Every ingredient name contributes its current usage count times
/// `OVERLAP_BONUS_PER_USE`.
pub fn overlap_bonus(ingredients: &[String], usage: &HashMap<String, u32>) -> f64 {
    ingredients
        .iter()
        .map(|name| usage.get(name).copied().unwrap_or(0) as f64 * OVERLAP_BONUS_PER_USE)
        .sum()
}

/// Pick up to `days * 3` recipes that favour ingredient reuse.
///
/// Works over the whole candidate pool rather than per meal slot, with a flat
/// per-meal target of a third of `daily_calories`. Each round scores every
/// remaining candidate as calorie fit plus overlap bonus, takes the best (the
/// earliest on ties) and removes it from the pool, so no recipe is picked
/// twice. A pool smaller than the quota yields a shorter selection.
pub fn select_overlapping<'a, I>(
    candidates: I,
    daily_calories: f64,
    days: usize,
) -> Result<Vec<&'a Recipe>>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    if !daily_calories.is_finite() || daily_calories <= 0.0 {
        return Err(PlannerError::InvalidArgument(
            "Daily calories must be a positive number".to_string(),
        ));
    }

    let total_meals = days.saturating_mul(MEALS_PER_DAY);
    let per_meal = daily_calories / MEALS_PER_DAY as f64;

    let mut remaining: Vec<Candidate<'a>> = candidates
        .into_iter()
        .map(|recipe| Candidate {
            recipe,
            base_score: calorie_fit_score(recipe.calories, per_meal),
            ingredients: recipe.ingredient_keys(),
        })
        .collect();

    let mut selected = Vec::with_capacity(total_meals.min(remaining.len()));
    let mut usage: HashMap<String, u32> = HashMap::new();

    while selected.len() < total_meals && !remaining.is_empty() {
        let mut best_idx = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (idx, candidate) in remaining.iter().enumerate() {
            let score = candidate.base_score + overlap_bonus(&candidate.ingredients, &usage);
            if score > best_score {
                best_score = score;
                best_idx = idx;
            }
        }

        let chosen = remaining.remove(best_idx);
        debug!(recipe = %chosen.recipe.id, score = best_score, "Selected overlapping recipe");

        for name in chosen.ingredients {
            *usage.entry(name).or_insert(0) += 1;
        }
        selected.push(chosen.recipe);
    }

    Ok(selected)
}

/// Result of an overlap-optimized selection.
#[derive(Debug, Clone)]
pub struct OptimizationReport<'a> {
    pub recipes: Vec<&'a Recipe>,
    /// Unit-aware consolidated ingredients, quantities rounded up to a tenth.
    pub ingredients: Vec<Ingredient>,
    pub original_ingredient_count: usize,
    pub bulk_savings: f64,
}

impl OptimizationReport<'_> {
    pub fn unique_ingredient_count(&self) -> usize {
        self.ingredients.len()
    }
}

/// Run [`select_overlapping`] and consolidate the picks with unit conversion.
pub fn optimize<'a, I>(
    candidates: I,
    daily_calories: f64,
    days: usize,
    conversions: &UnitConversions,
) -> Result<OptimizationReport<'a>>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let recipes = select_overlapping(candidates, daily_calories, days)?;

    let occurrences: Vec<&Ingredient> = recipes
        .iter()
        .flat_map(|recipe| recipe.ingredients.iter())
        .collect();
    let ingredients: Vec<Ingredient> = consolidate_unit_aware(occurrences.iter().copied(), conversions)
        .into_iter()
        .map(|ingredient| {
            let quantity = round_quantity(ingredient.quantity);
            ingredient.with_quantity(quantity)
        })
        .collect();

    Ok(OptimizationReport {
        bulk_savings: bulk_savings(occurrences.len(), ingredients.len()),
        original_ingredient_count: occurrences.len(),
        recipes,
        ingredients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;

    fn recipe(id: &str, calories: f64, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            calories,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            prep_time: 0,
            cook_time: 0,
            ingredients: ingredients
                .iter()
                .map(|n| Ingredient::new(*n, "misc", 1.0, "whole"))
                .collect(),
            instructions: vec![],
        }
    }

    #[test]
    fn test_calorie_fit_score() {
        assert_eq!(calorie_fit_score(600.0, 600.0), 1.0);
        assert!((calorie_fit_score(450.0, 600.0) - 0.75).abs() < 1e-9);
        assert!(calorie_fit_score(1500.0, 600.0) < 0.0);
    }

    #[test]
    fn test_overlap_bonus_per_use() {
        let ingredients = vec!["rice".to_string(), "garlic".to_string()];
        let mut usage = HashMap::new();
        assert_eq!(overlap_bonus(&ingredients, &usage), 0.0);

        usage.insert("rice".to_string(), 1);
        assert!(overlap_bonus(&ingredients, &usage) >= OVERLAP_BONUS_PER_USE - 1e-12);

        usage.insert("garlic".to_string(), 2);
        assert!((overlap_bonus(&ingredients, &usage) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_prefers_reuse_over_slightly_better_fit() {
        let recipes = vec![
            recipe("anchor", 600.0, &["rice", "garlic"]),
            recipe("closer", 590.0, &["quinoa"]),
            recipe("shared", 560.0, &["rice"]),
        ];
        // Target per meal is 600: "closer" fits better than "shared" by 0.05,
        // but "shared" reuses rice for +0.2.
        let picked = select_overlapping(&recipes, 1800.0, 1).unwrap();
        let ids: Vec<&str> = picked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["anchor", "shared", "closer"]);
    }

    #[test]
    fn test_short_pool_yields_short_selection() {
        let recipes = vec![recipe("a", 600.0, &["x"]), recipe("b", 500.0, &["y"])];
        let picked = select_overlapping(&recipes, 1800.0, 7).unwrap();
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_huge_day_count_takes_whole_pool() {
        let recipes: Vec<Recipe> = (0..4)
            .map(|i| recipe(&format!("r{}", i), 600.0, &["egg"]))
            .collect();
        let picked = select_overlapping(&recipes, 1800.0, usize::MAX).unwrap();
        assert_eq!(picked.len(), recipes.len());
    }

    #[test]
    fn test_no_recipe_picked_twice() {
        let recipes: Vec<Recipe> = (0..10)
            .map(|i| recipe(&format!("r{}", i), 500.0 + i as f64 * 20.0, &["egg"]))
            .collect();
        let picked = select_overlapping(&recipes, 1800.0, 2).unwrap();
        assert_eq!(picked.len(), 6);

        let mut ids: Vec<&str> = picked.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_ties_go_to_pool_order() {
        let recipes = vec![recipe("first", 550.0, &[]), recipe("second", 650.0, &[])];
        let picked = select_overlapping(&recipes, 1800.0, 1).unwrap();
        assert_eq!(picked[0].id, "first");
    }

    #[test]
    fn test_optimize_reports_bulk_savings() {
        let recipes = vec![
            recipe("a", 600.0, &["rice", "garlic"]),
            recipe("b", 600.0, &["rice", "onion"]),
            recipe("c", 600.0, &["garlic", "onion"]),
        ];
        let report = optimize(&recipes, 1800.0, 1, &UnitConversions::default()).unwrap();
        assert_eq!(report.recipes.len(), 3);
        assert_eq!(report.original_ingredient_count, 6);
        assert_eq!(report.unique_ingredient_count(), 3);
        assert!((report.bulk_savings - 0.45).abs() < 1e-9);

        let rice = report.ingredients.iter().find(|i| i.name == "rice").unwrap();
        assert_eq!(rice.quantity, 2.0);
    }

    #[test]
    fn test_rejects_non_positive_target() {
        let recipes = vec![recipe("a", 600.0, &[])];
        assert!(select_overlapping(&recipes, 0.0, 1).is_err());
    }
}
