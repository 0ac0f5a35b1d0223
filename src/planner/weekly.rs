use std::collections::HashSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::RecipeCatalog;
use crate::error::{PlannerError, Result};
use crate::models::{DayPlan, MealSlot, Recipe, WeeklyPlan, WEEKDAYS};
use crate::planner::constants::*;

/// What a slot does once every recipe in its pool has been used this week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExhaustionPolicy {
    /// Clear the slot's used set and pick that slot again for the same day.
    #[default]
    ResetAndRetryDay,

    /// Keep the used set and fill the slot from the whole pool, repeats allowed.
    AlwaysFillWithRepeatsAllowed,
}

/// Reject daily targets outside the supported range.
pub fn validate_daily_calories(daily_calories: f64) -> Result<()> {
    if !daily_calories.is_finite()
        || !(MIN_DAILY_CALORIES..=MAX_DAILY_CALORIES).contains(&daily_calories)
    {
        return Err(PlannerError::InvalidArgument(format!(
            "Daily calories must be between {} and {}",
            MIN_DAILY_CALORIES, MAX_DAILY_CALORIES
        )));
    }
    Ok(())
}

/// Recipe closest to `target` that is not in `used`.
///
/// Ties go to the earliest recipe in `pool`.
pub fn closest_recipe<'a>(
    pool: &[&'a Recipe],
    target: f64,
    used: &HashSet<String>,
) -> Option<&'a Recipe> {
    pool.iter()
        .copied()
        .filter(|r| !used.contains(&r.id))
        .min_by(|a, b| {
            a.calorie_distance(target)
                .total_cmp(&b.calorie_distance(target))
        })
}

/// Per-slot selection state that lives for the whole week.
struct SlotState<'a> {
    slot: MealSlot,
    pool: Vec<&'a Recipe>,
    target: f64,
    used: HashSet<String>,
}

/// Greedy weekly planner: one recipe per slot per day, each as close as
/// possible to its share of the daily target, without repeating a recipe in
/// the same slot until the slot's pool runs out.
pub struct WeeklyPlanSelector<'a> {
    catalog: &'a RecipeCatalog,
    policy: ExhaustionPolicy,
}

impl<'a> WeeklyPlanSelector<'a> {
    pub fn new(catalog: &'a RecipeCatalog) -> Self {
        Self {
            catalog,
            policy: ExhaustionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build a Monday..Sunday plan for `daily_calories`.
    ///
    /// Range validation belongs to the caller; an empty slot pool is an
    /// `InsufficientCatalog` error.
    pub fn select(&self, daily_calories: f64) -> Result<WeeklyPlan> {
        let mut slots = Vec::with_capacity(MEALS_PER_DAY);
        for slot in MealSlot::ALL {
            let pool = self.catalog.slot_pool(slot);
            if pool.is_empty() {
                return Err(PlannerError::InsufficientCatalog(slot.to_string()));
            }
            slots.push(SlotState {
                slot,
                pool,
                target: slot_target(slot, daily_calories),
                used: HashSet::new(),
            });
        }

        let mut days = Vec::with_capacity(WEEKDAYS.len());
        for day in WEEKDAYS {
            let breakfast = self.pick(day, &mut slots[0])?;
            let lunch = self.pick(day, &mut slots[1])?;
            let dinner = self.pick(day, &mut slots[2])?;

            let plan = DayPlan::new(day, breakfast.clone(), lunch.clone(), dinner.clone());
            debug!(day, total = plan.total_calories(), "Planned day");
            days.push(plan);
        }

        Ok(WeeklyPlan::new(days))
    }

    fn pick(&self, day: &str, state: &mut SlotState<'a>) -> Result<&'a Recipe> {
        if let Some(recipe) = closest_recipe(&state.pool, state.target, &state.used) {
            state.used.insert(recipe.id.clone());
            return Ok(recipe);
        }

        let slot = state.slot;
        let exhausted = move || PlannerError::InsufficientCatalog(slot.to_string());

        match self.policy {
            ExhaustionPolicy::ResetAndRetryDay => {
                info!(slot = %slot, day, "Ran out of unique recipes, resetting slot");
                state.used.clear();
                let recipe = closest_recipe(&state.pool, state.target, &state.used)
                    .ok_or_else(exhausted)?;
                state.used.insert(recipe.id.clone());
                Ok(recipe)
            }
            ExhaustionPolicy::AlwaysFillWithRepeatsAllowed => {
                info!(slot = %slot, day, "Ran out of unique recipes, allowing a repeat");
                closest_recipe(&state.pool, state.target, &HashSet::new()).ok_or_else(exhausted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn recipe(id: &str, calories: f64) -> Recipe {
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
            ingredients: vec![],
            instructions: vec![],
        }
    }

    /// Two breakfasts, plenty of lunches and dinners.
    fn small_catalog() -> RecipeCatalog {
        let mut recipes = vec![recipe("toast", 500.0), recipe("porridge", 450.0)];
        let mut lunches = Vec::new();
        let mut dinners = Vec::new();
        for i in 0..7 {
            let lunch = format!("lunch-{}", i);
            let dinner = format!("dinner-{}", i);
            recipes.push(recipe(&lunch, 700.0 + i as f64 * 10.0));
            recipes.push(recipe(&dinner, 800.0 + i as f64 * 10.0));
            lunches.push(lunch);
            dinners.push(dinner);
        }

        let mut categories = BTreeMap::new();
        categories.insert(
            "breakfast".to_string(),
            vec!["toast".to_string(), "porridge".to_string()],
        );
        categories.insert("lunch".to_string(), lunches);
        categories.insert("dinner".to_string(), dinners);
        RecipeCatalog::new(recipes, categories)
    }

    fn breakfast_ids(plan: &WeeklyPlan) -> Vec<String> {
        plan.days().iter().map(|d| d.breakfast().id.clone()).collect()
    }

    #[test]
    fn test_validate_daily_calories() {
        assert!(validate_daily_calories(1200.0).is_ok());
        assert!(validate_daily_calories(4000.0).is_ok());
        assert!(validate_daily_calories(1199.0).is_err());
        assert!(validate_daily_calories(4000.5).is_err());
        assert!(validate_daily_calories(f64::NAN).is_err());
    }

    #[test]
    fn test_closest_recipe_ties_go_to_first() {
        let a = recipe("a", 450.0);
        let b = recipe("b", 550.0);
        let pool = vec![&a, &b];
        let picked = closest_recipe(&pool, 500.0, &HashSet::new()).unwrap();
        assert_eq!(picked.id, "a");

        let pool = vec![&b, &a];
        let picked = closest_recipe(&pool, 500.0, &HashSet::new()).unwrap();
        assert_eq!(picked.id, "b");
    }

    #[test]
    fn test_closest_recipe_skips_used() {
        let a = recipe("a", 500.0);
        let b = recipe("b", 900.0);
        let pool = vec![&a, &b];
        let used: HashSet<String> = ["a".to_string()].into_iter().collect();
        assert_eq!(closest_recipe(&pool, 500.0, &used).unwrap().id, "b");
    }

    #[test]
    fn test_reset_and_retry_cycles_pool() {
        let catalog = small_catalog();
        let plan = WeeklyPlanSelector::new(&catalog).select(2000.0).unwrap();

        assert_eq!(plan.len(), 7);
        assert_eq!(
            breakfast_ids(&plan),
            vec!["toast", "porridge", "toast", "porridge", "toast", "porridge", "toast"]
        );
    }

    #[test]
    fn test_always_fill_repeats_best_match() {
        let catalog = small_catalog();
        let plan = WeeklyPlanSelector::new(&catalog)
            .with_policy(ExhaustionPolicy::AlwaysFillWithRepeatsAllowed)
            .select(2000.0)
            .unwrap();

        assert_eq!(
            breakfast_ids(&plan),
            vec!["toast", "porridge", "toast", "toast", "toast", "toast", "toast"]
        );
    }

    #[test]
    fn test_lunch_and_dinner_never_repeat_with_seven_options() {
        let catalog = small_catalog();
        let plan = WeeklyPlanSelector::new(&catalog).select(2000.0).unwrap();

        let lunches: HashSet<&str> = plan.days().iter().map(|d| d.lunch().id.as_str()).collect();
        let dinners: HashSet<&str> = plan.days().iter().map(|d| d.dinner().id.as_str()).collect();
        assert_eq!(lunches.len(), 7);
        assert_eq!(dinners.len(), 7);
    }

    #[test]
    fn test_empty_pool_is_insufficient_catalog() {
        let mut categories = BTreeMap::new();
        categories.insert("breakfast".to_string(), vec!["toast".to_string()]);
        categories.insert("lunch".to_string(), vec!["toast".to_string()]);
        let catalog = RecipeCatalog::new(vec![recipe("toast", 500.0)], categories);

        let err = WeeklyPlanSelector::new(&catalog).select(2000.0).unwrap_err();
        assert!(matches!(err, PlannerError::InsufficientCatalog(ref slot) if slot == "dinner"));
    }
}
