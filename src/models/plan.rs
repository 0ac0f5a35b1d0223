use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::Recipe;

/// Day labels of a weekly plan, in output order.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One of the three meals of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            other => Err(PlannerError::InvalidArgument(format!(
                "Unknown meal slot '{}'",
                other
            ))),
        }
    }
}

/// Wire shape of a day; the total is recomputed on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayPlanRecord {
    day: String,
    breakfast: Recipe,
    lunch: Recipe,
    dinner: Recipe,
}

impl From<DayPlanRecord> for DayPlan {
    fn from(record: DayPlanRecord) -> Self {
        DayPlan::new(record.day, record.breakfast, record.lunch, record.dinner)
    }
}

/// Three meals for one day. `total_calories` always equals the sum of the
/// three recipes' calories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "DayPlanRecord")]
pub struct DayPlan {
    day: String,
    breakfast: Recipe,
    lunch: Recipe,
    dinner: Recipe,
    total_calories: f64,
}

impl DayPlan {
    pub fn new(day: impl Into<String>, breakfast: Recipe, lunch: Recipe, dinner: Recipe) -> Self {
        let total_calories = breakfast.calories + lunch.calories + dinner.calories;
        Self {
            day: day.into(),
            breakfast,
            lunch,
            dinner,
            total_calories,
        }
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn breakfast(&self) -> &Recipe {
        &self.breakfast
    }

    pub fn lunch(&self) -> &Recipe {
        &self.lunch
    }

    pub fn dinner(&self) -> &Recipe {
        &self.dinner
    }

    pub fn total_calories(&self) -> f64 {
        self.total_calories
    }

    pub fn meal(&self, slot: MealSlot) -> &Recipe {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Breakfast, lunch and dinner in slot order.
    pub fn meals(&self) -> [&Recipe; 3] {
        [&self.breakfast, &self.lunch, &self.dinner]
    }
}

/// Ordered sequence of day plans, serialized as a bare array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyPlan {
    days: Vec<DayPlan>,
}

impl WeeklyPlan {
    pub fn new(days: Vec<DayPlan>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Every scheduled recipe, day by day in slot order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.days.iter().flat_map(|d| d.meals())
    }

    /// Sum of day totals divided by the length of a week.
    pub fn average_daily_calories(&self) -> f64 {
        let total: f64 = self.days.iter().map(DayPlan::total_calories).sum();
        total / WEEKDAYS.len() as f64
    }
}

/// Headline numbers returned alongside a generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanSummary {
    pub target_calories: f64,
    pub avg_daily_calories: f64,
}

impl MealPlanSummary {
    pub fn for_plan(plan: &WeeklyPlan, target_calories: f64) -> Self {
        Self {
            target_calories,
            avg_daily_calories: plan.average_daily_calories(),
        }
    }
}
