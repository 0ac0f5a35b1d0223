mod grocery;
mod ingredient;
mod plan;
mod recipe;

pub use grocery::{GroceryItem, GroceryList, GrocerySummary};
pub use ingredient::Ingredient;
pub use plan::{DayPlan, MealPlanSummary, MealSlot, WeeklyPlan, WEEKDAYS};
pub use recipe::Recipe;
