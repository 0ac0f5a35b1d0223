pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod grocery;
pub mod interface;
pub mod models;
pub mod planner;
pub mod server;

pub use catalog::RecipeCatalog;
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use grocery::GroceryConsolidator;
pub use models::{GroceryList, Recipe, WeeklyPlan};
pub use planner::{ExhaustionPolicy, WeeklyPlanSelector};
