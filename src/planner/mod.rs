pub mod constants;
pub mod overlap;
pub mod vectors;
pub mod weekly;

pub use constants::*;
pub use overlap::{
    calorie_fit_score, optimize, overlap_bonus, select_overlapping, OptimizationReport,
};
pub use vectors::{cosine_similarity, IngredientVectorSpace, VECTOR_DIMENSIONS};
pub use weekly::{closest_recipe, validate_daily_calories, ExhaustionPolicy, WeeklyPlanSelector};
