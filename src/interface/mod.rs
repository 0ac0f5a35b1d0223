pub mod export;
pub mod prompts;
pub mod render;

pub use export::{load_plan_json, write_grocery_csv, write_plan_json};
pub use prompts::{
    fuzzy_matches, prompt_daily_calories, prompt_postal_code, prompt_yes_no,
    resolve_ingredient_name,
};
pub use render::{display_grocery_list, display_optimization, display_similar, display_weekly_plan};
