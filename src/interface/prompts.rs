use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{PlannerError, Result};
use crate::planner::constants::{FUZZY_MATCH_THRESHOLD, MAX_DAILY_CALORIES, MIN_DAILY_CALORIES};
use crate::planner::validate_daily_calories;

/// Prompt for the daily calorie target.
pub fn prompt_daily_calories() -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(format!(
            "Daily calorie target ({}-{})",
            MIN_DAILY_CALORIES, MAX_DAILY_CALORIES
        ))
        .default("2000".to_string())
        .interact_text()?;

    let calories: f64 = input
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidArgument("Invalid number".to_string()))?;

    validate_daily_calories(calories)?;
    Ok(calories)
}

/// Prompt for a postal code. Empty input means "use the default".
pub fn prompt_postal_code() -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("Postal code for prices (Enter for default)")
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    Ok((!input.is_empty()).then(|| input.to_uppercase()))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Candidates scoring above the fuzzy threshold against `input`, best first.
pub fn fuzzy_matches<'a>(candidates: &[&'a str], input: &str) -> Vec<(&'a str, f64)> {
    let input = input.trim().to_lowercase();
    let mut matches: Vec<(&str, f64)> = candidates
        .iter()
        .map(|name| (*name, jaro_winkler(&name.to_lowercase(), &input)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    matches.sort_by(|a, b| b.1.total_cmp(&a.1));
    matches
}

/// Resolve a typed ingredient name against `known`.
///
/// Exact (case-insensitive) matches return straight away; otherwise the user
/// confirms a single fuzzy match or picks among several. `None` when nothing
/// matched or the user declined.
pub fn resolve_ingredient_name(known: &[&str], input: &str) -> Result<Option<String>> {
    let wanted = input.trim().to_lowercase();
    if let Some(name) = known.iter().find(|k| k.to_lowercase() == wanted) {
        return Ok(Some(name.to_string()));
    }

    let candidates = fuzzy_matches(known, input);
    match candidates.as_slice() {
        [] => {
            println!("No matching ingredient found for '{}'", input.trim());
            Ok(None)
        }
        [(name, _)] => {
            let confirm = prompt_yes_no(&format!("Did you mean '{}'?", name), true)?;
            Ok(confirm.then(|| name.to_string()))
        }
        _ => {
            let options: Vec<String> = candidates
                .iter()
                .take(5)
                .map(|(name, _)| name.to_string())
                .collect();

            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            Ok(options.get(selection).cloned())
        }
    }
}
