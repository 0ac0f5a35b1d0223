use crate::models::MealSlot;

/// Accepted daily calorie targets, inclusive.
pub const MIN_DAILY_CALORIES: f64 = 1200.0;
pub const MAX_DAILY_CALORIES: f64 = 4000.0;

/// Share of the daily target assigned to each slot.
pub const BREAKFAST_SHARE: f64 = 0.25;
pub const LUNCH_SHARE: f64 = 0.35;
pub const DINNER_SHARE: f64 = 0.40;

pub const MEALS_PER_DAY: usize = 3;

/// Days filled by the overlap optimizer unless told otherwise.
pub const DEFAULT_PLAN_DAYS: usize = 7;

/// Score added per prior use of each ingredient a candidate shares.
pub const OVERLAP_BONUS_PER_USE: f64 = 0.2;

/// Minimum Jaro-Winkler score for a fuzzy ingredient-name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Fraction of the daily target assigned to `slot`.
pub fn slot_share(slot: MealSlot) -> f64 {
    match slot {
        MealSlot::Breakfast => BREAKFAST_SHARE,
        MealSlot::Lunch => LUNCH_SHARE,
        MealSlot::Dinner => DINNER_SHARE,
    }
}

/// Calorie target for one slot of a day.
pub fn slot_target(slot: MealSlot, daily_calories: f64) -> f64 {
    daily_calories * slot_share(slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_cover_whole_day() {
        let total: f64 = MealSlot::ALL.iter().map(|s| slot_share(*s)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_slot_targets() {
        assert!((slot_target(MealSlot::Breakfast, 2000.0) - 500.0).abs() < 1e-9);
        assert!((slot_target(MealSlot::Lunch, 2000.0) - 700.0).abs() < 1e-9);
        assert!((slot_target(MealSlot::Dinner, 2000.0) - 800.0).abs() < 1e-9);
    }
}
