use crate::models::{GroceryList, MealPlanSummary, WeeklyPlan};
use crate::planner::OptimizationReport;

/// Display a weekly plan, one block per day.
pub fn display_weekly_plan(plan: &WeeklyPlan, summary: &MealPlanSummary) {
    if plan.is_empty() {
        println!("No meal plan generated.");
        return;
    }

    println!();
    println!("=== Weekly Meal Plan ===");
    println!();

    let max_name_len = plan
        .recipes()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(10);

    for day in plan.days() {
        println!("{} ({:.0} cal)", day.day(), day.total_calories());
        for (label, recipe) in ["Breakfast", "Lunch", "Dinner"].iter().zip(day.meals()) {
            println!(
                "  {:<9}  {:<width$} - {:>4.0} cal | P:{:.0} C:{:.0} F:{:.0} | {} min",
                label,
                recipe.name,
                recipe.calories,
                recipe.protein,
                recipe.carbs,
                recipe.fat,
                recipe.total_time(),
                width = max_name_len
            );
        }
        println!();
    }

    println!("--- Summary ---");
    println!("Target calories: {:.0}", summary.target_calories);
    println!("Average daily calories: {:.0}", summary.avg_daily_calories);
    println!();
}

/// Display a grocery list grouped under category headings.
pub fn display_grocery_list(list: &GroceryList) {
    if list.items.is_empty() {
        println!("Grocery list is empty.");
        return;
    }

    println!();
    println!("=== Grocery List ===");

    let max_name_len = list.items.iter().map(|i| i.name.len()).max().unwrap_or(10);
    let mut current_category: Option<&str> = None;

    for item in &list.items {
        if current_category != Some(item.category.as_str()) {
            println!();
            println!("[{}]", item.category);
            current_category = Some(&item.category);
        }
        println!(
            "  {:<width$}  {:>6} {:<8} ${:>6.2}",
            item.name,
            item.quantity,
            item.unit,
            item.price,
            width = max_name_len
        );
    }

    let summary = &list.summary;
    println!();
    println!("--- Summary ---");
    println!("Total items: {}", summary.total_items);
    println!("Total cost: ${:.2}", summary.total_cost);
    println!(
        "Consolidated: {} ingredients (est. savings ${:.2})",
        summary.ingredients_consolidated, summary.estimated_savings
    );
    println!();
}

/// Display an overlap-optimized selection and its consolidated ingredients.
pub fn display_optimization(report: &OptimizationReport<'_>) {
    println!();
    println!("=== Overlap-Optimized Selection ({} recipes) ===", report.recipes.len());
    println!();

    for (i, recipe) in report.recipes.iter().enumerate() {
        println!("{:>3}. {} - {:.0} cal", i + 1, recipe.name, recipe.calories);
    }

    println!();
    println!("--- Ingredients ---");
    for ingredient in &report.ingredients {
        println!("  {} {} {}", ingredient.quantity, ingredient.unit, ingredient.name);
    }

    println!();
    println!(
        "Ingredient lines: {} -> {}",
        report.original_ingredient_count,
        report.unique_ingredient_count()
    );
    println!("Bulk savings estimate: {:.2}", report.bulk_savings);
    println!();
}

/// Display ingredients ranked by similarity.
pub fn display_similar(ingredient: &str, ranked: &[(String, f64)]) {
    if ranked.is_empty() {
        println!("No comparable ingredients for '{}'.", ingredient);
        return;
    }

    println!();
    println!("=== Similar to {} ===", ingredient);
    for (name, score) in ranked {
        println!("  {:<20} {:.3}", name, score);
    }
    println!();
}
