use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use weekly_meal_planner_rs::catalog::{builtin_catalog, load_catalog, RecipeCatalog};
use weekly_meal_planner_rs::cli::{Cli, Command};
use weekly_meal_planner_rs::config::PlannerConfig;
use weekly_meal_planner_rs::error::Result;
use weekly_meal_planner_rs::grocery::{GroceryConsolidator, UnitConversions};
use weekly_meal_planner_rs::interface::{
    display_grocery_list, display_optimization, display_similar, display_weekly_plan,
    load_plan_json, prompt_daily_calories, prompt_postal_code, resolve_ingredient_name,
    write_grocery_csv, write_plan_json,
};
use weekly_meal_planner_rs::models::{MealPlanSummary, WeeklyPlan};
use weekly_meal_planner_rs::planner::{
    optimize, validate_daily_calories, ExhaustionPolicy, IngredientVectorSpace, WeeklyPlanSelector,
};
use weekly_meal_planner_rs::server::{self, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = PlannerConfig::load(cli.config.as_deref())?;
    let catalog = open_catalog(cli.catalog.as_deref())?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan {
            calories,
            policy,
            json,
        } => cmd_plan(&catalog, &config, calories, policy, json.as_deref()),
        Command::Groceries {
            calories,
            plan,
            postal,
            csv,
            policy,
        } => {
            cmd_groceries(&catalog, &config, calories, plan, postal, csv.as_deref(), policy).await
        }
        Command::Optimize { calories, days } => cmd_optimize(&catalog, &config, calories, days),
        Command::Similar { ingredient, top } => cmd_similar(&ingredient, top),
        Command::Serve { bind } => cmd_serve(catalog, config, bind).await,
    }
}

fn open_catalog(path: Option<&Path>) -> Result<RecipeCatalog> {
    let catalog = match path {
        Some(path) => load_catalog(path)?,
        None => builtin_catalog()?,
    };
    info!(recipes = catalog.len(), "Loaded recipe catalog");
    Ok(catalog)
}

/// Calorie target from the flag, or asked for interactively.
fn resolve_calories(calories: Option<f64>) -> Result<f64> {
    match calories {
        Some(calories) => {
            validate_daily_calories(calories)?;
            Ok(calories)
        }
        None => prompt_daily_calories(),
    }
}

fn select_plan(
    catalog: &RecipeCatalog,
    config: &PlannerConfig,
    calories: f64,
    policy: Option<ExhaustionPolicy>,
) -> Result<WeeklyPlan> {
    WeeklyPlanSelector::new(catalog)
        .with_policy(policy.unwrap_or(config.planner.exhaustion_policy))
        .select(calories)
}

/// Cancelled on the first Ctrl-C.
fn ctrl_c_token() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing with static prices");
            cancel.cancel();
        }
    });
    token
}

/// Generate and display a weekly meal plan.
fn cmd_plan(
    catalog: &RecipeCatalog,
    config: &PlannerConfig,
    calories: Option<f64>,
    policy: Option<ExhaustionPolicy>,
    json: Option<&Path>,
) -> Result<()> {
    let calories = resolve_calories(calories)?;
    let plan = select_plan(catalog, config, calories, policy)?;

    display_weekly_plan(&plan, &MealPlanSummary::for_plan(&plan, calories));

    if let Some(path) = json {
        write_plan_json(&plan, path)?;
        println!("Plan saved to {}", path.display());
    }

    Ok(())
}

/// Build a priced grocery list for a saved plan or a freshly generated one.
async fn cmd_groceries(
    catalog: &RecipeCatalog,
    config: &PlannerConfig,
    calories: Option<f64>,
    plan_path: Option<PathBuf>,
    postal: Option<String>,
    csv: Option<&Path>,
    policy: Option<ExhaustionPolicy>,
) -> Result<()> {
    let plan = match plan_path {
        Some(path) => load_plan_json(&path)?,
        None => {
            let calories = resolve_calories(calories)?;
            select_plan(catalog, config, calories, policy)?
        }
    };

    // Only worth asking when live prices are in play.
    let postal = match postal {
        Some(code) => Some(code),
        None if config.pricing.endpoint.is_some() => prompt_postal_code()?,
        None => None,
    };

    let consolidator = GroceryConsolidator::from_config(&config.pricing)?;
    let cancel = ctrl_c_token();
    let list = consolidator
        .build_for_plan(&plan, postal.as_deref(), &cancel)
        .await;

    display_grocery_list(&list);

    if let Some(path) = csv {
        write_grocery_csv(&list, path)?;
        println!("Grocery list saved to {}", path.display());
    }

    Ok(())
}

/// Report an overlap-optimized selection.
fn cmd_optimize(
    catalog: &RecipeCatalog,
    config: &PlannerConfig,
    calories: Option<f64>,
    days: Option<usize>,
) -> Result<()> {
    let calories = resolve_calories(calories)?;
    let days = days.unwrap_or(config.planner.days);

    let report = optimize(catalog.all(), calories, days, &UnitConversions::default())?;
    display_optimization(&report);
    Ok(())
}

/// Show the ingredients closest to `ingredient`.
fn cmd_similar(ingredient: &str, top: usize) -> Result<()> {
    let space = IngredientVectorSpace::default();

    let Some(name) = resolve_ingredient_name(&space.names(), ingredient)? else {
        return Ok(());
    };

    let ranked = space.most_similar(&name, top)?;
    display_similar(&name, &ranked);
    Ok(())
}

/// Run the HTTP API until Ctrl-C.
async fn cmd_serve(catalog: RecipeCatalog, config: PlannerConfig, bind: Option<String>) -> Result<()> {
    let consolidator = GroceryConsolidator::from_config(&config.pricing)?;
    let state = Arc::new(
        AppState::new(catalog, consolidator).with_policy(config.planner.exhaustion_policy),
    );

    let shutdown = state.shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
            shutdown.cancel();
        }
    });

    let bind = bind.unwrap_or(config.server.bind);
    server::serve(&bind, state).await
}
