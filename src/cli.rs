use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::planner::ExhaustionPolicy;

/// Weekly meal planner: matches recipes to a daily calorie target and prices a
/// consolidated grocery list.
#[derive(Parser, Debug)]
#[command(name = "weekly_meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (defaults to ./planner.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Recipe catalog JSON replacing the built-in one.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a seven-day meal plan.
    Plan {
        /// Daily calorie target (1200-4000). Prompted for when omitted.
        #[arg(short, long)]
        calories: Option<f64>,

        /// What to do when a meal slot runs out of unused recipes.
        #[arg(long, value_enum)]
        policy: Option<ExhaustionPolicy>,

        /// Also write the plan as JSON to this path.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Build a priced grocery list from a new or saved meal plan.
    Groceries {
        /// Daily calorie target used when no saved plan is given.
        #[arg(short, long, conflicts_with = "plan")]
        calories: Option<f64>,

        /// Meal plan JSON written by `plan --json`.
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Postal code for live prices.
        #[arg(long)]
        postal: Option<String>,

        /// Also write the list as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long, value_enum)]
        policy: Option<ExhaustionPolicy>,
    },

    /// Pick recipes that share ingredients and report bulk savings.
    Optimize {
        #[arg(short, long)]
        calories: Option<f64>,

        /// Days to plan for (defaults to the configured value).
        #[arg(short, long)]
        days: Option<usize>,
    },

    /// List ingredients similar to the given one.
    Similar {
        ingredient: String,

        /// How many results to show.
        #[arg(short, long, default_value_t = 5)]
        top: usize,
    },

    /// Run the HTTP API.
    Serve {
        /// Address to bind (overrides the config file).
        #[arg(long)]
        bind: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            calories: None,
            policy: None,
            json: None,
        }
    }
}
