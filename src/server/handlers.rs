use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::PlannerError;
use crate::models::{
    GroceryItem, GrocerySummary, MealPlanSummary, MealSlot, Recipe, WeeklyPlan,
};
use crate::planner::{validate_daily_calories, WeeklyPlanSelector};
use crate::server::AppState;

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A [`PlannerError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(PlannerError);

impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PlannerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            PlannerError::InsufficientCatalog(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self.0 {
            PlannerError::InvalidArgument(message) => message,
            other => {
                if status.is_server_error() {
                    error!(error = %other, "Request failed");
                }
                other.to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    pub daily_calories: Option<f64>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub success: bool,
    pub meal_plan: WeeklyPlan,
    pub summary: MealPlanSummary,
}

pub async fn generate_meal_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MealPlanRequest>,
) -> Result<Json<MealPlanResponse>, ApiError> {
    let daily_calories = request.daily_calories.ok_or_else(|| {
        PlannerError::InvalidArgument("Daily calories must be between 1200 and 4000".to_string())
    })?;
    validate_daily_calories(daily_calories)?;
    debug!(daily_calories, postal_code = ?request.postal_code, "Generating meal plan");

    let plan = WeeklyPlanSelector::new(&state.catalog)
        .with_policy(state.policy)
        .select(daily_calories)?;
    let summary = MealPlanSummary::for_plan(&plan, daily_calories);

    Ok(Json(MealPlanResponse {
        success: true,
        meal_plan: plan,
        summary,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListRequest {
    #[serde(default)]
    pub meal_plan: Option<WeeklyPlan>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListResponse {
    pub success: bool,
    pub grocery_list: Vec<GroceryItem>,
    pub summary: GrocerySummary,
}

pub async fn generate_grocery_list(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GroceryListRequest>,
) -> Result<Json<GroceryListResponse>, ApiError> {
    let plan = request
        .meal_plan
        .filter(|plan| !plan.is_empty())
        .ok_or_else(|| PlannerError::InvalidArgument("Meal plan is required".to_string()))?;

    let cancel = state.shutdown.child_token();
    let list = state
        .consolidator
        .build_for_plan(&plan, request.postal_code.as_deref(), &cancel)
        .await;

    Ok(Json(GroceryListResponse {
        success: true,
        grocery_list: list.items,
        summary: list.summary,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RecipeQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipesResponse {
    pub recipes: Vec<Recipe>,
}

/// All recipes, or those of one meal slot when `category` is given.
pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<RecipesResponse>, ApiError> {
    let recipes = match query.category.as_deref() {
        Some(category) => {
            let slot: MealSlot = category.parse()?;
            state.catalog.slot_pool(slot).into_iter().cloned().collect()
        }
        None => state.catalog.all().to_vec(),
    };

    Ok(Json(RecipesResponse { recipes }))
}
