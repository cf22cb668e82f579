//! services/api/src/web/food_categories.rs

use axum::{extract::State, http::StatusCode, Json};
use food_api_core::domain::FoodCategory;
use std::sync::Arc;
use tracing::error;

use crate::web::schemas::FoodCategorySchema;
use crate::web::state::AppState;

/// GET /food-categories - Get all food categories
///
/// Returns the stored collection in its stored order, with every stored field.
#[utoipa::path(
    get,
    path = "/food-categories",
    responses(
        (status = 200, description = "A list of food categories", body = [FoodCategorySchema]),
        (status = 500, description = "Error reading the file", body = String, content_type = "text/plain")
    )
)]
pub async fn list_food_categories_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FoodCategory>>, (StatusCode, &'static str)> {
    let categories = state.store.list_food_categories().await.map_err(|e| {
        error!("Failed to list food categories: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Error reading the file")
    })?;
    Ok(Json(categories))
}
