//! Category listing handler

use axum::{extract::State, Json};

use crate::models::CategoriesResponse;
use crate::{AppResult, AppState};

/// Categories the loaded model can emit
pub async fn list(State(state): State<AppState>) -> AppResult<Json<CategoriesResponse>> {
    let categories = state.categorizer()?.categories().to_vec();

    Ok(Json(CategoriesResponse {
        count: categories.len(),
        categories,
    }))
}
