// src/handlers/dashboard.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{config::AppState, models::dashboard::Activity};

// GET /api/dashboard/activity
#[utoipa::path(
    get,
    path = "/api/dashboard/activity",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Últimos eventos (máx. 50)", body = Vec<Activity>)
    )
)]
pub async fn recent_activity(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.dashboard_service.recent_activity())
}
