use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use roomstay_core::Reservation;
use uuid::Uuid;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/reservations/{id}/approve", post(approve))
        .route("/v1/admin/reservations/{id}/reject", post(reject))
}

async fn approve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, AppError> {
    let now = state.clock.now();
    Ok(Json(state.lifecycle.approve(id, now).await?))
}

async fn reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, AppError> {
    let now = state.clock.now();
    Ok(Json(state.lifecycle.reject(id, now).await?))
}
