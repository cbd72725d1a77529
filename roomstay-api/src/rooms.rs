use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use roomstay_booking::availability;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct BlockedDatesResponse {
    pub room_id: Uuid,
    pub blocked: Vec<NaiveDate>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/rooms/{id}/blocked-dates", get(blocked_dates))
}

/// Occupied nights for the date-picker. Advisory only; the authoritative
/// conflict check runs when the hold is inserted.
async fn blocked_dates(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<BlockedDatesResponse>, AppError> {
    let now = state.clock.now();
    let ranges = state.reservations.ranges_for_room(room_id, now).await?;
    Ok(Json(BlockedDatesResponse {
        room_id,
        blocked: availability::blocked_dates(&ranges),
    }))
}
