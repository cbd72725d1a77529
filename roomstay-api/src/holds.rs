use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use roomstay_booking::{CancelParty, HoldRequest};
use roomstay_core::{GuestDetails, Reservation};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateHoldRequest {
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest: GuestDetails,
    /// Optional checkout currency; the room's native unit when absent.
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    /// "GUEST" or "HOST"; defaults to guest.
    pub requested_by: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/holds", post(create_hold))
        .route(
            "/v1/reservations/{id}",
            get(get_reservation).delete(withdraw),
        )
        .route("/v1/reservations/{id}/guest", put(update_guest))
        .route("/v1/reservations/{id}/cancel", post(cancel))
}

async fn create_hold(
    State(state): State<AppState>,
    Json(req): Json<CreateHoldRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let now = state.clock.now();
    let reservation = state
        .holds
        .create_hold(
            HoldRequest {
                room_id: req.room_id,
                check_in: req.check_in,
                check_out: req.check_out,
                guest: req.guest,
                display_currency: req.currency,
            },
            now,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Reservation detail, lazy expiry applied. `hold_expires_at` in the body
/// is the authoritative deadline; the client countdown is display only.
async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, AppError> {
    let now = state.clock.now();
    Ok(Json(state.lifecycle.get(id, now).await?))
}

async fn update_guest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(guest): Json<GuestDetails>,
) -> Result<Json<Reservation>, AppError> {
    let now = state.clock.now();
    Ok(Json(state.lifecycle.update_guest_info(id, guest, now).await?))
}

async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let now = state.clock.now();
    state.lifecycle.withdraw(id, now).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CancelRequest>,
) -> Result<Json<Reservation>, AppError> {
    let now = state.clock.now();
    let party = match req.requested_by.as_deref() {
        Some("HOST") | Some("host") => CancelParty::Host,
        _ => CancelParty::Guest,
    };
    Ok(Json(state.lifecycle.cancel(id, party, now).await?))
}
