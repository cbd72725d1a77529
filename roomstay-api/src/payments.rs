use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use roomstay_core::Reservation;
use serde::Deserialize;
use uuid::Uuid;

/// Payment-provider callback/return payload. Untrusted and possibly
/// replayed; the reconciler treats it accordingly.
#[derive(Debug, Deserialize)]
pub struct PaymentCallback {
    pub payment_id: String,
    pub status: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/reservations/{id}/payment", post(confirm_payment))
}

async fn confirm_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(callback): Json<PaymentCallback>,
) -> Result<Json<Reservation>, AppError> {
    let now = state.clock.now();
    let reservation = state
        .payments
        .confirm_payment(id, &callback.payment_id, &callback.status, now)
        .await?;
    Ok(Json(reservation))
}
