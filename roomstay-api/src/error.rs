use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roomstay_booking::{HoldError, PaymentError, RefundError, TransitionError};
use roomstay_core::StoreError;
use serde_json::json;

/// One user-facing rejection. `reason` is a stable machine-readable code;
/// every guard in the engine maps to a distinct one so the UI can tell
/// "pick different dates" apart from "wait for the host" apart from
/// "already refunded".
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    reason: &'static str,
    message: String,
}

impl AppError {
    fn new(status: StatusCode, reason: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            reason,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            message,
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal server error: {}", self.message);
            "Internal Server Error".to_string()
        } else {
            self.message
        };

        let body = Json(json!({
            "reason": self.reason,
            "error": message,
        }));
        (self.status, body).into_response()
    }
}

impl From<HoldError> for AppError {
    fn from(e: HoldError) -> Self {
        let message = e.to_string();
        match e {
            HoldError::RoomNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "room_not_found", message)
            }
            HoldError::InvalidDateRange => {
                Self::new(StatusCode::BAD_REQUEST, "invalid_date_range", message)
            }
            HoldError::MissingGuestField(_) => {
                Self::new(StatusCode::BAD_REQUEST, "missing_guest_field", message)
            }
            HoldError::DateRangeConflict => {
                Self::new(StatusCode::CONFLICT, "date_range_conflict", message)
            }
            HoldError::InvalidCurrency(_) => {
                Self::new(StatusCode::BAD_REQUEST, "invalid_currency", message)
            }
            HoldError::ExchangeRateUnavailable(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                "exchange_rate_unavailable",
                message,
            ),
            HoldError::Store(e) => e.into(),
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        let message = e.to_string();
        match e {
            TransitionError::NotFound => {
                Self::new(StatusCode::NOT_FOUND, "reservation_not_found", message)
            }
            TransitionError::ReservationUnavailable => {
                Self::new(StatusCode::GONE, "reservation_unavailable", message)
            }
            TransitionError::InvalidTransition { .. } => {
                Self::new(StatusCode::CONFLICT, "invalid_transition", message)
            }
            TransitionError::MissingGuestField(_) => {
                Self::new(StatusCode::BAD_REQUEST, "missing_guest_field", message)
            }
            TransitionError::Store(e) => e.into(),
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        let message = e.to_string();
        match e {
            PaymentError::NotFound => {
                Self::new(StatusCode::NOT_FOUND, "reservation_not_found", message)
            }
            PaymentError::ReservationUnavailable => {
                Self::new(StatusCode::GONE, "reservation_unavailable", message)
            }
            PaymentError::NotPayable(_) => {
                Self::new(StatusCode::CONFLICT, "not_payable", message)
            }
            PaymentError::PaymentMismatch => {
                Self::new(StatusCode::CONFLICT, "payment_mismatch", message)
            }
            PaymentError::UnrecognizedStatus(_) => Self::new(
                StatusCode::BAD_REQUEST,
                "unrecognized_payment_status",
                message,
            ),
            PaymentError::ProviderDeclined => {
                Self::new(StatusCode::PAYMENT_REQUIRED, "payment_declined", message)
            }
            PaymentError::Store(e) => e.into(),
        }
    }
}

impl From<RefundError> for AppError {
    fn from(e: RefundError) -> Self {
        let message = e.to_string();
        match e {
            RefundError::NotFound => {
                Self::new(StatusCode::NOT_FOUND, "reservation_not_found", message)
            }
            RefundError::NotCancellable(_) => {
                Self::new(StatusCode::CONFLICT, "not_cancellable", message)
            }
            RefundError::CheckInReached => {
                Self::new(StatusCode::CONFLICT, "check_in_reached", message)
            }
            RefundError::PaymentNotSettled => {
                Self::new(StatusCode::CONFLICT, "payment_not_settled", message)
            }
            RefundError::AlreadyRefunded => {
                Self::new(StatusCode::CONFLICT, "already_refunded", message)
            }
            RefundError::RefundFailed => {
                Self::new(StatusCode::BAD_GATEWAY, "refund_failed", message)
            }
            RefundError::Gateway(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                "refund_provider_unreachable",
                message,
            ),
            RefundError::Store(e) => e.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                "reservation_not_found",
                e.to_string(),
            ),
            StoreError::RangeConflict => Self::new(
                StatusCode::CONFLICT,
                "date_range_conflict",
                e.to_string(),
            ),
            StoreError::StaleState | StoreError::Backend(_) => Self::internal(e.to_string()),
        }
    }
}
