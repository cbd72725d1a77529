use crate::hold::load_current;
use chrono::{DateTime, Utc};
use roomstay_core::{
    PaymentRecord, ProviderPaymentStatus, Reservation, ReservationRepository, ReservationStatus,
    StoreError,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Reservation not found")]
    NotFound,

    /// The hold expired before payment landed.
    #[error("Reservation is no longer available")]
    ReservationUnavailable,

    /// Terminal reservation; confirmation must not silently transition it.
    #[error("Reservation in state {0:?} is not payable")]
    NotPayable(ReservationStatus),

    /// A different payment id was already reconciled with this reservation.
    #[error("Payment id does not match the one on record")]
    PaymentMismatch,

    #[error("Unrecognized payment status from provider: {0}")]
    UnrecognizedStatus(String),

    /// Provider reported a failed payment; the hold stays open for retry
    /// until its original deadline.
    #[error("Payment was declined by the provider")]
    ProviderDeclined,

    #[error(transparent)]
    Store(StoreError),
}

/// Correlates payment-provider callbacks with pending holds. The callback
/// is untrusted and may be replayed, so everything here is keyed on the
/// provider's `payment_id` and written with compare-and-set.
pub struct PaymentReconciler {
    reservations: Arc<dyn ReservationRepository>,
}

impl PaymentReconciler {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    /// Reconcile a provider confirmation with a reservation.
    ///
    /// Replays with the already-recorded `payment_id` are a no-op success.
    /// The expiry re-check and the transition are one compare-and-set: if a
    /// lazy expiry lands between our read and our write, the write fails
    /// and the confirmation is rejected rather than resurrecting the hold.
    pub async fn confirm_payment(
        &self,
        id: Uuid,
        payment_id: &str,
        reported_status: &str,
        now: DateTime<Utc>,
    ) -> Result<Reservation, PaymentError> {
        let status = ProviderPaymentStatus::parse(reported_status)
            .ok_or_else(|| PaymentError::UnrecognizedStatus(reported_status.to_string()))?;

        let reservation = load_current(self.reservations.as_ref(), id, now)
            .await
            .map_err(PaymentError::Store)?
            .ok_or(PaymentError::NotFound)?;

        match reservation.status {
            ReservationStatus::Expired => Err(PaymentError::ReservationUnavailable),
            ReservationStatus::Rejected | ReservationStatus::Cancelled => {
                Err(PaymentError::NotPayable(reservation.status))
            }
            ReservationStatus::PendingApproval | ReservationStatus::Approved => {
                self.reconcile_replay(reservation, payment_id, status).await
            }
            ReservationStatus::InProgress => {
                self.capture(reservation, payment_id, status, now).await
            }
        }
    }

    /// First confirmation against a live hold: the only transition that
    /// moves a reservation out of its time-boxed state.
    async fn capture(
        &self,
        mut reservation: Reservation,
        payment_id: &str,
        status: ProviderPaymentStatus,
        now: DateTime<Utc>,
    ) -> Result<Reservation, PaymentError> {
        if status == ProviderPaymentStatus::Failed {
            warn!(
                reservation_id = %reservation.id,
                "provider reported failed payment, hold stays open"
            );
            return Err(PaymentError::ProviderDeclined);
        }

        reservation.payment = Some(PaymentRecord {
            payment_id: payment_id.to_string(),
            settled: status == ProviderPaymentStatus::Completed,
            confirmed_at: now,
        });
        reservation.status = ReservationStatus::PendingApproval;

        match self
            .reservations
            .update(&reservation, ReservationStatus::InProgress)
            .await
        {
            Ok(()) => {
                info!(
                    reservation_id = %reservation.id,
                    payment_id,
                    "payment confirmed, awaiting host decision"
                );
                Ok(reservation)
            }
            Err(StoreError::StaleState) => {
                // Lost against a concurrent transition. Re-read once and
                // judge the settled state; no second capture attempt.
                let fresh = load_current(self.reservations.as_ref(), reservation.id, now)
                    .await
                    .map_err(PaymentError::Store)?
                    .ok_or(PaymentError::NotFound)?;
                match fresh.status {
                    ReservationStatus::Expired => Err(PaymentError::ReservationUnavailable),
                    ReservationStatus::Rejected | ReservationStatus::Cancelled => {
                        Err(PaymentError::NotPayable(fresh.status))
                    }
                    ReservationStatus::PendingApproval | ReservationStatus::Approved => {
                        // A racing confirmation got there first; treat this
                        // delivery as its replay.
                        self.reconcile_replay(fresh, payment_id, status).await
                    }
                    // A guest-info update slipped in between read and
                    // write; the provider redelivers and the next attempt
                    // goes through.
                    ReservationStatus::InProgress => {
                        Err(PaymentError::Store(StoreError::StaleState))
                    }
                }
            }
            Err(e) => Err(PaymentError::Store(e)),
        }
    }

    /// At-least-once delivery: a repeat of the recorded payment id is
    /// acknowledged without side effects, except that a `Completed` replay
    /// may carry the settlement signal the original capture lacked.
    async fn reconcile_replay(
        &self,
        mut reservation: Reservation,
        payment_id: &str,
        status: ProviderPaymentStatus,
    ) -> Result<Reservation, PaymentError> {
        let Some(record) = reservation.payment.clone() else {
            return Err(PaymentError::NotPayable(reservation.status));
        };
        if record.payment_id != payment_id {
            warn!(
                reservation_id = %reservation.id,
                "payment confirmation with mismatched id rejected"
            );
            return Err(PaymentError::PaymentMismatch);
        }

        // The host may approve before the settlement signal arrives, so
        // the flip is valid from Approved as well.
        if status == ProviderPaymentStatus::Completed
            && !record.settled
            && matches!(
                reservation.status,
                ReservationStatus::PendingApproval | ReservationStatus::Approved
            )
        {
            let expected = reservation.status;
            reservation.payment = Some(PaymentRecord {
                settled: true,
                ..record
            });
            self.reservations
                .update(&reservation, expected)
                .await
                .map_err(PaymentError::Store)?;
            info!(reservation_id = %reservation.id, "payment settlement recorded");
        }
        Ok(reservation)
    }
}
