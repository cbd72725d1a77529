use crate::hold::load_current;
use chrono::{DateTime, Utc};
use roomstay_core::{
    GatewayError, ProviderRefundStatus, RefundGateway, RefundStatus, Reservation,
    ReservationRepository, ReservationStatus, StoreError,
};
use roomstay_shared::clock::property_local_date;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RefundError {
    #[error("Reservation not found")]
    NotFound,

    #[error("Reservation in state {0:?} cannot be cancelled")]
    NotCancellable(ReservationStatus),

    #[error("Cannot cancel on or after the check-in date")]
    CheckInReached,

    #[error("Payment has not settled yet; try again shortly")]
    PaymentNotSettled,

    #[error("A refund was already issued for this reservation")]
    AlreadyRefunded,

    #[error("Refund provider declined; the cancellation can be retried")]
    RefundFailed,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Store(StoreError),
}

/// Decides whether a paid reservation may be cancelled and drives the
/// refund through the provider.
#[derive(Clone)]
pub struct RefundPolicy {
    reservations: Arc<dyn ReservationRepository>,
    gateway: Arc<dyn RefundGateway>,
}

impl RefundPolicy {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        gateway: Arc<dyn RefundGateway>,
    ) -> Self {
        Self {
            reservations,
            gateway,
        }
    }

    /// Cancellation with refund, guest- or host-initiated.
    ///
    /// Guards, in order: the reservation must be paid and live
    /// (`PendingApproval` or `Approved`); the property-local calendar day
    /// must still be before check-in; the captured payment must have
    /// settled; a refund must not already have been issued. A provider
    /// `Failed` outcome leaves the reservation untouched so the guest can
    /// retry; `Succeeded` and `Pending` both finalize the cancellation,
    /// since the decision is final even while settlement lags.
    pub async fn evaluate_cancellation(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Reservation, RefundError> {
        let mut reservation = load_current(self.reservations.as_ref(), id, now)
            .await
            .map_err(RefundError::Store)?
            .ok_or(RefundError::NotFound)?;

        let current = reservation.status;
        match current {
            ReservationStatus::PendingApproval | ReservationStatus::Approved => {}
            ReservationStatus::Cancelled
                if matches!(
                    reservation.refund_status,
                    RefundStatus::Succeeded | RefundStatus::Pending
                ) =>
            {
                return Err(RefundError::AlreadyRefunded);
            }
            other => return Err(RefundError::NotCancellable(other)),
        }

        // Hard server-side rule: same-day-or-later check-in blocks the
        // refund regardless of what the client UI showed.
        if property_local_date(now) >= reservation.check_in {
            return Err(RefundError::CheckInReached);
        }

        let payment = match &reservation.payment {
            Some(p) if p.settled => p.clone(),
            Some(_) => return Err(RefundError::PaymentNotSettled),
            None => return Err(RefundError::NotCancellable(current)),
        };

        if matches!(
            reservation.refund_status,
            RefundStatus::Succeeded | RefundStatus::Pending
        ) {
            return Err(RefundError::AlreadyRefunded);
        }

        let outcome = self
            .gateway
            .refund(&payment.payment_id, reservation.total_price)
            .await?;

        match outcome {
            ProviderRefundStatus::Succeeded | ProviderRefundStatus::Pending => {
                let refund_status = match outcome {
                    ProviderRefundStatus::Succeeded => RefundStatus::Succeeded,
                    _ => RefundStatus::Pending,
                };
                reservation.refund_status = refund_status;
                reservation.status = ReservationStatus::Cancelled;
                reservation.cancelled_at = Some(now);
                let reservation = match self.reservations.update(&reservation, current).await {
                    Ok(()) => reservation,
                    // The provider has already accepted the refund request;
                    // losing the compare-and-set must not drop that fact,
                    // or a retry would refund the guest twice.
                    Err(StoreError::StaleState) => {
                        self.record_issued_refund(id, refund_status, now).await?
                    }
                    Err(e) => return Err(RefundError::Store(e)),
                };
                info!(
                    reservation_id = %id,
                    refund_status = ?reservation.refund_status,
                    "reservation cancelled, refund issued"
                );
                Ok(reservation)
            }
            ProviderRefundStatus::Failed => {
                reservation.refund_status = RefundStatus::Failed;
                self.reservations
                    .update(&reservation, current)
                    .await
                    .map_err(RefundError::Store)?;
                warn!(reservation_id = %id, "refund declined by provider");
                Err(RefundError::RefundFailed)
            }
        }
    }

    /// A transition raced in between our read and our cancellation write,
    /// after the provider already accepted the refund. Re-read and record
    /// the issued refund against whatever state won; the gateway is never
    /// called a second time.
    async fn record_issued_refund(
        &self,
        id: Uuid,
        refund_status: RefundStatus,
        now: DateTime<Utc>,
    ) -> Result<Reservation, RefundError> {
        let mut fresh = load_current(self.reservations.as_ref(), id, now)
            .await
            .map_err(RefundError::Store)?
            .ok_or(RefundError::NotFound)?;
        match fresh.status {
            // A concurrent cancellation already finalized the row.
            ReservationStatus::Cancelled => Ok(fresh),
            status => {
                fresh.refund_status = refund_status;
                if matches!(
                    status,
                    ReservationStatus::PendingApproval | ReservationStatus::Approved
                ) {
                    fresh.status = ReservationStatus::Cancelled;
                    fresh.cancelled_at = Some(now);
                }
                self.reservations
                    .update(&fresh, status)
                    .await
                    .map_err(RefundError::Store)?;
                Ok(fresh)
            }
        }
    }

    /// Refund driven by a host rejection. The rejection itself already
    /// stands, so provider trouble here is logged and recorded rather than
    /// unwinding the decision; the refund can be re-driven by support.
    pub async fn refund_after_rejection(&self, mut reservation: Reservation) -> Reservation {
        let Some(payment) = reservation.payment.clone() else {
            return reservation;
        };
        if reservation.refund_status != RefundStatus::None {
            return reservation;
        }

        let outcome = match self
            .gateway
            .refund(&payment.payment_id, reservation.total_price)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(reservation_id = %reservation.id, error = %e, "refund after rejection failed to reach provider");
                return reservation;
            }
        };

        reservation.refund_status = match outcome {
            ProviderRefundStatus::Succeeded => RefundStatus::Succeeded,
            ProviderRefundStatus::Pending => RefundStatus::Pending,
            ProviderRefundStatus::Failed => RefundStatus::Failed,
        };
        if let Err(e) = self
            .reservations
            .update(&reservation, ReservationStatus::Rejected)
            .await
        {
            warn!(reservation_id = %reservation.id, error = %e, "failed to record refund status after rejection");
        } else {
            info!(
                reservation_id = %reservation.id,
                refund_status = ?reservation.refund_status,
                "refund recorded for rejected reservation"
            );
        }
        reservation
    }
}
