use crate::hold::load_current;
use crate::refund::{RefundError, RefundPolicy};
use chrono::{DateTime, Utc};
use roomstay_core::{
    GuestDetails, Reservation, ReservationRepository, ReservationStatus, StoreError,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("Reservation not found")]
    NotFound,

    /// The hold lapsed; nothing further can be done with it.
    #[error("Reservation is no longer available")]
    ReservationUnavailable,

    #[error("Cannot {action} a reservation in state {from:?}")]
    InvalidTransition {
        from: ReservationStatus,
        action: &'static str,
    },

    #[error("Missing required guest field: {0}")]
    MissingGuestField(&'static str),

    #[error(transparent)]
    Store(StoreError),
}

/// Who asked for a cancellation; recorded in logs only, the policy does not
/// differ by party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelParty {
    Guest,
    Host,
}

/// The canonical reservation state machine. All guest/host-driven
/// transitions run through here; payment-driven ones through
/// `PaymentReconciler`.
pub struct ReservationLifecycle {
    reservations: Arc<dyn ReservationRepository>,
    refunds: RefundPolicy,
}

impl ReservationLifecycle {
    pub fn new(reservations: Arc<dyn ReservationRepository>, refunds: RefundPolicy) -> Self {
        Self {
            reservations,
            refunds,
        }
    }

    /// Read path for guest/admin display. Lazy expiry is applied, so a
    /// lapsed hold reads as `Expired` here and on every later read.
    pub async fn get(&self, id: Uuid, now: DateTime<Utc>) -> Result<Reservation, TransitionError> {
        load_current(self.reservations.as_ref(), id, now)
            .await
            .map_err(TransitionError::Store)?
            .ok_or(TransitionError::NotFound)
    }

    /// Guest contact details are mutable only while the hold is unpaid.
    pub async fn update_guest_info(
        &self,
        id: Uuid,
        guest: GuestDetails,
        now: DateTime<Utc>,
    ) -> Result<Reservation, TransitionError> {
        if let Some(field) = guest.missing_field() {
            return Err(TransitionError::MissingGuestField(field));
        }

        let mut reservation = self.get(id, now).await?;
        match reservation.status {
            ReservationStatus::InProgress => {}
            ReservationStatus::Expired => return Err(TransitionError::ReservationUnavailable),
            other => {
                return Err(TransitionError::InvalidTransition {
                    from: other,
                    action: "update guest info on",
                })
            }
        }

        reservation.guest = guest;
        self.persist(reservation, ReservationStatus::InProgress, now)
            .await
    }

    /// Guest walks away before paying; the hold record is removed outright.
    pub async fn withdraw(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), TransitionError> {
        let reservation = self.get(id, now).await?;
        match reservation.status {
            ReservationStatus::InProgress => {}
            ReservationStatus::Expired => return Err(TransitionError::ReservationUnavailable),
            other => {
                return Err(TransitionError::InvalidTransition {
                    from: other,
                    action: "withdraw",
                })
            }
        }

        self.reservations
            .delete(id)
            .await
            .map_err(TransitionError::Store)?;
        info!(reservation_id = %id, "hold withdrawn by guest");
        Ok(())
    }

    /// Host accepts a paid reservation.
    pub async fn approve(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Reservation, TransitionError> {
        let mut reservation = self.get(id, now).await?;
        if reservation.status != ReservationStatus::PendingApproval {
            return Err(TransitionError::InvalidTransition {
                from: reservation.status,
                action: "approve",
            });
        }

        reservation.status = ReservationStatus::Approved;
        reservation.approved_at = Some(now);
        let reservation = self
            .persist(reservation, ReservationStatus::PendingApproval, now)
            .await?;
        info!(reservation_id = %id, "reservation approved by host");
        Ok(reservation)
    }

    /// Host turns the reservation down. Payment was already captured, so a
    /// refund is driven immediately after the transition lands.
    pub async fn reject(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Reservation, TransitionError> {
        let mut reservation = self.get(id, now).await?;
        if reservation.status != ReservationStatus::PendingApproval {
            return Err(TransitionError::InvalidTransition {
                from: reservation.status,
                action: "reject",
            });
        }

        reservation.status = ReservationStatus::Rejected;
        reservation.rejected_at = Some(now);
        let reservation = self
            .persist(reservation, ReservationStatus::PendingApproval, now)
            .await?;
        info!(reservation_id = %id, "reservation rejected by host");

        Ok(self.refunds.refund_after_rejection(reservation).await)
    }

    /// Cancellation of a paid reservation; the refund policy owns the
    /// guards and the provider call.
    pub async fn cancel(
        &self,
        id: Uuid,
        party: CancelParty,
        now: DateTime<Utc>,
    ) -> Result<Reservation, RefundError> {
        info!(reservation_id = %id, party = ?party, "cancellation requested");
        self.refunds.evaluate_cancellation(id, now).await
    }

    /// Compare-and-set write; losing the race means some other transition
    /// landed first, so report against the fresh state rather than a stale
    /// generic failure.
    async fn persist(
        &self,
        reservation: Reservation,
        expected: ReservationStatus,
        now: DateTime<Utc>,
    ) -> Result<Reservation, TransitionError> {
        match self.reservations.update(&reservation, expected).await {
            Ok(()) => Ok(reservation),
            Err(StoreError::StaleState) => {
                let fresh = self.get(reservation.id, now).await?;
                if fresh.status == ReservationStatus::Expired {
                    Err(TransitionError::ReservationUnavailable)
                } else {
                    Err(TransitionError::InvalidTransition {
                        from: fresh.status,
                        action: "complete the transition on",
                    })
                }
            }
            Err(e) => Err(TransitionError::Store(e)),
        }
    }
}
