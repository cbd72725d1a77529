use crate::availability::{self, AvailabilityError};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use roomstay_core::{
    GuestDetails, RefundStatus, Reservation, ReservationRepository, ReservationStatus,
    RoomRepository, StoreError,
};
use roomstay_shared::{Currency, ExchangeRates, MoneyError};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum HoldError {
    #[error("Room not found: {0}")]
    RoomNotFound(Uuid),

    #[error("Check-out must be strictly after check-in")]
    InvalidDateRange,

    #[error("Missing required guest field: {0}")]
    MissingGuestField(&'static str),

    #[error("Requested dates conflict with an existing reservation")]
    DateRangeConflict,

    #[error("Unsupported currency: {0}")]
    InvalidCurrency(String),

    #[error("No exchange rate available for {0}")]
    ExchangeRateUnavailable(Currency),

    #[error(transparent)]
    Store(StoreError),
}

impl From<AvailabilityError> for HoldError {
    fn from(_: AvailabilityError) -> Self {
        HoldError::InvalidDateRange
    }
}

#[derive(Debug, Clone)]
pub struct HoldRequest {
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest: GuestDetails,
    /// Currency the guest checked out in. Conversion from the room's native
    /// rate happens once, here; the snapshot never moves with later rates.
    pub display_currency: Option<String>,
}

/// Creates time-boxed holds and invalidates them once their deadline
/// passes.
pub struct HoldManager {
    rooms: Arc<dyn RoomRepository>,
    reservations: Arc<dyn ReservationRepository>,
    rates: ExchangeRates,
    hold_duration: Duration,
}

impl HoldManager {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        reservations: Arc<dyn ReservationRepository>,
        rates: ExchangeRates,
        hold_duration: Duration,
    ) -> Self {
        Self {
            rooms,
            reservations,
            rates,
            hold_duration,
        }
    }

    pub async fn create_hold(
        &self,
        req: HoldRequest,
        now: DateTime<Utc>,
    ) -> Result<Reservation, HoldError> {
        if req.check_out <= req.check_in {
            return Err(HoldError::InvalidDateRange);
        }
        if let Some(field) = req.guest.missing_field() {
            return Err(HoldError::MissingGuestField(field));
        }

        let room = self
            .rooms
            .get_room(req.room_id)
            .await
            .map_err(HoldError::Store)?
            .ok_or(HoldError::RoomNotFound(req.room_id))?;

        let currency = match &req.display_currency {
            Some(raw) => Currency::from_str(raw)
                .map_err(|_| HoldError::InvalidCurrency(raw.clone()))?,
            None => room.nightly_rate.currency,
        };
        let nightly = self
            .rates
            .convert(room.nightly_rate, currency)
            .map_err(|e| match e {
                MoneyError::RateUnavailable { to, .. } => HoldError::ExchangeRateUnavailable(to),
                MoneyError::InvalidCurrency(c) => HoldError::InvalidCurrency(c),
            })?;

        let total_nights = (req.check_out - req.check_in).num_days();
        let total_price = nightly.times(total_nights);

        // Advisory pre-check for a clean error; the insert below is the
        // authoritative, race-safe one.
        let existing = self
            .reservations
            .ranges_for_room(req.room_id, now)
            .await
            .map_err(HoldError::Store)?;
        if !availability::is_range_available(req.check_in, req.check_out, &existing)? {
            return Err(HoldError::DateRangeConflict);
        }

        let reservation = Reservation {
            id: Uuid::new_v4(),
            room_id: room.id,
            guest: req.guest,
            check_in: req.check_in,
            check_out: req.check_out,
            total_nights,
            nightly_rate: nightly,
            total_price,
            status: ReservationStatus::InProgress,
            hold_expires_at: now + self.hold_duration,
            payment: None,
            refund_status: RefundStatus::None,
            created_at: now,
            approved_at: None,
            rejected_at: None,
            cancelled_at: None,
        };

        match self.reservations.insert_hold(&reservation, now).await {
            Ok(()) => {
                info!(
                    reservation_id = %reservation.id,
                    room_id = %room.id,
                    nights = total_nights,
                    total = %reservation.total_price,
                    expires_at = %reservation.hold_expires_at,
                    "hold created"
                );
                Ok(reservation)
            }
            Err(StoreError::RangeConflict) => {
                warn!(room_id = %room.id, "hold lost race for overlapping dates");
                Err(HoldError::DateRangeConflict)
            }
            Err(e) => Err(HoldError::Store(e)),
        }
    }
}

/// Load a reservation and apply lazy hold expiry before handing it to the
/// caller. Every read and mutation path goes through here, so a lapsed hold
/// is persisted as `Expired` the first time anyone observes it.
///
/// Two concurrent observers both end up seeing `Expired`; the compare-and-
/// set below makes sure only the winner performs the flip (and logs it
/// once), the loser just reloads the settled row.
pub async fn load_current(
    reservations: &dyn ReservationRepository,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<Option<Reservation>, StoreError> {
    let Some(mut reservation) = reservations.get(id).await? else {
        return Ok(None);
    };

    if reservation.status == ReservationStatus::InProgress
        && reservation.effective_status(now) == ReservationStatus::Expired
    {
        reservation.status = ReservationStatus::Expired;
        match reservations
            .update(&reservation, ReservationStatus::InProgress)
            .await
        {
            Ok(()) => {
                info!(reservation_id = %id, "hold expired, released dates");
                return Ok(Some(reservation));
            }
            Err(StoreError::StaleState) => {
                // Another request settled it first; their state wins.
                return reservations.get(id).await;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(Some(reservation))
}
