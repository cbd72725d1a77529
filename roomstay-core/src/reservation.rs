use chrono::{DateTime, NaiveDate, Utc};
use roomstay_shared::Money;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reservation lifecycle status.
///
/// `InProgress` is the time-boxed unpaid hold; everything after it is
/// durable. `Expired` is only ever reached lazily, when a reader observes a
/// hold past its deadline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    InProgress,
    PendingApproval,
    Approved,
    Rejected,
    Cancelled,
    Expired,
}

impl ReservationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Rejected | ReservationStatus::Cancelled | ReservationStatus::Expired
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::InProgress => "IN_PROGRESS",
            ReservationStatus::PendingApproval => "PENDING_APPROVAL",
            ReservationStatus::Approved => "APPROVED",
            ReservationStatus::Rejected => "REJECTED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Expired => "EXPIRED",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(ReservationStatus::InProgress),
            "PENDING_APPROVAL" => Ok(ReservationStatus::PendingApproval),
            "APPROVED" => Ok(ReservationStatus::Approved),
            "REJECTED" => Ok(ReservationStatus::Rejected),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            "EXPIRED" => Ok(ReservationStatus::Expired),
            other => Err(format!("unknown reservation status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    None,
    Pending,
    Succeeded,
    Failed,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::None => "NONE",
            RefundStatus::Pending => "PENDING",
            RefundStatus::Succeeded => "SUCCEEDED",
            RefundStatus::Failed => "FAILED",
        }
    }
}

impl std::str::FromStr for RefundStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(RefundStatus::None),
            "PENDING" => Ok(RefundStatus::Pending),
            "SUCCEEDED" => Ok(RefundStatus::Succeeded),
            "FAILED" => Ok(RefundStatus::Failed),
            other => Err(format!("unknown refund status: {other}")),
        }
    }
}

/// Captured payment, attached when the provider confirms.
///
/// `settled` tracks the provider's own settlement signal, which can lag the
/// capture that moved the reservation to `PendingApproval`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub settled: bool,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuestDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
}

impl GuestDetails {
    /// First required field that is missing or blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            return Some("name");
        }
        if self.email.trim().is_empty() {
            return Some("email");
        }
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub room_id: Uuid,
    pub guest: GuestDetails,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_nights: i64,
    /// Rate snapshot taken at hold creation; never recomputed from the room.
    pub nightly_rate: Money,
    pub total_price: Money,
    pub status: ReservationStatus,
    /// Only meaningful while `status == InProgress`.
    pub hold_expires_at: DateTime<Utc>,
    pub payment: Option<PaymentRecord>,
    pub refund_status: RefundStatus,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Status after applying lazy hold expiry. Every read and mutation path
    /// goes through this so expiry is computed in exactly one place.
    pub fn effective_status(&self, now: DateTime<Utc>) -> ReservationStatus {
        if self.status == ReservationStatus::InProgress && self.hold_expires_at <= now {
            ReservationStatus::Expired
        } else {
            self.status
        }
    }

    /// Whether this reservation blocks its date range for other guests.
    pub fn blocks_range(&self, now: DateTime<Utc>) -> bool {
        !self.effective_status(now).is_terminal()
    }

    pub fn reserved_range(&self, now: DateTime<Utc>) -> Option<ReservedRange> {
        if self.blocks_range(now) {
            Some(ReservedRange {
                check_in: self.check_in,
                check_out: self.check_out,
                status: self.status,
            })
        } else {
            None
        }
    }
}

/// Derived (check_in, check_out, status) view used purely for conflict
/// checks against a room.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservedRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
}
