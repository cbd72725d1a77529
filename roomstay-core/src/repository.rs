use crate::reservation::{Reservation, ReservationStatus, ReservedRange};
use crate::residence::Room;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    /// The backend refused an insert because another live reservation holds
    /// an overlapping range for the same room.
    #[error("Date range conflicts with an existing reservation")]
    RangeConflict,

    /// Compare-and-set update lost against a concurrent transition.
    #[error("Reservation was modified concurrently")]
    StaleState,

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Read access to rooms.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn get_room(&self, id: Uuid) -> Result<Option<Room>, StoreError>;
}

/// Reservation persistence.
///
/// `insert_hold` is the serialization point for the check-then-act race in
/// hold creation: implementations must make "no overlapping live
/// reservation exists, insert this one" atomic (exclusion constraint in
/// Postgres, re-check under the lock in memory) and return `RangeConflict`
/// when they lose.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn insert_hold(
        &self,
        reservation: &Reservation,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Reservation>, StoreError>;

    /// Persist a transition. `expected` is the status the caller read; the
    /// write must fail with `StaleState` if the stored status has moved on,
    /// so racing transitions resolve deterministically.
    async fn update(
        &self,
        reservation: &Reservation,
        expected: ReservationStatus,
    ) -> Result<(), StoreError>;

    /// Physical removal, used only for guest withdrawal of an unpaid hold.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Ranges that currently block the room, lapsed holds and terminal
    /// reservations excluded.
    async fn ranges_for_room(
        &self,
        room_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReservedRange>, StoreError>;
}
