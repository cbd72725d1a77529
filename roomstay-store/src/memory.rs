use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roomstay_core::{
    Reservation, ReservationRepository, ReservationStatus, ReservedRange, Room, RoomRepository,
    StoreError,
};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory store, used by the test suites and local development runs.
///
/// One mutex over all reservations makes "check no conflict, then insert"
/// trivially atomic, which is the same guarantee the Postgres store gets
/// from its exclusion constraint.
#[derive(Default)]
pub struct MemoryStore {
    rooms: Mutex<HashMap<Uuid, Room>>,
    reservations: Mutex<HashMap<Uuid, Reservation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_room(&self, room: Room) {
        self.rooms
            .lock()
            .expect("room map lock poisoned")
            .insert(room.id, room);
    }

    fn lock_reservations(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Reservation>> {
        self.reservations
            .lock()
            .expect("reservation map lock poisoned")
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn get_room(&self, id: Uuid) -> Result<Option<Room>, StoreError> {
        Ok(self
            .rooms
            .lock()
            .expect("room map lock poisoned")
            .get(&id)
            .cloned())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn insert_hold(
        &self,
        reservation: &Reservation,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut map = self.lock_reservations();
        let conflict = map.values().any(|existing| {
            existing.room_id == reservation.room_id
                && existing.blocks_range(now)
                && existing.check_in < reservation.check_out
                && existing.check_out > reservation.check_in
        });
        if conflict {
            return Err(StoreError::RangeConflict);
        }
        map.insert(reservation.id, reservation.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Reservation>, StoreError> {
        Ok(self.lock_reservations().get(&id).cloned())
    }

    async fn update(
        &self,
        reservation: &Reservation,
        expected: ReservationStatus,
    ) -> Result<(), StoreError> {
        let mut map = self.lock_reservations();
        let stored = map.get_mut(&reservation.id).ok_or(StoreError::NotFound)?;
        if stored.status != expected {
            return Err(StoreError::StaleState);
        }
        *stored = reservation.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.lock_reservations()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn ranges_for_room(
        &self,
        room_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReservedRange>, StoreError> {
        Ok(self
            .lock_reservations()
            .values()
            .filter(|r| r.room_id == room_id)
            .filter_map(|r| r.reserved_range(now))
            .collect())
    }
}
