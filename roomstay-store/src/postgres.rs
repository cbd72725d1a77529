use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use roomstay_core::{
    GuestDetails, PaymentRecord, RefundStatus, Reservation, ReservationRepository,
    ReservationStatus, ReservedRange, Room, RoomRepository, StoreError,
};
use roomstay_shared::{Currency, Money};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

/// Postgres-backed store.
///
/// Hold-creation atomicity comes from the `reservations_no_overlap`
/// exclusion constraint (see `migrations/0001_init.sql`): two racing
/// inserts for overlapping ranges on one room serialize at the database and
/// the loser surfaces as `RangeConflict`. Lapsed holds still match the
/// constraint predicate until they are flipped to `EXPIRED`, so
/// `insert_hold` flips them inside the same transaction as the insert.
pub struct PgStore {
    pool: PgPool,
}

// Postgres exclusion-constraint violation.
const EXCLUSION_VIOLATION: &str = "23P01";
const UNIQUE_VIOLATION: &str = "23505";

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn is_conflict(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db) = e {
        if let Some(code) = db.code() {
            return code == EXCLUSION_VIOLATION || code == UNIQUE_VIOLATION;
        }
    }
    false
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    residence_id: Uuid,
    name: String,
    nightly_rate_minor: i64,
    currency: String,
}

impl RoomRow {
    fn into_room(self) -> Result<Room, StoreError> {
        let currency = Currency::from_str(&self.currency)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Room {
            id: self.id,
            residence_id: self.residence_id,
            name: self.name,
            nightly_rate: Money::new(self.nightly_rate_minor, currency),
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    room_id: Uuid,
    guest_name: String,
    guest_email: String,
    guest_phone: Option<String>,
    guest_country: Option<String>,
    check_in: NaiveDate,
    check_out: NaiveDate,
    total_nights: i64,
    nightly_rate_minor: i64,
    total_price_minor: i64,
    currency: String,
    status: String,
    hold_expires_at: DateTime<Utc>,
    payment_id: Option<String>,
    payment_settled: Option<bool>,
    payment_confirmed_at: Option<DateTime<Utc>>,
    refund_status: String,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    rejected_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl ReservationRow {
    fn into_reservation(self) -> Result<Reservation, StoreError> {
        let currency = Currency::from_str(&self.currency)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let status = ReservationStatus::from_str(&self.status).map_err(StoreError::Backend)?;
        let refund_status = RefundStatus::from_str(&self.refund_status).map_err(StoreError::Backend)?;

        let payment = match (self.payment_id, self.payment_settled, self.payment_confirmed_at) {
            (Some(payment_id), Some(settled), Some(confirmed_at)) => Some(PaymentRecord {
                payment_id,
                settled,
                confirmed_at,
            }),
            _ => None,
        };

        Ok(Reservation {
            id: self.id,
            room_id: self.room_id,
            guest: GuestDetails {
                name: self.guest_name,
                email: self.guest_email,
                phone: self.guest_phone,
                country: self.guest_country,
            },
            check_in: self.check_in,
            check_out: self.check_out,
            total_nights: self.total_nights,
            nightly_rate: Money::new(self.nightly_rate_minor, currency),
            total_price: Money::new(self.total_price_minor, currency),
            status,
            hold_expires_at: self.hold_expires_at,
            payment,
            refund_status,
            created_at: self.created_at,
            approved_at: self.approved_at,
            rejected_at: self.rejected_at,
            cancelled_at: self.cancelled_at,
        })
    }
}

const RESERVATION_COLUMNS: &str = "id, room_id, guest_name, guest_email, guest_phone, \
     guest_country, check_in, check_out, total_nights, nightly_rate_minor, total_price_minor, \
     currency, status, hold_expires_at, payment_id, payment_settled, payment_confirmed_at, \
     refund_status, created_at, approved_at, rejected_at, cancelled_at";

#[async_trait]
impl RoomRepository for PgStore {
    async fn get_room(&self, id: Uuid) -> Result<Option<Room>, StoreError> {
        let row = sqlx::query_as::<_, RoomRow>(
            "SELECT id, residence_id, name, nightly_rate_minor, currency FROM rooms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(RoomRow::into_room).transpose()
    }
}

#[async_trait]
impl ReservationRepository for PgStore {
    async fn insert_hold(
        &self,
        reservation: &Reservation,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        // Release lapsed holds for this room so they stop satisfying the
        // exclusion predicate before the new row is checked against it.
        sqlx::query(
            "UPDATE reservations SET status = 'EXPIRED' \
             WHERE room_id = $1 AND status = 'IN_PROGRESS' AND hold_expires_at <= $2",
        )
        .bind(reservation.room_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(backend)?;

        let insert = sqlx::query(
            "INSERT INTO reservations (id, room_id, guest_name, guest_email, guest_phone, \
             guest_country, check_in, check_out, total_nights, nightly_rate_minor, \
             total_price_minor, currency, status, hold_expires_at, refund_status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
        )
        .bind(reservation.id)
        .bind(reservation.room_id)
        .bind(&reservation.guest.name)
        .bind(&reservation.guest.email)
        .bind(&reservation.guest.phone)
        .bind(&reservation.guest.country)
        .bind(reservation.check_in)
        .bind(reservation.check_out)
        .bind(reservation.total_nights)
        .bind(reservation.nightly_rate.amount_minor)
        .bind(reservation.total_price.amount_minor)
        .bind(reservation.total_price.currency.code())
        .bind(reservation.status.as_str())
        .bind(reservation.hold_expires_at)
        .bind(reservation.refund_status.as_str())
        .bind(reservation.created_at)
        .execute(&mut *tx)
        .await;

        match insert {
            Ok(_) => tx.commit().await.map_err(backend),
            Err(e) if is_conflict(&e) => Err(StoreError::RangeConflict),
            Err(e) => Err(backend(e)),
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<Reservation>, StoreError> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(ReservationRow::into_reservation).transpose()
    }

    async fn update(
        &self,
        reservation: &Reservation,
        expected: ReservationStatus,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE reservations SET guest_name = $1, guest_email = $2, guest_phone = $3, \
             guest_country = $4, status = $5, payment_id = $6, payment_settled = $7, \
             payment_confirmed_at = $8, refund_status = $9, approved_at = $10, \
             rejected_at = $11, cancelled_at = $12 \
             WHERE id = $13 AND status = $14",
        )
        .bind(&reservation.guest.name)
        .bind(&reservation.guest.email)
        .bind(&reservation.guest.phone)
        .bind(&reservation.guest.country)
        .bind(reservation.status.as_str())
        .bind(reservation.payment.as_ref().map(|p| p.payment_id.clone()))
        .bind(reservation.payment.as_ref().map(|p| p.settled))
        .bind(reservation.payment.as_ref().map(|p| p.confirmed_at))
        .bind(reservation.refund_status.as_str())
        .bind(reservation.approved_at)
        .bind(reservation.rejected_at)
        .bind(reservation.cancelled_at)
        .bind(reservation.id)
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::StaleState);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ranges_for_room(
        &self,
        room_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReservedRange>, StoreError> {
        let rows = sqlx::query(
            "SELECT check_in, check_out, status FROM reservations \
             WHERE room_id = $1 \
               AND status IN ('IN_PROGRESS', 'PENDING_APPROVAL', 'APPROVED') \
               AND NOT (status = 'IN_PROGRESS' AND hold_expires_at <= $2)",
        )
        .bind(room_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter()
            .map(|row| {
                let status: String = row.get("status");
                Ok(ReservedRange {
                    check_in: row.get("check_in"),
                    check_out: row.get("check_out"),
                    status: ReservationStatus::from_str(&status).map_err(StoreError::Backend)?,
                })
            })
            .collect()
    }
}
