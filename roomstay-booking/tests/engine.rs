use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use roomstay_booking::{
    CancelParty, HoldError, HoldManager, HoldRequest, PaymentError, PaymentReconciler,
    RefundError, RefundPolicy, ReservationLifecycle, TransitionError,
};
use roomstay_core::{
    GatewayError, GuestDetails, ProviderRefundStatus, RefundGateway, RefundStatus, Reservation,
    ReservationRepository, ReservationStatus, ReservedRange, Room, StoreError,
};
use roomstay_shared::clock::property_local_date;
use roomstay_shared::{Currency, ExchangeRates, Money};
use roomstay_store::MemoryStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Refund gateway test double with a programmable outcome and a call
/// counter for at-most-once assertions.
struct StubGateway {
    outcome: Mutex<ProviderRefundStatus>,
    calls: AtomicUsize,
}

impl StubGateway {
    fn new(outcome: ProviderRefundStatus) -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(outcome),
            calls: AtomicUsize::new(0),
        })
    }

    fn set_outcome(&self, outcome: ProviderRefundStatus) {
        *self.outcome.lock().unwrap() = outcome;
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RefundGateway for StubGateway {
    async fn refund(
        &self,
        _payment_id: &str,
        _amount: Money,
    ) -> Result<ProviderRefundStatus, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(*self.outcome.lock().unwrap())
    }
}

struct Engine {
    store: Arc<MemoryStore>,
    gateway: Arc<StubGateway>,
    holds: HoldManager,
    lifecycle: ReservationLifecycle,
    payments: PaymentReconciler,
    room: Room,
}

fn engine_with_hold_duration(hold_duration: Duration) -> Engine {
    let store = Arc::new(MemoryStore::new());
    let gateway = StubGateway::new(ProviderRefundStatus::Succeeded);

    let room = Room {
        id: Uuid::new_v4(),
        residence_id: Uuid::new_v4(),
        name: "Garden Room".to_string(),
        nightly_rate: Money::new(5_000, Currency::Usd), // $50.00/night
    };
    store.insert_room(room.clone());

    let rates = ExchangeRates::new(HashMap::from([(Currency::Usd, 0.00075)]));
    let holds = HoldManager::new(store.clone(), store.clone(), rates, hold_duration);
    let refunds = RefundPolicy::new(store.clone(), gateway.clone());
    let lifecycle = ReservationLifecycle::new(store.clone(), refunds);
    let payments = PaymentReconciler::new(store.clone());

    Engine {
        store,
        gateway,
        holds,
        lifecycle,
        payments,
        room,
    }
}

fn engine() -> Engine {
    engine_with_hold_duration(Duration::minutes(10))
}

fn guest() -> GuestDetails {
    GuestDetails {
        name: "Mina Cho".to_string(),
        email: "mina@example.com".to_string(),
        phone: Some("+82-10-0000-0000".to_string()),
        country: Some("KR".to_string()),
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn request(room_id: Uuid, check_in: NaiveDate, check_out: NaiveDate) -> HoldRequest {
    HoldRequest {
        room_id,
        check_in,
        check_out,
        guest: guest(),
        display_currency: None,
    }
}

/// Dates comfortably after today in property-local time, so cancellation
/// cutoff tests are not time-of-run dependent.
fn future_range(now: DateTime<Utc>, nights: i64) -> (NaiveDate, NaiveDate) {
    let check_in = property_local_date(now) + Duration::days(30);
    (check_in, check_in + Duration::days(nights))
}

#[tokio::test]
async fn test_happy_path_hold_pay_approve() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 3);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    assert_eq!(r.status, ReservationStatus::InProgress);
    assert_eq!(r.total_nights, 3);
    assert_eq!(r.total_price, Money::new(15_000, Currency::Usd)); // $150.00
    assert_eq!(r.hold_expires_at, now + Duration::minutes(10));

    let r = e
        .payments
        .confirm_payment(r.id, "pay-123", "DONE", now + Duration::minutes(1))
        .await
        .unwrap();
    assert_eq!(r.status, ReservationStatus::PendingApproval);
    assert!(r.payment.as_ref().unwrap().settled);

    let approved_at = now + Duration::minutes(5);
    let r = e.lifecycle.approve(r.id, approved_at).await.unwrap();
    assert_eq!(r.status, ReservationStatus::Approved);
    assert_eq!(r.approved_at, Some(approved_at));
    assert_eq!(r.rejected_at, None);
    assert_eq!(r.cancelled_at, None);
}

#[tokio::test]
async fn test_conflicting_hold_rejected_adjacent_allowed() {
    let e = engine();
    let now = Utc::now();

    let first = e
        .holds
        .create_hold(request(e.room.id, d(2027, 6, 10), d(2027, 6, 15)), now)
        .await
        .unwrap();
    let first = e
        .payments
        .confirm_payment(first.id, "pay-1", "DONE", now)
        .await
        .unwrap();
    e.lifecycle.approve(first.id, now).await.unwrap();

    let err = e
        .holds
        .create_hold(request(e.room.id, d(2027, 6, 12), d(2027, 6, 14)), now)
        .await
        .unwrap_err();
    assert!(matches!(err, HoldError::DateRangeConflict));

    // Back-to-back with the approved stay.
    e.holds
        .create_hold(request(e.room.id, d(2027, 6, 15), d(2027, 6, 18)), now)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_expired_hold_cannot_pay() {
    let e = engine_with_hold_duration(Duration::seconds(1));
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();

    let after_expiry = now + Duration::seconds(2);
    let err = e
        .payments
        .confirm_payment(r.id, "pay-1", "DONE", after_expiry)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::ReservationUnavailable));

    // Expiry is monotonic: every later read observes Expired.
    let read = e.lifecycle.get(r.id, after_expiry).await.unwrap();
    assert_eq!(read.status, ReservationStatus::Expired);
    let read = e
        .lifecycle
        .get(r.id, after_expiry + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(read.status, ReservationStatus::Expired);

    // And the released dates are bookable again.
    e.holds
        .create_hold(request(e.room.id, check_in, check_out), after_expiry)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_payment_confirmation_is_idempotent() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();

    let first = e
        .payments
        .confirm_payment(r.id, "pay-9", "DONE", now)
        .await
        .unwrap();
    let replay = e
        .payments
        .confirm_payment(r.id, "pay-9", "DONE", now + Duration::seconds(30))
        .await
        .unwrap();
    assert_eq!(replay.status, ReservationStatus::PendingApproval);
    assert_eq!(replay.payment, first.payment);

    // A different payment id against the same reservation is not a replay.
    let err = e
        .payments
        .confirm_payment(r.id, "pay-10", "DONE", now)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::PaymentMismatch));
}

#[tokio::test]
async fn test_failed_payment_leaves_hold_retryable() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();

    let err = e
        .payments
        .confirm_payment(r.id, "pay-1", "FAILED", now)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::ProviderDeclined));

    let read = e.lifecycle.get(r.id, now).await.unwrap();
    assert_eq!(read.status, ReservationStatus::InProgress);

    // Retry before the hold lapses succeeds.
    let r = e
        .payments
        .confirm_payment(r.id, "pay-2", "DONE", now + Duration::minutes(1))
        .await
        .unwrap();
    assert_eq!(r.status, ReservationStatus::PendingApproval);
}

#[tokio::test]
async fn test_same_day_cancellation_blocked() {
    let e = engine();
    let now = Utc::now();
    let check_in = property_local_date(now);
    let check_out = check_in + Duration::days(3);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    let r = e
        .payments
        .confirm_payment(r.id, "pay-1", "DONE", now)
        .await
        .unwrap();
    let r = e.lifecycle.approve(r.id, now).await.unwrap();

    let err = e
        .lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap_err();
    assert!(matches!(err, RefundError::CheckInReached));

    let read = e.lifecycle.get(r.id, now).await.unwrap();
    assert_eq!(read.status, ReservationStatus::Approved);
    assert_eq!(e.gateway.call_count(), 0);
}

#[tokio::test]
async fn test_refund_is_at_most_once() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    let r = e
        .payments
        .confirm_payment(r.id, "pay-1", "DONE", now)
        .await
        .unwrap();
    let r = e.lifecycle.approve(r.id, now).await.unwrap();

    let cancelled = e
        .lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(cancelled.refund_status, RefundStatus::Succeeded);
    assert!(cancelled.cancelled_at.is_some());

    let err = e
        .lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap_err();
    assert!(matches!(err, RefundError::AlreadyRefunded));
    assert_eq!(e.gateway.call_count(), 1);
}

#[tokio::test]
async fn test_unsettled_payment_blocks_cancellation() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    // Captured but not yet settled by the provider.
    let r = e
        .payments
        .confirm_payment(r.id, "pay-1", "IN_PROGRESS", now)
        .await
        .unwrap();
    assert!(!r.payment.as_ref().unwrap().settled);

    let err = e
        .lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap_err();
    assert!(matches!(err, RefundError::PaymentNotSettled));

    // The settlement signal lands as a replay of the same payment id.
    let r = e
        .payments
        .confirm_payment(r.id, "pay-1", "DONE", now + Duration::minutes(2))
        .await
        .unwrap();
    assert!(r.payment.as_ref().unwrap().settled);

    let cancelled = e
        .lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
}

#[tokio::test]
async fn test_refund_failure_keeps_reservation_and_allows_retry() {
    let e = engine();
    e.gateway.set_outcome(ProviderRefundStatus::Failed);
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    let r = e
        .payments
        .confirm_payment(r.id, "pay-1", "DONE", now)
        .await
        .unwrap();
    let r = e.lifecycle.approve(r.id, now).await.unwrap();

    let err = e
        .lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap_err();
    assert!(matches!(err, RefundError::RefundFailed));

    let read = e.lifecycle.get(r.id, now).await.unwrap();
    assert_eq!(read.status, ReservationStatus::Approved);
    assert_eq!(read.refund_status, RefundStatus::Failed);

    // Provider recovers; the guest retries.
    e.gateway.set_outcome(ProviderRefundStatus::Succeeded);
    let cancelled = e
        .lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(cancelled.refund_status, RefundStatus::Succeeded);
}

#[tokio::test]
async fn test_refund_pending_still_cancels() {
    let e = engine();
    e.gateway.set_outcome(ProviderRefundStatus::Pending);
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    let r = e
        .payments
        .confirm_payment(r.id, "pay-1", "DONE", now)
        .await
        .unwrap();

    let cancelled = e
        .lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(cancelled.refund_status, RefundStatus::Pending);
}

#[tokio::test]
async fn test_rejection_refunds_captured_payment() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    let r = e
        .payments
        .confirm_payment(r.id, "pay-1", "DONE", now)
        .await
        .unwrap();

    let rejected = e.lifecycle.reject(r.id, now).await.unwrap();
    assert_eq!(rejected.status, ReservationStatus::Rejected);
    assert_eq!(rejected.rejected_at, Some(now));
    assert_eq!(rejected.refund_status, RefundStatus::Succeeded);
    assert_eq!(e.gateway.call_count(), 1);

    // Rejected dates no longer block the room.
    e.holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_price_snapshot_survives_rate_change() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 4);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    assert_eq!(r.total_price, Money::new(20_000, Currency::Usd));

    // Admin doubles the rate after the hold exists.
    let mut pricier = e.room.clone();
    pricier.nightly_rate = Money::new(10_000, Currency::Usd);
    e.store.insert_room(pricier);

    let read = e.lifecycle.get(r.id, now).await.unwrap();
    assert_eq!(read.total_price, Money::new(20_000, Currency::Usd));
    assert_eq!(read.nightly_rate, Money::new(5_000, Currency::Usd));
}

#[tokio::test]
async fn test_withdraw_only_before_payment() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    e.lifecycle.withdraw(r.id, now).await.unwrap();
    let err = e.lifecycle.get(r.id, now).await.unwrap_err();
    assert!(matches!(err, TransitionError::NotFound));

    // Once paid, withdrawal is no longer a defined transition.
    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    e.payments
        .confirm_payment(r.id, "pay-1", "DONE", now)
        .await
        .unwrap();
    let err = e.lifecycle.withdraw(r.id, now).await.unwrap_err();
    assert!(matches!(err, TransitionError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_guest_info_mutable_only_pre_payment() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();

    let mut updated = guest();
    updated.phone = Some("+82-10-1234-5678".to_string());
    let r2 = e
        .lifecycle
        .update_guest_info(r.id, updated.clone(), now)
        .await
        .unwrap();
    assert_eq!(r2.guest, updated);

    e.payments
        .confirm_payment(r.id, "pay-1", "DONE", now)
        .await
        .unwrap();
    let err = e
        .lifecycle
        .update_guest_info(r.id, guest(), now)
        .await
        .unwrap_err();
    assert!(matches!(err, TransitionError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_hold_rejects_bad_input() {
    let e = engine();
    let now = Utc::now();
    let (check_in, _) = future_range(now, 2);

    // Zero nights.
    let err = e
        .holds
        .create_hold(request(e.room.id, check_in, check_in), now)
        .await
        .unwrap_err();
    assert!(matches!(err, HoldError::InvalidDateRange));

    // Unknown room.
    let err = e
        .holds
        .create_hold(
            request(Uuid::new_v4(), check_in, check_in + Duration::days(1)),
            now,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, HoldError::RoomNotFound(_)));

    // Blank guest name.
    let mut req = request(e.room.id, check_in, check_in + Duration::days(1));
    req.guest.name = String::new();
    let err = e.holds.create_hold(req, now).await.unwrap_err();
    assert!(matches!(err, HoldError::MissingGuestField("name")));

    // Unsupported display currency.
    let mut req = request(e.room.id, check_in, check_in + Duration::days(1));
    req.display_currency = Some("GBP".to_string());
    let err = e.holds.create_hold(req, now).await.unwrap_err();
    assert!(matches!(err, HoldError::InvalidCurrency(_)));

    // Known currency with no configured rate.
    let mut req = request(e.room.id, check_in, check_in + Duration::days(1));
    req.display_currency = Some("EUR".to_string());
    let err = e.holds.create_hold(req, now).await.unwrap_err();
    assert!(matches!(err, HoldError::ExchangeRateUnavailable(Currency::Eur)));
}

#[tokio::test]
async fn test_settlement_replay_lands_after_approval() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);

    let r = e
        .holds
        .create_hold(request(e.room.id, check_in, check_out), now)
        .await
        .unwrap();
    // Captured but not yet settled when the host approves.
    let r = e
        .payments
        .confirm_payment(r.id, "pay-1", "IN_PROGRESS", now)
        .await
        .unwrap();
    let r = e.lifecycle.approve(r.id, now).await.unwrap();
    assert!(!r.payment.as_ref().unwrap().settled);

    // The settlement signal arrives late, as a replay of the same id.
    let r = e
        .payments
        .confirm_payment(r.id, "pay-1", "DONE", now + Duration::minutes(3))
        .await
        .unwrap();
    assert_eq!(r.status, ReservationStatus::Approved);
    assert!(r.payment.as_ref().unwrap().settled);

    // The recorded settlement unblocks cancellation with refund.
    let cancelled = e
        .lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(cancelled.refund_status, RefundStatus::Succeeded);
}

/// Wraps the in-memory store and slips a host approval in between the
/// cancellation's read and its write, once, so the cancellation loses its
/// compare-and-set exactly like a real concurrent transition.
struct ApproveRacingStore {
    inner: Arc<MemoryStore>,
    raced: AtomicBool,
}

#[async_trait]
impl ReservationRepository for ApproveRacingStore {
    async fn insert_hold(
        &self,
        reservation: &Reservation,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.inner.insert_hold(reservation, now).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Reservation>, StoreError> {
        self.inner.get(id).await
    }

    async fn update(
        &self,
        reservation: &Reservation,
        expected: ReservationStatus,
    ) -> Result<(), StoreError> {
        if reservation.status == ReservationStatus::Cancelled
            && expected == ReservationStatus::PendingApproval
            && !self.raced.swap(true, Ordering::SeqCst)
        {
            let mut approved = self
                .inner
                .get(reservation.id)
                .await?
                .ok_or(StoreError::NotFound)?;
            approved.status = ReservationStatus::Approved;
            approved.approved_at = Some(approved.created_at);
            self.inner
                .update(&approved, ReservationStatus::PendingApproval)
                .await?;
        }
        self.inner.update(reservation, expected).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }

    async fn ranges_for_room(
        &self,
        room_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReservedRange>, StoreError> {
        self.inner.ranges_for_room(room_id, now).await
    }
}

#[tokio::test]
async fn test_cancellation_losing_race_never_refunds_twice() {
    let store = Arc::new(MemoryStore::new());
    let racing = Arc::new(ApproveRacingStore {
        inner: store.clone(),
        raced: AtomicBool::new(false),
    });
    let gateway = StubGateway::new(ProviderRefundStatus::Succeeded);

    let room = Room {
        id: Uuid::new_v4(),
        residence_id: Uuid::new_v4(),
        name: "Garden Room".to_string(),
        nightly_rate: Money::new(5_000, Currency::Usd),
    };
    store.insert_room(room.clone());

    let rates = ExchangeRates::new(HashMap::from([(Currency::Usd, 0.00075)]));
    let holds = HoldManager::new(store.clone(), racing.clone(), rates, Duration::minutes(10));
    let refunds = RefundPolicy::new(racing.clone(), gateway.clone());
    let lifecycle = ReservationLifecycle::new(racing.clone(), refunds);
    let payments = PaymentReconciler::new(racing.clone());

    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 2);
    let r = holds
        .create_hold(request(room.id, check_in, check_out), now)
        .await
        .unwrap();
    let r = payments
        .confirm_payment(r.id, "pay-1", "DONE", now)
        .await
        .unwrap();

    // The guest cancels from PendingApproval; the host's approval lands
    // first, so the cancellation write loses. The refund the provider
    // already accepted must still end up on the reservation.
    let cancelled = lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(cancelled.refund_status, RefundStatus::Succeeded);
    assert!(cancelled.cancelled_at.is_some());
    assert_eq!(gateway.call_count(), 1);

    // A retry sees the recorded refund and never reaches the provider.
    let err = lifecycle
        .cancel(r.id, CancelParty::Guest, now)
        .await
        .unwrap_err();
    assert!(matches!(err, RefundError::AlreadyRefunded));
    assert_eq!(gateway.call_count(), 1);
}

#[tokio::test]
async fn test_hold_converts_currency_once() {
    let e = engine();
    let now = Utc::now();
    let (check_in, check_out) = future_range(now, 3);

    // Room priced in USD, guest pays in KRW: $50 / 0.00075 = 66,667 KRW.
    let mut req = request(e.room.id, check_in, check_out);
    req.display_currency = Some("KRW".to_string());
    let r = e.holds.create_hold(req, now).await.unwrap();
    assert_eq!(r.nightly_rate, Money::new(66_667, Currency::Krw));
    assert_eq!(r.total_price, Money::new(200_001, Currency::Krw));
}
