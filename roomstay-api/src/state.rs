use roomstay_booking::{HoldManager, PaymentReconciler, ReservationLifecycle};
use roomstay_core::ReservationRepository;
use roomstay_shared::Clock;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub holds: Arc<HoldManager>,
    pub lifecycle: Arc<ReservationLifecycle>,
    pub payments: Arc<PaymentReconciler>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub clock: Arc<dyn Clock>,
}
