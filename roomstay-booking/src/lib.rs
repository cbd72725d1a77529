pub mod availability;
pub mod hold;
pub mod lifecycle;
pub mod payment;
pub mod refund;

pub use availability::{is_range_available, AvailabilityError};
pub use hold::{load_current, HoldError, HoldManager, HoldRequest};
pub use lifecycle::{CancelParty, ReservationLifecycle, TransitionError};
pub use payment::{PaymentError, PaymentReconciler};
pub use refund::{RefundError, RefundPolicy};
