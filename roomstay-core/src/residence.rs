use roomstay_shared::Money;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A property with one or more rentable rooms. Admin CRUD lives outside the
/// engine; the engine only ever reads rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Residence {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub residence_id: Uuid,
    pub name: String,
    /// Current nightly rate. Reservations snapshot this at hold creation and
    /// never read it again.
    pub nightly_rate: Money,
}
