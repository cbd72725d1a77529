use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Source of "now" for the engine. All stored instants are UTC; handlers
/// read the clock once per request and thread the instant through, so a
/// reservation operation sees a single consistent time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The properties all sit in one timezone (KST, UTC+9). Check-in/check-out
/// are calendar dates in that zone, so "has check-in day arrived" must be
/// answered against the property-local date, not the UTC date.
pub fn property_offset() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("fixed +09:00 offset is valid")
}

/// Calendar date at the property for a given UTC instant.
pub fn property_local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&property_offset()).date_naive()
}
