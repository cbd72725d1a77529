use chrono::NaiveDate;
use roomstay_core::ReservedRange;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Check-out must be strictly after check-in")]
    InvalidDateRange,
}

/// Half-open interval overlap: `[a_in, a_out)` against `[b_in, b_out)`.
/// Check-out on another reservation's check-in day is not a conflict, so
/// back-to-back turnover stays bookable.
pub fn overlaps(a_in: NaiveDate, a_out: NaiveDate, b_in: NaiveDate, b_out: NaiveDate) -> bool {
    a_in < b_out && a_out > b_in
}

/// Whether a candidate range is free of conflicts for a room.
///
/// `existing` is the room's derived range view; terminal entries are
/// filtered here as well so a stale snapshot from a caller cannot block
/// dates that no longer should. A zero-night range is invalid input and is
/// rejected before any conflict scan runs.
pub fn is_range_available(
    check_in: NaiveDate,
    check_out: NaiveDate,
    existing: &[ReservedRange],
) -> Result<bool, AvailabilityError> {
    if check_out <= check_in {
        return Err(AvailabilityError::InvalidDateRange);
    }
    Ok(existing
        .iter()
        .filter(|r| !r.status.is_terminal())
        .all(|r| !overlaps(check_in, check_out, r.check_in, r.check_out)))
}

/// Occupied nights for the date-picker view. Read-only and advisory: the
/// authoritative conflict check happens at hold insertion, since picker
/// data can be stale by the time the guest submits.
pub fn blocked_dates(existing: &[ReservedRange]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = existing
        .iter()
        .filter(|r| !r.status.is_terminal())
        .flat_map(|r| r.check_in.iter_days().take_while(move |d| *d < r.check_out))
        .collect();
    dates.sort();
    dates.dedup();
    dates
}
