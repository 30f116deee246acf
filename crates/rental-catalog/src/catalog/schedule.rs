use chrono::{DateTime, NaiveDate, NaiveDateTime};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parses a requested rental date.
///
/// Accepts `YYYY-MM-DD` (taken as midnight), a naive `YYYY-MM-DDTHH:MM:SS`
/// timestamp, or an RFC 3339 timestamp, which is converted to UTC.
pub fn parse_rental_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Requested rental period. Request-scoped, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl RentalWindow {
    /// Both dates must parse; ordering is not checked here.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(Self {
            start: parse_rental_date(start)?,
            end: parse_rental_date(end)?,
        })
    }

    pub fn is_ordered(&self) -> bool {
        self.start < self.end
    }

    /// Whole days covered by the window, rounding any partial day up.
    pub fn duration_days(&self) -> i64 {
        let millis = (self.end - self.start).num_milliseconds();
        let days = millis / MILLIS_PER_DAY;
        if millis % MILLIS_PER_DAY > 0 {
            days + 1
        } else {
            days
        }
    }
}
