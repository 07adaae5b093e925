//! Timestamp utilities.

use chrono::{DateTime, Utc};

/// A wrapper around DateTime<Utc> with a fixed log rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a new timestamp from the current time.
    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    /// Create a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Timestamp(dt)
    }

    /// Format for log line preambles: `2019-11-19 18:24:25,105`.
    pub fn to_asctime(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S,%3f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_asctime_format() {
        let dt = Utc.with_ymd_and_hms(2019, 11, 19, 18, 24, 25).unwrap()
            + chrono::Duration::milliseconds(105);
        assert_eq!(Timestamp::from_datetime(dt).to_asctime(), "2019-11-19 18:24:25,105");
    }

    #[test]
    fn test_asctime_pads_millis() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(Timestamp::from_datetime(dt).to_asctime(), "2024-01-02 03:04:05,000");
    }
}
