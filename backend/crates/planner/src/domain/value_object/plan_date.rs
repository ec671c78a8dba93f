//! Plan Dates
//!
//! Clients send either a calendar date or a full RFC 3339 timestamp.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{PlannerError, PlannerResult};

/// `YYYY-MM-DD` (midnight UTC) or RFC 3339. `field` names the input in the
/// error.
pub fn parse_date(raw: &str, field: &'static str) -> PlannerResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::default()).and_utc());
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| PlannerError::InvalidDate(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_date() {
        let dt = parse_date("2024-01-01", "startDate").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_rfc3339_is_normalized_to_utc() {
        let dt = parse_date("2024-03-31T10:00:00+02:00", "endDate").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-31T08:00:00+00:00");
    }

    #[test]
    fn test_garbage() {
        let err = parse_date("next tuesday", "weekStartDate").unwrap_err();
        assert_eq!(err.to_string(), "Invalid date for weekStartDate");
        assert!(parse_date("2024-13-01", "startDate").is_err());
    }
}
