use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_english::{parse_date_string, Dialect};
use chrono_tz::Tz;

/// Parses a reminder like "tomorrow 9am" relative to `now`, reading
/// wall-clock times in the user's timezone.
pub fn parse_reminder(input: &str, now: DateTime<Utc>, tz: &Tz) -> Result<DateTime<Utc>> {
    parse_date_string(input, now.with_timezone(tz), Dialect::Uk)
        .map(|local| local.with_timezone(&Utc))
        .map_err(|e| anyhow::anyhow!("Failed to parse reminder '{}': {}", input, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_absolute_reminder_uses_local_time() {
        let tz: Tz = "Europe/Paris".parse().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 8, 0, 0).unwrap();
        // Paris is UTC+2 in July.
        let reminder = parse_reminder("2026-07-03 18:00", now, &tz).unwrap();
        assert_eq!(reminder, Utc.with_ymd_and_hms(2026, 7, 3, 16, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_reminder_is_an_error() {
        let now = Utc::now();
        assert!(parse_reminder("whenever", now, &Tz::UTC).is_err());
    }
}
