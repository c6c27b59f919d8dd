//! Timestamp helpers.

use chrono::{Duration, SecondsFormat, Utc};

/// Current UTC time as an ISO-8601 string with a trailing `Z`.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// UNIX-seconds expiry timestamp `days` days from now.
///
/// DynamoDB TTL expects epoch seconds.
pub fn expiry_epoch(days: i64) -> i64 {
    (Utc::now() + Duration::days(days)).timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_rfc3339_is_utc_zulu() {
        let ts = now_rfc3339();
        assert!(ts.ends_with('Z'));
        assert!(ts.contains('T'));
    }

    #[test]
    fn test_expiry_epoch_is_days_out() {
        let expected = Utc::now().timestamp() + 30 * 24 * 60 * 60;
        let actual = expiry_epoch(30);
        assert!((actual - expected).abs() <= 5);
    }
}
