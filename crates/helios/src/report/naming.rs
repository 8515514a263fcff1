//! Report file names
//!
//! `<ticker>_<timestamp>.json` and `portfolio_summary_<timestamp>.json`, where
//! the timestamp is ISO-8601 with microseconds and `:` replaced by `-`.

use chrono::{DateTime, Utc};

pub const SUMMARY_PREFIX: &str = "portfolio_summary_";

/// ISO-8601 timestamp as written into report metadata
pub fn iso_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Timestamp form usable in file names on every platform
pub fn file_safe_timestamp(ts: DateTime<Utc>) -> String {
    iso_timestamp(ts).replace(':', "-")
}

/// Keep tickers from escaping the reports directory or adding `_` separators.
/// Leading dots are replaced too so no report becomes a hidden file.
pub fn sanitize_ticker(ticker: &str) -> String {
    let mut leading = true;
    ticker
        .trim()
        .chars()
        .map(|c| {
            leading &= c == '.';
            if leading {
                '-'
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

pub fn report_file_name(ticker: &str, ts: DateTime<Utc>) -> String {
    format!("{}_{}.json", sanitize_ticker(ticker), file_safe_timestamp(ts))
}

pub fn summary_file_name(ts: DateTime<Utc>) -> String {
    format!("{SUMMARY_PREFIX}{}.json", file_safe_timestamp(ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 14, 3, 9).unwrap()
            + chrono::Duration::microseconds(42)
    }

    #[test]
    fn test_iso_timestamp_keeps_colons() {
        assert_eq!(iso_timestamp(ts()), "2024-05-17T14:03:09.000042");
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name("AAPL", ts()),
            "AAPL_2024-05-17T14-03-09.000042.json"
        );
        assert!(!report_file_name("AAPL", ts()).contains(':'));
    }

    #[test]
    fn test_summary_file_name() {
        assert_eq!(
            summary_file_name(ts()),
            "portfolio_summary_2024-05-17T14-03-09.000042.json"
        );
    }

    #[test]
    fn test_distinct_tickers_get_distinct_names() {
        let names: std::collections::HashSet<_> = ["AAPL", "MSFT", "BRK.B", "^GSPC", "aapl"]
            .iter()
            .map(|t| report_file_name(t, ts()))
            .collect();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_sanitize_blocks_separators() {
        assert_eq!(sanitize_ticker("../etc/passwd"), "---etc-passwd");
        assert_eq!(sanitize_ticker("..X"), "--X");
        assert_eq!(sanitize_ticker("BRK.B"), "BRK.B");
        assert_eq!(sanitize_ticker("BRK_B"), "BRK-B");
        assert_eq!(sanitize_ticker(" EURUSD=X "), "EURUSD=X");
    }
}
