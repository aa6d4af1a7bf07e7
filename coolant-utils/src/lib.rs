//! Shared utility functions for Coolant Pro crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// ISO-8601 calendar date format used for persisted service dates.
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)?)
    }

    /// Parse a date string in "YYYYMMDD" format (compact spreadsheet exports)
    pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y%m%d")?)
    }

    /// Parse either an ISO date or a compact date, ISO first.
    pub fn parse_date_lenient(s: &str) -> anyhow::Result<NaiveDate> {
        parse_date(s).or_else(|_| parse_date_compact(s))
    }

    /// Today's date in local time.
    pub fn today() -> NaiveDate {
        chrono::Local::now().naive_local().date()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_lenient_accepts_compact() {
            let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
            assert_eq!(parse_date_lenient("20240229").unwrap(), date);
            assert_eq!(parse_date_lenient(" 2024-02-29 ").unwrap(), date);
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse_date("2024-13-01").is_err());
            assert!(parse_date_lenient("yesterday").is_err());
        }
    }
}

/// Decimal rounding helpers
pub mod numbers {
    /// Round `value` to `places` decimal digits, half away from zero.
    ///
    /// `round_to(2.345, 2)` is `2.35`; `round_to(-2.345, 2)` is `-2.35`
    /// (subject to the binary representation of the input).
    pub fn round_to(value: f64, places: u32) -> f64 {
        let factor = 10f64.powi(places as i32);
        (value * factor).round() / factor
    }

}
