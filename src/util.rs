// Utility helpers for parsing and number formatting.
//
// Date and hour grammars are fixed; everything else in the crate works on
// already-typed values.
use chrono::{NaiveDate, NaiveTime};
use num_format::{Locale, ToFormattedString};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const HOUR_FORMAT: &str = "%H:%M";

/// Parse a shift date in `DD/MM/YYYY` form.
pub fn parse_shift_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Parse a time-of-day slot in `HH:MM` form.
pub fn parse_hour(s: &str) -> Option<NaiveTime> {
    if s.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(s, HOUR_FORMAT).ok()
}

pub fn format_shift_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Round to one decimal place, halves to even.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}

pub fn format_percent(p: f64) -> String {
    format!("{:.1}%", p)
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages (e.g. `9,855 shifts`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_grammars() {
        assert_eq!(
            parse_shift_date("31/12/2024"),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
        assert_eq!(parse_shift_date("2024-12-31"), None);
        assert_eq!(parse_shift_date(""), None);
        assert_eq!(parse_hour("08:00"), NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(parse_hour("8am"), None);
        assert_eq!(parse_hour("25:00"), None);
    }

    #[test]
    fn date_round_trips_through_formatter() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_shift_date(d), "05/01/2024");
        assert_eq!(parse_shift_date(&format_shift_date(d)), Some(d));
    }

    #[test]
    fn rounding_and_formatting() {
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(6.25), 6.2);
        assert_eq!(round1(6.75), 6.8);
        assert_eq!(format_percent(50.0), "50.0%");
        assert_eq!(format_int(12345usize), "12,345");
    }
}
