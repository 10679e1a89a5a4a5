//! # Time Formatting
//!
//! Clock-style rendering of in-game seconds.

use chrono::NaiveTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const SECONDS_PER_DAY: u128 = 24 * 60 * 60;

/// Formats whole seconds as `HH:MM:SS`.
///
/// The fractional part is truncated, negative values clamp to zero and the
/// clock wraps every 24 hours.
///
/// # Examples
///
/// ```
/// use cavern::format_clock;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_clock(Decimal::new(36615, 1)), "01:01:01");
/// assert_eq!(format_clock(Decimal::from(-5)), "00:00:00");
/// ```
pub fn format_clock(seconds: Decimal) -> String {
    let whole = whole_seconds(seconds) % SECONDS_PER_DAY;
    // `whole` is below one day, so this never falls back.
    let time =
        NaiveTime::from_num_seconds_from_midnight_opt(whole as u32, 0).unwrap_or_default();
    time.format("%H:%M:%S").to_string()
}

/// Formats a duration as `HH:MM:SS` without wrapping.
///
/// Hours keep counting past 24 and widen as needed. Like [`format_clock`],
/// the fraction is truncated and negative values clamp to zero.
///
/// ```
/// use cavern::format_duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_duration(Decimal::new(36615, 1)), "01:01:01");
/// assert_eq!(format_duration(Decimal::from(360_000)), "100:00:00");
/// ```
pub fn format_duration(seconds: Decimal) -> String {
    let whole = whole_seconds(seconds);
    format!(
        "{:02}:{:02}:{:02}",
        whole / 3600,
        whole % 3600 / 60,
        whole % 60
    )
}

fn whole_seconds(seconds: Decimal) -> u128 {
    seconds.trunc().to_u128().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_clock(Decimal::ZERO), "00:00:00");
    }

    #[test]
    fn test_format_truncates_fraction() {
        let seconds = Decimal::from_str("159.098765432").unwrap();
        assert_eq!(format_clock(seconds), "00:02:39");
    }

    #[test]
    fn test_format_wraps_after_a_day() {
        let seconds = Decimal::from_str("123456.0987654321").unwrap();
        assert_eq!(format_clock(seconds), "10:17:36");
    }

    #[test]
    fn test_duration_keeps_counting_hours() {
        let seconds = Decimal::from_str("123456.0987654321").unwrap();
        assert_eq!(format_duration(seconds), "34:17:36");
        assert_eq!(format_duration(Decimal::from_str("-0.5").unwrap()), "00:00:00");
    }

    #[test]
    fn test_huge_values_do_not_collapse_to_zero() {
        assert_eq!(format_duration(Decimal::MAX), "22007822920628982664873319:32:15");
        assert_eq!(format_clock(Decimal::MAX), "23:32:15");
    }
}
