//! Clock-time arithmetic. Minutes since midnight as the working unit.
//!
//! All business-hours and slot math happens on minute offsets; "HH:MM"
//! strings exist only at the edges (config, display).

use crate::domain::DomainError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parses a 24-hour "HH:MM" string into minutes since midnight.
///
/// Strict: the separator must be `:`, the hour 0–23, the minute 0–59.
pub fn to_minutes(clock: &str) -> Result<u32, DomainError> {
    let (h, m) = clock
        .split_once(':')
        .ok_or_else(|| DomainError::Parse(format!("expected HH:MM, got {clock:?}")))?;

    let hours: u32 = h
        .parse()
        .map_err(|_| DomainError::Parse(format!("bad hour in {clock:?}")))?;
    let minutes: u32 = m
        .parse()
        .map_err(|_| DomainError::Parse(format!("bad minute in {clock:?}")))?;

    if hours > 23 {
        return Err(DomainError::Parse(format!("hour {hours} out of 0..=23")));
    }
    if minutes > 59 {
        return Err(DomainError::Parse(format!("minute {minutes} out of 0..=59")));
    }

    Ok(hours * 60 + minutes)
}

/// Renders minutes since midnight as zero-padded "HH:MM".
pub fn to_clock_string(minutes: u32) -> Result<String, DomainError> {
    if minutes >= MINUTES_PER_DAY {
        return Err(DomainError::Range(format!(
            "{minutes} not within 0..{MINUTES_PER_DAY}"
        )));
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// 12-hour display form, e.g. 870 -> "2:30 PM". For summaries and operator
/// messages; never parsed back.
pub fn format_12h(minutes: u32) -> String {
    let hours = minutes / 60 % 24;
    let mins = minutes % 60;
    let period = if hours >= 12 { "PM" } else { "AM" };
    let display = match hours {
        0 => 12,
        1..=12 => hours,
        _ => hours - 12,
    };
    format!("{display}:{mins:02} {period}")
}

/// Half-open interval overlap: `[a_start, a_end)` vs `[b_start, b_end)`.
/// Touching intervals (a_end == b_start) do not overlap.
pub fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && a_end > b_start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_clock_strings() {
        assert_eq!(to_minutes("00:00").unwrap(), 0);
        assert_eq!(to_minutes("09:00").unwrap(), 540);
        assert_eq!(to_minutes("12:30").unwrap(), 750);
        assert_eq!(to_minutes("23:59").unwrap(), 1439);
    }

    #[test]
    fn rejects_malformed_clock_strings() {
        for bad in ["", "9", "9-30", "24:00", "12:60", "ab:cd", "12:", ":30"] {
            assert!(
                matches!(to_minutes(bad), Err(DomainError::Parse(_))),
                "{bad:?} should fail to parse"
            );
        }
    }

    #[test]
    fn renders_and_bounds_clock_strings() {
        assert_eq!(to_clock_string(0).unwrap(), "00:00");
        assert_eq!(to_clock_string(630).unwrap(), "10:30");
        assert_eq!(to_clock_string(1439).unwrap(), "23:59");
        assert!(matches!(
            to_clock_string(1440),
            Err(DomainError::Range(_))
        ));
    }

    #[test]
    fn round_trips_every_minute_of_day() {
        for m in 0..MINUTES_PER_DAY {
            let s = to_clock_string(m).unwrap();
            assert_eq!(to_minutes(&s).unwrap(), m);
        }
    }

    #[test]
    fn twelve_hour_display() {
        assert_eq!(format_12h(0), "12:00 AM");
        assert_eq!(format_12h(540), "9:00 AM");
        assert_eq!(format_12h(720), "12:00 PM");
        assert_eq!(format_12h(870), "2:30 PM");
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!overlaps(540, 600, 600, 660));
        assert!(!overlaps(600, 660, 540, 600));
        assert!(overlaps(540, 601, 600, 660));
        assert!(overlaps(500, 700, 540, 600));
    }
}
