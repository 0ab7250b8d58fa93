//! Availability engine. Enumerates bookable start times for one day.
//!
//! Pure and reentrant: identical inputs always yield identical output. The
//! engine never mutates the booked index, and past-date policy belongs to
//! the flow controller, not here.

use crate::domain::calendar::{BusinessCalendar, BusinessDay};
use crate::domain::entities::{BookedIndex, Slot, SlotKey};
use chrono::{Datelike, NaiveDate};

/// Candidate start minutes for one [`BusinessDay`], ascending.
///
/// The grid step is independent of the service duration: a 90-minute service
/// can start at any 30-minute mark, not only at marks aligned to 90.
pub fn legal_starts(day: &BusinessDay, duration_min: u32, step_min: u32) -> Vec<u32> {
    let BusinessDay::Open {
        start_min: open,
        end_min: close,
        breaks,
    } = day
    else {
        return Vec::new();
    };
    if duration_min == 0 || step_min == 0 || open + duration_min > *close {
        return Vec::new();
    }

    let mut starts = Vec::new();
    let mut start = *open;
    while start + duration_min <= *close {
        let end = start + duration_min;
        if !breaks
            .iter()
            .any(|&(bs, be)| crate::domain::clock::overlaps(start, end, bs, be))
        {
            starts.push(start);
        }
        start += step_min;
    }
    starts
}

/// Bookable slots for `date`, ascending by start time.
///
/// A closed day yields an empty sequence; callers that need to tell "closed"
/// from "fully booked" check [`BusinessCalendar::hours_for`] separately.
pub fn compute_slots(
    date: NaiveDate,
    duration_min: u32,
    step_min: u32,
    calendar: &BusinessCalendar,
    booked: &BookedIndex,
) -> Vec<Slot> {
    let day = calendar.hours_for(date.weekday());
    legal_starts(day, duration_min, step_min)
        .into_iter()
        .filter(|&start_min| !booked.contains(&SlotKey { date, start_min }))
        .map(|start_min| Slot {
            date,
            start_min,
            duration_min,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::BusinessCalendar;

    fn monday() -> NaiveDate {
        // 2026-03-02 is a Monday.
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 8).unwrap()
    }

    #[test]
    fn ninety_minute_service_straddles_the_lunch_break() {
        // Mon 09:00–17:00 with 12:00–13:00 break, 90-minute service: last
        // start before the break is 10:30 (ends 12:00), first after is 13:00.
        let slots = compute_slots(
            monday(),
            90,
            30,
            &BusinessCalendar::default(),
            &BookedIndex::new(),
        );
        let starts: Vec<u32> = slots.iter().map(|s| s.start_min).collect();
        assert!(starts.contains(&630)); // 10:30
        assert!(!starts.contains(&660)); // 11:00 would run into the break
        assert!(!starts.contains(&690));
        assert!(!starts.contains(&720));
        assert!(!starts.contains(&750));
        assert!(starts.contains(&780)); // 13:00
        let last = *starts.last().unwrap();
        assert_eq!(last, 15 * 60 + 30); // 15:30 + 90 = 17:00
    }

    #[test]
    fn saturday_sixty_minute_grid() {
        // Sat 10:00–16:00, no break, 60-minute service on a 30-minute grid:
        // every half hour from 10:00 through 15:00 inclusive.
        let slots = compute_slots(
            saturday(),
            60,
            30,
            &BusinessCalendar::default(),
            &BookedIndex::new(),
        );
        let starts: Vec<u32> = slots.iter().map(|s| s.start_min).collect();
        let expected: Vec<u32> = (600..=900).step_by(30).collect();
        assert_eq!(starts, expected);
    }

    #[test]
    fn closed_day_yields_empty_not_error() {
        let cal = BusinessCalendar::default();
        let slots = compute_slots(sunday(), 60, 30, &cal, &BookedIndex::new());
        assert!(slots.is_empty());
        // The caller distinguishes closed from fully booked via the calendar.
        assert!(cal.is_closed_on(sunday()));
        assert!(!cal.is_closed_on(saturday()));
    }

    #[test]
    fn booked_starts_are_excluded_exactly() {
        let cal = BusinessCalendar::default();
        let free = compute_slots(saturday(), 60, 30, &cal, &BookedIndex::new());
        let booked: BookedIndex = [
            SlotKey {
                date: saturday(),
                start_min: 600,
            },
            SlotKey {
                date: saturday(),
                start_min: 810,
            },
            // A different date must not shadow this one.
            SlotKey {
                date: monday(),
                start_min: 630,
            },
        ]
        .into_iter()
        .collect();

        let remaining = compute_slots(saturday(), 60, 30, &cal, &booked);
        let removed: Vec<u32> = free
            .iter()
            .copied()
            .filter(|s| !remaining.contains(s))
            .map(|s| s.start_min)
            .collect();
        assert_eq!(removed, vec![600, 810]);
    }

    #[test]
    fn never_overlaps_breaks_or_closing_across_configurations() {
        // Sweep over generated day shapes, durations and grids; no returned
        // start may overlap a break or run past closing.
        let days = [
            BusinessDay::Open {
                start_min: 540,
                end_min: 1020,
                breaks: vec![(720, 780)],
            },
            BusinessDay::Open {
                start_min: 480,
                end_min: 1080,
                breaks: vec![(600, 630), (840, 900)],
            },
            BusinessDay::Open {
                start_min: 600,
                end_min: 660,
                breaks: vec![],
            },
            BusinessDay::Closed,
        ];
        for day in &days {
            for duration in [15, 30, 45, 60, 90, 120] {
                for step in [15, 30, 60] {
                    for start in legal_starts(day, duration, step) {
                        let end = start + duration;
                        let BusinessDay::Open {
                            start_min,
                            end_min,
                            breaks,
                        } = day
                        else {
                            panic!("closed day produced start {start}");
                        };
                        assert!(start >= *start_min);
                        assert!(end <= *end_min, "{start}+{duration} passes closing");
                        for &(bs, be) in breaks {
                            assert!(
                                !crate::domain::clock::overlaps(start, end, bs, be),
                                "{start}+{duration} overlaps break {bs}..{be}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let cal = BusinessCalendar::default();
        let booked: BookedIndex = [SlotKey {
            date: monday(),
            start_min: 540,
        }]
        .into_iter()
        .collect();
        let a = compute_slots(monday(), 45, 30, &cal, &booked);
        let b = compute_slots(monday(), 45, 30, &cal, &booked);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_duration_and_zero_step_are_empty() {
        let cal = BusinessCalendar::default();
        assert!(compute_slots(monday(), 0, 30, &cal, &BookedIndex::new()).is_empty());
        assert!(compute_slots(monday(), 60, 0, &cal, &BookedIndex::new()).is_empty());
    }
}
