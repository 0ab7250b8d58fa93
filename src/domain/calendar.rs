//! Weekly business calendar. Per-weekday open window and breaks.
//!
//! Answers "is this window legal on this weekday"; slot enumeration lives in
//! [`crate::domain::availability`].

use crate::domain::clock::overlaps;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// One weekday's hours. Minutes since midnight; breaks are ordered and
/// non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BusinessDay {
    Closed,
    Open {
        start_min: u32,
        end_min: u32,
        breaks: Vec<(u32, u32)>,
    },
}

impl BusinessDay {
    pub fn is_closed(&self) -> bool {
        matches!(self, BusinessDay::Closed)
    }
}

/// Seven [`BusinessDay`]s keyed by weekday. Read-only after construction;
/// shared freely across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCalendar {
    /// Indexed by `Weekday::num_days_from_monday()`.
    days: [BusinessDay; 7],
}

impl Default for BusinessCalendar {
    /// Mon–Fri 09:00–17:00 with a 12:00–13:00 lunch break, Sat 10:00–16:00,
    /// Sun closed.
    fn default() -> Self {
        let weekday = BusinessDay::Open {
            start_min: 9 * 60,
            end_min: 17 * 60,
            breaks: vec![(12 * 60, 13 * 60)],
        };
        let saturday = BusinessDay::Open {
            start_min: 10 * 60,
            end_min: 16 * 60,
            breaks: vec![],
        };
        Self {
            days: [
                weekday.clone(),
                weekday.clone(),
                weekday.clone(),
                weekday.clone(),
                weekday,
                saturday,
                BusinessDay::Closed,
            ],
        }
    }
}

impl BusinessCalendar {
    pub fn new(days: [BusinessDay; 7]) -> Self {
        Self { days }
    }

    pub fn hours_for(&self, weekday: Weekday) -> &BusinessDay {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn is_closed_on(&self, date: NaiveDate) -> bool {
        self.hours_for(date.weekday()).is_closed()
    }

    /// True iff the day is open, the window fits inside the operating hours,
    /// and it overlaps no break interval.
    pub fn is_legal_window(&self, weekday: Weekday, start_min: u32, duration_min: u32) -> bool {
        match self.hours_for(weekday) {
            BusinessDay::Closed => false,
            BusinessDay::Open {
                start_min: open,
                end_min: close,
                breaks,
            } => {
                let end = start_min + duration_min;
                start_min >= *open
                    && end <= *close
                    && !breaks.iter().any(|&(bs, be)| overlaps(start_min, end, bs, be))
            }
        }
    }
}
