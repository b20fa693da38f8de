//! Mapping commit instants to weekday and time-of-day buckets.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};

use crate::histogram::Bucket;

// -------------------------------------------------------------------------------------------------
// TimeOfDay
// -------------------------------------------------------------------------------------------------
/// A six-hour slice of the day.
///
/// Ranges are half-open: `Morning` is `[06:00, 12:00)`, `Daytime` is `[12:00, 18:00)`, `Evening`
/// is `[18:00, 24:00)`, and `Night` is `[00:00, 06:00)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Morning,
    Daytime,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Daytime,
            18..=23 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

impl Bucket for TimeOfDay {
    const ALL: &'static [Self] = &[
        TimeOfDay::Morning,
        TimeOfDay::Daytime,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Daytime => "daytime",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

impl Bucket for Weekday {
    const ALL: &'static [Self] = &[
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    fn index(self) -> usize {
        self.num_days_from_monday() as usize
    }

    fn label(self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

/// Determine the weekday and time of day of `instant` as observed in time zone `tz`.
pub fn bucket_instant<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> (Weekday, TimeOfDay) {
    let local = instant.with_timezone(tz);
    (local.weekday(), TimeOfDay::from_hour(local.hour()))
}
