// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Partial calendar readings captured from text.

use super::token::Granularity;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

/// What to do when a captured day does not exist in the target month.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DayOverflow {
    /// The overlay fails.
    Reject,
    /// The day is pulled back to the last day of the month.
    Clamp,
}

/// Calendar fields named by a pattern; `None` keeps the base value.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Fields {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub millisecond: Option<u32>,
    pub meridiem: Option<Meridiem>,
}

impl Fields {
    /// `true` when no field was captured.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reset the field at `level` to its origin: months and days to 1,
    /// everything else to 0.
    pub fn reset(&mut self, level: Granularity) {
        match level {
            Granularity::Year => self.year = Some(0),
            Granularity::Month => self.month = Some(1),
            Granularity::Date => self.day = Some(1),
            Granularity::Hours => {
                self.hour = Some(0);
                self.meridiem = None;
            }
            Granularity::Minutes => self.minute = Some(0),
            Granularity::Seconds => self.second = Some(0),
            Granularity::Milliseconds => self.millisecond = Some(0),
        }
    }

    /// Reset `level` and every finer level.
    pub fn reset_from(&mut self, level: Granularity) {
        let mut next = Some(level);
        while let Some(current) = next {
            self.reset(current);
            next = current.finer();
        }
    }

    /// Replace the captured fields of `base`.
    ///
    /// A meridiem moves the (captured or base) hour into the right half of
    /// the day: `PM` adds 12 to hours below 12 and `AM` turns 12 into 0.
    pub fn overlay(&self, base: NaiveDateTime, policy: DayOverflow) -> Option<NaiveDateTime> {
        let year = self.year.unwrap_or(base.year());
        let month = self.month.unwrap_or(base.month());
        let day = self.day.unwrap_or(base.day());

        let date = match policy {
            DayOverflow::Reject => NaiveDate::from_ymd_opt(year, month, day)?,
            DayOverflow::Clamp => {
                let last = last_day_of_month(year, month)?;
                NaiveDate::from_ymd_opt(year, month, day.clamp(1, last))?
            }
        };

        let mut hour = self.hour.unwrap_or(base.hour());
        match self.meridiem {
            Some(Meridiem::Pm) if hour < 12 => hour += 12,
            Some(Meridiem::Am) if hour == 12 => hour = 0,
            _ => {}
        }
        let time = NaiveTime::from_hms_milli_opt(
            hour,
            self.minute.unwrap_or(base.minute()),
            self.second.unwrap_or(base.second()),
            self.millisecond
                .unwrap_or(base.nanosecond() / 1_000_000 % 1_000),
        )?;
        Some(date.and_time(time))
    }

    /// Clamping overlay that fails when the captured day itself would move.
    ///
    /// Days taken from `base` still clamp, so `MM = 02` over January 31st
    /// gives February's last day while `DD = 31` over February fails.
    pub fn overlay_exact(&self, base: NaiveDateTime) -> Option<NaiveDateTime> {
        let reading = self.overlay(base, DayOverflow::Clamp)?;
        self.day.map_or(true, |day| reading.day() == day).then_some(reading)
    }
}

/// Number of days in `month` of `year`, `None` for an invalid month.
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, 31)
            .unwrap()
            .and_hms_milli_opt(10, 20, 30, 400)
            .unwrap()
    }

    #[test]
    fn test_empty_overlay_is_identity() {
        let fields = Fields::default();
        assert!(fields.is_empty());
        assert_eq!(fields.overlay(base(), DayOverflow::Reject), Some(base()));
    }

    #[test]
    fn test_overlay_replaces_named_fields() {
        let fields = Fields {
            hour: Some(7),
            second: Some(0),
            ..Fields::default()
        };
        let got = fields.overlay(base(), DayOverflow::Reject).unwrap();
        assert_eq!(got.hour(), 7);
        assert_eq!(got.minute(), 20);
        assert_eq!(got.second(), 0);
        assert_eq!(got.day(), 31);
    }

    #[test]
    fn test_day_overflow_policies() {
        let fields = Fields {
            month: Some(2),
            ..Fields::default()
        };
        assert_eq!(fields.overlay(base(), DayOverflow::Reject), None);
        let clamped = fields.overlay(base(), DayOverflow::Clamp).unwrap();
        assert_eq!((clamped.month(), clamped.day()), (2, 28));
    }

    #[test]
    fn test_exact_overlay_keeps_captured_day() {
        let month = Fields {
            month: Some(2),
            ..Fields::default()
        };
        let clamped = month.overlay_exact(base()).unwrap();
        assert_eq!((clamped.month(), clamped.day()), (2, 28));

        let day = Fields {
            day: Some(31),
            month: Some(4),
            ..Fields::default()
        };
        assert_eq!(day.overlay_exact(base()), None);
        let day = Fields {
            day: Some(30),
            month: Some(4),
            ..Fields::default()
        };
        assert_eq!(day.overlay_exact(base()).unwrap().day(), 30);
    }

    #[test]
    fn test_meridiem_adjustment() {
        let pm = Fields {
            hour: Some(3),
            meridiem: Some(Meridiem::Pm),
            ..Fields::default()
        };
        assert_eq!(pm.overlay(base(), DayOverflow::Reject).unwrap().hour(), 15);
        let noon = Fields {
            hour: Some(12),
            meridiem: Some(Meridiem::Pm),
            ..Fields::default()
        };
        assert_eq!(noon.overlay(base(), DayOverflow::Reject).unwrap().hour(), 12);
        let midnight = Fields {
            hour: Some(12),
            meridiem: Some(Meridiem::Am),
            ..Fields::default()
        };
        assert_eq!(midnight.overlay(base(), DayOverflow::Reject).unwrap().hour(), 0);
    }

    #[test]
    fn test_reset_cascade() {
        let mut fields = Fields {
            hour: Some(9),
            ..Fields::default()
        };
        fields.reset_from(Granularity::Minutes);
        let got = fields.overlay(base(), DayOverflow::Reject).unwrap();
        assert_eq!(got.to_string(), "2021-03-31 09:00:00");

        let mut fields = Fields::default();
        fields.reset_from(Granularity::Month);
        let got = fields.overlay(base(), DayOverflow::Reject).unwrap();
        assert_eq!(got.to_string(), "2021-01-01 00:00:00");
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2020, 2), Some(29));
        assert_eq!(last_day_of_month(2100, 2), Some(28));
        assert_eq!(last_day_of_month(2021, 4), Some(30));
        assert_eq!(last_day_of_month(2021, 13), None);
    }
}
