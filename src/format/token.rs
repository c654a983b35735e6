// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The date token vocabulary.
//!
//! | Spelling | Field | Notes |
//! |----------|-------|-------|
//! | `YYYY` `YYY` `YY` | year | `YYY` reads 2 or 4 digits; 2-digit years pivot at 50 |
//! | `MM` `M` | month | padded / unpadded |
//! | `MON` `Mon` `mon` | month | short English name in three cases |
//! | `MONTH` `Month` `month` | month | long English name in three cases |
//! | `DD` `D` | day of month | padded / unpadded |
//! | `HH` `H` | hour (24 h) | padded / unpadded |
//! | `hh` `h` | hour (12 h) | padded / unpadded |
//! | `mm` `m`, `ss` `s` | minute, second | padded / unpadded |
//! | `CC` `Cc` `cc` | hundredths | rendered rounded up / to nearest / down |
//! | `MMM` `mmm` | milliseconds | three digits |
//! | `AP` `Ap` `ap` | meridiem | upper / either / lower case |
//! | `WW` `W` | week number | weeks start on Monday |
//! | `ww` `w` | week number | weeks start on Sunday |
//! | `DW` `dw` | weekday number | Sunday is 7 / 0 |
//! | `DOW` `Dow` `dow`, `DAY` `Day` `day` | weekday | English name in three cases |

use super::fields::{Fields, Meridiem};
use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, Timelike, Weekday};

// ═══════════════════════════════════════════════════════════════════════════
// Granularity
// ═══════════════════════════════════════════════════════════════════════════

/// Ordered coarseness of the calendar fields, finest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Date,
    Month,
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 7] = [
        Granularity::Milliseconds,
        Granularity::Seconds,
        Granularity::Minutes,
        Granularity::Hours,
        Granularity::Date,
        Granularity::Month,
        Granularity::Year,
    ];

    /// Next finer level, `None` below milliseconds.
    pub fn finer(self) -> Option<Self> {
        Self::ALL.get((self as usize).checked_sub(1)?).copied()
    }

    /// Next coarser level, `None` above years.
    pub fn coarser(self) -> Option<Self> {
        Self::ALL.get(self as usize + 1).copied()
    }
}

/// Calendar field a token reads or writes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Hundredths,
    Millisecond,
    Meridiem,
    Week,
    Weekday,
}

// ═══════════════════════════════════════════════════════════════════════════
// Token
// ═══════════════════════════════════════════════════════════════════════════

/// Generate the `Token` enum together with its spelling table.
macro_rules! tokens {
    ($($variant:ident => $spelling:literal),+ $(,)?) => {
        /// An atomic date/time field placeholder.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum Token {
            $($variant),+
        }

        impl Token {
            /// Every token, in table order.
            pub const ALL: &'static [Token] = &[$(Token::$variant),+];

            /// The pattern substring that denotes this token.
            pub const fn spelling(&self) -> &'static str {
                match self {
                    $(Token::$variant => $spelling),+
                }
            }
        }
    };
}

tokens! {
    Year4 => "YYYY",
    Year2Or4 => "YYY",
    Year2 => "YY",
    Month2 => "MM",
    Month1 => "M",
    MonthShortUpper => "MON",
    MonthShort => "Mon",
    MonthShortLower => "mon",
    MonthLongUpper => "MONTH",
    MonthLong => "Month",
    MonthLongLower => "month",
    Day2 => "DD",
    Day1 => "D",
    Hour24Padded => "HH",
    Hour24 => "H",
    Hour12Padded => "hh",
    Hour12 => "h",
    Minute2 => "mm",
    Minute1 => "m",
    Second2 => "ss",
    Second1 => "s",
    HundredthsCeil => "CC",
    HundredthsRound => "Cc",
    HundredthsFloor => "cc",
    MillisUpper => "MMM",
    MillisLower => "mmm",
    MeridiemUpper => "AP",
    MeridiemAny => "Ap",
    MeridiemLower => "ap",
    WeekMonday2 => "WW",
    WeekMonday1 => "W",
    WeekSunday2 => "ww",
    WeekSunday1 => "w",
    WeekdayMonday => "DW",
    WeekdaySunday => "dw",
    WeekdayShortUpper => "DOW",
    WeekdayShort => "Dow",
    WeekdayShortLower => "dow",
    WeekdayLongUpper => "DAY",
    WeekdayLong => "Day",
    WeekdayLongLower => "day",
}

/// Letter case of name tokens.
#[derive(Copy, Clone)]
enum Case {
    Upper,
    Title,
    Lower,
}

impl Token {
    /// The token spelled exactly `spelling`, if any.
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.spelling() == spelling)
    }

    pub const fn field(&self) -> Field {
        use Token::*;
        match self {
            Year4 | Year2Or4 | Year2 => Field::Year,
            Month2 | Month1 | MonthShortUpper | MonthShort | MonthShortLower | MonthLongUpper
            | MonthLong | MonthLongLower => Field::Month,
            Day2 | Day1 => Field::Day,
            Hour24Padded | Hour24 | Hour12Padded | Hour12 => Field::Hour,
            Minute2 | Minute1 => Field::Minute,
            Second2 | Second1 => Field::Second,
            HundredthsCeil | HundredthsRound | HundredthsFloor => Field::Hundredths,
            MillisUpper | MillisLower => Field::Millisecond,
            MeridiemUpper | MeridiemAny | MeridiemLower => Field::Meridiem,
            WeekMonday2 | WeekMonday1 | WeekSunday2 | WeekSunday1 => Field::Week,
            WeekdayMonday | WeekdaySunday | WeekdayShortUpper | WeekdayShort
            | WeekdayShortLower | WeekdayLongUpper | WeekdayLong | WeekdayLongLower => {
                Field::Weekday
            }
        }
    }

    /// Position on the granularity scale; week and weekday tokens have none.
    pub const fn granularity(&self) -> Option<Granularity> {
        match self.field() {
            Field::Year => Some(Granularity::Year),
            Field::Month => Some(Granularity::Month),
            Field::Day => Some(Granularity::Date),
            Field::Hour | Field::Meridiem => Some(Granularity::Hours),
            Field::Minute => Some(Granularity::Minutes),
            Field::Second => Some(Granularity::Seconds),
            Field::Hundredths | Field::Millisecond => Some(Granularity::Milliseconds),
            Field::Week | Field::Weekday => None,
        }
    }

    /// Regular-expression class matched by this token when parsing.
    ///
    /// Tokens without a class are matched literally.
    pub const fn parse_class(&self) -> Option<&'static str> {
        use Token::*;
        Some(match self {
            Year4 => "[0-9]{4}",
            Year2Or4 => "[0-9]{2}([0-9]{2})?",
            Year2 => "[0-9]{2}",
            Month2 => "(0[1-9])|(1[012])",
            Month1 => "(0?[1-9])|(1[012])",
            MonthShortUpper => "JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC",
            MonthShort => "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec",
            MonthShortLower => "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec",
            MonthLongUpper => {
                "JANUARY|FEBRUARY|MARCH|APRIL|MAY|JUNE|JULY|AUGUST|SEPTEMBER|OCTOBER|NOVEMBER|DECEMBER"
            }
            MonthLong => {
                "January|February|March|April|May|June|July|August|September|October|November|December"
            }
            MonthLongLower => {
                "january|february|march|april|may|june|july|august|september|october|november|december"
            }
            Day2 => "(0[0-9])|([12][0-9])|(3[01])",
            Day1 => "(0?[0-9])|([12][0-9])|(3[01])",
            Hour24Padded => "([0-1][0-9])|(2[0-3])",
            Hour24 => "([0-1]?[0-9])|(2[0-3])",
            Hour12Padded => "(0[0-9])|(1[0-2])",
            Hour12 => "(0?[0-9])|(1[0-2])",
            Minute2 | Second2 => "[0-5][0-9]",
            Minute1 | Second1 => "[0-5]?[0-9]",
            HundredthsCeil | HundredthsRound | HundredthsFloor => "[0-9]{2}",
            MillisUpper | MillisLower => "[0-9]{3}",
            MeridiemUpper => "AM|PM",
            MeridiemAny => "AM|PM|am|pm",
            MeridiemLower => "am|pm",
            WeekMonday2 | WeekMonday1 | WeekSunday2 | WeekSunday1 | WeekdayMonday
            | WeekdaySunday | WeekdayShortUpper | WeekdayShort | WeekdayShortLower
            | WeekdayLongUpper | WeekdayLong | WeekdayLongLower => return None,
        })
    }

    /// Canonical padded spelling used to group equivalent detected formats.
    pub const fn root(&self) -> Token {
        use Token::*;
        match self {
            Month1 => Month2,
            Day1 => Day2,
            Hour24 | Hour12Padded | Hour12 => Hour24Padded,
            Minute1 => Minute2,
            Second1 => Second2,
            other => *other,
        }
    }

    /// Render this token from calendar components, padding with `zero`.
    pub fn render(&self, c: &NaiveDateTime, zero: char) -> String {
        use Token::*;
        let millis = c.nanosecond() / 1_000_000 % 1_000;
        match self {
            Year4 | Year2Or4 => pad_signed(c.year(), 4, zero),
            Year2 => pad(c.year().rem_euclid(100), 2, zero),
            Month2 => pad(c.month(), 2, zero),
            Month1 => c.month().to_string(),
            MonthShortUpper => named(c, "%b", Case::Upper),
            MonthShort => named(c, "%b", Case::Title),
            MonthShortLower => named(c, "%b", Case::Lower),
            MonthLongUpper => named(c, "%B", Case::Upper),
            MonthLong => named(c, "%B", Case::Title),
            MonthLongLower => named(c, "%B", Case::Lower),
            Day2 => pad(c.day(), 2, zero),
            Day1 => c.day().to_string(),
            Hour24Padded => pad(c.hour(), 2, zero),
            Hour24 => c.hour().to_string(),
            Hour12Padded => pad(c.hour12().1, 2, zero),
            Hour12 => c.hour12().1.to_string(),
            Minute2 => pad(c.minute(), 2, zero),
            Minute1 => c.minute().to_string(),
            Second2 => pad(c.second(), 2, zero),
            Second1 => c.second().to_string(),
            HundredthsCeil => pad(millis.div_ceil(10), 2, zero),
            HundredthsRound => pad((millis + 5) / 10, 2, zero),
            HundredthsFloor => pad(millis / 10, 2, zero),
            MillisUpper | MillisLower => pad(millis, 3, zero),
            MeridiemUpper | MeridiemAny => meridiem(c).to_owned(),
            MeridiemLower => meridiem(c).to_ascii_lowercase(),
            WeekMonday2 => pad(week_number(c, true), 2, zero),
            WeekMonday1 => week_number(c, true).to_string(),
            WeekSunday2 => pad(week_number(c, false), 2, zero),
            WeekSunday1 => week_number(c, false).to_string(),
            WeekdayMonday => c.weekday().number_from_monday().to_string(),
            WeekdaySunday => c.weekday().num_days_from_sunday().to_string(),
            WeekdayShortUpper => named(c, "%a", Case::Upper),
            WeekdayShort => named(c, "%a", Case::Title),
            WeekdayShortLower => named(c, "%a", Case::Lower),
            WeekdayLongUpper => named(c, "%A", Case::Upper),
            WeekdayLong => named(c, "%A", Case::Title),
            WeekdayLongLower => named(c, "%A", Case::Lower),
        }
    }

    /// Record a captured substring into `fields`.
    ///
    /// Returns `None` when `raw` is not a value of this token.
    pub(crate) fn apply(&self, raw: &str, fields: &mut Fields) -> Option<()> {
        use Token::*;
        match self.field() {
            Field::Year => {
                let year: i32 = raw.parse().ok()?;
                fields.year = Some(match self {
                    Year2Or4 | Year2 => pivot_year(year),
                    _ => year,
                });
            }
            Field::Month => {
                fields.month = Some(match self {
                    Month2 | Month1 => raw.parse().ok()?,
                    _ => month_from_name(raw)?,
                });
            }
            Field::Day => fields.day = Some(raw.parse().ok()?),
            Field::Hour => fields.hour = Some(raw.parse().ok()?),
            Field::Minute => fields.minute = Some(raw.parse().ok()?),
            Field::Second => fields.second = Some(raw.parse().ok()?),
            Field::Hundredths => fields.millisecond = Some(raw.parse::<u32>().ok()? * 10),
            Field::Millisecond => fields.millisecond = Some(raw.parse().ok()?),
            Field::Meridiem => {
                fields.meridiem = Some(if raw.eq_ignore_ascii_case("pm") {
                    Meridiem::Pm
                } else {
                    Meridiem::Am
                });
            }
            Field::Week | Field::Weekday => {}
        }
        Some(())
    }
}

/// Two-digit years below 50 belong to the 2000s, the rest to the 1900s.
fn pivot_year(year: i32) -> i32 {
    match year {
        0..=49 => year + 2000,
        50..=99 => year + 1900,
        _ => year,
    }
}

fn month_from_name(raw: &str) -> Option<u32> {
    (1u8..=12).find_map(|number| {
        let name = Month::try_from(number).ok()?.name();
        let matches = name.eq_ignore_ascii_case(raw)
            || name.get(..3).is_some_and(|short| short.eq_ignore_ascii_case(raw));
        matches.then_some(u32::from(number))
    })
}

/// Week of the year; week 1 holds January 1st.
///
/// With Sunday-start weeks a new week begins every Sunday. With Monday-start
/// weeks Sundays close the previous week, and a year that opens on a Sunday
/// counts that lone day as week 1.
pub(crate) fn week_number(c: &NaiveDateTime, monday_start: bool) -> u32 {
    let opening_weekday = NaiveDate::from_ymd_opt(c.year(), 1, 1)
        .map_or(0, |d| d.weekday().num_days_from_sunday());
    let mut week = (c.ordinal0() + opening_weekday) / 7 + 1;
    if monday_start {
        if c.weekday() == Weekday::Sun {
            week -= 1;
        }
        if opening_weekday == 0 {
            week += 1;
        }
    }
    week
}

fn meridiem(c: &NaiveDateTime) -> &'static str {
    if c.hour() < 12 {
        "AM"
    } else {
        "PM"
    }
}

fn named(c: &NaiveDateTime, spec: &str, case: Case) -> String {
    let name = c.format(spec).to_string();
    match case {
        Case::Upper => name.to_uppercase(),
        Case::Lower => name.to_lowercase(),
        Case::Title => {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => name,
            }
        }
    }
}

fn pad(value: impl ToString, width: usize, zero: char) -> String {
    let digits = value.to_string();
    let fill = width.saturating_sub(digits.chars().count());
    std::iter::repeat(zero).take(fill).chain(digits.chars()).collect()
}

fn pad_signed(value: i32, width: usize, zero: char) -> String {
    if value < 0 {
        format!("-{}", pad(value.unsigned_abs(), width, zero))
    } else {
        pad(value, width, zero)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
