// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Absolute instants at millisecond resolution.
//!
//! [`Instant`] is a count of milliseconds since 1970-01-01T00:00:00Z. It
//! is timezone independent: offsets only change how an instant is
//! rendered, never its value. Calendar components are obtained through
//! `chrono` ([`Instant::to_naive`]) and always describe the UTC reading of
//! the stored value; "local" readings are produced by shifting the
//! instant first (see [`TimezoneOffset`](crate::TimezoneOffset)).
//!
//! [`TimeUnit`] is the fixed multiplier table used by clock stepping.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// Milliseconds since the Unix epoch (UTC).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl Instant {
    /// The Unix epoch itself.
    pub const EPOCH: Self = Self(0);

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[inline]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Build from a `chrono::DateTime<Utc>`, truncating below the millisecond.
    #[inline]
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp_millis())
    }

    /// Convert to `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    #[inline]
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
    }

    /// Calendar components of this instant read as UTC.
    #[inline]
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        self.to_utc().map(|dt| dt.naive_utc())
    }

    /// Inverse of [`Instant::to_naive`].
    #[inline]
    pub fn from_naive(components: NaiveDateTime) -> Self {
        Self(components.and_utc().timestamp_millis())
    }

    /// Signed distance `other − self` in milliseconds.
    #[inline]
    pub const fn millis_until(&self, other: Self) -> i64 {
        other.0 - self.0
    }

    /// Shift by `amount` units.
    #[inline]
    pub const fn shifted(self, amount: i64, unit: TimeUnit) -> Self {
        Self(self.0 + amount * unit.millis())
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        Ord::min(self, other)
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        Ord::max(self, other)
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_utc() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{} ms", self.0),
        }
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Instant {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = i64::deserialize(deserializer)?;
        Ok(Self(v))
    }
}

// ── Arithmetic (milliseconds) ─────────────────────────────────────────────

impl Add<i64> for Instant {
    type Output = Self;
    #[inline]
    fn add(self, rhs: i64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl AddAssign<i64> for Instant {
    #[inline]
    fn add_assign(&mut self, rhs: i64) {
        self.0 += rhs;
    }
}

impl Sub<i64> for Instant {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: i64) -> Self::Output {
        Self(self.0 - rhs)
    }
}

impl SubAssign<i64> for Instant {
    #[inline]
    fn sub_assign(&mut self, rhs: i64) {
        self.0 -= rhs;
    }
}

impl Sub for Instant {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

// ── From/Into ─────────────────────────────────────────────────────────────

impl From<DateTime<Utc>> for Instant {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

impl From<Instant> for i64 {
    #[inline]
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeUnit
// ═══════════════════════════════════════════════════════════════════════════

/// Fixed-length units for clock stepping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl TimeUnit {
    #[inline]
    pub const fn millis(&self) -> i64 {
        match self {
            TimeUnit::Millisecond => 1,
            TimeUnit::Second => MILLIS_PER_SECOND,
            TimeUnit::Minute => MILLIS_PER_MINUTE,
            TimeUnit::Hour => MILLIS_PER_HOUR,
            TimeUnit::Day => MILLIS_PER_DAY,
            TimeUnit::Week => MILLIS_PER_WEEK,
        }
    }
}

/// Unit names are case-insensitive; `date` is accepted as a day.
impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ms" | "millisecond" | "milliseconds" => Ok(TimeUnit::Millisecond),
            "s" | "sec" | "second" | "seconds" => Ok(TimeUnit::Second),
            "m" | "min" | "minute" | "minutes" => Ok(TimeUnit::Minute),
            "h" | "hr" | "hour" | "hours" => Ok(TimeUnit::Hour),
            "d" | "day" | "days" | "date" => Ok(TimeUnit::Day),
            "w" | "week" | "weeks" => Ok(TimeUnit::Week),
            _ => Err(format!("unknown time unit '{s}'")),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_utc_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2020, 5, 29, 11, 5, 0).unwrap();
        let instant = Instant::from_utc(dt);
        assert_eq!(instant.millis(), 1_590_750_300_000);
        assert_eq!(instant.to_utc(), Some(dt));
    }

    #[test]
    fn test_naive_components() {
        let instant = Instant::from_millis(1_578_186_123_003); // 2020-01-05T01:02:03.003Z
        let naive = instant.to_naive().unwrap();
        assert_eq!(naive.year(), 2020);
        assert_eq!(naive.month(), 1);
        assert_eq!(naive.day(), 5);
        assert_eq!(naive.hour(), 1);
        assert_eq!(naive.minute(), 2);
        assert_eq!(naive.second(), 3);
        assert_eq!(Instant::from_naive(naive), instant);
    }

    #[test]
    fn test_negative_instants() {
        let before_epoch = Instant::from_millis(-1);
        let naive = before_epoch.to_naive().unwrap();
        assert_eq!(naive.year(), 1969);
        assert_eq!(naive.nanosecond(), 999_000_000);
    }

    #[test]
    fn test_arithmetic() {
        let mut t = Instant::from_millis(1_000);
        t += 500;
        assert_eq!(t.millis(), 1_500);
        t -= 1_500;
        assert_eq!(t, Instant::EPOCH);
        assert_eq!(Instant::from_millis(10) - Instant::from_millis(4), 6);
        assert_eq!(Instant::EPOCH.shifted(2, TimeUnit::Hour).millis(), 7_200_000);
        assert_eq!(Instant::EPOCH.millis_until(Instant::from_millis(-3)), -3);
    }

    #[test]
    fn test_min_max() {
        let a = Instant::from_millis(1);
        let b = Instant::from_millis(2);
        assert_eq!(a.min(b), a);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn test_display() {
        let t = Instant::from_millis(1_578_186_123_003);
        assert_eq!(t.to_string(), "2020-01-05T01:02:03.003Z");
    }

    #[test]
    fn test_unit_table() {
        assert_eq!("ms".parse::<TimeUnit>(), Ok(TimeUnit::Millisecond));
        assert_eq!("Seconds".parse::<TimeUnit>(), Ok(TimeUnit::Second));
        assert_eq!("HR".parse::<TimeUnit>(), Ok(TimeUnit::Hour));
        assert_eq!("date".parse::<TimeUnit>(), Ok(TimeUnit::Day));
        assert_eq!(TimeUnit::Week.millis(), 604_800_000);
        assert!("fortnight".parse::<TimeUnit>().is_err());
    }
}
