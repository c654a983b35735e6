// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed UTC offsets with quarter-hour resolution.

use crate::error::ConfigError;
use crate::instant::MILLIS_PER_HOUR;
use chrono::{Local, Offset};
use std::fmt;

/// Largest offset accepted, in hours (chrono's `FixedOffset` bound).
const MAX_OFFSET_HOURS: f64 = 24.0;

/// A signed offset from UTC in hours plus a display name.
///
/// The offset never changes an [`Instant`](crate::Instant); it only shifts
/// the calendar reading used for rendering and for "local" field access.
#[derive(Debug, Clone, PartialEq)]
pub struct TimezoneOffset {
    hours: f64,
    name: String,
}

impl TimezoneOffset {
    /// Offset in hours, which must be a multiple of a quarter hour.
    ///
    /// Without an explicit name the generic `GMT±hhmm` form is used.
    pub fn from_hours(hours: f64, name: Option<&str>) -> Result<Self, ConfigError> {
        let quarters = hours * 4.0;
        if !hours.is_finite() || quarters.fract() != 0.0 || hours.abs() >= MAX_OFFSET_HOURS {
            return Err(ConfigError::InvalidTimezone(hours.to_string()));
        }
        Ok(Self {
            hours,
            name: name.map_or_else(|| generic_name(hours), str::to_owned),
        })
    }

    pub fn utc() -> Self {
        Self {
            hours: 0.0,
            name: "UTC".to_owned(),
        }
    }

    /// Current offset of the host, named generically.
    pub fn local() -> Self {
        let seconds = Local::now().offset().fix().local_minus_utc();
        // Host offsets are whole minutes; round to the nearest quarter hour.
        let hours = (f64::from(seconds) / 900.0).round() / 4.0;
        Self {
            hours,
            name: generic_name(hours),
        }
    }

    /// Read `"local"`, `"utc"` or a signed number of hours.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        match spec.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::local()),
            "utc" => Ok(Self::utc()),
            other => other
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidTimezone(spec.to_owned()))
                .and_then(|hours| Self::from_hours(hours, None))
                .map_err(|_| ConfigError::InvalidTimezone(spec.to_owned())),
        }
    }

    #[inline]
    pub fn hours(&self) -> f64 {
        self.hours
    }

    /// Offset in milliseconds (exact for quarter hours).
    #[inline]
    pub fn millis(&self) -> i64 {
        (self.hours * MILLIS_PER_HOUR as f64).round() as i64
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// `GMT+0200`-style name of this offset.
    pub fn generic_name(&self) -> String {
        generic_name(self.hours)
    }
}

impl Default for TimezoneOffset {
    fn default() -> Self {
        Self::local()
    }
}

impl fmt::Display for TimezoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// `GMT±hhmm`; minutes other than quarter hours render as `--`.
pub fn generic_name(hours: f64) -> String {
    let sign = if hours < 0.0 { '-' } else { '+' };
    let hours = hours.abs();
    let whole = hours.floor();
    let minutes = match hours - whole {
        f if f == 0.0 => "00",
        f if f == 0.25 => "15",
        f if f == 0.5 => "30",
        f if f == 0.75 => "45",
        _ => "--",
    };
    format!("GMT{sign}{:02}{minutes}", whole as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_names() {
        assert_eq!(generic_name(0.0), "GMT+0000");
        assert_eq!(generic_name(2.0), "GMT+0200");
        assert_eq!(generic_name(5.5), "GMT+0530");
        assert_eq!(generic_name(-3.75), "GMT-0345");
        assert_eq!(generic_name(12.25), "GMT+1215");
        assert_eq!(generic_name(1.1), "GMT+01--");
    }

    #[test]
    fn test_from_hours() {
        let tz = TimezoneOffset::from_hours(-2.5, None).unwrap();
        assert_eq!(tz.millis(), -9_000_000);
        assert_eq!(tz.name(), "GMT-0230");
        let named = TimezoneOffset::from_hours(1.0, Some("CET")).unwrap();
        assert_eq!(named.to_string(), "CET");
        assert!(TimezoneOffset::from_hours(1.1, None).is_err());
        assert!(TimezoneOffset::from_hours(30.0, None).is_err());
    }

    #[test]
    fn test_parse_specs() {
        assert_eq!(TimezoneOffset::parse("UTC").unwrap().hours(), 0.0);
        assert_eq!(TimezoneOffset::parse("+2").unwrap().hours(), 2.0);
        assert_eq!(TimezoneOffset::parse("-9.5").unwrap().hours(), -9.5);
        let local = TimezoneOffset::parse("local").unwrap();
        assert_eq!((local.hours() * 4.0).fract(), 0.0);
        assert_eq!(
            TimezoneOffset::parse("mars"),
            Err(ConfigError::InvalidTimezone("mars".to_owned()))
        );
    }
}
