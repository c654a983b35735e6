// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! `"<number> <unit>"` literals.
//!
//! Two grammars share the same shape:
//!
//! - **periods** (`"1.775 days"`, `"10.65 hours"`) configure phase cycle
//!   bodies and are read into [`Minutes`];
//! - **durations** (`"2 years"`, `"90 min"`, `"1500"`) are clock moves in
//!   whole milliseconds, with calendar-free months of 30 days and years of
//!   12 such months.

use crate::error::ConfigError;
use crate::instant::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use qtty::{Day, Days, Hours, Minute, Minutes, Seconds};

/// Days in a period year.
const DAYS_PER_YEAR: f64 = 365.0;

/// Days in a duration month.
const DAYS_PER_MONTH: i64 = 30;

/// Read a period literal. A bare number counts seconds.
///
/// ```
/// use phasecycle::literal::period_minutes;
///
/// assert_eq!(period_minutes("1.5 hours").unwrap().value(), 90.0);
/// assert_eq!(period_minutes("30").unwrap().value(), 0.5);
/// ```
pub fn period_minutes(literal: &str) -> Result<Minutes, ConfigError> {
    let invalid = || ConfigError::PeriodLiteral(literal.to_owned());
    let (value, unit) = split(literal).ok_or_else(invalid)?;
    let value: f64 = value.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    let minutes = match unit.map(str::to_ascii_lowercase).as_deref() {
        None | Some("s" | "sec" | "second" | "seconds") => Seconds::new(value).to::<Minute>(),
        Some("m" | "min" | "minute" | "minutes") => Minutes::new(value),
        Some("h" | "hr" | "hour" | "hours") => Hours::new(value).to::<Minute>(),
        Some("d" | "day" | "days") => Days::new(value).to::<Minute>(),
        Some("y" | "year" | "years") => Days::new(value * DAYS_PER_YEAR).to::<Minute>(),
        Some(_) => return Err(invalid()),
    };
    Ok(minutes)
}

/// Read a duration literal into milliseconds. A bare integer counts
/// milliseconds.
pub fn duration_millis(literal: &str) -> Result<i64, ConfigError> {
    let invalid = || ConfigError::DurationLiteral(literal.to_owned());
    let (value, unit) = split(literal).ok_or_else(invalid)?;
    let Some(unit) = unit else {
        return value.parse::<i64>().map_err(|_| invalid());
    };
    let value: f64 = value.parse().map_err(|_| invalid())?;
    let multiplier = match unit.to_ascii_lowercase().as_str() {
        "y" | "year" | "years" => 12 * DAYS_PER_MONTH * MILLIS_PER_DAY,
        "mon" | "month" | "months" => DAYS_PER_MONTH * MILLIS_PER_DAY,
        "w" | "week" | "weeks" => 7 * MILLIS_PER_DAY,
        "d" | "day" | "days" => MILLIS_PER_DAY,
        "h" | "hr" | "hour" | "hours" => MILLIS_PER_HOUR,
        "m" | "min" | "minute" | "minutes" => MILLIS_PER_MINUTE,
        "s" | "sec" | "second" | "seconds" => MILLIS_PER_SECOND,
        "ms" | "millisecond" | "milliseconds" => 1,
        _ => return Err(invalid()),
    };
    let millis = (value * multiplier as f64).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return Err(invalid());
    }
    Ok(millis as i64)
}

/// Number and optional unit; `None` for anything but one or two words.
fn split(literal: &str) -> Option<(&str, Option<&str>)> {
    let mut words = literal.split_whitespace();
    let value = words.next()?;
    let unit = words.next();
    if words.next().is_some() {
        return None;
    }
    Some((value, unit))
}

/// A period in days, for display.
pub fn minutes_to_days(minutes: Minutes) -> Days {
    minutes.to::<Day>()
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
