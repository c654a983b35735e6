// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! A settable clock over a host time source.
//!
//! A [`Clock`] is in exactly one of three [`ClockMode`]s:
//!
//! | Mode | Reading |
//! |------|---------|
//! | `Live` | host time at every read |
//! | `Offset(Δ)` | host time + Δ at every read |
//! | `Fixed(t)` | the stored instant `t` |
//!
//! Every clock carries a [`TimezoneOffset`]. Its "local" reading is the
//! UTC calendar reading of `instant + offset`; the offset never changes the
//! instant itself, so comparisons between clocks are timezone independent.
//!
//! Calendar edits (`set_current`, `set_next`, `set_previous`, field
//! setters) operate on the UTC reading when `utc` is set and on the local
//! reading otherwise. `set_current` and field setters clamp days that do
//! not exist in the target month; `set_next` and `set_previous` keep a
//! captured day exact and skip the months or years that lack it.
//!
//! ```
//! use phasecycle::clock::{Clock, ManualHost, SetOptions};
//! use phasecycle::{Instant, TimezoneOffset};
//!
//! // 2020-05-29 11:05:00 UTC
//! let host = ManualHost::new(Instant::from_millis(1_590_750_300_000));
//! let mut clock = Clock::with_host(host, TimezoneOffset::utc());
//! clock.stop();
//!
//! clock.set_next("HH:mm", "08:30", SetOptions::utc()).unwrap();
//! assert_eq!(clock.to_string(), "30-05-2020 08:30:00");
//! ```

use crate::error::FormatError;
use crate::format::{detect_format, DayOverflow, Field, Fields, FormatPattern, Granularity};
use crate::instant::{Instant, TimeUnit};
use crate::offset::TimezoneOffset;
use chrono::{Months, NaiveDateTime, Utc};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

pub const DEFAULT_DATE_FORMAT: &str = "DD-MM-YYYY";
pub const DEFAULT_TIME_FORMAT: &str = "HH:mm:ss";
pub const DEFAULT_DATETIME_FORMAT: &str = "DD-MM-YYYY HH:mm:ss";
pub const DEFAULT_LOCALE: &str = "en-US";

// ═══════════════════════════════════════════════════════════════════════════
// Host time sources
// ═══════════════════════════════════════════════════════════════════════════

/// Source of "now" for live and offset clocks.
pub trait HostClock {
    fn now(&self) -> Instant;
}

/// The operating system's wall clock.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SystemClock;

impl HostClock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::from_utc(Utc::now())
    }
}

/// A host time that only moves when told to.
///
/// Clones share the same time, so a test can keep a handle and advance
/// the host under a clock it already handed the source to.
#[derive(Debug, Clone, Default)]
pub struct ManualHost {
    now: Rc<Cell<Instant>>,
}

impl ManualHost {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, instant: Instant) {
        self.now.set(instant);
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl HostClock for ManualHost {
    #[inline]
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration types
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClockMode {
    Live,
    /// Milliseconds added to the host time.
    Offset(i64),
    Fixed(Instant),
}

/// Rendering patterns of a clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFormats {
    pub date: String,
    pub time: String,
    pub datetime: String,
}

impl Default for ClockFormats {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_FORMAT.to_owned(),
            time: DEFAULT_TIME_FORMAT.to_owned(),
            datetime: DEFAULT_DATETIME_FORMAT.to_owned(),
        }
    }
}

/// Which of the clock patterns to render with.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ClockPart {
    Date,
    Time,
    #[default]
    DateTime,
}

/// Options of the calendar setters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Edit the UTC reading instead of the local one.
    pub utc: bool,
    /// Reset every field finer than the pattern's finest token.
    pub sharp: bool,
}

impl SetOptions {
    pub const fn utc() -> Self {
        Self {
            utc: true,
            sharp: false,
        }
    }

    pub const fn local() -> Self {
        Self {
            utc: false,
            sharp: false,
        }
    }

    pub const fn sharp(self) -> Self {
        Self {
            sharp: true,
            ..self
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Clock
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct Clock<H: HostClock = SystemClock> {
    host: H,
    mode: ClockMode,
    timezone: TimezoneOffset,
    formats: ClockFormats,
    locale: String,
}

impl Clock<SystemClock> {
    /// A live clock in the host's timezone.
    pub fn new() -> Self {
        Self::with_host(SystemClock, TimezoneOffset::local())
    }

    /// A live clock shown in `timezone`.
    pub fn with_timezone(timezone: TimezoneOffset) -> Self {
        Self::with_host(SystemClock, timezone)
    }

    /// A fixed clock at `instant`.
    pub fn from_instant(instant: Instant, timezone: TimezoneOffset) -> Self {
        let mut clock = Self::with_timezone(timezone);
        clock.mode = ClockMode::Fixed(instant);
        clock
    }

    /// A fixed clock read from local date text, format auto-detected.
    pub fn from_text(text: &str, timezone: TimezoneOffset) -> Result<Self, FormatError> {
        let mut clock = Self::with_timezone(timezone);
        clock.set_local_fixed(text, None)?;
        Ok(clock)
    }
}

impl Default for Clock<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HostClock> Clock<H> {
    /// A live clock over `host`.
    pub fn with_host(host: H, timezone: TimezoneOffset) -> Self {
        Self {
            host,
            mode: ClockMode::Live,
            timezone,
            formats: ClockFormats::default(),
            locale: DEFAULT_LOCALE.to_owned(),
        }
    }

    // ── Settings ──────────────────────────────────────────────────────────

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn is_live(&self) -> bool {
        matches!(self.mode, ClockMode::Live)
    }

    pub fn is_offset(&self) -> bool {
        matches!(self.mode, ClockMode::Offset(_))
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.mode, ClockMode::Fixed(_))
    }

    #[inline]
    pub fn timezone(&self) -> &TimezoneOffset {
        &self.timezone
    }

    pub fn set_timezone(&mut self, timezone: TimezoneOffset) {
        self.timezone = timezone;
    }

    #[inline]
    pub fn formats(&self) -> &ClockFormats {
        &self.formats
    }

    /// Set the date and time patterns; the datetime pattern joins them.
    pub fn set_format(&mut self, date: &str, time: &str) {
        self.formats.date = date.to_owned();
        self.formats.time = time.to_owned();
        self.formats.datetime = format!("{date} {time}");
    }

    pub fn set_date_format(&mut self, date: &str) {
        self.formats.date = date.to_owned();
    }

    pub fn set_time_format(&mut self, time: &str) {
        self.formats.time = time.to_owned();
    }

    pub fn set_datetime_format(&mut self, datetime: &str) {
        self.formats.datetime = datetime.to_owned();
    }

    #[inline]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: &str) {
        self.locale = locale.to_owned();
    }

    // ── Modes ─────────────────────────────────────────────────────────────

    /// Follow the host time again.
    pub fn set_live(&mut self) {
        self.change_mode(ClockMode::Live);
    }

    /// Freeze at the current host time.
    pub fn freeze_now(&mut self) {
        self.change_mode(ClockMode::Fixed(self.host.now()));
    }

    /// Freeze at the current reading.
    pub fn stop(&mut self) {
        self.change_mode(ClockMode::Fixed(self.instant()));
    }

    /// Let a fixed clock run again from its stored instant.
    pub fn start(&mut self) {
        if let ClockMode::Fixed(instant) = self.mode {
            self.change_mode(ClockMode::Offset(instant - self.host.now()));
        }
    }

    fn change_mode(&mut self, mode: ClockMode) {
        if std::mem::discriminant(&mode) != std::mem::discriminant(&self.mode) {
            trace!(from = ?self.mode, to = ?mode, "clock mode change");
        }
        self.mode = mode;
    }

    // ── Instants ──────────────────────────────────────────────────────────

    pub fn instant(&self) -> Instant {
        match self.mode {
            ClockMode::Live => self.host.now(),
            ClockMode::Offset(delta) => self.host.now() + delta,
            ClockMode::Fixed(instant) => instant,
        }
    }

    /// Fixed clocks store `instant`; running clocks keep running from it.
    pub fn set_instant(&mut self, instant: Instant) {
        match self.mode {
            ClockMode::Fixed(_) => self.mode = ClockMode::Fixed(instant),
            ClockMode::Live | ClockMode::Offset(_) => {
                self.change_mode(ClockMode::Offset(instant - self.host.now()))
            }
        }
    }

    /// The instant shifted by the timezone offset.
    pub fn local_instant(&self) -> Instant {
        self.instant() + self.timezone.millis()
    }

    pub fn set_local_instant(&mut self, local: Instant) {
        self.set_instant(local - self.timezone.millis());
    }

    fn reading(&self, utc: bool) -> Instant {
        if utc {
            self.instant()
        } else {
            self.local_instant()
        }
    }

    fn set_reading(&mut self, reading: Instant, utc: bool) {
        if utc {
            self.set_instant(reading);
        } else {
            self.set_local_instant(reading);
        }
    }

    /// Calendar components of the UTC or local reading.
    pub fn components(&self, utc: bool) -> Option<NaiveDateTime> {
        self.reading(utc).to_naive()
    }

    fn set_components(&mut self, components: NaiveDateTime, utc: bool) {
        self.set_reading(Instant::from_naive(components), utc);
    }

    // ── Relative moves ────────────────────────────────────────────────────

    pub fn set_forward(&mut self, amount: i64, unit: TimeUnit) {
        let millis = amount * unit.millis();
        match self.mode {
            ClockMode::Fixed(instant) => self.mode = ClockMode::Fixed(instant + millis),
            ClockMode::Offset(delta) => self.mode = ClockMode::Offset(delta + millis),
            ClockMode::Live => self.change_mode(ClockMode::Offset(millis)),
        }
    }

    pub fn set_back(&mut self, amount: i64, unit: TimeUnit) {
        self.set_forward(-amount, unit);
    }

    /// Move by calendar months on the UTC reading.
    pub fn set_forward_by_months(&mut self, months: i32) {
        self.shift_months(i64::from(months), true);
    }

    pub fn set_back_by_months(&mut self, months: i32) {
        self.shift_months(-i64::from(months), true);
    }

    /// Move by calendar years on the UTC reading; February 29th becomes
    /// the 28th outside leap years.
    pub fn set_forward_by_years(&mut self, years: i32) {
        self.shift_months(i64::from(years) * 12, true);
    }

    pub fn set_back_by_years(&mut self, years: i32) {
        self.shift_months(-i64::from(years) * 12, true);
    }

    fn shift_months(&mut self, months: i64, utc: bool) {
        if let Some(shifted) = self
            .components(utc)
            .and_then(|c| shift_by_months(c, months))
        {
            self.set_components(shifted, utc);
        }
    }

    // ── Calendar setters ──────────────────────────────────────────────────

    /// Overwrite the fields named in `pattern` with those read from `text`.
    ///
    /// With `sharp`, every field finer than the pattern's finest token is
    /// reset as well (`"HH:mm"` clears seconds and milliseconds). The
    /// clock is left untouched when `text` does not match.
    pub fn set_current(
        &mut self,
        pattern: &str,
        text: &str,
        options: SetOptions,
    ) -> Result<(), FormatError> {
        let pattern = FormatPattern::new(pattern);
        let fields = captured(&pattern, text, options)?;
        self.apply_fields(&fields, options.utc)
            .ok_or_else(|| invalid_date(&pattern, text))
    }

    fn apply_fields(&mut self, fields: &Fields, utc: bool) -> Option<()> {
        let updated = fields.overlay(self.components(utc)?, DayOverflow::Clamp)?;
        self.set_components(updated, utc);
        Some(())
    }

    /// The first instant after the current one whose fields match.
    ///
    /// Months that lack the requested day are skipped: `DD = 31` from
    /// February 10th lands on March 31st.
    pub fn set_next(
        &mut self,
        pattern: &str,
        text: &str,
        options: SetOptions,
    ) -> Result<(), FormatError> {
        self.seek(pattern, text, options, true)
    }

    /// The last instant before the current one whose fields match.
    pub fn set_previous(
        &mut self,
        pattern: &str,
        text: &str,
        options: SetOptions,
    ) -> Result<(), FormatError> {
        self.seek(pattern, text, options, false)
    }

    /// Walk by the pattern's repeat unit until the captured fields all hold
    /// on a reading strictly past the current one.
    ///
    /// Patterns naming the year do not repeat and take their single reading.
    fn seek(
        &mut self,
        pattern: &str,
        text: &str,
        options: SetOptions,
        forward: bool,
    ) -> Result<(), FormatError> {
        let pattern = FormatPattern::new(pattern);
        let fields = captured(&pattern, text, options)?;
        let start = self
            .components(options.utc)
            .ok_or_else(|| invalid_date(&pattern, text))?;

        let found = match pattern.next_longest() {
            None => fields.overlay_exact(start),
            Some(unit) => {
                let direction = if forward { 1 } else { -1 };
                (0..=SEEK_LIMIT)
                    .filter_map(|k| shift_reading(start, unit, k * direction))
                    .filter_map(|base| fields.overlay_exact(base))
                    .find(|reading| if forward { *reading > start } else { *reading < start })
            }
        };
        let reading = found.ok_or_else(|| invalid_date(&pattern, text))?;
        self.set_components(reading, options.utc);
        Ok(())
    }

    // ── Fields ────────────────────────────────────────────────────────────

    /// Value of one calendar field; week and meridiem fields have none.
    pub fn field(&self, field: Field, utc: bool) -> Option<i64> {
        use chrono::{Datelike, Timelike};
        let c = self.components(utc)?;
        let millis = i64::from(c.nanosecond() / 1_000_000 % 1_000);
        Some(match field {
            Field::Year => i64::from(c.year()),
            Field::Month => i64::from(c.month()),
            Field::Day => i64::from(c.day()),
            Field::Hour => i64::from(c.hour()),
            Field::Minute => i64::from(c.minute()),
            Field::Second => i64::from(c.second()),
            Field::Hundredths => millis / 10,
            Field::Millisecond => millis,
            Field::Weekday => i64::from(c.weekday().num_days_from_sunday()),
            Field::Meridiem | Field::Week => return None,
        })
    }

    /// Set one calendar field, clamping the day to the target month.
    ///
    /// Returns `false`, leaving the clock untouched, when the value is out
    /// of range or the field cannot be set.
    pub fn set_field(&mut self, field: Field, value: i64, utc: bool) -> bool {
        let mut fields = Fields::default();
        let in_range = match field {
            Field::Year => i32::try_from(value).map(|v| fields.year = Some(v)).is_ok(),
            Field::Month => u32::try_from(value).map(|v| fields.month = Some(v)).is_ok(),
            Field::Day => u32::try_from(value).map(|v| fields.day = Some(v)).is_ok(),
            Field::Hour => u32::try_from(value).map(|v| fields.hour = Some(v)).is_ok(),
            Field::Minute => u32::try_from(value).map(|v| fields.minute = Some(v)).is_ok(),
            Field::Second => u32::try_from(value).map(|v| fields.second = Some(v)).is_ok(),
            Field::Hundredths => u32::try_from(value)
                .ok()
                .filter(|v| *v < 100)
                .map(|v| fields.millisecond = Some(v * 10))
                .is_some(),
            Field::Millisecond => u32::try_from(value)
                .map(|v| fields.millisecond = Some(v))
                .is_ok(),
            Field::Meridiem | Field::Week | Field::Weekday => false,
        };
        in_range && self.apply_fields(&fields, utc).is_some()
    }

    /// Reset the field at `level` (and, with `cascade`, every finer one).
    ///
    /// Returns `false`, leaving the clock untouched, when the current
    /// reading is outside the calendar range.
    pub fn set_zero(&mut self, level: Granularity, utc: bool, cascade: bool) -> bool {
        let mut fields = Fields::default();
        if cascade {
            fields.reset_from(level);
        } else {
            fields.reset(level);
        }
        self.apply_fields(&fields, utc).is_some()
    }

    // ── Text setters ──────────────────────────────────────────────────────

    /// Read `text` as a UTC calendar reading; the format is detected when
    /// not given. Fields absent from the format come from the host time.
    fn read_text(&self, text: &str, format: Option<&str>) -> Result<Instant, FormatError> {
        let pattern = match format {
            Some(format) => format.to_owned(),
            None => detect_format(text).ok_or_else(|| FormatError::Undetected(text.to_owned()))?,
        };
        let pattern = FormatPattern::new(&pattern);
        let fields = pattern
            .capture(text, true)
            .ok_or_else(|| FormatError::NoMatch {
                pattern: pattern.to_string(),
                text: text.to_owned(),
            })?;
        self.host
            .now()
            .to_naive()
            .and_then(|base| fields.overlay(base, DayOverflow::Reject))
            .map(Instant::from_naive)
            .ok_or_else(|| FormatError::InvalidDate {
                pattern: pattern.to_string(),
                text: text.to_owned(),
            })
    }

    /// Freeze at the UTC reading `text`.
    pub fn set_utc_fixed(&mut self, text: &str, format: Option<&str>) -> Result<(), FormatError> {
        let instant = self.read_text(text, format)?;
        self.change_mode(ClockMode::Fixed(instant));
        Ok(())
    }

    /// Run from the UTC reading `text`.
    pub fn set_utc_offset(&mut self, text: &str, format: Option<&str>) -> Result<(), FormatError> {
        let instant = self.read_text(text, format)?;
        self.change_mode(ClockMode::Offset(instant - self.host.now()));
        Ok(())
    }

    /// Freeze at the local reading `text`.
    pub fn set_local_fixed(&mut self, text: &str, format: Option<&str>) -> Result<(), FormatError> {
        let instant = self.read_text(text, format)? - self.timezone.millis();
        self.change_mode(ClockMode::Fixed(instant));
        Ok(())
    }

    /// Run from the local reading `text`.
    pub fn set_local_offset(
        &mut self,
        text: &str,
        format: Option<&str>,
    ) -> Result<(), FormatError> {
        let instant = self.read_text(text, format)? - self.timezone.millis();
        self.change_mode(ClockMode::Offset(instant - self.host.now()));
        Ok(())
    }

    // ── Comparisons ───────────────────────────────────────────────────────

    /// Milliseconds from this clock's instant to `other`.
    pub fn time_to(&self, other: Instant) -> i64 {
        other - self.instant()
    }

    pub fn is_before(&self, other: Instant) -> bool {
        self.time_to(other) > 0
    }

    pub fn is_after(&self, other: Instant) -> bool {
        self.time_to(other) < 0
    }

    /// Between `start` and `end`; endpoints count unless `strict`.
    pub fn is_between(&self, start: Instant, end: Instant, strict: bool) -> bool {
        let now = self.instant();
        if !strict && (now == start || now == end) {
            return true;
        }
        start < now && now < end
    }

    /// Within `precision` milliseconds of `other`.
    pub fn is_same(&self, other: Instant, precision: i64) -> bool {
        self.time_to(other).abs() <= precision
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// Render the UTC or local reading with one of the clock patterns.
    pub fn to_time_string(&self, utc: bool, part: ClockPart) -> String {
        let pattern = match part {
            ClockPart::Date => &self.formats.date,
            ClockPart::Time => &self.formats.time,
            ClockPart::DateTime => &self.formats.datetime,
        };
        match self.components(utc) {
            Some(c) => FormatPattern::new(pattern).format(&c, '0'),
            None => self.instant().to_string(),
        }
    }
}

/// Repeat units tried by `set_next`/`set_previous`; a February 29th is
/// at most eight years away.
const SEEK_LIMIT: i64 = 12;

/// Fields read from `text`, with the finer ones reset when `sharp`.
fn captured(pattern: &FormatPattern, text: &str, options: SetOptions) -> Result<Fields, FormatError> {
    let mut fields = pattern
        .capture(text, true)
        .ok_or_else(|| FormatError::NoMatch {
            pattern: pattern.to_string(),
            text: text.to_owned(),
        })?;
    if options.sharp {
        if let Some(level) = pattern.next_shortest() {
            fields.reset_from(level);
        }
    }
    Ok(fields)
}

fn invalid_date(pattern: &FormatPattern, text: &str) -> FormatError {
    FormatError::InvalidDate {
        pattern: pattern.to_string(),
        text: text.to_owned(),
    }
}

/// `reading` moved by `count` units; month ends clamp.
fn shift_reading(reading: NaiveDateTime, unit: Granularity, count: i64) -> Option<NaiveDateTime> {
    let fixed = |unit: TimeUnit| Instant::from_naive(reading).shifted(count, unit).to_naive();
    match unit {
        Granularity::Milliseconds => fixed(TimeUnit::Millisecond),
        Granularity::Seconds => fixed(TimeUnit::Second),
        Granularity::Minutes => fixed(TimeUnit::Minute),
        Granularity::Hours => fixed(TimeUnit::Hour),
        Granularity::Date => fixed(TimeUnit::Day),
        Granularity::Month => shift_by_months(reading, count),
        Granularity::Year => shift_by_months(reading, count.checked_mul(12)?),
    }
}

fn shift_by_months(reading: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let count = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        reading.checked_add_months(count)
    } else {
        reading.checked_sub_months(count)
    }
}

impl<H: HostClock> fmt::Display for Clock<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_time_string(false, ClockPart::DateTime))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instant::MILLIS_PER_DAY;

    /// 2020-05-29 11:05:00 UTC
    const T0: Instant = Instant::from_millis(1_590_750_300_000);

    fn fixed(at: Instant, timezone: TimezoneOffset) -> (ManualHost, Clock<ManualHost>) {
        let host = ManualHost::new(at);
        let mut clock = Clock::with_host(host.clone(), timezone);
        clock.stop();
        (host, clock)
    }

    fn utc_clock(text: &str) -> Clock<ManualHost> {
        let (_, mut clock) = fixed(T0, TimezoneOffset::utc());
        clock.set_utc_fixed(text, None).unwrap();
        clock
    }

    fn utc_string(clock: &Clock<ManualHost>) -> String {
        clock.to_time_string(true, ClockPart::DateTime)
    }

    #[test]
    fn test_modes() {
        let host = ManualHost::new(T0);
        let mut clock = Clock::with_host(host.clone(), TimezoneOffset::utc());
        assert!(clock.is_live());
        host.advance(1_000);
        assert_eq!(clock.instant(), T0 + 1_000);

        clock.set_forward(5, TimeUnit::Second);
        assert_eq!(clock.mode(), ClockMode::Offset(5_000));
        host.advance(1_000);
        assert_eq!(clock.instant(), T0 + 7_000);

        clock.stop();
        assert_eq!(clock.mode(), ClockMode::Fixed(T0 + 7_000));
        host.advance(60_000);
        assert_eq!(clock.instant(), T0 + 7_000);

        clock.start();
        assert_eq!(clock.instant(), T0 + 7_000);
        host.advance(1);
        assert_eq!(clock.instant(), T0 + 7_001);

        clock.set_live();
        assert_eq!(clock.instant(), host.now());
        clock.freeze_now();
        assert_eq!(clock.mode(), ClockMode::Fixed(host.now()));
    }

    #[test]
    fn test_stop_is_idempotent_and_start_noop_when_running() {
        let (host, mut clock) = fixed(T0, TimezoneOffset::utc());
        clock.stop();
        assert_eq!(clock.mode(), ClockMode::Fixed(T0));
        clock.start();
        let running = clock.mode();
        clock.start();
        assert_eq!(clock.mode(), running);
        host.advance(10);
        assert_eq!(clock.instant(), T0 + 10);
    }

    #[test]
    fn test_set_instant_keeps_mode() {
        let (host, mut clock) = fixed(T0, TimezoneOffset::utc());
        clock.set_instant(Instant::EPOCH);
        assert_eq!(clock.mode(), ClockMode::Fixed(Instant::EPOCH));

        let mut running = Clock::with_host(host.clone(), TimezoneOffset::utc());
        running.set_instant(Instant::EPOCH);
        assert!(running.is_offset());
        host.advance(3);
        assert_eq!(running.instant(), Instant::from_millis(3));
    }

    #[test]
    fn test_local_reading() {
        let tz = TimezoneOffset::from_hours(2.0, None).unwrap();
        let (_, mut clock) = fixed(T0, tz);
        assert_eq!(clock.local_instant() - clock.instant(), 7_200_000);
        assert_eq!(clock.to_string(), "29-05-2020 13:05:00");
        assert_eq!(utc_string(&clock), "29-05-2020 11:05:00");
        clock.set_local_instant(T0);
        assert_eq!(clock.instant(), T0 - 7_200_000);
    }

    #[test]
    fn test_forward_and_back_units() {
        let (_, mut clock) = fixed(T0, TimezoneOffset::utc());
        clock.set_forward(2, TimeUnit::Day);
        assert_eq!(clock.instant(), T0 + 2 * MILLIS_PER_DAY);
        clock.set_back(1, TimeUnit::Week);
        assert_eq!(clock.instant(), T0 - 5 * MILLIS_PER_DAY);
    }

    #[test]
    fn test_months_clamp_to_month_end() {
        let mut clock = utc_clock("31-01-2016 23:40:50");
        clock.set_forward_by_months(1);
        assert_eq!(utc_string(&clock), "29-02-2016 23:40:50");

        let mut clock = utc_clock("31-10-2015 02:12:18");
        clock.set_forward_by_months(40);
        assert_eq!(utc_string(&clock), "28-02-2019 02:12:18");

        let mut clock = utc_clock("02-03-2010 14:55:44");
        clock.set_back_by_months(4);
        assert_eq!(utc_string(&clock), "02-11-2009 14:55:44");
    }

    #[test]
    fn test_years_from_leap_day() {
        let mut clock = utc_clock("29-02-2020 00:00:00");
        clock.set_forward_by_years(1);
        assert_eq!(utc_string(&clock), "28-02-2021 00:00:00");
        let mut clock = utc_clock("29-02-2020 00:00:00");
        clock.set_back_by_years(8);
        assert_eq!(utc_string(&clock), "29-02-2012 00:00:00");
    }

    #[test]
    fn test_set_current_keeps_other_fields() {
        let mut clock = utc_clock("31-10-2015 02:12:18");
        clock.set_current("HH:mm", "20:15", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "31-10-2015 20:15:18");
        clock
            .set_current("HH:mm", "07:45", SetOptions::utc().sharp())
            .unwrap();
        assert_eq!(utc_string(&clock), "31-10-2015 07:45:00");
        clock.set_current("M", "2", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "28-02-2015 07:45:00");
    }

    #[test]
    fn test_set_current_sharp_cascade() {
        let mut clock = utc_clock("31-10-2015 02:12:18");
        clock.set_current("M", "7", SetOptions::utc().sharp()).unwrap();
        assert_eq!(utc_string(&clock), "01-07-2015 00:00:00");
    }

    #[test]
    fn test_set_current_local_domain() {
        let tz = TimezoneOffset::from_hours(2.0, None).unwrap();
        let (_, mut clock) = fixed(T0, tz);
        clock.set_current("HH", "00", SetOptions::local()).unwrap();
        assert_eq!(clock.to_string(), "29-05-2020 00:05:00");
        assert_eq!(utc_string(&clock), "28-05-2020 22:05:00");
    }

    #[test]
    fn test_set_current_rejects_text() {
        let mut clock = utc_clock("31-10-2015 02:12:18");
        let before = clock.instant();
        let err = clock
            .set_current("HH:mm", "25:00", SetOptions::utc())
            .unwrap_err();
        assert!(matches!(err, FormatError::NoMatch { .. }));
        assert_eq!(clock.instant(), before);
    }

    #[test]
    fn test_set_next_at_midnight_moves_a_day() {
        let mut clock = utc_clock("29-02-2020 00:00:00");
        clock
            .set_next("HH:mm", "00:00", SetOptions::utc().sharp())
            .unwrap();
        assert_eq!(utc_string(&clock), "01-03-2020 00:00:00");
    }

    #[test]
    fn test_set_next_and_previous() {
        let mut clock = utc_clock("02-03-2010 14:55:44");
        clock.set_next("HH:mm", "20:15", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "02-03-2010 20:15:44");
        clock.set_next("HH:mm", "14:00", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "03-03-2010 14:00:44");

        let mut clock = utc_clock("02-03-2010 14:55:44");
        clock.set_previous("D", "15", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "15-02-2010 14:55:44");
        clock.set_previous("M", "7", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "15-07-2009 14:55:44");
    }

    #[test]
    fn test_set_previous_is_strict() {
        let mut clock = utc_clock("29-02-2020 00:00:00");
        clock
            .set_previous("HH", "00", SetOptions::utc().sharp())
            .unwrap();
        assert_eq!(utc_string(&clock), "28-02-2020 00:00:00");
    }

    #[test]
    fn test_next_and_previous_skip_short_months() {
        let mut clock = utc_clock("10-02-2021 12:00:00");
        clock.set_next("DD", "31", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "31-03-2021 12:00:00");

        let mut clock = utc_clock("15-03-2021 12:00:00");
        clock.set_previous("DD", "31", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "31-01-2021 12:00:00");

        let mut clock = utc_clock("31-01-2021 12:00:00");
        clock.set_next("DD", "30", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "30-03-2021 12:00:00");
    }

    #[test]
    fn test_next_and_previous_find_leap_days() {
        let mut clock = utc_clock("01-03-2021 12:00:00");
        clock.set_next("MM-DD", "02-29", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "29-02-2024 12:00:00");

        let mut clock = utc_clock("01-03-2021 12:00:00");
        clock.set_previous("MM-DD", "02-29", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "29-02-2020 12:00:00");

        // 2100 is not a leap year
        let mut clock = utc_clock("01-03-2096 00:00:00");
        clock.set_next("MM-DD", "02-29", SetOptions::utc()).unwrap();
        assert_eq!(utc_string(&clock), "29-02-2104 00:00:00");
    }

    #[test]
    fn test_next_rejects_days_that_never_occur() {
        let mut clock = utc_clock("01-03-2021 12:00:00");
        let before = clock.instant();
        assert!(matches!(
            clock.set_next("MM-DD", "02-30", SetOptions::utc()),
            Err(FormatError::InvalidDate { .. })
        ));
        assert_eq!(clock.instant(), before);
    }

    #[test]
    fn test_fields() {
        let mut clock = utc_clock("31-01-2016 23:40:50");
        assert_eq!(clock.field(Field::Year, true), Some(2016));
        assert_eq!(clock.field(Field::Day, true), Some(31));
        assert_eq!(clock.field(Field::Week, true), None);
        assert!(clock.set_field(Field::Month, 4, true));
        assert_eq!(utc_string(&clock), "30-04-2016 23:40:50");
        assert!(!clock.set_field(Field::Hour, 24, true));
        assert!(!clock.set_field(Field::Minute, -1, true));
        assert!(clock.set_field(Field::Hundredths, 25, true));
        assert_eq!(clock.field(Field::Millisecond, true), Some(250));
        assert_eq!(utc_string(&clock), "30-04-2016 23:40:50");
    }

    #[test]
    fn test_set_zero() {
        let mut clock = utc_clock("31-01-2016 23:40:50");
        assert!(clock.set_zero(Granularity::Hours, true, false));
        assert_eq!(utc_string(&clock), "31-01-2016 00:40:50");
        assert!(clock.set_zero(Granularity::Date, true, true));
        assert_eq!(utc_string(&clock), "01-01-2016 00:00:00");
    }

    #[test]
    fn test_set_zero_out_of_range() {
        let far = Instant::from_millis(i64::MAX);
        let (_, mut clock) = fixed(far, TimezoneOffset::utc());
        assert!(!clock.set_zero(Granularity::Hours, true, true));
        assert_eq!(clock.instant(), far);
    }

    #[test]
    fn test_text_setters() {
        let tz = TimezoneOffset::from_hours(-3.0, None).unwrap();
        let (host, mut clock) = fixed(T0, tz);
        clock.set_local_fixed("01-01-2021 09:00", None).unwrap();
        assert_eq!(utc_string(&clock), "01-01-2021 12:00:00");

        clock.set_utc_offset("2021/01/01 09:00:00", None).unwrap();
        assert!(clock.is_offset());
        host.advance(1_000);
        assert_eq!(utc_string(&clock), "01-01-2021 09:00:01");

        clock
            .set_local_offset("09:30 01.01.2021", Some("HH:mm DD.MM.YYYY"))
            .unwrap();
        assert_eq!(utc_string(&clock), "01-01-2021 12:30:01");

        assert_eq!(
            clock.set_utc_fixed("tomorrow", None),
            Err(FormatError::Undetected("tomorrow".to_owned()))
        );
        assert!(matches!(
            clock.set_utc_fixed("31-02-2021 09:00", None),
            Err(FormatError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_comparisons() {
        let (_, clock) = fixed(T0, TimezoneOffset::utc());
        assert_eq!(clock.time_to(T0 + 10), 10);
        assert!(clock.is_before(T0 + 1));
        assert!(clock.is_after(T0 - 1));
        assert!(!clock.is_before(T0));
        assert!(clock.is_between(T0 - 1, T0 + 1, true));
        assert!(clock.is_between(T0, T0 + 1, false));
        assert!(!clock.is_between(T0, T0 + 1, true));
        assert!(clock.is_same(T0 + 500, 500));
        assert!(!clock.is_same(T0 - 501, 500));
    }

    #[test]
    fn test_time_strings_and_formats() {
        let (_, mut clock) = fixed(T0, TimezoneOffset::utc());
        assert_eq!(clock.to_time_string(true, ClockPart::Date), "29-05-2020");
        assert_eq!(clock.to_time_string(true, ClockPart::Time), "11:05:00");
        clock.set_format("YYYY/MM/DD", "hh:mm ap");
        assert_eq!(clock.formats().datetime, "YYYY/MM/DD hh:mm ap");
        assert_eq!(clock.to_string(), "2020/05/29 11:05 am");
        clock.set_locale("fr-FR");
        assert_eq!(clock.locale(), "fr-FR");
    }
}
