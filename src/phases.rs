// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Combined rotation of periodic bodies.
//!
//! A [`PhaseCycle`] tracks several bodies with different periods. Their
//! joint configuration repeats after the least common multiple of the
//! periods (the *total interval*). One body is the *reference*: each of its
//! revolutions is split into a fixed number of steps, so the total interval
//! holds `total / reference × steps` steps, numbered from the epoch.
//!
//! ```
//! use phasecycle::phases::{PhaseCycle, PhaseCycleDefinition};
//! use phasecycle::{Instant, TimezoneOffset};
//! use qtty::{Days, Minute};
//!
//! let definition = PhaseCycleDefinition::new(
//!     vec![
//!         ("Io".to_owned(), Days::new(1.775).to::<Minute>()),
//!         ("Europa".to_owned(), Days::new(3.55).to::<Minute>()),
//!     ],
//!     "Io",
//!     25,
//!     Instant::EPOCH,
//!     TimezoneOffset::utc(),
//! )
//! .unwrap();
//! let cycle = PhaseCycle::new(definition).unwrap();
//! assert_eq!(cycle.total_step_count(), 50);
//! assert_eq!(cycle.phases_at(25)[1].phase, 0.5);
//! ```
//!
//! Step numbers are unwrapped: step `-1` is the step before the epoch and
//! step `total_step_count()` starts the second rotation. Functions taking
//! `as_index` wrap results into `[0, total_step_count())`.

use crate::error::{ArithmeticError, ConfigError, FormatError};
use crate::format::{detect_format, parse_with_base, ParseOptions};
use crate::instant::{Instant, MILLIS_PER_MINUTE};
use crate::literal::period_minutes;
use crate::number_theory::{least_common_multiple, DEFAULT_PRECISION};
use crate::offset::TimezoneOffset;
use chrono::NaiveDateTime;
use qtty::Minutes;
use std::collections::HashSet;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Resolution of periods, in decimal digits of a minute.
const PERIOD_DECIMALS: i32 = DEFAULT_PRECISION as i32;

// ═══════════════════════════════════════════════════════════════════════════
// Definition
// ═══════════════════════════════════════════════════════════════════════════

/// Validated configuration of a phase cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseCycleDefinition {
    name: Option<String>,
    periods: Vec<(String, Minutes)>,
    reference: String,
    steps_per_reference_cycle: u32,
    epoch: Instant,
    timezone: TimezoneOffset,
}

impl PhaseCycleDefinition {
    /// Validate and store a definition.
    ///
    /// Periods are rounded to thousandths of a minute; body order is kept.
    pub fn new(
        periods: Vec<(String, Minutes)>,
        reference: &str,
        steps_per_reference_cycle: u32,
        epoch: Instant,
        timezone: TimezoneOffset,
    ) -> Result<Self, ConfigError> {
        if periods.is_empty() {
            return Err(ConfigError::NoBodies);
        }
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(periods.len());
        for (name, period) in periods {
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateBody(name));
            }
            let scale = 10f64.powi(PERIOD_DECIMALS);
            let minutes = (period.value() * scale).round() / scale;
            if !minutes.is_finite() || minutes <= 0.0 {
                return Err(ConfigError::InvalidPeriod {
                    name,
                    minutes: period.value(),
                });
            }
            normalized.push((name, Minutes::new(minutes)));
        }
        if !seen.contains(reference) {
            return Err(ConfigError::UnknownReference(reference.to_owned()));
        }
        if steps_per_reference_cycle == 0 {
            return Err(ConfigError::NoSteps);
        }
        Ok(Self {
            name: None,
            periods: normalized,
            reference: reference.to_owned(),
            steps_per_reference_cycle,
            epoch,
            timezone,
        })
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `(body, period)` pairs in declaration order.
    #[inline]
    pub fn periods(&self) -> &[(String, Minutes)] {
        &self.periods
    }

    pub fn body_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.periods.iter().map(|(name, _)| name.as_str())
    }

    pub fn period_of(&self, body: &str) -> Option<Minutes> {
        self.periods
            .iter()
            .find(|(name, _)| name == body)
            .map(|(_, period)| *period)
    }

    #[inline]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    #[inline]
    pub fn steps_per_reference_cycle(&self) -> u32 {
        self.steps_per_reference_cycle
    }

    #[inline]
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    #[inline]
    pub fn timezone(&self) -> &TimezoneOffset {
        &self.timezone
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PhaseCycle
// ═══════════════════════════════════════════════════════════════════════════

/// Phase of one body, in `[0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPhase {
    pub name: String,
    pub phase: f64,
}

/// A phase cycle with its derived intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseCycle {
    definition: PhaseCycleDefinition,
    total_interval: Minutes,
    reference_interval: Minutes,
    total_step_count: i64,
}

impl PhaseCycle {
    pub fn new(definition: PhaseCycleDefinition) -> Result<Self, ConfigError> {
        let values: Vec<f64> = definition.periods.iter().map(|(_, p)| p.value()).collect();
        let total = least_common_multiple(&values, DEFAULT_PRECISION)?;
        let reference_interval = definition
            .period_of(&definition.reference)
            .ok_or_else(|| ConfigError::UnknownReference(definition.reference.clone()))?;

        let steps = (total / reference_interval.value()
            * f64::from(definition.steps_per_reference_cycle))
        .round();
        if !steps.is_finite() || steps < 1.0 || steps >= i64::MAX as f64 {
            return Err(ArithmeticError::Overflow.into());
        }

        debug!(
            name = definition.name().unwrap_or("unnamed"),
            bodies = definition.periods.len(),
            total_minutes = total,
            steps,
            "phase cycle built"
        );
        Ok(Self {
            definition,
            total_interval: Minutes::new(total),
            reference_interval,
            total_step_count: steps as i64,
        })
    }

    /// Build from a configuration record.
    pub fn from_record(record: &PhaseCycleRecord) -> Result<Self, ConfigError> {
        Self::new(record.to_definition()?)
    }

    #[inline]
    pub fn definition(&self) -> &PhaseCycleDefinition {
        &self.definition
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.definition.name()
    }

    #[inline]
    pub fn epoch(&self) -> Instant {
        self.definition.epoch
    }

    /// Period of the reference body.
    #[inline]
    pub fn reference_interval(&self) -> Minutes {
        self.reference_interval
    }

    /// Least common multiple of all periods.
    #[inline]
    pub fn total_interval(&self) -> Minutes {
        self.total_interval
    }

    /// Revolutions of the reference body per rotation.
    pub fn total_cycle_count(&self) -> f64 {
        self.total_interval.value() / self.reference_interval.value()
    }

    /// Steps per rotation.
    #[inline]
    pub fn total_step_count(&self) -> i64 {
        self.total_step_count
    }

    pub fn step_interval(&self) -> Minutes {
        Minutes::new(self.total_interval.value() / self.total_step_count as f64)
    }

    fn step_millis(&self) -> f64 {
        self.step_interval().value() * MILLIS_PER_MINUTE as f64
    }

    fn rotation_millis(&self) -> f64 {
        self.total_interval.value() * MILLIS_PER_MINUTE as f64
    }

    /// Revolutions of each body per reference revolution.
    pub fn phase_multipliers(&self) -> Vec<(&str, f64)> {
        let reference = self.reference_interval.value();
        self.definition
            .periods
            .iter()
            .map(|(name, period)| (name.as_str(), reference / period.value()))
            .collect()
    }

    /// Phase of every body at `step`, in declaration order.
    pub fn phases_at(&self, step: i64) -> Vec<BodyPhase> {
        let fraction = step.rem_euclid(self.total_step_count) as f64
            / f64::from(self.definition.steps_per_reference_cycle);
        self.phase_multipliers()
            .into_iter()
            .map(|(name, multiplier)| {
                let turns = multiplier * fraction;
                BodyPhase {
                    name: name.to_owned(),
                    phase: turns - turns.floor(),
                }
            })
            .collect()
    }

    /// Start of `step`.
    pub fn step_time(&self, step: i64) -> Instant {
        self.epoch() + (step as f64 * self.step_millis()).round() as i64
    }

    fn wrap(&self, step: i64, as_index: bool) -> i64 {
        if as_index {
            step.rem_euclid(self.total_step_count)
        } else {
            step
        }
    }

    fn raw_step(&self, time: Instant) -> f64 {
        (time - self.epoch()) as f64 / self.step_millis()
    }

    /// First step starting at or after `time`.
    pub fn next_step_index(&self, time: Instant, as_index: bool) -> i64 {
        let mut step = self.raw_step(time).ceil() as i64;
        while self.step_time(step - 1) >= time {
            step -= 1;
        }
        while self.step_time(step) < time {
            step += 1;
        }
        self.wrap(step, as_index)
    }

    /// Last step starting at or before `time`.
    pub fn previous_step_index(&self, time: Instant, as_index: bool) -> i64 {
        let mut step = self.raw_step(time).floor() as i64;
        while self.step_time(step + 1) <= time {
            step += 1;
        }
        while self.step_time(step) > time {
            step -= 1;
        }
        self.wrap(step, as_index)
    }

    /// Every step starting within `[start, end]`.
    pub fn steps_in_interval(&self, start: Instant, end: Instant, as_index: bool) -> Vec<i64> {
        if end < start {
            return Vec::new();
        }
        let first = self.next_step_index(start, false);
        let last = self.previous_step_index(end, false);
        (first..=last).map(|step| self.wrap(step, as_index)).collect()
    }

    /// Start of `step` shifted by `rotations` whole rotations.
    fn occurrence(&self, step: i64, rotations: i64) -> Instant {
        self.step_time(step + rotations * self.total_step_count)
    }

    /// Earliest occurrence of `step` at or after `time`.
    pub fn next_occurrence(&self, step: i64, time: Instant) -> Instant {
        let mut n = ((time - self.step_time(step)) as f64 / self.rotation_millis()).ceil() as i64;
        while self.occurrence(step, n - 1) >= time {
            n -= 1;
        }
        while self.occurrence(step, n) < time {
            n += 1;
        }
        self.occurrence(step, n)
    }

    /// Latest occurrence of `step` at or before `time`.
    pub fn previous_occurrence(&self, step: i64, time: Instant) -> Instant {
        let mut n = ((time - self.step_time(step)) as f64 / self.rotation_millis()).floor() as i64;
        while self.occurrence(step, n + 1) <= time {
            n += 1;
        }
        while self.occurrence(step, n) > time {
            n -= 1;
        }
        self.occurrence(step, n)
    }

    /// Closest occurrence of `step` to `time`; the earlier one on ties.
    pub fn nearest_occurrence(&self, step: i64, time: Instant) -> Instant {
        let previous = self.previous_occurrence(step, time);
        let next = self.next_occurrence(step, time);
        if time - previous <= next - time {
            previous
        } else {
            next
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration record
// ═══════════════════════════════════════════════════════════════════════════

/// Epoch of a record: date text in the record's timezone, or Unix
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum TimeZero {
    Millis(i64),
    Text(String),
}

#[cfg(feature = "serde")]
fn default_timezone() -> String {
    "local".to_owned()
}

/// Serialized form of a phase cycle definition.
///
/// ```json
/// {
///   "name": "Jupiter",
///   "reference": "Io",
///   "objects": { "Io": "1.775 days", "Europa": "3.550 days" },
///   "steps": 25,
///   "tzero": "01-01-2020 00:00",
///   "timezone": "utc"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhaseCycleRecord {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    pub reference: String,
    /// `(body, period literal)` in file order.
    #[cfg_attr(feature = "serde", serde(with = "ordered_map"))]
    pub objects: Vec<(String, String)>,
    pub steps: u32,
    pub tzero: TimeZero,
    #[cfg_attr(feature = "serde", serde(default = "default_timezone"))]
    pub timezone: String,
}

impl PhaseCycleRecord {
    /// Resolve literals, timezone and epoch into a validated definition.
    ///
    /// A textual epoch is read as a local date in the record's timezone
    /// with its format detected; fields it does not name are zero.
    pub fn to_definition(&self) -> Result<PhaseCycleDefinition, ConfigError> {
        let timezone = TimezoneOffset::parse(&self.timezone)?;
        let periods = self
            .objects
            .iter()
            .map(|(name, literal)| Ok((name.clone(), period_minutes(literal)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let epoch = match &self.tzero {
            TimeZero::Millis(millis) => Instant::from_millis(*millis),
            TimeZero::Text(text) => epoch_from_text(text, &timezone)?,
        };
        Ok(
            PhaseCycleDefinition::new(periods, &self.reference, self.steps, epoch, timezone)?
                .with_name(self.name.clone()),
        )
    }
}

fn epoch_from_text(text: &str, timezone: &TimezoneOffset) -> Result<Instant, FormatError> {
    let format = detect_format(text).ok_or_else(|| FormatError::Undetected(text.to_owned()))?;
    let options = ParseOptions {
        utc: true,
        full_match: true,
    };
    let reading = parse_with_base(&format, text, &options, NaiveDateTime::default())
        .ok_or_else(|| FormatError::InvalidDate {
            pattern: format,
            text: text.to_owned(),
        })?;
    Ok(reading - timezone.millis())
}

/// A JSON object kept as ordered `(key, value)` pairs.
#[cfg(feature = "serde")]
pub(crate) mod ordered_map {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;
    use std::marker::PhantomData;

    pub fn serialize<K, V, S>(pairs: &[(K, V)], serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize,
        V: Serialize,
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<Vec<(K, V)>, D::Error>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        struct PairsVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for PairsVisitor<K, V>
        where
            K: Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = Vec<(K, V)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    pairs.push(entry);
                }
                Ok(pairs)
            }
        }

        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::{Day, Days, Hours, Minute};

    fn days(value: f64) -> Minutes {
        Days::new(value).to::<Minute>()
    }

    fn jupiter_definition() -> PhaseCycleDefinition {
        PhaseCycleDefinition::new(
            vec![
                ("Io".to_owned(), days(1.775)),
                ("Europa".to_owned(), days(3.55)),
            ],
            "Io",
            25,
            Instant::from_millis(1_577_836_800_000),
            TimezoneOffset::utc(),
        )
        .unwrap()
    }

    fn jupiter() -> PhaseCycle {
        PhaseCycle::new(jupiter_definition()).unwrap()
    }

    #[test]
    fn test_derived_intervals() {
        let cycle = jupiter();
        assert_eq!(cycle.total_interval().value(), 5112.0);
        assert!((cycle.total_interval().to::<Day>().value() - 3.55).abs() < 1e-9);
        assert_eq!(cycle.reference_interval().value(), 2556.0);
        assert_eq!(cycle.total_cycle_count(), 2.0);
        assert_eq!(cycle.total_step_count(), 50);
        assert!((cycle.step_interval().value() - 102.24).abs() < 1e-9);
    }

    #[test]
    fn test_phases() {
        let cycle = jupiter();
        for phase in cycle.phases_at(0) {
            assert_eq!(phase.phase, 0.0);
        }
        let half = cycle.phases_at(25);
        assert_eq!(half[0].name, "Io");
        assert_eq!(half[0].phase, 0.0);
        assert_eq!(half[1].phase, 0.5);
        assert_eq!(cycle.phases_at(50), cycle.phases_at(0));
        assert_eq!(cycle.phases_at(-25), cycle.phases_at(25));
        let multipliers = cycle.phase_multipliers();
        assert_eq!(multipliers, vec![("Io", 1.0), ("Europa", 0.5)]);
    }

    #[test]
    fn test_step_times() {
        let cycle = jupiter();
        let epoch = cycle.epoch();
        assert_eq!(cycle.step_time(0), epoch);
        assert_eq!(cycle.step_time(1) - epoch, 6_134_400);
        assert_eq!(cycle.step_time(-1) - epoch, -6_134_400);
        assert_eq!(cycle.step_time(50) - epoch, 5112 * 60_000);
    }

    #[test]
    fn test_step_indices() {
        let cycle = jupiter();
        let t = cycle.step_time(7);
        assert_eq!(cycle.next_step_index(t, false), 7);
        assert_eq!(cycle.previous_step_index(t, false), 7);
        assert_eq!(cycle.next_step_index(t + 1, false), 8);
        assert_eq!(cycle.previous_step_index(t - 1, false), 6);
        let before = cycle.step_time(-3) - 1;
        assert_eq!(cycle.previous_step_index(before, false), -4);
        assert_eq!(cycle.previous_step_index(before, true), 46);
        assert_eq!(cycle.next_step_index(cycle.step_time(53), true), 3);
    }

    #[test]
    fn test_steps_in_interval() {
        let cycle = jupiter();
        let start = cycle.step_time(48);
        let end = cycle.step_time(52) + 1;
        assert_eq!(cycle.steps_in_interval(start, end, false), vec![48, 49, 50, 51, 52]);
        assert_eq!(cycle.steps_in_interval(start, end, true), vec![48, 49, 0, 1, 2]);
        assert!(cycle.steps_in_interval(end, start, false).is_empty());
        let inside = cycle.step_time(3) + 1;
        assert!(cycle
            .steps_in_interval(inside, inside + 10, false)
            .is_empty());
    }

    #[test]
    fn test_occurrences() {
        let cycle = jupiter();
        let rotation = 5112 * 60_000;
        let t = cycle.step_time(10) + 1;
        assert_eq!(cycle.next_occurrence(10, t), cycle.step_time(10) + rotation);
        assert_eq!(cycle.previous_occurrence(10, t), cycle.step_time(10));
        assert_eq!(cycle.nearest_occurrence(10, t), cycle.step_time(10));
        let exact = cycle.step_time(60);
        assert_eq!(cycle.next_occurrence(10, exact), exact);
        assert_eq!(cycle.previous_occurrence(10, exact), exact);
        let far_back = cycle.epoch() - 3 * rotation;
        assert_eq!(cycle.next_occurrence(0, far_back), far_back);
    }

    #[test]
    fn test_nearest_prefers_earlier_on_tie() {
        let cycle = jupiter();
        let rotation = 5112 * 60_000;
        let midpoint = cycle.step_time(0) + rotation / 2;
        assert_eq!(cycle.nearest_occurrence(0, midpoint), cycle.step_time(0));
        assert_eq!(
            cycle.nearest_occurrence(0, midpoint + 1),
            cycle.step_time(0) + rotation
        );
    }

    #[test]
    fn test_rational_periods() {
        let definition = PhaseCycleDefinition::new(
            vec![
                ("Surface".to_owned(), Hours::new(10.65).to::<Minute>()),
                ("Io".to_owned(), days(1.775)),
            ],
            "Io",
            10,
            Instant::EPOCH,
            TimezoneOffset::utc(),
        )
        .unwrap();
        let cycle = PhaseCycle::new(definition).unwrap();
        // 639 = 3²·71 and 2556 = 2²·3²·71
        assert_eq!(cycle.total_interval().value(), 2556.0);
        assert_eq!(cycle.total_step_count(), 10);
    }

    #[test]
    fn test_definition_validation() {
        let utc = TimezoneOffset::utc;
        assert_eq!(
            PhaseCycleDefinition::new(vec![], "Io", 1, Instant::EPOCH, utc()),
            Err(ConfigError::NoBodies)
        );
        let twice = vec![("Io".to_owned(), days(1.0)), ("Io".to_owned(), days(2.0))];
        assert_eq!(
            PhaseCycleDefinition::new(twice, "Io", 1, Instant::EPOCH, utc()),
            Err(ConfigError::DuplicateBody("Io".to_owned()))
        );
        let zero = vec![("Io".to_owned(), Minutes::new(0.0001))];
        assert!(matches!(
            PhaseCycleDefinition::new(zero, "Io", 1, Instant::EPOCH, utc()),
            Err(ConfigError::InvalidPeriod { .. })
        ));
        let one = vec![("Io".to_owned(), days(1.0))];
        assert_eq!(
            PhaseCycleDefinition::new(one.clone(), "Europa", 1, Instant::EPOCH, utc()),
            Err(ConfigError::UnknownReference("Europa".to_owned()))
        );
        assert_eq!(
            PhaseCycleDefinition::new(one, "Io", 0, Instant::EPOCH, utc()),
            Err(ConfigError::NoSteps)
        );
    }

    #[test]
    fn test_record_to_definition() {
        let record = PhaseCycleRecord {
            name: Some("Jupiter".to_owned()),
            reference: "Io".to_owned(),
            objects: vec![
                ("Io".to_owned(), "1.775 days".to_owned()),
                ("Europa".to_owned(), "3.550 days".to_owned()),
            ],
            steps: 25,
            tzero: TimeZero::Text("01-01-2020 00:00".to_owned()),
            timezone: "+2".to_owned(),
        };
        let cycle = PhaseCycle::from_record(&record).unwrap();
        assert_eq!(cycle.name(), Some("Jupiter"));
        // local midnight at GMT+0200 is 22:00 UTC the day before
        assert_eq!(cycle.epoch(), Instant::from_millis(1_577_836_800_000 - 7_200_000));
        assert_eq!(cycle.definition().timezone().name(), "GMT+0200");
        assert_eq!(
            cycle.definition().body_names().collect::<Vec<_>>(),
            vec!["Io", "Europa"]
        );
        assert_eq!(cycle.total_step_count(), 50);
    }

    #[test]
    fn test_record_errors() {
        let mut record = PhaseCycleRecord {
            name: None,
            reference: "Io".to_owned(),
            objects: vec![("Io".to_owned(), "1.775 days".to_owned())],
            steps: 25,
            tzero: TimeZero::Millis(0),
            timezone: "utc".to_owned(),
        };
        assert!(PhaseCycle::from_record(&record).is_ok());

        record.timezone = "mars".to_owned();
        assert!(matches!(
            PhaseCycle::from_record(&record),
            Err(ConfigError::InvalidTimezone(_))
        ));

        record.timezone = "utc".to_owned();
        record.tzero = TimeZero::Text("soon".to_owned());
        assert!(matches!(
            PhaseCycle::from_record(&record),
            Err(ConfigError::Epoch(_))
        ));

        record.tzero = TimeZero::Millis(0);
        record.objects.push(("Europa".to_owned(), "3.55 parsecs".to_owned()));
        assert_eq!(
            PhaseCycle::from_record(&record),
            Err(ConfigError::PeriodLiteral("3.55 parsecs".to_owned()))
        );
    }
}
