// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar arithmetic, tokenized dates and phase cycles.
//!
//! This crate provides a settable clock, a token-based date formatter and
//! parser with format detection, and a model of several periodic bodies
//! whose combined rotation is divided into numbered steps.
//!
//! # Core types
//!
//! - [`Instant`]: milliseconds since the Unix epoch.
//! - [`TimezoneOffset`]: fixed offset in (possibly fractional) hours.
//! - [`Clock`]: live, offset or fixed clock with calendar setters.
//! - [`FormatPattern`]: a compiled pattern such as `DD-MM-YYYY HH:mm`.
//! - [`PhaseCycle`]: step arithmetic over the least common multiple of
//!   the body periods.
//! - [`ObservationLog`]: notes recorded per step of a phase cycle.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`number_theory`] | prime factors, LCM of decimals, GCD |
//! | [`format`] | tokens, formatting, strict parsing, detection |
//! | [`clock`] | [`Clock`] and host time sources |
//! | [`phases`] | [`PhaseCycle`] and its serialized record |
//! | [`observations`] | [`ObservationLog`] |
//! | [`literal`] | `"1.775 days"` period and duration literals |
//!
//! # Example
//!
//! ```
//! use phasecycle::{Clock, ManualHost, SetOptions, Instant, TimezoneOffset};
//!
//! let host = ManualHost::new(Instant::from_millis(1_590_750_300_000));
//! let mut clock = Clock::with_host(host, TimezoneOffset::from_hours(2.0, None).unwrap());
//! clock.stop();
//! clock.set_current("DD-MM-YYYY", "01-01-2021", SetOptions::local()).unwrap();
//! assert_eq!(clock.to_string(), "01-01-2021 13:05:00");
//! ```

pub mod clock;
pub mod error;
pub mod format;
pub mod instant;
pub mod literal;
pub mod number_theory;
pub mod observations;
pub mod offset;
pub mod phases;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use clock::{
    Clock, ClockFormats, ClockMode, ClockPart, HostClock, ManualHost, SetOptions, SystemClock,
};
pub use error::{ArithmeticError, ConfigError, FormatError};
pub use format::{
    detect_format, detect_formats, format_date, parse, DayOverflow, Field, FormatOptions,
    FormatPattern, Granularity, ParseOptions, Token,
};
pub use instant::{Instant, TimeUnit};
pub use literal::{duration_millis, period_minutes};
pub use number_theory::{greatest_common_divider, least_common_multiple, prime_factors};
pub use observations::{DefinitionSnapshot, Observation, ObservationLog};
pub use offset::TimezoneOffset;
pub use phases::{BodyPhase, PhaseCycle, PhaseCycleDefinition, PhaseCycleRecord, TimeZero};
