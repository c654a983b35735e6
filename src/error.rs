// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.
//!
//! - [`ArithmeticError`]: rational LCM/GCD over values that are not
//!   positive, not integral, too large to reconstitute, or asked for
//!   more decimal digits than supported.
//! - [`FormatError`]: user text that does not fit a date pattern.
//! - [`ConfigError`]: fatal setup failures while building a
//!   [`PhaseCycle`](crate::PhaseCycle) from its configuration record.

use thiserror::Error;

/// Failures of the number-theory helpers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    #[error("cannot take a common multiple of an empty set")]
    Empty,

    #[error("value {0} is not strictly positive")]
    NonPositive(f64),

    #[error("value {0} is not a natural number")]
    NotNatural(f64),

    #[error("least common multiple does not fit in 128 bits")]
    Overflow,

    #[error("precision of {0} decimal digits exceeds the supported {max}", max = crate::number_theory::MAX_PRECISION)]
    Precision(u32),
}

/// Text that could not be read with a date pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("'{text}' does not match the date pattern '{pattern}'")]
    NoMatch { pattern: String, text: String },

    #[error("'{text}' names a date that does not exist ('{pattern}')")]
    InvalidDate { pattern: String, text: String },

    #[error("no known date format matches '{0}'")]
    Undetected(String),

    #[error("pattern '{pattern}' compiles to an invalid expression: {reason}")]
    Compile { pattern: String, reason: String },
}

/// Fatal errors raised while building a phase cycle definition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("a phase cycle needs at least one periodic body")]
    NoBodies,

    #[error("body '{0}' is declared more than once")]
    DuplicateBody(String),

    #[error("period of body '{name}' must be strictly positive, got {minutes} minutes")]
    InvalidPeriod { name: String, minutes: f64 },

    #[error("cannot read period literal '{0}' (expected '<number> <unit>')")]
    PeriodLiteral(String),

    #[error("cannot read duration literal '{0}'")]
    DurationLiteral(String),

    #[error("reference body '{0}' is not one of the declared bodies")]
    UnknownReference(String),

    #[error("steps per reference cycle must be at least 1")]
    NoSteps,

    #[error("timezone '{0}' is neither 'local', 'utc' nor a quarter-hour offset in hours")]
    InvalidTimezone(String),

    #[error("invalid epoch: {0}")]
    Epoch(#[from] FormatError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}
