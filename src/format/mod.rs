// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tokenized date formatting, parsing and format detection.
//!
//! Patterns are plain strings such as `DD-MM-YYYY HH:mm:ss`; see
//! [`token`] for the vocabulary. Formatting is lenient (anything that is
//! not a token passes through), parsing is strict (text that does not
//! match, or that names a date that does not exist, yields `None`).
//!
//! ```
//! use phasecycle::format::{format_date, parse, FormatOptions, ParseOptions};
//! use phasecycle::Instant;
//!
//! let t = Instant::from_millis(1_590_750_300_000);
//! let utc = FormatOptions { utc: true, ..FormatOptions::default() };
//! assert_eq!(format_date("DD-MM-YYYY HH:mm", t, &utc), "29-05-2020 11:05");
//!
//! let strict = ParseOptions { utc: true, ..ParseOptions::default() };
//! assert_eq!(parse("DD-MM-YYYY HH:mm:ss.mmm", "29-05-2020 11:05:00.000", &strict), Some(t));
//! assert_eq!(parse("DD-MM-YYYY", "31-02-2020", &strict), None);
//! ```

pub mod detect;
pub mod fields;
pub mod pattern;
pub mod token;

pub use detect::{detect_format, detect_formats};
pub use fields::{DayOverflow, Fields, Meridiem};
pub use pattern::{FormatPattern, Segment};
pub use token::{Field, Granularity, Token};

use crate::instant::Instant;
use chrono::{Local, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

/// Rendering options.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Render UTC components instead of host-local ones.
    pub utc: bool,
    /// Padding character of fixed-width tokens.
    pub zero: char,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            utc: false,
            zero: '0',
        }
    }
}

/// Parsing options.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Read the text as UTC instead of host-local time.
    pub utc: bool,
    /// Require the pattern to cover the whole text.
    pub full_match: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            utc: false,
            full_match: true,
        }
    }
}

/// Calendar components of `instant` in the UTC or host-local domain.
pub fn components(instant: Instant, utc: bool) -> Option<NaiveDateTime> {
    let datetime = instant.to_utc()?;
    Some(if utc {
        datetime.naive_utc()
    } else {
        datetime.with_timezone(&Local).naive_local()
    })
}

/// The instant whose reading in the given domain is `components`.
///
/// Local readings that fall in a daylight-saving gap have no instant.
pub fn instant_of(components: NaiveDateTime, utc: bool) -> Option<Instant> {
    if utc {
        Some(Instant::from_naive(components))
    } else {
        Local
            .from_local_datetime(&components)
            .earliest()
            .map(|dt| Instant::from_utc(dt.with_timezone(&Utc)))
    }
}

/// Render a single token.
pub fn format_token(token: Token, instant: Instant, options: &FormatOptions) -> String {
    match components(instant, options.utc) {
        Some(c) => token.render(&c, options.zero),
        None => token.spelling().to_owned(),
    }
}

/// Render `pattern`, substituting every token.
///
/// Instants outside the calendar range leave the pattern untouched.
pub fn format_date(pattern: &str, instant: Instant, options: &FormatOptions) -> String {
    match components(instant, options.utc) {
        Some(c) => FormatPattern::new(pattern).format(&c, options.zero),
        None => pattern.to_owned(),
    }
}

/// Read `text` with `pattern`.
///
/// Fields absent from the pattern are taken from the current host time in
/// the requested domain.
pub fn parse(pattern: &str, text: &str, options: &ParseOptions) -> Option<Instant> {
    let base = if options.utc {
        Utc::now().naive_utc()
    } else {
        Local::now().naive_local()
    };
    parse_with_base(pattern, text, options, base)
}

/// [`parse`] against an explicit base reading.
pub fn parse_with_base(
    pattern: &str,
    text: &str,
    options: &ParseOptions,
    base: NaiveDateTime,
) -> Option<Instant> {
    let parsed = FormatPattern::new(pattern)
        .capture(text, options.full_match)
        .and_then(|fields| fields.overlay(base, DayOverflow::Reject))
        .and_then(|c| instant_of(c, options.utc));
    if parsed.is_none() {
        debug!(pattern, text, "date text rejected");
    }
    parsed
}

/// Finest token of `pattern`.
pub fn shortest_token(pattern: &str) -> Option<Token> {
    FormatPattern::new(pattern).shortest_token()
}

/// Coarsest token of `pattern`.
pub fn longest_token(pattern: &str) -> Option<Token> {
    FormatPattern::new(pattern).longest_token()
}

/// Granularity just below the finest token of `pattern`.
pub fn next_shortest(pattern: &str) -> Option<Granularity> {
    FormatPattern::new(pattern).next_shortest()
}

/// Granularity just above the coarsest token of `pattern`.
pub fn next_longest(pattern: &str) -> Option<Granularity> {
    FormatPattern::new(pattern).next_longest()
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
