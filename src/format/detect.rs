// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date format auto-detection.
//!
//! A fixed catalog of patterns is generated once from 24 generic shapes by
//! expanding each placeholder into its token variants:
//!
//! | Placeholder | Variants |
//! |-------------|----------|
//! | `<Y>` | `YYYY`, `YY` |
//! | `<M>` | `MM`, `M` |
//! | `<D>` | `DD`, `D` |
//! | `<h>` | `HH`, `H` |
//! | `<m>` | `mm`, `m` |
//! | `<s>` | `ss`, `s` |
//! | `<ms>` | `mmm`, `cc` |
//! | `<a>` | `AP`, `ap` |
//! | date separator | `-`, `.`, `/`, `\` |
//!
//! Candidates keep the generation order, so day-first shapes come before
//! year-first ones and padded variants before unpadded ones.

use super::pattern::{FormatPattern, Segment};
use super::token::Token;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use tracing::debug;

const DATE_SEPARATOR: &str = "<1>";
const TIME_SEPARATOR: &str = "<2>";
const FRACTION_SEPARATOR: &str = "<3>";

#[rustfmt::skip]
const GENERIC_SHAPES: [&str; 24] = [
    "<D>-<M>-<Y> <h>:<m>:<s>.<ms> <a>", "<Y>-<M>-<D> <h>:<m>:<s>.<ms> <a>",
    "<D>-<M>-<Y> <h>:<m>:<s>.<ms>",     "<Y>-<M>-<D> <h>:<m>:<s>.<ms>",
    "<D>-<M>-<Y> <h>:<m>:<s> <a>",      "<Y>-<M>-<D> <h>:<m>:<s> <a>",
    "<D>-<M>-<Y> <h>:<m>:<s>",          "<Y>-<M>-<D> <h>:<m>:<s>",
    "<D>-<M>-<Y> <h>:<m> <a>",          "<Y>-<M>-<D> <h>:<m> <a>",
    "<D>-<M>-<Y> <h>:<m>",              "<Y>-<M>-<D> <h>:<m>",
    "<D>-<M> <h>:<m>:<s>.<ms> <a>",     "<M>-<D> <h>:<m>:<s>.<ms> <a>",
    "<D>-<M> <h>:<m>:<s>.<ms>",         "<M>-<D> <h>:<m>:<s>.<ms>",
    "<D>-<M> <h>:<m>:<s> <a>",          "<M>-<D> <h>:<m>:<s> <a>",
    "<D>-<M> <h>:<m>:<s>",              "<M>-<D> <h>:<m>:<s>",
    "<D>-<M> <h>:<m> <a>",              "<M>-<D> <h>:<m> <a>",
    "<D>-<M> <h>:<m>",                  "<M>-<D> <h>:<m>",
];

/// Expansion stages, applied in order.
const EXPANSIONS: [(&str, &[&str]); 11] = [
    ("<Y>", &["YYYY", "YY"]),
    ("<M>", &["MM", "M"]),
    ("<D>", &["DD", "D"]),
    ("<h>", &["HH", "H"]),
    ("<m>", &["mm", "m"]),
    ("<s>", &["ss", "s"]),
    ("<ms>", &["mmm", "cc"]),
    ("<a>", &["AP", "ap"]),
    (DATE_SEPARATOR, &["-", ".", "/", "\\"]),
    (TIME_SEPARATOR, &[":"]),
    (FRACTION_SEPARATOR, &["."]),
];

/// The generated catalog, built on first use.
pub fn catalog() -> &'static [FormatPattern] {
    static CATALOG: OnceLock<Vec<FormatPattern>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

fn build_catalog() -> Vec<FormatPattern> {
    let mut shapes: Vec<String> = GENERIC_SHAPES
        .iter()
        .map(|shape| {
            shape
                .replace('-', DATE_SEPARATOR)
                .replace(':', TIME_SEPARATOR)
                .replace('.', FRACTION_SEPARATOR)
        })
        .collect();

    for (placeholder, variants) in EXPANSIONS {
        let mut seen = HashSet::new();
        let mut expanded = Vec::with_capacity(shapes.len() * variants.len());
        for shape in &shapes {
            for variant in variants {
                let candidate = shape.replace(placeholder, variant);
                if seen.insert(candidate.clone()) {
                    expanded.push(candidate);
                }
            }
        }
        shapes = expanded;
    }

    let patterns: Vec<FormatPattern> = shapes.iter().map(|s| FormatPattern::new(s)).collect();
    debug!(entries = patterns.len(), "built date format catalog");
    patterns
}

/// Anchored matchers for every parseable token.
fn token_matchers() -> &'static HashMap<Token, Regex> {
    static MATCHERS: OnceLock<HashMap<Token, Regex>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        Token::ALL
            .iter()
            .filter_map(|token| {
                let class = token.parse_class()?;
                let regex = Regex::new(&format!("^(?:{class})$")).ok()?;
                Some((*token, regex))
            })
            .collect()
    })
}

/// Anchored match of `text` against a catalog pattern.
///
/// Catalog literals never contain letters or digits, so each token must
/// consume exactly the next run of ASCII alphanumerics. Walking the
/// segments this way is equivalent to the compiled anchored expression.
fn matches_exactly(pattern: &FormatPattern, text: &str) -> bool {
    let matchers = token_matchers();
    let mut rest = text;
    for segment in pattern.segments() {
        match segment {
            Segment::Literal(literal) => match rest.strip_prefix(literal.as_str()) {
                Some(tail) => rest = tail,
                None => return false,
            },
            Segment::Token(token) => {
                let end = rest
                    .find(|c: char| !c.is_ascii_alphanumeric())
                    .unwrap_or(rest.len());
                let (piece, tail) = rest.split_at(end);
                match matchers.get(token) {
                    Some(matcher) if matcher.is_match(piece) => rest = tail,
                    _ => return false,
                }
            }
        }
    }
    rest.is_empty()
}

/// Every catalog pattern that reads `text` in full, in catalog order.
///
/// Unless `all_variants` is set, a candidate is dropped when its root
/// variant (`D/M/YY` → `DD/MM/YY`) was already accepted.
pub fn detect_formats(text: &str, all_variants: bool) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for pattern in catalog() {
        if !matches_exactly(pattern, text) {
            continue;
        }
        if !all_variants && found.contains(&pattern.root_variant()) {
            continue;
        }
        found.push(pattern.as_str().to_owned());
    }
    found
}

/// The first detected pattern for `text`.
///
/// Day-first readings win over month-first ones; ambiguity is logged.
pub fn detect_format(text: &str) -> Option<String> {
    let mut candidates = detect_formats(text, false);
    if candidates.len() > 1 {
        debug!(text, ?candidates, "ambiguous date text, using the first reading");
    }
    if candidates.is_empty() {
        debug!(text, "no date format matches");
        return None;
    }
    Some(candidates.swap_remove(0))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
