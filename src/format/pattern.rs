// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tokenized date patterns.
//!
//! A pattern is split into maximal runs of ASCII letters and everything in
//! between. A letter run that spells a [`Token`] exactly is that token; any
//! other run is literal text. `YYYY-MM` therefore holds two tokens, while
//! `YYYYMM` and `Today` hold none.

use super::fields::Fields;
use super::token::{Granularity, Token};
use crate::error::FormatError;
use chrono::NaiveDateTime;
use regex::Regex;
use std::fmt;

/// One piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Token(Token),
}

/// A date pattern split into literal text and tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPattern {
    source: String,
    segments: Vec<Segment>,
}

impl FormatPattern {
    pub fn new(pattern: &str) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        let mut rest = pattern;
        while !rest.is_empty() {
            let letters = rest
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(rest.len());
            let (run, tail) = if letters > 0 {
                rest.split_at(letters)
            } else {
                let other = rest
                    .find(|c: char| c.is_ascii_alphabetic())
                    .unwrap_or(rest.len());
                rest.split_at(other)
            };
            match Token::from_spelling(run) {
                Some(token) if letters > 0 => segments.push(Segment::Token(token)),
                _ => Self::push_literal(&mut segments, run),
            }
            rest = tail;
        }

        Self {
            source: pattern.to_owned(),
            segments,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Tokens in pattern order.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Token(token) => Some(*token),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every token from `components`; literals pass through.
    pub fn format(&self, components: &NaiveDateTime, zero: char) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Token(token) => token.render(components, zero),
            })
            .collect()
    }

    /// Regular expression with one named capture `t<i>` per parseable token.
    ///
    /// Tokens without a parse class and literal text are escaped. With
    /// `full_match` the expression is anchored at both ends.
    pub fn compile(&self, full_match: bool) -> Result<Regex, FormatError> {
        let body: String = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| match segment {
                Segment::Literal(text) => regex::escape(text),
                Segment::Token(token) => match token.parse_class() {
                    Some(class) => format!("(?P<t{i}>{class})"),
                    None => regex::escape(token.spelling()),
                },
            })
            .collect();
        let expression = if full_match {
            format!("^{body}$")
        } else {
            body
        };
        Regex::new(&expression).map_err(|e| FormatError::Compile {
            pattern: self.source.clone(),
            reason: e.to_string(),
        })
    }

    /// Calendar fields read from `text`; `None` when the text does not match.
    pub fn capture(&self, text: &str, full_match: bool) -> Option<Fields> {
        let regex = self.compile(full_match).ok()?;
        let captures = regex.captures(text)?;
        let mut fields = Fields::default();
        for (i, segment) in self.segments.iter().enumerate() {
            let Segment::Token(token) = segment else {
                continue;
            };
            if token.parse_class().is_none() {
                continue;
            }
            let raw = captures.name(&format!("t{i}"))?.as_str();
            token.apply(raw, &mut fields)?;
        }
        Some(fields)
    }

    /// Finest-grained token; the first one wins among equals.
    pub fn shortest_token(&self) -> Option<Token> {
        self.extreme_token(|candidate, best| candidate < best)
    }

    /// Coarsest-grained token; the first one wins among equals.
    pub fn longest_token(&self) -> Option<Token> {
        self.extreme_token(|candidate, best| candidate > best)
    }

    /// Granularity just below the finest token.
    pub fn next_shortest(&self) -> Option<Granularity> {
        self.shortest_token()?.granularity()?.finer()
    }

    /// Granularity just above the coarsest token: the unit by which a
    /// pattern-matching instant repeats.
    pub fn next_longest(&self) -> Option<Granularity> {
        self.longest_token()?.granularity()?.coarser()
    }

    /// Pattern with every token replaced by its canonical padded spelling.
    pub fn root_variant(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Token(token) => token.root().spelling(),
            })
            .collect()
    }

    fn push_literal(segments: &mut Vec<Segment>, text: &str) {
        if let Some(Segment::Literal(last)) = segments.last_mut() {
            last.push_str(text);
        } else if !text.is_empty() {
            segments.push(Segment::Literal(text.to_owned()));
        }
    }

    fn extreme_token(&self, better: impl Fn(Granularity, Granularity) -> bool) -> Option<Token> {
        let mut best: Option<(Token, Granularity)> = None;
        for token in self.tokens() {
            let Some(granularity) = token.granularity() else {
                continue;
            };
            match best {
                Some((_, current)) if !better(granularity, current) => {}
                _ => best = Some((token, granularity)),
            }
        }
        best.map(|(token, _)| token)
    }
}

impl From<&str> for FormatPattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl fmt::Display for FormatPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
