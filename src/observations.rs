// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observations recorded against phase cycle steps.
//!
//! An [`ObservationLog`] keeps one list of observations per step of a
//! rotation, together with a snapshot of the definition it was sized for.
//! Only steps holding observations take memory; a rotation of millions of
//! steps costs nothing until it is written to.
//! A log loaded from disk can be checked against the current definition
//! with [`ObservationLog::matches`] before use.
//!
//! With the `serde` feature the log serializes as
//!
//! ```json
//! {
//!   "periodDefinitionSnapshot": { "name": "Jupiter", "reference": "Io", ... },
//!   "stepCount": 50,
//!   "observations": [[{ "time": 0, "timeAdded": 0, "timeUpdated": 0, "details": "" }], []]
//! }
//! ```
//!
//! where `observations` lists every step, empty ones included.

use crate::instant::Instant;
use crate::phases::PhaseCycle;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One note about a step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Observation {
    /// When the observed event happened.
    pub time: Instant,
    pub time_added: Instant,
    pub time_updated: Instant,
    pub details: String,
}

/// The parts of a definition that decide step numbering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DefinitionSnapshot {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    pub reference: String,
    /// `(body, period in minutes)` in declaration order.
    #[cfg_attr(feature = "serde", serde(with = "crate::phases::ordered_map"))]
    pub objects: Vec<(String, f64)>,
    pub steps: u32,
    pub tzero: Instant,
    /// Offset in hours.
    pub timezone: f64,
}

impl From<&PhaseCycle> for DefinitionSnapshot {
    fn from(cycle: &PhaseCycle) -> Self {
        let definition = cycle.definition();
        Self {
            name: definition.name().map(str::to_owned),
            reference: definition.reference().to_owned(),
            objects: definition
                .periods()
                .iter()
                .map(|(name, period)| (name.clone(), period.value()))
                .collect(),
            steps: definition.steps_per_reference_cycle(),
            tzero: definition.epoch(),
            timezone: definition.timezone().hours(),
        }
    }
}

/// Per-step observation lists for one phase cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ObservationLog {
    #[cfg_attr(feature = "serde", serde(rename = "periodDefinitionSnapshot"))]
    snapshot: DefinitionSnapshot,
    step_count: i64,
    observations: StepLists,
}

/// `len` step slots; only the non-empty ones are stored.
#[derive(Debug, Clone, Default, PartialEq)]
struct StepLists {
    len: usize,
    filled: BTreeMap<usize, Vec<Observation>>,
}

impl StepLists {
    fn with_len(len: usize) -> Self {
        Self {
            len,
            filled: BTreeMap::new(),
        }
    }

    fn get(&self, slot: usize) -> &[Observation] {
        self.filled.get(&slot).map_or(&[][..], Vec::as_slice)
    }
}

impl ObservationLog {
    /// An empty log with one slot per step of `cycle`.
    pub fn new(cycle: &PhaseCycle) -> Self {
        let step_count = cycle.total_step_count();
        Self {
            snapshot: DefinitionSnapshot::from(cycle),
            step_count,
            observations: StepLists::with_len(usize::try_from(step_count).unwrap_or(0)),
        }
    }

    #[inline]
    pub fn snapshot(&self) -> &DefinitionSnapshot {
        &self.snapshot
    }

    #[inline]
    pub fn step_count(&self) -> i64 {
        self.step_count
    }

    /// `true` when the log was built for `cycle` and is well formed.
    pub fn matches(&self, cycle: &PhaseCycle) -> bool {
        self.step_count == cycle.total_step_count()
            && usize::try_from(self.step_count).is_ok_and(|n| n == self.observations.len)
            && self.snapshot == DefinitionSnapshot::from(cycle)
    }

    fn slot(&self, step: i64) -> Option<usize> {
        usize::try_from(step)
            .ok()
            .filter(|&index| index < self.observations.len)
    }

    /// Observations of `step`, `None` outside the rotation.
    pub fn observations(&self, step: i64) -> Option<&[Observation]> {
        let slot = self.slot(step)?;
        Some(self.observations.get(slot))
    }

    /// Steps that hold at least one observation, ascending.
    pub fn observed_steps(&self) -> impl Iterator<Item = i64> + '_ {
        self.observations.filled.keys().map(|&slot| slot as i64)
    }

    /// Append an observation made at `time`, stamped `now`.
    pub fn add(
        &mut self,
        step: i64,
        time: Instant,
        details: impl Into<String>,
        now: Instant,
    ) -> Option<&[Observation]> {
        let slot = self.slot(step)?;
        let list = self.observations.filled.entry(slot).or_default();
        list.push(Observation {
            time,
            time_added: now,
            time_updated: now,
            details: details.into(),
        });
        Some(list.as_slice())
    }

    /// Replace the details of one observation, stamped `now`.
    pub fn update(
        &mut self,
        step: i64,
        index: usize,
        details: impl Into<String>,
        now: Instant,
    ) -> Option<&Observation> {
        let slot = self.slot(step)?;
        let observation = self.observations.filled.get_mut(&slot)?.get_mut(index)?;
        observation.details = details.into();
        observation.time_updated = now;
        Some(observation)
    }

    pub fn remove(&mut self, step: i64, index: usize) -> Option<Observation> {
        let slot = self.slot(step)?;
        let list = self.observations.filled.get_mut(&slot)?;
        if index >= list.len() {
            return None;
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.observations.filled.remove(&slot);
        }
        Some(removed)
    }

    /// Drop every observation of `step`, returning them.
    pub fn remove_all(&mut self, step: i64) -> Option<Vec<Observation>> {
        let slot = self.slot(step)?;
        Some(self.observations.filled.remove(&slot).unwrap_or_default())
    }

    /// Empty every step.
    pub fn clear(&mut self) {
        self.observations.filled.clear();
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for StepLists {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for slot in 0..self.len {
            seq.serialize_element(self.get(slot))?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for StepLists {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StepListsVisitor;

        impl<'de> serde::de::Visitor<'de> for StepListsVisitor {
            type Value = StepLists;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a list of observation lists, one per step")
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<StepLists, A::Error> {
                let mut lists = StepLists::default();
                while let Some(list) = seq.next_element::<Vec<Observation>>()? {
                    if !list.is_empty() {
                        lists.filled.insert(lists.len, list);
                    }
                    lists.len += 1;
                }
                Ok(lists)
            }
        }

        deserializer.deserialize_seq(StepListsVisitor)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
