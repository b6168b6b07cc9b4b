//! The pet record and its stat invariants.
//!
//! A [`PetRecord`] is the whole per-user game state. Stats live in
//! `[0, 100]` and `is_alive` is derived from them. The field is public for
//! serde and fixtures, so a record can arrive with a stale flag; every
//! transition in this crate recomputes it through
//! [`PetRecord::refresh_alive`] before returning.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PET_NAME, STAT_DEFAULT, STAT_MAX, STAT_MIN};

/// Cumulative action counters and the set of unlocked achievement names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievements {
    pub feed_count: u32,
    pub play_count: u32,
    pub sleep_count: u32,
    /// Sorted, duplicate-free. Serialized as a JSON array.
    pub unlocked: BTreeSet<String>,
}

impl Achievements {
    pub fn is_unlocked(&self, name: &str) -> bool {
        self.unlocked.contains(name)
    }

    /// Add `name` to the unlocked set. Returns true if it was not there yet.
    ///
    /// Checks membership first so the common already-unlocked case does
    /// not allocate a `String`.
    pub fn unlock(&mut self, name: &str) -> bool {
        if self.unlocked.contains(name) {
            return false;
        }
        self.unlocked.insert(name.to_string())
    }
}

/// Mutable per-user pet state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    pub name: String,
    pub hunger: u8,
    pub happiness: u8,
    pub energy: u8,
    /// Derived; see [`PetRecord::refresh_alive`].
    pub is_alive: bool,
    #[serde(default)]
    pub achievements: Achievements,
}

impl PetRecord {
    /// A freshly hatched pet: 50/50/50, alive, no counters, nothing unlocked.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hunger: STAT_DEFAULT,
            happiness: STAT_DEFAULT,
            energy: STAT_DEFAULT,
            is_alive: true,
            achievements: Achievements::default(),
        }
    }

    /// Whether the given stats describe a living pet.
    pub fn stats_alive(hunger: u8, happiness: u8, energy: u8) -> bool {
        hunger < STAT_MAX && happiness > STAT_MIN && energy > STAT_MIN
    }

    /// Pull every stat back into `[0, 100]`. Only needed for records that
    /// came from outside the engine, e.g. a hand-edited file.
    pub fn clamp_stats(&mut self) {
        self.hunger = self.hunger.min(STAT_MAX);
        self.happiness = self.happiness.min(STAT_MAX);
        self.energy = self.energy.min(STAT_MAX);
    }

    /// Recompute `is_alive` from the current stats.
    pub fn refresh_alive(&mut self) {
        self.is_alive = Self::stats_alive(self.hunger, self.happiness, self.energy);
    }
}

impl Default for PetRecord {
    fn default() -> Self {
        Self::new(DEFAULT_PET_NAME)
    }
}

/// Apply a signed delta to a stat, clamping to `[0, 100]`.
pub fn adjust_stat(value: u8, delta: i16) -> u8 {
    (i16::from(value) + delta).clamp(i16::from(STAT_MIN), i16::from(STAT_MAX)) as u8
}
