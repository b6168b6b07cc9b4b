//! Pure action logic — stat deltas, the dead-pet rule, and reset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::achievements::unlock_earned;
use crate::constants::achievement_names::GRIM_REAPER;
use crate::constants::deltas;
use crate::pet::{adjust_stat, PetRecord};

/// A user-facing pet action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetAction {
    Feed,
    Play,
    Sleep,
    Reset,
}

impl PetAction {
    /// All actions in route order.
    pub const ALL: [PetAction; 4] = [
        PetAction::Feed,
        PetAction::Play,
        PetAction::Sleep,
        PetAction::Reset,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PetAction::Feed => "feed",
            PetAction::Play => "play",
            PetAction::Sleep => "sleep",
            PetAction::Reset => "reset",
        }
    }
}

impl fmt::Display for PetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown pet action: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for PetAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PetAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Stat deltas for one action, before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatDeltas {
    pub hunger: i16,
    pub happiness: i16,
    pub energy: i16,
}

/// Deltas for a stat-changing action. `Reset` has none; it replaces the pet.
pub fn action_deltas(action: PetAction) -> Option<StatDeltas> {
    match action {
        PetAction::Feed => Some(StatDeltas {
            hunger: deltas::FEED_HUNGER,
            happiness: 0,
            energy: deltas::FEED_ENERGY,
        }),
        PetAction::Play => Some(StatDeltas {
            hunger: deltas::PLAY_HUNGER,
            happiness: deltas::PLAY_HAPPINESS,
            energy: deltas::PLAY_ENERGY,
        }),
        PetAction::Sleep => Some(StatDeltas {
            hunger: deltas::SLEEP_HUNGER,
            happiness: 0,
            energy: deltas::SLEEP_ENERGY,
        }),
        PetAction::Reset => None,
    }
}

/// Apply deltas to a pet's stats, clamping each to `[0, 100]`.
pub fn apply_stat_deltas(pet: &mut PetRecord, d: StatDeltas) {
    pet.hunger = adjust_stat(pet.hunger, d.hunger);
    pet.happiness = adjust_stat(pet.happiness, d.happiness);
    pet.energy = adjust_stat(pet.energy, d.energy);
}

/// Summary of what a single transition did to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// False when the transition was refused (acting on a dead pet).
    pub applied: bool,
    /// The pet went from alive to dead during this transition.
    pub died: bool,
    /// Achievement names added by this transition.
    pub unlocked: Vec<&'static str>,
}

impl Transition {
    fn refused() -> Self {
        Self::default()
    }
}

/// The completion step every transition ends with: clamp, recompute
/// `is_alive`, then unlock whatever is now earned.
///
/// Runs even when nothing changed. This is also the internal
/// "auto-update" step; it is not a user-facing action.
pub fn complete_transition(pet: &mut PetRecord) -> Vec<&'static str> {
    pet.clamp_stats();
    pet.refresh_alive();
    unlock_earned(pet)
}

/// Apply a user action to a pet in place.
///
/// Feed, play and sleep on a dead pet are refused and leave the record
/// untouched. Reset is always legal.
pub fn apply_action(pet: &mut PetRecord, action: PetAction) -> Transition {
    let Some(d) = action_deltas(action) else {
        return reset(pet);
    };
    if !pet.is_alive {
        return Transition::refused();
    }

    apply_stat_deltas(pet, d);
    let counters = &mut pet.achievements;
    match action {
        PetAction::Feed => counters.feed_count += 1,
        PetAction::Play => counters.play_count += 1,
        PetAction::Sleep => counters.sleep_count += 1,
        PetAction::Reset => {}
    }

    let unlocked = complete_transition(pet);
    Transition {
        applied: true,
        died: !pet.is_alive,
        unlocked,
    }
}

/// Replace the pet with a fresh one. The name and the unlocked set carry
/// over; a dead pet leaves "Grim Reaper" behind if it had not been
/// recorded yet.
fn reset(pet: &mut PetRecord) -> Transition {
    let mut unlocked = Vec::new();
    if !pet.is_alive && pet.achievements.unlock(GRIM_REAPER) {
        unlocked.push(GRIM_REAPER);
    }

    let mut fresh = PetRecord::new(std::mem::take(&mut pet.name));
    fresh.achievements.unlocked = std::mem::take(&mut pet.achievements.unlocked);
    *pet = fresh;

    unlocked.extend(complete_transition(pet));
    Transition {
        applied: true,
        died: false,
        unlocked,
    }
}
