//! Achievement evaluation.
//!
//! Each achievement is a `(predicate, name)` row in [`ACHIEVEMENT_TABLE`].
//! Every row is checked after every state change; unlocking is additive
//! and idempotent, so row order carries no meaning.

use crate::constants::achievement_names::{FEEDER_NOVICE, GRIM_REAPER, PLAYTIME_PRO, SLEEP_EXPERT};
use crate::constants::COUNT_THRESHOLD;
use crate::pet::PetRecord;

/// One unlock rule.
pub struct AchievementRule {
    pub name: &'static str,
    pub predicate: fn(&PetRecord) -> bool,
}

/// All unlock rules.
pub const ACHIEVEMENT_TABLE: [AchievementRule; 4] = [
    AchievementRule {
        name: FEEDER_NOVICE,
        predicate: |pet| pet.achievements.feed_count >= COUNT_THRESHOLD,
    },
    AchievementRule {
        name: PLAYTIME_PRO,
        predicate: |pet| pet.achievements.play_count >= COUNT_THRESHOLD,
    },
    AchievementRule {
        name: SLEEP_EXPERT,
        predicate: |pet| pet.achievements.sleep_count >= COUNT_THRESHOLD,
    },
    AchievementRule {
        name: GRIM_REAPER,
        predicate: |pet| !pet.is_alive,
    },
];

/// Names whose conditions currently hold, whether or not they are
/// already unlocked.
pub fn evaluate(pet: &PetRecord) -> Vec<&'static str> {
    ACHIEVEMENT_TABLE
        .iter()
        .filter(|rule| (rule.predicate)(pet))
        .map(|rule| rule.name)
        .collect()
}

/// Union [`evaluate`] into the pet's unlocked set.
///
/// Returns only the names that were newly added.
pub fn unlock_earned(pet: &mut PetRecord) -> Vec<&'static str> {
    let earned = evaluate(pet);
    earned
        .into_iter()
        .filter(|name| pet.achievements.unlock(name))
        .collect()
}
