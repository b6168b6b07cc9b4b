//! Passive decay applied by the periodic ticker.

use crate::actions::{apply_stat_deltas, complete_transition, StatDeltas, Transition};
use crate::constants::deltas;
use crate::pet::PetRecord;

/// Stat drift for one decay pass.
pub const DECAY_DELTAS: StatDeltas = StatDeltas {
    hunger: deltas::DECAY_HUNGER,
    happiness: deltas::DECAY_HAPPINESS,
    energy: deltas::DECAY_ENERGY,
};

/// Age a pet by one decay step. Dead pets are left alone.
pub fn apply_decay(pet: &mut PetRecord) -> Transition {
    if !pet.is_alive {
        return Transition::default();
    }
    apply_stat_deltas(pet, DECAY_DELTAS);
    let unlocked = complete_transition(pet);
    Transition {
        applied: true,
        died: !pet.is_alive,
        unlocked,
    }
}

/// Number of decay passes a pet with these stats survives, assuming no
/// user interaction. `None` if already dead.
pub fn passes_until_death(pet: &PetRecord) -> Option<u32> {
    if !pet.is_alive {
        return None;
    }
    let mut probe = pet.clone();
    let mut passes = 0;
    while probe.is_alive {
        apply_decay(&mut probe);
        passes += 1;
    }
    Some(passes)
}
