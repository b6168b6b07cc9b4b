//! Mood derived from stats, for the client's status line.

use serde::Serialize;

use crate::pet::PetRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Departed,
    Starving,
    Lonely,
    Tired,
    Loving,
    Okay,
}

impl Mood {
    pub fn message(self) -> &'static str {
        match self {
            Mood::Departed => "Your pet has passed away",
            Mood::Starving => "I'm starving!",
            Mood::Lonely => "I'm so lonely...",
            Mood::Tired => "I need to sleep...",
            Mood::Loving => "I love you!",
            Mood::Okay => "I'm feeling okay!",
        }
    }
}

/// First matching condition wins; hunger outranks loneliness outranks
/// tiredness.
pub fn mood(pet: &PetRecord) -> Mood {
    if !pet.is_alive {
        Mood::Departed
    } else if pet.hunger > 80 {
        Mood::Starving
    } else if pet.happiness < 20 {
        Mood::Lonely
    } else if pet.energy < 20 {
        Mood::Tired
    } else if pet.happiness > 80 {
        Mood::Loving
    } else {
        Mood::Okay
    }
}
