//! Game constants — stat bounds, action deltas, achievement names.
//!
//! Plain values with no storage dependency. The server, the decay ticker
//! and the simtest harness all read these.

/// Lowest value any stat can hold.
pub const STAT_MIN: u8 = 0;
/// Highest value any stat can hold.
pub const STAT_MAX: u8 = 100;
/// Starting value for hunger, happiness and energy.
pub const STAT_DEFAULT: u8 = 50;

/// Name given to a pet when the owner does not pick one.
pub const DEFAULT_PET_NAME: &str = "Pixel";

/// Counter value at which the count-based achievements unlock.
pub const COUNT_THRESHOLD: u32 = 5;

pub mod deltas {
    // Feed
    pub const FEED_HUNGER: i16 = -15;
    pub const FEED_ENERGY: i16 = 5;
    // Play
    pub const PLAY_HAPPINESS: i16 = 15;
    pub const PLAY_ENERGY: i16 = -10;
    pub const PLAY_HUNGER: i16 = 5;
    // Sleep
    pub const SLEEP_ENERGY: i16 = 30;
    pub const SLEEP_HUNGER: i16 = 10;
    // Passive decay, applied once per ticker pass
    pub const DECAY_HUNGER: i16 = 2;
    pub const DECAY_HAPPINESS: i16 = -1;
    pub const DECAY_ENERGY: i16 = -1;
}

pub mod achievement_names {
    pub const FEEDER_NOVICE: &str = "Feeder Novice";
    pub const PLAYTIME_PRO: &str = "Playtime Pro";
    pub const SLEEP_EXPERT: &str = "Sleep Expert";
    pub const GRIM_REAPER: &str = "Grim Reaper";
}
