//! Pure pet logic for PixelPet.
//!
//! This crate contains all game rules that are independent of storage,
//! HTTP, or the clock. Functions take a [`PetRecord`] by reference and
//! mutate it in place, making them unit-testable and shared between the
//! server, its decay ticker and the native simtest harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`achievements`] | Declarative unlock table and evaluator |
//! | [`actions`] | Feed/play/sleep/reset transitions and the dead-pet rule |
//! | [`constants`] | Stat bounds, deltas, achievement names |
//! | [`decay`] | Passive decay step for the periodic ticker |
//! | [`mood`] | Status-line mood derived from stats |
//! | [`pet`] | The pet record and its invariants |
//!
//! # State machine
//!
//! A pet is either alive or dead. Any action or decay step may kill it;
//! only `reset` brings it back.
//!
//! ```
//! use pixelpet_logic::{apply_action, PetAction, PetRecord};
//!
//! let mut pet = PetRecord::new("Pixel");
//! apply_action(&mut pet, PetAction::Feed);
//! assert_eq!(pet.hunger, 35);
//! assert!(pet.is_alive);
//! ```

pub mod achievements;
pub mod actions;
pub mod constants;
pub mod decay;
pub mod mood;
pub mod pet;

pub use actions::{apply_action, complete_transition, PetAction, Transition};
pub use decay::apply_decay;
pub use mood::{mood, Mood};
pub use pet::{Achievements, PetRecord};
