//! PixelPet Headless Simulation Harness
//!
//! Validates pure pet logic without the server.
//! Runs entirely in-process — no storage, no networking.
//!
//! Usage:
//!   cargo run -p pixelpet-simtest
//!   cargo run -p pixelpet-simtest -- --verbose

use pixelpet_logic::achievements::ACHIEVEMENT_TABLE;
use pixelpet_logic::constants::achievement_names::{
    FEEDER_NOVICE, GRIM_REAPER, PLAYTIME_PRO, SLEEP_EXPERT,
};
use pixelpet_logic::decay::passes_until_death;
use pixelpet_logic::{apply_action, apply_decay, mood, Mood, PetAction, PetRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== PixelPet Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Single-action deltas
    results.extend(validate_transitions(verbose));

    // 2. Achievement unlocks
    results.extend(validate_achievements(verbose));

    // 3. Decay & death
    results.extend(validate_decay(verbose));

    // 4. Reset semantics
    results.extend(validate_reset(verbose));

    // 5. Random-walk invariant sweep
    results.extend(validate_random_walks(verbose));

    // 6. Mood table
    results.extend(validate_mood(verbose));

    // 7. JSON wire shape
    results.extend(validate_wire_shape(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn stats(pet: &PetRecord) -> (u8, u8, u8) {
    (pet.hunger, pet.happiness, pet.energy)
}

fn invariants_hold(pet: &PetRecord) -> bool {
    pet.hunger <= 100
        && pet.happiness <= 100
        && pet.energy <= 100
        && pet.is_alive == (pet.hunger < 100 && pet.happiness > 0 && pet.energy > 0)
}

// ── 1. Transitions ──────────────────────────────────────────────────────

fn validate_transitions(_verbose: bool) -> Vec<TestResult> {
    println!("--- Transitions ---");
    let expected = [
        (PetAction::Feed, (35, 50, 55)),
        (PetAction::Play, (55, 65, 40)),
        (PetAction::Sleep, (60, 50, 80)),
        (PetAction::Reset, (50, 50, 50)),
    ];

    expected
        .into_iter()
        .map(|(action, want)| {
            let mut pet = PetRecord::default();
            apply_action(&mut pet, action);
            check(
                &format!("transition_{action}"),
                stats(&pet) == want,
                format!("{:?} → {:?} (want {:?})", (50, 50, 50), stats(&pet), want),
            )
        })
        .collect()
}

// ── 2. Achievements ─────────────────────────────────────────────────────

fn validate_achievements(verbose: bool) -> Vec<TestResult> {
    println!("--- Achievements ---");
    let mut results = Vec::new();

    let mut pet = PetRecord::default();
    for _ in 0..5 {
        apply_action(&mut pet, PetAction::Feed);
    }
    let only_feeder = pet.achievements.unlocked.len() == 1
        && pet.achievements.is_unlocked(FEEDER_NOVICE);
    results.push(check(
        "achievement_feeder_novice",
        only_feeder && pet.hunger == 0,
        format!(
            "5 feeds → hunger={} energy={} unlocked={:?}",
            pet.hunger, pet.energy, pet.achievements.unlocked
        ),
    ));

    // Five plays from default also exhaust the pet on the last one.
    let mut pet = PetRecord::default();
    for _ in 0..5 {
        apply_action(&mut pet, PetAction::Play);
    }
    results.push(check(
        "achievement_playtime_pro_and_exhaustion",
        pet.achievements.is_unlocked(PLAYTIME_PRO)
            && pet.achievements.is_unlocked(GRIM_REAPER)
            && !pet.is_alive,
        format!(
            "5 plays → energy={} alive={} unlocked={:?}",
            pet.energy, pet.is_alive, pet.achievements.unlocked
        ),
    ));

    // Alternate feed and sleep so hunger never reaches 100.
    let mut pet = PetRecord::default();
    for _ in 0..5 {
        apply_action(&mut pet, PetAction::Sleep);
        apply_action(&mut pet, PetAction::Feed);
    }
    results.push(check(
        "achievement_sleep_expert_survivable",
        pet.achievements.is_unlocked(SLEEP_EXPERT) && pet.is_alive,
        format!("unlocked={:?}", pet.achievements.unlocked),
    ));

    if verbose {
        println!("  Achievement table:");
        for rule in &ACHIEVEMENT_TABLE {
            println!("    {}", rule.name);
        }
    }

    results
}

// ── 3. Decay ────────────────────────────────────────────────────────────

fn validate_decay(_verbose: bool) -> Vec<TestResult> {
    println!("--- Decay & Death ---");
    let mut results = Vec::new();

    let mut pet = PetRecord::default();
    apply_decay(&mut pet);
    results.push(check(
        "decay_single_step",
        stats(&pet) == (52, 49, 49),
        format!("one pass → {:?}", stats(&pet)),
    ));

    let lifetime = passes_until_death(&PetRecord::default());
    results.push(check(
        "decay_lifetime_from_default",
        lifetime == Some(25),
        format!("untouched pet survives {lifetime:?} passes"),
    ));

    let mut pet = PetRecord::default();
    while pet.is_alive {
        apply_decay(&mut pet);
    }
    let dead = pet.clone();
    apply_decay(&mut pet);
    results.push(check(
        "decay_skips_dead",
        pet == dead,
        "dead pet unchanged by further decay",
    ));
    results.push(check(
        "decay_death_unlocks_grim_reaper",
        dead.achievements.is_unlocked(GRIM_REAPER),
        format!("unlocked={:?}", dead.achievements.unlocked),
    ));

    results
}

// ── 4. Reset ────────────────────────────────────────────────────────────

fn validate_reset(_verbose: bool) -> Vec<TestResult> {
    println!("--- Reset ---");
    let mut results = Vec::new();

    let mut pet = PetRecord::new("Bit");
    pet.happiness = 1;
    apply_decay(&mut pet);
    let before = pet.clone();
    for action in [PetAction::Feed, PetAction::Play, PetAction::Sleep] {
        apply_action(&mut pet, action);
    }
    results.push(check(
        "reset_dead_actions_noop",
        pet == before,
        "feed/play/sleep on a dead pet change nothing",
    ));

    apply_action(&mut pet, PetAction::Reset);
    results.push(check(
        "reset_revives",
        pet.is_alive && stats(&pet) == (50, 50, 50) && pet.name == "Bit",
        format!("name={} stats={:?}", pet.name, stats(&pet)),
    ));
    results.push(check(
        "reset_keeps_grim_reaper",
        pet.achievements.is_unlocked(GRIM_REAPER) && pet.achievements.feed_count == 0,
        format!("unlocked={:?}", pet.achievements.unlocked),
    ));

    results
}

// ── 5. Random walks ─────────────────────────────────────────────────────

fn validate_random_walks(verbose: bool) -> Vec<TestResult> {
    println!("--- Random Walks ---");
    const WALKS: u64 = 200;
    const STEPS: usize = 1000;

    let mut violations = 0;
    let mut shrinks = 0;
    let mut deaths = 0;
    for seed in 0..WALKS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pet = PetRecord::default();
        for _ in 0..STEPS {
            let unlocked_before = pet.achievements.unlocked.clone();
            let t = match rng.gen_range(0..12) {
                0 => apply_action(&mut pet, PetAction::Reset),
                1..=4 => apply_decay(&mut pet),
                n => apply_action(&mut pet, PetAction::ALL[n % 3]),
            };
            if t.died {
                deaths += 1;
            }
            if !invariants_hold(&pet) {
                violations += 1;
            }
            if !unlocked_before.is_subset(&pet.achievements.unlocked) {
                shrinks += 1;
            }
        }
    }

    if verbose {
        println!("  {WALKS} walks × {STEPS} steps, {deaths} deaths");
    }

    vec![
        check(
            "walk_invariants",
            violations == 0,
            format!("{violations} invariant violations"),
        ),
        check(
            "walk_unlocks_monotonic",
            shrinks == 0,
            format!("{shrinks} unlock-set shrinks"),
        ),
        check(
            "walk_deaths_observed",
            deaths > 0,
            format!("{deaths} deaths across all walks"),
        ),
    ]
}

// ── 6. Mood ─────────────────────────────────────────────────────────────

fn validate_mood(_verbose: bool) -> Vec<TestResult> {
    println!("--- Mood ---");
    let cases = [
        ((50, 50, 50), Mood::Okay),
        ((85, 10, 10), Mood::Starving),
        ((50, 10, 50), Mood::Lonely),
        ((50, 50, 10), Mood::Tired),
        ((50, 90, 50), Mood::Loving),
        ((100, 50, 50), Mood::Departed),
    ];

    cases
        .into_iter()
        .map(|((hunger, happiness, energy), want)| {
            let mut pet = PetRecord::default();
            pet.hunger = hunger;
            pet.happiness = happiness;
            pet.energy = energy;
            pet.refresh_alive();
            let got = mood(&pet);
            check(
                &format!("mood_{want:?}").to_lowercase(),
                got == want,
                format!("{:?} → {:?}: {}", (hunger, happiness, energy), got, got.message()),
            )
        })
        .collect()
}

// ── 7. Wire shape ───────────────────────────────────────────────────────

fn validate_wire_shape(_verbose: bool) -> Vec<TestResult> {
    println!("--- Wire Shape ---");
    let mut pet = PetRecord::default();
    for _ in 0..5 {
        apply_action(&mut pet, PetAction::Feed);
    }

    let value = match serde_json::to_value(&pet) {
        Ok(v) => v,
        Err(e) => {
            return vec![check("wire_serialize", false, format!("serialize error: {e}"))];
        }
    };

    let keys = [
        "name",
        "hunger",
        "happiness",
        "energy",
        "isAlive",
        "achievements",
    ];
    let missing: Vec<_> = keys.iter().filter(|k| value.get(**k).is_none()).collect();
    let counters = &value["achievements"];
    let parsed: Result<PetRecord, _> = serde_json::from_value(value.clone());

    vec![
        check(
            "wire_top_level_keys",
            missing.is_empty(),
            format!("missing keys: {missing:?}"),
        ),
        check(
            "wire_counter_keys",
            counters["feedCount"] == 5 && counters["unlocked"].is_array(),
            format!("achievements={counters}"),
        ),
        check(
            "wire_reparse",
            parsed.map(|p| p == pet).unwrap_or(false),
            "serialized record parses back to the same pet",
        ),
    ]
}
