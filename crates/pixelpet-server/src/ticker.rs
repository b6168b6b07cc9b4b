//! Decay ticker — ages every living pet once per period.
//!
//! Each pass walks every stored user, applies one decay step to living
//! pets and writes the record back. A failure on one record is logged and
//! the pass moves on to the next user.

use std::sync::Arc;
use std::time::Duration;

use pixelpet_logic::apply_decay;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::store::{StoreError, UserStore};

/// Outcome counts for one decay pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecayReport {
    pub decayed: usize,
    pub skipped_dead: usize,
    pub died: usize,
    pub failed: usize,
}

impl DecayReport {
    pub fn is_empty(&self) -> bool {
        self.decayed == 0 && self.skipped_dead == 0 && self.failed == 0
    }
}

enum RecordOutcome {
    Decayed { died: bool },
    SkippedDead,
}

fn decay_one(store: &dyn UserStore, username: &str) -> Result<RecordOutcome, StoreError> {
    let mut account = store.load(username)?;
    let transition = apply_decay(&mut account.pet);
    if !transition.applied {
        return Ok(RecordOutcome::SkippedDead);
    }
    store.save(&account)?;
    if transition.died {
        log::info!("pet {:?} of {} died of neglect", account.pet.name, username);
    }
    Ok(RecordOutcome::Decayed {
        died: transition.died,
    })
}

/// Run one decay pass over every stored user.
pub fn run_decay_pass(store: &dyn UserStore) -> DecayReport {
    let mut report = DecayReport::default();

    let usernames = match store.usernames() {
        Ok(names) => names,
        Err(e) => {
            log::error!("decay pass could not list users: {e}");
            report.failed += 1;
            return report;
        }
    };

    for username in usernames {
        match decay_one(store, &username) {
            Ok(RecordOutcome::Decayed { died }) => {
                report.decayed += 1;
                if died {
                    report.died += 1;
                }
            }
            Ok(RecordOutcome::SkippedDead) => report.skipped_dead += 1,
            Err(e) => {
                log::warn!("decay skipped for {username}: {e}");
                report.failed += 1;
            }
        }
    }

    report
}

/// Run decay passes forever, the first one a full `period` from now.
pub async fn run_decay_ticker(store: Arc<dyn UserStore>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let store = store.clone();
        let report = match tokio::task::spawn_blocking(move || run_decay_pass(store.as_ref())).await
        {
            Ok(report) => report,
            Err(e) => {
                log::error!("decay pass panicked: {e}");
                continue;
            }
        };
        if !report.is_empty() {
            log::info!(
                "decay pass: {} decayed, {} died, {} already dead, {} failed",
                report.decayed,
                report.died,
                report.skipped_dead,
                report.failed
            );
        }
    }
}

/// Spawn [`run_decay_ticker`] on the current runtime.
pub fn spawn_decay_ticker(
    store: Arc<dyn UserStore>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(run_decay_ticker(store, period))
}
