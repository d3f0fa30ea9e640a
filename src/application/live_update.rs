// Live update loop - Random-walk simulation of bin fill levels
use crate::application::bin_board::BinBoard;
use crate::application::settle_scheduler::SettleScheduler;
use crate::domain::bin::{BinRecord, BinStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const LIVE_UPDATE_SCOPE: &str = "live-update";

/// Source of uniform samples in [0, 1)
pub trait FillRandom: Send {
    fn next_unit(&mut self) -> f64;
}

pub struct StdFillRandom {
    rng: StdRng,
}

impl StdFillRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl FillRandom for StdFillRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillUpdate {
    pub bin_id: String,
    pub fill_percent: f64,
    pub fill_label: String,
    pub status: BinStatus,
    pub status_label: &'static str,
    pub badge_class: &'static str,
    pub updated_at_ms: i64,
}

impl FillUpdate {
    pub fn from_record(record: &BinRecord) -> Self {
        let status = record.status();
        Self {
            bin_id: record.id.clone(),
            fill_percent: record.fill_percent(),
            fill_label: record.fill_label(),
            status,
            status_label: status.label(),
            badge_class: status.badge_class(),
            updated_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Receives the label and badge changes for displayed bins
pub trait DisplaySink: Send + Sync {
    fn publish(&self, update: FillUpdate);
}

#[derive(Debug, Clone)]
pub struct LiveUpdateSettings {
    pub start_delay: Duration,
    pub period: Duration,
    /// Chance that a given bin moves on a tick
    pub probability: f64,
    /// Largest perturbation in percentage points, either direction
    pub max_step: f64,
}

impl Default for LiveUpdateSettings {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_secs(3),
            period: Duration::from_secs(5),
            probability: 0.3,
            max_step: 5.0,
        }
    }
}

pub struct LiveUpdateLoop {
    board: Arc<BinBoard>,
    sink: Arc<dyn DisplaySink>,
    settings: LiveUpdateSettings,
    random: Box<dyn FillRandom>,
}

impl LiveUpdateLoop {
    pub fn new(
        board: Arc<BinBoard>,
        sink: Arc<dyn DisplaySink>,
        settings: LiveUpdateSettings,
        random: Box<dyn FillRandom>,
    ) -> Self {
        Self {
            board,
            sink,
            settings,
            random,
        }
    }

    /// One simulation step; returns the updates that were published
    pub fn tick(&mut self) -> Vec<FillUpdate> {
        let probability = self.settings.probability;
        let max_step = self.settings.max_step;
        let random = &mut self.random;

        let updates: Vec<FillUpdate> = self.board.update(|bins| {
            bins.iter_mut()
                .filter_map(|bin| {
                    if random.next_unit() >= probability {
                        return None;
                    }
                    let delta = random.next_unit() * 2.0 * max_step - max_step;
                    bin.apply_perturbation(delta);
                    Some(FillUpdate::from_record(bin))
                })
                .collect()
        });

        for update in &updates {
            tracing::trace!(bin = %update.bin_id, fill = update.fill_percent, "fill level moved");
            self.sink.publish(update.clone());
        }
        updates
    }

    /// Start ticking on the scheduler. The first tick lands one period after the start delay.
    pub fn start(mut self, scheduler: &SettleScheduler) {
        let start_delay = self.settings.start_delay;
        let period = self.settings.period;
        tracing::info!(?start_delay, ?period, "starting live update loop");

        scheduler.schedule(LIVE_UPDATE_SCOPE, start_delay, async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                self.tick();
            }
        });
    }
}
