//! Run statistics and logging setup.
//!
//! [`Metrics`] folds [`TickReport`]s into running totals and logs a summary
//! line at a fixed tick interval.

use crate::world::TickReport;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use verdant_data::{DeathCause, LifeEvent};

/// Totals over every tick recorded so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub ticks: u64,
    pub births: u64,
    pub starvations: u64,
    pub old_age_deaths: u64,
    pub food_eaten: u64,
    pub food_spawned: u64,
    pub index_rejections: u64,
    pub peak_population: usize,
    pub max_generation: u32,
}

pub struct Metrics {
    totals: Totals,
    log_interval: u64,
    tick_time: Duration,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    /// Creates a collector that logs every `log_interval` ticks. Zero
    /// disables periodic logging.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            totals: Totals::default(),
            log_interval,
            tick_time: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick and how long it took.
    pub fn record_tick(&mut self, report: &TickReport, duration: Duration) {
        let t = &mut self.totals;
        t.ticks += 1;
        t.index_rejections += report.index_rejections as u64;
        t.peak_population = t.peak_population.max(report.population);
        self.tick_time += duration;

        for event in &report.events {
            match event {
                LifeEvent::Birth { generation, .. } => {
                    t.births += 1;
                    t.max_generation = t.max_generation.max(*generation);
                }
                LifeEvent::Death { cause, .. } => match cause {
                    DeathCause::Starvation => t.starvations += 1,
                    DeathCause::OldAge => t.old_age_deaths += 1,
                },
                LifeEvent::FoodEaten { .. } => t.food_eaten += 1,
                LifeEvent::FoodSpawned { .. } => t.food_spawned += 1,
            }
        }

        if self.log_interval > 0 && report.tick % self.log_interval == 0 {
            tracing::info!(
                tick = report.tick,
                population = report.population,
                food = report.food,
                births = t.births,
                deaths = t.starvations + t.old_age_deaths,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    /// Raises the recorded generation high-water mark, e.g. for the founders.
    pub fn observe_generation(&mut self, generation: u32) {
        self.totals.max_generation = self.totals.max_generation.max(generation);
    }

    #[must_use]
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.totals.ticks
    }

    /// Mean wall time per recorded tick.
    #[must_use]
    pub fn mean_tick_time(&self) -> Duration {
        match u32::try_from(self.totals.ticks) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.tick_time / n,
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a `tracing` subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive`. Does nothing if a global subscriber already exists.
pub fn init_logging(default_directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_data::{AgentId, FoodId};

    fn report(tick: u64, events: Vec<LifeEvent>) -> TickReport {
        TickReport {
            tick,
            events,
            index_rejections: 2,
            population: 10,
            food: 5,
        }
    }

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new(10);
        assert_eq!(metrics.tick_count(), 0);
        assert_eq!(metrics.mean_tick_time(), Duration::ZERO);
    }

    #[test]
    fn test_record_tick_counts_events() {
        let mut metrics = Metrics::new(0);
        let a = AgentId::from_u128(1);
        let b = AgentId::from_u128(2);
        metrics.record_tick(
            &report(
                1,
                vec![
                    LifeEvent::Birth {
                        id: AgentId::from_u128(3),
                        parents: (a, b),
                        generation: 4,
                    },
                    LifeEvent::Death {
                        id: a,
                        cause: DeathCause::Starvation,
                    },
                    LifeEvent::FoodEaten {
                        food: FoodId::from_u128(9),
                        by: b,
                    },
                ],
            ),
            Duration::from_millis(2),
        );
        metrics.record_tick(&report(2, Vec::new()), Duration::from_millis(4));

        let t = metrics.totals();
        assert_eq!(t.ticks, 2);
        assert_eq!(t.births, 1);
        assert_eq!(t.starvations, 1);
        assert_eq!(t.old_age_deaths, 0);
        assert_eq!(t.food_eaten, 1);
        assert_eq!(t.index_rejections, 4);
        assert_eq!(t.max_generation, 4);
        assert_eq!(metrics.mean_tick_time(), Duration::from_millis(3));
    }
}
