use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

use crate::model::config::AppConfig;
use crate::model::metrics::{Metrics, Totals};
use crate::model::world::World;

/// Headless driver: steps a world and keeps run statistics.
pub struct App {
    pub running: bool,
    pub world: World,
    pub metrics: Metrics,
}

/// End-of-run summary, printed by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub population: usize,
    pub food: usize,
    pub extinct: bool,
    pub mean_tick_us: u64,
    pub fingerprint: String,
    pub totals: Totals,
}

impl App {
    pub fn new(config: AppConfig, log_interval: u64) -> Result<Self> {
        let world = World::new(config).context("Failed to create world")?;
        let mut metrics = Metrics::new(log_interval);
        for agent in world.agents() {
            metrics.observe_generation(agent.generation);
        }
        Ok(Self {
            running: true,
            world,
            metrics,
        })
    }

    /// Loads `path` when it exists, otherwise uses defaults.
    pub fn load_config(path: &Path) -> Result<AppConfig> {
        if path.exists() {
            AppConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
        } else {
            tracing::info!(path = %path.display(), "Config not found, using defaults");
            Ok(AppConfig::default())
        }
    }

    /// One world tick. Stops the app once the population is gone.
    pub fn step(&mut self) {
        let started = Instant::now();
        let report = self.world.update();
        self.metrics.record_tick(&report, started.elapsed());
        if self.world.is_extinct() {
            tracing::info!(tick = report.tick, "Population extinct");
            self.running = false;
        }
    }

    /// Steps up to `ticks` times, stopping early on extinction.
    pub fn run(&mut self, ticks: u64) -> RunSummary {
        for _ in 0..ticks {
            if !self.running {
                break;
            }
            self.step();
        }
        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.world.tick(),
            population: self.world.agents().len(),
            food: self.world.food().len(),
            extinct: self.world.is_extinct(),
            mean_tick_us: self.metrics.mean_tick_time().as_micros() as u64,
            fingerprint: self.world.config().fingerprint(),
            totals: self.metrics.totals().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.world.seed = Some(5);
        config.world.width = 200;
        config.world.height = 200;
        config.world.initial_population = 8;
        config.world.initial_food = 40;
        config
    }

    #[test]
    fn test_run_counts_ticks() {
        let mut app = App::new(small_config(), 0).expect("valid config");
        let summary = app.run(25);
        assert_eq!(summary.ticks, 25);
        assert_eq!(app.metrics.tick_count(), 25);
        assert!(!summary.extinct);
    }

    #[test]
    fn test_empty_world_stops_immediately() {
        let mut config = small_config();
        config.world.initial_population = 0;
        let mut app = App::new(config, 0).expect("valid config");
        let summary = app.run(100);
        assert_eq!(summary.ticks, 1);
        assert!(summary.extinct);
        assert!(!app.running);
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let config = App::load_config(Path::new("definitely/not/here.toml")).expect("defaults");
        assert_eq!(config.world.width, 800);
    }
}
