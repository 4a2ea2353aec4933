//! Configuration management for simulation parameters.
//!
//! Every tunable of the engine lives in [`AppConfig`]. The world receives it
//! at construction and hands the relevant section to each lifecycle and
//! steering call; nothing is read from global state.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults, missing keys keep defaults)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 800
//! height = 600
//! initial_population = 75
//! seed = 42
//!
//! [steering]
//! separation_weight = 15.0
//! cohesion_weight = 5.0
//!
//! [reproduction]
//! cool_down_ticks = 500
//! ```

use crate::error::{ConfigError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive-exclusive sampling range for randomized traits.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max)`. A collapsed span returns `min`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// World dimensions, initial population and seeding.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub initial_population: usize,
    pub initial_food: usize,
    /// Seed for the world RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            initial_population: 75,
            initial_food: 300,
            seed: None,
        }
    }
}

/// Point quadtree parameters for both the food and life indexes.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct IndexConfig {
    /// Points a leaf holds before it subdivides.
    pub capacity: usize,
    /// Nodes at this depth stop subdividing and hold any overflow.
    pub max_depth: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            max_depth: 24,
        }
    }
}

/// Steering and flocking constants and weights.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SteeringConfig {
    /// Arrival slows down inside this distance.
    pub slow_radius: f64,
    /// Ticks of target velocity to lead by when pursuing.
    pub prediction_factor: f64,
    pub wander_distance: f64,
    pub wander_radius: f64,
    /// Maximum change of the wander angle per call.
    pub wander_jitter: f64,
    pub separation_radius: f64,
    pub alignment_radius: f64,
    /// Cohesion radius as a multiple of the agent's size.
    pub flock_scan_size_factor: f64,
    pub separation_weight: f64,
    pub alignment_weight: f64,
    pub cohesion_weight: f64,
    /// Boost applied when cohesion is redirected toward a mate or food.
    pub priority_multiplier: f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            slow_radius: 20.0,
            prediction_factor: 10.0,
            wander_distance: 100.0,
            wander_radius: 50.0,
            wander_jitter: 0.3,
            separation_radius: 5.0,
            alignment_radius: 50.0,
            flock_scan_size_factor: 5.0,
            separation_weight: 15.0,
            alignment_weight: 0.3,
            cohesion_weight: 5.0,
            priority_multiplier: 25.0,
        }
    }
}

/// Birth trait ranges and metabolism of agents.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LifeConfig {
    pub max_speed: f64,
    pub max_force: f64,
    pub size: Span,
    pub max_age: Span,
    /// Percent of max age before reproduction starts and before death it ends.
    pub reproduction_age_margin_pct: Span,
    pub energy_max: Span,
    /// Starting energy as a fraction of `energy_max`.
    pub initial_energy_fraction: Span,
    /// Hunger level as a fraction of starting energy.
    pub hunger_fraction: f64,
    pub reproduction_food_threshold: Span,
    pub reproduction_life_threshold: Span,
    pub food_scan_max_distance: f64,
    pub food_search_max_scan_dist: f64,
    pub reproduction_max_scan_dist: f64,
    /// Energy spent per tick per unit of size.
    pub upkeep_per_size: f64,
    pub age_step: f64,
    pub flocks: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            max_speed: 1.25,
            max_force: 0.35,
            size: Span::new(2.0, 6.0),
            max_age: Span::new(350.0, 1500.0),
            reproduction_age_margin_pct: Span::new(5.0, 20.0),
            energy_max: Span::new(1500.0, 2750.0),
            initial_energy_fraction: Span::new(0.2, 1.0),
            hunger_fraction: 0.75,
            reproduction_food_threshold: Span::new(1.0, 4.0),
            reproduction_life_threshold: Span::new(4.0, 12.0),
            food_scan_max_distance: 75.0,
            food_search_max_scan_dist: 120.0,
            reproduction_max_scan_dist: 100.0,
            upkeep_per_size: 0.1,
            age_step: 0.2,
            flocks: true,
        }
    }
}

/// Mating and inheritance.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ReproductionConfig {
    pub mating_distance: f64,
    pub cool_down_ticks: u32,
    /// Weight range of the dominant parent in a trait blend.
    pub dominant_weight: Span,
    /// Weight range of the recessive parent in a trait blend.
    pub recessive_weight: Span,
    /// Offspring start with energy drawn from `[fraction * energy_max, energy_max)`.
    pub offspring_energy_min_fraction: f64,
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            mating_distance: 3.0,
            cool_down_ticks: 500,
            dominant_weight: Span::new(0.70, 0.80),
            recessive_weight: Span::new(0.20, 0.30),
            offspring_energy_min_fraction: 0.75,
        }
    }
}

/// Eating distances.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ForagingConfig {
    pub eating_distance: f64,
    /// Within `eating_distance * arrive_factor` the agent arrives instead of pursuing.
    pub arrive_factor: f64,
}

impl Default for ForagingConfig {
    fn default() -> Self {
        Self {
            eating_distance: 3.0,
            arrive_factor: 5.0,
        }
    }
}

/// Food nutrition and local spawning.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FoodConfig {
    pub nutrition: Span,
    /// Food ticks once every this many world ticks.
    pub spawn_interval: u64,
    /// Side of the square scanned for nearby food.
    pub density_scan: f64,
    /// Spawning only happens when fewer food items than this are nearby.
    pub density_threshold: usize,
    pub spawn_chance: f64,
    pub spawn_offset: f64,
    /// Both offset components must exceed this in magnitude.
    pub spawn_min_offset: f64,
    /// Cap on total food. `None` caps at the world width.
    pub max_food: Option<usize>,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            nutrition: Span::new(20.0, 100.0),
            spawn_interval: 5,
            density_scan: 100.0,
            density_threshold: 5,
            spawn_chance: 0.6,
            spawn_offset: 5.0,
            spawn_min_offset: 4.0,
            max_food: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub index: IndexConfig,
    pub steering: SteeringConfig,
    pub life: LifeConfig,
    pub reproduction: ReproductionConfig,
    pub foraging: ForagingConfig,
    pub food: FoodConfig,
}

fn ensure(condition: bool, msg: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::invalid(msg))
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns the first violated rule as [`ConfigError::Invalid`].
    ///
    /// # Validation Rules
    /// - World dimensions must be positive
    /// - Index capacity and depth must be positive
    /// - Distances, radii and costs must be non-negative
    /// - Chances must be in `[0.0, 1.0]`
    /// - Every span must have `min <= max`
    pub fn validate(&self) -> Result<()> {
        ensure(self.world.width > 0, "World width must be positive")?;
        ensure(self.world.height > 0, "World height must be positive")?;

        ensure(self.index.capacity > 0, "Index capacity must be positive")?;
        ensure(self.index.max_depth > 0, "Index max depth must be positive")?;

        let s = &self.steering;
        for (value, name) in [
            (s.slow_radius, "Slow radius"),
            (s.prediction_factor, "Prediction factor"),
            (s.wander_distance, "Wander distance"),
            (s.wander_radius, "Wander radius"),
            (s.wander_jitter, "Wander jitter"),
            (s.separation_radius, "Separation radius"),
            (s.alignment_radius, "Alignment radius"),
            (s.flock_scan_size_factor, "Flock scan size factor"),
        ] {
            ensure(
                value >= 0.0 && value.is_finite(),
                &format!("{name} must be non-negative"),
            )?;
        }

        let l = &self.life;
        ensure(l.max_speed >= 0.0, "Max speed must be non-negative")?;
        ensure(l.max_force >= 0.0, "Max force must be non-negative")?;
        ensure(l.upkeep_per_size >= 0.0, "Upkeep must be non-negative")?;
        ensure(l.age_step >= 0.0, "Age step must be non-negative")?;
        ensure(
            l.food_search_max_scan_dist >= 0.0 && l.reproduction_max_scan_dist >= 0.0,
            "Scan distances must be non-negative",
        )?;
        ensure(
            l.hunger_fraction >= 0.0 && l.hunger_fraction <= 1.0,
            "Hunger fraction must be in [0.0, 1.0]",
        )?;
        for (span, name) in [
            (l.size, "size"),
            (l.max_age, "max_age"),
            (l.reproduction_age_margin_pct, "reproduction_age_margin_pct"),
            (l.energy_max, "energy_max"),
            (l.initial_energy_fraction, "initial_energy_fraction"),
            (l.reproduction_food_threshold, "reproduction_food_threshold"),
            (l.reproduction_life_threshold, "reproduction_life_threshold"),
            (self.reproduction.dominant_weight, "dominant_weight"),
            (self.reproduction.recessive_weight, "recessive_weight"),
            (self.food.nutrition, "nutrition"),
        ] {
            ensure(span.is_valid(), &format!("Span {name} must have min <= max"))?;
        }

        let r = &self.reproduction;
        ensure(r.mating_distance >= 0.0, "Mating distance must be non-negative")?;
        ensure(
            r.offspring_energy_min_fraction >= 0.0 && r.offspring_energy_min_fraction <= 1.0,
            "Offspring energy fraction must be in [0.0, 1.0]",
        )?;

        ensure(
            self.foraging.eating_distance >= 0.0 && self.foraging.arrive_factor >= 1.0,
            "Eating distance must be non-negative and arrive factor at least 1",
        )?;

        let f = &self.food;
        ensure(f.spawn_interval > 0, "Food spawn interval must be positive")?;
        ensure(
            f.spawn_chance >= 0.0 && f.spawn_chance <= 1.0,
            "Food spawn chance must be in [0.0, 1.0]",
        )?;
        ensure(
            f.spawn_offset >= 0.0 && f.spawn_min_offset >= 0.0 && f.density_scan >= 0.0,
            "Food spawn distances must be non-negative",
        )?;

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Food cap, defaulting to the world width.
    #[must_use]
    pub fn max_food(&self) -> usize {
        self.food.max_food.unwrap_or(self.world.width as usize)
    }

    /// SHA-256 of the behavioral tunables, for tagging runs in logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.index).as_bytes());
        hasher.update(format!("{:?}", self.steering).as_bytes());
        hasher.update(format!("{:?}", self.life).as_bytes());
        hasher.update(format!("{:?}", self.reproduction).as_bytes());
        hasher.update(format!("{:?}", self.foraging).as_bytes());
        hasher.update(format!("{:?}", self.food).as_bytes());
        hex::encode(hasher.finalize())
    }
}
