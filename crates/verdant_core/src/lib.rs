//! # Verdant Core
//!
//! The simulation engine for Verdant, a flocking artificial life world.
//!
//! This crate contains the deterministic simulation logic:
//! - A point quadtree for proximity queries
//! - Reynolds steering and flocking behaviors
//! - Agent lifecycle: metabolism, foraging, pairing and reproduction
//! - Local food regrowth
//! - The world tick that drives all of it
//!
//! ## Example
//!
//! ```
//! use verdant_core::config::AppConfig;
//! use verdant_core::world::World;
//!
//! let mut config = AppConfig::default();
//! config.world.seed = Some(42);
//! config.world.initial_population = 10;
//!
//! let mut world = World::new(config).expect("default config is valid");
//! let report = world.update();
//! assert_eq!(report.tick, 1);
//! assert_eq!(world.tick(), 1);
//! ```

pub mod behavior;
pub mod config;
pub mod error;
pub mod food;
pub mod lifecycle;
pub mod metrics;
pub mod pairing;
pub mod quadtree;
pub mod steering;
pub mod world;
