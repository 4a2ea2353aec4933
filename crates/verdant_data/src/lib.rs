//! # Verdant Data
//!
//! Plain data shared by the Verdant engine and anything that observes it:
//! geometry, entity handles, agents, food and tick events.

pub mod data;

pub use data::entity::{Genome, Kinematics, Life, LifeStatus, Perception, Vitals};
pub use data::events::{DeathCause, LifeEvent};
pub use data::food::Food;
pub use data::geometry::{Rectangle, Vector2};
pub use data::ids::{AgentId, FoodId};
