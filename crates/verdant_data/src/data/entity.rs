use super::geometry::Vector2;
use super::ids::{AgentId, FoodId};
use serde::{Deserialize, Serialize};

/// Motion state of an agent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Kinematics {
    pub pos: Vector2,
    pub vel: Vector2,
    /// Forces accumulated this tick; reset after integration.
    pub acc: Vector2,
    pub max_speed: f64,
    pub max_force: f64,
    /// Drifting angle used by the wander behavior.
    pub wander_theta: f64,
}

/// Heritable traits, fixed at birth.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genome {
    pub size: f64,
    pub max_age: f64,
    pub min_reproduction_age: f64,
    pub max_reproduction_age: f64,
    pub energy_max: f64,
    /// At or below this energy the agent goes looking for food.
    pub hunger_level: f64,
    /// Food in range must be at least this for the agent to reproduce.
    pub reproduction_food_threshold: f64,
    /// Life in range must be at most this for the agent to reproduce.
    pub reproduction_life_threshold: f64,
    pub food_scan_max_distance: f64,
}

/// Mutable per-tick budget of an agent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vitals {
    pub age: f64,
    pub energy: f64,
    pub reproduction_cool_down: u32,
    pub dead: bool,
}

/// What the agent saw during its last scan.
///
/// `closest_food` is a handle: it may point at food that has since been
/// eaten or removed and must be resolved through the world before use.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Perception {
    pub closest_food: Option<FoodId>,
    pub food_in_range: usize,
    pub life_in_range: usize,
}

/// An autonomous organism.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Life {
    pub id: AgentId,
    pub parents: Option<(AgentId, AgentId)>,
    pub generation: u32,
    /// Flocking agents steer with separation, alignment and cohesion.
    pub flocks: bool,
    pub kinematics: Kinematics,
    pub genome: Genome,
    pub vitals: Vitals,
    pub perception: Perception,
}

impl Life {
    #[must_use]
    pub fn pos(&self) -> Vector2 {
        self.kinematics.pos
    }

    #[must_use]
    pub fn vel(&self) -> Vector2 {
        self.kinematics.vel
    }

    /// Facing direction in radians, for display.
    #[must_use]
    pub fn heading(&self) -> f64 {
        self.kinematics.vel.heading()
    }

    #[must_use]
    pub fn is_hungry(&self) -> bool {
        self.vitals.energy <= self.genome.hunger_level
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.vitals.dead
    }
}

/// Behavioral state, derived from an agent's fields every tick and never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeStatus {
    Flocking,
    SeekingMate,
    SeekingFood,
    Wandering,
    Dead,
}
