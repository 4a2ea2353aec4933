use super::geometry::Vector2;
use super::ids::FoodId;
use serde::{Deserialize, Serialize};

/// Stationary food resource.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub pos: Vector2,
    /// Energy granted when eaten.
    pub nutritional_value: f64,
    /// Set by the eater; the world removes eaten food during cleanup.
    pub eaten: bool,
}

impl Food {
    #[must_use]
    pub fn new(id: FoodId, pos: Vector2, nutritional_value: f64) -> Self {
        Self {
            id,
            pos,
            nutritional_value,
            eaten: false,
        }
    }
}
