use super::ids::{AgentId, FoodId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    Starvation,
    OldAge,
}

/// Something that happened during a world tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LifeEvent {
    Birth {
        id: AgentId,
        parents: (AgentId, AgentId),
        generation: u32,
    },
    Death {
        id: AgentId,
        cause: DeathCause,
    },
    FoodEaten {
        food: FoodId,
        by: AgentId,
    },
    FoodSpawned {
        food: FoodId,
    },
}
