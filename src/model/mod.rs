pub mod behavior {
    pub use verdant_core::behavior::*;
}
pub mod config {
    pub use verdant_core::config::*;
}
pub mod error {
    pub use verdant_core::error::*;
}
pub mod food {
    pub use verdant_core::food::*;
    pub use verdant_data::Food;
}
pub mod lifecycle {
    pub use verdant_core::lifecycle::*;
}
pub mod metrics {
    pub use verdant_core::metrics::*;
}
pub mod pairing {
    pub use verdant_core::pairing::*;
}
pub mod quadtree {
    pub use verdant_core::quadtree::*;
}
pub mod steering {
    pub use verdant_core::steering::*;
}
pub mod world {
    pub use verdant_core::world::*;
}

pub mod state {
    pub use verdant_data::*;
}
