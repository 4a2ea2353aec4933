pub mod macros;

use verdant_lib::model::config::AppConfig;
use verdant_lib::model::state::{
    AgentId, Food, FoodId, Genome, Kinematics, Life, Perception, Vector2, Vitals,
};
use verdant_lib::model::world::World;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    agents: Vec<Life>,
    food: Vec<Food>,
}

#[allow(dead_code)]
impl WorldBuilder {
    /// An empty 200x200 world with a fixed seed.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.width = 200;
        config.world.height = 200;
        config.world.initial_population = 0;
        config.world.initial_food = 0;
        config.world.seed = Some(42);
        Self {
            config,
            agents: Vec::new(),
            food: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Stops existing food from seeding new items.
    pub fn without_food_growth(mut self) -> Self {
        self.config.food.spawn_chance = 0.0;
        self
    }

    pub fn with_agent(mut self, life: Life) -> Self {
        self.agents.push(life);
        self
    }

    pub fn with_food(mut self, id: u128, x: f64, y: f64, nutrition: f64) -> Self {
        self.food
            .push(Food::new(FoodId::from_u128(id), Vector2::new(x, y), nutrition));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::empty(self.config).expect("Failed to create world in test builder");
        for life in self.agents {
            world.spawn_agent(life);
        }
        for item in self.food {
            world.spawn_food(item);
        }
        world
    }
}

/// Agent with fixed, unremarkable traits: far from old age, well fed,
/// never eligible to reproduce unless told otherwise.
#[allow(dead_code)]
pub struct LifeBuilder {
    life: Life,
}

#[allow(dead_code)]
impl LifeBuilder {
    pub fn new(id: u128) -> Self {
        Self {
            life: Life {
                id: AgentId::from_u128(id),
                parents: None,
                generation: 1,
                flocks: true,
                kinematics: Kinematics {
                    pos: Vector2::new(100.0, 100.0),
                    vel: Vector2::ZERO,
                    acc: Vector2::ZERO,
                    max_speed: 1.25,
                    max_force: 0.35,
                    wander_theta: std::f64::consts::FRAC_PI_2,
                },
                genome: Genome {
                    size: 2.0,
                    max_age: 1000.0,
                    min_reproduction_age: 500.0,
                    max_reproduction_age: 900.0,
                    energy_max: 2000.0,
                    hunger_level: 100.0,
                    reproduction_food_threshold: 1.0,
                    reproduction_life_threshold: 8.0,
                    food_scan_max_distance: 75.0,
                },
                vitals: Vitals {
                    age: 0.0,
                    energy: 1000.0,
                    reproduction_cool_down: 0,
                    dead: false,
                },
                perception: Perception::default(),
            },
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.life.kinematics.pos = Vector2::new(x, y);
        self
    }

    pub fn velocity(mut self, x: f64, y: f64) -> Self {
        self.life.kinematics.vel = Vector2::new(x, y);
        self
    }

    pub fn energy(mut self, energy: f64) -> Self {
        self.life.vitals.energy = energy;
        self
    }

    pub fn energy_max(mut self, energy_max: f64) -> Self {
        self.life.genome.energy_max = energy_max;
        self
    }

    pub fn hunger_level(mut self, level: f64) -> Self {
        self.life.genome.hunger_level = level;
        self
    }

    pub fn age(mut self, age: f64) -> Self {
        self.life.vitals.age = age;
        self
    }

    pub fn max_age(mut self, max_age: f64) -> Self {
        self.life.genome.max_age = max_age;
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.life.genome.size = size;
        self
    }

    pub fn generation(mut self, generation: u32) -> Self {
        self.life.generation = generation;
        self
    }

    pub fn solitary(mut self) -> Self {
        self.life.flocks = false;
        self
    }

    /// Old enough to mate and with a wide reproduction window.
    pub fn fertile(mut self) -> Self {
        self.life.genome.min_reproduction_age = 0.0;
        self.life.genome.max_reproduction_age = 900.0;
        self
    }

    pub fn build(self) -> Life {
        self.life
    }
}
