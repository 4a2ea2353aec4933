use crate::config::{AppConfig, LifeConfig, ReproductionConfig};
use rand::Rng;
use verdant_data::{
    AgentId, DeathCause, Food, Genome, Kinematics, Life, LifeStatus, Perception, Vector2, Vitals,
};

/// Creates a first-generation style agent with randomized traits.
pub fn create_life_with_rng<R: Rng>(
    pos: Vector2,
    vel: Vector2,
    generation: u32,
    cfg: &LifeConfig,
    rng: &mut R,
) -> Life {
    let max_age = cfg.max_age.sample(rng);
    let min_reproduction_age = max_age / 100.0 * cfg.reproduction_age_margin_pct.sample(rng);
    let max_reproduction_age = max_age - max_age / 100.0 * cfg.reproduction_age_margin_pct.sample(rng);
    let energy_max = cfg.energy_max.sample(rng);
    let energy = energy_max * cfg.initial_energy_fraction.sample(rng);

    Life {
        id: AgentId::from_u128(rng.gen::<u128>()),
        parents: None,
        generation,
        flocks: cfg.flocks,
        kinematics: Kinematics {
            pos,
            vel,
            acc: Vector2::ZERO,
            max_speed: cfg.max_speed,
            max_force: cfg.max_force,
            wander_theta: std::f64::consts::FRAC_PI_2,
        },
        genome: Genome {
            size: cfg.size.sample(rng),
            max_age,
            min_reproduction_age,
            max_reproduction_age,
            energy_max,
            hunger_level: energy * cfg.hunger_fraction,
            reproduction_food_threshold: cfg.reproduction_food_threshold.sample(rng),
            reproduction_life_threshold: cfg.reproduction_life_threshold.sample(rng),
            food_scan_max_distance: cfg.food_scan_max_distance,
        },
        vitals: Vitals {
            age: 0.0,
            energy,
            reproduction_cool_down: 0,
            dead: false,
        },
        perception: Perception::default(),
    }
}

/// Spends upkeep and ages the agent. Returns the cause when this tick kills it.
///
/// Dead is terminal: an already dead agent is left untouched.
pub fn metabolize(life: &mut Life, cfg: &LifeConfig) -> Option<DeathCause> {
    if life.vitals.dead {
        return None;
    }

    life.vitals.energy -= life.genome.size * cfg.upkeep_per_size;
    life.vitals.age += cfg.age_step;

    let cause = if life.vitals.energy <= 0.0 {
        Some(DeathCause::Starvation)
    } else if life.vitals.age >= life.genome.max_age {
        Some(DeathCause::OldAge)
    } else {
        None
    };
    if cause.is_some() {
        life.vitals.dead = true;
    }
    cause
}

pub fn cool_down(life: &mut Life) {
    life.vitals.reproduction_cool_down = life.vitals.reproduction_cool_down.saturating_sub(1);
}

/// Whether the agent is currently a valid mate.
pub fn can_reproduce(life: &Life) -> bool {
    let v = &life.vitals;
    let g = &life.genome;
    !v.dead
        && v.reproduction_cool_down == 0
        && v.energy > g.hunger_level
        && v.age >= g.min_reproduction_age
        && v.age <= g.max_reproduction_age
        && life.perception.food_in_range as f64 >= g.reproduction_food_threshold
        && life.perception.life_in_range as f64 <= g.reproduction_life_threshold
}

/// Consumes `food`: energy rises by its nutrition, capped at `energy_max`.
pub fn eat(life: &mut Life, food: &mut Food) {
    life.vitals.energy = (life.vitals.energy + food.nutritional_value).min(life.genome.energy_max);
    food.eaten = true;
}

/// Biased blend of two parent values: one parent contributes 70-80%, the
/// other 20-30%, each side picked with even odds and each weight sampled
/// independently.
fn blend<R: Rng>(own: f64, partner: f64, cfg: &ReproductionConfig, rng: &mut R) -> f64 {
    if rng.gen_bool(0.5) {
        own * cfg.dominant_weight.sample(rng) + partner * cfg.recessive_weight.sample(rng)
    } else {
        own * cfg.recessive_weight.sample(rng) + partner * cfg.dominant_weight.sample(rng)
    }
}

fn blend_halved<R: Rng>(own: f64, partner: f64, cfg: &ReproductionConfig, rng: &mut R) -> f64 {
    blend(own, partner, cfg, rng) / 2.0
}

/// Produces one offspring of `parent` and `partner` at the parent's position.
///
/// Only the genome and starting energy are inherited. Cooldowns of the
/// parents and the pairing are the caller's business.
pub fn breed<R: Rng>(parent: &Life, partner: &Life, cfg: &AppConfig, rng: &mut R) -> Life {
    let r = &cfg.reproduction;
    let (a, b) = (&parent.genome, &partner.genome);

    // Size is the only trait whose blend is not halved.
    let genome = Genome {
        size: blend(a.size, b.size, r, rng),
        food_scan_max_distance: blend_halved(a.food_scan_max_distance, b.food_scan_max_distance, r, rng),
        max_age: blend_halved(a.max_age, b.max_age, r, rng),
        energy_max: blend_halved(a.energy_max, b.energy_max, r, rng),
        reproduction_food_threshold: blend_halved(
            a.reproduction_food_threshold,
            b.reproduction_food_threshold,
            r,
            rng,
        ),
        reproduction_life_threshold: blend_halved(
            a.reproduction_life_threshold,
            b.reproduction_life_threshold,
            r,
            rng,
        ),
        hunger_level: blend_halved(a.hunger_level, b.hunger_level, r, rng),
        min_reproduction_age: blend_halved(a.min_reproduction_age, b.min_reproduction_age, r, rng),
        max_reproduction_age: blend_halved(a.max_reproduction_age, b.max_reproduction_age, r, rng),
    };

    let energy_floor = genome.energy_max * r.offspring_energy_min_fraction;
    let energy = if genome.energy_max > energy_floor {
        rng.gen_range(energy_floor..genome.energy_max)
    } else {
        genome.energy_max
    };

    Life {
        id: AgentId::from_u128(rng.gen::<u128>()),
        parents: Some((parent.id, partner.id)),
        generation: parent.generation.max(partner.generation) + 1,
        flocks: cfg.life.flocks,
        kinematics: Kinematics {
            pos: parent.kinematics.pos,
            vel: Vector2::new(1.0, 0.0),
            acc: Vector2::ZERO,
            max_speed: cfg.life.max_speed,
            max_force: cfg.life.max_force,
            wander_theta: std::f64::consts::FRAC_PI_2,
        },
        genome,
        vitals: Vitals {
            age: 0.0,
            energy,
            reproduction_cool_down: r.cool_down_ticks,
            dead: false,
        },
        perception: Perception::default(),
    }
}

pub fn apply_force(life: &mut Life, force: Vector2) {
    life.kinematics.acc += force;
}

/// Euler step: velocity from acceleration (capped at `max_speed`), position
/// from velocity, then clears acceleration.
pub fn integrate(life: &mut Life) {
    let k = &mut life.kinematics;
    k.vel = (k.vel + k.acc).limit(k.max_speed);
    k.pos += k.vel;
    k.acc = Vector2::ZERO;
}

/// Toroidal wrap with a margin of the agent's size on every edge.
pub fn wrap_edges(life: &mut Life, width: f64, height: f64) {
    let size = life.genome.size;
    let pos = &mut life.kinematics.pos;
    if pos.x > width + size {
        pos.x = -size;
    } else if pos.x < -size {
        pos.x = width + size;
    }
    if pos.y > height + size {
        pos.y = -size;
    } else if pos.y < -size {
        pos.y = height + size;
    }
}

/// Behavioral state implied by the agent's current fields.
pub fn status(life: &Life, has_mate: bool, has_food_target: bool) -> LifeStatus {
    if life.vitals.dead {
        LifeStatus::Dead
    } else if has_mate && life.vitals.reproduction_cool_down == 0 {
        LifeStatus::SeekingMate
    } else if has_food_target && life.is_hungry() {
        LifeStatus::SeekingFood
    } else if life.flocks {
        LifeStatus::Flocking
    } else {
        LifeStatus::Wandering
    }
}
