//! Per-tick choice of steering force and action.
//!
//! An agent always pursues its priorities in the same order: a cooled-down
//! mate first, then food when hungry, then its default motion. Flocking
//! agents fold that choice into the cohesion term of their flocking sum
//! with a boost; solitary agents use it directly and wander by default.

use crate::config::AppConfig;
use crate::steering::{self, Neighbor};
use rand::Rng;
use verdant_data::{AgentId, FoodId, Life, Vector2};

/// A resolved target for this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target<Id> {
    pub id: Id,
    pub pos: Vector2,
    pub vel: Vector2,
}

/// Mate and food the world resolved for an agent. Both are already
/// validated: the mate is alive and paired back, the food is uneaten.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Targets {
    pub mate: Option<Target<AgentId>>,
    pub food: Option<Target<FoodId>>,
}

/// Force to apply plus the actions the world should carry out.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Decision {
    pub force: Vector2,
    pub mate: Option<AgentId>,
    pub eat: Option<FoodId>,
}

/// What cohesion falls back to when neither a mate nor food applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Seek the centroid of nearby agents; priorities are boosted.
    Group,
    /// Wander; priorities are not boosted.
    Wander,
}

/// Chooses this tick's force and actions.
pub fn decide<R: Rng>(
    life: &mut Life,
    neighbors: &[Neighbor],
    targets: &Targets,
    cfg: &AppConfig,
    rng: &mut R,
) -> Decision {
    if !life.flocks {
        return compute_cohesion(life, neighbors, targets, Fallback::Wander, cfg, rng);
    }

    let s = &cfg.steering;
    let separation = steering::separate(&life.kinematics, neighbors, s) * s.separation_weight;
    let alignment = steering::align(&life.kinematics, neighbors, s) * s.alignment_weight;
    let cohesion = compute_cohesion(life, neighbors, targets, Fallback::Group, cfg, rng);

    Decision {
        force: separation + alignment + cohesion.force * s.cohesion_weight,
        ..cohesion
    }
}

/// Cohesion term, redirected toward a mate or food when one applies.
///
/// A mate within `mating_distance` is consummated. For a flocking agent the
/// evaluation then continues with food and group cohesion for this tick's
/// force; a solitary agent stops for the tick. Food within
/// `eating_distance` is eaten and contributes no force.
pub fn compute_cohesion<R: Rng>(
    life: &mut Life,
    neighbors: &[Neighbor],
    targets: &Targets,
    fallback: Fallback,
    cfg: &AppConfig,
    rng: &mut R,
) -> Decision {
    let k = &life.kinematics;
    let s = &cfg.steering;
    let boost = match fallback {
        Fallback::Group => s.priority_multiplier,
        Fallback::Wander => 1.0,
    };
    let mut decision = Decision::default();

    if let Some(mate) = targets.mate {
        if life.vitals.reproduction_cool_down == 0 {
            if k.pos.distance(mate.pos) <= cfg.reproduction.mating_distance {
                decision.mate = Some(mate.id);
                if fallback == Fallback::Wander {
                    return decision;
                }
            } else {
                decision.force = steering::pursue(k, mate.pos, mate.vel, s)
                    .set_magnitude(k.max_force)
                    * boost;
                return decision;
            }
        }
    }

    if let Some(food) = targets.food {
        if life.is_hungry() {
            let f = &cfg.foraging;
            let distance = k.pos.distance(food.pos);
            if distance <= f.eating_distance {
                decision.eat = Some(food.id);
                return decision;
            }
            let toward = if distance <= f.eating_distance * f.arrive_factor {
                steering::arrive(k, food.pos, s)
            } else {
                steering::pursue(k, food.pos, food.vel, s)
            };
            decision.force = toward.set_magnitude(k.max_force) * boost;
            return decision;
        }
    }

    decision.force = match fallback {
        Fallback::Group => {
            let radius = life.genome.size * s.flock_scan_size_factor;
            steering::cohere(&life.kinematics, neighbors, radius, s)
        }
        Fallback::Wander => steering::wander(&mut life.kinematics, rng, s),
    };
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::create_life_with_rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(flocks: bool) -> (Life, AppConfig, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let cfg = AppConfig::default();
        let mut life = create_life_with_rng(
            Vector2::new(100.0, 100.0),
            Vector2::new(1.0, 0.0),
            1,
            &cfg.life,
            &mut rng,
        );
        life.flocks = flocks;
        (life, cfg, rng)
    }

    fn mate_at(pos: Vector2) -> Option<Target<AgentId>> {
        Some(Target {
            id: AgentId::from_u128(99),
            pos,
            vel: Vector2::ZERO,
        })
    }

    fn food_at(pos: Vector2) -> Option<Target<FoodId>> {
        Some(Target {
            id: FoodId::from_u128(7),
            pos,
            vel: Vector2::ZERO,
        })
    }

    #[test]
    fn test_close_mate_is_consummated() {
        let (mut life, cfg, mut rng) = setup(false);
        let targets = Targets {
            mate: mate_at(Vector2::new(102.0, 100.0)),
            food: None,
        };
        let d = decide(&mut life, &[], &targets, &cfg, &mut rng);
        assert_eq!(d.mate, Some(AgentId::from_u128(99)));
        assert_eq!(d.force, Vector2::ZERO);
    }

    #[test]
    fn test_far_mate_is_pursued() {
        let (mut life, cfg, mut rng) = setup(false);
        let targets = Targets {
            mate: mate_at(Vector2::new(150.0, 100.0)),
            food: food_at(Vector2::new(50.0, 100.0)),
        };
        life.vitals.energy = life.genome.hunger_level;
        let d = decide(&mut life, &[], &targets, &cfg, &mut rng);
        assert_eq!(d.mate, None);
        assert!(d.force.x > 0.0);
        assert!((d.force.magnitude() - life.kinematics.max_force).abs() < 1e-9);
    }

    #[test]
    fn test_cooling_down_ignores_mate() {
        let (mut life, cfg, mut rng) = setup(false);
        life.vitals.reproduction_cool_down = 10;
        life.vitals.energy = life.genome.hunger_level;
        let targets = Targets {
            mate: mate_at(Vector2::new(101.0, 100.0)),
            food: food_at(Vector2::new(50.0, 100.0)),
        };
        let d = decide(&mut life, &[], &targets, &cfg, &mut rng);
        assert_eq!(d.mate, None);
        assert!(d.force.x < 0.0);
    }

    #[test]
    fn test_hungry_agent_eats_within_reach() {
        let (mut life, cfg, mut rng) = setup(true);
        life.vitals.energy = life.genome.hunger_level - 1.0;
        let targets = Targets {
            mate: None,
            food: food_at(Vector2::new(101.0, 101.0)),
        };
        let d = compute_cohesion(&mut life, &[], &targets, Fallback::Group, &cfg, &mut rng);
        assert_eq!(d.eat, Some(FoodId::from_u128(7)));
        assert_eq!(d.force, Vector2::ZERO);
    }

    #[test]
    fn test_sated_agent_ignores_food() {
        let (mut life, cfg, mut rng) = setup(true);
        life.vitals.energy = life.genome.hunger_level + 1.0;
        let targets = Targets {
            mate: None,
            food: food_at(Vector2::new(101.0, 101.0)),
        };
        let d = compute_cohesion(&mut life, &[], &targets, Fallback::Group, &cfg, &mut rng);
        assert_eq!(d.eat, None);
        assert_eq!(d.force, Vector2::ZERO);
    }

    #[test]
    fn test_flocking_boosts_food_pursuit() {
        let (mut life, cfg, mut rng) = setup(true);
        life.vitals.energy = 1.0;
        let targets = Targets {
            mate: None,
            food: food_at(Vector2::new(110.0, 100.0)),
        };
        let d = compute_cohesion(&mut life, &[], &targets, Fallback::Group, &cfg, &mut rng);
        let expected = life.kinematics.max_force * cfg.steering.priority_multiplier;
        assert!((d.force.magnitude() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_flocking_mate_falls_through_to_food() {
        let (mut life, cfg, mut rng) = setup(true);
        life.vitals.energy = 1.0;
        let targets = Targets {
            mate: mate_at(Vector2::new(101.0, 100.0)),
            food: food_at(Vector2::new(102.0, 100.0)),
        };
        let d = compute_cohesion(&mut life, &[], &targets, Fallback::Group, &cfg, &mut rng);
        assert_eq!(d.mate, Some(AgentId::from_u128(99)));
        assert_eq!(d.eat, Some(FoodId::from_u128(7)));
    }

    #[test]
    fn test_solitary_agent_wanders() {
        let (mut life, cfg, mut rng) = setup(false);
        let theta = life.kinematics.wander_theta;
        let d = decide(&mut life, &[], &Targets::default(), &cfg, &mut rng);
        assert!((d.force.magnitude() - life.kinematics.max_force).abs() < 1e-9);
        assert_ne!(life.kinematics.wander_theta, theta);
    }

    #[test]
    fn test_flocking_sum_is_weighted() {
        let (mut life, cfg, mut rng) = setup(true);
        life.kinematics.vel = Vector2::ZERO;
        let neighbors = [Neighbor {
            pos: Vector2::new(103.0, 100.0),
            vel: Vector2::ZERO,
        }];
        let d = decide(&mut life, &neighbors, &Targets::default(), &cfg, &mut rng);
        let s = &cfg.steering;
        let k = &life.kinematics;
        let expected = steering::separate(k, &neighbors, s) * s.separation_weight
            + steering::align(k, &neighbors, s) * s.alignment_weight
            + steering::cohere(k, &neighbors, life.genome.size * 5.0, s) * s.cohesion_weight;
        assert!((d.force - expected).magnitude() < 1e-9);
    }
}
