//! Reynolds steering behaviors.
//!
//! Every function returns a force to be added to the agent's acceleration
//! and never mutates its target. Each result has magnitude at most
//! `max_force`. See <http://www.red3d.com/cwr/steer/gdc99/>.

use crate::config::SteeringConfig;
use rand::Rng;
use verdant_data::{Kinematics, Vector2};

/// Position and velocity of a nearby agent, as seen by a flocking agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub pos: Vector2,
    pub vel: Vector2,
}

/// Steer toward `target`. With `arrival`, the desired speed ramps down
/// linearly inside `slow_radius`.
pub fn seek(k: &Kinematics, target: Vector2, arrival: bool, cfg: &SteeringConfig) -> Vector2 {
    let desired = target - k.pos;
    let distance = desired.magnitude();
    let speed = if arrival && distance < cfg.slow_radius && cfg.slow_radius > 0.0 {
        distance / cfg.slow_radius * k.max_speed
    } else {
        k.max_speed
    };
    (desired.set_magnitude(speed) - k.vel).limit(k.max_force)
}

pub fn arrive(k: &Kinematics, target: Vector2, cfg: &SteeringConfig) -> Vector2 {
    seek(k, target, true, cfg)
}

pub fn flee(k: &Kinematics, target: Vector2, cfg: &SteeringConfig) -> Vector2 {
    -seek(k, target, false, cfg)
}

/// Seek where the target will be after `prediction_factor` ticks.
pub fn pursue(k: &Kinematics, pos: Vector2, vel: Vector2, cfg: &SteeringConfig) -> Vector2 {
    seek(k, pos + vel * cfg.prediction_factor, false, cfg)
}

pub fn evade(k: &Kinematics, pos: Vector2, vel: Vector2, cfg: &SteeringConfig) -> Vector2 {
    -pursue(k, pos, vel, cfg)
}

/// Random wandering. Advances the agent's own `wander_theta`.
pub fn wander<R: Rng>(k: &mut Kinematics, rng: &mut R, cfg: &SteeringConfig) -> Vector2 {
    let angle = k.wander_theta + k.vel.heading();
    let circle_center = k.vel.set_magnitude(cfg.wander_distance);
    let offset = Vector2::from_angle(angle) * cfg.wander_radius;
    if cfg.wander_jitter > 0.0 {
        k.wander_theta += rng.gen_range(-cfg.wander_jitter..cfg.wander_jitter);
    }
    (circle_center + offset).set_magnitude(k.max_force).limit(k.max_force)
}

/// Turns an averaged direction into a steering force at full speed.
fn steer_along(k: &Kinematics, direction: Vector2) -> Vector2 {
    (direction.set_magnitude(k.max_speed) - k.vel).limit(k.max_force)
}

/// Push away from neighbors closer than `separation_radius`, weighted by
/// inverse distance.
pub fn separate(k: &Kinematics, neighbors: &[Neighbor], cfg: &SteeringConfig) -> Vector2 {
    let mut sum = Vector2::ZERO;
    let mut count = 0usize;
    for n in neighbors {
        let d = k.pos.distance(n.pos);
        if d > 0.0 && d < cfg.separation_radius {
            sum += (k.pos - n.pos).normalize() / d;
            count += 1;
        }
    }
    if count == 0 {
        return Vector2::ZERO;
    }
    let average = sum / count as f64;
    if average.magnitude_squared() > 0.0 {
        steer_along(k, average)
    } else {
        Vector2::ZERO
    }
}

/// Match the average heading of neighbors within `alignment_radius`.
pub fn align(k: &Kinematics, neighbors: &[Neighbor], cfg: &SteeringConfig) -> Vector2 {
    let mut sum = Vector2::ZERO;
    let mut count = 0usize;
    for n in neighbors {
        let d = k.pos.distance(n.pos);
        if d > 0.0 && d < cfg.alignment_radius {
            sum += n.vel;
            count += 1;
        }
    }
    if count == 0 {
        return Vector2::ZERO;
    }
    steer_along(k, sum / count as f64)
}

/// Seek the centroid of neighbors within `radius`.
pub fn cohere(k: &Kinematics, neighbors: &[Neighbor], radius: f64, cfg: &SteeringConfig) -> Vector2 {
    let mut sum = Vector2::ZERO;
    let mut count = 0usize;
    for n in neighbors {
        let d = k.pos.distance(n.pos);
        if d > 0.0 && d < radius {
            sum += n.pos;
            count += 1;
        }
    }
    if count == 0 {
        return Vector2::ZERO;
    }
    seek(k, sum / count as f64, false, cfg)
}
