use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use verdant_lib::model::config::SteeringConfig;
use verdant_lib::model::state::{Kinematics, Vector2};
use verdant_lib::model::steering::{self, Neighbor};

fn vec_strategy(bound: f64) -> impl Strategy<Value = Vector2> {
    (-bound..bound, -bound..bound).prop_map(|(x, y)| Vector2::new(x, y))
}

fn kinematics_strategy() -> impl Strategy<Value = Kinematics> {
    (
        vec_strategy(500.0),
        vec_strategy(3.0),
        0.0..5.0f64,
        0.0..2.0f64,
        -10.0..10.0f64,
    )
        .prop_map(|(pos, vel, max_speed, max_force, wander_theta)| Kinematics {
            pos,
            vel,
            acc: Vector2::ZERO,
            max_speed,
            max_force,
            wander_theta,
        })
}

fn neighbors_strategy() -> impl Strategy<Value = Vec<Neighbor>> {
    prop::collection::vec(
        (vec_strategy(500.0), vec_strategy(3.0)).prop_map(|(pos, vel)| Neighbor { pos, vel }),
        0..20,
    )
}

proptest! {
    #[test]
    fn steering_forces_never_exceed_max_force(
        k in kinematics_strategy(),
        target in vec_strategy(600.0),
        target_vel in vec_strategy(3.0),
        neighbors in neighbors_strategy(),
        radius in 0.0..100.0f64,
        seed in any::<u64>(),
    ) {
        let cfg = SteeringConfig::default();
        let cap = k.max_force + 1e-9;

        prop_assert!(steering::seek(&k, target, false, &cfg).magnitude() <= cap);
        prop_assert!(steering::arrive(&k, target, &cfg).magnitude() <= cap);
        prop_assert!(steering::flee(&k, target, &cfg).magnitude() <= cap);
        prop_assert!(steering::pursue(&k, target, target_vel, &cfg).magnitude() <= cap);
        prop_assert!(steering::evade(&k, target, target_vel, &cfg).magnitude() <= cap);
        prop_assert!(steering::separate(&k, &neighbors, &cfg).magnitude() <= cap);
        prop_assert!(steering::align(&k, &neighbors, &cfg).magnitude() <= cap);
        prop_assert!(steering::cohere(&k, &neighbors, radius, &cfg).magnitude() <= cap);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut wandering = k.clone();
        prop_assert!(steering::wander(&mut wandering, &mut rng, &cfg).magnitude() <= cap);
        prop_assert!((wandering.wander_theta - k.wander_theta).abs() <= cfg.wander_jitter);
    }

    #[test]
    fn limit_caps_magnitude(v in vec_strategy(1e6), cap in 0.0..100.0f64) {
        prop_assert!(v.limit(cap).magnitude() <= cap + 1e-9);
    }
}
