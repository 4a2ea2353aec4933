use crate::config::FoodConfig;
use crate::quadtree::QuadTree;
use rand::Rng;
use verdant_data::{Food, FoodId, Rectangle, Vector2};

pub fn create_food_with_rng<R: Rng>(pos: Vector2, cfg: &FoodConfig, rng: &mut R) -> Food {
    Food::new(
        FoodId::from_u128(rng.gen::<u128>()),
        pos,
        cfg.nutrition.sample(rng),
    )
}

/// Gives `food` a chance to seed a new item right next to it.
///
/// Density is read from `index`, the snapshot built at the start of the
/// tick, so items spawned earlier in the same tick are not counted.
/// `food_count` is the live total and is checked against `max_food`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_nearby<R: Rng>(
    food: &Food,
    index: &QuadTree<FoodId>,
    width: f64,
    height: f64,
    food_count: usize,
    max_food: usize,
    cfg: &FoodConfig,
    rng: &mut R,
) -> Option<Food> {
    let scan = Rectangle::centered(food.pos, cfg.density_scan);
    if index.count(&scan) >= cfg.density_threshold {
        return None;
    }
    if !rng.gen_bool(cfg.spawn_chance) {
        return None;
    }

    let (dx, dy) = if cfg.spawn_offset > 0.0 {
        (
            rng.gen_range(-cfg.spawn_offset..cfg.spawn_offset),
            rng.gen_range(-cfg.spawn_offset..cfg.spawn_offset),
        )
    } else {
        (0.0, 0.0)
    };
    if dx.abs() <= cfg.spawn_min_offset || dy.abs() <= cfg.spawn_min_offset {
        return None;
    }

    let x = (food.pos.x + dx).floor();
    let y = (food.pos.y + dy).floor();
    let inside = x > 0.0 && x < width && y > 0.0 && y < height;
    if !inside || food_count >= max_food {
        return None;
    }

    Some(create_food_with_rng(Vector2::new(x, y), cfg, rng))
}
