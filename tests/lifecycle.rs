mod common;
use common::{LifeBuilder, WorldBuilder};
use verdant_lib::model::state::{AgentId, DeathCause, FoodId, LifeEvent};

#[test]
fn test_hungry_agent_eats_adjacent_food() {
    let id = AgentId::from_u128(1);
    let mut world = WorldBuilder::new()
        .with_agent(
            LifeBuilder::new(1)
                .at(100.0, 100.0)
                .energy(100.0)
                .energy_max(200.0)
                .hunger_level(150.0)
                .size(2.0)
                .build(),
        )
        .with_food(7, 101.0, 100.0, 50.0)
        .without_food_growth()
        .build();

    let report = world.update();

    // upkeep of size * 0.1 is spent before eating
    assert_energy!(world, id, 100.0 - 0.2 + 50.0);
    assert!(report.events.contains(&LifeEvent::FoodEaten {
        food: FoodId::from_u128(7),
        by: id,
    }));
    assert!(world.food().is_empty());
    assert!(world.food_item(FoodId::from_u128(7)).is_none());
    assert_eq!(world.agent(id).unwrap().perception.closest_food, None);
}

#[test]
fn test_eating_caps_at_energy_max() {
    let id = AgentId::from_u128(1);
    let mut world = WorldBuilder::new()
        .with_agent(
            LifeBuilder::new(1)
                .energy(190.0)
                .energy_max(200.0)
                .hunger_level(195.0)
                .build(),
        )
        .with_food(7, 101.0, 100.0, 50.0)
        .without_food_growth()
        .build();

    world.update();
    assert_energy!(world, id, 200.0);
}

#[test]
fn test_sated_agent_leaves_food_alone() {
    let mut world = WorldBuilder::new()
        .with_agent(LifeBuilder::new(1).energy(1000.0).hunger_level(100.0).build())
        .with_food(7, 101.0, 100.0, 50.0)
        .without_food_growth()
        .build();

    let report = world.update();
    assert!(!report
        .events
        .iter()
        .any(|e| matches!(e, LifeEvent::FoodEaten { .. })));
    assert_eq!(world.food().len(), 1);
}

#[test]
fn test_starving_agent_dies_and_is_removed() {
    let id = AgentId::from_u128(1);
    let mut world = WorldBuilder::new()
        .with_agent(LifeBuilder::new(1).energy(0.1).size(2.0).build())
        .build();

    let report = world.update();

    assert!(report.events.contains(&LifeEvent::Death {
        id,
        cause: DeathCause::Starvation,
    }));
    assert_agent_gone!(world, id);
    assert_population!(world, 0);
    assert!(world.is_extinct());
}

#[test]
fn test_old_agent_dies_of_age() {
    let id = AgentId::from_u128(1);
    let mut world = WorldBuilder::new()
        .with_agent(LifeBuilder::new(1).age(99.9).max_age(100.0).build())
        .build();

    let report = world.update();
    assert!(report.events.contains(&LifeEvent::Death {
        id,
        cause: DeathCause::OldAge,
    }));
    assert_agent_gone!(world, id);
}

#[test]
fn test_age_never_decreases() {
    let id = AgentId::from_u128(1);
    let mut world = WorldBuilder::new()
        .with_agent(LifeBuilder::new(1).velocity(1.0, 0.5).build())
        .with_agent(LifeBuilder::new(2).at(120.0, 90.0).build())
        .build();

    let mut last_age = 0.0;
    for _ in 0..200 {
        world.update();
        let life = world.agent(id).expect("agent alive");
        assert!(life.vitals.age >= last_age);
        last_age = life.vitals.age;
    }
    assert!((last_age - 40.0).abs() < 1e-6);
}

#[test]
fn test_agents_wrap_around_edges() {
    let id = AgentId::from_u128(1);
    let mut world = WorldBuilder::new()
        .with_agent(
            LifeBuilder::new(1)
                .at(199.5, 100.0)
                .velocity(1.25, 0.0)
                .size(2.0)
                .solitary()
                .build(),
        )
        .build();

    for _ in 0..10 {
        world.update();
        let pos = world.agent(id).expect("agent alive").pos();
        assert!(pos.x >= -2.0 && pos.x <= 202.0);
        assert!(pos.y >= -2.0 && pos.y <= 202.0);
    }
}
