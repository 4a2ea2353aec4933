/// Asserts that an agent with the given ID is no longer in the world.
#[macro_export]
macro_rules! assert_agent_gone {
    ($world:expr, $id:expr) => {
        assert!(
            $world.agent($id).is_none(),
            "Agent {} should be gone but was found",
            $id
        );
    };
}

/// Asserts that the agent's energy is within `1e-9` of the expected value.
#[macro_export]
macro_rules! assert_energy {
    ($world:expr, $id:expr, $expected:expr) => {
        let life = $world.agent($id).expect("Agent not found in world");
        assert!(
            (life.vitals.energy - $expected).abs() < 1e-9,
            "Agent {} energy {} is not {}",
            $id,
            life.vitals.energy,
            $expected
        );
    };
}

/// Asserts that the agent count matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.agents().len(), $count, "Population count mismatch");
    };
}
