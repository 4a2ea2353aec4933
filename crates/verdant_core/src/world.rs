//! The simulated world: owns agents and food and advances them tick by tick.
//!
//! Each tick observes a snapshot of both spatial indexes built at its start.
//! Offspring and spawned food are appended to the live collections but are
//! neither indexed nor stepped until the next tick. Removal happens in one
//! pass after every agent has been updated.

use crate::behavior::{self, Target, Targets};
use crate::config::AppConfig;
use crate::error::Result;
use crate::food;
use crate::lifecycle;
use crate::pairing::MatePairs;
use crate::quadtree::{IndexedPoint, QuadTree};
use crate::steering::Neighbor;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use verdant_data::{
    AgentId, Food, FoodId, Life, LifeEvent, LifeStatus, Rectangle, Vector2,
};

/// Outcome of one call to [`World::update`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number that was just completed, starting at 1.
    pub tick: u64,
    pub events: Vec<LifeEvent>,
    /// Index points dropped for lying outside the world, mostly agents in
    /// the wrap margin.
    pub index_rejections: usize,
    pub population: usize,
    pub food: usize,
}

impl TickReport {
    pub fn births(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, LifeEvent::Birth { .. }))
            .count()
    }
}

pub struct World {
    config: AppConfig,
    rng: ChaCha8Rng,
    tick: u64,
    agents: Vec<Life>,
    food: Vec<Food>,
    agent_slots: HashMap<AgentId, usize>,
    food_slots: HashMap<FoodId, usize>,
    pairs: MatePairs,
    food_index: QuadTree<FoodId>,
    life_index: QuadTree<AgentId>,
}

impl World {
    /// Validates `config` and populates a fresh world.
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut world = Self::empty(config)?;

        let (width, height) = (world.width(), world.height());
        for _ in 0..world.config.world.initial_food {
            let pos = Vector2::new(
                world.rng.gen_range(0.0..width).floor(),
                world.rng.gen_range(0.0..height).floor(),
            );
            let item = food::create_food_with_rng(pos, &world.config.food, &mut world.rng);
            world.spawn_food(item);
        }

        for _ in 0..world.config.world.initial_population {
            let pos = Vector2::new(
                world.rng.gen_range(0.0..width),
                world.rng.gen_range(0.0..height),
            );
            let angle = world.rng.gen_range(0.0..std::f64::consts::TAU);
            let life = lifecycle::create_life_with_rng(
                pos,
                Vector2::from_angle(angle),
                1,
                &world.config.life,
                &mut world.rng,
            );
            world.spawn_agent(life);
        }

        world.rebuild_indexes();
        tracing::info!(
            agents = world.agents.len(),
            food = world.food.len(),
            width = world.config.world.width,
            height = world.config.world.height,
            seed = ?world.config.world.seed,
            fingerprint = %world.config.fingerprint(),
            "World created"
        );
        Ok(world)
    }

    /// A world with no agents and no food. Entities are added with
    /// [`World::spawn_agent`] and [`World::spawn_food`].
    pub fn empty(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let bounds = Self::bounds_of(&config);
        let (capacity, depth) = (config.index.capacity, config.index.max_depth);
        Ok(Self {
            config,
            rng,
            tick: 0,
            agents: Vec::new(),
            food: Vec::new(),
            agent_slots: HashMap::new(),
            food_slots: HashMap::new(),
            pairs: MatePairs::new(),
            food_index: QuadTree::with_max_depth(bounds, capacity, depth),
            life_index: QuadTree::with_max_depth(bounds, capacity, depth),
        })
    }

    fn bounds_of(config: &AppConfig) -> Rectangle {
        Rectangle::new(
            0.0,
            0.0,
            f64::from(config.world.width),
            f64::from(config.world.height),
        )
    }

    pub fn spawn_agent(&mut self, life: Life) -> AgentId {
        let id = life.id;
        self.agent_slots.insert(id, self.agents.len());
        self.agents.push(life);
        id
    }

    pub fn spawn_food(&mut self, item: Food) -> FoodId {
        let id = item.id;
        self.food_slots.insert(id, self.food.len());
        self.food.push(item);
        id
    }

    /// Advances the world by one tick.
    pub fn update(&mut self) -> TickReport {
        let mut report = TickReport {
            tick: self.tick + 1,
            ..Default::default()
        };

        report.index_rejections = self.rebuild_indexes();

        let stepped = self.agents.len();
        for slot in 0..stepped {
            self.step_agent(slot, &mut report.events);
        }

        if self.tick % self.config.food.spawn_interval == 0 {
            self.spawn_food_nearby(&mut report.events);
        }

        self.cleanup();
        self.tick += 1;

        report.population = self.agents.len();
        report.food = self.food.len();
        report
    }

    /// Rebuilds both indexes from current positions. Returns the number of
    /// points that fell outside the world.
    fn rebuild_indexes(&mut self) -> usize {
        let bounds = Self::bounds_of(&self.config);
        let (capacity, depth) = (self.config.index.capacity, self.config.index.max_depth);

        let (food_index, food_rejected) = QuadTree::build(
            bounds,
            capacity,
            depth,
            self.food
                .iter()
                .map(|f| IndexedPoint::new(f.pos.x, f.pos.y, f.id)),
        );
        let (life_index, life_rejected) = QuadTree::build(
            bounds,
            capacity,
            depth,
            self.agents
                .iter()
                .map(|a| IndexedPoint::new(a.pos().x, a.pos().y, a.id)),
        );
        self.food_index = food_index;
        self.life_index = life_index;

        let rejected = food_rejected + life_rejected;
        if rejected > 0 {
            tracing::trace!(
                food = food_rejected,
                life = life_rejected,
                "Index points outside world bounds"
            );
        }
        rejected
    }

    fn step_agent(&mut self, slot: usize, events: &mut Vec<LifeEvent>) {
        if self.agents[slot].vitals.dead {
            return;
        }
        if let Some(cause) = lifecycle::metabolize(&mut self.agents[slot], &self.config.life) {
            let id = self.agents[slot].id;
            tracing::debug!(%id, ?cause, tick = self.tick, "Agent died");
            events.push(LifeEvent::Death { id, cause });
            return;
        }
        lifecycle::cool_down(&mut self.agents[slot]);

        self.scan_food(slot);
        let neighbors = self.scan_life(slot);
        let targets = self.targets_of(slot);

        let decision = behavior::decide(
            &mut self.agents[slot],
            &neighbors,
            &targets,
            &self.config,
            &mut self.rng,
        );

        let id = self.agents[slot].id;
        if let Some(food_id) = decision.eat {
            self.consume(slot, food_id, events);
        }
        if let Some(partner) = decision.mate {
            if let Some(child) = self.mate(id, partner) {
                events.extend(self.birth_event(child));
            }
        }

        let (width, height) = (self.width(), self.height());
        let life = &mut self.agents[slot];
        lifecycle::apply_force(life, decision.force);
        lifecycle::integrate(life);
        lifecycle::wrap_edges(life, width, height);
    }

    fn birth_event(&self, child: AgentId) -> Option<LifeEvent> {
        let life = self.agent(child)?;
        let parents = life.parents?;
        Some(LifeEvent::Birth {
            id: child,
            parents,
            generation: life.generation,
        })
    }

    /// Refreshes the agent's food count and closest food from the food index.
    fn scan_food(&mut self, slot: usize) {
        let pos = self.agents[slot].pos();
        let range = Rectangle::centered(pos, self.config.life.food_search_max_scan_dist);

        let mut in_range = 0;
        let mut closest: Option<(f64, FoodId)> = None;
        for point in self.food_index.query(&range) {
            let Some(item) = self.food_item(point.owner) else {
                continue;
            };
            if item.eaten {
                continue;
            }
            in_range += 1;
            let d = pos.distance(item.pos);
            if closest.map_or(true, |(best, _)| d < best) {
                closest = Some((d, item.id));
            }
        }

        let previous = self.agents[slot].perception.closest_food;
        let target = closest
            .map(|(_, id)| id)
            .or_else(|| previous.filter(|id| self.food_item(*id).is_some_and(|f| !f.eaten)));

        let perception = &mut self.agents[slot].perception;
        perception.food_in_range = in_range;
        perception.closest_food = target;
    }

    /// Refreshes the agent's life count and mate pairing. Returns the
    /// agents in range as flocking neighbors.
    fn scan_life(&mut self, slot: usize) -> Vec<Neighbor> {
        let me = &self.agents[slot];
        let (id, pos) = (me.id, me.pos());
        let scan = self.config.life.reproduction_max_scan_dist;
        let range = Rectangle::centered(pos, scan);

        let found = self.life_index.query(&range);
        let mut neighbors = Vec::with_capacity(found.len());
        let mut closest: Option<(f64, AgentId)> = None;
        for point in &found {
            let Some(other) = self.agent(point.owner) else {
                continue;
            };
            neighbors.push(Neighbor {
                pos: other.pos(),
                vel: other.vel(),
            });
            if other.id == id || !lifecycle::can_reproduce(other) {
                continue;
            }
            let d = pos.distance(other.pos());
            if closest.map_or(true, |(best, _)| d < best) {
                closest = Some((d, other.id));
            }
        }
        self.agents[slot].perception.life_in_range = found.len();

        if let Some((_, mate)) = closest {
            if !self.pairs.is_paired_with(id, mate) {
                self.pairs.propose(id, mate);
                tracing::debug!(%id, %mate, tick = self.tick, "Mate selected");
            }
        }

        if let Some(partner) = self.pairs.partner_of(id) {
            let stale = self
                .agent(partner)
                .map_or(true, |p| !p.is_alive() || pos.distance(p.pos()) > scan);
            if stale {
                self.pairs.dissolve(id);
            }
        }

        neighbors
    }

    /// Resolves the agent's pairing and food handle into live targets.
    fn targets_of(&self, slot: usize) -> Targets {
        let me = &self.agents[slot];
        let mate = self
            .pairs
            .partner_of(me.id)
            .and_then(|id| self.agent(id))
            .filter(|m| m.is_alive())
            .map(|m| Target {
                id: m.id,
                pos: m.pos(),
                vel: m.vel(),
            });
        let food = me
            .perception
            .closest_food
            .and_then(|id| self.food_item(id))
            .filter(|f| !f.eaten)
            .map(|f| Target {
                id: f.id,
                pos: f.pos,
                vel: Vector2::ZERO,
            });
        Targets { mate, food }
    }

    fn consume(&mut self, slot: usize, food_id: FoodId, events: &mut Vec<LifeEvent>) {
        self.agents[slot].perception.closest_food = None;
        let Some(&food_slot) = self.food_slots.get(&food_id) else {
            return;
        };
        if self.food[food_slot].eaten {
            return;
        }
        lifecycle::eat(&mut self.agents[slot], &mut self.food[food_slot]);
        events.push(LifeEvent::FoodEaten {
            food: food_id,
            by: self.agents[slot].id,
        });
    }

    /// Breeds `initiator` with `partner` if the partner currently pairs back.
    ///
    /// Without reciprocation, or with either side dead or missing, nothing
    /// happens and `None` is returned. Otherwise one offspring is appended
    /// at the initiator's position, both parents start their cooldown and
    /// the pairing is dissolved.
    pub fn mate(&mut self, initiator: AgentId, partner: AgentId) -> Option<AgentId> {
        if initiator == partner || !self.pairs.is_paired_with(partner, initiator) {
            return None;
        }
        let a = *self.agent_slots.get(&initiator)?;
        let b = *self.agent_slots.get(&partner)?;
        if !self.agents[a].is_alive() || !self.agents[b].is_alive() {
            return None;
        }

        let child = lifecycle::breed(&self.agents[a], &self.agents[b], &self.config, &mut self.rng);
        let cool_down = self.config.reproduction.cool_down_ticks;
        self.agents[a].vitals.reproduction_cool_down = cool_down;
        self.agents[b].vitals.reproduction_cool_down = cool_down;
        self.pairs.dissolve(initiator);

        tracing::debug!(
            child = %child.id,
            parent = %initiator,
            partner = %partner,
            generation = child.generation,
            tick = self.tick,
            "Agent born"
        );
        Some(self.spawn_agent(child))
    }

    fn spawn_food_nearby(&mut self, events: &mut Vec<LifeEvent>) {
        let (width, height) = (self.width(), self.height());
        let max_food = self.config.max_food();
        let existing = self.food.len();
        for slot in 0..existing {
            if self.food[slot].eaten {
                continue;
            }
            let spawned = food::spawn_nearby(
                &self.food[slot],
                &self.food_index,
                width,
                height,
                self.food.len(),
                max_food,
                &self.config.food,
                &mut self.rng,
            );
            if let Some(item) = spawned {
                let id = self.spawn_food(item);
                events.push(LifeEvent::FoodSpawned { food: id });
            }
        }
    }

    /// Drops dead agents and eaten food in one stable pass each, then
    /// clears every handle that pointed at them.
    fn cleanup(&mut self) {
        self.agents.retain(|a| !a.vitals.dead);
        self.food.retain(|f| !f.eaten);

        self.agent_slots = self
            .agents
            .iter()
            .enumerate()
            .map(|(slot, a)| (a.id, slot))
            .collect();
        self.food_slots = self
            .food
            .iter()
            .enumerate()
            .map(|(slot, f)| (f.id, slot))
            .collect();

        let slots = &self.agent_slots;
        self.pairs.retain_alive(|id| slots.contains_key(&id));

        let food_slots = &self.food_slots;
        for agent in &mut self.agents {
            if let Some(target) = agent.perception.closest_food {
                if !food_slots.contains_key(&target) {
                    agent.perception.closest_food = None;
                }
            }
        }
    }

    /// Food whose position lies inside `range`, from this tick's snapshot.
    pub fn query_food(&self, range: &Rectangle) -> Vec<FoodId> {
        self.food_index
            .query(range)
            .into_iter()
            .map(|p| p.owner)
            .collect()
    }

    /// Agents whose position lies inside `range`, from this tick's snapshot.
    pub fn query_life(&self, range: &Rectangle) -> Vec<AgentId> {
        self.life_index
            .query(range)
            .into_iter()
            .map(|p| p.owner)
            .collect()
    }

    pub fn width(&self) -> f64 {
        f64::from(self.config.world.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.config.world.height)
    }

    pub fn agents(&self) -> &[Life] {
        &self.agents
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    pub fn agent(&self, id: AgentId) -> Option<&Life> {
        self.agent_slots.get(&id).map(|&slot| &self.agents[slot])
    }

    /// Mutable access for adjusting an agent's state between ticks.
    ///
    /// The agent's `id` must not be changed: it keys the slot map, and
    /// [`World::agent`] would no longer find the agent under either id.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Life> {
        let slot = *self.agent_slots.get(&id)?;
        self.agents.get_mut(slot)
    }

    pub fn food_item(&self, id: FoodId) -> Option<&Food> {
        self.food_slots.get(&id).map(|&slot| &self.food[slot])
    }

    /// Current pairing partner of `id`, if any.
    pub fn mate_of(&self, id: AgentId) -> Option<AgentId> {
        self.pairs.partner_of(id)
    }

    /// Pairs `a` with `b`, replacing either side's current pairing.
    pub fn pair(&mut self, a: AgentId, b: AgentId) {
        self.pairs.propose(a, b);
    }

    pub fn pairs(&self) -> &MatePairs {
        &self.pairs
    }

    pub fn status_of(&self, id: AgentId) -> Option<LifeStatus> {
        let life = self.agent(id)?;
        let has_mate = self.mate_of(id).is_some();
        let has_food = life
            .perception
            .closest_food
            .and_then(|f| self.food_item(f))
            .is_some_and(|f| !f.eaten);
        Some(lifecycle::status(life, has_mate, has_food))
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Swaps tunables between ticks. The seed is only read at construction.
    pub fn set_config(&mut self, config: AppConfig) -> Result<()> {
        config.validate()?;
        tracing::info!(fingerprint = %config.fingerprint(), "Config replaced");
        self.config = config;
        Ok(())
    }

    pub fn is_extinct(&self) -> bool {
        self.agents.is_empty()
    }
}
