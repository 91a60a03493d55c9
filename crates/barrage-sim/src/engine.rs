//! Encounter engine: the single entry point for the tick driver, the
//! director (level scripting), and the collision collaborator.
//!
//! `EncounterEngine` owns the hecs ECS world, processes director commands,
//! runs all systems against the external frame clock, and produces
//! `EncounterSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::{HashMap, VecDeque};

use glam::Vec2;
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use barrage_core::commands::{DirectorCommand, SpawnOptions};
use barrage_core::components::Health;
use barrage_core::config::{DebugOptions, SimConfig};
use barrage_core::constants::*;
use barrage_core::difficulty::{DifficultyChange, DifficultyScalar};
use barrage_core::enums::{BehaviorClass, BossPhase, RemovalReason};
use barrage_core::error::SpawnError;
use barrage_core::events::GameEvent;
use barrage_core::state::EncounterSnapshot;
use barrage_core::types::{ActorId, FrameTime, ProjectileId, TargetState};

use barrage_patterns::boss::ShieldState;

use crate::components::BossBrain;
use crate::factory::{self, SpawnEnv, ValidSpawn};
use crate::spawner::ProjectileSpawner;
use crate::systems;
use crate::systems::actors::ActorPass;
use crate::systems::boss::EscortOrder;
use crate::systems::cleanup::Removal;

/// Vertical spacing of escorts around their boss.
const ESCORT_SPACING: f32 = 70.0;

/// Horizontal offset of escorts ahead of their boss.
const ESCORT_LEAD: f32 = 60.0;

/// The encounter engine. Owns the ECS world and all encounter state.
pub struct EncounterEngine {
    world: World,
    config: SimConfig,
    time: FrameTime,
    rng: ChaCha8Rng,
    difficulty: DifficultyScalar,
    pending_difficulty: Option<DifficultyScalar>,
    target: Option<TargetState>,
    debug: DebugOptions,
    roster: HashMap<ActorId, Entity>,
    next_actor_id: u32,
    command_queue: VecDeque<DirectorCommand>,
    spawner: ProjectileSpawner,
    removals: Vec<Removal>,
    expired: Vec<(ProjectileId, Entity)>,
    events: Vec<GameEvent>,
}

impl EncounterEngine {
    /// Create a new engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: FrameTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            difficulty: DifficultyScalar::from_level(config.starting_level),
            pending_difficulty: None,
            target: None,
            debug: config.debug,
            roster: HashMap::new(),
            next_actor_id: 0,
            command_queue: VecDeque::new(),
            spawner: ProjectileSpawner::new(),
            removals: Vec::new(),
            expired: Vec::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Report the player's current position and velocity.
    pub fn set_target(&mut self, target: TargetState) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn target(&self) -> Option<TargetState> {
        self.target
    }

    /// Queue a director command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: DirectorCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = DirectorCommand>) {
        self.command_queue.extend(commands);
    }

    /// Current simulation clock.
    pub fn time(&self) -> FrameTime {
        self.time
    }

    pub fn difficulty(&self) -> DifficultyScalar {
        self.difficulty
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn actor_count(&self) -> usize {
        self.roster.len()
    }

    pub fn contains_actor(&self, id: ActorId) -> bool {
        self.roster.contains_key(&id)
    }

    pub fn health(&self, id: ActorId) -> Option<Health> {
        let entity = *self.roster.get(&id)?;
        self.world.get::<&Health>(entity).ok().map(|h| *h)
    }

    pub fn boss_phase(&self, id: ActorId) -> Option<BossPhase> {
        let entity = *self.roster.get(&id)?;
        self.world
            .get::<&BossBrain>(entity)
            .ok()
            .map(|b| b.machine.phase())
    }

    pub fn projectile_count(&self) -> usize {
        self.spawner.live_count()
    }

    /// Projectiles spawned since construction.
    pub fn projectiles_spawned(&self) -> u64 {
        self.spawner.total_spawned()
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Build a snapshot of the current state.
    pub fn snapshot(&self) -> EncounterSnapshot {
        systems::snapshot::build_snapshot(&self.world, self.time, self.difficulty, self.debug)
    }

    /// Spawn an actor of `class` at `(x, y)`. Rejected requests create nothing.
    pub fn spawn_of_behavior_class(
        &mut self,
        class: BehaviorClass,
        x: f32,
        y: f32,
        options: SpawnOptions,
    ) -> Result<ActorId, SpawnError> {
        let valid = factory::validate(
            class,
            x,
            y,
            options,
            self.target.as_ref(),
            &self.config.playfield,
            self.config.offscreen_margin,
        )
        .inspect_err(|err| tracing::warn!(%err, "spawn rejected"))?;
        Ok(self.spawn_valid(valid, None))
    }

    /// Broadcast a difficulty change to every live actor now. Changes that
    /// would lower the level or, at the same level, the factor are ignored.
    pub fn set_difficulty(&mut self, change: impl Into<DifficultyChange>) {
        let scalar = DifficultyScalar::from(change.into());
        if scalar.is_below(&self.difficulty) {
            tracing::warn!(
                current = self.difficulty.level,
                current_factor = self.difficulty.factor,
                requested = scalar.level,
                requested_factor = scalar.factor,
                "ignoring difficulty decrease"
            );
            return;
        }
        let changed = scalar != self.difficulty;
        self.difficulty = scalar;
        let retuned =
            systems::difficulty::apply(&mut self.world, &scalar, &mut self.rng, &mut self.events);
        if changed {
            tracing::info!(level = scalar.level, factor = scalar.factor, retuned, "difficulty changed");
            self.events.push(GameEvent::DifficultyChanged {
                level: scalar.level,
                factor: scalar.factor,
            });
        }
    }

    /// Advance one frame.
    pub fn update(&mut self, time_ms: f64, delta_ms: f64) {
        self.time = FrameTime::new(time_ms, delta_ms.max(0.0));
        self.process_commands();
        self.run_systems();
    }

    /// Apply damage reported by the collision collaborator. Returns true
    /// exactly once, on the call that destroys the actor.
    pub fn take_damage(&mut self, id: ActorId, amount: f32) -> bool {
        let Some(&entity) = self.roster.get(&id) else {
            return false;
        };
        systems::damage::apply(
            &mut self.world,
            entity,
            amount,
            self.time.now_ms,
            &self.config.playfield,
            &self.difficulty,
            &mut self.events,
        )
    }

    /// Retire a projectile that registered a hit.
    pub fn report_projectile_hit(&mut self, id: ProjectileId) -> bool {
        match self.spawner.forget(id) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Remove one actor immediately, cancelling everything it had scheduled.
    pub fn remove_actor(&mut self, id: ActorId) -> bool {
        self.remove(id, RemovalReason::Explicit)
    }

    /// Remove every actor and projectile.
    pub fn teardown(&mut self) {
        let mut ids: Vec<ActorId> = self.roster.keys().copied().collect();
        ids.sort();
        for id in ids {
            self.remove(id, RemovalReason::Teardown);
        }
        for entity in self.spawner.clear() {
            let _ = self.world.despawn(entity);
        }
        self.pending_difficulty = None;
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single director command.
    fn handle_command(&mut self, command: DirectorCommand) {
        match command {
            DirectorCommand::Spawn {
                class,
                x,
                y,
                options,
            } => {
                // Rejections are logged by the factory boundary.
                let _ = self.spawn_of_behavior_class(class, x, y, options);
            }
            DirectorCommand::SetDifficulty { change } => {
                let scalar = DifficultyScalar::from(change);
                let keep = match self.pending_difficulty {
                    Some(pending) => !scalar.is_below(&pending),
                    None => true,
                };
                if keep {
                    self.pending_difficulty = Some(scalar);
                }
            }
            DirectorCommand::Remove { actor } => {
                self.remove_actor(actor);
            }
            DirectorCommand::Teardown => self.teardown(),
            DirectorCommand::SetDebug { options } => {
                self.debug = options;
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let playfield = self.config.playfield;
        let margin = self.config.offscreen_margin;

        // 1. Boss phase machines
        let orders = systems::boss::run(
            &mut self.world,
            self.time,
            &playfield,
            &self.difficulty,
            &mut self.events,
        );
        for order in orders {
            self.spawn_escorts(order);
        }

        // 2. Per-actor movement, then weapons
        systems::actors::run(
            &mut self.world,
            ActorPass {
                time: self.time,
                target: self.target,
                playfield,
                rng: &mut self.rng,
                spawner: &mut self.spawner,
                events: &mut self.events,
            },
        );

        // 3. Materialize this frame's shots
        self.spawner.flush(&mut self.world, self.time.now_ms);

        // 4. Projectile integration and expiry
        systems::projectiles::run(&mut self.world, self.time, &playfield, margin, &mut self.expired);
        for (id, entity) in self.expired.drain(..) {
            self.spawner.forget(id);
            let _ = self.world.despawn(entity);
        }

        // 5. Actor cleanup
        systems::cleanup::run(&mut self.world, &playfield, margin, &mut self.removals);
        let removals = std::mem::take(&mut self.removals);
        for removal in &removals {
            self.remove(removal.actor, removal.reason);
        }
        self.removals = removals;

        // 6. Difficulty, after every actor has updated
        if let Some(scalar) = self.pending_difficulty.take() {
            self.set_difficulty(scalar);
        }
    }

    fn spawn_valid(&mut self, valid: ValidSpawn, escort_of: Option<ActorId>) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        let env = SpawnEnv {
            now_ms: self.time.now_ms,
            playfield: self.config.playfield,
            difficulty: &self.difficulty,
            rng: &mut self.rng,
        };
        let entity = factory::spawn_actor(&mut self.world, id, valid, escort_of, env);
        self.roster.insert(id, entity);
        id
    }

    fn spawn_escorts(&mut self, order: EscortOrder) {
        let Some(&boss_entity) = self.roster.get(&order.boss) else {
            return;
        };
        let count = self.rng.gen_range(BOSS_ESCORT_MIN..=BOSS_ESCORT_MAX);
        let playfield = self.config.playfield;
        let top = order.position.y - ESCORT_SPACING * (count - 1) as f32 / 2.0;
        for i in 0..count {
            let y = playfield.clamp_y(top + ESCORT_SPACING * i as f32, EDGE_INSET);
            let valid = ValidSpawn {
                class: BehaviorClass::Escort,
                position: Vec2::new(order.position.x - ESCORT_LEAD, y),
                health_multiplier: 1.0,
                speed_multiplier: 1.0,
            };
            self.spawn_valid(valid, Some(order.boss));
        }

        if let Ok(mut brain) = self.world.get::<&mut BossBrain>(boss_entity) {
            if brain.machine.escorts_spawned(count as usize) == Some(ShieldState::Active) {
                tracing::debug!(boss = ?order.boss, count, "escorts spawned, shield up");
                self.events.push(GameEvent::ShieldChanged {
                    actor: order.boss,
                    active: true,
                });
            }
        }
    }

    fn remove(&mut self, id: ActorId, reason: RemovalReason) -> bool {
        let Some(entity) = self.roster.remove(&id) else {
            return false;
        };
        // Despawning drops the actor's controllers and with them every
        // pending sub-shot, volley and timer.
        let _ = self.world.despawn(entity);
        tracing::debug!(actor = ?id, ?reason, "actor removed");
        self.events.push(GameEvent::ActorRemoved { actor: id, reason });
        true
    }
}
