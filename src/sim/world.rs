//! Frame-level game rules
//!
//! `GameWorld` owns the registry and drives the per-frame loop: sweep
//! off-screen entities, run spawn timers, progress death and light-up
//! counters, then integrate physics and resolve this step's collisions.
//! Side effects that belong to the shell (sound, rendering) are emitted as
//! [`GameEvent`]s and drained by the caller.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{
    DEATH_SINK_SPEED, DEATH_TIMER_MS, FISH_BOUNCE_RADIUS, FISH_DELAY_MS, FISH_SPEED, MAX_FISH,
    MAX_TURTLES, MIN_BOUNCE_SPEED, PEBBLE_COUNT, PLAYER_SPEED, TURTLE_DELAY_MS, TURTLE_SPEED,
};
use crate::ecs::Entity;

use super::components::{Collision, Color, DeathTimer, LightUp};
use super::input::{Key, KeyAction, Modifiers};
use super::physics;
use super::registry::Registry;
use super::spawn;

/// Where the player salmon re-appears after a restart
const PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 200.0);

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Normal play
    Playing,
    /// Death timer running; the screen darkens until restart
    Dying,
}

/// Shell-facing side effects produced by the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The player hit a turtle and started dying
    SalmonDied,
    /// A fish was eaten; carries the score after the bite
    FishEaten { points: u32 },
    /// A fresh run began (death timer expiry or manual reset)
    Restarted,
    /// The global speed multiplier changed
    SpeedChanged { multiplier: f32 },
}

/// The game world: registry, rules state, and per-frame event queue
pub struct GameWorld {
    registry: Registry,
    player: Entity,
    points: u32,
    current_speed: f32,
    debug_mode: bool,
    darken_screen_factor: f32,
    phase: GamePhase,
    next_fish_spawn: f32,
    next_turtle_spawn: f32,
    rng: Pcg32,
    events: Vec<GameEvent>,
    window_width_px: f32,
    window_height_px: f32,
}

impl GameWorld {
    /// Create a world with the given run seed and visible region
    pub fn new(seed: u64, window_width_px: f32, window_height_px: f32) -> Self {
        let mut registry = Registry::new();
        let player = spawn::spawn_player_salmon(&mut registry, PLAYER_SPAWN);
        let mut world = Self {
            registry,
            player,
            points: 0,
            current_speed: 1.0,
            debug_mode: false,
            darken_screen_factor: 0.0,
            phase: GamePhase::Playing,
            next_fish_spawn: 0.0,
            next_turtle_spawn: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            window_width_px,
            window_height_px,
        };
        world.restart();
        world
    }

    /// Advance the world by one frame
    pub fn step(&mut self, elapsed_ms: f32) {
        let elapsed_ms = elapsed_ms * self.current_speed;

        // Drop the previous step's debug visualization
        while let Some(&line) = self.registry.debug_lines.entities().last() {
            self.registry.remove_all_components_of(line);
        }

        self.update_rules(elapsed_ms);
        physics::step(
            &mut self.registry,
            elapsed_ms,
            self.window_width_px,
            self.window_height_px,
            self.debug_mode,
        );
        self.handle_collisions();
    }

    /// Sweep, spawn, and progress timers for one frame
    fn update_rules(&mut self, elapsed_ms: f32) {
        // Entities that drifted past the left edge are gone for good
        let offscreen: Vec<Entity> = self
            .registry
            .motions
            .iter()
            .filter(|(_, motion)| motion.position.x + motion.scale.x.abs() < 0.0)
            .map(|(entity, _)| entity)
            .collect();
        for entity in offscreen {
            self.registry.remove_all_components_of(entity);
        }

        // Fish swim in from the right on a randomized countdown
        self.next_fish_spawn -= elapsed_ms;
        if self.registry.soft_shells.len() <= MAX_FISH && self.next_fish_spawn < 0.0 {
            self.next_fish_spawn =
                FISH_DELAY_MS / 2.0 + self.rng.random_range(0.0..1.0) * (FISH_DELAY_MS / 2.0);
            let row = 50.0 + self.rng.random_range(0.0..1.0) * (self.window_height_px - 100.0);
            let vertical = if self.rng.random_range(0.0..1.0) < 0.5 {
                -FISH_SPEED
            } else {
                FISH_SPEED
            };
            spawn::spawn_fish(
                &mut self.registry,
                Vec2::new(self.window_width_px + 200.0, row),
                Vec2::new(-FISH_SPEED, vertical),
            );
        }

        // Turtles drift straight across
        self.next_turtle_spawn -= elapsed_ms;
        if self.registry.hard_shells.len() <= MAX_TURTLES && self.next_turtle_spawn < 0.0 {
            self.next_turtle_spawn =
                TURTLE_DELAY_MS / 2.0 + self.rng.random_range(0.0..1.0) * (TURTLE_DELAY_MS / 2.0);
            let row = 50.0 + self.rng.random_range(0.0..1.0) * (self.window_height_px - 100.0);
            spawn::spawn_turtle(
                &mut self.registry,
                Vec2::new(self.window_width_px + 100.0, row),
                Vec2::new(-TURTLE_SPEED, 0.0),
            );
        }

        // Death countdown; expiry triggers exactly one restart
        let mut min_counter_ms = DEATH_TIMER_MS;
        let dying: Vec<Entity> = self.registry.death_timers.entities().to_vec();
        for entity in dying {
            let Some(timer) = self.registry.death_timers.get_mut(entity) else {
                continue;
            };
            timer.counter_ms -= elapsed_ms;
            if timer.counter_ms < min_counter_ms {
                min_counter_ms = timer.counter_ms;
            }
            if timer.counter_ms < 0.0 {
                self.registry.death_timers.remove(entity);
                self.darken_screen_factor = 0.0;
                self.restart();
                self.events.push(GameEvent::Restarted);
                return;
            }
        }
        self.darken_screen_factor = 1.0 - min_counter_ms / DEATH_TIMER_MS;
        self.phase = if self.registry.death_timers.is_empty() {
            GamePhase::Playing
        } else {
            GamePhase::Dying
        };

        // Light-up highlight decay
        let lit: Vec<Entity> = self.registry.light_ups.entities().to_vec();
        for entity in lit {
            let Some(light) = self.registry.light_ups.get_mut(entity) else {
                continue;
            };
            light.counter_ms -= elapsed_ms;
            if light.counter_ms < 0.0 {
                self.registry.light_ups.remove(entity);
            }
        }
    }

    /// Resolve the collision pairs the physics step recorded
    ///
    /// Iterates the per-step list once and clears it, so the list is always
    /// empty before the next step's detection runs.
    pub fn handle_collisions(&mut self) {
        let collisions = std::mem::take(&mut self.registry.collisions);
        for Collision { entity, other } in collisions {
            // Either end may already be gone (eaten earlier in this pass)
            if !self.registry.motions.has(entity) || !self.registry.motions.has(other) {
                continue;
            }

            if self.registry.soft_shells.has(entity) && self.registry.soft_shells.has(other) {
                // Detection records both pair orders; the velocity exchange is
                // an involution, so resolving the mirror entry would undo it.
                // Resolve each unordered pair exactly once.
                if entity.id() < other.id() {
                    self.bounce_fish_pair(entity, other);
                }
            }

            if self.registry.players.has(entity) {
                if self.registry.hard_shells.has(other) {
                    self.begin_death(entity);
                } else if self.registry.soft_shells.has(other) {
                    self.eat_fish(entity, other);
                }
            }
        }
    }

    /// Circle-circle response for two overlapping fish
    ///
    /// Static de-overlap along the line of centers, then an equal-mass
    /// elastic exchange of the normal velocity components. The final doubling
    /// of slow fish is an ad hoc anti-stall kick, not physics.
    fn bounce_fish_pair(&mut self, entity: Entity, other: Entity) {
        let (Some(&m1), Some(&m2)) = (
            self.registry.motions.get(entity),
            self.registry.motions.get(other),
        ) else {
            return;
        };
        let mut m1 = m1;
        let mut m2 = m2;

        let delta = m1.position - m2.position;
        let dist = delta.length();
        if dist <= f32::EPSILON {
            // Coincident centers: no meaningful separation axis
            return;
        }

        // Static resolution: each fish takes half the circle overlap
        let overlap = 0.5 * (dist - 2.0 * FISH_BOUNCE_RADIUS);
        let dir = delta / dist;
        m1.position -= overlap * dir;
        m2.position += overlap * dir;

        // Dynamic resolution in tangent/normal space
        let normal = -dir;
        let tangent = Vec2::new(-normal.y, normal.x);
        let tan1 = m1.velocity.dot(tangent);
        let tan2 = m2.velocity.dot(tangent);
        let norm1 = m1.velocity.dot(normal);
        let norm2 = m2.velocity.dot(normal);
        m1.velocity = tangent * tan1 + normal * norm2;
        m2.velocity = tangent * tan2 + normal * norm1;

        if m1.velocity.length() < MIN_BOUNCE_SPEED {
            m1.velocity *= 2.0;
        }
        if m2.velocity.length() < MIN_BOUNCE_SPEED {
            m2.velocity *= 2.0;
        }

        if let Some(motion) = self.registry.motions.get_mut(entity) {
            *motion = m1;
        }
        if let Some(motion) = self.registry.motions.get_mut(other) {
            *motion = m2;
        }
    }

    /// Start the death sequence unless the salmon is already dying
    fn begin_death(&mut self, entity: Entity) {
        if self.registry.death_timers.has(entity) {
            return;
        }
        self.registry.death_timers.insert(entity, DeathTimer::default());
        if let Some(motion) = self.registry.motions.get_mut(entity) {
            // Belly-up and sinking
            motion.angle = std::f32::consts::PI;
            motion.velocity = Vec2::new(0.0, DEATH_SINK_SPEED);
        }
        if let Some(color) = self.registry.colors.get_mut(entity) {
            *color = Color::new(1.0, 0.0, 0.0);
        }
        self.phase = GamePhase::Dying;
        self.events.push(GameEvent::SalmonDied);
    }

    /// Chew, count the point, light the salmon up
    fn eat_fish(&mut self, player: Entity, fish: Entity) {
        if self.registry.death_timers.has(player) {
            return;
        }
        self.registry.remove_all_components_of(fish);
        self.points += 1;
        self.registry.light_ups.insert(player, LightUp::default());
        self.events.push(GameEvent::FishEaten {
            points: self.points,
        });
    }

    /// Reset the world to its initial state
    ///
    /// Destroys every motion-bearing entity, re-dresses the river bed, and
    /// re-creates the single player salmon. The score is a per-session
    /// running total and survives restarts.
    pub fn restart(&mut self) {
        self.registry.log_component_counts();
        log::info!("restarting, score so far: {}", self.points);

        self.current_speed = 1.0;
        while let Some(&entity) = self.registry.motions.entities().last() {
            self.registry.remove_all_components_of(entity);
        }
        self.registry.log_component_counts();

        for _ in 0..PEBBLE_COUNT {
            let radius = 30.0 * (self.rng.random_range(0.0..1.0) + 0.3);
            let x = self.rng.random_range(0.0..1.0) * self.window_width_px;
            let y = self.window_height_px - self.rng.random_range(0.0..1.0) * 20.0;
            let brightness = self.rng.random_range(0.0..1.0) * 0.5 + 0.5;
            spawn::spawn_pebble(&mut self.registry, Vec2::new(x, y), radius, brightness);
        }

        self.player = spawn::spawn_player_salmon(&mut self.registry, PLAYER_SPAWN);
        self.darken_screen_factor = 0.0;
        self.phase = GamePhase::Playing;
    }

    /// Key event from the windowing shell
    pub fn on_key(&mut self, key: Key, action: KeyAction, mods: Modifiers) {
        match (key, action) {
            (Key::R, KeyAction::Release) => {
                self.restart();
                self.events.push(GameEvent::Restarted);
            }
            (Key::D, KeyAction::Release) => self.debug_mode = false,
            (Key::D, _) => self.debug_mode = true,
            (Key::Comma, KeyAction::Release) if mods.shift => self.nudge_speed(-0.1),
            (Key::Period, KeyAction::Release) if mods.shift => self.nudge_speed(0.1),
            _ => {}
        }

        // Steering is locked while the salmon is dying
        if !self.registry.death_timers.is_empty() {
            return;
        }
        let Some(motion) = self.registry.motions.get_mut(self.player) else {
            return;
        };
        let released = action == KeyAction::Release;
        match key {
            Key::Left => motion.velocity.x = if released { 0.0 } else { -PLAYER_SPEED },
            Key::Right => motion.velocity.x = if released { 0.0 } else { PLAYER_SPEED },
            Key::Up => motion.velocity.y = if released { 0.0 } else { -PLAYER_SPEED },
            Key::Down => motion.velocity.y = if released { 0.0 } else { PLAYER_SPEED },
            _ => {}
        }
    }

    /// Cursor event: the salmon faces the cursor (default facing is (1, 0))
    pub fn on_cursor_move(&mut self, cursor: Vec2) {
        if !self.registry.death_timers.is_empty() {
            return;
        }
        let Some(motion) = self.registry.motions.get_mut(self.player) else {
            return;
        };
        let dir = cursor - motion.position;
        if dir.length_squared() > f32::EPSILON {
            motion.angle = dir.y.atan2(dir.x);
        }
    }

    fn nudge_speed(&mut self, delta: f32) {
        self.current_speed = (self.current_speed + delta).max(0.0);
        log::info!("current speed = {:.1}", self.current_speed);
        self.events.push(GameEvent::SpeedChanged {
            multiplier: self.current_speed,
        });
    }

    /// Take this frame's queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// 0.0 during play, rising toward 1.0 as the death timer runs out
    pub fn darken_screen_factor(&self) -> f32 {
        self.darken_screen_factor
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{WINDOW_HEIGHT_PX, WINDOW_WIDTH_PX};

    fn world() -> GameWorld {
        GameWorld::new(7, WINDOW_WIDTH_PX, WINDOW_HEIGHT_PX)
    }

    #[test]
    fn test_new_world_has_exactly_one_player() {
        let world = world();
        assert_eq!(world.registry().players.len(), 1);
        assert_eq!(world.registry().pebbles.len(), PEBBLE_COUNT);
        assert_eq!(world.points(), 0);
        assert_eq!(world.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_offscreen_left_entities_are_swept() {
        let mut w = world();
        let gone = spawn::spawn_fish(
            w.registry_mut(),
            Vec2::new(-100.0, 300.0),
            Vec2::ZERO,
        );
        let kept = spawn::spawn_fish(
            w.registry_mut(),
            Vec2::new(600.0, 300.0),
            Vec2::ZERO,
        );
        w.step(16.0);
        assert!(!w.registry().motions.has(gone));
        assert!(w.registry().motions.has(kept));
    }

    #[test]
    fn test_collision_list_is_empty_after_every_step() {
        let mut w = world();
        spawn::spawn_fish(w.registry_mut(), Vec2::new(500.0, 300.0), Vec2::ZERO);
        spawn::spawn_fish(w.registry_mut(), Vec2::new(510.0, 300.0), Vec2::ZERO);
        w.step(16.0);
        assert!(w.registry().collisions.is_empty());
    }

    #[test]
    fn test_fish_spawn_respects_population_cap() {
        let mut w = world();
        for i in 0..=MAX_FISH {
            spawn::spawn_fish(
                w.registry_mut(),
                Vec2::new(400.0 + 100.0 * i as f32, 300.0),
                Vec2::ZERO,
            );
        }
        let before = w.registry().soft_shells.len();
        w.next_fish_spawn = -1.0;
        w.update_rules(16.0);
        assert_eq!(w.registry().soft_shells.len(), before);
    }

    #[test]
    fn test_fish_spawn_fires_when_timer_expires() {
        let mut w = world();
        w.next_fish_spawn = -1.0;
        w.next_turtle_spawn = f32::MAX;
        w.update_rules(16.0);
        assert_eq!(w.registry().soft_shells.len(), 1);
        assert!(w.next_fish_spawn >= FISH_DELAY_MS / 2.0);
    }

    #[test]
    fn test_hitting_a_turtle_starts_death() {
        let mut w = world();
        let player = w.player();
        let player_pos = w.registry().motions.get(player).unwrap().position;
        spawn::spawn_turtle(w.registry_mut(), player_pos, Vec2::ZERO);
        w.step(16.0);

        assert!(w.registry().death_timers.has(player));
        assert_eq!(w.phase(), GamePhase::Dying);
        let motion = w.registry().motions.get(player).unwrap();
        assert_eq!(motion.velocity, Vec2::new(0.0, DEATH_SINK_SPEED));
        let color = w.registry().colors.get(player).unwrap();
        assert_eq!(*color, Color::new(1.0, 0.0, 0.0));
        assert!(w.drain_events().contains(&GameEvent::SalmonDied));
    }

    #[test]
    fn test_eating_a_fish_scores_and_lights_up() {
        let mut w = world();
        let player = w.player();
        let player_pos = w.registry().motions.get(player).unwrap().position;
        let fish = spawn::spawn_fish(w.registry_mut(), player_pos, Vec2::ZERO);
        w.step(16.0);

        assert_eq!(w.points(), 1);
        assert!(!w.registry().motions.has(fish));
        assert!(w.registry().light_ups.has(player));
        assert!(w
            .drain_events()
            .contains(&GameEvent::FishEaten { points: 1 }));
    }

    #[test]
    fn test_death_timer_expiry_triggers_exactly_one_restart() {
        let mut w = world();
        let player = w.player();
        w.registry_mut()
            .death_timers
            .insert(player, DeathTimer { counter_ms: 100.0 });

        w.step(200.0);
        let restarts = w
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::Restarted)
            .count();
        assert_eq!(restarts, 1);
        assert_eq!(w.phase(), GamePhase::Playing);
        assert_eq!(w.registry().players.len(), 1);
        assert!(w.registry().death_timers.is_empty());

        // No further restarts once play resumed
        w.step(200.0);
        assert!(!w.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_darken_factor_tracks_remaining_death_time() {
        let mut w = world();
        let player = w.player();
        w.registry_mut()
            .death_timers
            .insert(player, DeathTimer { counter_ms: 1500.0 });
        w.update_rules(0.0);
        assert!((w.darken_screen_factor() - 0.5).abs() < 1e-5);
        assert_eq!(w.phase(), GamePhase::Dying);
    }

    #[test]
    fn test_steering_is_ignored_while_dying() {
        let mut w = world();
        let player = w.player();
        w.registry_mut()
            .death_timers
            .insert(player, DeathTimer::default());
        w.on_key(Key::Left, KeyAction::Press, Modifiers::NONE);
        let motion = w.registry().motions.get(player).unwrap();
        assert_eq!(motion.velocity.x, 0.0);
    }

    #[test]
    fn test_arrow_keys_steer_the_salmon() {
        let mut w = world();
        let player = w.player();
        w.on_key(Key::Left, KeyAction::Press, Modifiers::NONE);
        w.on_key(Key::Up, KeyAction::Press, Modifiers::NONE);
        let motion = *w.registry().motions.get(player).unwrap();
        assert_eq!(motion.velocity, Vec2::new(-PLAYER_SPEED, -PLAYER_SPEED));

        w.on_key(Key::Left, KeyAction::Release, Modifiers::NONE);
        let motion = *w.registry().motions.get(player).unwrap();
        assert_eq!(motion.velocity, Vec2::new(0.0, -PLAYER_SPEED));
    }

    #[test]
    fn test_speed_multiplier_clamps_at_zero() {
        let mut w = world();
        for _ in 0..20 {
            w.on_key(Key::Comma, KeyAction::Release, Modifiers::SHIFT);
        }
        assert_eq!(w.current_speed(), 0.0);
        // Unshifted comma does nothing
        w.on_key(Key::Period, KeyAction::Release, Modifiers::NONE);
        assert_eq!(w.current_speed(), 0.0);
    }

    #[test]
    fn test_manual_restart_resets_speed_and_player() {
        let mut w = world();
        w.on_key(Key::Period, KeyAction::Release, Modifiers::SHIFT);
        w.on_key(Key::Period, KeyAction::Release, Modifiers::SHIFT);
        assert!((w.current_speed() - 1.2).abs() < 1e-5);

        w.on_key(Key::R, KeyAction::Release, Modifiers::NONE);
        assert_eq!(w.current_speed(), 1.0);
        assert_eq!(w.registry().players.len(), 1);
        assert!(w.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_cursor_move_turns_the_salmon() {
        let mut w = world();
        let player = w.player();
        let pos = w.registry().motions.get(player).unwrap().position;
        w.on_cursor_move(pos + Vec2::new(100.0, 100.0));
        let angle = w.registry().motions.get(player).unwrap().angle;
        assert!((angle - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
    }

    #[test]
    fn test_fish_pair_bounce_separates_and_kicks() {
        let mut w = world();
        let a = spawn::spawn_fish(w.registry_mut(), Vec2::new(500.0, 300.0), Vec2::new(10.0, 0.0));
        let b = spawn::spawn_fish(
            w.registry_mut(),
            Vec2::new(530.0, 300.0),
            Vec2::new(-10.0, 0.0),
        );
        w.registry_mut().record_collision(a, b);
        w.handle_collisions();

        let m1 = *w.registry().motions.get(a).unwrap();
        let m2 = *w.registry().motions.get(b).unwrap();
        // Pushed apart to the de-overlap distance
        assert!((m1.position.distance(m2.position) - 2.0 * FISH_BOUNCE_RADIUS).abs() < 1e-3);
        // Anti-stall kick doubled the slow post-bounce velocities
        assert!(m1.velocity.x < 0.0);
        assert!(m2.velocity.x > 0.0);
        assert_eq!(m1.velocity.x.abs(), 20.0);
    }

    #[test]
    fn test_head_on_fish_bounce_swaps_velocities_through_step() {
        let mut w = world();
        let a = spawn::spawn_fish(
            w.registry_mut(),
            Vec2::new(500.0, 300.0),
            Vec2::new(200.0, 0.0),
        );
        let b = spawn::spawn_fish(
            w.registry_mut(),
            Vec2::new(530.0, 300.0),
            Vec2::new(-200.0, 0.0),
        );

        // Detection records the hit in both orders; the duplicate must not
        // undo the exchange.
        w.step(16.0);
        let va = w.registry().motions.get(a).unwrap().velocity;
        let vb = w.registry().motions.get(b).unwrap().velocity;
        assert!((va - Vec2::new(-200.0, 0.0)).length() < 1e-3, "va = {va}");
        assert!((vb - Vec2::new(200.0, 0.0)).length() < 1e-3, "vb = {vb}");
    }

    #[test]
    fn test_debug_lines_cleared_each_step() {
        let mut w = world();
        w.on_key(Key::D, KeyAction::Press, Modifiers::NONE);
        w.step(16.0);
        let after_first = w.registry().debug_lines.len();
        assert!(after_first > 0);
        w.step(16.0);
        // Same population, not accumulating across frames
        assert_eq!(w.registry().debug_lines.len(), after_first);

        w.on_key(Key::D, KeyAction::Release, Modifiers::NONE);
        w.step(16.0);
        assert_eq!(w.registry().debug_lines.len(), 0);
    }
}
