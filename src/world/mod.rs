pub mod collision;
pub mod entity;
pub mod scroller;
pub mod spawner;

use tracing::{debug, info};

use crate::config::{
    LEGACY_FPS, MAX_SIM_STEP, ORB_SCORE, ROAD_LEFT, ROAD_MARGIN, ROAD_RIGHT, SCREEN_H,
    TIME_SCORE_PER_SEC,
};
use crate::difficulty::Difficulty;
use entity::{Car, Orb, Scenery, SceneryKind, scenery_strip};
use spawner::Spawner;

/// Held steering directions for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steer {
    pub left: bool,
    pub right: bool,
}

impl Steer {
    pub const NONE: Steer = Steer {
        left: false,
        right: false,
    };
    pub const LEFT: Steer = Steer {
        left: true,
        right: false,
    };
    pub const RIGHT: Steer = Steer {
        left: false,
        right: true,
    };

    fn axis(self) -> f64 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    Crash { x: f64, y: f64 },
    Pickup { x: f64, y: f64 },
}

pub struct World {
    pub player: Car,
    pub enemies: Vec<Car>,
    pub orbs: Vec<Orb>,
    pub scenery: Vec<Scenery>,
    pub difficulty: Difficulty,
    pub t: f64,
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
    time_points: u64,
    spawner: Spawner,
}

impl World {
    pub fn new(difficulty: Difficulty, high_score: u64, spawner: Spawner) -> Self {
        let mut scenery = scenery_strip(SceneryKind::RoadSegment, SCREEN_H);
        scenery.extend(scenery_strip(SceneryKind::LaneStripe, SCREEN_H));
        let mut world = Self {
            player: Car::player(),
            enemies: Vec::new(),
            orbs: Vec::new(),
            scenery,
            difficulty,
            t: 0.0,
            score: 0,
            high_score,
            game_over: false,
            time_points: 0,
            spawner,
        };
        world.difficulty.restart();
        world
    }

    pub fn with_seed(difficulty: Difficulty, high_score: u64, seed: u64) -> Self {
        Self::new(difficulty, high_score, Spawner::seeded(seed))
    }

    /// Starts a fresh run. Keeps the high score, the difficulty profile,
    /// the spawner stream and the road sprites.
    pub fn reset(&mut self) {
        let mut difficulty = self.difficulty.clone();
        difficulty.restart();
        let scenery = std::mem::take(&mut self.scenery);
        let spawner = self.spawner.clone();
        *self = World {
            scenery,
            ..World::new(difficulty, self.high_score, spawner)
        };
        info!(high_score = self.high_score, "world reset");
    }

    /// Advances one tick of `dt` seconds, in sub-steps no longer than
    /// `MAX_SIM_STEP` so nothing moves past the player between checks.
    pub fn update(&mut self, dt: f64, steer: Steer) -> Vec<WorldEvent> {
        let mut events = Vec::new();
        let dt = dt.max(0.0);
        let steps = (dt / MAX_SIM_STEP - 1e-9).ceil().max(1.0) as usize;
        let step = dt / steps as f64;
        for _ in 0..steps {
            if self.game_over {
                break;
            }
            self.step(step, steer, &mut events);
        }
        events
    }

    fn step(&mut self, dt: f64, steer: Steer, events: &mut Vec<WorldEvent>) {
        let frames = dt * LEGACY_FPS;

        self.t += dt;
        self.difficulty.update(dt, self.t);

        self.steer_player(steer, frames);

        scroller::scroll_scenery(&mut self.scenery, self.difficulty.scroll_speed() * frames);
        scroller::advance_all(&mut self.enemies, self.difficulty.enemy_speed() * frames);
        scroller::advance_all(&mut self.orbs, self.difficulty.scroll_speed() * frames);
        for orb in &mut self.orbs {
            orb.phase += dt * 6.0;
        }
        scroller::sweep(&mut self.enemies, &mut self.orbs);

        let spawned = self.spawner.maybe_spawn(self.difficulty.params(), dt);
        if let Some(enemy) = spawned.enemy {
            debug!(x = enemy.center_x(), "enemy spawned");
            self.enemies.push(enemy);
        }
        if let Some(orb) = spawned.orb {
            debug!(x = orb.x, "orb spawned");
            self.orbs.push(orb);
        }

        if let Some(index) = collision::first_crash(&self.player, &self.enemies) {
            let enemy = &self.enemies[index];
            info!(score = self.score, t = self.t, "crashed");
            events.push(WorldEvent::Crash {
                x: (self.player.center_x() + enemy.center_x()) / 2.0,
                y: self.player.y,
            });
            self.game_over = true;
            return;
        }

        let taken = collision::collect_orbs(&self.player, &mut self.orbs);
        self.orbs.retain(|orb| !orb.collected);
        for &(x, y) in &taken {
            debug!(x, y, "orb collected");
            events.push(WorldEvent::Pickup { x, y });
        }

        self.score += taken.len() as u64 * ORB_SCORE;
        self.score += self.award_time_points();
        self.high_score = self.high_score.max(self.score);
    }

    fn steer_player(&mut self, steer: Steer, frames: f64) {
        let speed = self.difficulty.params().player_speed;
        self.player.x += steer.axis() * speed * frames;
        self.player.anim += 1;

        let (min_x, max_x) = Self::player_bounds(&self.player);
        debug_assert!(min_x <= max_x);
        self.player.x = self.player.x.min(max_x).max(min_x);
    }

    /// Allowed range for the player's left edge.
    pub fn player_bounds(player: &Car) -> (f64, f64) {
        (ROAD_LEFT + ROAD_MARGIN, ROAD_RIGHT - player.w - ROAD_MARGIN)
    }

    /// Points for elapsed time not yet paid out. Totals `floor(t * 10)`.
    fn award_time_points(&mut self) -> u64 {
        let due = (self.t * TIME_SCORE_PER_SEC + 1e-6).floor() as u64;
        let owed = due.saturating_sub(self.time_points);
        self.time_points = due.max(self.time_points);
        owed
    }
}
