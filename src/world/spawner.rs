use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::entity::{Car, ENEMY_PALETTE, Orb};
use crate::config::{
    ENEMY_SPAWN_Y, LANE_COUNT, ORB_EDGE_INSET, ORB_SPAWN_Y, ROAD_LEFT, ROAD_WIDTH,
};
use crate::difficulty::ProfileParams;

/// Probabilistic per-tick source of enemies and orbs.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: StdRng,
}

#[derive(Debug, Default)]
pub struct Spawned {
    pub enemy: Option<Car>,
    pub orb: Option<Orb>,
}

impl Spawner {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Runs the two independent Bernoulli trials for a tick of `dt` seconds.
    pub fn maybe_spawn(&mut self, params: &ProfileParams, dt: f64) -> Spawned {
        let mut spawned = Spawned::default();
        if self.trial(params.enemy_spawns_per_sec() * dt) {
            spawned.enemy = Some(self.enemy());
        }
        if self.trial(params.orb_spawns_per_sec() * dt) {
            spawned.orb = Some(self.orb());
        }
        spawned
    }

    fn trial(&mut self, p: f64) -> bool {
        if p.is_nan() || p <= 0.0 {
            return false;
        }
        self.rng.gen_bool(p.min(1.0))
    }

    pub fn enemy(&mut self) -> Car {
        let lane = self.rng.gen_range(0..LANE_COUNT);
        let color = ENEMY_PALETTE[self.rng.gen_range(0..ENEMY_PALETTE.len())];
        Car::enemy(lane, ENEMY_SPAWN_Y, color)
    }

    pub fn orb(&mut self) -> Orb {
        let min_x = ROAD_LEFT + ORB_EDGE_INSET;
        let max_x = ROAD_LEFT + ROAD_WIDTH - ORB_EDGE_INSET;
        Orb::new(self.rng.gen_range(min_x..=max_x), ORB_SPAWN_Y)
    }
}
