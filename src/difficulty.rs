use serde::{Deserialize, Serialize};

use crate::config::LEGACY_FPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Easy, Profile::Medium, Profile::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Profile::Easy => "EASY",
            Profile::Medium => "MEDIUM",
            Profile::Hard => "HARD",
        }
    }

    pub fn next(self) -> Profile {
        match self {
            Profile::Easy => Profile::Medium,
            Profile::Medium => Profile::Hard,
            Profile::Hard => Profile::Easy,
        }
    }

    pub fn params(self) -> ProfileParams {
        match self {
            Profile::Easy => ProfileParams {
                initial_enemy_speed: 3.0,
                initial_scroll_speed: 4.0,
                max_enemy_speed: 8.0,
                max_scroll_speed: 10.0,
                enemy_spawn_rate: 0.015,
                orb_spawn_rate: 0.012,
                speed_increase_rate: 0.0005,
                player_speed: 5.0,
            },
            Profile::Medium => ProfileParams {
                initial_enemy_speed: 4.0,
                initial_scroll_speed: 5.0,
                max_enemy_speed: 10.0,
                max_scroll_speed: 12.0,
                enemy_spawn_rate: 0.02,
                orb_spawn_rate: 0.01,
                speed_increase_rate: 0.001,
                player_speed: 6.0,
            },
            Profile::Hard => ProfileParams {
                initial_enemy_speed: 5.0,
                initial_scroll_speed: 6.0,
                max_enemy_speed: 13.0,
                max_scroll_speed: 15.0,
                enemy_spawn_rate: 0.03,
                orb_spawn_rate: 0.008,
                speed_increase_rate: 0.002,
                player_speed: 7.0,
            },
        }
    }
}

/// Difficulty parameters. Speeds and rates are per legacy 60 Hz frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileParams {
    pub initial_enemy_speed: f64,
    pub initial_scroll_speed: f64,
    pub max_enemy_speed: f64,
    pub max_scroll_speed: f64,
    pub enemy_spawn_rate: f64,
    pub orb_spawn_rate: f64,
    pub speed_increase_rate: f64,
    pub player_speed: f64,
}

impl ProfileParams {
    pub fn enemy_spawns_per_sec(&self) -> f64 {
        self.enemy_spawn_rate * LEGACY_FPS
    }

    pub fn orb_spawns_per_sec(&self) -> f64 {
        self.orb_spawn_rate * LEGACY_FPS
    }

    /// Speed gained per second of play.
    pub fn speed_gain_per_sec(&self) -> f64 {
        self.speed_increase_rate * LEGACY_FPS
    }
}

/// Selected profile plus the speeds evolved from it.
#[derive(Debug, Clone)]
pub struct Difficulty {
    profile: Option<Profile>,
    params: ProfileParams,
    enemy_speed: f64,
    scroll_speed: f64,
}

impl Difficulty {
    pub fn new(profile: Profile) -> Self {
        let mut difficulty = Self::custom(profile.params());
        difficulty.profile = Some(profile);
        difficulty
    }

    /// Unnamed parameter set, used for tuning and deterministic runs.
    pub fn custom(params: ProfileParams) -> Self {
        let mut difficulty = Self {
            profile: None,
            params,
            enemy_speed: 0.0,
            scroll_speed: 0.0,
        };
        difficulty.restart();
        difficulty
    }

    pub fn select(&mut self, profile: Profile) {
        self.profile = Some(profile);
        self.params = profile.params();
        self.restart();
    }

    pub fn restart(&mut self) {
        self.update(0.0, 0.0);
    }

    /// Recomputes the current speeds for elapsed game time `t` (seconds).
    pub fn update(&mut self, _dt: f64, t: f64) {
        let gain = self.params.speed_gain_per_sec() * t.max(0.0);
        let p = &self.params;
        self.enemy_speed = (p.initial_enemy_speed + gain).min(p.max_enemy_speed).max(0.0);
        self.scroll_speed = (p.initial_scroll_speed + gain).min(p.max_scroll_speed).max(0.0);
    }

    pub fn profile(&self) -> Option<Profile> {
        self.profile
    }

    pub fn params(&self) -> &ProfileParams {
        &self.params
    }

    pub fn enemy_speed(&self) -> f64 {
        self.enemy_speed
    }

    pub fn scroll_speed(&self) -> f64 {
        self.scroll_speed
    }

    pub fn label(&self) -> &'static str {
        self.profile.map_or("CUSTOM", Profile::name)
    }
}
