use std::env;
use std::path::PathBuf;

// ── Logical frame ───────────────────────────────────────────────────────────

pub const SCREEN_W: f64 = 800.0;
pub const SCREEN_H: f64 = 600.0;
pub const TITLE: &str = "NEON RACER";

// ── Road ────────────────────────────────────────────────────────────────────

pub const ROAD_WIDTH: f64 = 400.0;
pub const LANE_COUNT: usize = 4;
pub const ROAD_LEFT: f64 = (SCREEN_W - ROAD_WIDTH) / 2.0;
pub const ROAD_RIGHT: f64 = ROAD_LEFT + ROAD_WIDTH;
pub const LANE_WIDTH: f64 = ROAD_WIDTH / LANE_COUNT as f64;

/// Gap kept between the player's box and the road edges.
pub const ROAD_MARGIN: f64 = 5.0;
/// Entities this far below the bottom edge are dropped.
pub const OFFSCREEN_MARGIN: f64 = 100.0;

pub const SEGMENT_H: f64 = 100.0;
pub const STRIPE_H: f64 = 40.0;
pub const STRIPE_GAP: f64 = 40.0;

// ── Entities ────────────────────────────────────────────────────────────────

pub const CAR_W: f64 = 40.0;
pub const CAR_H: f64 = 60.0;
pub const PLAYER_Y: f64 = SCREEN_H - CAR_H - 60.0;
pub const ORB_RADIUS: f64 = 15.0;

pub const ENEMY_SPAWN_Y: f64 = -100.0;
pub const ORB_SPAWN_Y: f64 = -30.0;
/// Orbs never spawn closer than this to either road edge.
pub const ORB_EDGE_INSET: f64 = 30.0;

// ── Scoring ─────────────────────────────────────────────────────────────────

pub const ORB_SCORE: u64 = 100;
pub const TIME_SCORE_PER_SEC: f64 = 10.0;
pub const HIGH_SCORE_SLOTS: usize = 10;
pub const HIGH_SCORE_NAME: &str = "YOU";

// ── Pacing ──────────────────────────────────────────────────────────────────

/// Legacy per-frame quantities are defined against this rate.
pub const LEGACY_FPS: f64 = 60.0;
pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FRAME_DT: f64 = 0.25;
/// How long a first press holds a direction when the terminal never reports
/// releases. Covers the usual delay before auto-repeat kicks in.
pub const DEFAULT_HOLD_WINDOW: f64 = 0.5;
/// Longest slice of time the world advances between collision checks.
pub const MAX_SIM_STEP: f64 = 1.0 / LEGACY_FPS;

// ── Files ───────────────────────────────────────────────────────────────────

pub const HIGH_SCORES_FILE: &str = "high_scores.json";
pub const SETTINGS_FILE: &str = "difficulty_settings.json";
pub const DEFAULT_LOG_FILE: &str = "neon_racer.log";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub fps: u32,
    pub seed: Option<u64>,
    pub hold_window: f64,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            assets_dir: PathBuf::from("assets"),
            fps: DEFAULT_FPS,
            seed: None,
            hold_window: DEFAULT_HOLD_WINDOW,
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: lookup("NEON_RACER_DATA_DIR")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            assets_dir: lookup("NEON_RACER_ASSETS_DIR")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            fps: lookup("NEON_RACER_FPS")
                .and_then(|value| value.parse::<u32>().ok())
                .filter(|value| *value > 0)
                .unwrap_or(defaults.fps),
            seed: lookup("NEON_RACER_SEED").and_then(|value| value.parse::<u64>().ok()),
            hold_window: lookup("NEON_RACER_HOLD_WINDOW")
                .and_then(|value| value.parse::<f64>().ok())
                .filter(|value| value.is_finite() && *value > 0.0)
                .unwrap_or(defaults.hold_window),
            log_file: lookup("NEON_RACER_LOG")
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.log_file),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.assets_dir.join("sounds")
    }
}

/// Center x of `lane`, counted from the left road edge.
pub fn lane_center(lane: usize) -> f64 {
    ROAD_LEFT + LANE_WIDTH * lane as f64 + LANE_WIDTH / 2.0
}
