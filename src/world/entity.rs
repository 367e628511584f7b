use crate::config::{
    CAR_H, CAR_W, LANE_COUNT, ORB_RADIUS, PLAYER_Y, SCREEN_W, SEGMENT_H, STRIPE_GAP, STRIPE_H,
    lane_center,
};
use crate::render::Rgb;

pub const PLAYER_COLOR: Rgb = Rgb(0, 255, 255);

pub const ENEMY_PALETTE: [Rgb; 5] = [
    Rgb(255, 0, 128),
    Rgb(255, 255, 0),
    Rgb(0, 255, 128),
    Rgb(255, 128, 0),
    Rgb(180, 0, 255),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Aabb {
    /// Strict overlap: boxes that only share an edge do not touch.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Anything the scroller moves down the screen.
pub trait Scrolling {
    fn y(&self) -> f64;
    fn advance(&mut self, dy: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: Rgb,
    pub is_player: bool,
    pub anim: u64,
}

impl Car {
    pub fn player() -> Self {
        Self {
            x: SCREEN_W / 2.0 - CAR_W / 2.0,
            y: PLAYER_Y,
            w: CAR_W,
            h: CAR_H,
            color: PLAYER_COLOR,
            is_player: true,
            anim: 0,
        }
    }

    /// An enemy centered in `lane` with its top edge at `y`.
    pub fn enemy(lane: usize, y: f64, color: Rgb) -> Self {
        debug_assert!(lane < LANE_COUNT);
        Self {
            x: lane_center(lane) - CAR_W / 2.0,
            y,
            w: CAR_W,
            h: CAR_H,
            color,
            is_player: false,
            anim: 0,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

impl Scrolling for Car {
    fn y(&self) -> f64 {
        self.y
    }

    fn advance(&mut self, dy: f64) {
        self.y += dy;
        self.anim += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub collected: bool,
    pub phase: f64,
}

impl Orb {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            radius: ORB_RADIUS,
            collected: false,
            phase: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            x: self.x - self.radius,
            y: self.y - self.radius,
            w: self.radius * 2.0,
            h: self.radius * 2.0,
        }
    }

    /// Scale factor for the pulsating glow.
    pub fn pulse(&self) -> f64 {
        1.0 + 0.2 * self.phase.sin()
    }
}

impl Scrolling for Orb {
    fn y(&self) -> f64 {
        self.y
    }

    fn advance(&mut self, dy: f64) {
        self.y += dy;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneryKind {
    RoadSegment,
    LaneStripe,
}

impl SceneryKind {
    /// Vertical period of one sprite, including the gap after it.
    pub fn period(self) -> f64 {
        match self {
            SceneryKind::RoadSegment => SEGMENT_H,
            SceneryKind::LaneStripe => STRIPE_H + STRIPE_GAP,
        }
    }

    pub fn height(self) -> f64 {
        match self {
            SceneryKind::RoadSegment => SEGMENT_H,
            SceneryKind::LaneStripe => STRIPE_H,
        }
    }
}

/// Road sprites, recycled in place for the lifetime of the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenery {
    pub kind: SceneryKind,
    pub y: f64,
}

impl Scrolling for Scenery {
    fn y(&self) -> f64 {
        self.y
    }

    fn advance(&mut self, dy: f64) {
        self.y += dy;
    }
}

/// A strip of sprites of one kind that covers the screen with one spare.
pub fn scenery_strip(kind: SceneryKind, screen_h: f64) -> Vec<Scenery> {
    let period = kind.period();
    let count = (screen_h / period).ceil() as usize + 2;
    (0..count)
        .map(|i| Scenery {
            kind,
            y: -period + i as f64 * period,
        })
        .collect()
}

/// Total vertical length of all sprites of `kind` in `scenery`.
pub fn strip_length(scenery: &[Scenery], kind: SceneryKind) -> f64 {
    scenery.iter().filter(|s| s.kind == kind).count() as f64 * kind.period()
}
