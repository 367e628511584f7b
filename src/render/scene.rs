use super::font::Font;
use super::{Canvas, Rgb, WHITE};
use crate::config::{LANE_COUNT, LANE_WIDTH, ROAD_LEFT, ROAD_RIGHT, ROAD_WIDTH, SCREEN_H, SCREEN_W};
use crate::world::World;
use crate::world::entity::{Car, Orb, Scenery, SceneryKind};

const SKY_TOP: Rgb = Rgb(8, 0, 24);
const SKY_BOT: Rgb = Rgb(40, 0, 60);
const STAR: Rgb = Rgb(200, 200, 255);
const ROAD: Rgb = Rgb(18, 10, 34);
const ROAD_GRID: Rgb = Rgb(90, 20, 140);
const ROAD_EDGE: Rgb = Rgb(255, 0, 200);
const STRIPE: Rgb = Rgb(0, 220, 255);
const RUMBLE: Rgb = Rgb(255, 60, 160);
const ORB_CORE: Rgb = Rgb(120, 255, 255);
const ORB_GLOW: Rgb = Rgb(0, 200, 255);
const WINDOW: Rgb = Rgb(20, 20, 40);
const HEADLIGHT: Rgb = Rgb(255, 255, 200);
const TAILLIGHT: Rgb = Rgb(255, 30, 30);
const HUD: Rgb = Rgb(0, 255, 200);
const HUD_BEST: Rgb = Rgb(255, 220, 0);

const STAR_COUNT: u64 = 90;

// ── Background ──────────────────────────────────────────────────────────────

/// Gradient sky with a starfield drifting down at three depths.
pub fn draw_background(canvas: &mut Canvas, t: f64) {
    const BANDS: usize = 24;
    let band_h = SCREEN_H / BANDS as f64;
    for band in 0..BANDS {
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, (band * 256 / BANDS) as u16);
        canvas.fill_rect(0.0, band as f64 * band_h, SCREEN_W, band_h + 1.0, c);
    }

    for i in 0..STAR_COUNT {
        let depth = 1.0 + (i % 3) as f64;
        let x = pseudo_rand(i * 2) * SCREEN_W;
        let y = (pseudo_rand(i * 2 + 1) * SCREEN_H + t * 12.0 * depth).rem_euclid(SCREEN_H);
        let twinkle = 0.6 + 0.4 * (t * 2.0 + i as f64).sin();
        let c = STAR.dim((twinkle * depth / 3.0 * 256.0) as u16);
        canvas.fill_rect(x, y, depth, depth, c);
    }
}

// ── Road ────────────────────────────────────────────────────────────────────

pub fn draw_road(canvas: &mut Canvas, scenery: &[Scenery]) {
    canvas.fill_rect(ROAD_LEFT, 0.0, ROAD_WIDTH, SCREEN_H, ROAD);
    // Segments first so stripes always sit on top of the grid.
    for kind in [SceneryKind::RoadSegment, SceneryKind::LaneStripe] {
        for sprite in scenery.iter().filter(|s| s.kind == kind) {
            match kind {
                SceneryKind::RoadSegment => draw_segment(canvas, sprite.y),
                SceneryKind::LaneStripe => draw_stripe(canvas, sprite.y),
            }
        }
    }
    canvas.fill_rect(ROAD_LEFT - 3.0, 0.0, 3.0, SCREEN_H, ROAD_EDGE);
    canvas.fill_rect(ROAD_RIGHT, 0.0, 3.0, SCREEN_H, ROAD_EDGE);
}

fn draw_segment(canvas: &mut Canvas, y: f64) {
    canvas.line(ROAD_LEFT, y, ROAD_RIGHT, y, ROAD_GRID);
}

fn draw_stripe(canvas: &mut Canvas, y: f64) {
    let h = SceneryKind::LaneStripe.height();
    for lane in 1..LANE_COUNT {
        let x = ROAD_LEFT + lane as f64 * LANE_WIDTH;
        canvas.fill_rect(x - 2.0, y, 4.0, h, STRIPE);
    }
    canvas.fill_rect(ROAD_LEFT - 14.0, y, 8.0, h, RUMBLE);
    canvas.fill_rect(ROAD_RIGHT + 6.0, y, 8.0, h, RUMBLE);
}

// ── Entities ────────────────────────────────────────────────────────────────

pub fn draw_orb(canvas: &mut Canvas, orb: &Orb) {
    let r = orb.radius * orb.pulse();
    canvas.glow(orb.x, orb.y, r * 1.8, ORB_GLOW, 160);
    canvas.fill_circle(orb.x, orb.y, r, ORB_CORE);
    canvas.fill_circle(orb.x - r * 0.3, orb.y - r * 0.3, r * 0.3, WHITE);
}

fn draw_body(canvas: &mut Canvas, car: &Car, y: f64) {
    let (x, w, h) = (car.x, car.w, car.h);
    canvas.glow(x + w / 2.0, y + h / 2.0, h * 0.8, car.color, 70);
    canvas.fill_rect(x, y, w, h, car.color);
    canvas.fill_rect(x + 4.0, y + h * 0.2, w - 8.0, h * 0.18, WINDOW);
    canvas.fill_rect(x + 4.0, y + h * 0.62, w - 8.0, h * 0.14, WINDOW);
    canvas.fill_rect(x - 3.0, y + 8.0, 3.0, 12.0, WINDOW);
    canvas.fill_rect(x + w, y + 8.0, 3.0, 12.0, WINDOW);
    canvas.fill_rect(x - 3.0, y + h - 20.0, 3.0, 12.0, WINDOW);
    canvas.fill_rect(x + w, y + h - 20.0, 3.0, 12.0, WINDOW);
}

/// Oncoming traffic, headlights toward the player.
pub fn draw_enemy(canvas: &mut Canvas, car: &Car) {
    draw_body(canvas, car, car.y);
    canvas.fill_rect(car.x + 3.0, car.y + car.h - 5.0, 8.0, 4.0, HEADLIGHT);
    canvas.fill_rect(car.x + car.w - 11.0, car.y + car.h - 5.0, 8.0, 4.0, HEADLIGHT);
}

pub fn draw_player(canvas: &mut Canvas, car: &Car) {
    let y = car.y + 2.0 * (car.anim as f64 * 0.2).sin();
    for lamp_x in [car.x + 8.0, car.x + car.w - 8.0] {
        canvas.glow(lamp_x, y - 25.0, 30.0, HEADLIGHT, 120);
        canvas.fill_circle(lamp_x, y + 2.0, 3.0, HEADLIGHT);
    }
    draw_body(canvas, car, y);
    canvas.fill_rect(car.x + 3.0, y + car.h - 4.0, 8.0, 4.0, TAILLIGHT);
    canvas.fill_rect(car.x + car.w - 11.0, y + car.h - 4.0, 8.0, 4.0, TAILLIGHT);
}

// ── HUD ─────────────────────────────────────────────────────────────────────

pub fn draw_hud(canvas: &mut Canvas, font: &Font, world: &World) {
    let line = canvas.text_height(font) * 1.5;
    canvas.text(font, &format!("SCORE {}", world.score), 16.0, 16.0, HUD);
    canvas.text(
        font,
        &format!("SPEED {:.1}", world.difficulty.enemy_speed()),
        16.0,
        16.0 + line,
        HUD,
    );
    let best = format!("BEST {}", world.high_score);
    let best_w = canvas.text_width(font, &best);
    canvas.text(font, &best, SCREEN_W - 16.0 - best_w, 16.0, HUD_BEST);
    let label = world.difficulty.label();
    let label_w = canvas.text_width(font, label);
    canvas.text(font, label, SCREEN_W - 16.0 - label_w, 16.0 + line, HUD);
}

/// Background, road, orbs, enemies, player, HUD.
pub fn draw_world(canvas: &mut Canvas, font: &Font, world: &World) {
    draw_background(canvas, world.t);
    draw_road(canvas, &world.scenery);
    for orb in &world.orbs {
        draw_orb(canvas, orb);
    }
    for enemy in &world.enemies {
        draw_enemy(canvas, enemy);
    }
    draw_player(canvas, &world.player);
    draw_hud(canvas, font, world);
}

pub fn pseudo_rand(seed: u64) -> f64 {
    let x = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    let bits = (x >> 33) ^ x;
    (bits % 1000) as f64 / 1000.0
}
