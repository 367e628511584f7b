use super::entity::{Car, Orb, Scenery, SceneryKind, Scrolling, strip_length};
use crate::config::{OFFSCREEN_MARGIN, SCREEN_H};

pub fn advance_all<T: Scrolling>(items: &mut [T], dy: f64) {
    for item in items {
        item.advance(dy);
    }
}

/// Moves the road sprites and wraps the ones that left the bottom edge.
pub fn scroll_scenery(scenery: &mut [Scenery], dy: f64) {
    let segments = strip_length(scenery, SceneryKind::RoadSegment);
    let stripes = strip_length(scenery, SceneryKind::LaneStripe);
    advance_all(scenery, dy);
    for sprite in scenery.iter_mut() {
        if sprite.y > SCREEN_H {
            sprite.y -= match sprite.kind {
                SceneryKind::RoadSegment => segments,
                SceneryKind::LaneStripe => stripes,
            };
        }
    }
}

pub fn is_offscreen(item: &impl Scrolling) -> bool {
    item.y() > SCREEN_H + OFFSCREEN_MARGIN
}

/// Drops enemies and orbs that scrolled away, and orbs already collected.
pub fn sweep(enemies: &mut Vec<Car>, orbs: &mut Vec<Orb>) {
    enemies.retain(|car| !is_offscreen(car));
    orbs.retain(|orb| !orb.collected && !is_offscreen(orb));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::entity::{ENEMY_PALETTE, scenery_strip};

    #[test]
    fn scenery_wraps_back_above_the_screen() {
        let mut scenery = scenery_strip(SceneryKind::LaneStripe, SCREEN_H);
        let total = strip_length(&scenery, SceneryKind::LaneStripe);
        let count = scenery.len();
        for _ in 0..500 {
            scroll_scenery(&mut scenery, 7.5);
            for sprite in &scenery {
                assert!(sprite.y <= SCREEN_H);
                assert!(sprite.y > SCREEN_H - total - 7.5);
            }
        }
        assert_eq!(scenery.len(), count);
    }

    #[test]
    fn sweep_drops_offscreen_and_collected() {
        let mut enemies = vec![
            Car::enemy(0, SCREEN_H + OFFSCREEN_MARGIN + 1.0, ENEMY_PALETTE[0]),
            Car::enemy(1, SCREEN_H + OFFSCREEN_MARGIN, ENEMY_PALETTE[1]),
        ];
        let mut collected = Orb::new(400.0, 100.0);
        collected.collected = true;
        let mut orbs = vec![
            collected,
            Orb::new(400.0, SCREEN_H + 200.0),
            Orb::new(420.0, 10.0),
        ];
        sweep(&mut enemies, &mut orbs);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].y, SCREEN_H + OFFSCREEN_MARGIN);
        assert_eq!(orbs.len(), 1);
        assert_eq!(orbs[0].x, 420.0);
    }
}
