use super::entity::{Car, Orb};

/// Index of the first enemy whose box overlaps the player's.
pub fn first_crash(player: &Car, enemies: &[Car]) -> Option<usize> {
    let hitbox = player.aabb();
    enemies.iter().position(|enemy| enemy.aabb().overlaps(&hitbox))
}

/// Marks every touched orb as collected and returns where each one was.
pub fn collect_orbs(player: &Car, orbs: &mut [Orb]) -> Vec<(f64, f64)> {
    let hitbox = player.aabb();
    let mut taken = Vec::new();
    for orb in orbs.iter_mut().filter(|orb| !orb.collected) {
        if orb.aabb().overlaps(&hitbox) {
            orb.collected = true;
            taken.push((orb.x, orb.y));
        }
    }
    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::entity::ENEMY_PALETTE;

    #[test]
    fn enemy_in_player_lane_crashes_only_when_touching() {
        let player = Car::player();
        let mut enemy = Car::enemy(0, 0.0, ENEMY_PALETTE[2]);
        enemy.x = player.x;
        enemy.y = player.y - enemy.h;
        assert_eq!(first_crash(&player, &[enemy.clone()]), None);
        enemy.y += 0.5;
        assert_eq!(first_crash(&player, &[enemy]), Some(0));
    }

    #[test]
    fn orbs_are_collected_once() {
        let player = Car::player();
        let mut orbs = vec![
            Orb::new(player.center_x(), player.y + 10.0),
            Orb::new(player.center_x(), player.y - 200.0),
        ];
        assert_eq!(collect_orbs(&player, &mut orbs).len(), 1);
        assert!(orbs[0].collected);
        assert!(!orbs[1].collected);
        assert!(collect_orbs(&player, &mut orbs).is_empty());
    }
}
