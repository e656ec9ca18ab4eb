//! Idle/demo mode - the simulation plays itself
//!
//! Dodge bolts about to land on the ship, otherwise line up under the
//! nearest column and shoot.

use super::state::{Bullet, GameState, Player};
use super::tick::TickInput;
use crate::consts::*;

/// Enemy bolts below this height are treated as incoming
const DODGE_HEIGHT: f32 = 150.0;
/// How close (in x) the ship must be to a column before firing
const AIM_TOLERANCE: f32 = ENEMY_WIDTH / 4.0;

/// Build this tick's input from the current state
pub fn autopilot(state: &GameState) -> TickInput {
    let px = state.player.pos.x;
    let half = Player::SIZE.x / 2.0;
    let danger = half + Bullet::SIZE.x;

    let threat = state
        .enemy_bullets
        .iter()
        .filter(|b| {
            (b.pos.x - px).abs() < danger && b.pos.y - Bullet::SIZE.y / 2.0 < DODGE_HEIGHT
        })
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(bolt) = threat {
        let mut away = if bolt.pos.x >= px { -1.0 } else { 1.0 };
        // Pinned against a wall, squeeze past the other way
        if (away < 0.0 && px - half <= 1.0) || (away > 0.0 && px + half >= SCREEN_WIDTH - 1.0) {
            away = -away;
        }
        return TickInput {
            move_x: away,
            ..Default::default()
        };
    }

    let target = state
        .column_bottoms()
        .into_iter()
        .min_by(|a, b| (a.pos.x - px).abs().total_cmp(&(b.pos.x - px).abs()));

    let Some(target) = target else {
        return TickInput::default();
    };

    let dx = target.pos.x - px;
    let aligned = dx.abs() < AIM_TOLERANCE;
    TickInput {
        move_x: if aligned { 0.0 } else { dx.signum() },
        fire: aligned && state.player_bullets.is_empty(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::center_from_bottom;
    use crate::sim::state::Bullet;
    use glam::Vec2;

    #[test]
    fn test_steers_toward_nearest_column() {
        let state = GameState::new(3);
        // Player at 400, nearest column is at 420
        let input = autopilot(&state);
        assert_eq!(input.move_x, 1.0);
        assert!(!input.fire);
    }

    #[test]
    fn test_fires_when_aligned() {
        let mut state = GameState::new(3);
        state.player.pos.x = 420.0;
        let input = autopilot(&state);
        assert_eq!(input.move_x, 0.0);
        assert!(input.fire);
    }

    #[test]
    fn test_dodges_incoming_bolt() {
        let mut state = GameState::new(3);
        state.player.pos.x = 420.0;
        state.enemy_bullets.push(Bullet {
            id: 999,
            pos: center_from_bottom(425.0, 80.0, Bullet::SIZE),
            change_y: -BULLET_SPEED,
        });
        let input = autopilot(&state);
        assert_eq!(input.move_x, -1.0);
        assert!(!input.fire);
    }

    #[test]
    fn test_dodge_reverses_at_wall() {
        let mut state = GameState::new(3);
        state.player.pos = Vec2::new(Player::SIZE.x / 2.0, state.player.pos.y);
        state.enemy_bullets.push(Bullet {
            id: 999,
            pos: center_from_bottom(state.player.pos.x + 2.0, 80.0, Bullet::SIZE),
            change_y: -BULLET_SPEED,
        });
        assert_eq!(autopilot(&state).move_x, 1.0);
    }
}
