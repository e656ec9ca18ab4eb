//! Wave and bunker layout

use glam::Vec2;

use super::state::{GameState, Invader, ShieldBlock};
use crate::consts::*;

/// Fill the formation for the current wave
pub fn spawn_invaders(state: &mut GameState) {
    for row in 0..ENEMY_ROWS {
        for col in 0..ENEMY_COLS {
            let pos = Vec2::new(
                ENEMY_START_X + col as f32 * ENEMY_X_SPACING,
                ENEMY_START_Y - row as f32 * ENEMY_Y_SPACING,
            );
            let id = state.next_entity_id();
            state.invaders.push(Invader {
                id,
                column: col,
                pos,
            });
        }
    }
    state.wave_total = state.invaders.len();
    log::info!(
        "Wave {}: {} invaders",
        state.wave_index + 1,
        state.wave_total
    );
}

/// True for the cells cut out of the bunker's underside
fn is_notch(row: u32, col: u32) -> bool {
    row < 2 && col > 6 && col < 14
}

/// Build all four bunkers, sorted by left edge
pub fn build_shields(state: &mut GameState) {
    for x_start in SHIELD_X_POSITIONS {
        for row in 0..SHIELD_HEIGHT_COUNT {
            for col in 0..SHIELD_WIDTH_COUNT {
                if is_notch(row, col) {
                    continue;
                }
                let pos = Vec2::new(
                    x_start + col as f32 * SHIELD_BLOCK_WIDTH,
                    SHIELD_Y_START + row as f32 * SHIELD_BLOCK_HEIGHT,
                );
                let id = state.next_entity_id();
                state.shields.push(ShieldBlock { id, pos });
            }
        }
    }
    state
        .shields
        .sort_by(|a, b| a.pos.x.total_cmp(&b.pos.x).then(a.pos.y.total_cmp(&b.pos.y)));
}
