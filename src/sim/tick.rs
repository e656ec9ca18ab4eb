//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::autopilot::autopilot;
use super::collision::{
    Bounds, Rect, collisions_with_list, collisions_with_sorted_list, remove_indices,
};
use super::layout;
use super::state::{Bullet, GameEvent, GameOverReason, GamePhase, GameState};
use crate::consts::*;
use crate::{center_from_bottom, center_from_top};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Horizontal steering in [-1, 1] (held left/right keys)
    pub move_x: f32,
    /// Fire a laser (only if none of ours is in flight)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a new run from the game over screen
    pub restart: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
///
/// Returns what happened this tick, in order.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                return events;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused => return events,
        GamePhase::GameOver => {
            if input.restart {
                restart(state, &mut events);
            }
            return events;
        }
        GamePhase::Playing => {}
    }

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;
    let mut rng = state.rng_state.for_tick(state.time_ticks);

    // Ship controls
    state.player.change_x = input.move_x.clamp(-1.0, 1.0) * PLAYER_MOVEMENT_SPEED;
    if input.fire && state.player_bullets.is_empty() {
        let id = state.next_entity_id();
        let top = state.player.bounds().top();
        state.player_bullets.push(Bullet {
            id,
            pos: center_from_bottom(state.player.pos.x, top, Bullet::SIZE),
            change_y: BULLET_SPEED,
        });
        events.push(GameEvent::PlayerFired);
    }

    state.player.update();
    for bullet in state.player_bullets.iter_mut().chain(state.enemy_bullets.iter_mut()) {
        bullet.update();
    }

    march_invaders(state);
    update_march_sound(state, dt, &mut events);
    enemy_fire(state, &mut rng, &mut events);
    resolve_player_bullets(state, &mut events);
    resolve_enemy_bullets(state, &mut events);

    if check_player_hit(state, &mut events) {
        return events;
    }

    if state.invaders.is_empty() {
        events.push(GameEvent::WaveCleared {
            wave: state.wave_index + 1,
        });
        state.wave_index += 1;
        layout::spawn_invaders(state);
    }

    if state
        .invaders
        .iter()
        .any(|i| i.bounds().bottom() <= INVASION_LINE)
    {
        events.push(state.end(GameOverReason::Invaded));
    }

    events
}

/// Replace a finished run with a fresh one
fn restart(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let seed = state.seed.wrapping_add(1);
    let tuning = state.tuning.clone();
    *state = GameState::with_tuning(seed, tuning);
    log::info!("Restarted with seed {}", seed);
    events.push(GameEvent::Restarted { seed });
}

/// Slide the formation sideways, stepping down and reversing at a wall
fn march_invaders(state: &mut GameState) {
    let vel = state.march_velocity();
    let mut at_edge = false;

    for invader in &mut state.invaders {
        invader.pos.x += vel;
        let b = invader.bounds();
        if (b.right() > SCREEN_WIDTH && vel > 0.0) || (b.left() < 0.0 && vel < 0.0) {
            at_edge = true;
        }
    }

    if at_edge {
        state.march_dir = -state.march_dir;
        for invader in &mut state.invaders {
            invader.pos.y -= ENEMY_Y_SPACING / 2.0;
        }
    }
}

/// Alternate the two march sounds, faster as the formation thins
fn update_march_sound(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    state.march_sound_timer -= dt;
    if state.march_sound_timer <= 0.0 && !state.invaders.is_empty() {
        state.march_sound_timer = state
            .tuning
            .march_interval(state.invaders.len(), state.wave_total);
        events.push(GameEvent::MarchStep(state.next_march_step));
        state.next_march_step = state.next_march_step.toggled();
    }
}

/// Occasionally drop a bolt from the bottom invader of a random column
fn enemy_fire(state: &mut GameState, rng: &mut Pcg32, events: &mut Vec<GameEvent>) {
    if state.invaders.is_empty() || rng.random_range(0..state.tuning.enemy_fire_chance) != 0 {
        return;
    }

    let (invader_id, x, bottom) = {
        let bottoms = state.column_bottoms();
        let pick = rng.random_range(0..bottoms.len());
        let invader = bottoms[pick];
        (invader.id, invader.pos.x, invader.bounds().bottom())
    };

    let id = state.next_entity_id();
    state.enemy_bullets.push(Bullet {
        id,
        pos: center_from_top(x, bottom, Bullet::SIZE),
        change_y: -BULLET_SPEED,
    });
    events.push(GameEvent::EnemyFired { invader_id });
}

/// Player lasers against invaders, then shields, then the top of the screen
fn resolve_player_bullets(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < state.player_bullets.len() {
        let area = state.player_bullets[i].bounds();
        let hit = collisions_with_list(&area, &state.invaders);
        let spent = if !hit.is_empty() {
            for &idx in &hit {
                state.score += INVADER_POINTS;
                events.push(GameEvent::InvaderDestroyed {
                    invader_id: state.invaders[idx].id,
                    points: INVADER_POINTS,
                });
            }
            remove_indices(&mut state.invaders, &hit);
            true
        } else {
            hit_shields(state, &area, events)
        };

        if spent || area.bottom() > SCREEN_HEIGHT {
            state.player_bullets.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Enemy bolts against shields, then the bottom of the screen
fn resolve_enemy_bullets(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < state.enemy_bullets.len() {
        let area = state.enemy_bullets[i].bounds();
        let spent = hit_shields(state, &area, events);

        if spent || area.top() < 0.0 {
            state.enemy_bullets.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Knock out every shield block under `area`; true if any were hit
fn hit_shields(state: &mut GameState, area: &Rect, events: &mut Vec<GameEvent>) -> bool {
    let hit = collisions_with_sorted_list(area, &state.shields, SHIELD_BLOCK_WIDTH);
    if hit.is_empty() {
        return false;
    }
    remove_indices(&mut state.shields, &hit);
    events.push(GameEvent::ShieldDamaged { blocks: hit.len() });
    true
}

/// Returns true if the run ended
fn check_player_hit(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let ship = state.player.bounds();
    if !state.enemy_bullets.iter().any(|b| ship.overlaps(&b.bounds())) {
        return false;
    }

    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::PlayerHit {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        events.push(state.end(GameOverReason::OutOfLives));
        return true;
    }

    state.enemy_bullets.clear();
    state.player.recenter();
    false
}
