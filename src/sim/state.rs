//! Game state and core simulation types
//!
//! All state that must be reproduced for determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect};
use super::layout;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{center_from_bottom, screen_center_x};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for a click to restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Last life lost to an enemy bullet
    OutOfLives,
    /// An invader reached the shield line
    Invaded,
}

/// Which of the two alternating march sounds plays next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarchStep {
    First,
    Second,
}

impl MarchStep {
    pub fn toggled(self) -> Self {
        match self {
            MarchStep::First => MarchStep::Second,
            MarchStep::Second => MarchStep::First,
        }
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired { invader_id: u32 },
    InvaderDestroyed { invader_id: u32, points: u64 },
    ShieldDamaged { blocks: usize },
    PlayerHit { lives_left: u8 },
    MarchStep(MarchStep),
    WaveCleared { wave: u32 },
    GameOver { score: u64, reason: GameOverReason },
    Paused,
    Resumed,
    Restarted { seed: u64 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal velocity in pixels per tick
    pub change_x: f32,
}

impl Player {
    pub const SIZE: Vec2 = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);

    pub fn new() -> Self {
        Self {
            pos: center_from_bottom(screen_center_x(), PLAYER_BOTTOM, Self::SIZE),
            change_x: 0.0,
        }
    }

    /// Move by the current velocity, staying on screen
    pub fn update(&mut self) {
        let half = Self::SIZE.x / 2.0;
        self.pos.x = (self.pos.x + self.change_x).clamp(half, SCREEN_WIDTH - half);
    }

    /// Back to the middle of the screen after losing a life
    pub fn recenter(&mut self) {
        self.pos.x = screen_center_x();
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, Self::SIZE)
    }
}

/// A single invader in the formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invader {
    pub id: u32,
    /// Formation column, shared by every invader stacked at the same x
    pub column: u32,
    pub pos: Vec2,
}

impl Invader {
    pub const SIZE: Vec2 = Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT);
}

impl Bounds for Invader {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, Self::SIZE)
    }
}

/// A laser bolt from either side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick (positive is up)
    pub change_y: f32,
}

impl Bullet {
    pub const SIZE: Vec2 = Vec2::new(BULLET_WIDTH, BULLET_HEIGHT);

    pub fn update(&mut self) {
        self.pos.y += self.change_y;
    }
}

impl Bounds for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, Self::SIZE)
    }
}

/// One destructible cell of a shield bunker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldBlock {
    pub id: u32,
    pub pos: Vec2,
}

impl ShieldBlock {
    pub const SIZE: Vec2 = Vec2::new(SHIELD_BLOCK_WIDTH, SHIELD_BLOCK_HEIGHT);
}

impl Bounds for ShieldBlock {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, Self::SIZE)
    }
}

/// RNG state wrapper for serialization
///
/// Each tick draws from a fresh generator derived from the run seed and tick
/// number, so a saved state needs nothing beyond the seed to continue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn for_tick(&self, tick: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ tick.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Balance values for this run
    pub tuning: Tuning,
    /// Current wave index (0-based)
    pub wave_index: u32,
    /// Player lives
    pub lives: u8,
    /// Score
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Set once the run ends
    pub game_over_reason: Option<GameOverReason>,
    pub player: Player,
    /// Live invaders (sorted by id)
    pub invaders: Vec<Invader>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    /// Shield blocks, sorted by left edge for the collision broad phase
    pub shields: Vec<ShieldBlock>,
    /// Formation march direction: +1 right, -1 left
    pub march_dir: f32,
    /// Invaders spawned in the current wave
    pub wave_total: usize,
    /// Seconds until the next march sound
    pub march_sound_timer: f32,
    pub next_march_step: MarchStep,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with custom balance values
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            wave_index: 0,
            lives: tuning.starting_lives,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            game_over_reason: None,
            player: Player::new(),
            invaders: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            shields: Vec::new(),
            march_dir: 1.0,
            wave_total: 0,
            march_sound_timer: 0.5,
            next_march_step: MarchStep::First,
            next_id: 1,
            tuning,
        };

        layout::spawn_invaders(&mut state);
        layout::build_shields(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Invaders destroyed so far in this wave
    pub fn destroyed_this_wave(&self) -> usize {
        self.wave_total.saturating_sub(self.invaders.len())
    }

    /// Current signed march velocity in pixels per tick
    pub fn march_velocity(&self) -> f32 {
        self.march_dir * self.tuning.march_speed(self.destroyed_this_wave())
    }

    /// Lowest invader in each occupied column, sorted by column
    pub fn column_bottoms(&self) -> Vec<&Invader> {
        let mut bottoms: Vec<&Invader> = Vec::new();
        for invader in &self.invaders {
            match bottoms.iter_mut().find(|b| b.column == invader.column) {
                Some(b) if invader.pos.y < b.pos.y => *b = invader,
                Some(_) => {}
                None => bottoms.push(invader),
            }
        }
        bottoms.sort_by_key(|b| b.column);
        bottoms
    }

    /// End the run
    pub fn end(&mut self, reason: GameOverReason) -> GameEvent {
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        log::info!(
            "Game over ({:?}): score {} on wave {}",
            reason,
            self.score,
            self.wave_index + 1
        );
        GameEvent::GameOver {
            score: self.score,
            reason,
        }
    }
}
