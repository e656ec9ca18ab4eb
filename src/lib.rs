//! Space Invaders - a deterministic arcade shooter, plus the binary search
//! helpers it leans on
//!
//! Core modules:
//! - `search`: Boundary search over monotonic predicates
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `input`: Key/mouse events to per-tick input
//! - `audio`: Sound effect dispatch behind a backend trait
//! - `render`: Draw command lists and an ASCII rasteriser
//! - `replay`: Recorded input scripts
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod input;
pub mod render;
pub mod replay;
pub mod search;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window geometry
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const SCREEN_TITLE: &str = "Arcade Space Invaders";

    /// Fixed simulation timestep (60 Hz, one march step per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player ship (playerShip1_blue at 0.5 scale)
    pub const PLAYER_WIDTH: f32 = 49.5;
    pub const PLAYER_HEIGHT: f32 = 37.5;
    pub const PLAYER_BOTTOM: f32 = 32.0;
    /// Pixels per tick while a direction key is held
    pub const PLAYER_MOVEMENT_SPEED: f32 = 5.0;

    /// Laser sprite (laserBlue01 at 0.8 scale)
    pub const BULLET_WIDTH: f32 = 7.2;
    pub const BULLET_HEIGHT: f32 = 43.2;
    /// Pixels per tick
    pub const BULLET_SPEED: f32 = 5.0;

    /// Invader formation
    pub const ENEMY_ROWS: u32 = 5;
    pub const ENEMY_COLS: u32 = 11;
    pub const ENEMY_X_SPACING: f32 = 60.0;
    pub const ENEMY_Y_SPACING: f32 = 48.0;
    pub const ENEMY_START_X: f32 = 60.0;
    pub const ENEMY_START_Y: f32 = 500.0;
    pub const ENEMY_WIDTH: f32 = 44.0;
    pub const ENEMY_HEIGHT: f32 = 32.0;

    /// Invaders reaching this height have landed
    pub const INVASION_LINE: f32 = 120.0;

    /// Shield bunkers
    pub const SHIELD_X_POSITIONS: [f32; 4] = [100.0, 300.0, 500.0, 700.0];
    pub const SHIELD_BLOCK_WIDTH: f32 = 5.0;
    pub const SHIELD_BLOCK_HEIGHT: f32 = 10.0;
    pub const SHIELD_WIDTH_COUNT: u32 = 20;
    pub const SHIELD_HEIGHT_COUNT: u32 = 5;
    pub const SHIELD_Y_START: f32 = 150.0;

    /// Points per invader destroyed
    pub const INVADER_POINTS: u64 = 10;
}

/// Centre of the screen along x, where the player spawns
#[inline]
pub fn screen_center_x() -> f32 {
    consts::SCREEN_WIDTH / 2.0
}

/// Position a sprite of `size` so its bottom edge sits at `bottom`
#[inline]
pub fn center_from_bottom(center_x: f32, bottom: f32, size: Vec2) -> Vec2 {
    Vec2::new(center_x, bottom + size.y / 2.0)
}

/// Position a sprite of `size` so its top edge sits at `top`
#[inline]
pub fn center_from_top(center_x: f32, top: f32, size: Vec2) -> Vec2 {
    Vec2::new(center_x, top - size.y / 2.0)
}
