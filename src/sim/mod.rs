//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID, shields by x)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Bounds, Rect, collisions_with_list, collisions_with_sorted_list};
pub use state::{
    Bullet, GameEvent, GameOverReason, GamePhase, GameState, Invader, MarchStep, Player,
    ShieldBlock,
};
pub use tick::{TickInput, tick};
