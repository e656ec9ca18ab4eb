//! Keyboard and mouse events to per-tick input
//!
//! Movement follows the classic cabinet feel: the last direction pressed
//! wins, and releasing any direction key stops the ship. Fire, pause and
//! restart are one-shot and cleared once a tick consumes them.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Space,
    P,
    Escape,
}

impl Key {
    /// Horizontal direction bound to this key, if any
    fn direction(self) -> Option<f32> {
        match self {
            Key::Left | Key::A => Some(-1.0),
            Key::Right | Key::D => Some(1.0),
            _ => None,
        }
    }
}

/// A raw input event from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyPress(Key),
    KeyRelease(Key),
    /// Any mouse button; restarts from the game over screen
    MousePress,
}

/// Accumulates events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    move_x: f32,
    fire: bool,
    pause: bool,
    restart: bool,
    /// Demo mode stays on until toggled off
    pub idle_mode: bool,
}

impl InputState {
    pub fn new(idle_mode: bool) -> Self {
        Self {
            idle_mode,
            ..Default::default()
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPress(key) => {
                if let Some(dir) = key.direction() {
                    self.move_x = dir;
                }
                match key {
                    Key::Space => self.fire = true,
                    Key::P | Key::Escape => self.pause = !self.pause,
                    _ => {}
                }
            }
            InputEvent::KeyRelease(key) => {
                if key.direction().is_some() {
                    self.move_x = 0.0;
                }
            }
            InputEvent::MousePress => self.restart = true,
        }
    }

    /// Snapshot for the next tick, clearing one-shot inputs
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            move_x: self.move_x,
            fire: self.fire,
            pause: self.pause,
            restart: self.restart,
            idle_mode: self.idle_mode,
        };
        self.fire = false;
        self.pause = false;
        self.restart = false;
        input
    }
}
