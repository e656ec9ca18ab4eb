//! Frame description and ASCII rasteriser
//!
//! `draw` turns a [`GameState`] into an ordered list of draw commands, the
//! same list a GPU or terminal front end would consume. Sprites are listed
//! back to front, HUD text last.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Bounds, GamePhase, GameState, Rect};

/// What a rectangle on screen represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Invader,
    PlayerBullet,
    EnemyBullet,
    Shield,
    Player,
}

impl SpriteKind {
    fn glyph(self) -> char {
        match self {
            SpriteKind::Invader => 'W',
            SpriteKind::PlayerBullet => '|',
            SpriteKind::EnemyBullet => '!',
            SpriteKind::Shield => '#',
            SpriteKind::Player => 'A',
        }
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
}

/// A single thing to draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        kind: SpriteKind,
        rect: Rect,
    },
    Text {
        text: String,
        pos: Vec2,
        font_size: f32,
        anchor: Anchor,
    },
}

fn text(text: String, x: f32, y: f32, font_size: f32, anchor: Anchor) -> DrawCommand {
    DrawCommand::Text {
        text,
        pos: Vec2::new(x, y),
        font_size,
        anchor,
    }
}

/// Describe the current frame
pub fn draw(state: &GameState) -> Vec<DrawCommand> {
    if state.phase == GamePhase::GameOver {
        return draw_game_over(state.score);
    }

    let mut out = Vec::new();
    let mut sprites = |kind: SpriteKind, rects: Vec<Rect>| {
        out.extend(rects.into_iter().map(|rect| DrawCommand::Sprite { kind, rect }));
    };

    sprites(
        SpriteKind::Invader,
        state.invaders.iter().map(Bounds::bounds).collect(),
    );
    sprites(
        SpriteKind::PlayerBullet,
        state.player_bullets.iter().map(Bounds::bounds).collect(),
    );
    sprites(
        SpriteKind::EnemyBullet,
        state.enemy_bullets.iter().map(Bounds::bounds).collect(),
    );
    sprites(
        SpriteKind::Shield,
        state.shields.iter().map(Bounds::bounds).collect(),
    );
    sprites(SpriteKind::Player, vec![state.player.bounds()]);

    out.push(text(
        format!("Score: {}", state.score),
        10.0,
        10.0,
        14.0,
        Anchor::Left,
    ));
    out.push(text(
        format!("Lives: {}", state.lives),
        SCREEN_WIDTH - 80.0,
        10.0,
        14.0,
        Anchor::Left,
    ));
    if state.phase == GamePhase::Paused {
        out.push(text(
            "PAUSED".to_string(),
            SCREEN_WIDTH / 2.0,
            SCREEN_HEIGHT / 2.0,
            30.0,
            Anchor::Center,
        ));
    }
    out
}

/// The game over screen
pub fn draw_game_over(score: u64) -> Vec<DrawCommand> {
    let cx = SCREEN_WIDTH / 2.0;
    let cy = SCREEN_HEIGHT / 2.0;
    vec![
        text("GAME OVER".to_string(), cx, cy, 50.0, Anchor::Center),
        text(
            format!("Final Score: {}", score),
            cx,
            cy - 75.0,
            20.0,
            Anchor::Center,
        ),
        text(
            "Click to play again".to_string(),
            cx,
            cy - 120.0,
            16.0,
            Anchor::Center,
        ),
    ]
}

/// Rasterise draw commands onto a `cols` x `rows` character grid
///
/// Sprites mark every cell their rectangle covers; text is written on the
/// row containing its baseline. Later commands overwrite earlier ones.
pub fn rasterize(commands: &[DrawCommand], cols: usize, rows: usize) -> String {
    if cols == 0 || rows == 0 {
        return String::new();
    }
    let mut grid = vec![vec![' '; cols]; rows];
    let cell_w = SCREEN_WIDTH / cols as f32;
    let cell_h = SCREEN_HEIGHT / rows as f32;

    let col_of = |x: f32| ((x / cell_w).floor().max(0.0) as usize).min(cols - 1);
    // Screen y grows upward, grid rows grow downward
    let row_of = |y: f32| {
        let from_top = (SCREEN_HEIGHT - y) / cell_h;
        (from_top.floor().max(0.0) as usize).min(rows - 1)
    };

    for cmd in commands {
        match cmd {
            DrawCommand::Sprite { kind, rect } => {
                if rect.right() < 0.0 || rect.left() > SCREEN_WIDTH {
                    continue;
                }
                if rect.top() < 0.0 || rect.bottom() > SCREEN_HEIGHT {
                    continue;
                }
                for row in row_of(rect.top())..=row_of(rect.bottom()) {
                    for col in col_of(rect.left())..=col_of(rect.right()) {
                        grid[row][col] = kind.glyph();
                    }
                }
            }
            DrawCommand::Text {
                text, pos, anchor, ..
            } => {
                let len = text.chars().count();
                let start = match anchor {
                    Anchor::Left => col_of(pos.x),
                    Anchor::Center => col_of(pos.x).saturating_sub(len / 2),
                };
                let row = row_of(pos.y);
                for (i, ch) in text.chars().enumerate() {
                    if let Some(cell) = grid[row].get_mut(start + i) {
                        *cell = ch;
                    }
                }
            }
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_draw_playing_frame() {
        let state = GameState::new(1);
        let frame = draw(&state);
        let invaders = frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { kind: SpriteKind::Invader, .. }))
            .count();
        assert_eq!(invaders, 55);
        assert_eq!(texts(&frame), vec!["Score: 0", "Lives: 3"]);
        // Player is drawn last among sprites
        let last_sprite = frame
            .iter()
            .rev()
            .find(|c| matches!(c, DrawCommand::Sprite { .. }));
        assert!(matches!(
            last_sprite,
            Some(DrawCommand::Sprite {
                kind: SpriteKind::Player,
                ..
            })
        ));
    }

    #[test]
    fn test_draw_game_over_screen() {
        let mut state = GameState::new(1);
        state.score = 370;
        state.phase = GamePhase::GameOver;
        let frame = draw(&state);
        assert_eq!(
            texts(&frame),
            vec!["GAME OVER", "Final Score: 370", "Click to play again"]
        );
    }

    #[test]
    fn test_paused_banner() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Paused;
        assert!(texts(&draw(&state)).contains(&"PAUSED"));
    }

    #[test]
    fn test_rasterize_frame() {
        let state = GameState::new(1);
        let ascii = rasterize(&draw(&state), 80, 30);
        let lines: Vec<&str> = ascii.lines().collect();
        assert_eq!(lines.len(), 30);
        assert!(ascii.contains('W'));
        assert!(ascii.contains('#'));
        assert!(ascii.contains('A'));
        assert!(lines.last().unwrap().starts_with(" Score: 0"));
    }

    #[test]
    fn test_rasterize_empty_grid() {
        assert_eq!(rasterize(&[], 0, 10), "");
    }
}
