/// The draw-surface seam and the scene description drawn on it.
///
/// The game only ever writes to a surface; it never reads anything back.
/// `display::TerminalSurface` is the real backend, tests use a recorder.

use std::io;

use crate::entities::{
    EnemyColor, GameState, BULLET_HEIGHT, BULLET_WIDTH, ENEMY_HEIGHT, ENEMY_WIDTH,
    PLAYER_HEIGHT, PLAYER_WIDTH,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    White,
    Red,
    Blue,
    Yellow,
}

impl From<EnemyColor> for Paint {
    fn from(color: EnemyColor) -> Self {
        match color {
            EnemyColor::Blue => Paint::Blue,
            EnemyColor::Red => Paint::Red,
            EnemyColor::Yellow => Paint::Yellow,
        }
    }
}

/// Horizontal anchoring of `draw_text`'s x coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Anything the game can paint flat rectangles and text onto.  Coordinates
/// are world units.
pub trait DrawSurface {
    fn clear(&mut self) -> io::Result<()>;

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: Paint) -> io::Result<()>;

    /// `y` is the text baseline.
    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        align: TextAlign,
        paint: Paint,
    ) -> io::Result<()>;

    /// Push everything drawn since the last call to the screen.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ── Scene ─────────────────────────────────────────────────────────────────────

pub const SCORE_FONT_SIZE: f32 = 24.0;
pub const GAME_OVER_FONT_SIZE: f32 = 48.0;

/// Draw one running frame: the player, bullets, enemies, then the score.
pub fn render_frame<S: DrawSurface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    surface.clear()?;

    let p = &state.player;
    surface.draw_rect(p.x, p.y, PLAYER_WIDTH, PLAYER_HEIGHT, Paint::White)?;

    for bullet in &state.bullets {
        surface.draw_rect(bullet.x, bullet.y, BULLET_WIDTH, BULLET_HEIGHT, Paint::Red)?;
    }
    for enemy in &state.enemies {
        surface.draw_rect(enemy.x, enemy.y, ENEMY_WIDTH, ENEMY_HEIGHT, enemy.color.into())?;
    }

    surface.draw_text(
        &format!("Score: {}", state.score),
        10.0,
        30.0,
        SCORE_FONT_SIZE,
        TextAlign::Left,
        Paint::White,
    )?;
    surface.present()
}

/// Overlay the game-over message on whatever is on screen.  Drawn once, on
/// the transition to game over.
pub fn render_game_over<S: DrawSurface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    let cx = state.viewport.width / 2.0;
    let cy = state.viewport.height / 2.0;
    surface.draw_text("Game Over", cx, cy, GAME_OVER_FONT_SIZE, TextAlign::Center, Paint::Red)?;
    surface.draw_text(
        "Press Space to Restart",
        cx,
        cy + 50.0,
        GAME_OVER_FONT_SIZE,
        TextAlign::Center,
        Paint::Red,
    )?;
    surface.present()
}
