/// All game entity types plus the per-entity movement rules.

use crate::geometry::Rect;

// ── Tuning constants ──────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 50.0;
pub const PLAYER_SPEED: f32 = 5.0;
/// Gap between the player's bottom edge and the viewport bottom.
pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

pub const BULLET_WIDTH: f32 = 5.0;
pub const BULLET_HEIGHT: f32 = 20.0;
pub const BULLET_SPEED: f32 = -7.0;

pub const ENEMY_WIDTH: f32 = 50.0;
pub const ENEMY_HEIGHT: f32 = 50.0;
pub const INITIAL_ENEMY_SPEED: f32 = 3.0;

/// Every time a kill lands the score on a multiple of this, enemies spawned
/// afterwards fall one unit/frame faster.
pub const SPEED_UP_EVERY: u32 = 50;

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyColor {
    Blue,
    Red,
    Yellow,
}

impl EnemyColor {
    pub const PALETTE: [EnemyColor; 3] = [EnemyColor::Blue, EnemyColor::Red, EnemyColor::Yellow];

    /// Score awarded for destroying an enemy of this color.
    pub fn points(self) -> u32 {
        match self {
            EnemyColor::Blue => 10,
            EnemyColor::Red => 20,
            EnemyColor::Yellow => 30,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Over,
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// The visible play area in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Horizontal velocity: one of `-PLAYER_SPEED`, `0`, `PLAYER_SPEED`.
    pub dx: f32,
}

impl Player {
    /// Centred horizontally, resting just above the bottom edge.
    pub fn spawn(viewport: Viewport) -> Self {
        Player {
            x: viewport.width / 2.0 - PLAYER_WIDTH / 2.0,
            y: viewport.height - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
            dx: 0.0,
        }
    }

    pub fn move_right(&mut self) {
        self.dx = PLAYER_SPEED;
    }

    pub fn move_left(&mut self) {
        self.dx = -PLAYER_SPEED;
    }

    pub fn stop(&mut self) {
        self.dx = 0.0;
    }

    /// Apply velocity, then clamp into `[0, viewport.width - PLAYER_WIDTH]`.
    pub fn advance(&mut self, viewport: Viewport) {
        self.x += self.dx;
        self.clamp(viewport);
    }

    pub fn clamp(&mut self, viewport: Viewport) {
        // A viewport narrower than the player leaves x negative; not validated.
        if self.x < 0.0 {
            self.x = 0.0;
        }
        if self.x + PLAYER_WIDTH > viewport.width {
            self.x = viewport.width - PLAYER_WIDTH;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Where a freshly fired bullet appears: centred, at the player's top edge.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0, self.y)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
}

impl Bullet {
    pub fn new(x: f32, y: f32) -> Self {
        Bullet { x, y }
    }

    pub fn advance(&mut self) {
        self.y += BULLET_SPEED;
    }

    /// True once the trailing (bottom) edge is above the viewport top.
    pub fn is_above_top(&self) -> bool {
        self.y + BULLET_HEIGHT < 0.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// Fall speed, captured at spawn time.
    pub dy: f32,
    pub color: EnemyColor,
}

impl Enemy {
    pub fn new(x: f32, y: f32, dy: f32, color: EnemyColor) -> Self {
        Enemy { x, y, dy, color }
    }

    pub fn points(&self) -> u32 {
        self.color.points()
    }

    pub fn advance(&mut self) {
        self.y += self.dy;
    }

    pub fn is_below(&self, viewport: Viewport) -> bool {
        self.y > viewport.height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// In fire order.
    pub bullets: Vec<Bullet>,
    /// In spawn order.
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Fall speed given to the next enemy spawned.  Never decreases.
    pub enemy_speed: f32,
    pub status: GameStatus,
    pub viewport: Viewport,
}
