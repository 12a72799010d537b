/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.

use log::{debug, info, trace};
use rand::Rng;

use crate::entities::{
    Bullet, Enemy, EnemyColor, GameState, GameStatus, Player, Viewport, ENEMY_HEIGHT,
    ENEMY_WIDTH, INITIAL_ENEMY_SPEED, PLAYER_BOTTOM_MARGIN, PLAYER_HEIGHT, SPEED_UP_EVERY,
};
use crate::geometry::overlaps;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh game state for the given viewport.
pub fn init_state(viewport: Viewport) -> GameState {
    GameState {
        player: Player::spawn(viewport),
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        enemy_speed: INITIAL_ENEMY_SPEED,
        status: GameStatus::Running,
        viewport,
    }
}

/// Throw the current session away and start over in the same viewport.
pub fn restart(state: &GameState) -> GameState {
    info!("restarting after game over (final score {})", state.score);
    init_state(state.viewport)
}

/// Adopt a new viewport.  The player is re-seated on the new bottom edge and
/// re-clamped; everything else keeps its world position.
pub fn resize(state: &GameState, viewport: Viewport) -> GameState {
    let mut player = state.player.clone();
    player.y = viewport.height - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN;
    player.clamp(viewport);
    GameState {
        player,
        viewport,
        ..state.clone()
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    player.move_left();
    GameState {
        player,
        ..state.clone()
    }
}

pub fn move_player_right(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    player.move_right();
    GameState {
        player,
        ..state.clone()
    }
}

pub fn stop_player(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    player.stop();
    GameState {
        player,
        ..state.clone()
    }
}

/// The fire action: shoots while running, restarts once the game is over.
pub fn player_fire(state: &GameState) -> GameState {
    if state.status == GameStatus::Over {
        return restart(state);
    }
    let (x, y) = state.player.muzzle();
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::new(x, y));
    GameState {
        bullets,
        ..state.clone()
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Drop a new enemy just above the top edge.  Ignored while the game is over.
pub fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::Over {
        return state.clone();
    }
    let palette = EnemyColor::PALETTE;
    let color = palette[rng.gen_range(0..palette.len())];
    // Uniform in [0, width - ENEMY_WIDTH); a too-narrow viewport yields a
    // negative x rather than a panic.
    let x = rng.gen::<f32>() * (state.viewport.width - ENEMY_WIDTH);
    let enemy = Enemy::new(x, -ENEMY_HEIGHT, state.enemy_speed, color);
    debug!("spawned {:?} enemy at x={:.1} falling at {}", color, x, enemy.dy);

    let mut enemies = state.enemies.clone();
    enemies.push(enemy);
    GameState {
        enemies,
        ..state.clone()
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  A game that is over is returned
/// unchanged.
///
/// Removals are marked during the frame and applied in one pass at the end,
/// so no entity is skipped or removed twice.
pub fn tick(state: &GameState) -> GameState {
    if state.status == GameStatus::Over {
        return state.clone();
    }
    let viewport = state.viewport;

    // ── 1. Move the player ───────────────────────────────────────────────────
    let mut player = state.player.clone();
    player.advance(viewport);

    // ── 2. Move bullets, mark those past the top ─────────────────────────────
    let mut bullets = state.bullets.clone();
    let mut bullet_gone = vec![false; bullets.len()];
    for (bi, bullet) in bullets.iter_mut().enumerate() {
        bullet.advance();
        if bullet.is_above_top() {
            trace!("bullet {} left the top edge", bi);
            bullet_gone[bi] = true;
        }
    }

    // ── 3. Collision: bullets ↔ enemies ──────────────────────────────────────
    // Enemies are tested at their positions from the previous frame.  A bullet
    // takes out at most the first enemy it overlaps.
    let mut enemies = state.enemies.clone();
    let mut enemy_gone = vec![false; enemies.len()];
    let mut score = state.score;
    let mut enemy_speed = state.enemy_speed;

    for (bi, bullet) in bullets.iter().enumerate() {
        let hit = enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !enemy_gone[*ei] && overlaps(&bullet.rect(), &enemy.rect()))
            .map(|(ei, _)| ei);

        if let Some(ei) = hit {
            enemy_gone[ei] = true;
            bullet_gone[bi] = true;
            score += enemies[ei].points();
            debug!(
                "bullet {} destroyed {:?} enemy (+{}), score {}",
                bi,
                enemies[ei].color,
                enemies[ei].points(),
                score
            );
            if score % SPEED_UP_EVERY == 0 {
                enemy_speed += 1.0;
                debug!("score {} reached, enemy speed now {}", score, enemy_speed);
            }
        }
    }

    // ── 4. Move enemies; player contact ends the game ────────────────────────
    let mut status = GameStatus::Running;
    let player_rect = player.rect();
    for (ei, enemy) in enemies.iter_mut().enumerate() {
        if enemy_gone[ei] {
            continue;
        }
        enemy.advance();
        if overlaps(&enemy.rect(), &player_rect) {
            info!("player hit by {:?} enemy, game over with score {}", enemy.color, score);
            status = GameStatus::Over;
            break;
        }
        if enemy.is_below(viewport) {
            trace!("enemy {} left the bottom edge", ei);
            enemy_gone[ei] = true;
        }
    }

    // ── 5. Prune everything marked this frame ────────────────────────────────
    GameState {
        player,
        bullets: prune(bullets, &bullet_gone),
        enemies: prune(enemies, &enemy_gone),
        score,
        enemy_speed,
        status,
        viewport,
    }
}

/// Keep the items whose mark is `false`, preserving order.
fn prune<T>(items: Vec<T>, gone: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(gone)
        .filter(|(_, marked)| !**marked)
        .map(|(item, _)| item)
        .collect()
}
