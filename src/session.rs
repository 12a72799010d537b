/// One play session: the single owner and writer of the game state.
///
/// Input events and due spawns are applied between frames; `frame` then runs
/// one simulation step and draws it.  Restarting replaces the state wholesale
/// but keeps the session, so the spawn clock keeps its phase.

use std::io;
use std::time::Instant;

use log::info;
use rand::Rng;

use crate::compute::{init_state, resize, spawn_enemy, tick};
use crate::entities::{GameState, GameStatus, Viewport};
use crate::input::{apply_input, InputEvent};
use crate::spawner::SpawnTimer;
use crate::surface::{render_frame, render_game_over, DrawSurface};

pub struct Session<R: Rng> {
    state: GameState,
    rng: R,
    spawns: SpawnTimer,
    /// Set when the screen must be repainted even though the game is over.
    needs_redraw: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(viewport: Viewport, rng: R, spawns: SpawnTimer) -> Self {
        info!(
            "new session, viewport {}x{}",
            viewport.width, viewport.height
        );
        Session {
            state: init_state(viewport),
            rng,
            spawns,
            needs_redraw: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.status == GameStatus::Over
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.state = apply_input(&self.state, event);
    }

    pub fn handle_spawn_tick(&mut self) {
        self.state = spawn_enemy(&self.state, &mut self.rng);
    }

    /// Apply every spawn the clock says is due by `now`; returns how many
    /// ticks elapsed.  Ticks landing while the game is over are dropped.
    pub fn poll_spawns(&mut self, now: Instant) -> u32 {
        let ticks = self.spawns.poll(now);
        for _ in 0..ticks {
            self.handle_spawn_tick();
        }
        ticks
    }

    /// The terminal changed size.  The surface is always repainted, even when
    /// a pinned viewport leaves the game state untouched.
    pub fn handle_resize(&mut self, viewport: Viewport) {
        self.needs_redraw = true;
        if viewport == self.state.viewport {
            return;
        }
        info!("viewport resized to {}x{}", viewport.width, viewport.height);
        self.state = resize(&self.state, viewport);
    }

    /// Run one frame.  While running: simulate, draw, and overlay the
    /// game-over message on the frame that ends the game.  While over:
    /// nothing, unless a resize asked for a repaint.
    pub fn frame<S: DrawSurface>(&mut self, surface: &mut S) -> io::Result<()> {
        if self.is_over() {
            if self.needs_redraw {
                self.needs_redraw = false;
                render_frame(surface, &self.state)?;
                render_game_over(surface, &self.state)?;
            }
            return Ok(());
        }

        self.state = tick(&self.state);
        self.needs_redraw = false;
        render_frame(surface, &self.state)?;
        if self.is_over() {
            render_game_over(surface, &self.state)?;
        }
        Ok(())
    }
}
