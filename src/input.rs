/// Input handling: logical key events, how they change the game state, and
/// the translation from raw terminal key events.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::compute::{move_player_left, move_player_right, player_fire, stop_player};
use crate::entities::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

/// Apply one input event.  Last event wins: releasing either arrow stops the
/// player even if the other arrow is still held.
pub fn apply_input(state: &GameState, event: InputEvent) -> GameState {
    match event {
        InputEvent::KeyDown(Key::Right) => move_player_right(state),
        InputEvent::KeyDown(Key::Left) => move_player_left(state),
        InputEvent::KeyDown(Key::Fire) => player_fire(state),
        InputEvent::KeyUp(Key::Left) | InputEvent::KeyUp(Key::Right) => stop_player(state),
        InputEvent::KeyUp(Key::Fire) => state.clone(),
    }
}

/// What a raw terminal key event means to the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Input(InputEvent),
    Quit,
}

/// Map a terminal key to a logical key.  Arrows and A/D move, Space fires.
pub fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// When a direction key was last seen, and whether the OS had started
/// auto-repeating it.
#[derive(Clone, Copy, Debug)]
struct Held {
    last_frame: u64,
    repeating: bool,
}

/// Turns crossterm key events into `Command`s.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): real `Release` events
///   become `KeyUp`.
/// * **Classic terminals**: only `Press` events arrive (OS auto-repeat shows as
///   repeated presses).  A direction key that goes quiet for longer than its
///   hold window is treated as released and a synthetic `KeyUp` is produced by
///   [`KeyTracker::expire`].  The first press gets a longer window to cover
///   the OS auto-repeat delay.
#[derive(Debug)]
pub struct KeyTracker {
    held: HashMap<Key, Held>,
    first_window: u64,
    repeat_window: u64,
    synthesize_release: bool,
}

impl KeyTracker {
    /// `first_window` / `repeat_window` are in frames.  With
    /// `synthesize_release == false` the tracker relies on real releases.
    pub fn new(first_window: u64, repeat_window: u64, synthesize_release: bool) -> Self {
        KeyTracker {
            held: HashMap::new(),
            first_window,
            repeat_window,
            synthesize_release,
        }
    }

    /// Translate one key event observed during `frame`.
    pub fn on_key(&mut self, event: &KeyEvent, frame: u64) -> Option<Command> {
        if event.kind == KeyEventKind::Press && is_quit(event) {
            return Some(Command::Quit);
        }
        let key = key_for(event.code)?;

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if key != Key::Fire {
                    let repeating =
                        event.kind == KeyEventKind::Repeat || self.held.contains_key(&key);
                    self.held.insert(key, Held { last_frame: frame, repeating });
                }
                Some(Command::Input(InputEvent::KeyDown(key)))
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
                Some(Command::Input(InputEvent::KeyUp(key)))
            }
        }
    }

    /// Synthetic releases for keys that went quiet, in a stable order.
    pub fn expire(&mut self, frame: u64) -> Vec<InputEvent> {
        if !self.synthesize_release {
            return Vec::new();
        }
        let mut released = Vec::new();
        for key in [Key::Left, Key::Right] {
            if let Some(held) = self.held.get(&key) {
                let window = if held.repeating {
                    self.repeat_window
                } else {
                    self.first_window
                };
                if frame.saturating_sub(held.last_frame) > window {
                    self.held.remove(&key);
                    released.push(InputEvent::KeyUp(key));
                }
            }
        }
        released
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }
}
