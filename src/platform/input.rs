//! Keyboard handling
//!
//! Key events arrive asynchronously; the tick polls the latest held state
//! once per frame. Presses and releases that both land between two frames
//! are lost, which is fine for held movement keys.

use crate::sim::{InputState, PhaseCommand, TickInput};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Pause,
    Restart,
    Quit,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "p" | "P" | "Escape" => Some(Key::Pause),
            "r" | "R" => Some(Key::Restart),
            "q" | "Q" => Some(Key::Quit),
            _ => None,
        }
    }
}

/// Latest keyboard state plus one-shot requests.
/// Command keys latch on the up-to-down edge only, so auto-repeat keydowns
/// while a key is held request nothing.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: InputState,
    pause_down: bool,
    restart_down: bool,
    quit_down: bool,
    pause_requested: bool,
    restart_requested: bool,
    quit_requested: bool,
}

/// Set `requested` only if the key was not already down
fn latch_press(down: &mut bool, requested: &mut bool) {
    if !*down {
        *requested = true;
    }
    *down = true;
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the key is one the game uses
    pub fn key_down(&mut self, key: &str) -> bool {
        match Key::from_dom(key) {
            Some(Key::Left) => self.held.left = true,
            Some(Key::Right) => self.held.right = true,
            Some(Key::Pause) => latch_press(&mut self.pause_down, &mut self.pause_requested),
            Some(Key::Restart) => {
                latch_press(&mut self.restart_down, &mut self.restart_requested)
            }
            Some(Key::Quit) => latch_press(&mut self.quit_down, &mut self.quit_requested),
            None => return false,
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match Key::from_dom(key) {
            Some(Key::Left) => self.held.left = false,
            Some(Key::Right) => self.held.right = false,
            Some(Key::Pause) => self.pause_down = false,
            Some(Key::Restart) => self.restart_down = false,
            Some(Key::Quit) => self.quit_down = false,
            None => return false,
        }
        true
    }

    /// Drop held keys, e.g. when the window loses focus and key-up events
    /// will never arrive
    pub fn release_all(&mut self) {
        self.held = InputState::default();
        self.pause_down = false;
        self.restart_down = false;
        self.quit_down = false;
    }

    /// Request a pause from outside the keyboard (visibility, blur)
    pub fn request_pause(&mut self) {
        self.pause_requested = true;
    }

    pub fn snapshot(&self) -> InputState {
        self.held
    }

    /// Input for the next tick. Pending pause/quit/restart presses are
    /// consumed; quit wins over pause.
    pub fn take_tick_input(&mut self) -> TickInput {
        let pause = std::mem::take(&mut self.pause_requested);
        let command = if std::mem::take(&mut self.quit_requested) {
            Some(PhaseCommand::Stop)
        } else {
            pause.then_some(PhaseCommand::TogglePause)
        };
        TickInput {
            input: self.held,
            command,
            restart: std::mem::take(&mut self.restart_requested),
        }
    }
}
