//! Input polling
//!
//! The simulation consumes a held-state snapshot of the controls, taken
//! once at the top of each frame. Bindings live on the action enum so a
//! later remap touches exactly one table.

use macroquad::prelude::{is_key_down, KeyCode};

use crate::game::InputSnapshot;

/// All game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Duck,
    Fire,
}

impl Action {
    /// Keyboard binding for this action
    fn key(self) -> KeyCode {
        match self {
            Action::MoveLeft => KeyCode::Left,
            Action::MoveRight => KeyCode::Right,
            Action::Jump => KeyCode::Up,
            Action::Duck => KeyCode::Down,
            Action::Fire => KeyCode::Space,
        }
    }

    /// Check if the action is currently held down
    pub fn down(self) -> bool {
        is_key_down(self.key())
    }
}

/// Snapshot the currently-held actions
pub fn poll() -> InputSnapshot {
    InputSnapshot {
        left: Action::MoveLeft.down(),
        right: Action::MoveRight.down(),
        jump: Action::Jump.down(),
        duck: Action::Duck.down(),
        fire: Action::Fire.down(),
    }
}
