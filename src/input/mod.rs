//! # Input Module
//!
//! Keyboard input mapped to player intents.

use crate::Direction;
use macroquad::prelude::*;

/// Player intents the scene loop understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Step one tile
    Move(Direction),
    /// Pause or resume
    Pause,
    /// Start a game from the menu or continue after a won level
    Confirm,
    /// Leave the current screen
    Quit,
    /// Show key help
    Help,
}

/// Always-on bindings.
const BINDINGS: &[(KeyCode, PlayerInput)] = &[
    (KeyCode::Escape, PlayerInput::Quit),
    (KeyCode::Up, PlayerInput::Move(Direction::North)),
    (KeyCode::Down, PlayerInput::Move(Direction::South)),
    (KeyCode::Left, PlayerInput::Move(Direction::West)),
    (KeyCode::Right, PlayerInput::Move(Direction::East)),
    (KeyCode::W, PlayerInput::Move(Direction::North)),
    (KeyCode::S, PlayerInput::Move(Direction::South)),
    (KeyCode::A, PlayerInput::Move(Direction::West)),
    (KeyCode::D, PlayerInput::Move(Direction::East)),
    (KeyCode::P, PlayerInput::Pause),
    (KeyCode::Space, PlayerInput::Pause),
    (KeyCode::Enter, PlayerInput::Confirm),
    (KeyCode::KpEnter, PlayerInput::Confirm),
    (KeyCode::F1, PlayerInput::Help),
];

/// Vi-style movement (hjkl).
const VI_BINDINGS: &[(KeyCode, PlayerInput)] = &[
    (KeyCode::H, PlayerInput::Move(Direction::West)),
    (KeyCode::J, PlayerInput::Move(Direction::South)),
    (KeyCode::K, PlayerInput::Move(Direction::North)),
    (KeyCode::L, PlayerInput::Move(Direction::East)),
];

/// Polls macroquad for key presses.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.vi_keys_enabled);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    fn bindings(&self) -> impl Iterator<Item = &'static (KeyCode, PlayerInput)> {
        let vi: &'static [(KeyCode, PlayerInput)] = if self.vi_keys_enabled {
            VI_BINDINGS
        } else {
            &[]
        };
        BINDINGS.iter().chain(vi.iter())
    }

    /// The intent bound to a key, if any.
    pub fn map_key(&self, key: KeyCode) -> Option<PlayerInput> {
        self.bindings()
            .find(|(bound, _)| *bound == key)
            .map(|&(_, input)| input)
    }

    /// The first bound key pressed this frame.
    ///
    /// Must be called from inside the macroquad window loop.
    pub fn get_input(&self) -> Option<PlayerInput> {
        self.bindings()
            .find(|(key, _)| is_key_pressed(*key))
            .map(|&(_, input)| input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_bindings() {
        let handler = InputHandler::new();
        assert_eq!(handler.map_key(KeyCode::Up), Some(PlayerInput::Move(Direction::North)));
        assert_eq!(handler.map_key(KeyCode::A), Some(PlayerInput::Move(Direction::West)));
        assert_eq!(handler.map_key(KeyCode::L), Some(PlayerInput::Move(Direction::East)));
    }

    #[test]
    fn test_vi_keys_can_be_disabled() {
        let handler = InputHandler {
            vi_keys_enabled: false,
        };
        assert_eq!(handler.map_key(KeyCode::H), None);
        assert_eq!(handler.map_key(KeyCode::Escape), Some(PlayerInput::Quit));
    }

    #[test]
    fn test_control_bindings() {
        let handler = InputHandler::new();
        assert_eq!(handler.map_key(KeyCode::P), Some(PlayerInput::Pause));
        assert_eq!(handler.map_key(KeyCode::Enter), Some(PlayerInput::Confirm));
        assert_eq!(handler.map_key(KeyCode::F1), Some(PlayerInput::Help));
        assert_eq!(handler.map_key(KeyCode::Z), None);
    }
}
