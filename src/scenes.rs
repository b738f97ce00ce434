//! # Scene Management System
//!
//! Routes input to the game session by phase and drives the frame loop.

use crate::rendering::UI;
use crate::{DelveResult, GamePhase, GameSession, InputHandler, MacroquadDisplay, PlayerInput};
use log::info;
use macroquad::prelude::*;

/// What the frame loop should do after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    Continue,
    Exit,
}

/// Applies one input to the session according to its current phase.
///
/// Escape steps back one screen: from play or pause to the menu, and from the
/// menu out of the program.
pub fn apply_input(session: &mut GameSession, input: PlayerInput) -> DelveResult<SceneCommand> {
    match (session.phase(), input) {
        (GamePhase::Menu, PlayerInput::Confirm) => session.start_new_game()?,
        (GamePhase::Menu, PlayerInput::Quit) => return Ok(SceneCommand::Exit),

        (GamePhase::Playing, PlayerInput::Move(direction)) => {
            session.move_player(direction);
        }
        (GamePhase::Playing | GamePhase::Paused, PlayerInput::Pause) => session.toggle_pause(),
        (GamePhase::Playing | GamePhase::Paused | GamePhase::LevelComplete, PlayerInput::Quit) => {
            info!("Returning to menu at level {}", session.snapshot().level);
            session.quit_to_menu();
        }

        (GamePhase::LevelComplete, PlayerInput::Confirm) => session.continue_to_next_level()?,

        (_, PlayerInput::Help) => session.add_message(UI::CONTROLS.join(", ")),
        _ => {}
    }
    Ok(SceneCommand::Continue)
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    session: GameSession,
    display: MacroquadDisplay,
    input_handler: InputHandler,
}

impl SceneManager {
    /// Creates a scene manager. Must run inside the macroquad window.
    pub fn new(session: GameSession, input_handler: InputHandler) -> Self {
        let display = MacroquadDisplay::new(crate::config::TILE_SIZE);
        Self {
            session,
            display,
            input_handler,
        }
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> DelveResult<()> {
        loop {
            if let Some(input) = self.input_handler.get_input() {
                if apply_input(&mut self.session, input)? == SceneCommand::Exit {
                    break;
                }
            }

            self.session.update();
            self.display.render_game(&self.session)?;
            next_frame().await;
        }
        info!("Scene loop ended after {} frames", self.session.frame_count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, GameConfig, GenerationConfig};

    fn session() -> GameSession {
        let config = GameConfig {
            generation: GenerationConfig::for_testing(5),
            ..GameConfig::default()
        };
        GameSession::new(config).unwrap()
    }

    #[test]
    fn test_menu_confirm_starts_game() {
        let mut session = session();
        assert_eq!(apply_input(&mut session, PlayerInput::Confirm).unwrap(), SceneCommand::Continue);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_escape_steps_back() {
        let mut session = session();
        apply_input(&mut session, PlayerInput::Confirm).unwrap();
        apply_input(&mut session, PlayerInput::Pause).unwrap();
        assert_eq!(session.phase(), GamePhase::Paused);

        apply_input(&mut session, PlayerInput::Quit).unwrap();
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(apply_input(&mut session, PlayerInput::Quit).unwrap(), SceneCommand::Exit);
    }

    #[test]
    fn test_moves_ignored_outside_play() {
        let mut session = session();
        apply_input(&mut session, PlayerInput::Move(Direction::East)).unwrap();
        assert_eq!(session.phase(), GamePhase::Menu);
        assert!(session.player_position().is_none());
    }

    #[test]
    fn test_confirm_during_play_keeps_level() {
        let mut session = session();
        apply_input(&mut session, PlayerInput::Confirm).unwrap();
        let layout = session.dungeon().render_ascii();

        apply_input(&mut session, PlayerInput::Confirm).unwrap();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.snapshot().level, 1);
        assert_eq!(session.dungeon().render_ascii(), layout);
    }

    #[test]
    fn test_help_adds_message() {
        let mut session = session();
        apply_input(&mut session, PlayerInput::Help).unwrap();
        assert!(session.recent_messages(1)[0].contains("Pause"));
    }
}
