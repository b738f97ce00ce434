//! # Game State Module
//!
//! The game session the frame loop drives.
//!
//! [`GameSession`] owns one [`Dungeon`], the [`LevelProgressionController`],
//! the enemy markers and the player cell. Front ends feed it player moves and
//! call [`GameSession::update`] once per frame; the session turns pickups and
//! kills into progression events and regenerates the dungeon between levels.

use crate::{
    config, DelveError, DelveResult, Direction, Dungeon, GenerationConfig,
    LevelProgressionController, Position, ProgressionConfig, ProgressionEvent,
    ProgressionSnapshot, TileType, WorldPoint,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Messages kept for the HUD log.
const MAX_MESSAGES: usize = 50;

/// Everything needed to start a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generation: GenerationConfig,
    pub progression: ProgressionConfig,
}

impl GameConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GameConfig;
    ///
    /// let config = GameConfig::from_json(r#"{ "generation": { "seed": 9, "width": 50 } }"#).unwrap();
    /// assert_eq!(config.generation.seed, 9);
    /// assert_eq!(config.generation.width, 50);
    /// assert_eq!(config.progression.base_enemies, 8);
    /// ```
    pub fn from_json(json: &str) -> DelveResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DelveResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> DelveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> DelveResult<()> {
        self.generation.validate()?;
        self.progression.validate()
    }
}

/// Top-level screens of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    LevelComplete,
}

/// An enemy marker. Enemies do not move; stepping into one defeats it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub position: Position,
    pub alive: bool,
}

/// Running totals for the whole game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub score: u64,
    pub treasures_collected: u32,
    pub enemies_defeated: u32,
    pub steps_taken: u64,
    /// Deepest level reached
    pub max_level_reached: u32,
}

/// One game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    dungeon: Dungeon,
    progression: LevelProgressionController,
    phase: GamePhase,
    player: Option<Position>,
    enemies: Vec<Enemy>,
    statistics: GameStatistics,
    messages: Vec<String>,
    frame_count: u64,
}

impl GameSession {
    /// Creates a session sitting at the menu. No level exists yet.
    pub fn new(config: GameConfig) -> DelveResult<Self> {
        config.validate()?;
        let dungeon = Dungeon::new(config.generation.clone())?;
        let progression = LevelProgressionController::new(config.progression.clone());
        Ok(Self {
            config,
            dungeon,
            progression,
            phase: GamePhase::Menu,
            player: None,
            enemies: Vec::new(),
            statistics: GameStatistics::default(),
            messages: Vec::new(),
            frame_count: 0,
        })
    }

    /// Starts at level 1 with a freshly generated dungeon.
    pub fn start_new_game(&mut self) -> DelveResult<()> {
        self.progression.reset();
        self.statistics = GameStatistics::default();
        self.messages.clear();

        let enemies = self.load_level()?;
        self.progression.begin_level(
            self.dungeon.room_count(),
            enemies,
            self.dungeon.treasures_placed() as u32,
        );
        self.statistics.max_level_reached = 1;
        self.phase = GamePhase::Playing;
        self.add_message("You descend into the dungeon.".to_string());
        info!("New game started with seed {}", self.config.generation.seed);
        Ok(())
    }

    /// Generates the next level after a win.
    ///
    /// On a generation failure the session stays in `LevelComplete`.
    pub fn continue_to_next_level(&mut self) -> DelveResult<()> {
        if self.phase != GamePhase::LevelComplete {
            return Err(DelveError::InvalidState(format!(
                "no level to continue to from {:?}",
                self.phase
            )));
        }

        let enemies = self.load_level()?;
        self.progression.resume_next_level(
            self.dungeon.room_count(),
            enemies,
            self.dungeon.treasures_placed() as u32,
        )?;
        let level = self.progression.current_level();
        self.statistics.max_level_reached = self.statistics.max_level_reached.max(level);
        self.phase = GamePhase::Playing;
        self.add_message(format!("Level {} begins.", level));
        Ok(())
    }

    /// Regenerates the dungeon, places the player and spawns enemies.
    ///
    /// Returns the number of enemies actually spawned.
    fn load_level(&mut self) -> DelveResult<u32> {
        self.dungeon.generate()?;
        let tile_size = self.dungeon.grid().tile_size();
        self.player = Some(self.dungeon.player_spawn()?.to_grid(tile_size));

        let quota = self.progression.enemy_quota() as usize;
        self.enemies = self
            .dungeon
            .enemy_spawns(quota)
            .into_iter()
            .enumerate()
            .map(|(id, point)| Enemy {
                id: id as u32,
                position: point.to_grid(tile_size),
                alive: true,
            })
            .collect();

        debug!(
            "Loaded level {} with {} of {} enemies",
            self.progression.current_level(),
            self.enemies.len(),
            quota
        );
        Ok(self.enemies.len() as u32)
    }

    /// Steps the player one tile.
    ///
    /// Walking into a live enemy defeats it and the player stays put. Walking
    /// onto treasure collects it. Returns whether the player moved; moves
    /// outside `Playing` and into walls are ignored.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let Some(current) = self.player else {
            return false;
        };
        let target = current.step(direction, 1);

        if let Some(enemy) = self
            .enemies
            .iter_mut()
            .find(|enemy| enemy.alive && enemy.position == target)
        {
            enemy.alive = false;
            let id = enemy.id;
            self.progression.handle_event(ProgressionEvent::EnemyKilled);
            self.statistics.enemies_defeated += 1;
            self.statistics.score += config::ENEMY_SCORE;
            self.add_message(format!("Enemy {} defeated.", id));
            return false;
        }

        let world = self.cell_to_world(target);
        if self.dungeon.is_wall(world) {
            return false;
        }

        self.player = Some(target);
        self.statistics.steps_taken += 1;

        if self.dungeon.tile_type(world) == TileType::Treasure {
            self.dungeon.set_tile_type_at(world, TileType::Floor);
            self.progression.handle_event(ProgressionEvent::TreasureCollected);
            self.statistics.treasures_collected += 1;
            self.statistics.score += config::TREASURE_SCORE;
            self.add_message("You found treasure!".to_string());
        }
        true
    }

    /// Advances one frame and checks for victory.
    pub fn update(&mut self) {
        self.frame_count += 1;
        if self.phase == GamePhase::Playing && self.progression.update() {
            self.phase = GamePhase::LevelComplete;
            self.add_message(format!(
                "Level complete! Press Enter for level {}.",
                self.progression.current_level()
            ));
        }
    }

    /// Switches between `Playing` and `Paused`; other phases are unaffected.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Abandons the current game.
    pub fn quit_to_menu(&mut self) {
        self.progression.reset();
        self.enemies.clear();
        self.player = None;
        self.phase = GamePhase::Menu;
    }

    fn cell_to_world(&self, cell: Position) -> WorldPoint {
        cell.to_world_center(self.dungeon.grid().tile_size())
    }

    /// Appends to the message log, dropping the oldest past the cap.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn progression(&self) -> &LevelProgressionController {
        &self.progression
    }

    pub fn snapshot(&self) -> ProgressionSnapshot {
        self.progression.snapshot()
    }

    /// Player cell, once a level is loaded.
    pub fn player_position(&self) -> Option<Position> {
        self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|enemy| enemy.alive)
    }

    pub fn score(&self) -> u64 {
        self.statistics.score
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The most recent `count` messages, oldest first.
    pub fn recent_messages(&self, count: usize) -> &[String] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }
}
