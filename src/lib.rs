//! # Delve
//!
//! A real-time, tile-based dungeon crawler with procedurally generated levels.
//!
//! ## Architecture Overview
//!
//! The crate is split into a small algorithmic core and a thin front end:
//!
//! - **Generation**: grid storage, room placement, corridor connectivity and
//!   decoration, orchestrated by [`Dungeon`]
//! - **Progression**: per-level counters and the victory rule that gates level
//!   transitions ([`LevelProgressionController`])
//! - **Game Session**: the adapter the frame loop drives; it owns the dungeon,
//!   the progression controller and the enemy markers
//! - **Rendering / Input / Scenes**: macroquad window, key mapping and the
//!   menu / pause / level-complete screens
//!
//! Everything below the front end is synchronous, single-threaded and owns its
//! own random number generator, so a fixed seed reproduces a whole run.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;

pub use game::{
    Direction, Enemy, GameConfig, GamePhase, GameSession, LevelProgress,
    LevelProgressionController, Position, ProgressionConfig, ProgressionEvent,
    ProgressionPhase, ProgressionSnapshot, WorldPoint,
};

pub use generation::{
    Corner, CorridorConnector, CorridorPattern, Dungeon, FeatureDecorator, GenerationConfig,
    GenerationPass, Room, RoomPlacer, RoomShape, Tile, TileGrid, TileType,
};

pub use input::{InputHandler, PlayerInput};
pub use rendering::MacroquadDisplay;
pub use scenes::SceneManager;

/// Core error type for the Delve engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration cannot produce a playable dungeon
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid for the requested operation
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Edge length of one tile in world units (pixels)
    pub const TILE_SIZE: f32 = 32.0;

    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: u32 = 60;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = 45;

    /// Largest accepted dungeon edge in tiles
    pub const MAX_DUNGEON_DIMENSION: u32 = 2048;

    /// Frames per second target for the game loop
    pub const TARGET_FPS: u64 = 60;

    /// Score awarded for picking up a treasure
    pub const TREASURE_SCORE: u64 = 500;

    /// Score awarded for defeating an enemy
    pub const ENEMY_SCORE: u64 = 100;
}
