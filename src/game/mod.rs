//! # Game Module
//!
//! Coordinates, level progression and the game session that the frame loop drives.
//!
//! This module contains the runtime side of Delve:
//! - Grid and world coordinate types shared with the generator
//! - The level-progression state machine and its victory rule
//! - The game session adapter that turns player actions into progression events

pub mod progression;
pub mod state;

pub use progression::*;
pub use state::*;

use serde::{Deserialize, Serialize};

/// A cell coordinate in the dungeon grid.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.cardinal_neighbors().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Calculates the Euclidean distance to another position.
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns the 4 cardinal neighbours (no diagonals).
    pub fn cardinal_neighbors(self) -> [Position; 4] {
        Direction::ALL.map(|direction| self.step(direction, 1))
    }

    /// Moves `steps` cells in `direction`.
    pub fn step(self, direction: Direction, steps: i32) -> Position {
        let delta = direction.to_delta();
        Position::new(self.x + delta.x * steps, self.y + delta.y * steps)
    }

    /// Returns the world coordinate of this cell's centre.
    pub fn to_world_center(self, tile_size: f32) -> WorldPoint {
        WorldPoint::new(
            self.x as f32 * tile_size + tile_size / 2.0,
            self.y as f32 * tile_size + tile_size / 2.0,
        )
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// A continuous coordinate in world (pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new world point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Converts to the grid cell containing this point.
    ///
    /// Uses flooring division, so small negative coordinates map to cell `-1`
    /// rather than being folded onto cell `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, WorldPoint};
    ///
    /// assert_eq!(WorldPoint::new(40.0, 10.0).to_grid(32.0), Position::new(1, 0));
    /// assert_eq!(WorldPoint::new(-1.0, 10.0).to_grid(32.0), Position::new(-1, 0));
    /// ```
    pub fn to_grid(self, tile_size: f32) -> Position {
        Position::new(
            (self.x / tile_size).floor() as i32,
            (self.y / tile_size).floor() as i32,
        )
    }

    /// Offsets the point by one tile in `direction`.
    pub fn step(self, direction: Direction, tile_size: f32) -> WorldPoint {
        let delta = direction.to_delta();
        WorldPoint::new(
            self.x + delta.x as f32 * tile_size,
            self.y + delta.y as f32 * tile_size,
        )
    }
}

/// Cardinal directions for movement and corridor stubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::East,
        Direction::South,
    ];

    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, Position};
    ///
    /// assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Whether the direction moves along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}
