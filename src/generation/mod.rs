//! # Generation Module
//!
//! Procedural dungeon generation: grid storage, room placement, corridor
//! connectivity and decoration.
//!
//! A level is produced by running a fixed sequence of [`GenerationPass`]es over
//! a [`TileGrid`] and a shared room list. [`Dungeon`] owns the sequence, the
//! grid and the random number generator, and exposes the query surface the
//! rest of the game uses.

pub mod corridors;
pub mod dungeon;
pub mod features;
pub mod grid;
pub mod rooms;

pub use corridors::*;
pub use dungeon::*;
pub use features::*;
pub use grid::*;
pub use rooms::*;

use crate::{config, DelveError, DelveResult, Position};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls grid size, room and corridor parameters and decoration
/// probabilities. Every range is inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Tile edge length in world units
    pub tile_size: f32,
    /// Minimum number of rooms per level
    pub min_rooms: u32,
    /// Maximum number of rooms per level
    pub max_rooms: u32,
    /// Minimum room edge length
    pub min_room_size: u32,
    /// Maximum room edge length
    pub max_room_size: u32,
    /// Candidate rectangles sampled before placement gives up
    pub max_placement_attempts: u32,
    /// Margin added around rooms when testing for overlap
    pub room_buffer: u32,
    /// Relative weight of plain rectangular rooms
    pub rectangle_weight: u32,
    /// Relative weight of L-shaped rooms
    pub l_shape_weight: u32,
    /// Relative weight of cross-shaped rooms
    pub cross_shape_weight: u32,
    /// Chance that a large rectangular room gets a pillar or alcove
    pub room_feature_chance: f64,
    /// Minimum edge length for a room to receive a feature
    pub feature_min_room_size: u32,
    /// Relative weight of plain L-shaped corridors
    pub l_corridor_weight: u32,
    /// Relative weight of winding corridors
    pub winding_corridor_weight: u32,
    /// Relative weight of widened corridors
    pub wide_corridor_weight: u32,
    /// Manhattan span above which widened corridors add a parallel strip
    pub wide_corridor_span: u32,
    /// Upper bound of the shortcut draw
    pub max_shortcuts: u32,
    /// Lower bound of the dead-end draw
    pub min_dead_ends: u32,
    /// Upper bound of the dead-end draw
    pub max_dead_ends: u32,
    /// Shortest dead-end stub beyond the room edge
    pub dead_end_min_length: u32,
    /// Longest dead-end stub beyond the room edge
    pub dead_end_max_length: u32,
    /// Per-room chance of holding a treasure
    pub treasure_chance: f64,
    /// Treasures topped up after the random draw when too few were placed
    pub guaranteed_treasures: u32,
    /// Chance that a corridor entrance becomes a door
    pub door_chance: f64,
}

impl GenerationConfig {
    /// Creates a configuration for a standard 60x45 level.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert!(config.min_room_size >= 3);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: config::DEFAULT_DUNGEON_WIDTH,
            height: config::DEFAULT_DUNGEON_HEIGHT,
            tile_size: config::TILE_SIZE,
            min_rooms: 5,
            max_rooms: 10,
            min_room_size: 4,
            max_room_size: 10,
            max_placement_attempts: 150,
            room_buffer: 1,
            rectangle_weight: 6,
            l_shape_weight: 2,
            cross_shape_weight: 2,
            room_feature_chance: 0.2,
            feature_min_room_size: 6,
            l_corridor_weight: 5,
            winding_corridor_weight: 3,
            wide_corridor_weight: 2,
            wide_corridor_span: 12,
            max_shortcuts: 5,
            min_dead_ends: 1,
            max_dead_ends: 3,
            dead_end_min_length: 3,
            dead_end_max_length: 8,
            treasure_chance: 0.3,
            guaranteed_treasures: 2,
            door_chance: 0.25,
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            width: 40,
            height: 30,
            min_rooms: 3,
            max_rooms: 6,
            min_room_size: 4,
            max_room_size: 7,
            max_placement_attempts: 100,
            ..Self::new(seed)
        }
    }

    /// Creates a configuration for wide maps with many rooms.
    pub fn for_large_maps(seed: u64) -> Self {
        Self {
            width: 100,
            height: 70,
            min_rooms: 10,
            max_rooms: 20,
            min_room_size: 5,
            max_room_size: 14,
            max_placement_attempts: 400,
            wide_corridor_span: 18,
            ..Self::new(seed)
        }
    }

    /// Checks that the configuration can produce a level at all.
    pub fn validate(&self) -> DelveResult<()> {
        fn invalid(message: String) -> DelveResult<()> {
            Err(DelveError::InvalidConfig(message))
        }

        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return invalid(format!("tile size must be positive, got {}", self.tile_size));
        }
        if self.min_rooms == 0 || self.min_rooms > self.max_rooms {
            return invalid(format!(
                "room count range {}..={} is empty or zero",
                self.min_rooms, self.max_rooms
            ));
        }
        if self.min_room_size < 3 || self.min_room_size > self.max_room_size {
            return invalid(format!(
                "room size range {}..={} must start at 3 or more",
                self.min_room_size, self.max_room_size
            ));
        }
        if self.width > config::MAX_DUNGEON_DIMENSION || self.height > config::MAX_DUNGEON_DIMENSION {
            return invalid(format!(
                "{}x{} grid exceeds the {} tile limit",
                self.width,
                self.height,
                config::MAX_DUNGEON_DIMENSION
            ));
        }
        // A room needs a wall column/row on each side.
        let needed = self.min_room_size + 2;
        if self.width < needed || self.height < needed {
            return invalid(format!(
                "{}x{} grid cannot hold a {}x{} room with its border",
                self.width, self.height, self.min_room_size, self.min_room_size
            ));
        }
        let room_limit = self.width.min(self.height) - 2;
        if self.max_room_size > room_limit {
            return invalid(format!(
                "max room size {} does not fit a {}x{} grid (limit {})",
                self.max_room_size, self.width, self.height, room_limit
            ));
        }
        let span = self.width.max(self.height);
        if self.room_buffer > span {
            return invalid(format!(
                "room buffer {} is larger than the grid",
                self.room_buffer
            ));
        }
        if self.min_dead_ends > self.max_dead_ends
            || self.dead_end_min_length > self.dead_end_max_length
        {
            return invalid("dead-end ranges are empty".to_string());
        }
        if self.dead_end_max_length > span {
            return invalid(format!(
                "dead-end length {} is larger than the grid",
                self.dead_end_max_length
            ));
        }
        for (name, weights) in [
            (
                "room shape",
                [self.rectangle_weight, self.l_shape_weight, self.cross_shape_weight],
            ),
            (
                "corridor pattern",
                [
                    self.l_corridor_weight,
                    self.winding_corridor_weight,
                    self.wide_corridor_weight,
                ],
            ),
        ] {
            let total: u64 = weights.iter().map(|&weight| u64::from(weight)).sum();
            if total == 0 || total > u64::from(u32::MAX) {
                return invalid(format!("{} weights must sum to 1..=u32::MAX", name));
            }
        }
        for (name, chance) in [
            ("room_feature_chance", self.room_feature_chance),
            ("treasure_chance", self.treasure_chance),
            ("door_chance", self.door_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return invalid(format!("{} must be within 0.0..=1.0, got {}", name, chance));
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// One of the four corners of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

/// Floor layout carved inside a room's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomShape {
    /// The whole bounding box is floor
    Rectangle,
    /// One corner quadrant is left as wall
    LShape { cut: Corner },
    /// A shrunk core with arms reaching the middle of each edge
    Cross,
}

/// Represents a room in the dungeon.
///
/// The bounding box is what placement and overlap tests use; the shape decides
/// which cells inside it are carved. Every shape keeps the centre cell as floor
/// and stays 4-connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Placement index of this room
    pub id: u32,
    /// Top-left corner of the bounding box
    pub top_left: Position,
    /// Width of the bounding box
    pub width: u32,
    /// Height of the bounding box
    pub height: u32,
    /// Floor layout inside the box
    pub shape: RoomShape,
}

impl Room {
    /// Creates a rectangular room.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Room};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8);
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// assert_eq!(room.area(), 80);
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
            shape: RoomShape::Rectangle,
        }
    }

    /// Returns the same room with a different shape.
    pub fn with_shape(mut self, shape: RoomShape) -> Self {
        self.shape = shape;
        self
    }

    /// Gets the bottom-right corner of the bounding box.
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the center cell, `(x + width/2, y + height/2)`.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Gets the area of the bounding box in tiles.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside the bounding box.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width as i32
            && pos.y < self.top_left.y + self.height as i32
    }

    /// Checks if a position is on the outermost ring of the bounding box.
    pub fn is_border(&self, pos: Position) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let bottom_right = self.bottom_right();
        pos.x == self.top_left.x
            || pos.y == self.top_left.y
            || pos.x == bottom_right.x
            || pos.y == bottom_right.y
    }

    /// Strict bounding-box overlap; rooms that only share an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Room};
    ///
    /// let left = Room::new(0, Position::new(0, 0), 4, 4);
    /// let touching = Room::new(1, Position::new(4, 0), 4, 4);
    /// let overlapping = Room::new(2, Position::new(3, 3), 4, 4);
    /// assert!(!left.intersects(&touching));
    /// assert!(left.intersects(&overlapping));
    /// ```
    pub fn intersects(&self, other: &Room) -> bool {
        self.top_left.x < other.top_left.x + other.width as i32
            && self.top_left.x + self.width as i32 > other.top_left.x
            && self.top_left.y < other.top_left.y + other.height as i32
            && self.top_left.y + self.height as i32 > other.top_left.y
    }

    /// Grows the bounding box by `margin` on every side.
    pub fn inflated(&self, margin: u32) -> Room {
        Room {
            top_left: Position::new(
                self.top_left.x - margin as i32,
                self.top_left.y - margin as i32,
            ),
            width: self.width + margin * 2,
            height: self.height + margin * 2,
            ..self.clone()
        }
    }

    /// Whether the shape carves the given cell.
    pub fn is_floor(&self, pos: Position) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let dx = (pos.x - self.top_left.x) as u32;
        let dy = (pos.y - self.top_left.y) as u32;
        let (w, h) = (self.width, self.height);

        match self.shape {
            RoomShape::Rectangle => true,
            RoomShape::LShape { cut } => {
                // Cut sizes stay below half the room, so the centre row and
                // column always survive.
                let cut_w = (w - 1) / 2;
                let cut_h = (h - 1) / 2;
                let in_cut_x = match cut {
                    Corner::TopLeft | Corner::BottomLeft => dx < cut_w,
                    Corner::TopRight | Corner::BottomRight => dx >= w - cut_w,
                };
                let in_cut_y = match cut {
                    Corner::TopLeft | Corner::TopRight => dy < cut_h,
                    Corner::BottomLeft | Corner::BottomRight => dy >= h - cut_h,
                };
                !(in_cut_x && in_cut_y)
            }
            RoomShape::Cross => {
                let arm_w = (w / 3).max(1);
                let arm_h = (h / 3).max(1);
                let arm_x0 = w / 2 - arm_w / 2;
                let arm_y0 = h / 2 - arm_h / 2;
                let in_vertical_arm = dx >= arm_x0 && dx < arm_x0 + arm_w;
                let in_horizontal_arm = dy >= arm_y0 && dy < arm_y0 + arm_h;
                let inset_x = w / 4;
                let inset_y = h / 4;
                let in_core = dx >= inset_x
                    && dx < w - inset_x
                    && dy >= inset_y
                    && dy < h - inset_y;
                in_vertical_arm || in_horizontal_arm || in_core
            }
        }
    }

    /// Gets every cell of the bounding box.
    pub fn all_positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);
        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }

    /// Gets every cell the shape carves.
    pub fn floor_positions(&self) -> Vec<Position> {
        self.all_positions()
            .into_iter()
            .filter(|&pos| self.is_floor(pos))
            .collect()
    }

    /// Gets the carved cells that are not on the bounding-box border.
    pub fn interior_positions(&self) -> Vec<Position> {
        self.floor_positions()
            .into_iter()
            .filter(|&pos| !self.is_border(pos))
            .collect()
    }
}

/// A single step of level generation.
///
/// Passes run in a fixed order over the same grid and room list. Each pass
/// can also check its own postcondition, which tests and the `--ascii` dump
/// use to verify a finished layout.
pub trait GenerationPass {
    /// Applies the pass to the grid and room list.
    fn apply(
        &self,
        grid: &mut TileGrid,
        rooms: &mut Vec<Room>,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> DelveResult<()>;

    /// Validates the layout this pass is responsible for.
    fn validate(&self, grid: &TileGrid, rooms: &[Room], config: &GenerationConfig) -> DelveResult<()> {
        let _ = (grid, rooms, config);
        Ok(())
    }

    /// Gets the pass name for logging and debugging.
    fn pass_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use pathfinding::prelude::bfs_reach;
    use rand::SeedableRng;
    use std::collections::HashSet;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Flood-fills passable tiles 4-directionally from `start`.
    pub fn reachable_from(grid: &TileGrid, start: Position) -> HashSet<Position> {
        if !grid.tile_type(start).is_passable() {
            return HashSet::new();
        }
        bfs_reach(start, |&pos| {
            pos.cardinal_neighbors()
                .into_iter()
                .filter(|&next| grid.tile_type(next).is_passable())
                .collect::<Vec<_>>()
        })
        .collect()
    }

    /// Checks that every room centre is reachable from the first room's centre.
    pub fn validate_connectivity(grid: &TileGrid, rooms: &[Room]) -> DelveResult<()> {
        let Some(first) = rooms.first() else {
            return Ok(());
        };
        let visited = reachable_from(grid, first.center());
        for room in rooms {
            if !visited.contains(&room.center()) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} is not connected to room {}",
                    room.id, first.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_presets_validate() {
        for config in [
            GenerationConfig::new(1),
            GenerationConfig::for_testing(2),
            GenerationConfig::for_large_maps(3),
        ] {
            assert!(config.validate().is_ok(), "{:?}", config);
            assert!(config.min_rooms <= config.max_rooms);
        }
    }

    #[test]
    fn test_generation_config_rejects_tiny_grid() {
        let config = GenerationConfig {
            width: 5,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(config.validate(), Err(DelveError::InvalidConfig(_))));
    }

    #[test]
    fn test_generation_config_rejects_bad_ranges() {
        let inverted = GenerationConfig {
            min_rooms: 8,
            max_rooms: 3,
            ..GenerationConfig::new(1)
        };
        assert!(inverted.validate().is_err());

        let no_rooms = GenerationConfig {
            min_rooms: 0,
            ..GenerationConfig::new(1)
        };
        assert!(no_rooms.validate().is_err());

        let bad_chance = GenerationConfig {
            treasure_chance: 1.5,
            ..GenerationConfig::new(1)
        };
        assert!(bad_chance.validate().is_err());

        let bad_tile = GenerationConfig {
            tile_size: 0.0,
            ..GenerationConfig::new(1)
        };
        assert!(bad_tile.validate().is_err());
    }

    #[test]
    fn test_generation_config_rejects_oversized_rooms() {
        let huge = GenerationConfig {
            max_room_size: u32::MAX,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(huge.validate(), Err(DelveError::InvalidConfig(_))));

        // 45 rows leave 43 for a room once the outer walls are counted.
        let edge = GenerationConfig {
            max_room_size: 43,
            ..GenerationConfig::new(1)
        };
        assert!(edge.validate().is_ok());
        let past_edge = GenerationConfig {
            max_room_size: 44,
            ..GenerationConfig::new(1)
        };
        assert!(past_edge.validate().is_err());
    }

    #[test]
    fn test_generation_config_rejects_oversized_buffer() {
        let config = GenerationConfig {
            room_buffer: u32::MAX / 2 + 1,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(config.validate(), Err(DelveError::InvalidConfig(_))));

        let widest = GenerationConfig {
            room_buffer: 60,
            ..GenerationConfig::new(1)
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn test_generation_config_rejects_oversized_dead_ends() {
        let config = GenerationConfig {
            dead_end_max_length: u32::MAX,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(config.validate(), Err(DelveError::InvalidConfig(_))));
    }

    #[test]
    fn test_generation_config_rejects_overflowing_weights() {
        let config = GenerationConfig {
            rectangle_weight: u32::MAX,
            l_shape_weight: 1,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(config.validate(), Err(DelveError::InvalidConfig(_))));
    }

    #[test]
    fn test_generation_config_rejects_huge_grid() {
        let config = GenerationConfig {
            width: u32::MAX,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(config.validate(), Err(DelveError::InvalidConfig(_))));
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(1, Position::new(5, 5), 10, 8);

        assert_eq!(room.bottom_right(), Position::new(14, 12));
        assert_eq!(room.center(), Position::new(10, 9));

        assert!(room.contains(Position::new(5, 5)));
        assert!(room.contains(Position::new(14, 12)));
        assert!(!room.contains(Position::new(4, 5)));
        assert!(!room.contains(Position::new(15, 12)));

        assert!(room.is_border(Position::new(5, 5)));
        assert!(room.is_border(Position::new(10, 5)));
        assert!(!room.is_border(Position::new(7, 7)));
    }

    #[test]
    fn test_room_intersection_is_strict() {
        let room = Room::new(0, Position::new(5, 5), 5, 5);
        let right_neighbor = Room::new(1, Position::new(10, 5), 5, 5);
        let below_neighbor = Room::new(2, Position::new(5, 10), 5, 5);
        let overlapping = Room::new(3, Position::new(9, 9), 5, 5);
        let far = Room::new(4, Position::new(30, 30), 5, 5);

        assert!(!room.intersects(&right_neighbor));
        assert!(!room.intersects(&below_neighbor));
        assert!(room.intersects(&overlapping));
        assert!(overlapping.intersects(&room));
        assert!(!room.intersects(&far));
    }

    #[test]
    fn test_inflated_room_catches_touching_neighbors() {
        let room = Room::new(0, Position::new(5, 5), 5, 5);
        let touching = Room::new(1, Position::new(10, 5), 5, 5);
        let one_gap = Room::new(2, Position::new(11, 5), 5, 5);

        assert!(room.inflated(1).intersects(&touching));
        assert!(!room.inflated(1).intersects(&one_gap));
        assert_eq!(room.inflated(1).top_left, Position::new(4, 4));
        assert_eq!(room.inflated(1).width, 7);
    }

    #[test]
    fn test_l_shape_cuts_corner_and_keeps_center() {
        for corner in Corner::ALL {
            for (w, h) in [(4, 4), (5, 7), (10, 6)] {
                let room = Room::new(0, Position::new(2, 2), w, h)
                    .with_shape(RoomShape::LShape { cut: corner });
                assert!(room.is_floor(room.center()), "{:?} {}x{}", corner, w, h);
                assert!(room.floor_positions().len() < room.area() as usize);
            }
        }

        let room = Room::new(0, Position::new(0, 0), 6, 6)
            .with_shape(RoomShape::LShape { cut: Corner::TopRight });
        assert!(!room.is_floor(Position::new(5, 0)));
        assert!(room.is_floor(Position::new(0, 0)));
        assert!(room.is_floor(Position::new(5, 5)));
    }

    #[test]
    fn test_cross_shape_keeps_center_and_arms() {
        let room = Room::new(0, Position::new(0, 0), 9, 9).with_shape(RoomShape::Cross);
        let center = room.center();

        assert!(room.is_floor(center));
        assert!(room.is_floor(Position::new(center.x, 0)));
        assert!(room.is_floor(Position::new(center.x, 8)));
        assert!(room.is_floor(Position::new(0, center.y)));
        assert!(room.is_floor(Position::new(8, center.y)));
        assert!(!room.is_floor(Position::new(0, 0)));
        assert!(!room.is_floor(Position::new(8, 8)));

        let thin = Room::new(0, Position::new(0, 0), 3, 3).with_shape(RoomShape::Cross);
        assert!(thin.is_floor(thin.center()));
    }

    #[test]
    fn test_interior_positions_exclude_border() {
        let room = Room::new(1, Position::new(5, 5), 4, 4);
        let interior = room.interior_positions();
        assert_eq!(interior.len(), 4);
        assert!(interior.iter().all(|&pos| !room.is_border(pos)));
    }

    #[test]
    fn test_reachable_from_wall_is_empty() {
        let grid = TileGrid::new(5, 5, 32.0);
        assert!(utils::reachable_from(&grid, Position::new(2, 2)).is_empty());
    }

    #[test]
    fn test_connectivity_validation() {
        let mut grid = TileGrid::new(20, 10, 32.0);
        let a = Room::new(0, Position::new(1, 1), 4, 4);
        let b = Room::new(1, Position::new(10, 1), 4, 4);
        for room in [&a, &b] {
            for pos in room.floor_positions() {
                grid.set_tile(pos, TileType::Floor);
            }
        }
        let rooms = vec![a.clone(), b.clone()];
        assert!(utils::validate_connectivity(&grid, &rooms).is_err());

        for x in a.center().x..=b.center().x {
            grid.set_tile(Position::new(x, a.center().y), TileType::Floor);
        }
        assert!(utils::validate_connectivity(&grid, &rooms).is_ok());
    }
}
