//! # Tile Grid
//!
//! Dense tile storage for one dungeon level.
//!
//! The grid owns no generation logic. It stores tile types, answers type
//! queries and converts world coordinates to cells. Every query treats cells
//! outside the grid as [`TileType::Wall`], so collision code never has to
//! bounds-check on its own.

use crate::{Position, WorldPoint};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five kinds of tile a dungeon is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Wall,
    Floor,
    Door,
    Treasure,
    Spawn,
}

impl TileType {
    /// Whether an actor can stand on this tile.
    pub fn is_passable(self) -> bool {
        !matches!(self, TileType::Wall)
    }

    /// The character used for this tile in ASCII dumps.
    pub fn glyph(self) -> char {
        match self {
            TileType::Wall => '#',
            TileType::Floor => '.',
            TileType::Door => '+',
            TileType::Treasure => '$',
            TileType::Spawn => '@',
        }
    }
}

/// A single cell of the dungeon.
///
/// Only the type changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub tile_type: TileType,
    pub grid_position: Position,
}

/// Fixed-size tile map indexed `[y][x]`.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: f32,
    tiles: Vec<Vec<Tile>>,
}

impl TileGrid {
    /// Creates a grid filled with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, TileGrid, TileType};
    ///
    /// let grid = TileGrid::new(10, 8, 32.0);
    /// assert_eq!(grid.tile_type(Position::new(3, 3)), TileType::Wall);
    /// assert_eq!(grid.tile_type(Position::new(50, 50)), TileType::Wall);
    /// ```
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        let tiles = (0..height as i32)
            .map(|y| {
                (0..width as i32)
                    .map(|x| Tile {
                        tile_type: TileType::Wall,
                        grid_position: Position::new(x, y),
                    })
                    .collect()
            })
            .collect();

        Self {
            width,
            height,
            tile_size,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Rewrites every tile with `tile_type`.
    pub fn fill(&mut self, tile_type: TileType) {
        for tile in self.tiles.iter_mut().flatten() {
            tile.tile_type = tile_type;
        }
    }

    /// Checks whether a cell lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Gets the tile at a cell, if it exists.
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Gets the type at a cell; out of bounds is a wall.
    pub fn tile_type(&self, pos: Position) -> TileType {
        self.tile(pos)
            .map(|tile| tile.tile_type)
            .unwrap_or(TileType::Wall)
    }

    /// Sets the type at a cell. Writes outside the grid are ignored.
    pub fn set_tile(&mut self, pos: Position, tile_type: TileType) {
        if self.in_bounds(pos) {
            self.tiles[pos.y as usize][pos.x as usize].tile_type = tile_type;
        }
    }

    /// Converts a world coordinate to the cell containing it.
    pub fn world_to_grid(&self, world: WorldPoint) -> Position {
        world.to_grid(self.tile_size)
    }

    /// Looks up the tile type under a world coordinate.
    pub fn query_tile(&self, world: WorldPoint) -> TileType {
        self.tile_type(self.world_to_grid(world))
    }

    /// Whether the world coordinate is inside a wall (or outside the map).
    pub fn is_wall(&self, world: WorldPoint) -> bool {
        self.query_tile(world) == TileType::Wall
    }

    /// Sets the tile under a world coordinate. Ignored outside the grid.
    pub fn set_tile_at(&mut self, world: WorldPoint, tile_type: TileType) {
        let pos = self.world_to_grid(world);
        self.set_tile(pos, tile_type);
    }

    /// Counts tiles of the given type.
    pub fn count(&self, tile_type: TileType) -> usize {
        self.tiles
            .iter()
            .flatten()
            .filter(|tile| tile.tile_type == tile_type)
            .count()
    }

    /// Lists the cells holding the given type, row by row.
    pub fn positions_of(&self, tile_type: TileType) -> Vec<Position> {
        self.tiles
            .iter()
            .flatten()
            .filter(|tile| tile.tile_type == tile_type)
            .map(|tile| tile.grid_position)
            .collect()
    }

    /// Iterates over every tile, row by row.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            let line: String = row.iter().map(|tile| tile.tile_type.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
