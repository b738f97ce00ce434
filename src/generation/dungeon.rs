//! # Dungeon Generation
//!
//! The level orchestrator and the query surface used at runtime.
//!
//! [`Dungeon`] owns the tile grid, the room list and a seeded random number
//! generator. Each call to [`Dungeon::generate`] wipes the previous level and
//! runs room placement, corridor connection and decoration in order, then
//! marks the spawn tile in the first placed room.

use super::{
    utils, CorridorConnector, FeatureDecorator, GenerationConfig, GenerationPass, Room,
    RoomPlacer, TileGrid, TileType,
};
use crate::{DelveError, DelveResult, Position, WorldPoint};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

/// A generated dungeon level and the generator that produced it.
///
/// # Examples
///
/// ```
/// use delve::{Dungeon, GenerationConfig, TileType};
///
/// let mut dungeon = Dungeon::new(GenerationConfig::new(7)).unwrap();
/// dungeon.generate().unwrap();
///
/// let spawn = dungeon.player_spawn().unwrap();
/// assert!(!dungeon.is_wall(spawn));
/// assert_eq!(dungeon.tile_type(spawn), TileType::Spawn);
/// ```
#[derive(Debug, Clone)]
pub struct Dungeon {
    config: GenerationConfig,
    grid: TileGrid,
    rooms: Vec<Room>,
    spawn_tile: Option<Position>,
    player_spawn: Option<WorldPoint>,
    treasures_placed: usize,
    rng: StdRng,
}

impl Dungeon {
    /// Creates an empty (all wall) dungeon seeded from `config.seed`.
    pub fn new(config: GenerationConfig) -> DelveResult<Self> {
        let rng = utils::create_rng(&config);
        Self::with_rng(config, rng)
    }

    /// Creates an empty dungeon that draws from an injected generator.
    pub fn with_rng(config: GenerationConfig, rng: StdRng) -> DelveResult<Self> {
        config.validate()?;
        let grid = TileGrid::new(config.width, config.height, config.tile_size);
        Ok(Self {
            config,
            grid,
            rooms: Vec::new(),
            spawn_tile: None,
            player_spawn: None,
            treasures_placed: 0,
            rng,
        })
    }

    /// The generation passes in the order they run.
    fn passes() -> Vec<Box<dyn GenerationPass>> {
        vec![
            Box::new(RoomPlacer::new()),
            Box::new(CorridorConnector::new()),
            Box::new(FeatureDecorator::new()),
        ]
    }

    /// Generates a new level, replacing whatever the dungeon held before.
    ///
    /// Fails when no room could be placed; the spawn point is then left unset.
    pub fn generate(&mut self) -> DelveResult<()> {
        self.grid.fill(TileType::Wall);
        self.rooms.clear();
        self.spawn_tile = None;
        self.player_spawn = None;
        self.treasures_placed = 0;

        for pass in Self::passes() {
            pass.apply(&mut self.grid, &mut self.rooms, &self.config, &mut self.rng)?;
            debug!("{} finished with {} rooms", pass.pass_type(), self.rooms.len());
            if self.rooms.is_empty() {
                return Err(DelveError::GenerationFailed(format!(
                    "{} placed no rooms in a {}x{} grid",
                    pass.pass_type(),
                    self.config.width,
                    self.config.height
                )));
            }
        }

        let spawn = self.rooms[0].center();
        self.grid.set_tile(spawn, TileType::Spawn);
        self.spawn_tile = Some(spawn);
        self.player_spawn = Some(spawn.to_world_center(self.grid.tile_size()));
        self.treasures_placed = self.grid.count(TileType::Treasure);

        info!(
            "Generated {}x{} dungeon: {} rooms, {} treasures, spawn at ({}, {})",
            self.grid.width(),
            self.grid.height(),
            self.rooms.len(),
            self.treasures_placed,
            spawn.x,
            spawn.y
        );
        Ok(())
    }

    /// Whether the world coordinate is blocked. Anything off the map is.
    pub fn is_wall(&self, world: WorldPoint) -> bool {
        self.grid.is_wall(world)
    }

    /// The tile type under a world coordinate; off the map is a wall.
    pub fn tile_type(&self, world: WorldPoint) -> TileType {
        self.grid.query_tile(world)
    }

    /// Rewrites the tile under a world coordinate, e.g. a collected treasure.
    pub fn set_tile_type_at(&mut self, world: WorldPoint, tile_type: TileType) {
        self.grid.set_tile_at(world, tile_type);
    }

    /// World coordinate of the spawn tile's centre.
    pub fn player_spawn(&self) -> DelveResult<WorldPoint> {
        self.player_spawn.ok_or_else(|| {
            DelveError::InvalidState("dungeon has no spawn point; generate a level first".to_string())
        })
    }

    /// Grid cell of the spawn tile, if a level has been generated.
    pub fn spawn_tile(&self) -> Option<Position> {
        self.spawn_tile
    }

    /// Picks up to `count` distinct enemy positions, never in the spawn room.
    ///
    /// Each pick chooses a room uniformly among those with free interior
    /// cells, then a free cell within it. Treasure cells are skipped. Returns
    /// fewer points when the rooms run out of space, and none at all when the
    /// level has a single room.
    pub fn enemy_spawns(&mut self, count: usize) -> Vec<WorldPoint> {
        let mut free: Vec<Vec<Position>> = self
            .rooms
            .iter()
            .skip(1)
            .map(|room| {
                room.interior_positions()
                    .into_iter()
                    .filter(|&pos| {
                        let tile = self.grid.tile_type(pos);
                        tile.is_passable() && tile != TileType::Treasure
                    })
                    .collect()
            })
            .collect();

        let tile_size = self.grid.tile_size();
        let mut spawns = Vec::with_capacity(count);
        while spawns.len() < count {
            let open: Vec<usize> = (0..free.len()).filter(|&i| !free[i].is_empty()).collect();
            if open.is_empty() {
                debug!("Only {} of {} enemy spawns fit", spawns.len(), count);
                break;
            }
            let room = open[self.rng.gen_range(0..open.len())];
            let cell = self.rng.gen_range(0..free[room].len());
            let pos = free[room].swap_remove(cell);
            spawns.push(pos.to_world_center(tile_size));
        }
        spawns
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Rooms in placement order; the first is the spawn room.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Treasure tiles present right after the last generation.
    pub fn treasures_placed(&self) -> usize {
        self.treasures_placed
    }

    /// Re-checks the current layout against every pass's postcondition.
    ///
    /// Covers room bounds and overlap, reachability of every room from the
    /// spawn room, treasure placement and the spawn marker itself.
    pub fn validate_layout(&self) -> DelveResult<()> {
        let spawn = self.spawn_tile.ok_or_else(|| {
            DelveError::InvalidState("no level has been generated".to_string())
        })?;

        for pass in Self::passes() {
            pass.validate(&self.grid, &self.rooms, &self.config)?;
        }

        let reachable = utils::reachable_from(&self.grid, spawn);
        if let Some(room) = self
            .rooms
            .iter()
            .find(|room| !reachable.contains(&room.center()))
        {
            return Err(DelveError::GenerationFailed(format!(
                "Room {} cannot be reached from the spawn tile",
                room.id
            )));
        }
        Ok(())
    }

    /// The current level as text, one row per line.
    pub fn render_ascii(&self) -> String {
        self.grid.to_string()
    }
}
