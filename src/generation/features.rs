//! # Feature Decoration
//!
//! Scatters treasure through rooms and marks doorways where corridors enter them.

use super::{GenerationConfig, GenerationPass, Room, TileGrid, TileType};
use crate::{DelveError, DelveResult, Position};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Places treasure and doors after corridors are carved.
#[derive(Debug, Clone, Default)]
pub struct FeatureDecorator;

impl FeatureDecorator {
    pub fn new() -> Self {
        Self
    }

    /// Turns one interior floor cell of `room` into treasure.
    ///
    /// The centre is skipped because it is the corridor anchor and, for the
    /// first room, the spawn tile. Returns false when no cell qualifies.
    fn place_treasure(&self, grid: &mut TileGrid, room: &Room, rng: &mut StdRng) -> bool {
        let center = room.center();
        let candidates: Vec<Position> = room
            .interior_positions()
            .into_iter()
            .filter(|&pos| pos != center && grid.tile_type(pos) == TileType::Floor)
            .collect();

        match candidates.choose(rng) {
            Some(&pos) => {
                grid.set_tile(pos, TileType::Treasure);
                true
            }
            None => false,
        }
    }

    /// One independent draw per room, then a top-up to the guaranteed minimum.
    fn scatter_treasure(
        &self,
        grid: &mut TileGrid,
        rooms: &[Room],
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> usize {
        let mut holds_treasure = vec![false; rooms.len()];
        for (i, room) in rooms.iter().enumerate() {
            if rng.gen_bool(config.treasure_chance) {
                holds_treasure[i] = self.place_treasure(grid, room, rng);
            }
        }

        let mut placed = holds_treasure.iter().filter(|&&held| held).count();
        let guaranteed = config.guaranteed_treasures as usize;
        if placed < guaranteed {
            let mut empty: Vec<usize> = (0..rooms.len()).filter(|&i| !holds_treasure[i]).collect();
            empty.shuffle(rng);
            for i in empty {
                if placed >= guaranteed {
                    break;
                }
                if self.place_treasure(grid, &rooms[i], rng) {
                    placed += 1;
                }
            }
        }
        placed
    }

    /// Marks corridor mouths just outside a room as doors.
    ///
    /// A mouth is a floor cell touching the room's bounding box from outside,
    /// facing a carved room cell, with wall on both sides across the corridor.
    fn place_doors(
        &self,
        grid: &mut TileGrid,
        rooms: &[Room],
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> usize {
        if config.door_chance <= 0.0 {
            return 0;
        }

        let mut doors = 0;
        for room in rooms {
            let ring = room.inflated(1);
            let top_left = room.top_left;
            let bottom_right = room.bottom_right();

            for pos in ring.all_positions() {
                if !ring.is_border(pos) || grid.tile_type(pos) != TileType::Floor {
                    continue;
                }
                let outside_x = pos.x < top_left.x || pos.x > bottom_right.x;
                let outside_y = pos.y < top_left.y || pos.y > bottom_right.y;
                if outside_x == outside_y {
                    // Ring corners have no room cell directly beside them.
                    continue;
                }
                if rooms.iter().any(|other| other.contains(pos)) {
                    continue;
                }

                let (inward, flanks) = if outside_y {
                    let step = if pos.y < top_left.y { 1 } else { -1 };
                    (
                        Position::new(pos.x, pos.y + step),
                        [Position::new(pos.x - 1, pos.y), Position::new(pos.x + 1, pos.y)],
                    )
                } else {
                    let step = if pos.x < top_left.x { 1 } else { -1 };
                    (
                        Position::new(pos.x + step, pos.y),
                        [Position::new(pos.x, pos.y - 1), Position::new(pos.x, pos.y + 1)],
                    )
                };

                let facing_room = room.is_floor(inward) && grid.tile_type(inward).is_passable();
                let walled = flanks.iter().all(|&flank| grid.tile_type(flank) == TileType::Wall);
                if facing_room && walled && rng.gen_bool(config.door_chance) {
                    grid.set_tile(pos, TileType::Door);
                    doors += 1;
                }
            }
        }
        doors
    }
}

impl GenerationPass for FeatureDecorator {
    fn apply(
        &self,
        grid: &mut TileGrid,
        rooms: &mut Vec<Room>,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> DelveResult<()> {
        let treasures = self.scatter_treasure(grid, rooms, config, rng);
        let doors = self.place_doors(grid, rooms, config, rng);
        debug!("Decorated {} rooms: {} treasures, {} doors", rooms.len(), treasures, doors);
        Ok(())
    }

    fn validate(&self, grid: &TileGrid, rooms: &[Room], _config: &GenerationConfig) -> DelveResult<()> {
        for room in rooms {
            let count = room
                .all_positions()
                .into_iter()
                .filter(|&pos| grid.tile_type(pos) == TileType::Treasure)
                .count();
            if count > 1 {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} holds {} treasures",
                    room.id, count
                )));
            }
        }

        for pos in grid.positions_of(TileType::Treasure) {
            let inside = rooms
                .iter()
                .any(|room| room.is_floor(pos) && !room.is_border(pos));
            if !inside {
                return Err(DelveError::GenerationFailed(format!(
                    "Treasure at ({}, {}) is outside every room interior",
                    pos.x, pos.y
                )));
            }
        }
        Ok(())
    }

    fn pass_type(&self) -> &'static str {
        "FeatureDecorator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::{self, create_rng};
    use crate::generation::{CorridorConnector, RoomPlacer};

    fn decorated(config: &GenerationConfig) -> (TileGrid, Vec<Room>) {
        let mut grid = TileGrid::new(config.width, config.height, config.tile_size);
        let mut rooms = Vec::new();
        let mut rng = create_rng(config);
        RoomPlacer::new().apply(&mut grid, &mut rooms, config, &mut rng).unwrap();
        CorridorConnector::new().apply(&mut grid, &mut rooms, config, &mut rng).unwrap();
        FeatureDecorator::new().apply(&mut grid, &mut rooms, config, &mut rng).unwrap();
        (grid, rooms)
    }

    #[test]
    fn test_treasure_stays_inside_rooms() {
        for seed in 0..30 {
            let config = GenerationConfig::new(seed);
            let (grid, rooms) = decorated(&config);
            assert!(FeatureDecorator::new().validate(&grid, &rooms, &config).is_ok());
            assert!(grid.count(TileType::Treasure) <= rooms.len());
        }
    }

    #[test]
    fn test_every_room_gets_treasure_at_full_chance() {
        let config = GenerationConfig {
            treasure_chance: 1.0,
            ..GenerationConfig::new(17)
        };
        let (grid, rooms) = decorated(&config);
        assert_eq!(grid.count(TileType::Treasure), rooms.len());
    }

    #[test]
    fn test_guaranteed_treasure_top_up() {
        let config = GenerationConfig {
            treasure_chance: 0.0,
            guaranteed_treasures: 2,
            min_rooms: 4,
            ..GenerationConfig::new(23)
        };
        let (grid, rooms) = decorated(&config);
        assert!(rooms.len() >= 2);
        assert_eq!(grid.count(TileType::Treasure), 2);

        let none = GenerationConfig {
            guaranteed_treasures: 0,
            ..config
        };
        let (grid, _) = decorated(&none);
        assert_eq!(grid.count(TileType::Treasure), 0);
    }

    #[test]
    fn test_treasure_avoids_room_centers() {
        let config = GenerationConfig {
            treasure_chance: 1.0,
            ..GenerationConfig::new(31)
        };
        let (grid, rooms) = decorated(&config);
        for room in &rooms {
            assert_ne!(grid.tile_type(room.center()), TileType::Treasure);
        }
    }

    #[test]
    fn test_doors_sit_outside_rooms_and_keep_connectivity() {
        let config = GenerationConfig {
            door_chance: 1.0,
            ..GenerationConfig::new(12)
        };
        for seed in 0..10 {
            let config = GenerationConfig { seed, ..config.clone() };
            let (grid, rooms) = decorated(&config);
            for door in grid.positions_of(TileType::Door) {
                assert!(rooms.iter().all(|room| !room.contains(door)));
                assert!(rooms.iter().any(|room| room.inflated(1).is_border(door)));
            }
            assert!(utils::validate_connectivity(&grid, &rooms).is_ok());
        }
    }

    #[test]
    fn test_no_doors_when_disabled() {
        let config = GenerationConfig {
            door_chance: 0.0,
            ..GenerationConfig::new(12)
        };
        let (grid, _) = decorated(&config);
        assert_eq!(grid.count(TileType::Door), 0);
    }
}
