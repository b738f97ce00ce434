//! # Corridor Connection
//!
//! Connects rooms with a minimum spanning tree of carved corridors.
//!
//! Rooms are ordered by centre x and joined greedily: starting from the first
//! room, the closest (unconnected, connected) pair by Euclidean centre
//! distance is joined until every room is in the tree. Each tree edge gets a
//! randomly chosen corridor pattern. Shortcuts and dead ends are added
//! afterwards; they only ever add floor, so the tree's reachability holds.

use super::{utils, GenerationConfig, GenerationPass, Room, TileGrid, TileType};
use crate::{DelveError, DelveResult, Direction, Position};
use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Shapes a corridor between two room centres can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorridorPattern {
    /// Horizontal then vertical, or the reverse
    LShaped,
    /// Four segments through a jittered midpoint
    Winding,
    /// An L-shaped path with a parallel strip on long spans
    Widened,
}

/// Carves corridors between placed rooms.
#[derive(Debug, Clone, Default)]
pub struct CorridorConnector;

impl CorridorConnector {
    pub fn new() -> Self {
        Self
    }

    /// Builds the spanning tree over `centers`, starting from index 0.
    ///
    /// Returns `(connected, newly_connected)` index pairs in the order they
    /// were added; there are always `centers.len() - 1` of them.
    pub fn spanning_tree(centers: &[Position]) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(centers.len().saturating_sub(1));
        if centers.is_empty() {
            return edges;
        }

        let mut connected = vec![false; centers.len()];
        connected[0] = true;

        for _ in 1..centers.len() {
            let mut best: Option<(usize, usize, f64)> = None;
            let unconnected = (0..centers.len()).filter(|&i| !connected[i]);
            for to in unconnected {
                for from in (0..centers.len()).filter(|&i| connected[i]) {
                    let distance = centers[from].euclidean_distance(centers[to]);
                    if best.map_or(true, |(_, _, d)| distance < d) {
                        best = Some((from, to, distance));
                    }
                }
            }
            if let Some((from, to, _)) = best {
                connected[to] = true;
                edges.push((from, to));
            }
        }

        edges
    }

    fn choose_pattern(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> DelveResult<CorridorPattern> {
        let weights = [
            config.l_corridor_weight,
            config.winding_corridor_weight,
            config.wide_corridor_weight,
        ];
        let index = WeightedIndex::new(weights)
            .map_err(|e| DelveError::InvalidConfig(format!("corridor weights: {}", e)))?;

        Ok(match index.sample(rng) {
            0 => CorridorPattern::LShaped,
            1 => CorridorPattern::Winding,
            _ => CorridorPattern::Widened,
        })
    }

    /// Carves a corridor from `start` to `end` with the given pattern.
    pub fn carve(
        &self,
        grid: &mut TileGrid,
        pattern: CorridorPattern,
        start: Position,
        end: Position,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) {
        match pattern {
            CorridorPattern::LShaped => {
                let horizontal_first = rng.gen_bool(0.5);
                carve_l(grid, start, end, horizontal_first);
            }
            CorridorPattern::Winding => {
                let jitter_x = (start.x - end.x).abs() / 4;
                let jitter_y = (start.y - end.y).abs() / 4;
                let mid = Position::new(
                    ((start.x + end.x) / 2 + rng.gen_range(-jitter_x..=jitter_x))
                        .clamp(1, grid.width() as i32 - 2),
                    ((start.y + end.y) / 2 + rng.gen_range(-jitter_y..=jitter_y))
                        .clamp(1, grid.height() as i32 - 2),
                );
                carve_winding(grid, start, mid, end);
            }
            CorridorPattern::Widened => {
                let horizontal_first = rng.gen_bool(0.5);
                carve_l(grid, start, end, horizontal_first);
                if start.manhattan_distance(end) > config.wide_corridor_span {
                    if horizontal_first {
                        carve_horizontal(grid, start.x, end.x, start.y + 1);
                        carve_vertical(grid, start.y, end.y, end.x + 1);
                    } else {
                        carve_vertical(grid, start.y, end.y, start.x + 1);
                        carve_horizontal(grid, start.x, end.x, end.y + 1);
                    }
                }
            }
        }
    }

    /// Adds up to `max_shortcuts` loops between nearby rooms.
    fn add_shortcuts(
        &self,
        grid: &mut TileGrid,
        centers: &[Position],
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> usize {
        let wanted = rng.gen_range(0..=config.max_shortcuts);
        self.carve_shortcuts(grid, centers, wanted, rng)
    }

    /// Makes `attempts` random pair draws and joins pairs closer than a third
    /// of the grid width. Levels with fewer than three rooms get none.
    fn carve_shortcuts(
        &self,
        grid: &mut TileGrid,
        centers: &[Position],
        attempts: u32,
        rng: &mut StdRng,
    ) -> usize {
        if centers.len() < 3 {
            return 0;
        }

        let max_distance = grid.width() as f64 / 3.0;
        let mut carved = 0;
        for _ in 0..attempts {
            let a = rng.gen_range(0..centers.len());
            let b = rng.gen_range(0..centers.len());
            if a == b || centers[a].euclidean_distance(centers[b]) >= max_distance {
                continue;
            }
            let horizontal_first = rng.gen_bool(0.5);
            carve_l(grid, centers[a], centers[b], horizontal_first);
            carved += 1;
        }
        carved
    }

    /// Adds dead-end stubs leaving random rooms in random directions.
    fn add_dead_ends(
        &self,
        grid: &mut TileGrid,
        rooms: &[&Room],
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> usize {
        let wanted = rng.gen_range(config.min_dead_ends..=config.max_dead_ends);
        let mut carved = 0;

        for _ in 0..wanted {
            let (Some(room), Some(&direction)) = (rooms.choose(rng), Direction::ALL.choose(rng))
            else {
                break;
            };
            let length = rng.gen_range(config.dead_end_min_length..=config.dead_end_max_length);
            let half_extent = if direction.is_horizontal() {
                room.width / 2
            } else {
                room.height / 2
            };

            let start = room.center();
            let raw_end = start.step(direction, (half_extent + length) as i32);
            // Stubs stop short of the outer wall ring.
            let end = Position::new(
                raw_end.x.clamp(1, grid.width() as i32 - 2),
                raw_end.y.clamp(1, grid.height() as i32 - 2),
            );

            if direction.is_horizontal() {
                carve_horizontal(grid, start.x, end.x, start.y);
            } else {
                carve_vertical(grid, start.y, end.y, start.x);
            }
            carved += 1;
        }
        carved
    }
}

impl GenerationPass for CorridorConnector {
    fn apply(
        &self,
        grid: &mut TileGrid,
        rooms: &mut Vec<Room>,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> DelveResult<()> {
        if rooms.is_empty() {
            return Ok(());
        }

        let mut ordered: Vec<&Room> = rooms.iter().collect();
        ordered.sort_by_key(|room| room.center().x);
        let centers: Vec<Position> = ordered.iter().map(|room| room.center()).collect();

        let edges = Self::spanning_tree(&centers);
        for &(from, to) in &edges {
            let pattern = self.choose_pattern(config, rng)?;
            self.carve(grid, pattern, centers[from], centers[to], config, rng);
        }

        let shortcuts = self.add_shortcuts(grid, &centers, config, rng);
        let dead_ends = self.add_dead_ends(grid, &ordered, config, rng);

        debug!(
            "Connected {} rooms with {} tree edges, {} shortcuts, {} dead ends",
            rooms.len(),
            edges.len(),
            shortcuts,
            dead_ends
        );
        Ok(())
    }

    fn validate(&self, grid: &TileGrid, rooms: &[Room], _config: &GenerationConfig) -> DelveResult<()> {
        utils::validate_connectivity(grid, rooms)
    }

    fn pass_type(&self) -> &'static str {
        "CorridorConnector"
    }
}

/// Carves a horizontal run at row `y`, clipped to the grid.
fn carve_horizontal(grid: &mut TileGrid, x1: i32, x2: i32, y: i32) {
    if y < 0 || y >= grid.height() as i32 {
        return;
    }
    let from = x1.min(x2).max(0);
    let to = x1.max(x2).min(grid.width() as i32 - 1);
    for x in from..=to {
        grid.set_tile(Position::new(x, y), TileType::Floor);
    }
}

/// Carves a vertical run at column `x`, clipped to the grid.
fn carve_vertical(grid: &mut TileGrid, y1: i32, y2: i32, x: i32) {
    if x < 0 || x >= grid.width() as i32 {
        return;
    }
    let from = y1.min(y2).max(0);
    let to = y1.max(y2).min(grid.height() as i32 - 1);
    for y in from..=to {
        grid.set_tile(Position::new(x, y), TileType::Floor);
    }
}

fn carve_l(grid: &mut TileGrid, start: Position, end: Position, horizontal_first: bool) {
    if horizontal_first {
        carve_horizontal(grid, start.x, end.x, start.y);
        carve_vertical(grid, start.y, end.y, end.x);
    } else {
        carve_vertical(grid, start.y, end.y, start.x);
        carve_horizontal(grid, start.x, end.x, end.y);
    }
}

fn carve_winding(grid: &mut TileGrid, start: Position, mid: Position, end: Position) {
    carve_horizontal(grid, start.x, mid.x, start.y);
    carve_vertical(grid, start.y, mid.y, mid.x);
    carve_horizontal(grid, mid.x, end.x, mid.y);
    carve_vertical(grid, mid.y, end.y, end.x);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{RoomPlacer, utils::create_rng};
    use std::collections::HashSet;

    #[test]
    fn test_spanning_tree_covers_every_room() {
        let centers = vec![
            Position::new(2, 2),
            Position::new(10, 3),
            Position::new(4, 20),
            Position::new(30, 30),
            Position::new(11, 9),
        ];
        let edges = CorridorConnector::spanning_tree(&centers);
        assert_eq!(edges.len(), centers.len() - 1);

        let mut reached: HashSet<usize> = HashSet::from([0]);
        for (from, to) in edges {
            assert!(reached.contains(&from), "edge starts outside the tree");
            assert!(reached.insert(to), "room {} connected twice", to);
        }
        assert_eq!(reached.len(), centers.len());
    }

    #[test]
    fn test_spanning_tree_picks_nearest_room() {
        let centers = vec![Position::new(0, 0), Position::new(50, 0), Position::new(3, 0)];
        let edges = CorridorConnector::spanning_tree(&centers);
        assert_eq!(edges, vec![(0, 2), (2, 1)]);
    }

    #[test]
    fn test_spanning_tree_edge_cases() {
        assert!(CorridorConnector::spanning_tree(&[]).is_empty());
        assert!(CorridorConnector::spanning_tree(&[Position::new(1, 1)]).is_empty());
    }

    #[test]
    fn test_every_pattern_connects_endpoints() {
        let config = GenerationConfig {
            wide_corridor_span: 4,
            ..GenerationConfig::new(1)
        };
        let mut rng = create_rng(&config);
        let start = Position::new(3, 4);
        let end = Position::new(25, 17);

        for pattern in [
            CorridorPattern::LShaped,
            CorridorPattern::Winding,
            CorridorPattern::Widened,
        ] {
            for _ in 0..10 {
                let mut grid = TileGrid::new(30, 20, 32.0);
                CorridorConnector::new().carve(&mut grid, pattern, start, end, &config, &mut rng);
                let reached = utils::reachable_from(&grid, start);
                assert!(reached.contains(&end), "{:?} left endpoints apart", pattern);
            }
        }
    }

    #[test]
    fn test_widened_corridor_adds_parallel_strip() {
        let config = GenerationConfig {
            wide_corridor_span: 4,
            ..GenerationConfig::new(8)
        };
        let mut rng = create_rng(&config);
        let mut narrow = TileGrid::new(30, 20, 32.0);
        let mut wide = TileGrid::new(30, 20, 32.0);
        let (start, end) = (Position::new(3, 4), Position::new(25, 17));
        let connector = CorridorConnector::new();

        connector.carve(&mut narrow, CorridorPattern::LShaped, start, end, &config, &mut rng);
        connector.carve(&mut wide, CorridorPattern::Widened, start, end, &config, &mut rng);
        assert!(wide.count(TileType::Floor) > narrow.count(TileType::Floor));
    }

    #[test]
    fn test_carving_clips_to_grid() {
        let mut grid = TileGrid::new(10, 10, 32.0);
        carve_horizontal(&mut grid, -5, 20, 3);
        carve_vertical(&mut grid, -5, 20, 4);
        carve_horizontal(&mut grid, 0, 9, 42);
        assert_eq!(grid.count(TileType::Floor), 10 + 10 - 1);
    }

    #[test]
    fn test_connector_joins_placed_rooms() {
        for seed in 0..25 {
            let config = GenerationConfig::new(seed);
            let mut grid = TileGrid::new(config.width, config.height, config.tile_size);
            let mut rooms = Vec::new();
            let mut rng = create_rng(&config);
            RoomPlacer::new().apply(&mut grid, &mut rooms, &config, &mut rng).unwrap();
            let connector = CorridorConnector::new();
            connector.apply(&mut grid, &mut rooms, &config, &mut rng).unwrap();
            assert!(connector.validate(&grid, &rooms, &config).is_ok(), "seed {}", seed);
        }
    }

    #[test]
    fn test_shortcuts_need_three_rooms() {
        let mut grid = TileGrid::new(60, 45, 32.0);
        let mut rng = create_rng(&GenerationConfig::new(3));
        let centers = [Position::new(5, 5), Position::new(8, 5)];

        let carved = CorridorConnector::new().carve_shortcuts(&mut grid, &centers, 50, &mut rng);
        assert_eq!(carved, 0);
        assert_eq!(grid.count(TileType::Floor), 0);
    }

    #[test]
    fn test_shortcuts_skip_pairs_at_distance_limit() {
        // A 60 wide grid allows shortcuts shorter than 20 tiles.
        let mut grid = TileGrid::new(60, 45, 32.0);
        let mut rng = create_rng(&GenerationConfig::new(3));
        let centers = [Position::new(5, 5), Position::new(25, 5), Position::new(5, 25)];

        let carved = CorridorConnector::new().carve_shortcuts(&mut grid, &centers, 100, &mut rng);
        assert_eq!(carved, 0);
        assert_eq!(grid.count(TileType::Floor), 0);
    }

    #[test]
    fn test_shortcuts_join_pairs_inside_distance_limit() {
        let mut grid = TileGrid::new(60, 45, 32.0);
        let mut rng = create_rng(&GenerationConfig::new(3));
        let (near_a, near_b, far) = (Position::new(5, 5), Position::new(24, 5), Position::new(5, 40));
        let centers = [near_a, near_b, far];

        let carved = CorridorConnector::new().carve_shortcuts(&mut grid, &centers, 100, &mut rng);
        assert!(carved >= 1);
        assert!(utils::reachable_from(&grid, near_a).contains(&near_b));
        assert_eq!(grid.tile_type(far), TileType::Wall);
    }

    #[test]
    fn test_shortcut_count_capped_by_config() {
        let centers = [Position::new(5, 5), Position::new(8, 5), Position::new(5, 9)];
        let connector = CorridorConnector::new();

        for seed in 0..20 {
            let config = GenerationConfig {
                max_shortcuts: 2,
                ..GenerationConfig::new(seed)
            };
            let mut grid = TileGrid::new(60, 45, 32.0);
            let mut rng = create_rng(&config);
            assert!(connector.add_shortcuts(&mut grid, &centers, &config, &mut rng) <= 2);

            let none = GenerationConfig {
                max_shortcuts: 0,
                ..config
            };
            assert_eq!(connector.add_shortcuts(&mut grid, &centers, &none, &mut rng), 0);
        }
    }

    #[test]
    fn test_dead_ends_keep_outer_ring_solid() {
        let config = GenerationConfig {
            min_dead_ends: 3,
            max_dead_ends: 3,
            dead_end_min_length: 40,
            dead_end_max_length: 40,
            ..GenerationConfig::new(4)
        };
        let mut grid = TileGrid::new(config.width, config.height, config.tile_size);
        let mut rooms = Vec::new();
        let mut rng = create_rng(&config);
        RoomPlacer::new().apply(&mut grid, &mut rooms, &config, &mut rng).unwrap();
        CorridorConnector::new().apply(&mut grid, &mut rooms, &config, &mut rng).unwrap();

        let (w, h) = (config.width as i32, config.height as i32);
        for x in 0..w {
            assert_eq!(grid.tile_type(Position::new(x, 0)), TileType::Wall);
            assert_eq!(grid.tile_type(Position::new(x, h - 1)), TileType::Wall);
        }
        for y in 0..h {
            assert_eq!(grid.tile_type(Position::new(0, y)), TileType::Wall);
            assert_eq!(grid.tile_type(Position::new(w - 1, y)), TileType::Wall);
        }
    }
}
