//! # Room Placement
//!
//! Rejection-sampled room placement with shape variation.
//!
//! Candidates are drawn uniformly inside the grid, rejected when their
//! buffered bounding box overlaps an accepted room, and carved with one of
//! three shapes picked by weight. Placement stops at the drawn room target or
//! when the attempt budget runs out, whichever comes first.

use super::{Corner, GenerationConfig, GenerationPass, Room, RoomShape, TileGrid, TileType};
use crate::{DelveError, DelveResult, Position};
use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Places and carves rooms.
#[derive(Debug, Clone, Default)]
pub struct RoomPlacer;

impl RoomPlacer {
    pub fn new() -> Self {
        Self
    }

    /// Samples a candidate rectangle, or `None` if the sampled size cannot fit.
    ///
    /// The room plus a one-tile wall border always stays inside the grid.
    fn sample_candidate(
        &self,
        grid: &TileGrid,
        config: &GenerationConfig,
        rng: &mut StdRng,
        id: u32,
    ) -> Option<Room> {
        let width = rng.gen_range(config.min_room_size..=config.max_room_size);
        let height = rng.gen_range(config.min_room_size..=config.max_room_size);

        let max_x = grid.width() as i32 - 1 - width as i32;
        let max_y = grid.height() as i32 - 1 - height as i32;
        if max_x < 1 || max_y < 1 {
            return None;
        }

        let x = rng.gen_range(1..=max_x);
        let y = rng.gen_range(1..=max_y);
        Some(Room::new(id, Position::new(x, y), width, height))
    }

    /// Picks a shape for an accepted room by weighted draw.
    fn choose_shape(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<RoomShape> {
        let weights = [
            config.rectangle_weight,
            config.l_shape_weight,
            config.cross_shape_weight,
        ];
        let index = WeightedIndex::new(weights)
            .map_err(|e| DelveError::InvalidConfig(format!("room shape weights: {}", e)))?;

        Ok(match index.sample(rng) {
            0 => RoomShape::Rectangle,
            1 => RoomShape::LShape {
                cut: *Corner::ALL.choose(rng).unwrap_or(&Corner::TopRight),
            },
            _ => RoomShape::Cross,
        })
    }

    /// Carves every floor cell of the room's shape.
    fn carve_room(&self, grid: &mut TileGrid, room: &Room) {
        for pos in room.floor_positions() {
            grid.set_tile(pos, TileType::Floor);
        }
    }

    /// Stamps a pillar or alcove wall into a large rectangular room.
    ///
    /// The pillar sits diagonally next to the centre, up and to the left; the
    /// alcove is a two-cell wall one row in from the top-left corner. Neither
    /// touches the centre cell or the border ring, so the room stays connected.
    fn add_room_feature(&self, grid: &mut TileGrid, room: &Room, rng: &mut StdRng) {
        let center = room.center();
        if rng.gen_bool(0.5) {
            grid.set_tile(Position::new(center.x - 1, center.y - 1), TileType::Wall);
        } else {
            let row = room.top_left.y + 2;
            grid.set_tile(Position::new(room.top_left.x + 1, row), TileType::Wall);
            grid.set_tile(Position::new(room.top_left.x + 2, row), TileType::Wall);
        }
    }

    fn wants_feature(&self, room: &Room, config: &GenerationConfig, rng: &mut StdRng) -> bool {
        room.shape == RoomShape::Rectangle
            && room.width >= config.feature_min_room_size
            && room.height >= config.feature_min_room_size
            && rng.gen_bool(config.room_feature_chance)
    }
}

impl GenerationPass for RoomPlacer {
    fn apply(
        &self,
        grid: &mut TileGrid,
        rooms: &mut Vec<Room>,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> DelveResult<()> {
        let target = rng.gen_range(config.min_rooms..=config.max_rooms) as usize;
        let mut attempts = 0;

        while rooms.len() < target && attempts < config.max_placement_attempts {
            attempts += 1;

            let Some(candidate) = self.sample_candidate(grid, config, rng, rooms.len() as u32)
            else {
                continue;
            };

            let buffered = candidate.inflated(config.room_buffer);
            if rooms.iter().any(|existing| buffered.intersects(existing)) {
                continue;
            }

            let room = candidate.with_shape(self.choose_shape(config, rng)?);
            self.carve_room(grid, &room);
            if self.wants_feature(&room, config, rng) {
                self.add_room_feature(grid, &room, rng);
            }
            rooms.push(room);
        }

        if rooms.len() < target {
            debug!(
                "Placed {} of {} rooms after {} attempts",
                rooms.len(),
                target,
                attempts
            );
        }
        Ok(())
    }

    fn validate(&self, grid: &TileGrid, rooms: &[Room], _config: &GenerationConfig) -> DelveResult<()> {
        for (i, room) in rooms.iter().enumerate() {
            let bottom_right = room.bottom_right();
            if room.top_left.x < 1
                || room.top_left.y < 1
                || bottom_right.x > grid.width() as i32 - 2
                || bottom_right.y > grid.height() as i32 - 2
            {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} leaves the grid interior",
                    room.id
                )));
            }
            if let Some(other) = rooms[i + 1..].iter().find(|other| room.intersects(other)) {
                return Err(DelveError::GenerationFailed(format!(
                    "Rooms {} and {} overlap",
                    room.id, other.id
                )));
            }
        }
        Ok(())
    }

    fn pass_type(&self) -> &'static str {
        "RoomPlacer"
    }
}
