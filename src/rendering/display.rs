//! # Display Management
//!
//! Draws the dungeon, enemies, player and HUD with macroquad primitives.

use crate::game::{GamePhase, GameSession, Position};
use crate::rendering::UI;
use crate::{DelveResult, TileType};
use macroquad::prelude::*;

/// Height reserved for the message strip at the bottom of the screen.
const MESSAGE_AREA_HEIGHT: f32 = 90.0;

/// Macroquad display manager for the game.
///
/// Tiles are drawn as coloured squares in a viewport that follows the player.
/// The HUD panel on the right shows level progress and the controls.
pub struct MacroquadDisplay {
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,
    /// On-screen tile edge in pixels
    pub tile_size: f32,
    /// Map viewport offset x in tiles
    pub viewport_x: i32,
    /// Map viewport offset y in tiles
    pub viewport_y: i32,
    /// Map viewport width in tiles
    pub map_width: i32,
    /// Map viewport height in tiles
    pub map_height: i32,
    /// UI panel width in pixels
    pub ui_panel_width: f32,
    /// Overlay screens
    pub ui: UI,
}

impl MacroquadDisplay {
    /// Creates a display sized to the current window.
    pub fn new(tile_size: f32) -> Self {
        let mut display = Self {
            screen_width: 0.0,
            screen_height: 0.0,
            tile_size,
            viewport_x: 0,
            viewport_y: 0,
            map_width: 0,
            map_height: 0,
            ui_panel_width: 280.0,
            ui: UI::new(),
        };
        display.resize(screen_width(), screen_height());
        display
    }

    /// Recomputes the viewport for a new window size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
        self.map_width = ((width - self.ui_panel_width) / self.tile_size).max(1.0) as i32;
        self.map_height = ((height - MESSAGE_AREA_HEIGHT) / self.tile_size).max(1.0) as i32;
    }

    /// Renders the complete game screen for the session's current phase.
    pub fn render_game(&mut self, session: &GameSession) -> DelveResult<()> {
        let (width, height) = (screen_width(), screen_height());
        if width != self.screen_width || height != self.screen_height {
            self.resize(width, height);
        }

        clear_background(BLACK);

        if session.phase() == GamePhase::Menu {
            self.ui.render_menu(self.screen_width, self.screen_height);
            return Ok(());
        }

        if let Some(player) = session.player_position() {
            self.center_viewport_on_position(player, session);
        }
        self.render_map(session);
        self.render_hud(session);
        self.render_messages(session);

        match session.phase() {
            GamePhase::Paused => self.ui.render_pause(self.screen_width, self.screen_height),
            GamePhase::LevelComplete => self.ui.render_level_complete(
                &session.snapshot(),
                session.score(),
                self.screen_width,
                self.screen_height,
            ),
            GamePhase::Menu | GamePhase::Playing => {}
        }
        Ok(())
    }

    /// Centers the viewport on `position`, clamped to the map edges.
    pub fn center_viewport_on_position(&mut self, position: Position, session: &GameSession) {
        let grid = session.dungeon().grid();
        self.viewport_x = viewport_origin(position.x, self.map_width, grid.width() as i32);
        self.viewport_y = viewport_origin(position.y, self.map_height, grid.height() as i32);
    }

    fn render_map(&self, session: &GameSession) {
        let grid = session.dungeon().grid();
        for screen_y in 0..self.map_height {
            for screen_x in 0..self.map_width {
                let cell = Position::new(self.viewport_x + screen_x, self.viewport_y + screen_y);
                let Some(tile) = grid.tile(cell) else {
                    continue;
                };
                self.fill_cell(screen_x, screen_y, tile_color(tile.tile_type));
            }
        }

        for enemy in session.living_enemies() {
            self.draw_marker(enemy.position, RED);
        }
        if let Some(player) = session.player_position() {
            self.draw_marker(player, YELLOW);
        }
    }

    fn fill_cell(&self, screen_x: i32, screen_y: i32, color: Color) {
        draw_rectangle(
            screen_x as f32 * self.tile_size,
            screen_y as f32 * self.tile_size,
            self.tile_size - 1.0,
            self.tile_size - 1.0,
            color,
        );
    }

    /// Draws a circle over a map cell if it is on screen.
    fn draw_marker(&self, cell: Position, color: Color) {
        let screen_x = cell.x - self.viewport_x;
        let screen_y = cell.y - self.viewport_y;
        if screen_x < 0 || screen_y < 0 || screen_x >= self.map_width || screen_y >= self.map_height {
            return;
        }
        let half = self.tile_size / 2.0;
        draw_circle(
            screen_x as f32 * self.tile_size + half,
            screen_y as f32 * self.tile_size + half,
            half * 0.7,
            color,
        );
    }

    fn render_hud(&self, session: &GameSession) {
        let panel_x = self.map_width as f32 * self.tile_size + 10.0;
        let line_height = 20.0;
        let mut line_y = 24.0;
        let snapshot = session.snapshot();

        draw_text("DELVE", panel_x, line_y, 28.0, GOLD);
        line_y += line_height * 2.0;

        let lines = [
            (format!("Level: {}", snapshot.level), WHITE),
            (format!("Score: {}", session.score()), WHITE),
            (
                format!(
                    "Treasure: {}/{}",
                    snapshot.treasures_collected, snapshot.treasures_required
                ),
                GOLD,
            ),
            (
                format!(
                    "Enemies: {}/{}",
                    snapshot.enemies_killed, snapshot.enemies_required
                ),
                RED,
            ),
            (format!("Rooms: {}", session.dungeon().room_count()), GRAY),
        ];
        for (text, color) in &lines {
            draw_text(text, panel_x, line_y, 18.0, *color);
            line_y += line_height;
        }
        line_y += line_height;

        draw_text("Controls:", panel_x, line_y, 18.0, GREEN);
        line_y += line_height;
        for control in UI::CONTROLS {
            draw_text(control, panel_x, line_y, 16.0, WHITE);
            line_y += line_height;
        }
    }

    fn render_messages(&self, session: &GameSession) {
        let message_area_y = self.screen_height - MESSAGE_AREA_HEIGHT + 20.0;
        let line_height = 18.0;

        draw_rectangle(
            0.0,
            message_area_y - 10.0,
            self.screen_width,
            MESSAGE_AREA_HEIGHT,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );

        for (i, message) in session.recent_messages(3).iter().enumerate() {
            let y = message_area_y + i as f32 * line_height;
            draw_text(message, 10.0, y, 16.0, WHITE);
        }
    }
}

/// Fill colour for a tile type.
pub fn tile_color(tile_type: TileType) -> Color {
    match tile_type {
        TileType::Wall => DARKGRAY,
        TileType::Floor => Color::new(0.18, 0.16, 0.14, 1.0),
        TileType::Door => BROWN,
        TileType::Treasure => GOLD,
        TileType::Spawn => DARKGREEN,
    }
}

/// First visible cell along one axis, keeping `center` in the middle where
/// the map allows it.
pub fn viewport_origin(center: i32, view_extent: i32, map_extent: i32) -> i32 {
    if map_extent <= view_extent {
        return 0;
    }
    (center - view_extent / 2).clamp(0, map_extent - view_extent)
}
