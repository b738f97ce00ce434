//! # User Interface Elements
//!
//! Full-screen and overlay panels: the title menu, pause and level-complete screens.

use crate::ProgressionSnapshot;
use macroquad::prelude::*;

/// Overlay renderer.
pub struct UI;

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI {
    /// Key help shown in the HUD and on the menu.
    pub const CONTROLS: [&'static str; 5] = [
        "WASD/Arrows/hjkl: Move",
        "Bump enemy: Attack",
        "P/Space: Pause",
        "Enter: Confirm",
        "ESC: Menu / Quit",
    ];

    pub fn new() -> Self {
        Self
    }

    /// Title screen.
    pub fn render_menu(&self, width: f32, height: f32) {
        let mut y = height * 0.3;
        draw_centered("DELVE", width, y, 64.0, GOLD);
        y += 60.0;
        draw_centered("Press Enter to start", width, y, 28.0, WHITE);
        y += 50.0;
        for line in Self::CONTROLS {
            draw_centered(line, width, y, 20.0, GRAY);
            y += 24.0;
        }
    }

    /// Dims the map and shows the pause banner.
    pub fn render_pause(&self, width: f32, height: f32) {
        draw_rectangle(0.0, 0.0, width, height, Color::new(0.0, 0.0, 0.0, 0.6));
        draw_centered("PAUSED", width, height * 0.45, 48.0, WHITE);
        draw_centered("P to resume, ESC for menu", width, height * 0.45 + 40.0, 22.0, GRAY);
    }

    /// Level summary shown between levels.
    pub fn render_level_complete(
        &self,
        snapshot: &ProgressionSnapshot,
        score: u64,
        width: f32,
        height: f32,
    ) {
        draw_rectangle(0.0, 0.0, width, height, Color::new(0.0, 0.0, 0.0, 0.7));
        let mut y = height * 0.35;
        draw_centered("LEVEL COMPLETE", width, y, 48.0, GOLD);
        y += 50.0;
        let lines = [
            format!(
                "Treasure: {}/{}",
                snapshot.treasures_collected, snapshot.treasures_required
            ),
            format!("Enemies defeated: {}", snapshot.enemies_killed),
            format!("Score: {}", score),
        ];
        for line in &lines {
            draw_centered(line, width, y, 24.0, WHITE);
            y += 30.0;
        }
        y += 10.0;
        draw_centered(
            &format!("Press Enter to descend to level {}", snapshot.level),
            width,
            y,
            24.0,
            GREEN,
        );
    }
}

/// Draws `text` horizontally centred at baseline `y`.
fn draw_centered(text: &str, width: f32, y: f32, font_size: f32, color: Color) {
    let dimensions = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, (width - dimensions.width) / 2.0, y, font_size, color);
}
