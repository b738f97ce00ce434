//! # Level Progression
//!
//! Per-level counters, the victory rule and level transitions.
//!
//! The controller is a two-phase state machine. While `Playing` it absorbs
//! treasure and kill events and checks the victory rule on every
//! [`LevelProgressionController::update`]. The first successful check
//! increments the level and parks the machine in `LevelComplete` until the
//! caller has generated the next dungeon and calls
//! [`LevelProgressionController::resume_next_level`].

use crate::{DelveError, DelveResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Tuning for level difficulty and the victory rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Treasures that must be collected before any victory
    pub min_treasures_for_victory: u32,
    /// Enemies spawned on level 1
    pub base_enemies: u32,
    /// Extra enemies per level after the first
    pub enemies_per_level: u32,
    /// Upper bound on enemies per level
    pub max_enemies: u32,
    /// Share of rooms that count towards the level's treasure total
    pub treasure_ratio: f64,
    /// Floor of the level's treasure total
    pub min_level_treasures: u32,
}

impl ProgressionConfig {
    pub fn new() -> Self {
        Self {
            min_treasures_for_victory: 2,
            base_enemies: 8,
            enemies_per_level: 2,
            max_enemies: 20,
            treasure_ratio: 0.3,
            min_level_treasures: 3,
        }
    }

    pub fn validate(&self) -> DelveResult<()> {
        if self.base_enemies > self.max_enemies {
            return Err(DelveError::InvalidConfig(format!(
                "base enemies {} exceed the maximum {}",
                self.base_enemies, self.max_enemies
            )));
        }
        if !(0.0..=1.0).contains(&self.treasure_ratio) {
            return Err(DelveError::InvalidConfig(format!(
                "treasure ratio must be within 0.0..=1.0, got {}",
                self.treasure_ratio
            )));
        }
        Ok(())
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for the level in play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Current level, starting at 1
    pub current_level: u32,
    pub treasures_collected: u32,
    pub enemies_killed: u32,
    /// Enemies actually spawned for this level
    pub total_enemies_this_level: u32,
    /// Treasure total fixed when the level began
    pub total_treasures_this_level: u32,
}

impl LevelProgress {
    fn first_level() -> Self {
        Self {
            current_level: 1,
            treasures_collected: 0,
            enemies_killed: 0,
            total_enemies_this_level: 0,
            total_treasures_this_level: 0,
        }
    }

    /// Kills needed for the kill branch of the victory rule (half, rounded down).
    pub fn enemies_required(&self) -> u32 {
        self.total_enemies_this_level / 2
    }

    /// The victory rule.
    ///
    /// At least `min_treasures` collected, plus either half the level's enemies
    /// killed or every counted treasure collected.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::LevelProgress;
    ///
    /// let progress = LevelProgress {
    ///     current_level: 1,
    ///     treasures_collected: 2,
    ///     enemies_killed: 5,
    ///     total_enemies_this_level: 10,
    ///     total_treasures_this_level: 3,
    /// };
    /// assert!(progress.is_victory(2));
    /// ```
    pub fn is_victory(&self, min_treasures: u32) -> bool {
        self.treasures_collected >= min_treasures
            && (self.enemies_killed >= self.enemies_required()
                || self.treasures_collected >= self.total_treasures_this_level)
    }
}

/// The two states of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionPhase {
    Playing,
    LevelComplete,
}

/// Gameplay events the controller consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionEvent {
    TreasureCollected,
    EnemyKilled,
}

/// Read-only view of progress for the HUD and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    pub level: u32,
    pub treasures_collected: u32,
    pub treasures_required: u32,
    pub enemies_killed: u32,
    pub enemies_required: u32,
    pub level_complete: bool,
}

/// Tracks the level counters and decides when a level is won.
#[derive(Debug, Clone)]
pub struct LevelProgressionController {
    config: ProgressionConfig,
    progress: LevelProgress,
    phase: ProgressionPhase,
    /// Treasure floor for the level in play, capped by the treasure placed
    treasure_floor: u32,
}

impl LevelProgressionController {
    pub fn new(config: ProgressionConfig) -> Self {
        Self {
            treasure_floor: config.min_treasures_for_victory,
            config,
            progress: LevelProgress::first_level(),
            phase: ProgressionPhase::Playing,
        }
    }

    /// Back to level 1 with empty counters.
    pub fn reset(&mut self) {
        self.progress = LevelProgress::first_level();
        self.phase = ProgressionPhase::Playing;
        self.treasure_floor = self.config.min_treasures_for_victory;
    }

    /// Starts the current level with fresh counters.
    ///
    /// `enemies_spawned` is the number of enemies actually placed, which may be
    /// below [`Self::enemy_quota`] on cramped maps. The treasure floor drops to
    /// `treasures_placed` when the dungeon holds fewer treasures than it asks
    /// for, so a sparse level can still be won.
    pub fn begin_level(&mut self, room_count: usize, enemies_spawned: u32, treasures_placed: u32) {
        self.progress.treasures_collected = 0;
        self.progress.enemies_killed = 0;
        self.progress.total_enemies_this_level = enemies_spawned;
        self.progress.total_treasures_this_level = self.treasure_target(room_count);
        self.treasure_floor = self.config.min_treasures_for_victory.min(treasures_placed);
        self.phase = ProgressionPhase::Playing;
        debug!(
            "Level {} begins: {} rooms, {} enemies, {} treasures counted, {} required",
            self.progress.current_level,
            room_count,
            enemies_spawned,
            self.progress.total_treasures_this_level,
            self.treasure_floor
        );
    }

    /// Applies one gameplay event. Ignored once the level is complete.
    pub fn handle_event(&mut self, event: ProgressionEvent) {
        if self.phase != ProgressionPhase::Playing {
            return;
        }
        match event {
            ProgressionEvent::TreasureCollected => {
                self.progress.treasures_collected = self.progress.treasures_collected.saturating_add(1);
            }
            ProgressionEvent::EnemyKilled => {
                self.progress.enemies_killed = self.progress.enemies_killed.saturating_add(1);
            }
        }
    }

    /// Checks the victory rule.
    ///
    /// Returns true exactly once per won level, on the frame the rule first
    /// holds; the level number is incremented at that moment.
    pub fn update(&mut self) -> bool {
        if self.phase != ProgressionPhase::Playing
            || !self.progress.is_victory(self.treasure_floor)
        {
            return false;
        }

        info!(
            "Level {} complete: {} treasures, {}/{} enemies",
            self.progress.current_level,
            self.progress.treasures_collected,
            self.progress.enemies_killed,
            self.progress.total_enemies_this_level
        );
        self.progress.current_level += 1;
        self.phase = ProgressionPhase::LevelComplete;
        true
    }

    /// Leaves `LevelComplete` and starts the freshly generated level.
    pub fn resume_next_level(
        &mut self,
        room_count: usize,
        enemies_spawned: u32,
        treasures_placed: u32,
    ) -> DelveResult<()> {
        if self.phase != ProgressionPhase::LevelComplete {
            return Err(DelveError::InvalidState(format!(
                "cannot advance from level {} before it is complete",
                self.progress.current_level
            )));
        }
        self.begin_level(room_count, enemies_spawned, treasures_placed);
        Ok(())
    }

    /// Enemies to request for the current level.
    pub fn enemy_quota(&self) -> u32 {
        let extra = (self.progress.current_level - 1).saturating_mul(self.config.enemies_per_level);
        self.config
            .base_enemies
            .saturating_add(extra)
            .min(self.config.max_enemies)
    }

    /// Treasure total counted for a level with `room_count` rooms.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{LevelProgressionController, ProgressionConfig};
    ///
    /// let controller = LevelProgressionController::new(ProgressionConfig::new());
    /// assert_eq!(controller.treasure_target(5), 3);
    /// assert_eq!(controller.treasure_target(20), 6);
    /// ```
    pub fn treasure_target(&self, room_count: usize) -> u32 {
        let scaled = (room_count as f64 * self.config.treasure_ratio).round() as u32;
        scaled.max(self.config.min_level_treasures)
    }

    pub fn phase(&self) -> ProgressionPhase {
        self.phase
    }

    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    /// Treasures that must be collected on the level in play.
    pub fn treasure_floor(&self) -> u32 {
        self.treasure_floor
    }

    pub fn current_level(&self) -> u32 {
        self.progress.current_level
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            level: self.progress.current_level,
            treasures_collected: self.progress.treasures_collected,
            treasures_required: self.progress.total_treasures_this_level,
            enemies_killed: self.progress.enemies_killed,
            enemies_required: self.progress.enemies_required(),
            level_complete: self.phase == ProgressionPhase::LevelComplete,
        }
    }
}

impl Default for LevelProgressionController {
    fn default() -> Self {
        Self::new(ProgressionConfig::default())
    }
}
