//! discball - deterministic Haxball-style disc physics
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, match rules)
//! - `stadium`: Map data model and loader
//! - `bots`: Action producers for headless matches
//! - `persistence`: Action recordings and replay
//! - `config`: Match configuration

pub mod bots;
pub mod config;
pub mod error;
pub mod persistence;
pub mod sim;
pub mod stadium;

pub use config::GameConfig;
pub use error::{ConfigError, MapFormatError, RecordingError};
pub use sim::{Action, Game, GamePhase, Player, PlayerId, Score, Team};
pub use stadium::{BaseMap, Stadium, load_stadium, load_stadium_file};

use glam::DVec2;

/// Simulation constants
pub mod consts {
    /// Fixed clock: one tick is 1/60 s of match time
    pub const TICKS_PER_SECOND: f64 = 60.0;

    /// Celebration after a goal, in ticks
    pub const GOAL_ANIMATION_TICKS: i32 = 150;
    /// Celebration after the final whistle, in ticks
    pub const END_ANIMATION_TICKS: i32 = 300;

    /// Gap (beyond touching) within which a player reaches a kickable disc
    pub const KICK_REACH: f64 = 4.0;

    /// Vertical spacing between default spawn slots
    pub const SPAWN_ROW_SPACING: f64 = 55.0;

    /// Default match limits
    pub const DEFAULT_SCORE_LIMIT: u32 = 3;
    pub const DEFAULT_TIME_LIMIT_MINUTES: u32 = 3;
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross(a: DVec2, b: DVec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Mirror a point across the x axis (map files are y-down, the simulation is y-up)
#[inline]
pub fn flip_y(v: DVec2) -> DVec2 {
    DVec2::new(v.x, -v.y)
}
