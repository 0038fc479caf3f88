//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one `Game::step` per tick
//! - f64 arithmetic in a fixed evaluation order
//! - Stable iteration order (disc list order, player registration order)
//! - No randomness, no I/O during a step

pub mod arc;
pub mod collision;
pub mod disc;
pub mod flags;
pub mod geometry;
pub mod intersect;
pub mod motion;
pub mod player;
pub mod score;
pub mod state;
pub mod tick;

pub use arc::{CircleArc, Curvature};
pub use collision::resolve_collisions;
pub use disc::{Disc, PlayerExt};
pub use flags::{CollisionFlag, can_collide};
pub use geometry::{Goal, Plane, Segment, SegmentShape, Team, Vertex};
pub use intersect::{crosses_segment, segment_intersection};
pub use motion::update_discs;
pub use player::{Action, Player, PlayerId, PlayerIdAllocator, PlayerStats};
pub use score::Score;
pub use state::{Game, GamePhase};
