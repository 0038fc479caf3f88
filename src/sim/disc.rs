//! Dynamic bodies
//!
//! One disc representation covers the ball, plain stadium discs and player
//! discs. Player-only tuning lives in an optional extension record; the
//! collision code never looks at it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::flags::CollisionFlag;
use super::player::PlayerId;
use crate::stadium::Color;

/// Player-only tuning attached to a disc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerExt {
    pub player_id: PlayerId,
    pub acceleration: f64,
    pub kicking_acceleration: f64,
    pub kicking_damping: f64,
    pub kick_strength: f64,
    pub kickback: f64,
}

/// A circular body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Added to velocity every tick before damping
    pub gravity: DVec2,
    pub radius: f64,
    /// 0 = immovable
    pub inv_mass: f64,
    pub damping: f64,
    pub b_coef: f64,
    pub color: Color,
    pub c_group: CollisionFlag,
    pub c_mask: CollisionFlag,
    /// Trait the map entry referenced, if any
    #[serde(default)]
    pub trait_name: Option<String>,
    #[serde(default)]
    pub player: Option<PlayerExt>,
}

impl Disc {
    #[inline]
    pub fn is_player(&self) -> bool {
        self.player.is_some()
    }

    #[inline]
    pub fn is_movable(&self) -> bool {
        self.inv_mass != 0.0
    }

    pub fn player_id(&self) -> Option<PlayerId> {
        self.player.as_ref().map(|ext| ext.player_id)
    }

    /// Whether this disc scores when it crosses a goal line
    #[inline]
    pub fn scores(&self) -> bool {
        self.c_group.intersects(CollisionFlag::SCORE)
    }

    /// Whether players can kick this disc
    #[inline]
    pub fn kickable(&self) -> bool {
        self.c_group.intersects(CollisionFlag::KICK)
    }

    /// Promote a plain disc to the ball role
    pub fn into_ball(mut self) -> Self {
        self.c_group |= CollisionFlag::SCORE | CollisionFlag::KICK;
        self.c_mask = self.c_mask & !(CollisionFlag::REDKO | CollisionFlag::BLUEKO);
        self
    }
}
