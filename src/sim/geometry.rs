//! Static map geometry
//!
//! Immutable after load. A live match shares these through an `Arc`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::arc::CircleArc;
use super::flags::CollisionFlag;
use crate::stadium::Color;

/// Team membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Spectator,
    Red,
    Blue,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
            Team::Spectator => Team::Spectator,
        }
    }

    /// Group bit added to a player disc of this team
    pub fn flag(self) -> CollisionFlag {
        match self {
            Team::Red => CollisionFlag::RED,
            Team::Blue => CollisionFlag::BLUE,
            Team::Spectator => CollisionFlag::NONE,
        }
    }

    /// Kickoff-barrier bit the team may pass while taking a kickoff
    pub fn kickoff_flag(self) -> CollisionFlag {
        match self {
            Team::Red => CollisionFlag::REDKO,
            Team::Blue => CollisionFlag::BLUEKO,
            Team::Spectator => CollisionFlag::NONE,
        }
    }

    /// Default disc color for the team
    pub fn color(self) -> Color {
        match self {
            Team::Red => Color::rgb(0xE5, 0x6E, 0x56),
            Team::Blue => Color::rgb(0x56, 0x89, 0xE5),
            Team::Spectator => Color::WHITE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Red => "Red",
            Team::Blue => "Blue",
            Team::Spectator => "Spectator",
        }
    }
}

/// Point obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: DVec2,
    pub b_coef: f64,
    pub c_group: CollisionFlag,
    pub c_mask: CollisionFlag,
    #[serde(default)]
    pub trait_name: Option<String>,
}

/// Straight line or circular arc between two vertexes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SegmentShape {
    Straight,
    Curved(CircleArc),
}

/// Wall between two vertexes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Vertex indexes after curvature resolution (may be swapped relative to the map)
    pub v0: usize,
    pub v1: usize,
    /// Endpoint positions, copied from the vertexes at load
    pub p0: DVec2,
    pub p1: DVec2,
    pub b_coef: f64,
    /// Signed one-sided collision threshold
    pub bias: f64,
    /// Final curvature; 0 for straight segments
    pub curve: f64,
    pub shape: SegmentShape,
    pub visible: bool,
    pub color: Color,
    pub c_group: CollisionFlag,
    pub c_mask: CollisionFlag,
    #[serde(default)]
    pub trait_name: Option<String>,
}

impl Segment {
    pub fn is_curved(&self) -> bool {
        matches!(self.shape, SegmentShape::Curved(_))
    }

    pub fn arc(&self) -> Option<&CircleArc> {
        match &self.shape {
            SegmentShape::Curved(arc) => Some(arc),
            SegmentShape::Straight => None,
        }
    }
}

/// Half-space boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// As written in the map; normalized when used
    pub normal: DVec2,
    pub dist: f64,
    pub b_coef: f64,
    pub c_group: CollisionFlag,
    pub c_mask: CollisionFlag,
    #[serde(default)]
    pub trait_name: Option<String>,
}

/// Goal line owned by a team; crossing it concedes a goal for that team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub p0: DVec2,
    pub p1: DVec2,
    pub team: Team,
}

impl Goal {
    pub fn center(&self) -> DVec2 {
        (self.p0 + self.p1) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_flags() {
        assert_eq!(Team::Red.flag(), CollisionFlag::RED);
        assert_eq!(Team::Blue.kickoff_flag(), CollisionFlag::BLUEKO);
        assert_eq!(Team::Red.opponent(), Team::Blue);
        assert_eq!(Team::Spectator.opponent(), Team::Spectator);
    }

    #[test]
    fn test_team_colors() {
        assert_eq!(Team::Red.color(), Color::rgb(0xE5, 0x6E, 0x56));
        assert_eq!(Team::Blue.color(), Color::rgb(0x56, 0x89, 0xE5));
        assert_eq!(Team::Spectator.color(), Color::WHITE);
    }

    #[test]
    fn test_goal_center() {
        let goal = Goal {
            p0: DVec2::new(-370.0, 64.0),
            p1: DVec2::new(-370.0, -64.0),
            team: Team::Red,
        };
        assert_eq!(goal.center(), DVec2::new(-370.0, 0.0));
    }
}
