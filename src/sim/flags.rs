//! Collision group / mask bits

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

use crate::error::MapFormatError;

/// 32-bit collision bitmask
///
/// Every body carries a group (what it is) and a mask (what it collides
/// with). Two bodies interact only when each one's group intersects the
/// other's mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionFlag(pub u32);

impl CollisionFlag {
    pub const NONE: Self = Self(0);
    pub const BALL: Self = Self(1);
    pub const RED: Self = Self(2);
    pub const BLUE: Self = Self(4);
    pub const REDKO: Self = Self(8);
    pub const BLUEKO: Self = Self(16);
    pub const WALL: Self = Self(32);
    /// Union of the base gameplay bits (ball, teams, kickoff barriers, wall)
    pub const ALL: Self = Self(63);
    pub const KICK: Self = Self(64);
    pub const SCORE: Self = Self(128);
    pub const C0: Self = Self(1 << 28);
    pub const C1: Self = Self(1 << 29);
    pub const C2: Self = Self(1 << 30);
    pub const C3: Self = Self(1 << 31);

    /// Mask of a player disc while the ball is in play
    pub const PLAYER_PLAYING: Self =
        Self(Self::BALL.0 | Self::RED.0 | Self::BLUE.0 | Self::WALL.0);

    /// Look up a single map-file token
    pub fn from_name(name: &str) -> Option<Self> {
        let flag = match name {
            "" => Self::NONE,
            "ball" => Self::BALL,
            "red" => Self::RED,
            "blue" => Self::BLUE,
            "redKO" => Self::REDKO,
            "blueKO" => Self::BLUEKO,
            "wall" => Self::WALL,
            "all" => Self::ALL,
            "kick" => Self::KICK,
            "score" => Self::SCORE,
            "c0" => Self::C0,
            "c1" => Self::C1,
            "c2" => Self::C2,
            "c3" => Self::C3,
            _ => return None,
        };
        Some(flag)
    }

    /// OR together a list of map-file tokens
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, MapFormatError> {
        names.iter().try_fold(Self::NONE, |acc, name| {
            let name = name.as_ref();
            Self::from_name(name)
                .map(|flag| acc | flag)
                .ok_or_else(|| MapFormatError::UnknownCollisionFlag(name.to_string()))
        })
    }

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Group/mask test shared by every pair of bodies
#[inline]
pub fn can_collide(
    group_a: CollisionFlag,
    mask_a: CollisionFlag,
    group_b: CollisionFlag,
    mask_b: CollisionFlag,
) -> bool {
    group_a.intersects(mask_b) && mask_a.intersects(group_b)
}

impl BitOr for CollisionFlag {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionFlag {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CollisionFlag {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for CollisionFlag {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Display for CollisionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
