//! Players, actions and the movement/kick controller

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::disc::Disc;
use super::geometry::Team;
use crate::consts::KICK_REACH;

/// Stable player identifier within one match session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Hands out player ids in registration order
#[derive(Debug, Clone, Default)]
pub struct PlayerIdAllocator {
    next: u32,
}

impl PlayerIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> PlayerId {
        let id = PlayerId(self.next);
        self.next += 1;
        id
    }
}

/// One tick of input: horizontal and vertical direction in {-1, 0, 1}, kick held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Action {
    pub x: i8,
    pub y: i8,
    pub kick: bool,
}

impl Action {
    pub const IDLE: Self = Self {
        x: 0,
        y: 0,
        kick: false,
    };

    pub const fn new(x: i8, y: i8, kick: bool) -> Self {
        Self { x, y, kick }
    }

    /// Same action for a player attacking the other way
    pub const fn mirrored(self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
            kick: self.kick,
        }
    }

    /// Unit movement direction, zero when idle
    pub fn direction(self) -> DVec2 {
        DVec2::new(self.x as f64, self.y as f64).normalize_or_zero()
    }
}

/// Touch and kick counters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub touches: u32,
    pub kicks: u32,
    /// Match time (seconds) of the latest touch
    pub last_touch_time: f64,
    pub last_kick_time: f64,
}

impl PlayerStats {
    pub fn record_touch(&mut self, time: f64) {
        self.touches += 1;
        self.last_touch_time = time;
    }

    pub fn record_kick(&mut self, time: f64) {
        self.kicks += 1;
        self.last_kick_time = time;
    }
}

/// A registered player; their disc lives in the live stadium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: Team,
    /// Kick input held this tick
    pub kicking: bool,
    /// Latched after a kick connects; cleared when the kick input is released
    kick_cancel: bool,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, team: Team) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            kicking: false,
            kick_cancel: false,
            stats: PlayerStats::default(),
        }
    }

    /// Holding kick and not latched
    #[inline]
    pub fn is_kicking(&self) -> bool {
        self.kicking && !self.kick_cancel
    }

    pub fn kick_cancel(&self) -> bool {
        self.kick_cancel
    }

    /// Back to the state of a freshly registered player
    pub fn reset(&mut self) {
        self.kicking = false;
        self.kick_cancel = false;
        self.stats = PlayerStats::default();
    }

    /// Apply one action to this player's disc
    ///
    /// Updates the kick latch, kicks (at most once per tick) or touches every
    /// kickable disc in reach, then accelerates toward the input direction.
    /// `time` stamps the statistics. Does nothing if the player has no disc.
    pub fn resolve_movement(&mut self, action: Action, discs: &mut [Disc], time: f64) {
        let Some(own) = discs.iter().position(|d| d.player_id() == Some(self.id)) else {
            return;
        };

        self.kicking = action.kick;
        if !action.kick {
            self.kick_cancel = false;
        }

        let mut kicked = false;
        for j in 0..discs.len() {
            if j == own || !discs[j].kickable() {
                continue;
            }
            let offset = discs[j].position - discs[own].position;
            let dist = offset.length();
            if dist - discs[own].radius - discs[j].radius >= KICK_REACH {
                continue;
            }

            self.stats.record_touch(time);
            if !self.is_kicking() || kicked || dist == 0.0 {
                continue;
            }

            let Some(ext) = discs[own].player.as_ref() else {
                continue;
            };
            let (kick_strength, kickback) = (ext.kick_strength, ext.kickback);
            let normal = offset / dist;
            discs[j].velocity += normal * kick_strength;
            let recoil = normal * -kickback * discs[own].inv_mass;
            discs[own].velocity += recoil;
            kicked = true;
            self.stats.record_kick(time);
            log::trace!("{} kicked disc {j}", self.id);
        }

        if kicked {
            self.kick_cancel = true;
        }

        if let Some(ext) = discs[own].player.as_ref() {
            let acceleration = if self.is_kicking() {
                ext.kicking_acceleration
            } else {
                ext.acceleration
            };
            discs[own].velocity += action.direction() * acceleration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::disc::tests::disc_at;
    use crate::sim::flags::CollisionFlag;
    use crate::stadium::{BaseMap, PlayerPhysics};
    use assert_approx_eq::assert_approx_eq;

    fn physics() -> PlayerPhysics {
        BaseMap::Classic.load().unwrap().player_physics
    }

    /// Ball at the origin, red player touching it from the left
    fn setup() -> (Player, Vec<Disc>) {
        let ball = disc_at(0.0, 0.0, 10.0).into_ball();
        let player = Player::new(PlayerId(0), "p", Team::Red);
        let mut disc = physics().spawn_disc(player.id, Team::Red);
        disc.position = DVec2::new(-26.0, 0.0);
        (player, vec![ball, disc])
    }

    #[test]
    fn test_allocator_is_sequential() {
        let mut ids = PlayerIdAllocator::new();
        assert_eq!(ids.allocate(), PlayerId(0));
        assert_eq!(ids.allocate(), PlayerId(1));
        // A fresh allocator starts over
        assert_eq!(PlayerIdAllocator::new().allocate(), PlayerId(0));
    }

    #[test]
    fn test_action_direction() {
        assert_eq!(Action::IDLE.direction(), DVec2::ZERO);
        let diag = Action::new(1, 1, false).direction();
        assert_approx_eq!(diag.length(), 1.0, 1e-12);
        assert_eq!(Action::new(1, -1, true).mirrored(), Action::new(-1, -1, true));
    }

    #[test]
    fn test_acceleration() {
        let (mut player, mut discs) = setup();
        player.resolve_movement(Action::new(0, 1, false), &mut discs, 0.0);
        assert_approx_eq!(discs[1].velocity.y, 0.1, 1e-12);

        // Holding kick uses the kicking acceleration
        let (mut player, mut discs) = setup();
        discs[0].position.x = 500.0;
        player.resolve_movement(Action::new(0, 1, true), &mut discs, 0.0);
        assert_approx_eq!(discs[1].velocity.y, 0.07, 1e-12);
    }

    #[test]
    fn test_kick_pushes_ball() {
        let (mut player, mut discs) = setup();
        player.resolve_movement(Action::new(0, 0, true), &mut discs, 1.5);
        assert_approx_eq!(discs[0].velocity.x, 5.0, 1e-12);
        assert_approx_eq!(discs[0].velocity.y, 0.0, 1e-12);
        assert_eq!(player.stats.kicks, 1);
        assert_eq!(player.stats.touches, 1);
        assert_eq!(player.stats.last_kick_time, 1.5);
        assert!(player.kick_cancel());
        // Latched in the kick tick: normal acceleration afterwards
        assert!(!player.is_kicking());
    }

    #[test]
    fn test_kick_debounce() {
        let (mut player, mut discs) = setup();
        for _ in 0..10 {
            player.resolve_movement(Action::new(0, 0, true), &mut discs, 0.0);
        }
        // One impulse for one press, however long it is held
        assert_approx_eq!(discs[0].velocity.x, 5.0, 1e-12);
        assert_eq!(player.stats.kicks, 1);
        assert_eq!(player.stats.touches, 10);

        player.resolve_movement(Action::IDLE, &mut discs, 0.0);
        assert!(!player.kick_cancel());
        player.resolve_movement(Action::new(0, 0, true), &mut discs, 0.0);
        assert_approx_eq!(discs[0].velocity.x, 10.0, 1e-12);
        assert_eq!(player.stats.kicks, 2);
    }

    #[test]
    fn test_holding_without_contact_does_not_latch() {
        let (mut player, mut discs) = setup();
        discs[0].position.x = 500.0;
        for _ in 0..5 {
            player.resolve_movement(Action::new(0, 0, true), &mut discs, 0.0);
        }
        assert!(!player.kick_cancel());
        discs[0].position.x = 0.0;
        player.resolve_movement(Action::new(0, 0, true), &mut discs, 0.0);
        assert_eq!(player.stats.kicks, 1);
    }

    #[test]
    fn test_touch_without_kick() {
        let (mut player, mut discs) = setup();
        player.resolve_movement(Action::IDLE, &mut discs, 2.0);
        assert_eq!(discs[0].velocity, DVec2::ZERO);
        assert_eq!(player.stats.touches, 1);
        assert_eq!(player.stats.kicks, 0);
        assert_eq!(player.stats.last_touch_time, 2.0);
    }

    #[test]
    fn test_out_of_reach() {
        let (mut player, mut discs) = setup();
        // Gap of exactly the reach is not a touch
        discs[1].position.x = -(10.0 + 15.0 + KICK_REACH);
        player.resolve_movement(Action::new(0, 0, true), &mut discs, 0.0);
        assert_eq!(player.stats.touches, 0);
    }

    #[test]
    fn test_kickback() {
        let (mut player, mut discs) = setup();
        if let Some(ext) = discs[1].player.as_mut() {
            ext.kickback = 2.0;
        }
        player.resolve_movement(Action::new(0, 0, true), &mut discs, 0.0);
        // -kickback * inv_mass along the kick normal (+x)
        assert_approx_eq!(discs[1].velocity.x, -1.0, 1e-12);
    }

    #[test]
    fn test_one_kick_per_tick() {
        let (mut player, mut discs) = setup();
        let mut second = disc_at(-26.0, 26.0, 10.0).into_ball();
        second.c_group = CollisionFlag::KICK;
        discs.push(second);
        player.resolve_movement(Action::new(0, 0, true), &mut discs, 0.0);
        assert_approx_eq!(discs[0].velocity.x, 5.0, 1e-12);
        assert_eq!(discs[2].velocity, DVec2::ZERO);
        assert_eq!(player.stats.touches, 2);
        assert_eq!(player.stats.kicks, 1);
    }
}
