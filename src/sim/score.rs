//! Tick/time bookkeeping, goal counts and win conditions

use serde::{Deserialize, Serialize};

use super::geometry::Team;
use super::state::GamePhase;
use crate::consts::{END_ANIMATION_TICKS, GOAL_ANIMATION_TICKS, TICKS_PER_SECOND};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Ticks spent in play
    pub ticks: u64,
    /// Every tick since the match started
    pub total_ticks: u64,
    /// `ticks / 60`, seconds
    pub time: f64,
    pub red: u32,
    pub blue: u32,
    /// Seconds; 0 = unlimited
    pub time_limit: f64,
    /// Goals; 0 = unlimited
    pub score_limit: u32,
    /// Celebration countdown, in ticks
    pub animation_timeout: i32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new(
            crate::consts::DEFAULT_TIME_LIMIT_MINUTES,
            crate::consts::DEFAULT_SCORE_LIMIT,
        )
    }
}

impl Score {
    pub fn new(time_limit_minutes: u32, score_limit: u32) -> Self {
        Self {
            ticks: 0,
            total_ticks: 0,
            time: 0.0,
            red: 0,
            blue: 0,
            time_limit: time_limit_minutes as f64 * 60.0,
            score_limit,
            animation_timeout: 0,
        }
    }

    /// Count one tick spent in `phase`
    pub fn step(&mut self, phase: GamePhase) {
        self.total_ticks += 1;
        if phase == GamePhase::Playing {
            self.ticks += 1;
            self.time = self.ticks as f64 / TICKS_PER_SECOND;
        }
    }

    /// Clear counters, keep the limits
    pub fn stop(&mut self) {
        *self = Self {
            time_limit: self.time_limit,
            score_limit: self.score_limit,
            ..Self::new(0, 0)
        };
    }

    /// Credit a goal conceded by `conceding` to the other team
    ///
    /// # Panics
    /// If `conceding` is the spectator team.
    pub fn update(&mut self, conceding: Team) {
        match conceding {
            Team::Blue => self.red += 1,
            Team::Red => self.blue += 1,
            Team::Spectator => panic!("spectators cannot concede a goal"),
        }
        self.animation_timeout = GOAL_ANIMATION_TICKS;
    }

    pub fn start_end_animation(&mut self) {
        self.animation_timeout = END_ANIMATION_TICKS;
    }

    pub fn is_animation(&self) -> bool {
        self.animation_timeout > 0
    }

    pub fn is_score_limit_reached(&self) -> bool {
        self.score_limit > 0 && (self.red >= self.score_limit || self.blue >= self.score_limit)
    }

    /// Time is up and someone leads; a draw plays on
    pub fn is_time_limit_reached(&self) -> bool {
        self.time_limit > 0.0 && self.time >= self.time_limit && self.red != self.blue
    }

    pub fn is_game_over(&self) -> bool {
        self.is_score_limit_reached() || self.is_time_limit_reached()
    }

    /// Leading team, `Spectator` on a draw
    pub fn winner(&self) -> Team {
        match self.red.cmp(&self.blue) {
            std::cmp::Ordering::Greater => Team::Red,
            std::cmp::Ordering::Less => Team::Blue,
            std::cmp::Ordering::Equal => Team::Spectator,
        }
    }

    /// `MM:SS`
    pub fn time_string(&self) -> String {
        let seconds = self.time as u64;
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }

    /// `R - B`
    pub fn score_string(&self) -> String {
        format!("{} - {}", self.red, self.blue)
    }
}
