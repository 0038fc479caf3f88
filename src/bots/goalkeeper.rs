use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Bot, follow_point, shoot_disc_close};
use crate::sim::{Action, Game, GamePhase, Goal, Player, segment_intersection};

/// Distance the keeper line stands in front of the goal line
const KEEPER_DEPTH: f64 = 60.0;
/// Closest the keeper may stand to the goal line when covering a post
const POST_DEPTH: f64 = 25.0;
const FOLLOW_PRECISION: f64 = 2.0;
const SHOOT_PRECISION: f64 = 15.0;

/// Guards its own goal, stepping out only to clear the ball
#[derive(Debug, Clone)]
pub struct GoalkeeperBot {
    rng: Pcg32,
    previous: Action,
}

impl GoalkeeperBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            previous: Action::IDLE,
        }
    }

    /// Run at the ball with some vertical jitter and shoot
    fn step_kickoff(&mut self, player: &Player, game: &Game) -> Action {
        let Some(own) = game.player_disc(player.id) else {
            return Action::IDLE;
        };
        let ball = game.ball();
        let half = ball.radius / 2.0;
        let jitter = self.rng.random_range(-half..=half);
        let point = ball.position + DVec2::new(0.0, jitter);

        let mut action = follow_point(own.position, point, FOLLOW_PRECISION);
        action.kick = shoot_disc_close(own, ball, SHOOT_PRECISION, player.kick_cancel(), self.previous.kick);
        action
    }

    fn step_play(&mut self, player: &Player, game: &Game) -> Action {
        let Some(own) = game.player_disc(player.id) else {
            return Action::IDLE;
        };
        let Some(goal) = game.stadium().goals().iter().find(|g| g.team == player.team) else {
            return Action::IDLE;
        };
        let ball = game.ball();
        let target = position_keeper(goal, ball.position);

        let mut action = follow_point(own.position, target, FOLLOW_PRECISION);
        action.kick = shoot_disc_close(own, ball, SHOOT_PRECISION, player.kick_cancel(), self.previous.kick);
        action
    }
}

impl Bot for GoalkeeperBot {
    fn step(&mut self, player: &Player, game: &Game) -> Action {
        let action = match game.state() {
            GamePhase::Kickoff if game.team_kickoff() == player.team => self.step_kickoff(player, game),
            GamePhase::Kickoff | GamePhase::Playing => self.step_play(player, game),
            GamePhase::Goal | GamePhase::End => Action::IDLE,
        };
        self.previous = action;
        action
    }
}

/// Where the keeper should stand to cover `goal` against a ball at `ball`
///
/// Intersects the line from the goal center to the ball with, in order: the
/// keeper line in front of the goal, the two sides of the goal box (never
/// closer to the goal line than the post depth), then the goal line itself.
/// Falls back to the goal center.
pub fn position_keeper(goal: &Goal, ball: DVec2) -> DVec2 {
    let center = goal.center();
    let side = center.x.signum();
    let keeper_x = (center.x.abs() - KEEPER_DEPTH) * side;
    let default_x = (goal.p0.x.abs() - POST_DEPTH) * side;

    let keeper_line = (DVec2::new(keeper_x, goal.p0.y), DVec2::new(keeper_x, goal.p1.y));
    if let Some(p) = segment_intersection(center, ball, keeper_line.0, keeper_line.1) {
        return p;
    }

    for post in [goal.p0, goal.p1] {
        if let Some(mut p) = segment_intersection(center, ball, post, DVec2::new(keeper_x, post.y)) {
            if (side < 0.0 && p.x < default_x) || (side > 0.0 && p.x > default_x) {
                p.x = default_x;
            }
            return p;
        }
    }

    segment_intersection(center, ball, goal.p0, goal.p1).unwrap_or(center)
}
