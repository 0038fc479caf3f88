use super::{Bot, follow_point, shoot_disc_close};
use crate::consts::KICK_REACH;
use crate::sim::{Action, Game, GamePhase, Player};

/// Runs at the ball and kicks it whenever in reach
#[derive(Debug, Clone, Default)]
pub struct ChaseBot {
    previous: Action,
}

impl ChaseBot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Bot for ChaseBot {
    fn step(&mut self, player: &Player, game: &Game) -> Action {
        if !matches!(game.state(), GamePhase::Kickoff | GamePhase::Playing) {
            self.previous = Action::IDLE;
            return Action::IDLE;
        }
        let Some(own) = game.player_disc(player.id) else {
            return Action::IDLE;
        };

        let ball = game.ball();
        let mut action = follow_point(own.position, ball.position, 2.0);
        action.kick = shoot_disc_close(own, ball, KICK_REACH, player.kick_cancel(), self.previous.kick);
        self.previous = action;
        action
    }
}
