use super::Bot;
use crate::sim::{Action, Game, Player};

/// Presses the same keys every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantActionBot {
    pub action: Action,
    /// Mirror the horizontal input, for the team attacking the other way
    pub symmetry: bool,
}

impl ConstantActionBot {
    pub fn new(action: Action, symmetry: bool) -> Self {
        Self { action, symmetry }
    }
}

impl Bot for ConstantActionBot {
    fn step(&mut self, _player: &Player, _game: &Game) -> Action {
        if self.symmetry {
            self.action.mirrored()
        } else {
            self.action
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Score, Team};
    use crate::stadium::BaseMap;

    #[test]
    fn test_constant_and_mirrored() {
        let game = Game::with_players(
            BaseMap::Classic.load().unwrap(),
            Score::default(),
            [("a", Team::Red)],
        );
        let player = &game.players()[0];
        let action = Action::new(1, 1, true);
        assert_eq!(ConstantActionBot::new(action, false).step(player, &game), action);
        assert_eq!(
            ConstantActionBot::new(action, true).step(player, &game),
            Action::new(-1, 1, true)
        );
    }
}
