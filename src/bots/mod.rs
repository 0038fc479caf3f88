//! Action producers for headless matches
//!
//! A bot looks at the game and returns the action its player takes this
//! tick. Bots never mutate the game; `Game::step` applies their actions.

pub mod chase;
pub mod constant;
pub mod goalkeeper;
pub mod random;

pub use chase::ChaseBot;
pub use constant::ConstantActionBot;
pub use goalkeeper::GoalkeeperBot;
pub use random::RandomBot;

use glam::DVec2;

use crate::sim::{Action, Disc, Game, Player};

pub trait Bot {
    /// Action for `player` in the current state of `game`
    fn step(&mut self, player: &Player, game: &Game) -> Action;
}

impl<B: Bot + ?Sized> Bot for Box<B> {
    fn step(&mut self, player: &Player, game: &Game) -> Action {
        (**self).step(player, game)
    }
}

/// Collect one action per player, in registration order
///
/// `bots[i]` drives `game.players()[i]`.
pub fn collect_actions<B: Bot>(bots: &mut [B], game: &Game) -> Vec<Action> {
    game.players()
        .iter()
        .zip(bots.iter_mut())
        .map(|(player, bot)| bot.step(player, game))
        .collect()
}

/// Direction keys that move `position` toward `point`
///
/// An axis within `precision` of the target is left alone.
pub fn follow_point(position: DVec2, point: DVec2, precision: f64) -> Action {
    let axis = |delta: f64| {
        if delta > precision {
            -1
        } else if delta < -precision {
            1
        } else {
            0
        }
    };
    let delta = position - point;
    Action::new(axis(delta.x), axis(delta.y), false)
}

/// Whether to press kick against `target`
///
/// Kicks when the gap between the discs is under `precision`. While the kick
/// latch is set and kick was held last tick, releases once so the next press
/// registers.
pub fn shoot_disc_close(
    own: &Disc,
    target: &Disc,
    precision: f64,
    kick_cancel: bool,
    previous_kick: bool,
) -> bool {
    let gap = (target.position - own.position).length() - own.radius - target.radius;
    gap < precision && !(kick_cancel && previous_kick)
}
