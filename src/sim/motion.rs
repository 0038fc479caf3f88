//! Per-tick motion integration

use super::disc::Disc;
use super::player::Player;

/// Advance every disc by one tick
///
/// `position += velocity`, then `velocity = (velocity + gravity) * damping`.
/// A player disc whose owner is actively kicking damps with its kicking
/// damping instead.
pub fn update_discs(discs: &mut [Disc], players: &[Player]) {
    for disc in discs.iter_mut() {
        let damping = match &disc.player {
            Some(ext) if players.iter().any(|p| p.id == ext.player_id && p.is_kicking()) => {
                ext.kicking_damping
            }
            _ => disc.damping,
        };
        disc.position += disc.velocity;
        disc.velocity = (disc.velocity + disc.gravity) * damping;
    }
}
