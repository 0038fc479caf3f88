//! Fixed timestep match tick
//!
//! One call to `Game::step` advances the match by exactly one tick:
//! player actions, motion, collisions, then the rules.

use std::path::PathBuf;

use glam::DVec2;

use super::collision::resolve_collisions;
use super::flags::CollisionFlag;
use super::geometry::Team;
use super::intersect::crosses_segment;
use super::motion::update_discs;
use super::player::Action;
use super::state::{Game, GamePhase};
use crate::consts::SPAWN_ROW_SPACING;
use crate::error::RecordingError;
use crate::stadium::KickOffReset;

impl Game {
    /// Advance the match by one tick
    ///
    /// `actions` holds one action per registered player, in registration
    /// order. Returns `true` once the end celebration is over; the caller
    /// should then `reset` or `stop` the match.
    ///
    /// # Panics
    /// If the number of actions differs from the number of players.
    pub fn step(&mut self, actions: &[Action]) -> bool {
        assert_eq!(
            actions.len(),
            self.players.len(),
            "one action per player expected"
        );

        let time = self.score.time;
        for (player, &action) in self.players.iter_mut().zip(actions) {
            player.resolve_movement(action, &mut self.stadium.discs, time);
        }

        let previous: Vec<DVec2> = self
            .stadium
            .discs
            .iter()
            .filter(|d| d.scores())
            .map(|d| d.position)
            .collect();

        update_discs(&mut self.stadium.discs, &self.players);
        resolve_collisions(&mut self.stadium.discs, &self.stadium.geometry);
        let done = self.handle_game_state(&previous);

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.step(actions);
        }
        done
    }

    /// Team whose goal line a scoring disc crossed this tick
    ///
    /// `previous` holds the positions of the scoring discs before motion, in
    /// disc order. Returns `Spectator` when no goal was conceded.
    pub fn check_goal(&self, previous: &[DVec2]) -> Team {
        let current = self.stadium.discs.iter().filter(|d| d.scores());
        for (&prev, disc) in previous.iter().zip(current) {
            for goal in self.stadium.goals() {
                if crosses_segment(prev, disc.position, goal.p0, goal.p1) {
                    return goal.team;
                }
            }
        }
        Team::Spectator
    }

    fn handle_game_state(&mut self, previous: &[DVec2]) -> bool {
        self.score.step(self.phase);

        match self.phase {
            GamePhase::Kickoff => {
                self.set_player_masks(self.kickoff_mask());
                if self.stadium.ball().velocity.length() > 0.0 {
                    log::debug!("Kickoff made");
                    self.phase = GamePhase::Playing;
                }
            }
            GamePhase::Playing => {
                self.set_player_masks(CollisionFlag::PLAYER_PLAYING);
                let conceding = self.check_goal(previous);
                if conceding != Team::Spectator {
                    log::debug!("Team {} conceded a goal", conceding.as_str());
                    self.phase = GamePhase::Goal;
                    self.score.update(conceding);
                    if !self.score.is_game_over() {
                        self.team_kickoff = conceding;
                    }
                } else if self.score.is_game_over() {
                    self.phase = GamePhase::End;
                    self.score.start_end_animation();
                }
            }
            GamePhase::Goal => {
                self.score.animation_timeout -= 1;
                if !self.score.is_animation() {
                    if self.score.is_game_over() {
                        self.phase = GamePhase::End;
                        self.score.start_end_animation();
                    } else {
                        self.reset_discs_positions();
                        self.phase = GamePhase::Kickoff;
                    }
                }
            }
            GamePhase::End => {
                self.score.animation_timeout -= 1;
                if !self.score.is_animation() {
                    log::debug!(
                        "Match over: {} at {}",
                        self.score.score_string(),
                        self.score.time_string()
                    );
                    return true;
                }
            }
        }
        false
    }

    fn kickoff_mask(&self) -> CollisionFlag {
        CollisionFlag::PLAYER_PLAYING | self.team_kickoff.kickoff_flag()
    }

    fn set_player_masks(&mut self, mask: CollisionFlag) {
        for disc in self.stadium.discs.iter_mut().filter(|d| d.is_player()) {
            disc.c_mask = mask;
        }
    }

    /// Put the discs back for a kickoff
    ///
    /// The ball always returns to its stored state; the other map discs only
    /// in full reset mode. Player discs are rebuilt from the player physics
    /// and placed on the spawn points, or in rows at the spawn distance when
    /// the map has none.
    pub(super) fn reset_discs_positions(&mut self) {
        match self.store.kick_off_reset {
            KickOffReset::Full => {
                for (live, stored) in self.stadium.discs.iter_mut().zip(&self.store.discs) {
                    live.clone_from(stored);
                }
            }
            KickOffReset::Partial => self.stadium.discs[0].clone_from(&self.store.discs[0]),
        }

        let mask = self.kickoff_mask();
        let (mut red_count, mut blue_count) = (0usize, 0usize);
        for player in &self.players {
            let count = match player.team {
                Team::Red => &mut red_count,
                Team::Blue => &mut blue_count,
                Team::Spectator => continue,
            };

            let mut disc = self.store.player_physics.spawn_disc(player.id, player.team);
            disc.position = spawn_position(
                self.store.spawn_points(player.team),
                self.store.spawn_distance,
                player.team,
                *count,
            );
            disc.c_mask = mask;
            *count += 1;

            if let Some(slot) = self
                .stadium
                .discs
                .iter_mut()
                .find(|d| d.player_id() == Some(player.id))
            {
                *slot = disc;
            }
        }
    }

    /// End the match and return to the initial condition
    ///
    /// With a recorder attached and `save` set, the recording is written and
    /// its path returned. The match is reset even if saving fails.
    pub fn stop(&mut self, save: bool) -> Result<Option<PathBuf>, RecordingError> {
        let saved = match self.recorder.as_mut() {
            Some(recorder) => recorder.stop(save),
            None => Ok(None),
        };
        if let Ok(Some(path)) = &saved {
            log::debug!("Recording saved under {}", path.display());
        }
        log::debug!(
            "Game stopped with score {} at {:.2}s",
            self.score.score_string(),
            self.score.time
        );

        self.score.stop();
        self.phase = GamePhase::Kickoff;
        self.team_kickoff = Team::Red;
        self.stadium = self.store.clone();
        for player in &mut self.players {
            player.reset();
        }
        saved
    }

    /// `stop`, then `start` again with the same players
    pub fn reset(&mut self, save: bool) -> Result<Option<PathBuf>, RecordingError> {
        let saved = self.stop(save);
        self.start();
        saved
    }
}

/// Kickoff position of the `count`-th player of `team`
fn spawn_position(points: &[DVec2], spawn_distance: f64, team: Team, count: usize) -> DVec2 {
    if let Some(last) = points.len().checked_sub(1) {
        return points[count.min(last)];
    }
    let x = match team {
        Team::Blue => spawn_distance,
        _ => -spawn_distance,
    };
    let row = ((count + 1) >> 1) as f64 * SPAWN_ROW_SPACING;
    let y = if count % 2 == 1 { -row } else { row };
    DVec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::PlayerId;
    use crate::sim::score::Score;
    use crate::stadium::{BaseMap, load_stadium};

    fn classic_game(score: Score) -> Game {
        let mut game = Game::with_players(
            BaseMap::Classic.load().unwrap(),
            score,
            [("red", Team::Red), ("blue", Team::Blue)],
        );
        game.start();
        game
    }

    const IDLE2: [Action; 2] = [Action::IDLE, Action::IDLE];

    #[test]
    fn test_spawn_rows() {
        let none: &[DVec2] = &[];
        assert_eq!(spawn_position(none, 170.0, Team::Red, 0), DVec2::new(-170.0, 0.0));
        assert_eq!(spawn_position(none, 170.0, Team::Red, 1), DVec2::new(-170.0, -55.0));
        assert_eq!(spawn_position(none, 170.0, Team::Blue, 2), DVec2::new(170.0, 55.0));
        assert_eq!(spawn_position(none, 170.0, Team::Blue, 3), DVec2::new(170.0, -110.0));
    }

    #[test]
    fn test_spawn_points_clamp_to_last() {
        let points = [DVec2::new(-100.0, 0.0), DVec2::new(-100.0, 30.0)];
        assert_eq!(spawn_position(&points, 170.0, Team::Red, 0), points[0]);
        assert_eq!(spawn_position(&points, 170.0, Team::Red, 5), points[1]);
    }

    #[test]
    #[should_panic]
    fn test_step_requires_one_action_per_player() {
        let mut game = classic_game(Score::default());
        game.step(&[Action::IDLE]);
    }

    #[test]
    fn test_kickoff_waits_for_ball_motion() {
        let mut game = classic_game(Score::default());
        for _ in 0..10 {
            assert!(!game.step(&IDLE2));
        }
        assert_eq!(game.state(), GamePhase::Kickoff);
        assert_eq!(game.score().ticks, 0);
        assert_eq!(game.score().total_ticks, 10);

        game.ball_mut().velocity = DVec2::new(1.0, 0.0);
        game.step(&IDLE2);
        assert_eq!(game.state(), GamePhase::Playing);
        let red = game.player_disc(PlayerId(0)).unwrap();
        assert_eq!(red.c_mask, CollisionFlag::PLAYER_PLAYING | CollisionFlag::REDKO);

        game.step(&IDLE2);
        let red = game.player_disc(PlayerId(0)).unwrap();
        assert_eq!(red.c_mask, CollisionFlag::PLAYER_PLAYING);
    }

    #[test]
    fn test_kickoff_barrier_holds_opponent() {
        let mut game = classic_game(Score::default());
        // Blue runs left toward the center circle during red's kickoff
        let run = [Action::IDLE, Action::new(-1, 0, false)];
        for _ in 0..600 {
            game.step(&run);
        }
        assert_eq!(game.state(), GamePhase::Kickoff);
        let blue = game.player_disc(PlayerId(1)).unwrap();
        assert!(blue.position.x > 0.0, "blue crossed midfield: {}", blue.position);
    }

    #[test]
    fn test_goal_detection() {
        let mut game = classic_game(Score::default());
        game.ball_mut().position = DVec2::new(355.0, 0.0);
        game.ball_mut().velocity = DVec2::new(10.0, 0.0);
        game.step(&IDLE2);
        assert_eq!(game.state(), GamePhase::Playing);
        game.step(&IDLE2);
        assert_eq!(game.state(), GamePhase::Goal);
        assert_eq!((game.score().red, game.score().blue), (1, 0));
        // Blue conceded, blue kicks off next
        assert_eq!(game.team_kickoff(), Team::Blue);
    }

    #[test]
    fn test_check_goal_no_crossing() {
        let game = classic_game(Score::default());
        assert_eq!(game.check_goal(&[DVec2::ZERO]), Team::Spectator);
    }

    #[test]
    fn test_goal_resets_to_kickoff() {
        let mut game = classic_game(Score::default());
        game.ball_mut().position = DVec2::new(-355.0, 0.0);
        game.ball_mut().velocity = DVec2::new(-10.0, 0.0);
        game.step(&IDLE2);
        game.step(&IDLE2);
        assert_eq!(game.state(), GamePhase::Goal);
        assert_eq!(game.team_kickoff(), Team::Red);

        for _ in 0..149 {
            game.step(&IDLE2);
        }
        assert_eq!(game.state(), GamePhase::Goal);
        game.step(&IDLE2);
        assert_eq!(game.state(), GamePhase::Kickoff);
        assert_eq!(game.ball().position, DVec2::ZERO);
        assert_eq!(game.ball().velocity, DVec2::ZERO);
        let red = game.player_disc(PlayerId(0)).unwrap();
        assert_eq!(red.position, DVec2::new(-170.0, 0.0));
    }

    #[test]
    fn test_stop_restores_initial_condition() {
        let mut game = classic_game(Score::new(0, 1));
        game.ball_mut().position = DVec2::new(355.0, 0.0);
        game.ball_mut().velocity = DVec2::new(10.0, 0.0);
        for _ in 0..5 {
            game.step(&[Action::new(1, 0, true), Action::IDLE]);
        }
        assert_eq!(game.score().red, 1);

        let saved = game.reset(false).unwrap();
        assert!(saved.is_none());
        assert_eq!(game.state(), GamePhase::Kickoff);
        assert_eq!(game.team_kickoff(), Team::Red);
        assert_eq!(game.score(), &Score::new(0, 1));
        assert_eq!(game.players()[0].stats.touches, 0);
        assert_eq!(game.discs(), classic_game(Score::new(0, 1)).discs());
    }

    #[test]
    fn test_full_reset_restores_every_disc() {
        let map = r#"{
            "name": "Pins",
            "width": 300, "height": 200, "spawnDistance": 100,
            "kickOffReset": "full",
            "vertexes": [], "segments": [], "goals": [], "planes": [
                { "normal": [1, 0], "dist": -300 }, { "normal": [-1, 0], "dist": -300 },
                { "normal": [0, 1], "dist": -200 }, { "normal": [0, -1], "dist": -200 }
            ],
            "discs": [
                { "pos": [50, 50], "radius": 8 },
                { "pos": [-50, -50], "radius": 8, "speed": [1, 2] }
            ]
        }"#;
        let mut game = Game::with_players(
            load_stadium(map).unwrap(),
            Score::default(),
            [("a", Team::Red), ("b", Team::Blue)],
        );
        game.start();
        let spawn = game.discs().to_vec();
        game.ball_mut().velocity = DVec2::new(4.0, 3.0);
        for _ in 0..120 {
            game.step(&[Action::new(1, 1, true), Action::new(-1, 0, false)]);
        }
        assert_ne!(game.discs(), spawn.as_slice());

        game.reset_discs_positions();
        assert_eq!(game.discs(), spawn.as_slice());
    }

    #[test]
    fn test_partial_reset_leaves_map_discs() {
        let mut game = classic_game(Score::default());
        let post = game.discs()[1].clone();
        game.stadium.discs[1].position.y += 5.0;
        game.reset_discs_positions();
        assert_ne!(game.discs()[1], post);
        assert_eq!(game.discs()[0], game.stadium_store().discs[0]);
    }
}
