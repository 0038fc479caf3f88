//! Match state and the engine surface
//!
//! A `Game` owns two stadiums: the immutable store loaded from the map, and
//! the live copy mutated every tick. Resets clone store into live; the static
//! geometry is shared, the discs are deep-copied.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::disc::Disc;
use super::geometry::Team;
use super::player::{Player, PlayerId, PlayerIdAllocator};
use super::score::Score;
use crate::persistence::ActionRecorder;
use crate::stadium::Stadium;

/// Phase of the match state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the kickoff team to touch the ball
    Kickoff,
    /// Ball in play
    Playing,
    /// Goal celebration
    Goal,
    /// Final whistle celebration
    End,
}

/// One match: stadium, players, score and phase
#[derive(Debug, Clone)]
pub struct Game {
    pub(super) store: Stadium,
    pub(super) stadium: Stadium,
    pub(super) score: Score,
    pub(super) phase: GamePhase,
    pub(super) team_kickoff: Team,
    pub(super) players: Vec<Player>,
    ids: PlayerIdAllocator,
    pub(super) recorder: Option<ActionRecorder>,
}

impl Game {
    pub fn new(stadium: Stadium, score: Score) -> Self {
        Self {
            stadium: stadium.clone(),
            store: stadium,
            score,
            phase: GamePhase::Kickoff,
            team_kickoff: Team::Red,
            players: Vec::new(),
            ids: PlayerIdAllocator::new(),
            recorder: None,
        }
    }

    /// Match with players registered in order
    pub fn with_players<S: Into<String>>(
        stadium: Stadium,
        score: Score,
        players: impl IntoIterator<Item = (S, Team)>,
    ) -> Self {
        let mut game = Self::new(stadium, score);
        for (name, team) in players {
            game.add_player(name, team);
        }
        game
    }

    /// Register a player; their disc appears on `start`
    ///
    /// Actions passed to `step` follow registration order.
    pub fn add_player(&mut self, name: impl Into<String>, team: Team) -> PlayerId {
        let id = self.ids.allocate();
        let player = Player::new(id, name, team);
        log::debug!("Added player {} ({}) to team {}", player.name, id, team.as_str());
        self.players.push(player);
        id
    }

    /// Save an action recording under `folder` every time the match stops
    pub fn enable_recorder(&mut self, folder: impl Into<PathBuf>) {
        self.recorder = Some(ActionRecorder::new(folder));
    }

    pub fn recorder(&self) -> Option<&ActionRecorder> {
        self.recorder.as_ref()
    }

    /// Put the players on the pitch and open the kickoff
    pub fn start(&mut self) {
        self.stadium.discs.truncate(self.store.discs.len());
        for player in &self.players {
            if player.team != Team::Spectator {
                let disc = self.store.player_physics.spawn_disc(player.id, player.team);
                self.stadium.discs.push(disc);
            }
        }
        self.reset_discs_positions();
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.start(&self.store.name, &self.players);
        }
        log::debug!(
            "Match started on {} with {} players",
            self.store.name,
            self.players.len()
        );
    }

    pub fn state(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn team_kickoff(&self) -> Team {
        self.team_kickoff
    }

    /// The live stadium
    pub fn stadium(&self) -> &Stadium {
        &self.stadium
    }

    /// The stadium as loaded, never mutated by play
    pub fn stadium_store(&self) -> &Stadium {
        &self.store
    }

    pub fn discs(&self) -> &[Disc] {
        &self.stadium.discs
    }

    pub fn ball(&self) -> &Disc {
        self.stadium.ball()
    }

    /// Direct access to the live ball, for setting up situations
    pub fn ball_mut(&mut self) -> &mut Disc {
        &mut self.stadium.discs[0]
    }

    pub fn player_disc(&self, id: PlayerId) -> Option<&Disc> {
        self.stadium.discs.iter().find(|d| d.player_id() == Some(id))
    }

    pub fn player_disc_mut(&mut self, id: PlayerId) -> Option<&mut Disc> {
        self.stadium.discs.iter_mut().find(|d| d.player_id() == Some(id))
    }
}
