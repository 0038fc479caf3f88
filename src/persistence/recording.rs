use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::RecordingError;
use crate::sim::{Action, Game, Player, Score, Team};
use crate::stadium::Stadium;

/// Envelope version written by this build
pub const RECORDING_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedPlayer {
    pub name: String,
    pub team: Team,
}

/// A whole match as inputs: replaying them on the same stadium reproduces it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub version: u32,
    pub stadium_name: String,
    /// Registration order, which is also the order of each action vector
    pub players: Vec<RecordedPlayer>,
    /// One action vector per tick
    pub actions: Vec<Vec<Action>>,
}

impl Recording {
    pub fn new(stadium_name: impl Into<String>, players: &[Player]) -> Self {
        Self {
            version: RECORDING_VERSION,
            stadium_name: stadium_name.into(),
            players: players
                .iter()
                .map(|p| RecordedPlayer {
                    name: p.name.clone(),
                    team: p.team,
                })
                .collect(),
            actions: Vec::new(),
        }
    }

    pub fn ticks(&self) -> usize {
        self.actions.len()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecordingError> {
        let path = path.as_ref();
        let json = serde_json::to_string(self)?;
        fs::write(path, json).map_err(|source| RecordingError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a recording, rejecting other envelope versions
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordingError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RecordingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let recording: Self = serde_json::from_str(&json)?;
        if recording.version != RECORDING_VERSION {
            return Err(RecordingError::UnsupportedVersion {
                found: recording.version,
                expected: RECORDING_VERSION,
            });
        }
        log::info!(
            "Loaded recording of {} ticks on {}",
            recording.ticks(),
            recording.stadium_name
        );
        Ok(recording)
    }
}

/// Collects the actions of a running match
#[derive(Debug, Clone)]
pub struct ActionRecorder {
    folder: PathBuf,
    recording: Recording,
}

impl ActionRecorder {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            recording: Recording::new("", &[]),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Begin a fresh recording
    pub fn start(&mut self, stadium_name: &str, players: &[Player]) {
        self.recording = Recording::new(stadium_name, players);
    }

    pub fn step(&mut self, actions: &[Action]) {
        self.recording.actions.push(actions.to_vec());
    }

    /// Close the recording, writing it to the folder when `save` is set
    ///
    /// Returns the path written. The collected actions are dropped either way.
    pub fn stop(&mut self, save: bool) -> Result<Option<PathBuf>, RecordingError> {
        let recording = std::mem::replace(&mut self.recording, Recording::new("", &[]));
        if !save {
            return Ok(None);
        }

        fs::create_dir_all(&self.folder).map_err(|source| RecordingError::Io {
            path: self.folder.clone(),
            source,
        })?;
        let path = self.next_path();
        recording.save(&path)?;
        Ok(Some(path))
    }

    /// `match_<unix millis>.json`, with a suffix if that name is taken
    fn next_path(&self) -> PathBuf {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let mut path = self.folder.join(format!("match_{millis}.json"));
        let mut n = 1;
        while path.exists() {
            path = self.folder.join(format!("match_{millis}_{n}.json"));
            n += 1;
        }
        path
    }
}

/// Re-simulate a recording on `stadium`
///
/// Stops at the end of the recording or when the match reports completion,
/// whichever comes first, and returns the game in that final state.
pub fn replay(recording: &Recording, stadium: Stadium, score: Score) -> Result<Game, RecordingError> {
    if recording.stadium_name != stadium.name {
        return Err(RecordingError::StadiumMismatch {
            recorded: recording.stadium_name.clone(),
            actual: stadium.name,
        });
    }
    let expected = recording.players.len();
    if let Some(frame) = recording.actions.iter().find(|a| a.len() != expected) {
        return Err(RecordingError::PlayerCountMismatch {
            recorded: frame.len(),
            actual: expected,
        });
    }

    let mut game = Game::with_players(
        stadium,
        score,
        recording.players.iter().map(|p| (p.name.clone(), p.team)),
    );
    game.start();
    for (tick, actions) in recording.actions.iter().enumerate() {
        if game.step(actions) {
            log::debug!("Replay finished at tick {tick}");
            break;
        }
    }
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stadium::BaseMap;
    use glam::DVec2;
    use tempfile::TempDir;

    fn recorded_game(folder: &Path) -> Game {
        let mut game = Game::with_players(
            BaseMap::Classic.load().unwrap(),
            Score::new(0, 1),
            [("red", Team::Red), ("blue", Team::Blue)],
        );
        game.enable_recorder(folder);
        game.start();
        game
    }

    #[test]
    fn test_stop_without_save_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut game = recorded_game(dir.path());
        game.step(&[Action::new(1, 0, false), Action::IDLE]);
        assert_eq!(game.recorder().unwrap().recording().ticks(), 1);

        assert!(game.stop(false).unwrap().is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut game = recorded_game(&dir.path().join("nested"));
        for _ in 0..30 {
            game.step(&[Action::new(1, 0, true), Action::new(-1, 1, false)]);
        }
        let path = game.stop(true).unwrap().unwrap();
        assert!(path.starts_with(dir.path().join("nested")));

        let recording = Recording::load(&path).unwrap();
        assert_eq!(recording.version, RECORDING_VERSION);
        assert_eq!(recording.stadium_name, "Classic");
        assert_eq!(recording.players[1].team, Team::Blue);
        assert_eq!(recording.ticks(), 30);
        assert_eq!(recording.actions[0][1], Action::new(-1, 1, false));

        // The recorder starts over after a stop
        game.start();
        assert_eq!(game.recorder().unwrap().recording().ticks(), 0);
    }

    #[test]
    fn test_two_saves_get_distinct_paths() {
        let dir = TempDir::new().unwrap();
        let mut recorder = ActionRecorder::new(dir.path());
        recorder.start("Classic", &[]);
        let a = recorder.stop(true).unwrap().unwrap();
        recorder.start("Classic", &[]);
        let b = recorder.stop(true).unwrap().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unsupported_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("old.json");
        let mut recording = Recording::new("Classic", &[]);
        recording.version = 99;
        recording.save(&path).unwrap();
        assert!(matches!(
            Recording::load(&path),
            Err(RecordingError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_replay_reproduces_match() {
        let dir = TempDir::new().unwrap();
        let mut game = recorded_game(dir.path());
        let script = [Action::new(1, 0, true), Action::new(-1, -1, true)];
        for tick in 0..400 {
            let actions = if tick % 50 < 25 {
                script
            } else {
                [script[0].mirrored(), Action::IDLE]
            };
            game.step(&actions);
        }
        let ball: DVec2 = game.ball().position;
        let score = game.score().clone();
        let recording = game.recorder().unwrap().recording().clone();

        let replayed = replay(&recording, BaseMap::Classic.load().unwrap(), Score::new(0, 1)).unwrap();
        assert_eq!(replayed.ball().position, ball);
        assert_eq!(replayed.score(), &score);
        assert_eq!(replayed.discs(), game.discs());
    }

    #[test]
    fn test_replay_checks_stadium() {
        let recording = Recording::new("Elsewhere", &[]);
        let result = replay(&recording, BaseMap::Classic.load().unwrap(), Score::default());
        assert!(matches!(result, Err(RecordingError::StadiumMismatch { .. })));
    }

    #[test]
    fn test_replay_checks_frame_width() {
        let mut recording = Recording::new("Classic", &[]);
        recording.actions.push(vec![Action::IDLE]);
        let result = replay(&recording, BaseMap::Classic.load().unwrap(), Score::default());
        assert!(matches!(
            result,
            Err(RecordingError::PlayerCountMismatch { recorded: 1, actual: 0 })
        ));
    }
}
