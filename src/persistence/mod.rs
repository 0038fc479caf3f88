//! Action recordings and replay
//!
//! Features:
//! - Versioned JSON envelope holding the stadium name, the players and every
//!   tick's action vector
//! - `ActionRecorder` attached to a `Game`, saved when the match stops
//! - Deterministic replay: re-simulating a recording reproduces the match

pub mod recording;

pub use recording::{ActionRecorder, RECORDING_VERSION, RecordedPlayer, Recording, replay};
