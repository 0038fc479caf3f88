//! Error types
//!
//! Only loading and persistence can fail. Everything that happens inside a
//! tick is either well defined (degenerate geometry is a no-op) or a
//! programmer error guarded by an assertion.

use std::path::PathBuf;

use thiserror::Error;

/// A map description could not be turned into a stadium
#[derive(Debug, Error)]
pub enum MapFormatError {
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed document or missing required field (serde names the field)
    #[error("malformed map document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unknown collision flag `{0}`")]
    UnknownCollisionFlag(String),

    #[error("invalid value {value:?} for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error("invalid color {value:?} for {field}")]
    InvalidColor { field: &'static str, value: String },

    #[error("segment {segment} references vertex {index}, but only {count} vertexes exist")]
    VertexOutOfRange {
        segment: usize,
        index: usize,
        count: usize,
    },

    #[error("invalid ballPhysics value `{0}` (expected \"disc0\" or an object)")]
    InvalidBall(String),

    #[error("ballPhysics is \"disc0\" but the map has no discs")]
    NoDiscForBall,

    #[error("unknown built-in map `{0}`")]
    UnknownBaseMap(String),
}

/// Saving or replaying an action recording failed
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("recording I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("recording is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported recording version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("recording was made on stadium `{recorded}`, replay uses `{actual}`")]
    StadiumMismatch { recorded: String, actual: String },

    #[error("recording has {recorded} players per tick, game has {actual}")]
    PlayerCountMismatch { recorded: usize, actual: usize },
}

/// Reading or writing a config file failed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
