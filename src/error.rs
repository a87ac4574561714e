//! Error types for queue editing and configuration

use std::path::PathBuf;
use thiserror::Error;

use crate::model::TrackId;

/// Why a queue command was refused. The session is left untouched in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("index {index} is out of range for a queue of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot remove the item that is currently playing")]
    CannotRemoveCurrent,

    #[error("queue is empty")]
    EmptyQueue,

    #[error("track {0} not found")]
    TrackNotFound(TrackId),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
