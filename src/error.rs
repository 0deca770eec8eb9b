//! Error type shared by every part of the crate

use std::path::PathBuf;

use burn::record::RecorderError;
use thiserror::Error;

/// Errors raised by the replay memory, the agent and the training driver
#[derive(Debug, Error)]
pub enum Error {
    /// The replay memory cannot provide a batch of the requested size yet.
    ///
    /// The learning step treats this as a warm-up gap and skips silently.
    #[error("replay memory holds {available} transitions, {requested} requested")]
    InsufficientData { available: usize, requested: usize },

    /// `observe` was called without a preceding `select_action`.
    ///
    /// This is a driver bug and is not recoverable.
    #[error("observe called before select_action")]
    ObserveBeforeSelect,

    #[error("no checkpoint found at {}", .0.display())]
    CheckpointNotFound(PathBuf),

    #[error("checkpoint format version {found} is not supported (expected {expected})")]
    CheckpointVersion { found: u32, expected: u32 },

    #[error("checkpoint recorder failed: {0}")]
    Recorder(#[from] RecorderError),

    /// A loss or a parameter became NaN or infinite.
    #[error("non-finite {what} detected at step {step}")]
    NumericDivergence { what: &'static str, step: usize },

    #[error("expected {what} of length {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
