//! Error type shared by every stage of the bridge.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Failures surfaced to the host build tool.
///
/// Nothing in the crate retries; every variant is reported straight back to the caller.
#[derive(Debug, Error)]
pub enum BridgeError {
  /// Reading, writing or deleting a file failed.
  #[error("failed to access {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },

  /// JSON content could not be parsed or serialised.
  #[error("invalid JSON in {}: {source}", .path.display())]
  Parse {
    /// File (or bundle entry) the JSON came from.
    path: PathBuf,
    /// Source serde error.
    source: serde_json::Error,
  },

  /// A configuration file exists but cannot be used.
  #[error("failed to load configuration {}: {message}", .path.display())]
  Config {
    /// Configuration file path.
    path: PathBuf,
    /// Human readable reason.
    message: String,
  },

  /// A lifecycle hook ran before the state it depends on was captured.
  #[error("lifecycle hook ran out of order: {0}")]
  HookOrder(&'static str),

  /// One or more of the concurrent finalisation tasks failed.
  #[error("build finalisation failed: {}", join_messages(.0))]
  Finalize(Vec<BridgeError>),
}

impl BridgeError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
    Self::Parse {
      path: path.into(),
      source,
    }
  }
}

fn join_messages(errors: &[BridgeError]) -> String {
  errors
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}
