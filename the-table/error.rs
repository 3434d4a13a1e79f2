use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the edges of the table engine.
///
/// UI events never fail; these cover loading seed data and configuration, and
/// page providers that could not deliver.
#[derive(Error, Debug)]
pub enum TableError {
  /// Seed JSON did not describe a list of rows
  #[error("Failed to parse seed data: {0}")]
  Seed(#[from] serde_json::Error),

  /// A seed or config file could not be read
  #[error("Failed to read {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    source: std::io::Error,
  },

  /// Config TOML was malformed or carried unknown keys
  #[error("Failed to parse table config: {0}")]
  Config(#[from] toml::de::Error),

  /// The page provider could not deliver the requested range
  #[error("Failed to fetch page: {0}")]
  PageFetch(String),

  /// Text could not be parsed as a row path
  #[error("Invalid row path: {0:?}")]
  InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, TableError>;
