use std::{
  fs,
  path::Path,
  sync::Arc,
};

use crate::{
  error::{
    Result,
    TableError,
  },
  row::Row,
};

/// The immutable source every canonical copy is cloned from.
///
/// Cloning `SeedData` is cheap; cloning its rows (see [`SeedData::to_rows`])
/// is the deep copy taken on reset and on every new search term.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
  rows: Arc<[Row]>,
}

impl SeedData {
  pub fn new(rows: Vec<Row>) -> Self {
    Self { rows: rows.into() }
  }

  pub fn from_json(json: &str) -> Result<Self> {
    let rows: Vec<Row> = serde_json::from_str(json)?;
    Ok(Self::new(rows))
  }

  pub fn load(path: &Path) -> Result<Self> {
    let json = fs::read_to_string(path).map_err(|source| {
      TableError::Io {
        path: path.to_path_buf(),
        source,
      }
    })?;
    Self::from_json(&json)
  }

  pub fn rows(&self) -> &[Row] {
    &self.rows
  }

  /// Deep copy of the top-level rows and everything below them.
  pub fn to_rows(&self) -> Vec<Row> {
    self.rows.to_vec()
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
}

impl From<Vec<Row>> for SeedData {
  fn from(rows: Vec<Row>) -> Self {
    Self::new(rows)
  }
}
