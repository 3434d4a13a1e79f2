use std::{
  fs,
  path::Path,
  time::Duration,
};

use serde::Deserialize;

use crate::error::{
  Result,
  TableError,
};

/// Tunables for paging, debouncing and the bottom-of-scroll detector.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TableConfig {
  /// Rows appended per page
  pub page_size:          usize,
  /// Latency of the built-in seed page provider
  pub fetch_latency_ms:   u64,
  /// Quiet interval before a search term is committed
  pub search_debounce_ms: u64,
  /// Quiet interval before a scroll position is evaluated
  pub scroll_debounce_ms: u64,
  /// Distance from the bottom that counts as "near bottom"
  pub scroll_threshold:   f64,
}

impl Default for TableConfig {
  fn default() -> Self {
    Self {
      page_size:          20,
      fetch_latency_ms:   1000,
      search_debounce_ms: 500,
      scroll_debounce_ms: 500,
      scroll_threshold:   100.0,
    }
  }
}

impl TableConfig {
  pub fn from_toml_str(text: &str) -> Result<Self> {
    let config: TableConfig = toml::from_str(text)?;
    Ok(config.normalized())
  }

  pub fn load(path: &Path) -> Result<Self> {
    let text = fs::read_to_string(path).map_err(|source| {
      TableError::Io {
        path: path.to_path_buf(),
        source,
      }
    })?;
    Self::from_toml_str(&text)
  }

  pub fn fetch_latency(&self) -> Duration {
    Duration::from_millis(self.fetch_latency_ms)
  }

  pub fn search_debounce(&self) -> Duration {
    Duration::from_millis(self.search_debounce_ms)
  }

  pub fn scroll_debounce(&self) -> Duration {
    Duration::from_millis(self.scroll_debounce_ms)
  }

  fn normalized(mut self) -> Self {
    // a zero page size would never make progress
    self.page_size = self.page_size.max(1);
    self
  }
}
