use std::sync::Arc;

use tokio::sync::watch;

use crate::row::Row;

/// Which producer currently owns the display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplaySource {
  #[default]
  Paged,
  Searched {
    term: String,
  },
}

impl DisplaySource {
  pub fn is_searched(&self) -> bool {
    matches!(self, DisplaySource::Searched { .. })
  }
}

/// What the rendering layer draws.
#[derive(Debug, Clone, Default)]
pub struct DisplaySnapshot {
  pub source:   DisplaySource,
  /// Top-level rows, shared with the store until one of them changes
  pub rows:     Arc<[Arc<Row>]>,
  /// Bumped on every emission
  pub revision: u64,
}

/// Single notifier for "the rows to show right now".
///
/// Only one source is authoritative at a time. Pages landing while a search
/// owns the display are not emitted; switching sources always re-emits.
#[derive(Debug)]
pub struct DisplayComposer {
  source:   DisplaySource,
  revision: u64,
  tx:       watch::Sender<DisplaySnapshot>,
}

impl DisplayComposer {
  pub fn new() -> Self {
    let (tx, _) = watch::channel(DisplaySnapshot::default());
    Self {
      source: DisplaySource::Paged,
      revision: 0,
      tx,
    }
  }

  pub fn subscribe(&self) -> watch::Receiver<DisplaySnapshot> {
    self.tx.subscribe()
  }

  pub(crate) fn source(&self) -> &DisplaySource {
    &self.source
  }

  pub fn snapshot(&self) -> DisplaySnapshot {
    self.tx.borrow().clone()
  }

  /// A page was appended. Returns whether anything was emitted.
  pub fn page_appended(&mut self, displayed: &[Arc<Row>]) -> bool {
    if self.source.is_searched() {
      return false;
    }
    self.emit(displayed);
    true
  }

  pub fn show_search(&mut self, term: &str, rows: &[Arc<Row>]) {
    self.source = DisplaySource::Searched {
      term: term.to_string(),
    };
    self.emit(rows);
  }

  pub fn show_paged(&mut self, displayed: &[Arc<Row>]) {
    self.source = DisplaySource::Paged;
    self.emit(displayed);
  }

  /// Re-emits under the current source, e.g. after a flag changed.
  pub fn refresh(&mut self, displayed: &[Arc<Row>]) {
    self.emit(displayed);
  }

  /// Copies the row pointers only; unchanged rows are shared with earlier
  /// snapshots.
  fn emit(&mut self, rows: &[Arc<Row>]) {
    self.revision += 1;
    let snapshot = DisplaySnapshot {
      source:   self.source.clone(),
      rows:     rows.into(),
      revision: self.revision,
    };
    // receivers may come and go, the latest value is kept either way
    self.tx.send_replace(snapshot);
  }
}

impl Default for DisplayComposer {
  fn default() -> Self {
    Self::new()
  }
}
