use std::sync::Arc;

use crate::{
  row::{
    Row,
    RowPath,
    row_at,
  },
  seed::SeedData,
};

/// Owns the canonical dataset and the displayed sequence.
///
/// The two are separate containers: pages are copied out of the canonical
/// dataset into the displayed sequence, and a search result replaces the
/// displayed sequence wholesale.
///
/// Displayed top-level rows are shared with the snapshots handed to
/// renderers. Mutating a displayed row copies only its own top-level subtree,
/// and only while a snapshot still holds it.
#[derive(Debug)]
pub struct RowTreeStore {
  seed:      SeedData,
  canonical: Vec<Row>,
  displayed: Vec<Arc<Row>>,
}

impl RowTreeStore {
  pub fn new(seed: SeedData) -> Self {
    let canonical = seed.to_rows();
    Self {
      seed,
      canonical,
      displayed: Vec::new(),
    }
  }

  pub fn seed(&self) -> &SeedData {
    &self.seed
  }

  pub fn canonical(&self) -> &[Row] {
    &self.canonical
  }

  pub fn displayed(&self) -> &[Arc<Row>] {
    &self.displayed
  }

  pub fn displayed_row(&self, path: &RowPath) -> Option<&Row> {
    row_at(self.displayed.as_slice(), path)
  }

  pub fn displayed_row_mut(&mut self, path: &RowPath) -> Option<&mut Row> {
    // look before copying anything out of a shared row
    self.displayed_row(path)?;
    let (&first, rest) = path.indices().split_first()?;
    Arc::make_mut(self.displayed.get_mut(first)?).descendant_mut(rest)
  }

  /// Appends a page to the displayed sequence. Pages are expected to be
  /// disjoint; nothing is de-duplicated here.
  pub fn append(&mut self, rows: impl IntoIterator<Item = Row>) {
    self.displayed.extend(rows.into_iter().map(Arc::new));
  }

  pub fn replace_displayed(&mut self, rows: Vec<Row>) {
    self.displayed = rows.into_iter().map(Arc::new).collect();
  }

  /// Replaces the canonical dataset with a pristine copy of the seed and
  /// hands it out for a search pass.
  pub fn refresh_canonical(&mut self) -> &mut [Row] {
    self.canonical = self.seed.to_rows();
    &mut self.canonical
  }

  /// Pristine canonical dataset, empty displayed sequence.
  pub fn reset(&mut self) {
    self.canonical = self.seed.to_rows();
    self.displayed.clear();
  }
}
