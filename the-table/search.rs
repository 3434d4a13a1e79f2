//! Recursive search over the row tree.
//!
//! A pass walks the tree depth-first, post-order. A row whose name contains the
//! term is highlighted; a row with a matching descendant is expanded. Every
//! row that is either is recorded once in a [`SearchAccumulator`]. The rows to
//! display are the recorded rows that sit at the top level, which brings in
//! the whole chain of expanded ancestors above each deep match.

use indexmap::IndexSet;

use crate::row::{
  Row,
  RowPath,
};

/// Rows touched by one search pass: direct matches and ancestor hits,
/// de-duplicated, in the order they were recorded.
#[derive(Debug, Default)]
pub struct SearchAccumulator {
  rows_with_parents: IndexSet<RowPath>,
  matches:           usize,
  ancestor_hits:     usize,
}

impl SearchAccumulator {
  pub fn new() -> Self {
    Self::default()
  }

  fn record(&mut self, path: &RowPath) {
    if !self.rows_with_parents.contains(path) {
      self.rows_with_parents.insert(path.clone());
    }
  }

  pub(crate) fn recorded(&self) -> impl Iterator<Item = &RowPath> {
    self.rows_with_parents.iter()
  }

  /// Top-level indices among the recorded rows, in the order they were
  /// recorded.
  pub fn topmost(&self) -> Vec<usize> {
    self
      .rows_with_parents
      .iter()
      .filter(|path| path.is_top_level())
      .filter_map(RowPath::top_level)
      .collect()
  }
}

/// Outcome of [`search_tree`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
  /// Indices of the top-level rows to show, in dataset order
  pub topmost:       Vec<usize>,
  /// Rows whose own name matched
  pub matches:       usize,
  /// Rows expanded because something below them matched
  pub ancestor_hits: usize,
}

impl SearchResult {
  pub fn is_empty(&self) -> bool {
    self.topmost.is_empty()
  }

  /// Clones the topmost rows (with their annotated subtrees) out of `rows`.
  pub fn collect_rows(&self, rows: &[Row]) -> Vec<Row> {
    self
      .topmost
      .iter()
      .filter_map(|index| rows.get(*index).cloned())
      .collect()
  }
}

/// Annotates `rows` for `term` and returns the top-level rows to display.
///
/// `highlight` and `expanded` are assigned on every visited row, so flags left
/// behind by an earlier term cannot survive. An empty term matches nothing;
/// callers treat it as "no search" before getting here.
pub fn search_tree(rows: &mut [Row], term: &str) -> SearchResult {
  let mut accumulator = SearchAccumulator::new();
  if !term.is_empty() {
    let needle = term.to_lowercase();
    let mut prefix = RowPath::default();
    search_rows(rows, &needle, &mut prefix, &mut accumulator);
  }
  let topmost = accumulator.topmost();
  log::debug!(
    "search {term:?}: {} matches, {} ancestors, {} top-level rows",
    accumulator.matches,
    accumulator.ancestor_hits,
    topmost.len()
  );
  SearchResult {
    topmost,
    matches: accumulator.matches,
    ancestor_hits: accumulator.ancestor_hits,
  }
}

/// Searches one sibling sequence whose parent lives at `prefix`.
///
/// Returns the paths of every match below and including these rows. The caller
/// only checks whether the list is empty.
pub fn search_rows(
  rows: &mut [Row],
  needle_lowercase: &str,
  prefix: &mut RowPath,
  accumulator: &mut SearchAccumulator,
) -> Vec<RowPath> {
  let mut matching = Vec::new();

  for (index, row) in rows.iter_mut().enumerate() {
    prefix.push(index);

    row.expanded = false;
    if row.has_children() {
      let child_matches = search_rows(row.children_mut(), needle_lowercase, prefix, accumulator);
      if !child_matches.is_empty() {
        row.expanded = true;
        accumulator.ancestor_hits += 1;
        accumulator.record(prefix);
        matching.extend(child_matches);
      }
    }

    row.highlight = row.name_matches(needle_lowercase);
    if row.highlight {
      accumulator.matches += 1;
      accumulator.record(prefix);
      matching.push(prefix.clone());
    }

    prefix.pop();
  }

  matching
}

#[cfg(test)]
mod tests {
  use quickcheck::{
    Arbitrary,
    Gen,
  };

  use super::*;
  use crate::row::walk;

  fn company(name: &str, people: Vec<Row>) -> Row {
    Row::new(name).with_children(people)
  }

  fn tree() -> Vec<Row> {
    vec![
      company("Acme", vec![Row::new("Alice"), Row::new("Bob")]),
      company("Globex", vec![company("Research", vec![Row::new("Hank Acme")])]),
      company("Initech", vec![Row::new("Peter")]),
      Row::new("acme labs"),
    ]
  }

  fn names(rows: &[Row]) -> Vec<&str> {
    rows.iter().map(|row| row.name.as_str()).collect()
  }

  #[test]
  fn matches_are_case_insensitive_substrings() {
    let mut rows = tree();
    let result = search_tree(&mut rows, "ACME");
    assert_eq!(result.topmost, [0, 1, 3]);
    assert_eq!(result.matches, 3);
    assert_eq!(names(&result.collect_rows(&rows)), [
      "Acme",
      "Globex",
      "acme labs"
    ]);
  }

  #[test]
  fn deep_match_expands_every_ancestor() {
    let mut rows = tree();
    search_tree(&mut rows, "hank");

    let globex = &rows[1];
    let research = &globex.children()[0];
    let hank = &research.children()[0];
    assert!(globex.expanded && !globex.highlight);
    assert!(research.expanded && !research.highlight);
    assert!(hank.highlight && !hank.expanded);
    assert!(!rows[0].expanded);
  }

  #[test]
  fn intermediate_matches_are_not_listed_at_top_level() {
    let mut rows = tree();
    let result = search_tree(&mut rows, "research");
    assert_eq!(result.topmost, [1]);
    assert_eq!(result.ancestor_hits, 1);
  }

  #[test]
  fn row_can_be_both_match_and_ancestor() {
    let mut rows = vec![company("Acme", vec![Row::new("Acme Jr")])];
    let result = search_tree(&mut rows, "acme");
    assert_eq!(result.topmost, [0]);
    assert!(rows[0].expanded && rows[0].highlight);
  }

  #[test]
  fn no_match_is_empty_not_error() {
    let mut rows = tree();
    let result = search_tree(&mut rows, "zzz");
    assert!(result.is_empty());
    assert!(result.collect_rows(&rows).is_empty());
  }

  #[test]
  fn flags_are_recomputed_not_accumulated() {
    let mut rows = tree();
    search_tree(&mut rows, "hank");
    search_tree(&mut rows, "peter");

    assert!(!rows[1].expanded);
    assert!(!rows[1].children()[0].children()[0].highlight);
    assert!(rows[2].expanded);
    assert!(rows[2].children()[0].highlight);
  }

  #[test]
  fn accumulator_is_shared_across_siblings() {
    let mut rows = tree();
    let mut accumulator = SearchAccumulator::new();
    let mut prefix = RowPath::default();
    let matching = search_rows(&mut rows, "a", &mut prefix, &mut accumulator);

    // every recorded path is unique and every match is recorded
    let recorded: Vec<_> = accumulator.recorded().cloned().collect();
    for path in &matching {
      assert!(recorded.contains(path));
    }
    let unique: std::collections::HashSet<_> = recorded.iter().collect();
    assert_eq!(recorded.len(), unique.len());
    assert!(prefix.indices().is_empty());
  }

  #[derive(Clone, Debug)]
  struct Forest(Vec<Row>);

  const NAMES: &[&str] = &["Acme", "acme", "Ada", "Bob", "ACME Ltd", "Carol", "Dan", "Macmee"];

  fn arbitrary_row(g: &mut Gen, depth: usize) -> Row {
    let name = (*g.choose(NAMES).unwrap()).to_string();
    let mut row = Row::new(name);
    row.expanded = bool::arbitrary(g);
    row.highlight = bool::arbitrary(g);
    if depth > 0 && bool::arbitrary(g) {
      let count = usize::arbitrary(g) % 4;
      row.children = Some((0..count).map(|_| arbitrary_row(g, depth - 1)).collect());
    }
    row
  }

  impl Arbitrary for Forest {
    fn arbitrary(g: &mut Gen) -> Self {
      let count = usize::arbitrary(g) % 6;
      Forest((0..count).map(|_| arbitrary_row(g, 3)).collect())
    }
  }

  fn has_highlight(row: &Row) -> bool {
    let mut found = false;
    walk(std::slice::from_ref(row), &mut |row| found |= row.highlight);
    found
  }

  quickcheck::quickcheck! {
      fn highlighted_rows_contain_the_term(forest: Forest) -> bool {
          let mut rows = forest.0;
          search_tree(&mut rows, "acme");
          let mut ok = true;
          walk(&rows, &mut |row| {
              ok &= row.highlight == row.name.to_lowercase().contains("acme");
          });
          ok
      }

      fn topmost_rows_lead_to_a_highlight(forest: Forest) -> bool {
          let mut rows = forest.0;
          let result = search_tree(&mut rows, "acme");
          result.collect_rows(&rows).iter().all(has_highlight)
              && (0..rows.len())
                  .filter(|index| !result.topmost.contains(index))
                  .all(|index| !has_highlight(&rows[index]))
      }
  }
}
