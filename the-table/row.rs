use std::{
  borrow::Borrow,
  fmt,
  str::FromStr,
};

use serde::{
  Deserialize,
  Serialize,
};
use smallvec::SmallVec;

use crate::error::TableError;

/// A node in the hierarchy.
///
/// The business fields are never touched by the engine. The flags are UI
/// state: `expanded` and `highlight` are owned by the search pass, `selected`
/// by the checkbox column, `hover` is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
  pub name:         String,
  #[serde(rename = "type")]
  pub kind:         String,
  pub email:        String,
  pub phone_no:     String,
  pub company_name: String,
  pub address:      String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub children:     Option<Vec<Row>>,
  #[serde(default)]
  pub expanded:     bool,
  #[serde(default)]
  pub selected:     bool,
  #[serde(default)]
  pub highlight:    bool,
  #[serde(default)]
  pub hover:        bool,
}

impl Row {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  pub fn with_children(mut self, children: Vec<Row>) -> Self {
    self.children = Some(children);
    self
  }

  /// Child rows; a leaf and an empty child list look the same.
  pub fn children(&self) -> &[Row] {
    self.children.as_deref().unwrap_or_default()
  }

  pub fn children_mut(&mut self) -> &mut [Row] {
    self.children.as_deref_mut().unwrap_or_default()
  }

  pub fn has_children(&self) -> bool {
    !self.children().is_empty()
  }

  /// The row reached by following `indices` down from this one.
  pub fn descendant(&self, indices: &[usize]) -> Option<&Row> {
    indices
      .iter()
      .try_fold(self, |row, &index| row.children().get(index))
  }

  pub fn descendant_mut(&mut self, indices: &[usize]) -> Option<&mut Row> {
    indices
      .iter()
      .try_fold(self, |row, &index| row.children_mut().get_mut(index))
  }

  /// Case-insensitive substring match on `name`.
  pub fn name_matches(&self, needle_lowercase: &str) -> bool {
    self.name.to_lowercase().contains(needle_lowercase)
  }
}

/// Address of a row: the index in the top-level sequence followed by the
/// child index at every level below it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowPath(SmallVec<[usize; 4]>);

impl RowPath {
  pub fn root(index: usize) -> Self {
    let mut indices = SmallVec::new();
    indices.push(index);
    Self(indices)
  }

  pub fn from_indices(indices: &[usize]) -> Self {
    Self(SmallVec::from_slice(indices))
  }

  pub fn child(&self, index: usize) -> Self {
    let mut path = self.clone();
    path.0.push(index);
    path
  }

  pub fn indices(&self) -> &[usize] {
    &self.0
  }

  /// Number of levels; `1` for a top-level row, `0` for the empty path.
  pub fn depth(&self) -> usize {
    self.0.len()
  }

  pub fn is_top_level(&self) -> bool {
    self.depth() == 1
  }

  pub fn top_level(&self) -> Option<usize> {
    self.0.first().copied()
  }

  pub(crate) fn push(&mut self, index: usize) {
    self.0.push(index);
  }

  pub(crate) fn pop(&mut self) {
    self.0.pop();
  }
}

impl fmt::Display for RowPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, index) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str(".")?;
      }
      write!(f, "{index}")?;
    }
    Ok(())
  }
}

impl FromStr for RowPath {
  type Err = TableError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.is_empty() {
      return Err(TableError::InvalidPath(s.to_string()));
    }
    s.split('.')
      .map(|segment| {
        segment
          .parse::<usize>()
          .map_err(|_| TableError::InvalidPath(s.to_string()))
      })
      .collect::<Result<SmallVec<_>, _>>()
      .map(Self)
  }
}

pub fn row_at<'a, R: Borrow<Row>>(rows: &'a [R], path: &RowPath) -> Option<&'a Row> {
  let (first, rest) = path.indices().split_first()?;
  let row: &Row = rows.get(*first)?.borrow();
  row.descendant(rest)
}

/// Visits every row depth-first, parents before children.
pub fn walk<'a, R: Borrow<Row>>(rows: &'a [R], visit: &mut impl FnMut(&'a Row)) {
  for row in rows {
    let row: &Row = row.borrow();
    visit(row);
    walk(row.children(), visit);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tree() -> Vec<Row> {
    vec![
      Row::new("Acme").with_children(vec![
        Row::new("Alice"),
        Row::new("Bob").with_children(vec![Row::new("Carol")]),
      ]),
      Row::new("Globex").with_children(vec![]),
    ]
  }

  #[test]
  fn deserializes_camel_case_fields() {
    let row: Row = serde_json::from_str(
      r#"{
        "name": "Acme",
        "type": "Company",
        "email": "info@acme.test",
        "phoneNo": "555-0100",
        "companyName": "Acme Corp",
        "address": "1 Road",
        "children": [{
          "name": "Alice", "type": "Person", "email": "", "phoneNo": "",
          "companyName": "", "address": "", "selected": true
        }]
      }"#,
    )
    .unwrap();

    assert_eq!(row.kind, "Company");
    assert_eq!(row.phone_no, "555-0100");
    assert_eq!(row.company_name, "Acme Corp");
    assert!(!row.expanded);
    assert!(row.children()[0].selected);
  }

  #[test]
  fn empty_children_behave_like_leaf() {
    let rows = tree();
    assert!(rows[0].has_children());
    assert!(!rows[1].has_children());
    assert!(rows[1].children().is_empty());
    assert!(Row::new("leaf").children().is_empty());
  }

  #[test]
  fn path_lookup() {
    let mut rows = tree();
    let carol = RowPath::from_indices(&[0, 1, 0]);
    assert_eq!(row_at(&rows, &carol).map(|row| row.name.as_str()), Some("Carol"));
    assert!(row_at(&rows, &RowPath::from_indices(&[0, 2])).is_none());
    assert!(row_at(&rows, &RowPath::default()).is_none());

    rows[0].descendant_mut(&[1, 0]).unwrap().selected = true;
    assert!(rows[0].children()[1].children()[0].selected);
    assert!(rows[0].descendant(&[]).is_some_and(|row| row.name == "Acme"));
    assert!(rows[1].descendant_mut(&[0]).is_none());
  }

  #[test]
  fn path_text_form() {
    let path: RowPath = "3.0.2".parse().unwrap();
    assert_eq!(path.indices(), &[3, 0, 2]);
    assert_eq!(path.to_string(), "3.0.2");
    assert_eq!(path.top_level(), Some(3));
    assert!(RowPath::root(4).is_top_level());

    assert!("".parse::<RowPath>().is_err());
    assert!("1..2".parse::<RowPath>().is_err());
    assert!("a".parse::<RowPath>().is_err());
  }

  #[test]
  fn walk_is_preorder() {
    let mut names = Vec::new();
    walk(&tree(), &mut |row| names.push(row.name.clone()));
    assert_eq!(names, ["Acme", "Alice", "Bob", "Carol", "Globex"]);
  }
}
