use std::borrow::Borrow;

use crate::row::Row;

/// Every selected row at any depth, children ahead of their parent.
pub fn selected_rows<R: Borrow<Row>>(rows: &[R]) -> Vec<&Row> {
  let mut selected = Vec::new();
  collect_selected(rows, &mut selected);
  selected
}

fn collect_selected<'a, R: Borrow<Row>>(rows: &'a [R], selected: &mut Vec<&'a Row>) {
  for row in rows {
    let row: &Row = row.borrow();
    collect_selected(row.children(), selected);
    if row.selected {
      selected.push(row);
    }
  }
}

pub fn any_selected<R: Borrow<Row>>(rows: &[R]) -> bool {
  rows.iter().any(|row| {
    let row: &Row = row.borrow();
    row.selected || any_selected(row.children())
  })
}
