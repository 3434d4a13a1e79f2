//! Plain-text rendering of a display snapshot.

use std::{
  borrow::Borrow,
  fmt::Write,
};

use the_table::{
  DisplaySnapshot,
  DisplaySource,
  Row,
};

const INDENT: &str = "  ";

/// One line per visible row; children are listed only under expanded rows.
pub fn render_rows<R: Borrow<Row>>(rows: &[R]) -> String {
  let mut out = String::new();
  for (index, row) in rows.iter().enumerate() {
    render_row(&mut out, row.borrow(), &index.to_string(), 0);
  }
  out
}

fn render_row(out: &mut String, row: &Row, path: &str, depth: usize) {
  let fold = match (row.has_children(), row.expanded) {
    (false, _) => ' ',
    (true, false) => '+',
    (true, true) => '-',
  };
  let check = if row.selected { "[x]" } else { "[ ]" };
  let mark = if row.highlight { "*" } else { "" };
  let _ = writeln!(
    out,
    "{}{fold} {check} {path:<8} {mark}{}{mark}  {} | {} | {}",
    INDENT.repeat(depth),
    row.name,
    row.kind,
    row.email,
    row.company_name,
  );

  if row.expanded {
    for (index, child) in row.children().iter().enumerate() {
      render_row(out, child, &format!("{path}.{index}"), depth + 1);
    }
  }
}

pub fn status_line(snapshot: &DisplaySnapshot, loading: bool, any_selected: bool) -> String {
  let source = match &snapshot.source {
    DisplaySource::Paged => "paged".to_string(),
    DisplaySource::Searched { term } => format!("search {term:?}"),
  };
  format!(
    "-- {source} | {} rows | rev {}{}{}",
    snapshot.rows.len(),
    snapshot.revision,
    if loading { " | loading" } else { "" },
    if any_selected { " | selection" } else { "" },
  )
}
