//! Input handling - maps stdin lines to table events.

use anyhow::{
  Context,
  Result,
  bail,
};
use the_table::{
  RowPath,
  ScrollMetrics,
  TableHandle,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  Search(String),
  Scroll(ScrollMetrics),
  More,
  Select(RowPath, bool),
  Expand(RowPath),
  Show,
  Help,
  Quit,
}

pub fn parse(line: &str) -> Result<Option<Command>> {
  let line = line.trim_start();
  if line.trim_end().is_empty() {
    return Ok(None);
  }
  let (word, raw) = line
    .split_once(char::is_whitespace)
    .unwrap_or((line, ""));
  let rest = raw.trim();

  let command = match word {
    // the term is everything after the first separator, untrimmed, so
    // `search  ` looks for a single space
    "search" | "/" => Command::Search(raw.to_string()),
    "clear" => Command::Search(String::new()),
    "scroll" => Command::Scroll(parse_metrics(rest)?),
    "more" => Command::More,
    "select" => Command::Select(parse_path(rest)?, true),
    "unselect" => Command::Select(parse_path(rest)?, false),
    "expand" => Command::Expand(parse_path(rest)?),
    "show" => Command::Show,
    "help" | "?" => Command::Help,
    "quit" | "q" => Command::Quit,
    other => bail!("unknown command {other:?}, try `help`"),
  };
  Ok(Some(command))
}

fn parse_path(text: &str) -> Result<RowPath> {
  Ok(text.parse::<RowPath>()?)
}

fn parse_metrics(text: &str) -> Result<ScrollMetrics> {
  let values = text
    .split_whitespace()
    .map(|value| {
      value
        .parse::<f64>()
        .with_context(|| format!("{value:?} is not a number"))
    })
    .collect::<Result<Vec<_>>>()?;
  let [offset_height, scroll_top, scroll_height] = values[..] else {
    bail!("usage: scroll <offset-height> <scroll-top> <scroll-height>");
  };
  Ok(ScrollMetrics::new(offset_height, scroll_top, scroll_height))
}

/// Forwards a command to the table. Returns false when the driver should
/// stop reading input.
pub async fn apply(handle: &TableHandle, command: Command) -> bool {
  match command {
    Command::Search(term) => handle.search_changed(term).await,
    Command::Scroll(metrics) => handle.scrolled(metrics).await,
    Command::More => handle.load_more(),
    Command::Select(path, selected) => handle.set_selected(path, selected),
    Command::Expand(path) => handle.toggle_expanded(path),
    Command::Show | Command::Help => {},
    Command::Quit => return false,
  }
  true
}

pub const HELP: &str = "\
commands:
  search <term>                 filter rows (debounced, term taken verbatim)
  clear                         cancel the search
  scroll <offset> <top> <height> report a scroll position (debounced)
  more                          load the next page
  select <path> | unselect <path>
  expand <path>                 toggle a row, e.g. `expand 3.0`
  show                          print the current rows
  quit";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_commands() {
    assert_eq!(parse("  ").unwrap(), None);
    assert_eq!(
      parse("search acme corp").unwrap(),
      Some(Command::Search("acme corp".to_string()))
    );
    assert_eq!(parse("clear").unwrap(), Some(Command::Search(String::new())));
    assert_eq!(parse("search").unwrap(), Some(Command::Search(String::new())));
    assert_eq!(
      parse("  search  ").unwrap(),
      Some(Command::Search(" ".to_string()))
    );
    assert_eq!(
      parse("/ acme ").unwrap(),
      Some(Command::Search("acme ".to_string()))
    );
    assert_eq!(
      parse("scroll 400 500 1000").unwrap(),
      Some(Command::Scroll(ScrollMetrics::new(400.0, 500.0, 1000.0)))
    );
    assert_eq!(
      parse("select 2.1").unwrap(),
      Some(Command::Select(RowPath::from_indices(&[2, 1]), true))
    );
    assert_eq!(
      parse("expand 0").unwrap(),
      Some(Command::Expand(RowPath::root(0)))
    );
    assert_eq!(parse("q").unwrap(), Some(Command::Quit));
  }

  #[test]
  fn rejects_bad_input() {
    assert!(parse("scroll 1 2").is_err());
    assert!(parse("scroll a b c").is_err());
    assert!(parse("select").is_err());
    assert!(parse("frobnicate").is_err());
  }
}
