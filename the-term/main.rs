//! Headless driver for the-table.
//!
//! Reads commands from stdin, forwards them to a running table and prints the
//! rows every time the display changes. Useful for poking at paging and search
//! timing without a real front end.

mod demo;
mod input;
mod render;

use std::path::PathBuf;

use anyhow::{
  Context,
  Result,
};
use clap::{
  ArgAction,
  Parser,
};
use log::LevelFilter;
use the_table::{
  DisplaySnapshot,
  SeedData,
  TableConfig,
  TableHandle,
};
use tokio::{
  io::{
    AsyncBufReadExt,
    BufReader,
  },
  sync::watch,
};

use crate::input::Command;

#[derive(Debug, Parser)]
#[command(name = "the-table")]
#[command(about = "Drive a lazily loaded, searchable row tree from stdin")]
struct Cli {
  /// JSON file with the rows to serve, defaults to a built-in dataset
  #[arg(long, value_name = "FILE")]
  seed: Option<PathBuf>,

  /// TOML file with table settings
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Increase log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

fn init_logging(verbosity: u8) {
  let mut builder = env_logger::Builder::new();
  if let Ok(filters) = std::env::var("RUST_LOG") {
    builder.parse_filters(&filters);
  } else {
    builder.filter_level(match verbosity {
      0 => LevelFilter::Warn,
      1 => LevelFilter::Info,
      2 => LevelFilter::Debug,
      _ => LevelFilter::Trace,
    });
  }
  builder.format_timestamp_millis().init();
}

fn print_snapshot(snapshot: &DisplaySnapshot, loading: bool, any_selected: bool) {
  print!("{}", render::render_rows(&snapshot.rows));
  println!("{}", render::status_line(snapshot, loading, any_selected));
}

/// Prints the table whenever the display or the loading flag changes.
async fn watch_display(
  mut display: watch::Receiver<DisplaySnapshot>,
  mut loading: watch::Receiver<bool>,
  any_selected: watch::Receiver<bool>,
) {
  loop {
    tokio::select! {
      changed = display.changed() => if changed.is_err() { break },
      changed = loading.changed() => if changed.is_err() { break },
    }
    let snapshot = display.borrow_and_update().clone();
    let is_loading = *loading.borrow_and_update();
    print_snapshot(&snapshot, is_loading, *any_selected.borrow());
  }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let config = match &cli.config {
    Some(path) => {
      TableConfig::load(path).with_context(|| format!("loading config {}", path.display()))?
    },
    None => TableConfig::default(),
  };
  let seed = match &cli.seed {
    Some(path) => {
      SeedData::load(path).with_context(|| format!("loading seed {}", path.display()))?
    },
    None => demo::seed(),
  };
  log::info!("serving {} top-level rows", seed.len());

  let handle = TableHandle::with_seed(&config, seed);
  let printer = tokio::spawn(watch_display(
    handle.display(),
    handle.loading(),
    handle.any_selected(),
  ));

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  while let Some(line) = lines.next_line().await.context("reading stdin")? {
    let command = match input::parse(&line) {
      Ok(Some(command)) => command,
      Ok(None) => continue,
      Err(err) => {
        log::error!("{err:#}");
        continue;
      },
    };
    match &command {
      Command::Show => {
        let snapshot = handle.display().borrow().clone();
        print_snapshot(
          &snapshot,
          *handle.loading().borrow(),
          *handle.any_selected().borrow(),
        );
      },
      Command::Help => println!("{}", input::HELP),
      _ => {},
    }
    if !input::apply(&handle, command).await {
      break;
    }
  }

  handle.shutdown().await;
  printer.abort();
  Ok(())
}
