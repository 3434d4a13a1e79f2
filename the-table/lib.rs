//! Incremental loading and recursive search for hierarchical tables.
//!
//! The crate keeps the rows a table view should show: it pages a large tree
//! in as the user scrolls, filters it by a search term that matches at any
//! depth while keeping the path down to each match expanded, and exposes one
//! stream of rows to draw. Rendering is left to the front end.
//!
//! [`TableState`] is the synchronous core; [`TableHandle`] runs it on a tokio
//! task with debounced input.

pub mod composer;
pub mod config;
pub mod error;
pub mod paginator;
pub mod row;
pub mod scroll;
pub mod search;
pub mod seed;
pub mod selection;
pub mod store;
pub mod table;
pub mod worker;

pub use composer::{
  DisplayComposer,
  DisplaySnapshot,
  DisplaySource,
};
pub use config::TableConfig;
pub use error::{
  Result,
  TableError,
};
pub use paginator::{
  PageOutcome,
  PageProvider,
  PageRequest,
  Paginator,
  SeedPageProvider,
};
pub use row::{
  Row,
  RowPath,
};
pub use scroll::{
  ScrollMetrics,
  ScrollMonitor,
};
pub use search::{
  SearchResult,
  search_tree,
};
pub use seed::SeedData;
pub use store::RowTreeStore;
pub use table::TableState;
pub use worker::{
  TableEvent,
  TableHandle,
  TableWorker,
};
