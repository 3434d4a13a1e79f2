//! The event loop that owns a [`TableState`] and the handle front ends use to
//! talk to it.
//!
//! All mutation happens on the worker task. Search text and scroll positions
//! are debounced by their own hooks before they reach the loop; page fetches
//! run as separate tasks and report back on a second channel, so the loop
//! never waits on the provider.

use std::sync::Arc;

use the_table_event::{
  AsyncHook,
  Debounce,
};
use tokio::{
  sync::{
    mpsc::{
      self,
      Sender,
      UnboundedReceiver,
      UnboundedSender,
    },
    watch,
  },
  task::JoinHandle,
};

use crate::{
  composer::DisplaySnapshot,
  config::TableConfig,
  error::Result,
  paginator::{
    PageProvider,
    PageRequest,
    SeedPageProvider,
  },
  row::{
    Row,
    RowPath,
  },
  scroll::ScrollMetrics,
  seed::SeedData,
  table::TableState,
};

/// Input accepted by the worker. Search and scroll variants arrive already
/// debounced.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
  SearchCommitted(String),
  ScrollSettled(ScrollMetrics),
  SetSelected { path: RowPath, selected: bool },
  ToggleExpanded(RowPath),
  LoadMore,
}

struct PageFetched {
  request: PageRequest,
  result:  Result<Vec<Row>>,
}

pub struct TableWorker {
  state:    TableState,
  provider: Arc<dyn PageProvider>,
  events:   UnboundedReceiver<TableEvent>,
  pages_tx: UnboundedSender<PageFetched>,
  pages_rx: UnboundedReceiver<PageFetched>,
}

impl TableWorker {
  pub fn new(
    state: TableState,
    provider: Arc<dyn PageProvider>,
    events: UnboundedReceiver<TableEvent>,
  ) -> Self {
    let (pages_tx, pages_rx) = mpsc::unbounded_channel();
    Self {
      state,
      provider,
      events,
      pages_tx,
      pages_rx,
    }
  }

  /// Runs until every event sender is gone.
  pub async fn run(mut self) {
    let request = self.state.start();
    self.fetch(request);

    loop {
      tokio::select! {
        biased;
        Some(fetched) = self.pages_rx.recv() => {
          self.state.complete_page(&fetched.request, fetched.result);
        }
        event = self.events.recv() => {
          let Some(event) = event else {
            break;
          };
          self.handle_event(event);
        }
      }
    }
    log::debug!("table worker stopped");
  }

  fn handle_event(&mut self, event: TableEvent) {
    let request = match event {
      TableEvent::SearchCommitted(term) => self.state.commit_search(&term),
      TableEvent::ScrollSettled(metrics) => self.state.scroll_settled(&metrics),
      TableEvent::LoadMore => self.state.load_more(),
      TableEvent::SetSelected { path, selected } => {
        self.state.set_selected(&path, selected);
        None
      },
      TableEvent::ToggleExpanded(path) => {
        self.state.toggle_expanded(&path);
        None
      },
    };
    self.fetch(request);
  }

  fn fetch(&self, request: Option<PageRequest>) {
    let Some(request) = request else {
      return;
    };
    let provider = self.provider.clone();
    let pages = self.pages_tx.clone();
    tokio::spawn(async move {
      let result = provider.fetch_page(request.range.clone()).await;
      // the worker is gone, nobody wants the page anymore
      let _ = pages.send(PageFetched { request, result });
    });
  }
}

/// Front-end side of a running table.
///
/// The debounced inputs are async: when a burst fills a hook's channel they
/// wait for the hook to catch up instead of blocking the runtime thread. The
/// other inputs return immediately. Outputs are `watch` receivers that always
/// hold the latest value.
pub struct TableHandle {
  events:       UnboundedSender<TableEvent>,
  search:       Sender<String>,
  scroll:       Sender<ScrollMetrics>,
  display:      watch::Receiver<DisplaySnapshot>,
  loading:      watch::Receiver<bool>,
  any_selected: watch::Receiver<bool>,
  worker:       JoinHandle<()>,
}

impl TableHandle {
  /// Spawns the worker and its debounce hooks. Must be called from within a
  /// tokio runtime.
  pub fn spawn(config: &TableConfig, seed: SeedData, provider: Arc<dyn PageProvider>) -> Self {
    let state = TableState::new(config, seed);
    let display = state.subscribe_display();
    let loading = state.subscribe_loading();
    let any_selected = state.subscribe_any_selected();

    let (events, events_rx) = mpsc::unbounded_channel();
    let search = Debounce::new(
      config.search_debounce(),
      events.clone(),
      TableEvent::SearchCommitted,
    )
    .spawn();
    let scroll = Debounce::new(
      config.scroll_debounce(),
      events.clone(),
      TableEvent::ScrollSettled,
    )
    .spawn();

    let worker = tokio::spawn(TableWorker::new(state, provider, events_rx).run());

    Self {
      events,
      search,
      scroll,
      display,
      loading,
      any_selected,
      worker,
    }
  }

  /// Spawns a table whose pages come from the seed itself after the
  /// configured fetch latency.
  pub fn with_seed(config: &TableConfig, seed: SeedData) -> Self {
    let provider = SeedPageProvider::new(seed.clone(), config.fetch_latency());
    Self::spawn(config, seed, Arc::new(provider))
  }

  /// The search box changed. Committed once typing pauses.
  pub async fn search_changed(&self, text: impl Into<String>) {
    if self.search.send(text.into()).await.is_err() {
      log::warn!("search hook is gone, dropping input");
    }
  }

  /// The scroll container moved. Evaluated once scrolling pauses.
  pub async fn scrolled(&self, metrics: ScrollMetrics) {
    if self.scroll.send(metrics).await.is_err() {
      log::warn!("scroll hook is gone, dropping input");
    }
  }

  pub fn set_selected(&self, path: RowPath, selected: bool) {
    self.send(TableEvent::SetSelected { path, selected });
  }

  pub fn toggle_expanded(&self, path: RowPath) {
    self.send(TableEvent::ToggleExpanded(path));
  }

  pub fn load_more(&self) {
    self.send(TableEvent::LoadMore);
  }

  pub fn display(&self) -> watch::Receiver<DisplaySnapshot> {
    self.display.clone()
  }

  pub fn loading(&self) -> watch::Receiver<bool> {
    self.loading.clone()
  }

  pub fn any_selected(&self) -> watch::Receiver<bool> {
    self.any_selected.clone()
  }

  /// Closes every input, lets pending debounced input through and waits for
  /// the worker to finish.
  pub async fn shutdown(self) {
    let Self {
      events,
      search,
      scroll,
      worker,
      ..
    } = self;
    drop((events, search, scroll));
    if let Err(err) = worker.await {
      log::warn!("table worker ended abnormally: {err}");
    }
  }

  fn send(&self, event: TableEvent) {
    if self.events.send(event).is_err() {
      log::warn!("table worker is gone, dropping event");
    }
  }
}
