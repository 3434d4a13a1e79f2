use std::sync::Arc;

use tokio::sync::watch;

use crate::{
  composer::{
    DisplayComposer,
    DisplaySnapshot,
  },
  config::TableConfig,
  error::Result,
  paginator::{
    PageOutcome,
    PageRequest,
    Paginator,
  },
  row::{
    Row,
    RowPath,
  },
  scroll::{
    ScrollMetrics,
    ScrollMonitor,
  },
  search::search_tree,
  seed::SeedData,
  selection,
  store::RowTreeStore,
};

/// The table's whole state, driven synchronously.
///
/// Every operation that needs rows from the page provider hands back a
/// [`PageRequest`]; the caller fetches it and reports back through
/// [`TableState::complete_page`]. Nothing in here suspends.
#[derive(Debug)]
pub struct TableState {
  store:        RowTreeStore,
  paginator:    Paginator,
  scroll:       ScrollMonitor,
  composer:     DisplayComposer,
  search_term:  Option<String>,
  loading:      watch::Sender<bool>,
  any_selected: watch::Sender<bool>,
}

impl TableState {
  pub fn new(config: &TableConfig, seed: SeedData) -> Self {
    let (loading, _) = watch::channel(false);
    let (any_selected, _) = watch::channel(false);
    Self {
      store: RowTreeStore::new(seed),
      paginator: Paginator::new(config.page_size),
      scroll: ScrollMonitor::new(config.scroll_threshold),
      composer: DisplayComposer::new(),
      search_term: None,
      loading,
      any_selected,
    }
  }

  pub fn subscribe_display(&self) -> watch::Receiver<DisplaySnapshot> {
    self.composer.subscribe()
  }

  pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
    self.loading.subscribe()
  }

  pub fn subscribe_any_selected(&self) -> watch::Receiver<bool> {
    self.any_selected.subscribe()
  }

  pub fn store(&self) -> &RowTreeStore {
    &self.store
  }

  pub fn paginator(&self) -> &Paginator {
    &self.paginator
  }

  pub fn displayed(&self) -> &[Arc<Row>] {
    self.store.displayed()
  }

  pub fn snapshot(&self) -> DisplaySnapshot {
    self.composer.snapshot()
  }

  pub fn search_term(&self) -> Option<&str> {
    self.search_term.as_deref()
  }

  pub fn searching(&self) -> bool {
    self.search_term.is_some()
  }

  pub fn is_loading(&self) -> bool {
    self.paginator.is_loading()
  }

  pub fn selected_rows(&self) -> Vec<&Row> {
    selection::selected_rows(self.store.displayed())
  }

  /// Publishes the empty paged view and requests the first page.
  pub fn start(&mut self) -> Option<PageRequest> {
    self.composer.show_paged(self.store.displayed());
    self.load_more()
  }

  /// Requests the next page unless a search owns the display, a load is
  /// already running, or everything is loaded.
  pub fn load_more(&mut self) -> Option<PageRequest> {
    if self.searching() {
      log::debug!("search active, not loading more rows");
      return None;
    }
    self.loading.send_replace(true);
    let request = self.paginator.begin(self.store.canonical().len());
    if request.is_none() {
      self.loading.send_replace(self.paginator.is_loading());
    }
    request
  }

  /// Reports the provider's answer for `request`.
  pub fn complete_page(&mut self, request: &PageRequest, result: Result<Vec<Row>>) -> PageOutcome {
    let outcome = match result {
      Ok(rows) => self.paginator.complete(request, rows, &mut self.store),
      Err(err) => {
        if self.paginator.fail(request) {
          log::warn!("page {} could not be loaded: {err}", request.page);
          PageOutcome::Failed
        } else {
          log::debug!("ignoring failure of stale page {}: {err}", request.page);
          PageOutcome::Stale
        }
      },
    };
    if let PageOutcome::Appended { .. } = outcome {
      self.composer.page_appended(self.store.displayed());
    }
    self.loading.send_replace(self.paginator.is_loading());
    outcome
  }

  /// A debounced scroll position arrived.
  pub fn scroll_settled(&mut self, metrics: &ScrollMetrics) -> Option<PageRequest> {
    if !self.scroll.should_load(metrics, self.searching()) {
      return None;
    }
    self.load_more()
  }

  /// A debounced search term arrived. A non-empty term searches a fresh copy
  /// of the whole dataset; an empty one cancels the search and resets. The
  /// term is not trimmed, a lone space is a search like any other.
  pub fn commit_search(&mut self, term: &str) -> Option<PageRequest> {
    if term.is_empty() {
      return self.reset();
    }
    self.search(term);
    None
  }

  fn search(&mut self, term: &str) {
    self.search_term = Some(term.to_string());
    // whatever page was loading belongs to the canonical copy we are about
    // to replace
    self.paginator.invalidate();
    self.loading.send_replace(false);

    let result = search_tree(self.store.refresh_canonical(), term);
    let rows = result.collect_rows(self.store.canonical());
    self.store.replace_displayed(rows);
    self.composer.show_search(term, self.store.displayed());
    self.publish_any_selected();
  }

  /// Pristine dataset, first page requested, paged source restored.
  pub fn reset(&mut self) -> Option<PageRequest> {
    self.search_term = None;
    self.store.reset();
    self.paginator.reset();
    self.composer.show_paged(self.store.displayed());
    self.publish_any_selected();
    self.load_more()
  }

  /// Checkbox toggled on a displayed row. Returns false for unknown paths.
  pub fn set_selected(&mut self, path: &RowPath, selected: bool) -> bool {
    let Some(row) = self.store.displayed_row_mut(path) else {
      log::debug!("no displayed row at {path}");
      return false;
    };
    row.selected = selected;

    let any = selected || selection::any_selected(self.store.displayed());
    self.any_selected.send_replace(any);
    self.composer.refresh(self.store.displayed());
    true
  }

  pub fn toggle_expanded(&mut self, path: &RowPath) -> bool {
    let Some(row) = self.store.displayed_row_mut(path) else {
      log::debug!("no displayed row at {path}");
      return false;
    };
    row.expanded = !row.expanded;
    self.composer.refresh(self.store.displayed());
    true
  }

  fn publish_any_selected(&mut self) {
    self
      .any_selected
      .send_replace(selection::any_selected(self.store.displayed()));
  }
}
