use std::{
  ops::Range,
  time::Duration,
};

use async_trait::async_trait;

use crate::{
  error::Result,
  row::Row,
  seed::SeedData,
  store::RowTreeStore,
};

/// Source of pages. Implementations may suspend for as long as a real fetch
/// would; the paginator only cares about the rows that come back.
#[async_trait]
pub trait PageProvider: Send + Sync + 'static {
  async fn fetch_page(&self, range: Range<usize>) -> Result<Vec<Row>>;
}

/// Serves pages straight from the seed after a fixed latency.
#[derive(Debug, Clone)]
pub struct SeedPageProvider {
  seed:    SeedData,
  latency: Duration,
}

impl SeedPageProvider {
  pub fn new(seed: SeedData, latency: Duration) -> Self {
    Self { seed, latency }
  }
}

#[async_trait]
impl PageProvider for SeedPageProvider {
  async fn fetch_page(&self, range: Range<usize>) -> Result<Vec<Row>> {
    if !self.latency.is_zero() {
      tokio::time::sleep(self.latency).await;
    }
    let rows = self.seed.rows();
    let end = range.end.min(rows.len());
    let start = range.start.min(end);
    Ok(rows[start..end].to_vec())
  }
}

/// One page load in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
  /// Epoch the request was issued in; see [`Paginator::reset`]
  pub epoch: u64,
  pub page:  usize,
  pub range: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
  /// Nothing was started: everything is loaded or a load is in flight
  Skipped,
  Appended { page: usize, rows: usize },
  /// The request belongs to a superseded epoch and was dropped
  Stale,
  /// The provider failed; nothing was appended and the page will be retried
  Failed,
}

/// Tracks paging progress over the canonical dataset.
///
/// A load is split in two halves, [`Paginator::begin`] and
/// [`Paginator::complete`], so the event loop can keep running while the
/// provider is busy. Only one request is in flight at a time, which keeps
/// pages in `current_page` order.
#[derive(Debug)]
pub struct Paginator {
  page_size:    usize,
  current_page: usize,
  epoch:        u64,
  in_flight:    Option<PageRequest>,
}

impl Paginator {
  pub fn new(page_size: usize) -> Self {
    Self {
      page_size:    page_size.max(1),
      current_page: 0,
      epoch:        0,
      in_flight:    None,
    }
  }

  pub fn page_size(&self) -> usize {
    self.page_size
  }

  pub fn current_page(&self) -> usize {
    self.current_page
  }

  pub fn is_loading(&self) -> bool {
    self.in_flight.is_some()
  }

  pub fn is_exhausted(&self, total: usize) -> bool {
    self.current_page * self.page_size >= total
  }

  /// Starts loading the next page of a dataset with `total` top-level rows.
  pub fn begin(&mut self, total: usize) -> Option<PageRequest> {
    if let Some(request) = &self.in_flight {
      log::debug!("page {} still loading, ignoring load request", request.page);
      return None;
    }
    if self.is_exhausted(total) {
      log::debug!("all {total} rows loaded");
      return None;
    }

    let start = self.current_page * self.page_size;
    let request = PageRequest {
      epoch: self.epoch,
      page:  self.current_page,
      range: start..(start + self.page_size).min(total),
    };
    log::debug!("loading page {} ({:?})", request.page, request.range);
    self.in_flight = Some(request.clone());
    Some(request)
  }

  /// Lands a fetched page. Anything but the current in-flight request is
  /// discarded, so a fetch that outlives a reset never reaches the store.
  pub fn complete(
    &mut self,
    request: &PageRequest,
    rows: Vec<Row>,
    store: &mut RowTreeStore,
  ) -> PageOutcome {
    if self.in_flight.as_ref() != Some(request) {
      log::debug!(
        "dropping stale page {} from epoch {} (current epoch {})",
        request.page,
        request.epoch,
        self.epoch
      );
      return PageOutcome::Stale;
    }

    self.in_flight = None;
    let count = rows.len();
    store.append(rows);
    self.current_page += 1;
    PageOutcome::Appended {
      page: request.page,
      rows: count,
    }
  }

  /// Releases the guard after a failed fetch without advancing, so the next
  /// trigger retries the same page. Returns whether `request` was current.
  pub fn fail(&mut self, request: &PageRequest) -> bool {
    if self.in_flight.as_ref() == Some(request) {
      self.in_flight = None;
      true
    } else {
      false
    }
  }

  /// Back to the first page. Bumps the epoch so any in-flight request is
  /// recognised as stale when it lands.
  pub fn reset(&mut self) {
    self.invalidate();
    self.current_page = 0;
  }

  /// Abandons the in-flight request (if any) without touching progress.
  pub fn invalidate(&mut self) {
    self.epoch = self.epoch.wrapping_add(1);
    self.in_flight = None;
  }

  /// Begins, fetches and completes one page inline.
  pub async fn load_more_data(
    &mut self,
    store: &mut RowTreeStore,
    provider: &dyn PageProvider,
  ) -> Result<PageOutcome> {
    let Some(request) = self.begin(store.canonical().len()) else {
      return Ok(PageOutcome::Skipped);
    };
    match provider.fetch_page(request.range.clone()).await {
      Ok(rows) => Ok(self.complete(&request, rows, store)),
      Err(err) => {
        self.fail(&request);
        Err(err)
      },
    }
  }
}
