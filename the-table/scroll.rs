/// Geometry of the scroll container at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
  /// Visible height of the container
  pub offset_height: f64,
  /// Distance scrolled from the top
  pub scroll_top:    f64,
  /// Total height of the scrollable content
  pub scroll_height: f64,
}

impl ScrollMetrics {
  pub fn new(offset_height: f64, scroll_top: f64, scroll_height: f64) -> Self {
    Self {
      offset_height,
      scroll_top,
      scroll_height,
    }
  }

  pub fn is_near_bottom(&self, threshold: f64) -> bool {
    self.offset_height + self.scroll_top >= self.scroll_height - threshold
  }
}

/// Decides whether a settled scroll position should pull in the next page.
///
/// Debouncing happens upstream (see `the_table_event::Debounce`); by the
/// time metrics reach the monitor the user has stopped scrolling.
#[derive(Debug, Clone, Copy)]
pub struct ScrollMonitor {
  threshold: f64,
}

impl ScrollMonitor {
  pub fn new(threshold: f64) -> Self {
    Self { threshold }
  }

  pub fn threshold(&self) -> f64 {
    self.threshold
  }

  /// Near the bottom and no search term active.
  pub fn should_load(&self, metrics: &ScrollMetrics, searching: bool) -> bool {
    !searching && metrics.is_near_bottom(self.threshold)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn near_bottom_uses_threshold() {
    let monitor = ScrollMonitor::new(100.0);
    // 400 + 500 >= 1000 - 100
    assert!(monitor.should_load(&ScrollMetrics::new(400.0, 500.0, 1000.0), false));
    assert!(!monitor.should_load(&ScrollMetrics::new(400.0, 499.0, 1000.0), false));
    assert!(monitor.should_load(&ScrollMetrics::new(400.0, 600.0, 1000.0), false));
  }

  #[test]
  fn never_loads_while_searching() {
    let monitor = ScrollMonitor::new(100.0);
    assert!(!monitor.should_load(&ScrollMetrics::new(400.0, 600.0, 1000.0), true));
  }

  #[test]
  fn short_content_counts_as_bottom() {
    let monitor = ScrollMonitor::new(100.0);
    assert!(monitor.should_load(&ScrollMetrics::new(800.0, 0.0, 300.0), false));
  }
}
