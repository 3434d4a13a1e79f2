//! Utilities for declaring an async (usually debounced) hook

use std::time::Duration;

use tokio::{
  sync::mpsc::{
    self,
    UnboundedSender,
  },
  time::Instant,
};

/// Capacity of a hook's input channel. Senders wait for room with
/// `Sender::send`, which lets the hook task drain the channel even on a
/// current-thread runtime.
const HOOK_CAPACITY: usize = 256;

/// Async hooks run as a background tokio task that waits for events sent
/// through a channel. Every event may push the debounce deadline forward;
/// once the deadline passes without a new event the hook is told to flush.
pub trait AsyncHook: Sync + Send + 'static + Sized {
  type Event: Sync + Send + 'static;
  /// Called immediately whenever an event is received. Returns the new
  /// debounce deadline, the current one (`timeout`) to keep waiting, or
  /// `None` when nothing is pending.
  fn handle_event(&mut self, event: Self::Event, timeout: Option<Instant>) -> Option<Instant>;

  /// Called whenever the debounce deadline is reached
  fn finish_debounce(&mut self);

  fn spawn(self) -> mpsc::Sender<Self::Event> {
    let (tx, rx) = mpsc::channel(HOOK_CAPACITY);
    // only spawn worker if we are inside runtime to avoid having to spawn a runtime
    // for unrelated unit tests
    if tokio::runtime::Handle::try_current().is_ok() {
      tokio::spawn(run(self, rx));
    }
    tx
  }
}

async fn run<Hook: AsyncHook>(mut hook: Hook, mut rx: mpsc::Receiver<Hook::Event>) {
  let mut deadline = None;
  loop {
    let event = match deadline {
      Some(deadline_) => {
        match tokio::time::timeout_at(deadline_, rx.recv()).await {
          Ok(event) => event,
          Err(_) => {
            hook.finish_debounce();
            deadline = None;
            continue;
          },
        }
      },
      None => rx.recv().await,
    };
    let Some(event) = event else {
      // the sending side is gone, flush whatever is still pending
      if deadline.is_some() {
        hook.finish_debounce();
      }
      break;
    };
    deadline = hook.handle_event(event, deadline);
  }
}

/// Trailing-edge debounce: keeps only the latest event and forwards it once
/// `quiet` has elapsed without a newer one.
///
/// The forwarded value is produced by `wrap`, which lets several debounced
/// inputs feed the same event loop channel.
pub struct Debounce<E, T> {
  quiet:   Duration,
  pending: Option<E>,
  target:  UnboundedSender<T>,
  wrap:    fn(E) -> T,
}

impl<E, T> Debounce<E, T> {
  pub fn new(quiet: Duration, target: UnboundedSender<T>, wrap: fn(E) -> T) -> Self {
    Self {
      quiet,
      pending: None,
      target,
      wrap,
    }
  }
}

impl<E, T> AsyncHook for Debounce<E, T>
where
  E: Sync + Send + 'static,
  T: Send + 'static,
{
  type Event = E;

  fn handle_event(&mut self, event: E, _timeout: Option<Instant>) -> Option<Instant> {
    self.pending = Some(event);
    Some(Instant::now() + self.quiet)
  }

  fn finish_debounce(&mut self) {
    let Some(event) = self.pending.take() else {
      return;
    };
    if self.target.send((self.wrap)(event)).is_err() {
      log::warn!("debounced event dropped, receiver closed");
    }
  }
}

#[cfg(test)]
mod tests {
  use tokio::{
    sync::mpsc::{
      Sender,
      UnboundedReceiver,
      error::TryRecvError,
      unbounded_channel,
    },
    time::sleep,
  };

  use super::*;

  const QUIET: Duration = Duration::from_millis(500);

  fn hook() -> (Sender<&'static str>, UnboundedReceiver<String>) {
    let (target, rx) = unbounded_channel();
    let tx = Debounce::new(QUIET, target, |event: &'static str| event.to_uppercase()).spawn();
    (tx, rx)
  }

  #[tokio::test(flavor = "current_thread", start_paused = true)]
  async fn forwards_only_the_latest_event() {
    let (tx, mut rx) = hook();
    tx.send("a").await.unwrap();
    tx.send("ab").await.unwrap();
    tx.send("abc").await.unwrap();

    sleep(Duration::from_millis(499)).await;
    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

    sleep(Duration::from_millis(2)).await;
    assert_eq!(rx.try_recv(), Ok("ABC".to_string()));
    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
  }

  #[tokio::test(flavor = "current_thread", start_paused = true)]
  async fn new_event_pushes_the_deadline() {
    let (tx, mut rx) = hook();
    tx.send("first").await.unwrap();
    sleep(Duration::from_millis(300)).await;
    tx.send("second").await.unwrap();

    sleep(Duration::from_millis(300)).await;
    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

    sleep(Duration::from_millis(201)).await;
    assert_eq!(rx.try_recv(), Ok("SECOND".to_string()));
  }

  #[tokio::test(flavor = "current_thread", start_paused = true)]
  async fn separated_events_are_both_forwarded() {
    let (tx, mut rx) = hook();
    tx.send("one").await.unwrap();
    sleep(Duration::from_millis(600)).await;
    tx.send("two").await.unwrap();
    sleep(Duration::from_millis(600)).await;

    assert_eq!(rx.try_recv(), Ok("ONE".to_string()));
    assert_eq!(rx.try_recv(), Ok("TWO".to_string()));
  }

  #[tokio::test(flavor = "current_thread", start_paused = true)]
  async fn closing_the_sender_flushes_pending_event() {
    let (tx, mut rx) = hook();
    tx.send("last").await.unwrap();
    drop(tx);

    assert_eq!(rx.recv().await, Some("LAST".to_string()));
    assert_eq!(rx.recv().await, None);
  }

  #[tokio::test(flavor = "current_thread", start_paused = true)]
  async fn burst_larger_than_the_channel_is_coalesced() {
    let (target, mut rx) = unbounded_channel();
    let tx = Debounce::new(QUIET, target, |event: usize| event).spawn();
    for event in 0..HOOK_CAPACITY * 3 {
      tx.send(event).await.unwrap();
    }

    sleep(QUIET + Duration::from_millis(1)).await;
    assert_eq!(rx.try_recv(), Ok(HOOK_CAPACITY * 3 - 1));
    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
  }
}
