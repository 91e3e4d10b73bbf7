//! Debounced scroll-to-bottom.
//!
//! Every change to the message list schedules one delayed
//! [`AppEvent::ScrollDue`]. A newer schedule replaces the older one rather
//! than stacking, and dropping the scheduler cancels whatever is pending.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::events::AppEvent;

/// Owns the single pending scroll timer of a chat panel.
pub struct ScrollScheduler {
    delay: Duration,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    pending: Option<JoinHandle<()>>,
    /// Bumped on every schedule. A due event only counts if it carries the
    /// current value, which covers timers that fired before being aborted.
    generation: u64,
}

impl ScrollScheduler {
    pub fn new(delay: Duration, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            delay,
            event_tx,
            pending: None,
            generation: 0,
        }
    }

    /// Replace any pending timer with a fresh one. Must be called from
    /// within a tokio runtime.
    pub fn schedule(&mut self) -> u64 {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);

        let generation = self.generation;
        let delay = self.delay;
        let tx = self.event_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppEvent::ScrollDue { generation });
        }));

        log::trace!("Scheduled autoscroll #{generation} in {:?}", delay);
        generation
    }

    /// Abort the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Accept a due event. Returns `true` when it belongs to the latest
    /// schedule and the view should scroll.
    pub fn fire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.pending.is_none() {
            log::trace!("Ignoring stale autoscroll #{generation}");
            return false;
        }
        self.pending = None;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for ScrollScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
