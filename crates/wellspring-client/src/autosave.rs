//! Debounced auto-save.
//!
//! Every [`AutoSave::touch`] re-arms a single timer. The save runs once
//! the timer survives a full delay without another touch. There is no
//! queue and no retry: a failed save waits for the next edit.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Pause in editing after which a draft is saved.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct AutoSave {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AutoSave {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl AutoSave {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer with `save`, replacing any pending one.
    ///
    /// Must be called from within a tokio runtime. Once the timer fires
    /// the save runs on its own task, so a later touch or cancel does not
    /// interrupt a request already in flight.
    pub fn touch<F, Fut>(&self, save: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!("Auto-save timer fired");
            tokio::spawn(save());
        });

        if let Some(previous) = self.pending.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Disarm the pending timer, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }

    /// Whether a timer is waiting to fire.
    pub fn is_armed(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for AutoSave {
    fn drop(&mut self) {
        self.cancel();
    }
}
