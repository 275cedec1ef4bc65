//! Debounced scheduling of search runs.
//!
//! Each call to [`Debouncer::schedule`] supersedes the previous one, so a burst
//! of keystrokes runs the task once after the input goes quiet.

use std::future::Future;
use std::time::Duration;

use log::trace;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Quiescence window used for search-as-you-type.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

struct Pending {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// A cancellable, re-armable delayed task.
///
/// Must be used from within a tokio runtime. Dropping the debouncer cancels
/// whatever is still waiting.
pub struct Debouncer {
    window: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiescence window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Returns the quiescence window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Runs `task` once the window elapses, unless superseded first.
    ///
    /// Any task scheduled earlier and still waiting is cancelled.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let window = self.window;
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = child.cancelled() => {
                    trace!("Debounced task superseded");
                }
                _ = tokio::time::sleep(window) => {
                    task.await;
                }
            }
        });

        self.pending = Some(Pending { token, handle });
    }

    /// Cancels the waiting task, if any.
    ///
    /// Returns `true` if a task was still waiting. A task whose window already
    /// elapsed is left to finish.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                let waiting = !pending.handle.is_finished();
                pending.token.cancel();
                waiting
            }
            None => false,
        }
    }

    /// Returns `true` while a scheduled task has not finished.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| !p.token.is_cancelled() && !p.handle.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("window", &self.window)
            .field("pending", &self.is_pending())
            .finish()
    }
}
