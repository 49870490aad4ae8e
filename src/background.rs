//! Single-flight background work with message-channel completion.
//!
//! A [`BackgroundTask`] runs one closure on a spawned thread and hands its
//! result back over an mpsc channel. The owner polls it from the UI loop
//! (or blocks on it from the CLI). Dropping the task drops the receiver, so
//! a late result from a discarded owner is silently dropped by the worker.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

use crate::api::ApiError;

/// Outcome of polling a background task.
#[derive(Debug, PartialEq)]
pub enum TaskPoll<T> {
    /// Still running
    Pending,
    /// Finished with a value
    Ready(T),
    /// Worker exited without reporting (panicked)
    Lost,
}

/// Handle to work running on a background thread.
#[derive(Debug)]
pub struct BackgroundTask<T> {
    receiver: Receiver<T>,
}

impl<T: Send + 'static> BackgroundTask<T> {
    /// Spawns `job` on a new thread.
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, receiver) = channel();

        thread::spawn(move || {
            // The owner may have been dropped; nothing to report to then
            let _ = sender.send(job());
        });

        Self { receiver }
    }
}

impl<T> BackgroundTask<T> {
    /// Checks for completion without blocking.
    pub fn poll(&self) -> TaskPoll<T> {
        match self.receiver.try_recv() {
            Ok(value) => TaskPoll::Ready(value),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }

    /// Blocks until the task finishes.
    ///
    /// Returns `None` if the worker exited without reporting.
    pub fn wait(self) -> Option<T> {
        self.receiver.recv().ok()
    }
}

/// Loading state of a remotely fetched resource.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Data available
    Loaded,
    /// Last fetch failed; no data is shown
    Failed(ApiError),
}

impl LoadStatus {
    /// Returns true while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure, if the last fetch failed.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Error reported when a worker thread dies without a result.
pub fn lost_worker_error(endpoint: &str) -> ApiError {
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        message: "request worker exited unexpectedly".to_string(),
    }
}
