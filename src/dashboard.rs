//! Enrollment trends for the dashboard screen.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::client::TRENDS_PATH;
use crate::api::{ApiError, CourseApi};
use crate::background::{lost_worker_error, BackgroundTask, LoadStatus, TaskPoll};
use crate::models::TrendRecord;

/// Holds the enrollment trends, in the order the server ranked them.
#[derive(Debug, Default)]
pub struct TrendsStore {
    status: LoadStatus,
    trends: Vec<TrendRecord>,
    pending: Option<BackgroundTask<Result<Vec<TrendRecord>, ApiError>>>,
}

impl TrendsStore {
    /// Creates an empty, idle store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts fetching trends; returns false if a fetch is already in flight.
    pub fn start_fetch(&mut self, api: Arc<dyn CourseApi>) -> bool {
        if self.status.is_loading() {
            return false;
        }

        info!("Fetching enrollment trends");
        self.status = LoadStatus::Loading;
        self.pending = Some(BackgroundTask::spawn(move || api.fetch_trends()));
        true
    }

    /// Applies a finished fetch; returns true if the store changed.
    pub fn poll(&mut self) -> bool {
        let Some(task) = &self.pending else {
            return false;
        };

        let result = match task.poll() {
            TaskPoll::Pending => return false,
            TaskPoll::Ready(result) => result,
            TaskPoll::Lost => Err(lost_worker_error(TRENDS_PATH)),
        };
        self.pending = None;
        self.apply(result);
        true
    }

    /// Blocks until the in-flight fetch (if any) completes.
    pub fn wait(&mut self) {
        if let Some(task) = self.pending.take() {
            let result = task
                .wait()
                .unwrap_or_else(|| Err(lost_worker_error(TRENDS_PATH)));
            self.apply(result);
        }
    }

    fn apply(&mut self, result: Result<Vec<TrendRecord>, ApiError>) {
        match result {
            Ok(trends) => {
                info!(count = trends.len(), "Enrollment trends loaded");
                self.trends = trends;
                self.status = LoadStatus::Loaded;
            }
            Err(error) => {
                warn!(%error, "Enrollment trends fetch failed");
                self.trends.clear();
                self.status = LoadStatus::Failed(error);
            }
        }
    }

    /// Current loading status.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Trend rows.
    pub fn trends(&self) -> &[TrendRecord] {
        &self.trends
    }

    /// Largest rounded average, used to scale bars.
    pub fn max_average(&self) -> i64 {
        self.trends
            .iter()
            .map(TrendRecord::rounded_average)
            .max()
            .unwrap_or(0)
    }

    /// User-facing banner for a failed fetch.
    pub fn failure_banner(&self) -> Option<String> {
        self.status
            .error()
            .map(|error| format!("Failed to load enrollment trends: {error}"))
    }
}

/// Bar length for `value` scaled against `max`, at most `width` cells.
pub fn bar_width(value: i64, max: i64, width: usize) -> usize {
    if max <= 0 || value <= 0 {
        return 0;
    }
    let scaled = (value as f64 / max as f64) * width as f64;
    (scaled.round() as usize).min(width)
}
