//! Recommendation request workflow.
//!
//! ## States
//!
//! ```text
//! Idle ──submit──▶ Validating ──ok──▶ Pending ──▶ Fulfilled
//!  ▲                    │                  │
//!  │                    └──too few──▶ Rejected ◀──┘ (error / empty result)
//!  └──────────── reset ◀── Fulfilled / Rejected
//! ```
//!
//! - Submitting needs at least two selected courses; otherwise the workflow
//!   is rejected locally and no request is made.
//! - At most one request is in flight. Submits while `Pending` (or while a
//!   result is on screen) are ignored, not queued.
//! - An empty recommendation list is a rejection, not a result.
//! - At most four recommendations are kept.
//!
//! The request runs on a background thread and reports over a channel, the
//! same way the UI loop learns about catalog fetches.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::selection::SelectionSet;
use crate::api::client::RECOMMEND_PATH;
use crate::api::{ApiError, CourseApi, RecommendRequest, RecommendResponse};
use crate::background::{lost_worker_error, BackgroundTask, TaskPoll};
use crate::constants::{MAX_RECOMMENDATIONS, MIN_SELECTED_COURSES};
use crate::models::{CourseRecord, StudentProfile};

/// Message shown when the server gives no reason for a failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not generate recommendations.";

/// Message shown when the server returns no courses and no reason.
pub const NO_RECOMMENDATIONS_MESSAGE: &str = "No recommendations found for the selected courses.";

/// Workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendStatus {
    /// Input form is editable
    #[default]
    Idle,
    /// Checking the selection before sending
    Validating,
    /// Request in flight
    Pending,
    /// Recommendations available
    Fulfilled,
    /// Last attempt failed
    Rejected,
}

impl fmt::Display for RecommendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Validating => write!(f, "Validating..."),
            Self::Pending => write!(f, "Generating..."),
            Self::Fulfilled => write!(f, "✓ Recommendations ready"),
            Self::Rejected => write!(f, "✗ Failed"),
        }
    }
}

/// Why a recommendation attempt was rejected.
///
/// `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// Too few courses selected; no request was sent
    #[error("Select at least {required} courses you have taken ({selected} selected).")]
    Validation {
        /// Minimum number of selections
        required: usize,
        /// Number actually selected
        selected: usize,
    },

    /// Server succeeded but recommended nothing
    #[error("{message}")]
    EmptyResult {
        /// Server message, or the default "no recommendations" text
        message: String,
    },

    /// Server answered with a non-success status
    #[error("{message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Server message, or the generic failure text
        message: String,
    },

    /// Request never got a response
    #[error("{} The recommendation service could not be reached.", GENERIC_FAILURE_MESSAGE)]
    Transport {
        /// Underlying transport error
        detail: String,
    },

    /// Response did not match the expected schema
    #[error("{} The server sent an unexpected response.", GENERIC_FAILURE_MESSAGE)]
    Parse {
        /// Decoder error
        detail: String,
    },
}

impl RecommendError {
    /// Returns true if the failure happened locally, before any request.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<ApiError> for RecommendError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status {
                status, message, ..
            } => Self::Server {
                status,
                message: message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            },
            ApiError::Parse { message, .. } => Self::Parse { detail: message },
            ApiError::Transport { message, .. } | ApiError::InvalidUrl { message, .. } => {
                Self::Transport { detail: message }
            }
        }
    }
}

/// What a call to [`RecommendationWorkflow::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Request sent; the workflow is `Pending`
    Started,
    /// Selection failed validation; the workflow is `Rejected`
    Invalid,
    /// Submit not allowed in the current state; nothing changed
    Ignored,
}

/// Drives a recommendation request from the input form to a result.
#[derive(Debug, Default)]
pub struct RecommendationWorkflow {
    status: RecommendStatus,
    results: Vec<CourseRecord>,
    error: Option<RecommendError>,
    pending: Option<BackgroundTask<Result<RecommendResponse, ApiError>>>,
}

impl RecommendationWorkflow {
    /// Creates an idle workflow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when a submit would be acted on for this selection.
    ///
    /// Used to enable or disable the submit control.
    pub fn can_submit(&self, selection: &SelectionSet) -> bool {
        self.accepts_submit() && selection.count() >= MIN_SELECTED_COURSES
    }

    fn accepts_submit(&self) -> bool {
        matches!(
            self.status,
            RecommendStatus::Idle | RecommendStatus::Rejected
        )
    }

    /// Validates the selection and, if valid, sends the request.
    pub fn submit(
        &mut self,
        selection: &SelectionSet,
        profile: Option<&StudentProfile>,
        api: Arc<dyn CourseApi>,
    ) -> SubmitOutcome {
        if !self.accepts_submit() {
            return SubmitOutcome::Ignored;
        }

        self.status = RecommendStatus::Validating;
        self.results.clear();
        self.error = None;

        let selected = selection.count();
        if selected < MIN_SELECTED_COURSES {
            info!(selected, "Recommendation request rejected by validation");
            self.reject(RecommendError::Validation {
                required: MIN_SELECTED_COURSES,
                selected,
            });
            return SubmitOutcome::Invalid;
        }

        let request = RecommendRequest {
            taken_course_ids: selection.ids().to_vec(),
            profile: profile.cloned(),
        };
        info!(ids = ?request.taken_course_ids, "Requesting recommendations");

        self.status = RecommendStatus::Pending;
        self.pending = Some(BackgroundTask::spawn(move || api.recommend(&request)));
        SubmitOutcome::Started
    }

    /// Applies the response if the request has finished.
    ///
    /// Returns true if the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(task) = &self.pending else {
            return false;
        };

        match task.poll() {
            TaskPoll::Pending => false,
            TaskPoll::Ready(result) => {
                self.pending = None;
                self.resolve(result);
                true
            }
            TaskPoll::Lost => {
                self.pending = None;
                self.resolve(Err(lost_worker_error(RECOMMEND_PATH)));
                true
            }
        }
    }

    /// Blocks until the in-flight request (if any) resolves.
    pub fn wait(&mut self) {
        if let Some(task) = self.pending.take() {
            let result = task
                .wait()
                .unwrap_or_else(|| Err(lost_worker_error(RECOMMEND_PATH)));
            self.resolve(result);
        }
    }

    fn resolve(&mut self, result: Result<RecommendResponse, ApiError>) {
        match result {
            Ok(response) if response.courses.is_empty() => {
                self.reject(RecommendError::EmptyResult {
                    message: response
                        .message
                        .unwrap_or_else(|| NO_RECOMMENDATIONS_MESSAGE.to_string()),
                });
            }
            Ok(mut response) => {
                response.courses.truncate(MAX_RECOMMENDATIONS);
                info!(count = response.courses.len(), "Recommendations received");
                self.results = response.courses;
                self.status = RecommendStatus::Fulfilled;
            }
            Err(error) => {
                warn!(%error, "Recommendation request failed");
                self.reject(error.into());
            }
        }
    }

    fn reject(&mut self, error: RecommendError) {
        self.results.clear();
        self.error = Some(error);
        self.status = RecommendStatus::Rejected;
    }

    /// Returns to the input form ("Modify Input").
    ///
    /// Discards the result or error; the selection is owned by the caller
    /// and stays as it was. Does nothing while a request is in flight.
    pub fn reset(&mut self) -> bool {
        match self.status {
            RecommendStatus::Fulfilled | RecommendStatus::Rejected => {
                self.status = RecommendStatus::Idle;
                self.results.clear();
                self.error = None;
                true
            }
            RecommendStatus::Idle | RecommendStatus::Validating | RecommendStatus::Pending => {
                false
            }
        }
    }

    /// Current state.
    pub fn status(&self) -> RecommendStatus {
        self.status
    }

    /// Returns true while a request is in flight.
    pub fn is_pending(&self) -> bool {
        self.status == RecommendStatus::Pending
    }

    /// Recommended courses (empty unless `Fulfilled`).
    pub fn results(&self) -> &[CourseRecord] {
        &self.results
    }

    /// The rejection reason (only when `Rejected`).
    pub fn error(&self) -> Option<&RecommendError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Answers every request with a fixed result and counts calls.
    struct ScriptedApi {
        response: Mutex<Result<RecommendResponse, ApiError>>,
        calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(response: Result<RecommendResponse, ApiError>) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(response),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CourseApi for ScriptedApi {
        fn fetch_courses(&self) -> Result<Vec<CourseRecord>, ApiError> {
            Ok(Vec::new())
        }

        fn fetch_trends(&self) -> Result<Vec<TrendRecord>, ApiError> {
            Ok(Vec::new())
        }

        fn recommend(&self, _: &RecommendRequest) -> Result<RecommendResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.lock().unwrap().clone()
        }
    }

    fn course(id: i64) -> CourseRecord {
        CourseRecord {
            id,
            title: format!("CSE {id}"),
            department: "CSE".to_string(),
            credits: 4.0,
            description: String::new(),
            enrollment: None,
        }
    }

    fn selection_of(ids: &[i64]) -> SelectionSet {
        let mut selection = SelectionSet::new();
        for id in ids {
            selection.toggle(*id);
        }
        selection
    }

    fn ok(ids: &[i64], message: Option<&str>) -> Result<RecommendResponse, ApiError> {
        Ok(RecommendResponse {
            courses: ids.iter().copied().map(course).collect(),
            message: message.map(str::to_string),
        })
    }

    #[test]
    fn test_gate_rejects_small_selections_without_request() {
        for ids in [&[][..], &[1][..]] {
            let api = ScriptedApi::new(ok(&[3], None));
            let mut workflow = RecommendationWorkflow::new();

            let outcome = workflow.submit(&selection_of(ids), None, api.clone());

            assert_eq!(outcome, SubmitOutcome::Invalid);
            assert_eq!(workflow.status(), RecommendStatus::Rejected);
            assert!(workflow.error().unwrap().is_validation());
            assert_eq!(api.calls(), 0);
        }
    }

    #[test]
    fn test_fulfilled_keeps_first_four() {
        let api = ScriptedApi::new(ok(&[3, 4, 5, 6, 7], None));
        let mut workflow = RecommendationWorkflow::new();

        assert_eq!(
            workflow.submit(&selection_of(&[1, 2]), None, api.clone()),
            SubmitOutcome::Started
        );
        assert!(workflow.is_pending());
        workflow.wait();

        assert_eq!(workflow.status(), RecommendStatus::Fulfilled);
        let ids: Vec<i64> = workflow.results().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4, 5, 6]);
        assert_eq!(api.calls(), 1);
    }

    #[test]
    fn test_empty_result_is_rejection() {
        let api = ScriptedApi::new(ok(&[], None));
        let mut workflow = RecommendationWorkflow::new();

        workflow.submit(&selection_of(&[1, 2]), None, api);
        workflow.wait();

        assert_eq!(workflow.status(), RecommendStatus::Rejected);
        let message = workflow.error().unwrap().to_string();
        assert!(message.to_lowercase().contains("no recommendations"));
    }

    #[test]
    fn test_empty_result_uses_server_message() {
        let api = ScriptedApi::new(ok(&[], Some("Database is sparse.")));
        let mut workflow = RecommendationWorkflow::new();

        workflow.submit(&selection_of(&[1, 2]), None, api);
        workflow.wait();

        assert_eq!(
            workflow.error(),
            Some(&RecommendError::EmptyResult {
                message: "Database is sparse.".to_string()
            })
        );
    }

    #[test]
    fn test_server_error_message_is_surfaced() {
        let api = ScriptedApi::new(Err(ApiError::Status {
            endpoint: "recommend".to_string(),
            status: 400,
            message: Some("taken_course_ids is required".to_string()),
        }));
        let mut workflow = RecommendationWorkflow::new();

        workflow.submit(&selection_of(&[1, 2]), None, api);
        workflow.wait();

        assert_eq!(
            workflow.error().unwrap().to_string(),
            "taken_course_ids is required"
        );
    }

    #[test]
    fn test_server_error_without_message_is_generic() {
        let api = ScriptedApi::new(Err(ApiError::Status {
            endpoint: "recommend".to_string(),
            status: 500,
            message: None,
        }));
        let mut workflow = RecommendationWorkflow::new();

        workflow.submit(&selection_of(&[1, 2]), None, api);
        workflow.wait();

        assert_eq!(workflow.error().unwrap().to_string(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_transport_and_parse_failures_reject() {
        for error in [
            ApiError::Transport {
                endpoint: "recommend".to_string(),
                message: "connection refused".to_string(),
            },
            ApiError::Parse {
                endpoint: "recommend".to_string(),
                message: "missing field `courses`".to_string(),
            },
        ] {
            let api = ScriptedApi::new(Err(error));
            let mut workflow = RecommendationWorkflow::new();

            workflow.submit(&selection_of(&[1, 2]), None, api);
            workflow.wait();

            assert_eq!(workflow.status(), RecommendStatus::Rejected);
            assert!(workflow
                .error()
                .unwrap()
                .to_string()
                .starts_with(GENERIC_FAILURE_MESSAGE));
        }
    }

    #[test]
    fn test_reset_returns_to_idle_and_keeps_selection() {
        let api = ScriptedApi::new(ok(&[3], None));
        let selection = selection_of(&[1, 2]);
        let mut workflow = RecommendationWorkflow::new();

        workflow.submit(&selection, None, api);
        workflow.wait();
        assert_eq!(workflow.status(), RecommendStatus::Fulfilled);

        assert!(workflow.reset());
        assert_eq!(workflow.status(), RecommendStatus::Idle);
        assert!(workflow.results().is_empty());
        assert_eq!(selection.count(), 2);
    }

    #[test]
    fn test_submit_ignored_while_fulfilled() {
        let api = ScriptedApi::new(ok(&[3], None));
        let mut workflow = RecommendationWorkflow::new();

        workflow.submit(&selection_of(&[1, 2]), None, api.clone());
        workflow.wait();

        assert_eq!(
            workflow.submit(&selection_of(&[1, 2]), None, api.clone()),
            SubmitOutcome::Ignored
        );
        assert_eq!(workflow.status(), RecommendStatus::Fulfilled);
        assert_eq!(api.calls(), 1);
    }

    #[test]
    fn test_resubmit_after_rejection() {
        let api = ScriptedApi::new(ok(&[3, 4], None));
        let mut workflow = RecommendationWorkflow::new();

        workflow.submit(&selection_of(&[1]), None, api.clone());
        assert_eq!(workflow.status(), RecommendStatus::Rejected);

        assert_eq!(
            workflow.submit(&selection_of(&[1, 2]), None, api.clone()),
            SubmitOutcome::Started
        );
        assert!(workflow.error().is_none());
        workflow.wait();
        assert_eq!(workflow.status(), RecommendStatus::Fulfilled);
    }

    #[test]
    fn test_can_submit() {
        let workflow = RecommendationWorkflow::new();
        assert!(!workflow.can_submit(&selection_of(&[1])));
        assert!(workflow.can_submit(&selection_of(&[1, 2])));
    }

    #[test]
    fn test_reset_is_noop_when_idle() {
        let mut workflow = RecommendationWorkflow::new();
        assert!(!workflow.reset());
        assert_eq!(workflow.status(), RecommendStatus::Idle);
    }
}
