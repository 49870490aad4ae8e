//! Blocking HTTP client for the course API.
//!
//! Calls run on worker threads spawned by the stores and the recommendation
//! workflow, never on the UI thread.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ApiError;
use super::wire::{ErrorBody, RecommendRequest, RecommendResponse};
use crate::models::{CourseRecord, TrendRecord};

/// Catalog endpoint, relative to the base URL.
pub const COURSES_PATH: &str = "courses";

/// Recommendation endpoint, relative to the base URL.
pub const RECOMMEND_PATH: &str = "recommend";

/// Dashboard trends endpoint, relative to the base URL.
pub const TRENDS_PATH: &str = "data/trends";

/// Operations the client needs from the remote server.
///
/// Implemented over HTTP by [`HttpCourseApi`]; tests substitute in-memory
/// implementations.
pub trait CourseApi: Send + Sync {
    /// `GET /courses`
    fn fetch_courses(&self) -> Result<Vec<CourseRecord>, ApiError>;

    /// `GET /data/trends`
    fn fetch_trends(&self) -> Result<Vec<TrendRecord>, ApiError>;

    /// `POST /recommend`
    fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, ApiError>;
}

/// [`CourseApi`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpCourseApi {
    client: Client,
    base_url: String,
}

impl HttpCourseApi {
    /// Creates a client for `base_url` (e.g., `http://localhost:5000/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { client, base_url })
    }

    /// The normalized base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let transport = |e: reqwest::Error| ApiError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        };

        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;
        debug!(%endpoint, status = status.as_u16(), bytes = body.len(), "API response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            warn!(%endpoint, status = status.as_u16(), ?message, "API call failed");
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Parse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

impl CourseApi for HttpCourseApi {
    fn fetch_courses(&self) -> Result<Vec<CourseRecord>, ApiError> {
        let endpoint = self.endpoint(COURSES_PATH);
        debug!(%endpoint, "GET");
        self.execute(&endpoint, self.client.get(&endpoint))
    }

    fn fetch_trends(&self) -> Result<Vec<TrendRecord>, ApiError> {
        let endpoint = self.endpoint(TRENDS_PATH);
        debug!(%endpoint, "GET");
        self.execute(&endpoint, self.client.get(&endpoint))
    }

    fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, ApiError> {
        let endpoint = self.endpoint(RECOMMEND_PATH);
        debug!(%endpoint, ids = ?request.taken_course_ids, "POST");
        self.execute(&endpoint, self.client.post(&endpoint).json(request))
    }
}

/// Validates an API base URL and strips any trailing slash.
pub fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let invalid = |message: String| ApiError::InvalidUrl {
        url: base_url.to_string(),
        message,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
