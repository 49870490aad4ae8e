//! Shared test fixtures: sample catalog data and an in-process mock course API.
#![allow(dead_code)] // Not every test binary uses every fixture

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// Path to the coursepilot binary
pub fn coursepilot_bin() -> &'static str {
    env!("CARGO_BIN_EXE_coursepilot")
}

/// Runs the binary with an isolated config directory.
pub fn run_cli(args: &[&str], config_dir: &Path) -> Output {
    Command::new(coursepilot_bin())
        .env("COURSEPILOT_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Catalog with deliberately unsorted CSE titles and nullable columns.
pub fn sample_courses() -> Value {
    json!([
        {"id": 1, "title": "CSE 100: Advanced Data Structures", "department": "CSE",
         "credits": 4, "description": "Trees, hashing, and graphs.", "enrollment": 180},
        {"id": 2, "title": "CSE 8A: Introduction to Programming", "department": "CSE",
         "credits": 4, "description": "First programming course."},
        {"id": 3, "title": "CSE 10: Computing Foundations", "department": "CSE",
         "credits": 2, "description": null},
        {"id": 4, "title": "MATH 20A: Calculus for Science and Engineering", "department": "MATH",
         "credits": 4, "description": "Limits and derivatives."},
        {"id": 5, "title": "MATH 18: Linear Algebra", "department": "MATH",
         "credits": null, "description": "Matrices and vector spaces."},
        {"id": 6, "title": "Special Topics in Economics", "department": "ECON",
         "credits": 4, "description": ""},
        {"id": 7, "title": "COGS 9: Introduction to Data Science", "department": "COGS",
         "credits": 4, "description": "Data science fundamentals."}
    ])
}

/// Five recommended courses with ids 3 through 7.
pub fn five_recommendations() -> Value {
    let courses: Vec<Value> = sample_courses()
        .as_array()
        .expect("sample catalog is an array")
        .iter()
        .filter(|c| (3..=7).contains(&c["id"].as_i64().unwrap_or_default()))
        .cloned()
        .collect();
    json!({ "courses": courses })
}

/// Sample trends, ranked by the server.
pub fn sample_trends() -> Value {
    json!([
        {"department": "CSE", "average_enrollment": 152.6},
        {"department": "MATH", "average_enrollment": 98.5},
        {"department": "ECON", "average_enrollment": 41.2}
    ])
}

/// A canned HTTP reply.
#[derive(Debug, Clone)]
pub enum Reply {
    /// JSON body with status
    Json(StatusCode, Value),
    /// Raw (possibly malformed) body with status
    Raw(StatusCode, &'static str),
}

impl Reply {
    /// 200 with a JSON body.
    pub fn ok(body: Value) -> Self {
        Self::Json(StatusCode::OK, body)
    }

    fn into_response(self) -> Response {
        match self {
            Self::Json(status, body) => (status, Json(body)).into_response(),
            Self::Raw(status, body) => (status, body).into_response(),
        }
    }
}

/// Replies served by a [`MockApi`].
#[derive(Debug, Clone)]
pub struct MockRoutes {
    /// `GET /api/courses`
    pub courses: Reply,
    /// `GET /api/data/trends`
    pub trends: Reply,
    /// `POST /api/recommend`
    pub recommend: Reply,
    /// Delay before answering `POST /api/recommend`
    pub recommend_delay: Duration,
}

impl Default for MockRoutes {
    fn default() -> Self {
        Self {
            courses: Reply::ok(sample_courses()),
            trends: Reply::ok(sample_trends()),
            recommend: Reply::ok(five_recommendations()),
            recommend_delay: Duration::ZERO,
        }
    }
}

struct MockState {
    routes: MockRoutes,
    recommend_calls: AtomicUsize,
    last_recommend_body: Mutex<Option<Value>>,
}

/// Course API served from a background thread on an ephemeral port.
///
/// Shuts down when dropped.
pub struct MockApi {
    /// Base URL including the `/api` prefix
    pub base_url: String,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockApi {
    /// Starts a server with the default routes.
    pub fn start() -> Self {
        Self::with_routes(MockRoutes::default())
    }

    /// Starts a server with custom routes.
    pub fn with_routes(routes: MockRoutes) -> Self {
        let state = Arc::new(MockState {
            routes,
            recommend_calls: AtomicUsize::new(0),
            last_recommend_body: Mutex::new(None),
        });

        let router = Router::new()
            .route("/api/courses", get(courses))
            .route("/api/data/trends", get(trends))
            .route("/api/recommend", post(recommend))
            .with_state(Arc::clone(&state));

        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("Failed to build runtime");

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Failed to bind mock server");
                addr_tx
                    .send(listener.local_addr().expect("Failed to read address"))
                    .expect("Test dropped before server start");

                axum::serve(listener, router)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("Mock server failed");
            });
        });

        let addr = addr_rx.recv().expect("Mock server did not start");

        Self {
            base_url: format!("http://{addr}/api"),
            state,
            shutdown: Some(shutdown_tx),
        }
    }

    /// Number of `POST /recommend` requests received.
    pub fn recommend_calls(&self) -> usize {
        self.state.recommend_calls.load(Ordering::SeqCst)
    }

    /// Body of the last `POST /recommend` request.
    pub fn last_recommend_body(&self) -> Option<Value> {
        self.state
            .last_recommend_body
            .lock()
            .expect("lock poisoned")
            .clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn courses(State(state): State<Arc<MockState>>) -> Response {
    state.routes.courses.clone().into_response()
}

async fn trends(State(state): State<Arc<MockState>>) -> Response {
    state.routes.trends.clone().into_response()
}

async fn recommend(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.recommend_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_recommend_body.lock().expect("lock poisoned") = Some(body);

    if !state.routes.recommend_delay.is_zero() {
        tokio::time::sleep(state.routes.recommend_delay).await;
    }

    state.routes.recommend.clone().into_response()
}

/// A base URL nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read address");
    drop(listener);
    format!("http://{addr}/api")
}
