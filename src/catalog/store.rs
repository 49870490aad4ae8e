//! Catalog store: the fetched course list and its loading status.

use std::sync::Arc;

use tracing::{info, warn};

use super::view::{department_index, filtered_view, CatalogView};
use crate::api::client::COURSES_PATH;
use crate::api::{ApiError, CourseApi};
use crate::background::{lost_worker_error, BackgroundTask, LoadStatus, TaskPoll};
use crate::models::{CourseId, CourseRecord};

/// Holds the catalog for the session.
///
/// The catalog is replaced wholesale by a successful fetch; a failed fetch
/// clears it so no partial catalog is ever shown. The department index is
/// recomputed whenever the catalog changes.
#[derive(Debug, Default)]
pub struct CatalogStore {
    status: LoadStatus,
    courses: Vec<CourseRecord>,
    departments: Vec<String>,
    pending: Option<BackgroundTask<Result<Vec<CourseRecord>, ApiError>>>,
}

impl CatalogStore {
    /// Creates an empty, idle store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `courses`.
    pub fn with_courses(courses: Vec<CourseRecord>) -> Self {
        let mut store = Self::new();
        store.apply(Ok(courses));
        store
    }

    /// Starts fetching the catalog in the background.
    ///
    /// Returns false (and does nothing) if a fetch is already in flight.
    pub fn start_fetch(&mut self, api: Arc<dyn CourseApi>) -> bool {
        if self.status.is_loading() {
            return false;
        }

        info!("Fetching course catalog");
        self.status = LoadStatus::Loading;
        self.pending = Some(BackgroundTask::spawn(move || api.fetch_courses()));
        true
    }

    /// Applies a finished fetch, if any.
    ///
    /// Returns true if the store changed.
    pub fn poll(&mut self) -> bool {
        let Some(task) = &self.pending else {
            return false;
        };

        match task.poll() {
            TaskPoll::Pending => false,
            TaskPoll::Ready(result) => {
                self.pending = None;
                self.apply(result);
                true
            }
            TaskPoll::Lost => {
                self.pending = None;
                self.apply(Err(lost_worker_error(COURSES_PATH)));
                true
            }
        }
    }

    /// Blocks until the in-flight fetch (if any) completes.
    pub fn wait(&mut self) {
        if let Some(task) = self.pending.take() {
            let result = task
                .wait()
                .unwrap_or_else(|| Err(lost_worker_error(COURSES_PATH)));
            self.apply(result);
        }
    }

    /// Drops any in-flight fetch so its result is never applied.
    pub fn discard_pending(&mut self) {
        if self.pending.take().is_some() {
            self.status = LoadStatus::Idle;
        }
    }

    fn apply(&mut self, result: Result<Vec<CourseRecord>, ApiError>) {
        match result {
            Ok(courses) => {
                info!(count = courses.len(), "Course catalog loaded");
                self.departments = department_index(&courses);
                self.courses = courses;
                self.status = LoadStatus::Loaded;
            }
            Err(error) => {
                warn!(%error, "Course catalog fetch failed");
                self.courses.clear();
                self.departments.clear();
                self.status = LoadStatus::Failed(error);
            }
        }
    }

    /// Current loading status.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Returns true while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// All courses in catalog order.
    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    /// Sorted distinct department codes.
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// Looks up a course by id.
    pub fn get(&self, id: CourseId) -> Option<&CourseRecord> {
        self.courses.iter().find(|course| course.id == id)
    }

    /// Returns true if a course with this id is in the catalog.
    pub fn contains(&self, id: CourseId) -> bool {
        self.get(id).is_some()
    }

    /// Courses of `department` in course-code order.
    pub fn view(&self, department: Option<&str>) -> CatalogView<'_> {
        filtered_view(&self.courses, &self.departments, department)
    }

    /// User-facing banner for a failed fetch.
    pub fn failure_banner(&self) -> Option<String> {
        self.status
            .error()
            .map(|error| format!("Failed to load course catalog: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RecommendRequest, RecommendResponse};
    use crate::models::TrendRecord;

    struct StaticApi(Result<Vec<CourseRecord>, ApiError>);

    impl CourseApi for StaticApi {
        fn fetch_courses(&self) -> Result<Vec<CourseRecord>, ApiError> {
            self.0.clone()
        }

        fn fetch_trends(&self) -> Result<Vec<TrendRecord>, ApiError> {
            Ok(Vec::new())
        }

        fn recommend(&self, _: &RecommendRequest) -> Result<RecommendResponse, ApiError> {
            unreachable!("catalog tests never recommend")
        }
    }

    fn course(id: i64, department: &str) -> CourseRecord {
        CourseRecord {
            id,
            title: format!("{department} {id}"),
            department: department.to_string(),
            credits: 4.0,
            description: String::new(),
            enrollment: None,
        }
    }

    #[test]
    fn test_successful_fetch_populates_index() {
        let api = Arc::new(StaticApi(Ok(vec![course(1, "MATH"), course(2, "CSE")])));
        let mut store = CatalogStore::new();

        assert!(store.start_fetch(api));
        assert!(store.is_loading());
        store.wait();

        assert_eq!(store.status(), &LoadStatus::Loaded);
        assert_eq!(store.courses().len(), 2);
        assert_eq!(store.departments(), ["CSE", "MATH"]);
        assert!(store.contains(2));
        assert!(!store.contains(3));
    }

    #[test]
    fn test_failed_fetch_shows_no_partial_catalog() {
        let mut store = CatalogStore::with_courses(vec![course(1, "CSE")]);
        let error = ApiError::Status {
            endpoint: "courses".to_string(),
            status: 500,
            message: None,
        };

        store.start_fetch(Arc::new(StaticApi(Err(error.clone()))));
        store.wait();

        assert_eq!(store.status(), &LoadStatus::Failed(error));
        assert!(store.courses().is_empty());
        assert!(store.departments().is_empty());
        assert!(store.failure_banner().unwrap().contains("HTTP 500"));
    }

    #[test]
    fn test_fetch_is_single_flight() {
        let api: Arc<dyn CourseApi> = Arc::new(StaticApi(Ok(vec![])));
        let mut store = CatalogStore::new();

        assert!(store.start_fetch(Arc::clone(&api)));
        assert!(!store.start_fetch(api));
        store.wait();
        assert_eq!(store.status(), &LoadStatus::Loaded);
    }

    #[test]
    fn test_discarded_fetch_is_never_applied() {
        let api = Arc::new(StaticApi(Ok(vec![course(1, "CSE")])));
        let mut store = CatalogStore::new();

        store.start_fetch(api);
        store.discard_pending();

        assert_eq!(store.status(), &LoadStatus::Idle);
        assert!(!store.poll());
        assert!(store.courses().is_empty());
    }

    #[test]
    fn test_view_uses_cached_index() {
        let store = CatalogStore::with_courses(vec![course(1, "CSE")]);
        assert_eq!(store.view(Some("CSE")).len(), 1);
        assert!(matches!(
            store.view(Some("MATH")),
            CatalogView::Empty { .. }
        ));
    }
}
