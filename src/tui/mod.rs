//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and the three screens built with Ratatui.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod catalog_screen;
pub mod component;
pub mod course_browser;
pub mod dashboard_screen;
pub mod recommend_screen;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::CourseApi;
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::dashboard::TrendsStore;
use crate::models::{CourseId, StudentProfile};
use crate::recommend::{RecommendStatus, RecommendationWorkflow, SelectionSet, SubmitOutcome};

pub use catalog_screen::CatalogScreen;
pub use component::{ContextualComponent, ScreenEvent};
pub use dashboard_screen::DashboardScreen;
pub use recommend_screen::RecommendScreen;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Course catalog browser
    #[default]
    Catalog,
    /// Enrollment trends
    Dashboard,
    /// Recommendation form and results
    Recommend,
}

impl Screen {
    /// All screens in tab order.
    pub const ALL: [Self; 3] = [Self::Catalog, Self::Dashboard, Self::Recommend];

    /// Tab title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Catalog => "1 Catalog",
            Self::Dashboard => "2 Dashboard",
            Self::Recommend => "3 Recommendations",
        }
    }

    /// Next screen in tab order, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::Catalog => Self::Dashboard,
            Self::Dashboard => Self::Recommend,
            Self::Recommend => Self::Catalog,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Catalog => 0,
            Self::Dashboard => 1,
            Self::Recommend => 2,
        }
    }
}

/// Data shared by all screens.
#[derive(Debug)]
pub struct Session {
    /// Fetched course catalog
    pub catalog: CatalogStore,
    /// Fetched enrollment trends
    pub trends: TrendsStore,
    /// Courses marked as taken
    pub selection: SelectionSet,
    /// Recommendation request state
    pub workflow: RecommendationWorkflow,
    /// Profile sent with recommendation requests
    pub profile: StudentProfile,
    /// Show the description panel in the catalog screen
    pub show_descriptions: bool,
}

/// Application state for the TUI.
pub struct AppState {
    /// Loaded configuration
    pub config: Config,
    /// Course service client shared with background workers
    pub api: Arc<dyn CourseApi>,
    /// Active color theme
    pub theme: Theme,
    /// Screen being shown
    pub screen: Screen,
    /// Session data
    pub session: Session,
    /// Catalog screen state
    pub catalog_screen: CatalogScreen,
    /// Dashboard screen state
    pub dashboard_screen: DashboardScreen,
    /// Recommendation screen state
    pub recommend_screen: RecommendScreen,
    /// Transient status line
    pub status_message: String,
    /// Set when the user quits
    pub should_quit: bool,
}

impl AppState {
    /// Creates the application state. No request is made until [`AppState::start`].
    pub fn new(config: Config, api: Arc<dyn CourseApi>) -> Self {
        let default_department = config.ui.default_department.clone();
        Self {
            theme: Theme::from_mode(config.ui.theme_mode),
            screen: Screen::default(),
            session: Session {
                catalog: CatalogStore::new(),
                trends: TrendsStore::new(),
                selection: SelectionSet::new(),
                workflow: RecommendationWorkflow::new(),
                profile: config.profile.clone(),
                show_descriptions: config.ui.show_descriptions,
            },
            catalog_screen: CatalogScreen::new(default_department.clone()),
            dashboard_screen: DashboardScreen::default(),
            recommend_screen: RecommendScreen::new(default_department),
            status_message: String::new(),
            should_quit: false,
            config,
            api,
        }
    }

    /// Starts the initial catalog and trends fetches.
    pub fn start(&mut self) {
        self.session.catalog.start_fetch(Arc::clone(&self.api));
        self.session.trends.start_fetch(Arc::clone(&self.api));
    }

    /// Reloads the data behind the current screen.
    pub fn reload(&mut self) {
        let started = match self.screen {
            Screen::Dashboard => self.session.trends.start_fetch(Arc::clone(&self.api)),
            Screen::Catalog | Screen::Recommend => {
                self.session.catalog.start_fetch(Arc::clone(&self.api))
            }
        };
        self.status_message = if started {
            String::new()
        } else {
            "Already loading...".to_string()
        };
    }

    /// Applies finished background work. Returns true if anything changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        if self.session.catalog.poll() {
            self.catalog_screen.browser.sync(&self.session.catalog);
            self.recommend_screen.browser.sync(&self.session.catalog);
            changed = true;
        }

        changed |= self.session.trends.poll();

        if self.session.workflow.poll() {
            self.status_message = match self.session.workflow.status() {
                RecommendStatus::Fulfilled => "Recommendations ready".to_string(),
                _ => String::new(),
            };
            changed = true;
        }

        changed
    }

    /// Applies a request from a screen.
    pub fn apply_event(&mut self, event: ScreenEvent) {
        debug!(?event, "Screen event");
        match event {
            ScreenEvent::ToggleCourse(id) => self.toggle_course(id),
            ScreenEvent::Submit => self.submit(),
            ScreenEvent::ModifyInput => {
                if self.session.workflow.reset() {
                    self.status_message.clear();
                }
            }
            ScreenEvent::CycleMajor => self.session.profile.cycle_major(),
            ScreenEvent::CycleCollege => {
                self.session.profile.college = self.session.profile.college.next();
            }
            ScreenEvent::CycleYear => {
                self.session.profile.year = self.session.profile.year.next();
            }
        }
    }

    /// Toggles a course while the form is editable.
    ///
    /// Only catalog courses can be added; a selected course can always be
    /// removed, even after a reload dropped it from the catalog.
    fn toggle_course(&mut self, id: CourseId) {
        if !self.session.selection.contains(id) && !self.session.catalog.contains(id) {
            return;
        }
        match self.session.workflow.status() {
            RecommendStatus::Pending | RecommendStatus::Fulfilled => {}
            RecommendStatus::Idle | RecommendStatus::Validating | RecommendStatus::Rejected => {
                self.session.selection.toggle(id);
            }
        }
    }

    fn submit(&mut self) {
        let outcome = self.session.workflow.submit(
            &self.session.selection,
            Some(&self.session.profile),
            Arc::clone(&self.api),
        );
        match outcome {
            SubmitOutcome::Started => self.status_message.clear(),
            SubmitOutcome::Invalid => {}
            SubmitOutcome::Ignored => {
                if self.session.workflow.is_pending() {
                    self.status_message = "A request is already in progress.".to_string();
                }
            }
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    info!("{APP_NAME} TUI started");
    loop {
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key_event(state, key);
            }
        }

        // Apply results from background fetches
        state.tick();

        if state.should_quit {
            break;
        }
    }

    info!("{APP_NAME} TUI exiting");
    Ok(())
}

/// Routes a key press to global shortcuts or the active screen.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
            return;
        }
        KeyCode::Char('q') => {
            state.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            state.screen = state.screen.next();
            return;
        }
        KeyCode::Char('1') => {
            state.screen = Screen::Catalog;
            return;
        }
        KeyCode::Char('2') => {
            state.screen = Screen::Dashboard;
            return;
        }
        KeyCode::Char('3') => {
            state.screen = Screen::Recommend;
            return;
        }
        KeyCode::Char('r') => {
            state.reload();
            return;
        }
        _ => {}
    }

    let event = match state.screen {
        Screen::Catalog => state.catalog_screen.handle_input(key, &state.session),
        Screen::Dashboard => state.dashboard_screen.handle_input(key, &state.session),
        Screen::Recommend => state.recommend_screen.handle_input(key, &state.session),
    };
    if let Some(event) = event {
        state.apply_event(event);
    }
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar with tabs
            Constraint::Min(10),   // Screen content
            Constraint::Length(5), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);

    let theme = &state.theme;
    match state.screen {
        Screen::Catalog => state.catalog_screen.render(f, chunks[1], theme, &state.session),
        Screen::Dashboard => state
            .dashboard_screen
            .render(f, chunks[1], theme, &state.session),
        Screen::Recommend => state
            .recommend_screen
            .render(f, chunks[1], theme, &state.session),
    }

    StatusBar::render(f, chunks[2], state, theme);
}

/// Render title bar with screen tabs
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let titles: Vec<Line> = Screen::ALL.iter().map(|s| Line::from(s.title())).collect();
    let tabs = Tabs::new(titles)
        .select(state.screen.index())
        .style(Style::default().fg(state.theme.text_muted))
        .highlight_style(
            Style::default()
                .fg(state.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {APP_NAME} "))
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, RecommendRequest, RecommendResponse};
    use crate::config::ThemeMode;
    use crate::models::{CourseRecord, TrendRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a fixed catalog and counts recommendation calls.
    struct FakeApi {
        courses: Vec<CourseRecord>,
        recommend_calls: AtomicUsize,
    }

    impl CourseApi for FakeApi {
        fn fetch_courses(&self) -> Result<Vec<CourseRecord>, ApiError> {
            Ok(self.courses.clone())
        }

        fn fetch_trends(&self) -> Result<Vec<TrendRecord>, ApiError> {
            Ok(Vec::new())
        }

        fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, ApiError> {
            self.recommend_calls.fetch_add(1, Ordering::SeqCst);
            Ok(RecommendResponse {
                courses: self
                    .courses
                    .iter()
                    .filter(|c| !request.taken_course_ids.contains(&c.id))
                    .cloned()
                    .collect(),
                message: None,
            })
        }
    }

    fn course(id: CourseId) -> CourseRecord {
        CourseRecord {
            id,
            title: format!("CSE {id}: Course {id}"),
            department: "CSE".to_string(),
            credits: 4.0,
            description: String::new(),
            enrollment: None,
        }
    }

    fn titled(id: CourseId, department: &str, title: &str) -> CourseRecord {
        CourseRecord {
            department: department.to_string(),
            title: title.to_string(),
            ..course(id)
        }
    }

    fn loaded_state() -> (AppState, Arc<FakeApi>) {
        state_with_catalog((1..=6).map(course).collect())
    }

    fn state_with_catalog(courses: Vec<CourseRecord>) -> (AppState, Arc<FakeApi>) {
        let api = Arc::new(FakeApi {
            courses,
            recommend_calls: AtomicUsize::new(0),
        });
        let mut config = Config::default();
        config.ui.theme_mode = ThemeMode::Dark;
        let mut state = AppState::new(config, api.clone());
        state.start();
        state.session.catalog.wait();
        state.session.trends.wait();
        (state, api)
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_screen_switching() {
        let (mut state, _) = loaded_state();
        press(&mut state, KeyCode::Char('3'));
        assert_eq!(state.screen, Screen::Recommend);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.screen, Screen::Catalog);
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }

    #[test]
    fn test_toggle_requires_catalog_membership() {
        let (mut state, _) = loaded_state();
        state.apply_event(ScreenEvent::ToggleCourse(99));
        assert!(state.session.selection.is_empty());

        state.apply_event(ScreenEvent::ToggleCourse(2));
        assert!(state.session.selection.contains(2));
    }

    #[test]
    fn test_selection_survives_department_switch() {
        let (mut state, _) = state_with_catalog(vec![
            titled(1, "CSE", "CSE 10: Foundations"),
            titled(2, "CSE", "CSE 8A: Intro"),
            titled(3, "MATH", "MATH 20A: Calculus"),
            titled(4, "MATH", "MATH 18: Linear Algebra"),
        ]);
        press(&mut state, KeyCode::Char('3'));

        // CSE is first in the department list; its first course is CSE 8A
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.recommend_screen.browser.active_department(), Some("CSE"));
        press(&mut state, KeyCode::Char(' '));

        press(&mut state, KeyCode::Left);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.recommend_screen.browser.active_department(), Some("MATH"));
        press(&mut state, KeyCode::Char(' '));

        assert_eq!(state.session.selection.ids(), [2, 4]);
        assert!(state.session.workflow.can_submit(&state.session.selection));
    }

    #[test]
    fn test_course_dropped_by_reload_can_be_deselected() {
        let (mut state, _) = loaded_state();
        state.apply_event(ScreenEvent::ToggleCourse(1));
        state.apply_event(ScreenEvent::ToggleCourse(2));

        state.session.catalog = CatalogStore::with_courses((2..=6).map(course).collect());
        state.apply_event(ScreenEvent::ToggleCourse(1));
        assert_eq!(state.session.selection.ids(), [2]);

        // Gone from the catalog, so it cannot be added back
        state.apply_event(ScreenEvent::ToggleCourse(1));
        assert_eq!(state.session.selection.ids(), [2]);
    }

    #[test]
    fn test_single_selection_never_reaches_network() {
        let (mut state, api) = loaded_state();
        state.apply_event(ScreenEvent::ToggleCourse(1));
        state.apply_event(ScreenEvent::Submit);

        assert_eq!(state.session.workflow.status(), RecommendStatus::Rejected);
        assert_eq!(api.recommend_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_submit_then_modify_input_keeps_selection() {
        let (mut state, api) = loaded_state();
        state.apply_event(ScreenEvent::ToggleCourse(1));
        state.apply_event(ScreenEvent::ToggleCourse(2));
        state.apply_event(ScreenEvent::Submit);
        state.session.workflow.wait();

        assert_eq!(state.session.workflow.status(), RecommendStatus::Fulfilled);
        assert_eq!(state.session.workflow.results().len(), 4);
        assert_eq!(api.recommend_calls.load(Ordering::SeqCst), 1);

        // Form is hidden while results are shown
        state.apply_event(ScreenEvent::ToggleCourse(3));
        assert!(!state.session.selection.contains(3));

        state.apply_event(ScreenEvent::ModifyInput);
        assert_eq!(state.session.workflow.status(), RecommendStatus::Idle);
        assert_eq!(state.session.selection.ids(), [1, 2]);
    }

    #[test]
    fn test_profile_cycling() {
        let (mut state, _) = loaded_state();
        state.apply_event(ScreenEvent::CycleMajor);
        state.apply_event(ScreenEvent::CycleYear);
        assert_eq!(state.session.profile.major, "MATH");
        assert_eq!(
            state.session.profile.year,
            crate::models::ClassYear::Junior
        );
    }
}
