//! Catalog screen: browse courses by department.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::component::{ContextualComponent, ScreenEvent};
use super::course_browser::{pane_block, CourseBrowser};
use super::{Session, Theme};

/// Read-only catalog browser.
#[derive(Debug, Clone, Default)]
pub struct CatalogScreen {
    /// Department and course cursors
    pub browser: CourseBrowser,
}

impl CatalogScreen {
    /// Creates the screen with an optional pre-selected department.
    pub fn new(default_department: Option<String>) -> Self {
        Self {
            browser: CourseBrowser::new(default_department),
        }
    }

    fn render_details(&self, f: &mut Frame, area: Rect, theme: &Theme, session: &Session) {
        let block = pane_block(" Details ", false, theme);
        let Some(course) = self.browser.selected_course(&session.catalog) else {
            f.render_widget(block, area);
            return;
        };

        let mut lines = vec![Line::from(Span::styled(
            course.title.clone(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ))];
        let mut facts = format!("{} credits", course.credits_label());
        if let Some(enrollment) = course.enrollment_label() {
            facts.push_str(&format!(" | {enrollment} enrolled"));
        }
        lines.push(Line::from(Span::styled(
            facts,
            Style::default().fg(theme.text_muted),
        )));
        if !course.description.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                course.description.clone(),
                Style::default().fg(theme.text),
            )));
        }

        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}

impl ContextualComponent for CatalogScreen {
    type Context = Session;
    type Event = ScreenEvent;

    fn handle_input(&mut self, key: KeyEvent, session: &Session) -> Option<ScreenEvent> {
        self.browser.handle_navigation(key, &session.catalog);
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, session: &Session) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(30)])
            .split(area);

        self.browser
            .render_departments(f, columns[0], theme, &session.catalog);

        if session.show_descriptions {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(5), Constraint::Length(8)])
                .split(columns[1]);
            self.browser
                .render_courses(f, rows[0], theme, &session.catalog, None);
            self.render_details(f, rows[1], theme, session);
        } else {
            self.browser
                .render_courses(f, columns[1], theme, &session.catalog, None);
        }
    }
}
