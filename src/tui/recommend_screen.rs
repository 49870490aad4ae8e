//! Recommendation screen: profile, taken-course picker, and results.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::component::{ContextualComponent, ScreenEvent};
use super::course_browser::{pane_block, CourseBrowser, Pane};
use super::{Session, Theme};
use crate::constants::MIN_SELECTED_COURSES;
use crate::models::department_label;
use crate::recommend::RecommendStatus;

/// Label of the submit control when idle.
const SUBMIT_LABEL: &str = "Get Recommendations";

/// Input form and results panel.
#[derive(Debug, Clone, Default)]
pub struct RecommendScreen {
    /// Department filter and course cursor for the picker
    pub browser: CourseBrowser,
}

impl RecommendScreen {
    /// Creates the screen with an optional pre-selected department.
    pub fn new(default_department: Option<String>) -> Self {
        Self {
            browser: CourseBrowser::new(default_department),
        }
    }

    fn render_profile(f: &mut Frame, area: Rect, theme: &Theme, session: &Session) {
        let profile = &session.profile;
        let field = |key: &'static str, label: &'static str, value: String| {
            vec![
                Span::styled(
                    format!("{key}:"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {label} "), Style::default().fg(theme.text_muted)),
                Span::styled(value, Style::default().fg(theme.text)),
                Span::raw("    "),
            ]
        };

        let mut spans = field("m", "Major", profile.major.clone());
        spans.extend(field("c", "College", profile.college.to_string()));
        spans.extend(field("y", "Year", profile.year.to_string()));

        f.render_widget(
            Paragraph::new(Line::from(spans)).block(pane_block(" Profile ", false, theme)),
            area,
        );
    }

    fn render_summary(f: &mut Frame, area: Rect, theme: &Theme, session: &Session) {
        let workflow = &session.workflow;
        let selection = &session.selection;
        let mut lines = Vec::new();

        lines.push(Line::from(Span::styled(
            format!("Selected ({})", selection.count()),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )));
        for id in selection.ids() {
            let label = session
                .catalog
                .get(*id)
                .map_or_else(|| format!("#{id}"), |course| course.title.clone());
            lines.push(Line::from(Span::styled(
                format!("  {label}"),
                Style::default().fg(theme.text),
            )));
        }
        lines.push(Line::from(""));

        let (label, style) = if workflow.is_pending() {
            (
                RecommendStatus::Pending.to_string(),
                Style::default().fg(theme.warning),
            )
        } else if workflow.can_submit(selection) {
            (
                format!("[ {SUBMIT_LABEL} ]"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                format!("[ {SUBMIT_LABEL} ]"),
                Style::default().fg(theme.text_muted),
            )
        };
        lines.push(Line::from(Span::styled(label, style)));

        if !workflow.is_pending() && selection.count() < MIN_SELECTED_COURSES {
            lines.push(Line::from(Span::styled(
                format!("Select at least {MIN_SELECTED_COURSES} courses you have taken."),
                Style::default().fg(theme.text_muted),
            )));
        }

        if let Some(error) = workflow.error() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(theme.error),
            )));
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(pane_block(" Request ", false, theme)),
            area,
        );
    }

    fn render_results(f: &mut Frame, area: Rect, theme: &Theme, session: &Session) {
        let mut lines = Vec::new();
        for (index, course) in session.workflow.results().iter().enumerate() {
            if index > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}. ", index + 1),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(
                    course.title.clone(),
                    Style::default()
                        .fg(theme.success)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!(
                    "   {} | {} credits",
                    department_label(&course.department),
                    course.credits_label()
                ),
                Style::default().fg(theme.text_muted),
            )));
            if !course.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("   {}", course.description),
                    Style::default().fg(theme.text),
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("e", Style::default().fg(theme.accent)),
            Span::styled(": Modify Input", Style::default().fg(theme.text_muted)),
        ]));

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(pane_block(" Recommended Courses ", true, theme)),
            area,
        );
    }
}

impl ContextualComponent for RecommendScreen {
    type Context = Session;
    type Event = ScreenEvent;

    fn handle_input(&mut self, key: KeyEvent, session: &Session) -> Option<ScreenEvent> {
        let status = session.workflow.status();

        if status == RecommendStatus::Fulfilled {
            return match key.code {
                KeyCode::Char('e') => Some(ScreenEvent::ModifyInput),
                _ => None,
            };
        }

        if self.browser.handle_navigation(key, &session.catalog) {
            return None;
        }

        match key.code {
            KeyCode::Char('e') if status == RecommendStatus::Rejected => {
                Some(ScreenEvent::ModifyInput)
            }
            KeyCode::Char('m') => Some(ScreenEvent::CycleMajor),
            KeyCode::Char('c') => Some(ScreenEvent::CycleCollege),
            KeyCode::Char('y') => Some(ScreenEvent::CycleYear),
            KeyCode::Char(' ') if self.browser.focus() == Pane::Courses => self
                .browser
                .selected_course(&session.catalog)
                .map(|course| ScreenEvent::ToggleCourse(course.id)),
            KeyCode::Enter | KeyCode::Char('s') => Some(ScreenEvent::Submit),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, session: &Session) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(8)])
            .split(area);

        Self::render_profile(f, rows[0], theme, session);

        if session.workflow.status() == RecommendStatus::Fulfilled {
            Self::render_results(f, rows[1], theme, session);
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(30),
                Constraint::Min(30),
                Constraint::Length(36),
            ])
            .split(rows[1]);

        self.browser
            .render_departments(f, columns[0], theme, &session.catalog);
        self.browser.render_courses(
            f,
            columns[1],
            theme,
            &session.catalog,
            Some(&session.selection),
        );
        Self::render_summary(f, columns[2], theme, session);
    }
}
