//! Department list and course list shared by the catalog and recommendation screens.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::background::LoadStatus;
use crate::catalog::{extract_course_code, CatalogStore, CatalogView};
use crate::models::{department_label, CourseRecord};
use crate::recommend::SelectionSet;
use crate::tui::Theme;

/// Which list has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Department list
    #[default]
    Departments,
    /// Course list of the active department
    Courses,
}

/// Cursor and filter state for browsing the catalog by department.
#[derive(Debug, Clone, Default)]
pub struct CourseBrowser {
    focus: Pane,
    department_cursor: usize,
    course_cursor: usize,
    active_department: Option<String>,
}

impl CourseBrowser {
    /// Creates a browser, optionally with a department already active.
    pub fn new(default_department: Option<String>) -> Self {
        let focus = if default_department.is_some() {
            Pane::Courses
        } else {
            Pane::Departments
        };
        Self {
            focus,
            active_department: default_department,
            ..Self::default()
        }
    }

    /// Pane with focus.
    pub const fn focus(&self) -> Pane {
        self.focus
    }

    /// The department courses are filtered by, if any.
    pub fn active_department(&self) -> Option<&str> {
        self.active_department.as_deref()
    }

    /// Moves the department cursor onto the active department after a reload.
    pub fn sync(&mut self, catalog: &CatalogStore) {
        if let Some(active) = &self.active_department {
            if let Some(index) = catalog.departments().iter().position(|d| d == active) {
                self.department_cursor = index;
            }
        }
        self.clamp(catalog);
    }

    fn clamp(&mut self, catalog: &CatalogStore) {
        self.department_cursor = self
            .department_cursor
            .min(catalog.departments().len().saturating_sub(1));
        let visible = catalog.view(self.active_department()).len();
        self.course_cursor = self.course_cursor.min(visible.saturating_sub(1));
    }

    /// Handles cursor movement and department activation.
    ///
    /// Returns true if the key was consumed.
    pub fn handle_navigation(&mut self, key: KeyEvent, catalog: &CatalogStore) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                match self.focus {
                    Pane::Departments => {
                        self.department_cursor = self.department_cursor.saturating_sub(1);
                    }
                    Pane::Courses => self.course_cursor = self.course_cursor.saturating_sub(1),
                }
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                match self.focus {
                    Pane::Departments => self.department_cursor += 1,
                    Pane::Courses => self.course_cursor += 1,
                }
                self.clamp(catalog);
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.focus = Pane::Departments;
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.focus = Pane::Courses;
                true
            }
            KeyCode::Enter if self.focus == Pane::Departments => {
                if let Some(department) = catalog.departments().get(self.department_cursor) {
                    self.active_department = Some(department.clone());
                    self.course_cursor = 0;
                    self.focus = Pane::Courses;
                }
                true
            }
            _ => false,
        }
    }

    /// Course under the cursor in the filtered view.
    pub fn selected_course<'a>(&self, catalog: &'a CatalogStore) -> Option<&'a CourseRecord> {
        catalog
            .view(self.active_department())
            .courses()
            .get(self.course_cursor)
            .copied()
    }

    /// Renders the department list.
    pub fn render_departments(&self, f: &mut Frame, area: Rect, theme: &Theme, catalog: &CatalogStore) {
        let block = pane_block(" Departments ", self.focus == Pane::Departments, theme);

        if catalog.departments().is_empty() {
            let text = match catalog.status() {
                LoadStatus::Idle | LoadStatus::Loading => "Loading...",
                LoadStatus::Loaded | LoadStatus::Failed(_) => "No departments",
            };
            f.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(theme.text_muted))
                    .block(block),
                area,
            );
            return;
        }

        let items: Vec<ListItem> = catalog
            .departments()
            .iter()
            .map(|code| {
                let style = if self.active_department() == Some(code.as_str()) {
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(Line::from(Span::styled(department_label(code), style)))
            })
            .collect();

        let mut state = ListState::default().with_selected(Some(self.department_cursor));
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style(self.focus == Pane::Departments, theme));
        f.render_stateful_widget(list, area, &mut state);
    }

    /// Renders the course list, with checkboxes when a selection is given.
    pub fn render_courses(
        &self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        catalog: &CatalogStore,
        selection: Option<&SelectionSet>,
    ) {
        let title = match self.active_department() {
            Some(code) => format!(" {} ", department_label(code)),
            None => " Courses ".to_string(),
        };
        let block = pane_block(&title, self.focus == Pane::Courses, theme);

        if let Some(message) = placeholder(catalog) {
            f.render_widget(message_paragraph(message, theme).block(block), area);
            return;
        }

        let view = catalog.view(self.active_department());
        let courses = match view {
            CatalogView::NoDepartmentSelected => {
                f.render_widget(
                    message_paragraph("Select a department to view its courses.".to_string(), theme)
                        .block(block),
                    area,
                );
                return;
            }
            CatalogView::Empty { department } => {
                f.render_widget(
                    message_paragraph(
                        format!("No courses found for {}.", department_label(&department)),
                        theme,
                    )
                    .block(block),
                    area,
                );
                return;
            }
            CatalogView::Courses(courses) => courses,
        };

        let items: Vec<ListItem> = courses
            .iter()
            .map(|course| {
                let mut spans = Vec::new();
                if let Some(selection) = selection {
                    let (mark, color) = if selection.contains(course.id) {
                        ("[x] ", theme.success)
                    } else {
                        ("[ ] ", theme.text_muted)
                    };
                    spans.push(Span::styled(mark, Style::default().fg(color)));
                }
                spans.push(Span::styled(
                    format!("{:<6}", extract_course_code(&course.title, &course.department)),
                    Style::default().fg(theme.accent),
                ));
                spans.push(Span::styled(course.title.clone(), Style::default().fg(theme.text)));
                spans.push(Span::styled(
                    format!("  {} cr", course.credits_label()),
                    Style::default().fg(theme.text_muted),
                ));
                if let Some(enrollment) = course.enrollment_label() {
                    spans.push(Span::styled(
                        format!(", {enrollment} enrolled"),
                        Style::default().fg(theme.text_muted),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let mut state = ListState::default().with_selected(Some(self.course_cursor));
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style(self.focus == Pane::Courses, theme));
        f.render_stateful_widget(list, area, &mut state);
    }
}

/// Message shown instead of the course list while the catalog is unavailable.
fn placeholder(catalog: &CatalogStore) -> Option<String> {
    match catalog.status() {
        LoadStatus::Idle | LoadStatus::Loading => Some("Loading course catalog...".to_string()),
        LoadStatus::Failed(_) => catalog.failure_banner(),
        LoadStatus::Loaded => None,
    }
}

fn message_paragraph(message: String, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(message)
        .style(Style::default().fg(theme.text_muted))
        .wrap(Wrap { trim: true })
}

/// Bordered block, highlighted when focused.
pub fn pane_block<'a>(title: &str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused { theme.primary } else { theme.text_muted };
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.background))
}

fn highlight_style(focused: bool, theme: &Theme) -> Style {
    let style = Style::default().bg(theme.highlight_bg);
    if focused {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}
