//! Dashboard screen: average enrollment per department.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::component::{ContextualComponent, ScreenEvent};
use super::course_browser::pane_block;
use super::{Session, Theme};
use crate::background::LoadStatus;
use crate::dashboard::bar_width;
use crate::models::department_label;

/// Width reserved for the department label column.
const LABEL_WIDTH: usize = 36;

/// Scrollable trend chart.
#[derive(Debug, Clone, Default)]
pub struct DashboardScreen {
    scroll: u16,
}

impl ContextualComponent for DashboardScreen {
    type Context = Session;
    type Event = ScreenEvent;

    fn handle_input(&mut self, key: KeyEvent, session: &Session) -> Option<ScreenEvent> {
        let rows = u16::try_from(session.trends.trends().len()).unwrap_or(u16::MAX);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(rows.saturating_sub(1));
            }
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, session: &Session) {
        let block = pane_block(" Average Enrollment by Department ", true, theme);
        let store = &session.trends;

        let message = match store.status() {
            LoadStatus::Idle | LoadStatus::Loading => Some("Loading enrollment trends...".to_string()),
            LoadStatus::Failed(_) => store.failure_banner(),
            LoadStatus::Loaded if store.trends().is_empty() => Some("No trend data".to_string()),
            LoadStatus::Loaded => None,
        };
        if let Some(message) = message {
            f.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(theme.text_muted))
                    .block(block),
                area,
            );
            return;
        }

        let bar_space = (area.width as usize).saturating_sub(LABEL_WIDTH + 10);
        let max = store.max_average();
        let lines: Vec<Line> = store
            .trends()
            .iter()
            .map(|trend| {
                let average = trend.rounded_average();
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", department_label(&trend.department), width = LABEL_WIDTH),
                        Style::default().fg(theme.text),
                    ),
                    Span::styled(
                        format!("{average:>5} "),
                        Style::default().fg(theme.accent),
                    ),
                    Span::styled(
                        "█".repeat(bar_width(average, max, bar_space)),
                        Style::default().fg(theme.bar),
                    ),
                ])
            })
            .collect();

        f.render_widget(
            Paragraph::new(lines).scroll((self.scroll, 0)).block(block),
            area,
        );
    }
}
