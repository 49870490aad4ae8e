//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Screen, Theme};
use crate::recommend::RecommendStatus;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with loading banners, messages, and key hints
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut content_lines: Vec<Line> = Vec::new();

        // Fetch failures stay visible until the next successful load
        for banner in [
            state.session.catalog.failure_banner(),
            state.session.trends.failure_banner(),
        ]
        .into_iter()
        .flatten()
        {
            content_lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(banner),
            ]));
        }

        if state.session.catalog.is_loading() {
            content_lines.push(Line::from(Span::styled(
                "Loading course catalog...",
                Style::default().fg(theme.warning),
            )));
        }

        if state.session.workflow.status() == RecommendStatus::Pending {
            content_lines.push(Line::from(vec![
                Span::styled("Recommendations: ", Style::default().fg(theme.primary)),
                Span::styled(
                    RecommendStatus::Pending.to_string(),
                    Style::default().fg(theme.warning),
                ),
            ]));
        }

        if !state.status_message.is_empty() {
            content_lines.push(Line::from(state.status_message.as_str()));
        }

        // 5 height - 2 for borders = 3 lines, minus 1 for help
        const MAX_CONTENT_LINES: usize = 2;
        let padding_needed = MAX_CONTENT_LINES.saturating_sub(content_lines.len());

        let mut status_text: Vec<Line> = content_lines.into_iter().take(MAX_CONTENT_LINES).collect();
        for _ in 0..padding_needed {
            status_text.push(Line::from(""));
        }
        status_text.push(Self::help_line(state, theme));

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Key hints for the current screen
    fn hints(state: &AppState) -> Vec<(&'static str, &'static str)> {
        let mut hints = match state.screen {
            Screen::Catalog => vec![("↑↓", "Move"), ("←→", "Pane"), ("Enter", "Department")],
            Screen::Dashboard => vec![("↑↓", "Scroll")],
            Screen::Recommend => match state.session.workflow.status() {
                RecommendStatus::Fulfilled => vec![("e", "Modify Input")],
                RecommendStatus::Rejected => vec![
                    ("Space", "Toggle"),
                    ("Enter", "Submit"),
                    ("e", "Modify Input"),
                    ("m/c/y", "Profile"),
                ],
                RecommendStatus::Idle | RecommendStatus::Validating | RecommendStatus::Pending => {
                    vec![("Space", "Toggle"), ("Enter", "Submit"), ("m/c/y", "Profile")]
                }
            },
        };
        hints.extend([("1/2/3", "Screen"), ("r", "Reload"), ("q", "Quit")]);
        hints
    }

    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        spans.push(Span::styled("Help: ", Style::default().fg(theme.primary)));

        for (i, (key, action)) in Self::hints(state).into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(
                key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(action));
        }

        Line::from(spans)
    }
}
