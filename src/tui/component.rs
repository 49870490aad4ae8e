//! Component trait pattern for TUI screens.
//!
//! Screens own their cursor and focus state, read shared session data through
//! a context, and report anything that changes that data as a [`ScreenEvent`]
//! for `AppState` to apply.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::models::CourseId;
use crate::tui::Theme;

/// A component that needs read access to shared session data.
pub trait ContextualComponent {
    /// The type of context this component needs
    type Context;

    /// Event type this component can emit
    type Event;

    /// Handle keyboard input with access to shared context.
    ///
    /// Returns `Some(Event)` if the parent has to act on the input.
    fn handle_input(&mut self, key: KeyEvent, context: &Self::Context) -> Option<Self::Event>;

    /// Render the component with access to shared context.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, context: &Self::Context);
}

/// Requests from a screen to change session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Mark or unmark a course as taken
    ToggleCourse(CourseId),
    /// Send the recommendation request
    Submit,
    /// Leave the results panel and return to the input form
    ModifyInput,
    /// Advance the major selector
    CycleMajor,
    /// Advance the college selector
    CycleCollege,
    /// Advance the class year selector
    CycleYear,
}
