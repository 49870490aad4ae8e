//! Dark and light color palettes for the TUI.
//!
//! `ThemeMode::Auto` asks the OS via `dark-light`; anything it cannot answer
//! falls back to the dark palette.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic colors used by every screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Borders of the focused pane, titles, active tab
    pub primary: Color,
    /// Course codes and key hints
    pub accent: Color,
    /// Checked courses and recommended titles
    pub success: Color,
    /// Failure banners and rejected requests
    pub error: Color,
    /// Loading and pending indicators
    pub warning: Color,
    /// Body text
    pub text: Color,
    /// Hints, empty states and disabled controls
    pub text_muted: Color,
    /// Screen background
    pub background: Color,
    /// Row under the cursor
    pub highlight_bg: Color,
    /// Enrollment bars on the dashboard
    pub bar: Color,
}

impl Theme {
    /// Palette for the configured mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match resolve_mode(mode) {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark | ThemeMode::Auto => Self::dark(),
        }
    }

    /// Palette matching the OS appearance.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_mode(ThemeMode::Auto)
    }

    /// Palette for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::LightGreen,
            error: Color::LightRed,
            warning: Color::Yellow,
            text: Color::White,
            text_muted: Color::DarkGray,
            background: Color::Black,
            highlight_bg: Color::Rgb(40, 44, 52),
            bar: Color::LightBlue,
        }
    }

    /// Palette for light terminal backgrounds.
    ///
    /// Yellow is unreadable on white, so accents use dark orange.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0),
            success: Color::Rgb(0, 128, 0),
            error: Color::Rgb(190, 0, 0),
            warning: Color::Rgb(200, 100, 0),
            text: Color::Black,
            text_muted: Color::Gray,
            background: Color::White,
            highlight_bg: Color::Rgb(225, 232, 240),
            bar: Color::Rgb(30, 90, 180),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

/// Turns `Auto` into a concrete mode using the OS setting.
fn resolve_mode(mode: ThemeMode) -> ThemeMode {
    match mode {
        ThemeMode::Auto => match dark_light::detect() {
            Ok(dark_light::Mode::Light) => ThemeMode::Light,
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => {
                ThemeMode::Dark
            }
        },
        explicit => explicit,
    }
}
