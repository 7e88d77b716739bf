//! Color theme for the console.
//!
//! The default theme uses terminal colors; [`Theme::monochrome`] uses only
//! modifiers for `NO_COLOR` environments, auto-selected by
//! [`Theme::from_env`].

use ratatui::style::{Color, Modifier, Style};

/// Styles used throughout the interface.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Titles and headings.
    pub title: Style,
    /// Form labels.
    pub label: Style,
    /// Primary body text.
    pub text_primary: Style,
    /// Secondary body text.
    pub text_secondary: Style,
    /// Deemphasized text (timestamps, hints).
    pub text_muted: Style,
    /// Active tab in the menu.
    pub tab_active: Style,
    /// Inactive tabs in the menu.
    pub tab_inactive: Style,
    /// Focused input fields.
    pub input_focused: Style,
    /// Unfocused input fields.
    pub input_unfocused: Style,
    /// Inline error messages.
    pub error: Style,
    /// Inline success messages.
    pub ok: Style,
    /// Unfocused borders.
    pub border: Style,
    /// Focused borders.
    pub border_focused: Style,
    /// Dangerous actions (disable TOTP confirm).
    pub danger: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::White),
            text_primary: Style::default(),
            text_secondary: Style::default().fg(Color::Gray),
            text_muted: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            input_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            input_unfocused: Style::default().fg(Color::Gray),
            error: Style::default().fg(Color::Red),
            ok: Style::default().fg(Color::Green),
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            danger: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// A theme with no color codes, only modifiers, for `NO_COLOR`
    /// terminals.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            label: Style::default(),
            text_primary: Style::default(),
            text_secondary: Style::default().add_modifier(Modifier::DIM),
            text_muted: Style::default().add_modifier(Modifier::DIM),
            tab_active: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().add_modifier(Modifier::DIM),
            input_focused: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            input_unfocused: Style::default().add_modifier(Modifier::DIM),
            error: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ok: Style::default().add_modifier(Modifier::BOLD),
            border: Style::default(),
            border_focused: Style::default().add_modifier(Modifier::BOLD),
            danger: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        }
    }

    /// Picks the theme based on the `NO_COLOR` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            Self::monochrome()
        } else {
            Self::default()
        }
    }
}
