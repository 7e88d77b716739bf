//! Confirm-password screen.
//!
//! Entered when a payload arrives flagged as sudo-gated. The screen carries
//! the route the user was trying to reach; a successful confirmation
//! navigates there, restoring the interrupted navigation.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::Core;
use crate::pages::edit_line;
use crate::tui::Theme;

/// Password re-confirmation state.
#[derive(Default)]
pub struct ConfirmScreen {
    password: String,
    error: String,
    target: String,
    url: String,
}

impl ConfirmScreen {
    /// Arms the screen with the confirmation URL (shown in the title line)
    /// and the decoded route target, clearing any previous input.
    pub fn set_target(&mut self, url: String, target: String) {
        self.url = url;
        self.target = target;
        self.password.clear();
        self.error.clear();
    }

    /// The confirmation URL, including the encoded redirect parameter.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The route to restore after a successful confirmation.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Shows a confirmation error and clears the entered password.
    pub fn set_error(&mut self, error: String) {
        self.error = error;
        self.password.clear();
    }

    /// Resets the screen completely.
    pub fn clear(&mut self) {
        self.password.clear();
        self.error.clear();
        self.target.clear();
        self.url.clear();
    }

    /// Handles a key press; Enter submits the confirmation.
    pub fn handle_key(&mut self, key: KeyEvent, core: &mut Core) {
        match key.code {
            KeyCode::Enter => {
                core.sudo(self.password.clone(), self.target.clone());
            }
            _ => {
                if edit_line(&key, &mut self.password) {
                    core.redraw();
                }
            }
        }
    }

    /// Renders the confirmation form.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines = vec![
            Line::from(Span::styled("Confirm Password", theme.title)),
            Line::raw(""),
        ];

        if !self.error.is_empty() {
            lines.push(Line::styled(self.error.clone(), theme.error));
        }

        let mut masked = "*".repeat(self.password.chars().count());
        masked.push('_');
        lines.push(Line::from(vec![
            Span::styled("Confirm Password  ", theme.label),
            Span::styled(masked, theme.input_focused),
        ]));
        lines.push(Line::styled("[Enter] Confirm", theme.text_muted));

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_target_resets_previous_input() {
        let mut confirm = ConfirmScreen::default();
        confirm.password = "secret".to_string();
        confirm.error = "wrong".to_string();

        confirm.set_target(
            "/confirm-password?redirect=%2F2fa".to_string(),
            "/2fa".to_string(),
        );

        assert_eq!(confirm.target(), "/2fa");
        assert_eq!(confirm.url(), "/confirm-password?redirect=%2F2fa");
        assert!(confirm.password.is_empty());
        assert!(confirm.error.is_empty());
    }

    #[test]
    fn error_clears_password() {
        let mut confirm = ConfirmScreen::default();
        confirm.password = "secret".to_string();
        confirm.set_error("confirmation failed".to_string());

        assert_eq!(confirm.error, "confirmation failed");
        assert!(confirm.password.is_empty());
    }
}
