//! Cover screen: login form and post-login countdown redirect.
//!
//! Shown when the session is not authenticated. After a successful login
//! that carries a redirect target, a five-second countdown runs and then
//! navigates to the target; touching the form stops the countdown.

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

/// Seconds counted down before the redirect fires.
const COUNTDOWN_SECS: i64 = 5;

/// Login screen state.
pub struct CoverScreen {
    password: String,
    error: String,
    redirect_to: String,
    countdown_sec: i64,
    redirect_stopped: bool,
    tick_count: u64,
    ticks_per_sec: u64,
}

impl CoverScreen {
    /// Creates the screen. `tick_ms` is the app tick interval, used to
    /// derive one-second countdown steps.
    #[must_use]
    pub fn new(tick_ms: u64) -> Self {
        Self {
            password: String::new(),
            error: String::new(),
            redirect_to: String::new(),
            countdown_sec: 0,
            redirect_stopped: true,
            tick_count: 0,
            ticks_per_sec: (1000 / tick_ms).max(1),
        }
    }

    /// Shows a login error and clears the entered password.
    pub fn set_error(&mut self, error: String) {
        self.error = error;
        self.password.clear();
    }

    /// Arms the countdown towards `target`.
    pub fn begin_redirect(&mut self, target: String) {
        if target.is_empty() {
            return;
        }
        self.redirect_to = target;
        self.redirect_stopped = false;
        self.countdown_sec = COUNTDOWN_SECS;
        self.tick_count = 0;
    }

    /// Stops a running countdown; the redirect link stays visible.
    pub fn stop_countdown(&mut self) {
        self.redirect_stopped = true;
    }

    /// Whether a countdown is currently running.
    #[must_use]
    pub fn counting_down(&self) -> bool {
        !self.redirect_stopped && !self.redirect_to.is_empty()
    }

    /// Advances the countdown by one tick. Returns the redirect target when
    /// the countdown reaches zero.
    pub fn on_tick(&mut self, core: &mut Core) -> Option<String> {
        if !self.counting_down() {
            return None;
        }

        self.tick_count += 1;
        if self.tick_count < self.ticks_per_sec {
            return None;
        }
        self.tick_count = 0;

        self.countdown_sec -= 1;
        core.redraw();
        if self.countdown_sec <= 0 {
            self.redirect_stopped = true;
            return Some(self.redirect_to.clone());
        }
        None
    }

    /// Handles a key press. Any interaction with the form stops the
    /// countdown; Enter submits the login.
    pub fn handle_key(&mut self, key: KeyEvent, core: &mut Core) {
        if self.counting_down() {
            self.stop_countdown();
            core.redraw();
        }

        match key.code {
            KeyCode::Enter => {
                core.login(self.password.clone());
            }
            _ => {
                if edit_line(&key, &mut self.password) {
                    core.redraw();
                }
            }
        }
    }

    /// Renders the cover screen.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines = vec![
            Line::from(Span::styled("Haven", theme.title)),
            Line::raw(""),
        ];

        if !self.error.is_empty() {
            lines.push(Line::styled(self.error.clone(), theme.error));
        }

        let mut masked = "*".repeat(self.password.chars().count());
        masked.push('_');
        lines.push(Line::from(vec![
            Span::styled("Password  ", theme.label),
            Span::styled(masked, theme.input_focused),
        ]));
        lines.push(Line::styled("[Enter] Login", theme.text_muted));

        if self.counting_down() {
            let redirect = match self.countdown_sec {
                s if s >= 2 => format!(
                    "Redirect to {} in {} seconds...",
                    self.redirect_to, self.countdown_sec
                ),
                1 => format!("Redirect to {} in 1 second...", self.redirect_to),
                _ => format!("Redirect to {} now...", self.redirect_to),
            };
            lines.push(Line::raw(""));
            lines.push(Line::styled(redirect, theme.text_secondary));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn test_core() -> Core {
        let (tx, _rx) = mpsc::unbounded_channel();
        Core::new(Arc::new(ApiClient::new("http://127.0.0.1:0".to_string())), tx)
    }

    /// A cover screen whose countdown advances one second per tick.
    fn fast_cover() -> CoverScreen {
        CoverScreen::new(1000)
    }

    #[test]
    fn no_countdown_without_redirect_target() {
        let mut cover = fast_cover();
        let mut core = test_core();

        assert!(!cover.counting_down());
        cover.begin_redirect(String::new());
        assert!(!cover.counting_down());
        assert_eq!(cover.on_tick(&mut core), None);
    }

    #[test]
    fn countdown_reaches_zero_and_yields_target() {
        let mut cover = fast_cover();
        let mut core = test_core();
        cover.begin_redirect("/overview".to_string());

        for _ in 0..4 {
            assert_eq!(cover.on_tick(&mut core), None);
        }
        assert_eq!(cover.on_tick(&mut core), Some("/overview".to_string()));
        assert!(!cover.counting_down());
    }

    #[test]
    fn interaction_stops_countdown() {
        let mut cover = fast_cover();
        let mut core = test_core();
        cover.begin_redirect("/overview".to_string());

        cover.handle_key(
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE),
            &mut core,
        );

        assert!(!cover.counting_down());
        for _ in 0..10 {
            assert_eq!(cover.on_tick(&mut core), None);
        }
    }

    #[test]
    fn login_error_clears_password() {
        let mut cover = fast_cover();
        let mut core = test_core();
        cover.handle_key(
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE),
            &mut core,
        );

        cover.set_error("wrong password".to_string());
        assert_eq!(cover.error, "wrong password");
        assert!(cover.password.is_empty());
    }
}
