//! Change-password page.
//!
//! A pure form: entering it never fetches. Validation runs locally before
//! anything is sent; a 403 from the server surfaces its body verbatim (the
//! backend puts the human-readable reason there), any other failure shows a
//! generic message.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

use crate::core::{ApiReply, Core};
use crate::route::Route;
use crate::tui::Theme;
use crate::types::{ChangePasswordRequest, PageData};

use super::{edit_line, Page, PageMeta};

/// The three password inputs in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
    #[default]
    Old,
    New,
    Repeat,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Old => Field::New,
            Field::New => Field::Repeat,
            Field::Repeat => Field::Old,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Old => Field::Repeat,
            Field::New => Field::Old,
            Field::Repeat => Field::New,
        }
    }
}

/// The change-password form.
#[derive(Default)]
pub struct PasswordPage {
    focus: Field,
    old_password: String,
    new_password: String,
    new_repeat: String,
    error: String,
    ok: bool,
}

impl PasswordPage {
    /// Resets the form to its initial state.
    fn clear(&mut self) {
        self.focus = Field::default();
        self.old_password.clear();
        self.new_password.clear();
        self.new_repeat.clear();
        self.error.clear();
        self.ok = false;
    }

    /// Validates the form, returning the first failing check's message or
    /// an empty string when the input is acceptable.
    fn check_input(&self) -> &'static str {
        if self.old_password.is_empty() {
            return "Old password cannot be empty.";
        }
        if self.new_password.is_empty() {
            return "New password cannot be empty.";
        }
        if self.new_repeat.is_empty() {
            return "Please confirm the password again.";
        }
        if self.new_password != self.new_repeat {
            return "New passwords do not match.";
        }
        if self.new_password == self.old_password {
            return "The new password is the same as the old one.";
        }
        ""
    }

    fn submit(&mut self, core: &mut Core) {
        let err = self.check_input();
        self.error = err.to_string();
        self.ok = false;
        core.redraw();
        if !err.is_empty() {
            return;
        }

        core.change_password(ChangePasswordRequest {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
        });
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Old => &mut self.old_password,
            Field::New => &mut self.new_password,
            Field::Repeat => &mut self.new_repeat,
        }
    }

    fn render_field(&self, label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'_> {
        let style = if focused {
            theme.input_focused
        } else {
            theme.input_unfocused
        };
        let mut masked = "*".repeat(value.chars().count());
        if focused {
            masked.push('_');
        }
        Line::from(vec![
            Span::styled(format!("{label:<18}"), theme.label),
            Span::styled(masked, style),
        ])
    }
}

impl Page for PasswordPage {
    fn enter(&mut self, route: &Route, _data: Option<&PageData>, core: &mut Core) -> PageMeta {
        // A pure form; no server-side state to fetch.
        core.set_tab(route.tab());
        PageMeta {
            title: "Change Password".to_string(),
        }
    }

    fn exit(&mut self) {
        self.clear();
    }

    fn set_data(&mut self, _data: &PageData) {}

    fn on_reply(&mut self, reply: &ApiReply, core: &mut Core) {
        let ApiReply::PasswordChange(result) = reply else {
            return;
        };

        match result {
            Ok(r) if !r.error.is_empty() => {
                self.error = r.error.clone();
            }
            Ok(_) => {
                self.clear();
                self.ok = true;
            }
            Err(e) if e.status() == Some(403) => {
                // The 403 body carries the server's reason verbatim.
                self.error = e.message();
            }
            Err(e) => {
                debug!(error = %e, "password change failed");
                self.error = "Set new password failed.".to_string();
            }
        }
        core.redraw();
    }

    fn handle_key(&mut self, key: KeyEvent, core: &mut Core) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                core.redraw();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                core.redraw();
                true
            }
            KeyCode::Enter => {
                self.submit(core);
                true
            }
            _ => {
                if edit_line(&key, self.focused_value_mut()) {
                    core.redraw();
                    true
                } else {
                    false
                }
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines = vec![
            Line::from(Span::styled("Change Password", theme.title)),
            Line::raw(""),
            self.render_field(
                "Current password",
                &self.old_password,
                self.focus == Field::Old,
                theme,
            ),
            self.render_field(
                "New password",
                &self.new_password,
                self.focus == Field::New,
                theme,
            ),
            self.render_field(
                "Type again",
                &self.new_repeat,
                self.focus == Field::Repeat,
                theme,
            ),
            Line::raw(""),
            Line::styled("[Enter] Change  [Tab] Next field", theme.text_muted),
        ];

        if !self.error.is_empty() {
            lines.push(Line::styled(self.error.clone(), theme.error));
        } else if self.ok {
            lines.push(Line::styled("Password changed.", theme.ok));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}
