//! Authorized SSH keys page: the key list is edited in place and written
//! back in one call; the result is reported inline without navigating away.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::{ApiReply, Core};
use crate::route::Route;
use crate::tui::Theme;
use crate::types::PageData;

use super::{Page, PageMeta};

/// The SSH key editor.
#[derive(Default)]
pub struct SshKeysPage {
    show: bool,
    disabled: bool,
    keys: String,
    success_msg: String,
    error_msg: String,
}

impl SshKeysPage {
    fn clear(&mut self) {
        self.show = false;
        self.keys.clear();
        self.success_msg.clear();
        self.error_msg.clear();
    }

    /// Editing invalidates any previous submit outcome.
    fn clear_messages(&mut self) {
        self.success_msg.clear();
        self.error_msg.clear();
    }
}

impl Page for SshKeysPage {
    fn enter(&mut self, route: &Route, data: Option<&PageData>, core: &mut Core) -> PageMeta {
        core.set_tab(route.tab());
        match data {
            Some(d) => self.set_data(d),
            None => core.fetch(&route.encode()),
        }
        PageMeta {
            title: "SSH Keys".to_string(),
        }
    }

    fn exit(&mut self) {
        self.clear();
    }

    fn set_data(&mut self, data: &PageData) {
        let Some(d) = &data.ssh_keys else {
            return;
        };
        self.show = true;
        self.disabled = d.disabled;
        self.keys = d.keys.clone();
        self.clear_messages();
    }

    fn on_reply(&mut self, reply: &ApiReply, core: &mut Core) {
        let ApiReply::SshKeysUpdate(result) = reply else {
            return;
        };

        match result {
            Ok(_) => {
                self.success_msg = "Successfully updated SSH keys".to_string();
            }
            Err(e) => {
                self.error_msg = format!("Failed to update SSH keys: {}", e.message());
            }
        }
        core.redraw();
    }

    fn handle_key(&mut self, key: KeyEvent, core: &mut Core) -> bool {
        if !self.show || self.disabled {
            return false;
        }

        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                core.update_ssh_keys(self.keys.clone());
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.keys.push(c);
                self.clear_messages();
                core.redraw();
                true
            }
            KeyCode::Enter => {
                self.keys.push('\n');
                self.clear_messages();
                core.redraw();
                true
            }
            KeyCode::Backspace => {
                self.keys.pop();
                self.clear_messages();
                core.redraw();
                true
            }
            _ => false,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.show {
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled("Authorized SSH Public Keys", theme.title)),
            Line::raw(""),
        ];

        if self.disabled {
            lines.push(Line::styled(
                "Haven is not managing the operating system, so it does not",
                theme.text_primary,
            ));
            lines.push(Line::styled(
                "manage the authorized SSH public keys. To change them, edit",
                theme.text_primary,
            ));
            lines.push(Line::styled(
                "~/.ssh/authorized_keys directly.",
                theme.text_primary,
            ));
            frame.render_widget(Paragraph::new(lines), area);
            return;
        }

        for key_line in self.keys.split('\n') {
            lines.push(Line::styled(key_line.to_string(), theme.input_focused));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled("[Ctrl+S] Update Keys", theme.text_muted));

        if !self.success_msg.is_empty() {
            lines.push(Line::styled(self.success_msg.clone(), theme.ok));
        }
        if !self.error_msg.is_empty() {
            lines.push(Line::styled(self.error_msg.clone(), theme.error));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}
