//! Security logs page: a read-only list with human-relative timestamps.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::Core;
use crate::route::Route;
use crate::timefmt;
use crate::tui::Theme;
use crate::types::{PageData, SecurityLogsData};

use super::{Page, PageMeta};

/// The security logs list. Timestamps are rendered relative to the server
/// clock delivered with the payload, not the local one.
#[derive(Default)]
pub struct SecLogsPage {
    data: Option<SecurityLogsData>,
    now_sec: i64,
    scroll: u16,
}

impl Page for SecLogsPage {
    fn enter(&mut self, route: &Route, data: Option<&PageData>, core: &mut Core) -> PageMeta {
        core.set_tab(route.tab());
        match data {
            Some(d) => self.set_data(d),
            None => core.fetch(&route.encode()),
        }
        PageMeta {
            title: "Security Logs".to_string(),
        }
    }

    fn exit(&mut self) {
        self.data = None;
        self.scroll = 0;
    }

    fn set_data(&mut self, data: &PageData) {
        self.data = data.security_logs.clone();
        self.now_sec = data.now.sec;
        self.scroll = 0;
    }

    fn handle_key(&mut self, key: KeyEvent, core: &mut Core) -> bool {
        if self.data.is_none() {
            return false;
        }
        match key.code {
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                core.redraw();
                true
            }
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                core.redraw();
                true
            }
            _ => false,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(d) = &self.data else {
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled("Security Logs", theme.title)),
            Line::raw(""),
        ];

        match d.entries.as_deref() {
            None | Some([]) => {
                lines.push(Line::styled("No entries.", theme.text_secondary));
            }
            Some(entries) => {
                for entry in entries {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{:<18}", timefmt::long_format(self.now_sec, entry.t_sec)),
                            theme.text_muted,
                        ),
                        Span::styled(entry.text.clone(), theme.text_primary),
                    ]));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines).scroll((self.scroll, 0)), area);
    }
}
