//! Dashboard chrome: top bar, tab menu, and status line.
//!
//! The chrome frames every dashboard page. The top bar carries the product
//! name and the current page title (the terminal stand-in for the browser
//! title bar); the menu lists the tabs with the active one highlighted; the
//! status line shows key hints.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme::Theme;

/// The navigation tabs in menu order, `(route key, label, hotkey)`.
pub const TABS: &[(&str, &str, char)] = &[
    ("overview", "Overview", '1'),
    ("ssh-keys", "Authorized SSH Keys", '2'),
    ("security-logs", "Security Logs", '3'),
    ("change-password", "Change Password", '4'),
    ("2fa", "Two-Factor Authentication", '5'),
];

/// Renders the top bar with the product name and page title.
pub fn render_topbar(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(" Haven ", theme.title),
        Span::styled(title, theme.text_secondary),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the tab menu, highlighting the active tab.
pub fn render_menu(frame: &mut Frame, area: Rect, active_tab: &str, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    for (key, label, hotkey) in TABS {
        let style = if *key == active_tab {
            theme.tab_active
        } else {
            theme.tab_inactive
        };
        spans.push(Span::styled(format!("[{hotkey}] {label}"), style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders the bottom status line with key hints.
pub fn render_status(frame: &mut Frame, area: Rect, hint: &str, theme: &Theme) {
    let line = Line::from(vec![Span::styled(format!(" {hint}"), theme.text_muted)]);
    frame.render_widget(Paragraph::new(line), area);
}
