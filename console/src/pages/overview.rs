//! Overview page: system status and hosted applications.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::Core;
use crate::route::Route;
use crate::tui::Theme;
use crate::types::{DiskSize, DiskUsage, OverviewData, PageData};

use super::{Page, PageMeta};

/// Subtracts two split disk sizes, borrowing from the megabyte part when
/// the byte remainder underflows.
fn disk_size_sub(x: DiskSize, y: DiskSize) -> DiskSize {
    let mut mb = x.mb - y.mb;
    let mut b = x.b - y.b;
    if b < 0 {
        b += 1_000_000;
        mb -= 1;
    }
    DiskSize { mb, b }
}

/// Pretty-prints a disk size as GB, MB or KB depending on magnitude.
fn pretty_size(size: DiskSize) -> String {
    if size.mb >= 1000 {
        format!("{:.2}GB", size.mb as f64 / 1000.0)
    } else if size.mb > 0 {
        format!("{:.2}MB", size.mb as f64 + size.b as f64 / 1e6)
    } else {
        format!("{:.0}KB", size.b as f64 / 1000.0)
    }
}

fn size_bytes(size: DiskSize) -> f64 {
    size.mb as f64 * 1e6 + size.b as f64
}

/// Percentage of `part` in `total` with two decimal digits, or "unknown"
/// for an empty disk report.
fn used_pct(total: DiskSize, part: DiskSize) -> String {
    let total_bytes = size_bytes(total);
    if total_bytes == 0.0 {
        return "unknown".to_string();
    }
    format!("{:.2}", 100.0 * size_bytes(part) / total_bytes)
}

fn disk_usage_line(du: DiskUsage) -> String {
    let used = disk_size_sub(du.total, du.free);
    format!(
        "Disk usage: Total {}, Used {} ({}%), Available {}",
        pretty_size(du.total),
        pretty_size(used),
        used_pct(du.total, used),
        pretty_size(du.free),
    )
}

/// The overview panel. Read-only; every navigation here refetches.
#[derive(Default)]
pub struct OverviewPage {
    data: Option<OverviewData>,
}

impl Page for OverviewPage {
    fn enter(&mut self, route: &Route, data: Option<&PageData>, core: &mut Core) -> PageMeta {
        core.set_tab(route.tab());
        match data {
            Some(d) => self.set_data(d),
            None => core.fetch(&route.encode()),
        }
        PageMeta {
            title: "Overview".to_string(),
        }
    }

    fn exit(&mut self) {
        self.data = None;
    }

    fn set_data(&mut self, data: &PageData) {
        self.data = data.overview.clone();
    }

    fn handle_key(&mut self, _key: KeyEvent, _core: &mut Core) -> bool {
        false
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(d) = &self.data else {
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled("System Status", theme.title)),
            Line::raw(""),
        ];

        if d.unmanaged {
            lines.push(Line::styled(
                "Haven is not managing the operating system.",
                theme.text_secondary,
            ));
        } else {
            if !d.ip_addrs.is_empty() {
                lines.push(Line::styled(
                    format!("IP address: {}", d.ip_addrs.join(" ")),
                    theme.text_primary,
                ));
            }
            if let Some(du) = d.disk_usage {
                lines.push(Line::styled(disk_usage_line(du), theme.text_primary));
            }
        }

        if !d.app_domain.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("Applications", theme.title)));
            lines.push(Line::styled(
                format!("Hosted app: {}", d.app_domain),
                theme.text_primary,
            ));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}
