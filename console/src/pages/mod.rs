//! Dashboard pages and the page registry.
//!
//! Every tab view implements [`Page`]: the switcher drives
//! `exit → enter → redraw` on navigation, payloads arrive through
//! [`Page::set_data`], backend outcomes through [`Page::on_reply`], and
//! keyboard input through [`Page::handle_key`]. Pages own their transient
//! form state; `exit` must reset it so a later visit starts clean.
//!
//! [`Registry`] maps route keys to page instances. It is built once at
//! startup and never mutated afterwards; unknown keys resolve to the
//! overview page.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};

use crate::core::{ApiReply, Core};
use crate::route::Route;
use crate::tui::Theme;
use crate::types::PageData;

mod overview;
mod password;
mod seclogs;
mod sshkeys;
mod twofa;

pub use overview::OverviewPage;
pub use password::PasswordPage;
pub use seclogs::SecLogsPage;
pub use sshkeys::SshKeysPage;
pub use twofa::{sanity_check_otp, DisableTotpPage, EnableTotpPage, TwoFaPage};

/// Metadata a page returns on entry, used to update the title line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// Display title for the page.
    pub title: String,
}

/// The page lifecycle contract.
///
/// A page is `inactive` until the switcher targets it, `entering` while a
/// fetch issued on entry is outstanding, and `active` once `set_data` has
/// run (pages that need no data are active immediately). While no data has
/// arrived, `render` draws nothing.
pub trait Page {
    /// Activates the page. Sets the active tab indicator, then either
    /// consumes `data` (when the payload was already delivered) or issues
    /// a fetch through `core` for routes that need one.
    fn enter(&mut self, route: &Route, data: Option<&PageData>, core: &mut Core) -> PageMeta;

    /// Deactivates the page, resetting all transient input state.
    fn exit(&mut self);

    /// Applies a server payload. Derived ok/error sub-state is reset on
    /// every call.
    fn set_data(&mut self, data: &PageData);

    /// Handles the outcome of a backend call owned by this page.
    fn on_reply(&mut self, reply: &ApiReply, core: &mut Core) {
        let _ = (reply, core);
    }

    /// Handles a key press. Returns true when the key was consumed; keys
    /// left unconsumed fall through to the global tab shortcuts.
    fn handle_key(&mut self, key: KeyEvent, core: &mut Core) -> bool;

    /// Renders the page into `area`. Draws nothing while no data is
    /// available.
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// Appends printable characters to `value` and handles backspace.
/// Returns true when the key edited the field.
pub(crate) fn edit_line(key: &KeyEvent, value: &mut String) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            value.push(c);
            true
        }
        KeyCode::Backspace => {
            value.pop();
            true
        }
        _ => false,
    }
}

/// Fixed mapping from route keys to page instances.
pub struct Registry {
    pages: HashMap<String, Box<dyn Page>>,
}

impl Registry {
    /// The route key every unknown key resolves to.
    pub const FALLBACK_KEY: &'static str = "overview";

    /// Builds the registry with all dashboard pages.
    #[must_use]
    pub fn new() -> Self {
        let mut pages: HashMap<String, Box<dyn Page>> = HashMap::new();
        pages.insert("overview".to_string(), Box::new(OverviewPage::default()));
        pages.insert(
            "change-password".to_string(),
            Box::new(PasswordPage::default()),
        );
        pages.insert(
            "security-logs".to_string(),
            Box::new(SecLogsPage::default()),
        );
        pages.insert("ssh-keys".to_string(), Box::new(SshKeysPage::default()));
        pages.insert("2fa".to_string(), Box::new(TwoFaPage::default()));
        pages.insert(
            "2fa/enable-totp".to_string(),
            Box::new(EnableTotpPage::default()),
        );
        pages.insert(
            "2fa/disable-totp".to_string(),
            Box::new(DisableTotpPage::default()),
        );
        Self { pages }
    }

    /// Resolves a route key to a registered key, falling back to the
    /// overview entry for unknown keys.
    #[must_use]
    pub fn resolve_key(&self, key: &str) -> String {
        if self.pages.contains_key(key) {
            key.to_string()
        } else {
            Self::FALLBACK_KEY.to_string()
        }
    }

    /// The page registered under `key`. Unknown keys yield the overview
    /// page.
    pub fn page_mut(&mut self, key: &str) -> &mut dyn Page {
        let key = self.resolve_key(key);
        self.pages
            .get_mut(&key)
            .expect("overview page is always registered")
            .as_mut()
    }

    /// Read-only access to the page registered under `key`, with the same
    /// overview fallback.
    #[must_use]
    pub fn page(&self, key: &str) -> &dyn Page {
        let key = self.resolve_key(key);
        self.pages
            .get(&key)
            .expect("overview page is always registered")
            .as_ref()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
