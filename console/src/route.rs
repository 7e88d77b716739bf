//! Navigation state codec for the dashboard tab router.
//!
//! A route is a two-level path of the form `tab` or `tab/sub` (for example
//! `overview`, `2fa/enable-totp`). [`Route::parse`] turns a path string into
//! a structured [`Route`]; [`Route::encode`] turns it back. Unknown tabs
//! normalize to the overview route, so every possible input string resolves
//! to a registered page.
//!
//! Routes are immutable: navigation constructs a new `Route` and replaces
//! the old one, it never mutates in place.
//!
//! # Example
//!
//! ```
//! use haven_console::route::Route;
//!
//! let r = Route::parse("2fa/enable-totp");
//! assert_eq!(r.tab(), "2fa");
//! assert_eq!(r.sub(), "enable-totp");
//! assert!(r.needs_query());
//!
//! // The change-password page is a pure form with no server-side state,
//! // so entering it must not trigger a background fetch.
//! assert!(!Route::parse("change-password").needs_query());
//! ```

/// Suffix appended to page titles for the terminal title line.
const TITLE_SUFFIX: &str = "Haven";

/// A parsed navigation state: the current tab, optional sub-path, display
/// title, and whether entering this state requires fetching data from the
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    tab: String,
    sub: String,
    title: &'static str,
    no_data: bool,
}

impl Route {
    fn new(tab: &str, sub: &str, title: &'static str) -> Self {
        Self {
            tab: tab.to_string(),
            sub: sub.to_string(),
            title,
            no_data: false,
        }
    }

    /// Builds a route from a tab and sub segment.
    ///
    /// Tabs outside the fixed set collapse to the overview route with an
    /// empty sub segment.
    #[must_use]
    pub fn make(tab: &str, sub: &str) -> Self {
        match tab {
            "change-password" => {
                let mut r = Self::new(tab, sub, "Change Password");
                r.no_data = true;
                r
            }
            "2fa" => Self::new(tab, sub, "Two-Factor Authentication"),
            "security-logs" => Self::new(tab, sub, "Security Logs"),
            "ssh-keys" => Self::new(tab, sub, "Authorized SSH Keys"),
            "overview" => Self::new(tab, sub, "Overview"),
            _ => Self::new("overview", "", "Overview"),
        }
    }

    /// Parses a path string into a route.
    ///
    /// The text before the first `/` is the tab; everything after it is the
    /// sub segment. A path without `/` is a root tab with no sub segment.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        match path.split_once('/') {
            Some((tab, sub)) => Self::make(tab, sub),
            None => Self::make(path, ""),
        }
    }

    /// The top-level tab segment.
    #[must_use]
    pub fn tab(&self) -> &str {
        &self.tab
    }

    /// The sub segment under the tab, empty for root tabs.
    #[must_use]
    pub fn sub(&self) -> &str {
        &self.sub
    }

    /// The human-readable title for this route.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Whether entering this route requires a dashboard-data fetch.
    ///
    /// False only for the change-password form, which carries no
    /// server-rendered state.
    #[must_use]
    pub fn needs_query(&self) -> bool {
        !self.no_data
    }

    /// Encodes the route back into a `tab[/sub]` path string.
    #[must_use]
    pub fn encode(&self) -> String {
        if self.sub.is_empty() {
            self.tab.clone()
        } else {
            format!("{}/{}", self.tab, self.sub)
        }
    }

    /// The route as an absolute URL path.
    #[must_use]
    pub fn url(&self) -> String {
        format!("/{}", self.encode())
    }

    /// The full window/terminal title for this route.
    #[must_use]
    pub fn page_title(&self) -> String {
        format!("{} - {}", self.title, TITLE_SUFFIX)
    }
}

/// Convenience: the full page title for a path string.
#[must_use]
pub fn title(path: &str) -> String {
    Route::parse(path).page_title()
}
