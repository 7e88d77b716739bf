//! The console application loop.
//!
//! [`App`] owns the top-level screen state machine (cover → dashboard →
//! confirm-password), the page registry, and the navigation core. It runs a
//! single-threaded event loop: terminal events and backend replies arrive
//! on channels, state changes mark the core dirty, and at most one frame is
//! drawn per loop turn however many redraws were requested.
//!
//! Payload application is centralized here: every dashboard payload —
//! whether preloaded or fetched — passes through [`App::apply_data`], which
//! checks the sudo gate once before anything else sees the data, and every
//! fetch reply passes the last-request-wins staleness filter first.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Margin};
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::api::ApiError;
use crate::core::{ApiReply, Command, Core};
use crate::error::{Result, TuiError};
use crate::pages::Registry;
use crate::route::Route;
use crate::screens::{ConfirmScreen, CoverScreen};
use crate::tui::chrome;
use crate::tui::{Theme, Tui, TuiEvent};
use crate::types::{ErrorReply, LoginReply, PageData};

/// Which top-level view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    /// Login screen; shown when the session is unauthenticated.
    Cover,
    /// Password re-confirmation for sudo-gated payloads.
    Confirm,
    /// The tabbed dashboard.
    Dashboard,
}

/// The console application.
pub struct App {
    core: Core,
    registry: Registry,
    screen: Screen,
    cover: CoverScreen,
    confirm: ConfirmScreen,
    current_key: String,
    title: String,
    initial_route: String,
    should_quit: bool,
    theme: Theme,
}

impl App {
    /// Creates the app around a navigation core.
    #[must_use]
    pub fn new(core: Core, tick_ms: u64, initial_route: String, theme: Theme) -> Self {
        Self {
            core,
            registry: Registry::new(),
            screen: Screen::Dashboard,
            cover: CoverScreen::new(tick_ms),
            confirm: ConfirmScreen::default(),
            current_key: String::new(),
            title: String::new(),
            initial_route,
            should_quit: false,
            theme,
        }
    }

    /// Enters the startup route, issuing its initial fetch.
    pub fn start(&mut self) {
        let route = Route::parse(&self.initial_route.clone());
        self.enter_route(&route, None);
    }

    /// Runs the app until quit, drawing at most one frame per loop turn.
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal cannot be drawn to or restored.
    pub async fn run(
        mut self,
        mut tui: Tui,
        mut event_rx: mpsc::Receiver<TuiEvent>,
        mut reply_rx: mpsc::UnboundedReceiver<ApiReply>,
    ) -> Result<()> {
        self.start();
        self.process_commands();
        self.core.redraw();

        loop {
            if self.core.take_dirty() {
                tui.draw(|frame| self.render(frame))
                    .map_err(TuiError::Render)?;
            }

            tokio::select! {
                Some(event) = event_rx.recv() => self.on_event(event),
                Some(reply) = reply_rx.recv() => self.on_reply(reply),
                else => break,
            }
            self.process_commands();

            if self.should_quit {
                break;
            }
        }

        tui.restore().map_err(TuiError::Render)?;
        Ok(())
    }

    /// Switches the dashboard to a route: the old page exits, the new page
    /// enters (consuming `data` or fetching), then a redraw is scheduled.
    fn enter_route(&mut self, route: &Route, data: Option<&PageData>) {
        if self.screen == Screen::Dashboard && !self.current_key.is_empty() {
            self.registry.page_mut(&self.current_key).exit();
        }

        let key = self.registry.resolve_key(&route.encode());
        self.current_key = key.clone();
        let meta = self
            .registry
            .page_mut(&key)
            .enter(route, data, &mut self.core);
        self.title = format!("{} - Haven", meta.title);
        self.screen = Screen::Dashboard;
        self.core.redraw();
    }

    /// Applies a dashboard payload to the current page.
    ///
    /// The sudo gate is checked here, once, before the payload reaches any
    /// page: a gated payload is dropped entirely and the confirm-password
    /// screen takes over.
    fn apply_data(&mut self, data: &PageData) {
        if data.need_sudo {
            self.core.confirm_redirect(&data.path);
            return;
        }
        self.registry.page_mut(&self.current_key).set_data(data);
        self.core.redraw();
    }

    /// Drains navigation commands queued on the core.
    fn process_commands(&mut self) {
        loop {
            let commands = self.core.take_commands();
            if commands.is_empty() {
                break;
            }
            for command in commands {
                match command {
                    Command::Goto(path) => {
                        let route = Route::parse(&path);
                        self.enter_route(&route, None);
                    }
                    Command::ConfirmRedirect { url, target } => {
                        if self.screen == Screen::Dashboard && !self.current_key.is_empty() {
                            self.registry.page_mut(&self.current_key).exit();
                        }
                        debug!(url = %url, "sudo confirmation required");
                        self.confirm.set_target(url, target);
                        self.title = "Redirecting... - Haven".to_string();
                        self.screen = Screen::Confirm;
                        self.core.redraw();
                    }
                }
            }
        }
    }

    fn on_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Tick => {
                if self.screen == Screen::Cover {
                    if let Some(target) = self.cover.on_tick(&mut self.core) {
                        let path = target.trim_start_matches('/').to_string();
                        self.enter_route(&Route::parse(&path), None);
                    }
                }
            }
            TuiEvent::Resize(_, _) => self.core.redraw(),
            TuiEvent::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    self.on_key(key);
                }
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits, whatever has focus.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Cover => self.cover.handle_key(key, &mut self.core),
            Screen::Confirm => self.confirm.handle_key(key, &mut self.core),
            Screen::Dashboard => {
                let consumed = self
                    .registry
                    .page_mut(&self.current_key)
                    .handle_key(key, &mut self.core);
                if !consumed {
                    self.on_global_key(key);
                }
            }
        }
    }

    /// Tab shortcuts, active only when the page left the key unconsumed.
    fn on_global_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(c) => {
                if let Some((tab, _, _)) = chrome::TABS.iter().find(|(_, _, hotkey)| *hotkey == c)
                {
                    self.enter_route(&Route::parse(tab), None);
                }
            }
            KeyCode::Left => self.cycle_tab(-1),
            KeyCode::Right => self.cycle_tab(1),
            _ => {}
        }
    }

    fn cycle_tab(&mut self, step: isize) {
        let tabs = chrome::TABS;
        let current = tabs
            .iter()
            .position(|(tab, _, _)| *tab == self.core.tab())
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(tabs.len() as isize) as usize;
        self.enter_route(&Route::parse(tabs[next].0), None);
    }

    fn on_reply(&mut self, reply: ApiReply) {
        match reply {
            ApiReply::DashboardData { request_id, result } => {
                if !self.core.is_current_request(request_id) {
                    debug!(request_id, "dropping stale dashboard response");
                    return;
                }
                match result {
                    Ok(data) => self.apply_data(&data),
                    Err(e) => {
                        if e.status() == Some(401) {
                            self.screen = Screen::Cover;
                            self.core.redraw();
                        } else {
                            // Entry fetches fail quietly; the page renders
                            // nothing until data arrives.
                            error!(error = %e, "dashboard data fetch failed");
                        }
                    }
                }
            }
            ApiReply::Login(result) => self.on_login_reply(result),
            ApiReply::Sudo(result) => self.on_sudo_reply(result),
            reply @ (ApiReply::PasswordChange(_)
            | ApiReply::TotpEnable(_)
            | ApiReply::TotpDisable(_)
            | ApiReply::SshKeysUpdate(_)) => {
                let key = match reply {
                    ApiReply::PasswordChange(_) => "change-password",
                    ApiReply::TotpEnable(_) => "2fa/enable-totp",
                    ApiReply::TotpDisable(_) => "2fa/disable-totp",
                    _ => "ssh-keys",
                };
                self.registry
                    .page_mut(key)
                    .on_reply(&reply, &mut self.core);
            }
        }
    }

    fn on_login_reply(&mut self, result: std::result::Result<LoginReply, ApiError>) {
        match result {
            Ok(r) if !r.error.is_empty() => {
                self.cover.set_error(r.error);
                self.core.redraw();
            }
            Ok(r) if !r.redirect_to.is_empty() => {
                self.cover.begin_redirect(r.redirect_to);
                self.core.redraw();
            }
            Ok(_) => {
                let route = Route::parse(&self.initial_route.clone());
                self.enter_route(&route, None);
            }
            Err(e) => {
                self.cover.set_error(format!("Login failed: {}", e.message()));
                self.core.redraw();
            }
        }
    }

    fn on_sudo_reply(&mut self, result: std::result::Result<ErrorReply, ApiError>) {
        match result {
            Ok(r) if r.error.is_empty() => {
                let path = self.confirm.target().trim_start_matches('/').to_string();
                self.confirm.clear();
                self.enter_route(&Route::parse(&path), None);
            }
            Ok(r) => {
                self.confirm.set_error(r.error);
                self.core.redraw();
            }
            Err(e) => {
                self.confirm
                    .set_error(format!("Confirmation failed: {}", e.message()));
                self.core.redraw();
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        match self.screen {
            Screen::Cover => {
                let area = frame.area().inner(Margin {
                    horizontal: 2,
                    vertical: 1,
                });
                self.cover.render(frame, area, &self.theme);
            }
            Screen::Confirm => {
                let area = frame.area().inner(Margin {
                    horizontal: 2,
                    vertical: 1,
                });
                self.confirm.render(frame, area, &self.theme);
            }
            Screen::Dashboard => {
                let rows = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(frame.area());

                chrome::render_topbar(frame, rows[0], &self.title, &self.theme);
                chrome::render_menu(frame, rows[1], self.core.tab(), &self.theme);
                let content = rows[3].inner(Margin {
                    horizontal: 1,
                    vertical: 0,
                });
                self.registry
                    .page(&self.current_key)
                    .render(frame, content, &self.theme);
                chrome::render_status(
                    frame,
                    rows[4],
                    "q quit · 1-5 tabs · arrows switch",
                    &self.theme,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, ApiError};
    use std::sync::Arc;

    fn test_app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let core = Core::new(Arc::new(ApiClient::new("http://127.0.0.1:0".to_string())), tx);
        App::new(core, 60, "overview".to_string(), Theme::default())
    }

    #[tokio::test]
    async fn sudo_gated_payload_never_reaches_a_page() {
        let mut app = test_app();
        app.start();

        let data = PageData {
            path: "ssh-keys".to_string(),
            need_sudo: true,
            ..PageData::default()
        };
        app.apply_data(&data);
        app.process_commands();

        assert_eq!(app.screen, Screen::Confirm);
        assert_eq!(app.confirm.target(), "/ssh-keys");
        assert_eq!(
            app.confirm.url(),
            "/confirm-password?redirect=%2Fssh-keys"
        );
    }

    #[tokio::test]
    async fn stale_dashboard_reply_is_dropped() {
        let mut app = test_app();
        app.start(); // issues request 1
        app.core.fetch("2fa"); // issues request 2
        app.core.take_dirty();

        app.on_reply(ApiReply::DashboardData {
            request_id: 1,
            result: Ok(PageData::default()),
        });

        // The stale reply produced no state change and no redraw.
        assert!(!app.core.take_dirty());
    }

    #[tokio::test]
    async fn current_dashboard_reply_is_applied() {
        let mut app = test_app();
        app.start();
        app.core.take_dirty();

        app.on_reply(ApiReply::DashboardData {
            request_id: 1,
            result: Ok(PageData::default()),
        });

        assert!(app.core.take_dirty());
    }

    #[tokio::test]
    async fn unauthenticated_fetch_shows_cover() {
        let mut app = test_app();
        app.start();

        app.on_reply(ApiReply::DashboardData {
            request_id: 1,
            result: Err(ApiError::Status {
                status: 401,
                message: String::new(),
            }),
        });

        assert_eq!(app.screen, Screen::Cover);
    }

    #[tokio::test]
    async fn other_fetch_errors_leave_the_dashboard_up() {
        let mut app = test_app();
        app.start();

        app.on_reply(ApiReply::DashboardData {
            request_id: 1,
            result: Err(ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            }),
        });

        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[tokio::test]
    async fn preloaded_data_applies_without_a_fetch() {
        let mut app = test_app();
        app.start(); // issues request 1 for the overview

        let data = PageData {
            path: "2fa".to_string(),
            two_factor_auth: Some(crate::types::TwoFactorData::default()),
            ..PageData::default()
        };
        app.enter_route(&Route::parse("2fa"), Some(&data));

        // The payload was consumed directly; no new fetch was issued.
        assert!(app.core.is_current_request(1));
        assert_eq!(app.current_key, "2fa");
    }

    #[tokio::test]
    async fn unknown_route_enters_overview() {
        let mut app = test_app();
        app.start();

        app.enter_route(&Route::parse("no-such-tab"), None);
        assert_eq!(app.current_key, "overview");
        assert_eq!(app.title, "Overview - Haven");
    }

    #[tokio::test]
    async fn tab_hotkey_switches_pages() {
        let mut app = test_app();
        app.start();

        app.on_key(KeyEvent::new(KeyCode::Char('4'), KeyModifiers::NONE));
        assert_eq!(app.current_key, "change-password");
        assert_eq!(app.title, "Change Password - Haven");
    }

    #[tokio::test]
    async fn successful_sudo_restores_the_interrupted_route() {
        let mut app = test_app();
        app.start();

        app.apply_data(&PageData {
            path: "2fa/enable-totp".to_string(),
            need_sudo: true,
            ..PageData::default()
        });
        app.process_commands();
        assert_eq!(app.screen, Screen::Confirm);

        app.on_sudo_reply(Ok(ErrorReply::default()));
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.current_key, "2fa/enable-totp");
    }
}
