//! Navigation core shared by all dashboard pages.
//!
//! [`Core`] is the one object every page holds a mutable borrow of while it
//! is being driven. It owns the cross-page concerns:
//!
//! - **Redraw coalescing**: [`Core::redraw`] sets a dirty flag; the app
//!   loop consumes it at most once per turn with [`Core::take_dirty`], so
//!   any number of redraw requests between frames produce a single draw.
//! - **Navigation**: [`Core::goto`] queues an in-app route change; the app
//!   loop drains the queue after dispatch, keeping the exit → enter →
//!   redraw order out of page code.
//! - **Backend calls**: each `call` helper spawns one request task that
//!   delivers exactly one [`ApiReply`] on the event channel. No retries
//!   happen here.
//! - **Fetch staleness**: dashboard-data fetches are tagged with a
//!   monotonically increasing request identifier. Only the reply matching
//!   the latest issued identifier may be applied (last-request-wins);
//!   in-flight requests are never aborted, late replies are simply
//!   discarded.
//! - **Sudo gating**: when a payload arrives with the needs-sudo flag set,
//!   [`Core::confirm_redirect`] replaces it with a transition to the
//!   password-confirmation screen. The payload itself is never applied.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::types::{
    ChangePasswordRequest, DashboardDataRequest, ErrorReply, LoginReply, LoginRequest, PageData,
    SshKeysUpdateRequest, SudoRequest, TotpEnableRequest,
};

/// Outcome of a backend call, delivered on the app event channel.
///
/// Exactly one reply is produced per issued call, success or failure.
#[derive(Debug)]
pub enum ApiReply {
    /// Dashboard payload fetch, tagged with the identifier it was issued
    /// under.
    DashboardData {
        request_id: u64,
        result: Result<PageData, ApiError>,
    },
    /// Password change submission.
    PasswordChange(Result<ErrorReply, ApiError>),
    /// TOTP activation submission.
    TotpEnable(Result<ErrorReply, ApiError>),
    /// TOTP deactivation submission.
    TotpDisable(Result<ErrorReply, ApiError>),
    /// SSH key update submission.
    SshKeysUpdate(Result<ErrorReply, ApiError>),
    /// Login submission.
    Login(Result<LoginReply, ApiError>),
    /// Password re-confirmation submission.
    Sudo(Result<ErrorReply, ApiError>),
}

/// Deferred navigation effect queued by pages, drained by the app loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate to a route path within the dashboard.
    Goto(String),
    /// Leave the dashboard for the password-confirmation screen.
    ConfirmRedirect {
        /// The confirmation URL with the encoded `redirect` parameter,
        /// shown in the title line.
        url: String,
        /// The decoded route target to restore after confirmation.
        target: String,
    },
}

/// Shared navigation core.
pub struct Core {
    api: Arc<ApiClient>,
    reply_tx: mpsc::UnboundedSender<ApiReply>,
    tab: String,
    dirty: bool,
    last_request_id: u64,
    commands: Vec<Command>,
}

impl Core {
    /// Creates a new core around an API client and the reply side of the
    /// app event channel.
    #[must_use]
    pub fn new(api: Arc<ApiClient>, reply_tx: mpsc::UnboundedSender<ApiReply>) -> Self {
        Self {
            api,
            reply_tx,
            tab: String::new(),
            dirty: false,
            last_request_id: 0,
            commands: Vec::new(),
        }
    }

    /// Schedules a re-render. Repeated calls before the next frame coalesce
    /// into a single draw.
    pub fn redraw(&mut self) {
        self.dirty = true;
    }

    /// Consumes the pending-redraw flag. Returns true at most once per
    /// batch of [`Core::redraw`] calls.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Sets the active tab indicator and schedules a redraw.
    pub fn set_tab(&mut self, tab: &str) {
        self.tab = tab.to_string();
        self.redraw();
    }

    /// The currently highlighted tab.
    #[must_use]
    pub fn tab(&self) -> &str {
        &self.tab
    }

    /// Queues navigation to a route path.
    pub fn goto(&mut self, path: &str) {
        self.commands.push(Command::Goto(path.to_string()));
    }

    /// Queues the transition to the password-confirmation screen for a
    /// sudo-gated payload, encoding the route the user was trying to reach.
    pub fn confirm_redirect(&mut self, path: &str) {
        let target = format!("/{path}");
        let url = format!(
            "/confirm-password?redirect={}",
            urlencoding::encode(&target)
        );
        self.commands.push(Command::ConfirmRedirect { url, target });
    }

    /// Drains the queued navigation commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Reserves the next fetch identifier, making it the latest one.
    fn issue_request_id(&mut self) -> u64 {
        self.last_request_id += 1;
        self.last_request_id
    }

    /// Whether `request_id` is the latest issued fetch identifier. Replies
    /// failing this check are stale and must be dropped.
    #[must_use]
    pub fn is_current_request(&self, request_id: u64) -> bool {
        request_id == self.last_request_id
    }

    /// Issues a dashboard-data fetch for a route path.
    ///
    /// The fetch is tagged with a fresh request identifier; any previously
    /// issued fetch becomes stale immediately, even though it stays
    /// in flight.
    pub fn fetch(&mut self, path: &str) {
        let request_id = self.issue_request_id();
        debug!(path, request_id, "fetching dashboard data");

        let req = DashboardDataRequest {
            path: path.to_string(),
            request_id,
        };
        let api = Arc::clone(&self.api);
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let result = api.dashboard_data(&req).await;
            let _ = tx.send(ApiReply::DashboardData { request_id, result });
        });
    }

    /// Submits a password change.
    pub fn change_password(&self, req: ChangePasswordRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(ApiReply::PasswordChange(api.change_password(&req).await));
        });
    }

    /// Submits a TOTP activation.
    pub fn totp_enable(&self, req: TotpEnableRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(ApiReply::TotpEnable(api.totp_enable(&req).await));
        });
    }

    /// Submits a TOTP deactivation.
    pub fn totp_disable(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(ApiReply::TotpDisable(api.totp_disable().await));
        });
    }

    /// Submits an SSH key update.
    pub fn update_ssh_keys(&self, keys: String) {
        let api = Arc::clone(&self.api);
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let req = SshKeysUpdateRequest { keys };
            let _ = tx.send(ApiReply::SshKeysUpdate(api.update_ssh_keys(&req).await));
        });
    }

    /// Submits a login attempt.
    pub fn login(&self, password: String) {
        let api = Arc::clone(&self.api);
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let req = LoginRequest { password };
            let _ = tx.send(ApiReply::Login(api.login(&req).await));
        });
    }

    /// Submits a password re-confirmation for a sudo-gated action.
    pub fn sudo(&self, password: String, redirect: String) {
        let api = Arc::clone(&self.api);
        let tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let req = SudoRequest { password, redirect };
            let _ = tx.send(ApiReply::Sudo(api.sudo(&req).await));
        });
    }
}
