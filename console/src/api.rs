//! HTTP client for the Haven backend API.
//!
//! Every operation is a single POST of a JSON body to a named endpoint,
//! returning a decoded JSON response. Exactly one outcome is produced per
//! call; this layer performs no retries — whether to try again is the
//! caller's decision.
//!
//! # Example
//!
//! ```no_run
//! use haven_console::api::ApiClient;
//! use haven_console::types::DashboardDataRequest;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = ApiClient::new("https://haven.local".to_string());
//!     let data = api
//!         .dashboard_data(&DashboardDataRequest {
//!             path: "overview".to_string(),
//!             request_id: 1,
//!         })
//!         .await
//!         .unwrap();
//!     println!("server time: {}", data.now.sec);
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{
    ChangePasswordRequest, DashboardDataRequest, ErrorReply, LoginReply, LoginRequest, PageData,
    SshKeysUpdateRequest, SudoRequest, TotpDisableRequest, TotpEnableRequest,
};

/// HTTP request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Dashboard data endpoint.
pub const ENDPOINT_DASHBOARD_DATA: &str = "/api/dashboard/data";
/// Password change endpoint.
pub const ENDPOINT_CHANGE_PASSWORD: &str = "/api/user/changepwd";
/// TOTP activation endpoint.
pub const ENDPOINT_TOTP_ENABLE: &str = "/api/totp/enable";
/// TOTP deactivation endpoint.
pub const ENDPOINT_TOTP_DISABLE: &str = "/api/totp/disable";
/// SSH key update endpoint.
pub const ENDPOINT_SSHKEYS_UPDATE: &str = "/api/sshkeys/update";
/// Login endpoint.
pub const ENDPOINT_LOGIN: &str = "/api/login";
/// Password re-confirmation endpoint.
pub const ENDPOINT_SUDO: &str = "/api/sudo";

/// Errors that can occur during a backend call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status. `message` carries the raw
    /// response body, which some endpoints use for human-readable errors.
    #[error("server error: {status} - {message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    /// The HTTP status code, when the server produced a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// The server's response body for status errors, or the transport
    /// error text otherwise.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Http(e) => e.to_string(),
        }
    }
}

/// Client for the Haven backend API.
///
/// Cheap to clone per call site via [`std::sync::Arc`]; the inner reqwest
/// client pools connections.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Creates a new client for the given server base URL (no trailing
    /// slash).
    #[must_use]
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(4)
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    /// The configured server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs one JSON request/response round trip against `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` for non-2xx responses (carrying the raw
    /// body) and `ApiError::Http` for transport or decode failures.
    pub async fn call<Req, Resp>(&self, endpoint: &str, req: &Req) -> Result<Resp, ApiError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = %url, "calling backend");

        let response = self.client.post(&url).json(req).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json::<Resp>().await?)
        } else {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), endpoint, "backend call failed");
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Fetches the dashboard payload for a route.
    pub async fn dashboard_data(&self, req: &DashboardDataRequest) -> Result<PageData, ApiError> {
        self.call(ENDPOINT_DASHBOARD_DATA, req).await
    }

    /// Changes the account password.
    pub async fn change_password(
        &self,
        req: &ChangePasswordRequest,
    ) -> Result<ErrorReply, ApiError> {
        self.call(ENDPOINT_CHANGE_PASSWORD, req).await
    }

    /// Activates TOTP with a signed secret and a one-time code.
    pub async fn totp_enable(&self, req: &TotpEnableRequest) -> Result<ErrorReply, ApiError> {
        self.call(ENDPOINT_TOTP_ENABLE, req).await
    }

    /// Deactivates TOTP.
    pub async fn totp_disable(&self) -> Result<ErrorReply, ApiError> {
        self.call(ENDPOINT_TOTP_DISABLE, &TotpDisableRequest::default())
            .await
    }

    /// Replaces the authorized SSH keys.
    pub async fn update_ssh_keys(&self, req: &SshKeysUpdateRequest) -> Result<ErrorReply, ApiError> {
        self.call(ENDPOINT_SSHKEYS_UPDATE, req).await
    }

    /// Logs in with the account password.
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginReply, ApiError> {
        self.call(ENDPOINT_LOGIN, req).await
    }

    /// Re-confirms the account password for a sudo-gated action.
    pub async fn sudo(&self, req: &SudoRequest) -> Result<ErrorReply, ApiError> {
        self.call(ENDPOINT_SUDO, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_code_and_body() {
        let err = ApiError::Status {
            status: 403,
            message: "current password mismatch".to_string(),
        };
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.message(), "current password mismatch");
        assert_eq!(
            err.to_string(),
            "server error: 403 - current password mismatch"
        );
    }
}
