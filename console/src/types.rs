//! Wire types for the Haven backend API.
//!
//! The backend owns the wire format; these structs mirror its Go-style
//! PascalCase JSON field names via serde renames. Every response payload
//! field is optional or defaulted so that partial payloads (the server only
//! fills the section for the requested tab) deserialize cleanly.

use serde::{Deserialize, Serialize};

/// A server-side timestamp, seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timestamp {
    /// Seconds since the Unix epoch.
    #[serde(rename = "Sec", default)]
    pub sec: i64,
}

/// The full dashboard payload delivered on initial load and by
/// `/api/dashboard/data`.
///
/// Cross-cutting fields: `path` names the route the payload belongs to,
/// `now` is the server clock used for relative timestamps, `need_sudo`
/// signals that the session must re-confirm the password before the payload
/// may be used, and `request_id` tags the response for staleness filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageData {
    #[serde(rename = "Path", default)]
    pub path: String,

    #[serde(rename = "Now", default)]
    pub now: Timestamp,

    #[serde(rename = "NeedSudo", default)]
    pub need_sudo: bool,

    /// Monotonically increasing fetch identifier, echoed by the server.
    /// Responses whose identifier is not the latest issued one are stale
    /// and must be discarded.
    #[serde(rename = "RequestID", default)]
    pub request_id: u64,

    #[serde(rename = "Overview", default)]
    pub overview: Option<OverviewData>,

    #[serde(rename = "TwoFactorAuth", default)]
    pub two_factor_auth: Option<TwoFactorData>,

    #[serde(rename = "SecurityLogs", default)]
    pub security_logs: Option<SecurityLogsData>,

    #[serde(rename = "SSHKeys", default)]
    pub ssh_keys: Option<SshKeysData>,
}

/// A disk size split into megabytes and a sub-megabyte byte remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiskSize {
    #[serde(rename = "MB", default)]
    pub mb: i64,
    #[serde(rename = "B", default)]
    pub b: i64,
}

/// Total and free space of the system disk.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DiskUsage {
    #[serde(rename = "Total", default)]
    pub total: DiskSize,
    #[serde(rename = "Free", default)]
    pub free: DiskSize,
}

/// Overview tab payload: system status plus hosted applications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewData {
    /// Set when Haven is not managing the operating system; system status
    /// is unavailable in that case.
    #[serde(rename = "Unmanaged", default)]
    pub unmanaged: bool,

    /// Domain of the hosted web application, empty when none is installed.
    #[serde(rename = "AppDomain", default)]
    pub app_domain: String,

    #[serde(rename = "IPAddrs", default)]
    pub ip_addrs: Vec<String>,

    #[serde(rename = "DiskUsage", default)]
    pub disk_usage: Option<DiskUsage>,
}

/// TOTP provisioning material for a not-yet-enabled authenticator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotpSetup {
    /// Server-signed secret that must be echoed back on activation.
    #[serde(rename = "SignedSecret", default)]
    pub signed_secret: String,

    /// QR code image data URL for authenticator apps.
    #[serde(rename = "QRCode", default)]
    pub qr_code: String,

    /// The `otpauth://` provisioning URL.
    #[serde(rename = "URL", default)]
    pub url: String,
}

/// TOTP state for the two-factor tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotpData {
    #[serde(rename = "Enabled", default)]
    pub enabled: bool,

    /// Present only while TOTP is disabled.
    #[serde(rename = "TOTPSetup", default)]
    pub setup: Option<TotpSetup>,
}

/// Two-factor tab payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwoFactorData {
    #[serde(rename = "TOTP", default)]
    pub totp: Option<TotpData>,
}

/// One security log entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "K", default)]
    pub k: String,

    /// Entry time, seconds since the Unix epoch.
    #[serde(rename = "TSec", default)]
    pub t_sec: i64,

    #[serde(rename = "User", default)]
    pub user: String,

    #[serde(rename = "Text", default)]
    pub text: String,

    #[serde(rename = "Type", default)]
    pub kind: String,
}

/// Security logs tab payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityLogsData {
    #[serde(rename = "Entries", default)]
    pub entries: Option<Vec<LogEntry>>,
}

/// SSH keys tab payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SshKeysData {
    /// Set when Haven is not managing the operating system and therefore
    /// not managing `authorized_keys`.
    #[serde(rename = "Disabled", default)]
    pub disabled: bool,

    /// The authorized keys, one per line.
    #[serde(rename = "Keys", default)]
    pub keys: String,
}

/// Request body for `/api/dashboard/data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDataRequest {
    #[serde(rename = "Path")]
    pub path: String,

    #[serde(rename = "RequestID")]
    pub request_id: u64,
}

/// Request body for `/api/user/changepwd`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "OldPassword")]
    pub old_password: String,

    #[serde(rename = "NewPassword")]
    pub new_password: String,
}

/// Request body for `/api/totp/enable`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotpEnableRequest {
    #[serde(rename = "SignedSecret")]
    pub signed_secret: String,

    #[serde(rename = "OTP")]
    pub otp: String,
}

/// Request body for `/api/totp/disable`. The endpoint takes no fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotpDisableRequest {}

/// Request body for `/api/sshkeys/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshKeysUpdateRequest {
    #[serde(rename = "Keys")]
    pub keys: String,
}

/// Request body for `/api/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "Password")]
    pub password: String,
}

/// Request body for `/api/sudo`, the password re-confirmation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SudoRequest {
    #[serde(rename = "Password")]
    pub password: String,

    /// The route the user was trying to reach, restored after confirmation.
    #[serde(rename = "Redirect")]
    pub redirect: String,
}

/// Generic mutation response: an empty `Error` means success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorReply {
    #[serde(rename = "Error", default)]
    pub error: String,
}

/// Response body for `/api/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginReply {
    #[serde(rename = "Error", default)]
    pub error: String,

    /// Route to continue to after a successful login, empty for the
    /// default.
    #[serde(rename = "RedirectTo", default)]
    pub redirect_to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_data_deserializes_partial_payload() {
        let json = r#"{
            "Path": "security-logs",
            "Now": {"Sec": 1700000000},
            "RequestID": 7,
            "SecurityLogs": {"Entries": [
                {"K": "login", "TSec": 1699999000, "User": "root",
                 "Text": "signed in", "Type": "auth"}
            ]}
        }"#;

        let d: PageData = serde_json::from_str(json).unwrap();
        assert_eq!(d.path, "security-logs");
        assert_eq!(d.now.sec, 1_700_000_000);
        assert_eq!(d.request_id, 7);
        assert!(!d.need_sudo);
        assert!(d.overview.is_none());

        let logs = d.security_logs.unwrap();
        let entries = logs.entries.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user, "root");
        assert_eq!(entries[0].t_sec, 1_699_999_000);
    }

    #[test]
    fn requests_serialize_with_backend_field_names() {
        let req = DashboardDataRequest {
            path: "2fa".to_string(),
            request_id: 3,
        };
        let v: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(v["Path"], "2fa");
        assert_eq!(v["RequestID"], 3);

        let req = TotpEnableRequest {
            signed_secret: "s3cret".to_string(),
            otp: "123456".to_string(),
        };
        let v: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(v["SignedSecret"], "s3cret");
        assert_eq!(v["OTP"], "123456");
    }

    #[test]
    fn totp_disable_request_is_empty_object() {
        let body = serde_json::to_string(&TotpDisableRequest::default()).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn error_reply_defaults_to_empty() {
        let r: ErrorReply = serde_json::from_str("{}").unwrap();
        assert!(r.error.is_empty());
    }
}
