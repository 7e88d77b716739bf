//! Integration tests for the backend API client.
//!
//! These tests run every endpoint against a mock server and verify the
//! wire format (PascalCase field names), the success decoding, and the
//! error mapping — in particular the 403 password path, whose response
//! body must be surfaced verbatim.

use haven_console::api::{ApiClient, ApiError};
use haven_console::types::{
    ChangePasswordRequest, DashboardDataRequest, LoginRequest, SshKeysUpdateRequest, SudoRequest,
    TotpEnableRequest,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

/// Creates a client pointed at the mock server.
fn create_test_client(server_url: &str) -> ApiClient {
    ApiClient::new(server_url.to_string())
}

/// A dashboard payload as the backend would serialize it.
fn dashboard_payload() -> serde_json::Value {
    json!({
        "Path": "ssh-keys",
        "Now": {"Sec": 1_700_000_000},
        "NeedSudo": false,
        "RequestID": 42,
        "SSHKeys": {"Disabled": false, "Keys": "ssh-ed25519 AAAA user@host"}
    })
}

// =============================================================================
// Dashboard Data
// =============================================================================

#[tokio::test]
async fn dashboard_data_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dashboard/data"))
        .and(body_partial_json(json!({"Path": "ssh-keys", "RequestID": 42})))
        .respond_with(ResponseTemplate::new(200).set_body_json(dashboard_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let data = client
        .dashboard_data(&DashboardDataRequest {
            path: "ssh-keys".to_string(),
            request_id: 42,
        })
        .await
        .expect("fetch should succeed");

    assert_eq!(data.path, "ssh-keys");
    assert_eq!(data.request_id, 42);
    assert_eq!(data.now.sec, 1_700_000_000);
    let keys = data.ssh_keys.expect("SSH keys payload");
    assert_eq!(keys.keys, "ssh-ed25519 AAAA user@host");
}

#[tokio::test]
async fn dashboard_data_carries_need_sudo_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dashboard/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Path": "2fa",
            "NeedSudo": true,
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let data = client
        .dashboard_data(&DashboardDataRequest {
            path: "2fa".to_string(),
            request_id: 1,
        })
        .await
        .unwrap();

    assert!(data.need_sudo);
}

// =============================================================================
// Password Change
// =============================================================================

#[tokio::test]
async fn change_password_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/changepwd"))
        .and(body_partial_json(json!({
            "OldPassword": "old",
            "NewPassword": "new"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let reply = client
        .change_password(&ChangePasswordRequest {
            old_password: "old".to_string(),
            new_password: "new".to_string(),
        })
        .await
        .unwrap();

    assert!(reply.error.is_empty());
}

#[tokio::test]
async fn change_password_forbidden_body_is_preserved() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/changepwd"))
        .respond_with(ResponseTemplate::new(403).set_body_string("current password mismatch"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let err = client
        .change_password(&ChangePasswordRequest {
            old_password: "wrong".to_string(),
            new_password: "new".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.message(), "current password mismatch");
}

#[tokio::test]
async fn change_password_in_body_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/changepwd"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Error": "password too short"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let reply = client
        .change_password(&ChangePasswordRequest {
            old_password: "old".to_string(),
            new_password: "x".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(reply.error, "password too short");
}

// =============================================================================
// TOTP
// =============================================================================

#[tokio::test]
async fn totp_enable_posts_signed_secret_and_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/totp/enable"))
        .and(body_partial_json(json!({
            "SignedSecret": "signed",
            "OTP": "123456"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let reply = client
        .totp_enable(&TotpEnableRequest {
            signed_secret: "signed".to_string(),
            otp: "123456".to_string(),
        })
        .await
        .unwrap();

    assert!(reply.error.is_empty());
}

#[tokio::test]
async fn totp_disable_posts_empty_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/totp/disable"))
        .and(body_partial_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    client.totp_disable().await.unwrap();
}

// =============================================================================
// SSH Keys, Login, Sudo
// =============================================================================

#[tokio::test]
async fn update_ssh_keys_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sshkeys/update"))
        .and(body_partial_json(json!({"Keys": "ssh-ed25519 AAAA"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    client
        .update_ssh_keys(&SshKeysUpdateRequest {
            keys: "ssh-ed25519 AAAA".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn login_reply_carries_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"RedirectTo": "/overview"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let reply = client
        .login(&LoginRequest {
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    assert!(reply.error.is_empty());
    assert_eq!(reply.redirect_to, "/overview");
}

#[tokio::test]
async fn sudo_posts_redirect_target() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sudo"))
        .and(body_partial_json(json!({
            "Password": "secret",
            "Redirect": "/ssh-keys"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let reply = client
        .sudo(&SudoRequest {
            password: "secret".to_string(),
            redirect: "/ssh-keys".to_string(),
        })
        .await
        .unwrap();

    assert!(reply.error.is_empty());
}

// =============================================================================
// Error Mapping
// =============================================================================

#[tokio::test]
async fn server_error_maps_to_status_variant() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dashboard/data"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let err = client
        .dashboard_data(&DashboardDataRequest {
            path: "overview".to_string(),
            request_id: 1,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(err.message(), "internal error");
}
