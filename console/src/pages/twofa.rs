//! Two-factor authentication pages: the 2FA overview and the TOTP
//! enable/disable sub-pages.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::{ApiReply, Core};
use crate::route::Route;
use crate::tui::Theme;
use crate::types::{PageData, TotpEnableRequest};

use super::{edit_line, Page, PageMeta};

/// Validates a one-time code before it is sent anywhere.
///
/// The server configures OTPs to be exactly six digits, so anything else
/// can be rejected locally. Returns the error message, or an empty string
/// for a well-formed code.
#[must_use]
pub fn sanity_check_otp(code: &str) -> &'static str {
    if code.is_empty() {
        return "OTP is empty.";
    }
    if !(code.len() == 6 && code.chars().all(|c| c.is_ascii_digit())) {
        return "OTP should be a 6-digit number.";
    }
    ""
}

/// The 2FA overview: shows whether TOTP is active and links to the
/// enable/disable sub-pages.
#[derive(Default)]
pub struct TwoFaPage {
    show: bool,
    totp_enabled: bool,
}

impl Page for TwoFaPage {
    fn enter(&mut self, route: &Route, data: Option<&PageData>, core: &mut Core) -> PageMeta {
        core.set_tab(route.tab());
        match data {
            Some(d) => self.set_data(d),
            None => core.fetch(&route.encode()),
        }
        PageMeta {
            title: "Two-Factor Authentication".to_string(),
        }
    }

    fn exit(&mut self) {
        self.show = false;
    }

    fn set_data(&mut self, data: &PageData) {
        if let Some(totp) = data.two_factor_auth.as_ref().and_then(|d| d.totp.as_ref()) {
            self.totp_enabled = totp.enabled;
        }
        self.show = true;
    }

    fn handle_key(&mut self, key: KeyEvent, core: &mut Core) -> bool {
        if !self.show {
            return false;
        }
        match key.code {
            KeyCode::Char('e') if !self.totp_enabled => {
                core.goto("2fa/enable-totp");
                true
            }
            KeyCode::Char('d') if self.totp_enabled => {
                core.goto("2fa/disable-totp");
                true
            }
            _ => false,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.show {
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled("Two-Factor Authentication", theme.title)),
            Line::raw(""),
        ];
        if self.totp_enabled {
            lines.push(Line::styled(
                "TOTP authentication is enabled.",
                theme.text_primary,
            ));
            lines.push(Line::styled("[d] Disable TOTP", theme.danger));
        } else {
            lines.push(Line::styled(
                "TOTP authentication is not enabled.",
                theme.text_primary,
            ));
            lines.push(Line::styled("[e] Enable TOTP", theme.ok));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// TOTP activation sub-page: shows the provisioning secret and takes the
/// six-digit code.
#[derive(Default)]
pub struct EnableTotpPage {
    show: bool,
    enabled: bool,
    signed_secret: String,
    url: String,
    otp: String,
    error_msg: String,
}

impl EnableTotpPage {
    fn clear(&mut self) {
        self.show = false;
        self.otp.clear();
        self.error_msg.clear();
    }

    fn submit(&mut self, core: &mut Core) {
        self.error_msg = sanity_check_otp(&self.otp).to_string();
        core.redraw();
        if !self.error_msg.is_empty() {
            return;
        }

        core.totp_enable(TotpEnableRequest {
            signed_secret: self.signed_secret.clone(),
            otp: self.otp.clone(),
        });
    }
}

impl Page for EnableTotpPage {
    fn enter(&mut self, route: &Route, data: Option<&PageData>, core: &mut Core) -> PageMeta {
        core.set_tab(route.tab());
        match data {
            Some(d) => self.set_data(d),
            None => core.fetch(&route.encode()),
        }
        PageMeta {
            title: "Enable TOTP".to_string(),
        }
    }

    fn exit(&mut self) {
        self.clear();
    }

    fn set_data(&mut self, data: &PageData) {
        let Some(totp) = data.two_factor_auth.as_ref().and_then(|d| d.totp.as_ref()) else {
            return;
        };
        self.show = true;
        self.enabled = totp.enabled;
        self.error_msg.clear();
        if self.enabled {
            self.signed_secret.clear();
            self.url.clear();
        } else if let Some(setup) = &totp.setup {
            self.signed_secret = setup.signed_secret.clone();
            self.url = setup.url.clone();
        }
    }

    fn on_reply(&mut self, reply: &ApiReply, core: &mut Core) {
        let ApiReply::TotpEnable(result) = reply else {
            return;
        };

        match result {
            Ok(r) if !r.error.is_empty() => {
                self.error_msg = r.error.clone();
                core.redraw();
            }
            Ok(_) => core.goto("2fa"),
            Err(e) => {
                self.error_msg = format!("Failed to enable TOTP: {}", e.message());
                core.redraw();
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, core: &mut Core) -> bool {
        if !self.show || self.enabled {
            return false;
        }
        match key.code {
            KeyCode::Enter => {
                self.submit(core);
                true
            }
            KeyCode::Esc => {
                core.goto("2fa");
                true
            }
            _ => {
                if edit_line(&key, &mut self.otp) {
                    core.redraw();
                    true
                } else {
                    false
                }
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.show {
            return;
        }

        if self.enabled {
            frame.render_widget(
                Paragraph::new(Line::styled("TOTP already enabled.", theme.text_primary)),
                area,
            );
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled("Enable TOTP", theme.title)),
            Line::raw(""),
            Line::styled(
                "Add this account to your TOTP authentication app:",
                theme.text_primary,
            ),
            Line::styled(self.url.clone(), theme.text_secondary),
            Line::raw(""),
            Line::styled("Enter the 6-digit code from your app:", theme.text_primary),
            Line::from(vec![
                Span::styled("Code: ", theme.label),
                Span::styled(format!("{}_", self.otp), theme.input_focused),
            ]),
            Line::raw(""),
            Line::styled("[Enter] Activate  [Esc] Go back", theme.text_muted),
        ];
        if !self.error_msg.is_empty() {
            lines.push(Line::styled(self.error_msg.clone(), theme.error));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// TOTP deactivation sub-page. Deactivation needs no input, only a second
/// explicit confirmation.
#[derive(Default)]
pub struct DisableTotpPage {
    show: bool,
    enabled: bool,
    error_msg: String,
}

impl DisableTotpPage {
    fn clear(&mut self) {
        self.show = false;
        self.error_msg.clear();
    }
}

impl Page for DisableTotpPage {
    fn enter(&mut self, route: &Route, data: Option<&PageData>, core: &mut Core) -> PageMeta {
        core.set_tab(route.tab());
        match data {
            Some(d) => self.set_data(d),
            None => core.fetch(&route.encode()),
        }
        PageMeta {
            title: "Disable TOTP".to_string(),
        }
    }

    fn exit(&mut self) {
        self.clear();
    }

    fn set_data(&mut self, data: &PageData) {
        if let Some(totp) = data.two_factor_auth.as_ref().and_then(|d| d.totp.as_ref()) {
            self.enabled = totp.enabled;
        }
        self.show = true;
    }

    fn on_reply(&mut self, reply: &ApiReply, core: &mut Core) {
        let ApiReply::TotpDisable(result) = reply else {
            return;
        };

        match result {
            Ok(_) => core.goto("2fa"),
            Err(e) => {
                self.error_msg = format!("Failed to disable TOTP: {}", e.message());
                core.redraw();
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, core: &mut Core) -> bool {
        if !self.show {
            return false;
        }
        match key.code {
            KeyCode::Esc => {
                core.goto("2fa");
                true
            }
            KeyCode::Enter if self.enabled => {
                core.totp_disable();
                true
            }
            _ => false,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.show {
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled("Disable TOTP", theme.title)),
            Line::raw(""),
        ];

        if !self.enabled {
            lines.push(Line::styled("TOTP is already disabled.", theme.text_primary));
            lines.push(Line::styled("[Esc] Go back", theme.text_muted));
        } else {
            lines.push(Line::styled(
                "OTP authentication defends you from credential phishing",
                theme.text_primary,
            ));
            lines.push(Line::styled(
                "and brute-force attacks. Are you sure you want to disable it?",
                theme.text_primary,
            ));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled("[Enter] Disable", theme.danger),
                Span::styled("  [Esc] Go back", theme.text_muted),
            ]));
        }

        if !self.error_msg.is_empty() {
            lines.push(Line::styled(self.error_msg.clone(), theme.error));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, ApiError};
    use crate::types::{TotpData, TotpSetup, TwoFactorData};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn test_core() -> Core {
        let (tx, _rx) = mpsc::unbounded_channel();
        Core::new(Arc::new(ApiClient::new("http://127.0.0.1:0".to_string())), tx)
    }

    fn totp_payload(enabled: bool) -> PageData {
        PageData {
            two_factor_auth: Some(TwoFactorData {
                totp: Some(TotpData {
                    enabled,
                    setup: Some(TotpSetup {
                        signed_secret: "signed".to_string(),
                        qr_code: String::new(),
                        url: "otpauth://totp/haven".to_string(),
                    }),
                }),
            }),
            ..PageData::default()
        }
    }

    #[test]
    fn otp_sanity_check_messages() {
        assert_eq!(sanity_check_otp(""), "OTP is empty.");
        assert_eq!(sanity_check_otp("12345"), "OTP should be a 6-digit number.");
        assert_eq!(
            sanity_check_otp("12a456"),
            "OTP should be a 6-digit number."
        );
        assert_eq!(
            sanity_check_otp("1234567"),
            "OTP should be a 6-digit number."
        );
        assert_eq!(sanity_check_otp("123456"), "");
    }

    #[test]
    fn enable_page_takes_setup_when_disabled() {
        let mut page = EnableTotpPage::default();
        page.set_data(&totp_payload(false));

        assert!(page.show);
        assert_eq!(page.signed_secret, "signed");
        assert_eq!(page.url, "otpauth://totp/haven");
    }

    #[test]
    fn enable_page_drops_setup_when_already_enabled() {
        let mut page = EnableTotpPage::default();
        page.set_data(&totp_payload(false));
        page.set_data(&totp_payload(true));

        assert!(page.enabled);
        assert!(page.signed_secret.is_empty());
        assert!(page.url.is_empty());
    }

    #[test]
    fn enable_page_exit_clears_entered_code() {
        let mut page = EnableTotpPage::default();
        page.set_data(&totp_payload(false));
        page.otp = "123".to_string();
        page.error_msg = "nope".to_string();

        page.exit();

        assert!(!page.show);
        assert!(page.otp.is_empty());
        assert!(page.error_msg.is_empty());
    }

    #[test]
    fn enable_success_navigates_back() {
        let mut page = EnableTotpPage::default();
        let mut core = test_core();

        page.on_reply(
            &ApiReply::TotpEnable(Ok(crate::types::ErrorReply::default())),
            &mut core,
        );

        assert_eq!(
            core.take_commands(),
            vec![crate::core::Command::Goto("2fa".to_string())]
        );
    }

    #[test]
    fn enable_failure_shows_server_text() {
        let mut page = EnableTotpPage::default();
        let mut core = test_core();

        page.on_reply(
            &ApiReply::TotpEnable(Err(ApiError::Status {
                status: 400,
                message: "bad code".to_string(),
            })),
            &mut core,
        );

        assert_eq!(page.error_msg, "Failed to enable TOTP: bad code");
        assert!(core.take_commands().is_empty());
    }

    #[test]
    fn disable_success_navigates_back() {
        let mut page = DisableTotpPage::default();
        let mut core = test_core();

        page.on_reply(
            &ApiReply::TotpDisable(Ok(crate::types::ErrorReply::default())),
            &mut core,
        );

        assert_eq!(
            core.take_commands(),
            vec![crate::core::Command::Goto("2fa".to_string())]
        );
    }

    #[test]
    fn overview_tracks_enabled_flag() {
        let mut page = TwoFaPage::default();
        page.set_data(&totp_payload(true));
        assert!(page.show);
        assert!(page.totp_enabled);

        page.exit();
        assert!(!page.show);
    }
}
