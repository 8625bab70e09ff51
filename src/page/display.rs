//! What the login area shows for a session status

use crate::session::SessionStatus;

pub const LOGGED_IN_TEMPLATE: &str = "Logged in as <b>%s</b>.";
pub const LOGIN_FAILED_TEMPLATE: &str = "Login failed: %s";

/// Message translation hook; the page never interprets translated text
pub trait Translate: Send + Sync {
    fn tr(&self, msgid: &str) -> String;
}

/// Returns message ids unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn tr(&self, msgid: &str) -> String {
        msgid.to_string()
    }
}

/// Visibility and text of the login area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    /// "Logged in as ..." text, shown when set
    pub logged_in_text: Option<String>,
    /// "Login failed: ..." text, shown when set
    pub login_error_text: Option<String>,
    pub login_visible: bool,
    /// False while a login is in flight
    pub login_enabled: bool,
    pub logout_visible: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::for_status(&SessionStatus::LoggedOut, &Untranslated)
    }
}

impl DisplayState {
    pub fn for_status(status: &SessionStatus, translator: &dyn Translate) -> Self {
        match status {
            SessionStatus::LoggedOut => Self {
                logged_in_text: None,
                login_error_text: None,
                login_visible: true,
                login_enabled: true,
                logout_visible: false,
            },
            SessionStatus::LoggingIn => Self {
                logged_in_text: None,
                login_error_text: None,
                login_visible: true,
                login_enabled: false,
                logout_visible: false,
            },
            SessionStatus::LoggedIn { username } => Self {
                logged_in_text: Some(fill(&translator.tr(LOGGED_IN_TEMPLATE), username)),
                login_error_text: None,
                login_visible: false,
                login_enabled: false,
                logout_visible: true,
            },
            SessionStatus::LoginFailed { message } => Self {
                logged_in_text: None,
                login_error_text: Some(fill(&translator.tr(LOGIN_FAILED_TEMPLATE), message)),
                login_visible: true,
                login_enabled: true,
                logout_visible: false,
            },
        }
    }
}

fn fill(template: &str, value: &str) -> String {
    template.replacen("%s", value, 1)
}
