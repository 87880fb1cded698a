use std::sync::LazyLock;

use regex::Regex;

use crate::common::Credentials;

pub const PASSWORD_MIN_CHARS: usize = 6;
pub const LOGIN_FAILED: &str = "Login failed. Check your credentials.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthValidationError {
    #[error("Invalid email format.")]
    InvalidEmail,
    #[error("Password must not be blank.")]
    MissingPassword,
    #[error("Password must have at least 6 characters.")]
    PasswordTooShort,
}

/// State of the login and registration forms.
#[derive(Debug)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub error_message: Option<String>,
    pub is_submitting: bool,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            error_message: None,
            is_submitting: false,
        }
    }

    pub fn validate(&self) -> Result<(), AuthValidationError> {
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(AuthValidationError::InvalidEmail);
        }
        if self.password.trim().is_empty() {
            return Err(AuthValidationError::MissingPassword);
        }
        if self.mode == AuthMode::Register && self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(AuthValidationError::PasswordTooShort);
        }
        Ok(())
    }

    /// Starts a submission, or records why it cannot start.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.is_submitting {
            return None;
        }
        self.error_message = None;
        if let Err(err) = self.validate() {
            self.error_message = Some(err.to_string());
            return None;
        }
        self.is_submitting = true;
        Some(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn succeed(&mut self) {
        self.is_submitting = false;
        self.password.clear();
    }

    pub fn fail(&mut self, server_message: Option<String>) {
        self.is_submitting = false;
        let fallback = match self.mode {
            AuthMode::Login => LOGIN_FAILED,
            AuthMode::Register => REGISTER_FAILED,
        };
        self.error_message = Some(server_message.unwrap_or_else(|| fallback.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(mode: AuthMode, email: &str, password: &str) -> AuthForm {
        let mut form = AuthForm::new(mode);
        form.email = email.into();
        form.password = password.into();
        form
    }

    #[test]
    fn login_accepts_short_passwords() {
        let mut form = filled(AuthMode::Login, "a@b.com", "x");
        assert_eq!(
            form.begin_submit(),
            Some(Credentials {
                email: "a@b.com".into(),
                password: "x".into()
            })
        );
        assert!(form.is_submitting);
    }

    #[test]
    fn register_enforces_backend_password_rule() {
        let mut form = filled(AuthMode::Register, "a@b.com", "12345");
        assert_eq!(form.begin_submit(), None);
        assert_eq!(
            form.error_message.as_deref(),
            Some("Password must have at least 6 characters.")
        );
    }

    #[test]
    fn rejects_bad_email_and_blank_password() {
        assert_eq!(
            filled(AuthMode::Login, "not-an-email", "x").validate(),
            Err(AuthValidationError::InvalidEmail)
        );
        assert_eq!(
            filled(AuthMode::Login, "a@b.com", "   ").validate(),
            Err(AuthValidationError::MissingPassword)
        );
    }

    #[test]
    fn no_double_submit() {
        let mut form = filled(AuthMode::Login, "a@b.com", "secret");
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn failure_prefers_server_message() {
        let mut form = filled(AuthMode::Login, "a@b.com", "secret");
        form.begin_submit();
        form.fail(Some("Invalid credentials.".into()));
        assert_eq!(form.error_message.as_deref(), Some("Invalid credentials."));
        assert!(!form.is_submitting);

        form.fail(None);
        assert_eq!(form.error_message.as_deref(), Some(LOGIN_FAILED));
    }
}
