#![forbid(unsafe_code)]

//! Credential form values and the acceptance rule.
//!
//! Acceptance is purely about presence: a field counts as filled when it has
//! at least one character. There is no password check and no uniqueness
//! check.

use std::fmt;

use crate::session::Session;

/// Which variant of the auth form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Email + password. The display name is derived from the email.
    #[default]
    Login,
    /// Name + email + password. The display name is the supplied name.
    Signup,
}

impl AuthMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Sign Up",
        }
    }

    /// Fields the form shows in this mode, in form order.
    pub const fn fields(self) -> &'static [CredentialField] {
        match self {
            Self::Login => &[CredentialField::Email, CredentialField::Password],
            Self::Signup => &[
                CredentialField::Name,
                CredentialField::Email,
                CredentialField::Password,
            ],
        }
    }
}

/// A form field that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Name,
    Email,
    Password,
}

impl CredentialField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }
}

/// Why a credential submission was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// A required field was left empty.
    Empty(CredentialField),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(field) => write!(f, "{} is required", field.label()),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Raw values of the auth form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub mode: AuthMode,
    /// Only consulted in [`AuthMode::Signup`].
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Login-form values.
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::Login,
            name: String::new(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Signup-form values.
    pub fn signup(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            mode: AuthMode::Signup,
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Fields required by the current mode, in form order.
    pub fn required_fields(&self) -> &'static [CredentialField] {
        self.mode.fields()
    }

    fn value(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::Name => &self.name,
            CredentialField::Email => &self.email,
            CredentialField::Password => &self.password,
        }
    }

    /// First required field that is empty, if any.
    pub fn first_missing(&self) -> Option<CredentialField> {
        self.required_fields()
            .iter()
            .copied()
            .find(|field| self.value(*field).is_empty())
    }

    /// Synthesize the session these values would log in as.
    pub fn to_session(&self) -> Result<Session, CredentialError> {
        if let Some(field) = self.first_missing() {
            return Err(CredentialError::Empty(field));
        }
        let display_name = match self.mode {
            AuthMode::Login => email_local_part(&self.email),
            AuthMode::Signup => self.name.as_str(),
        };
        Ok(Session::new(display_name, self.email.as_str()))
    }
}

/// Text before the first `@`, or the whole address when there is none.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
