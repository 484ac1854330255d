#![forbid(unsafe_code)]

//! The logged-in identity.

use serde::Serialize;

/// Display name of the built-in guest identity.
pub const GUEST_NAME: &str = "Demo User";
/// Email of the built-in guest identity.
pub const GUEST_EMAIL: &str = "demo@radhagovind.com";

/// In-memory record of a logged-in user.
///
/// Created by the controller on a successful credential submission and
/// dropped on logout. Views only ever see it through a shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    display_name: String,
    email_address: String,
}

impl Session {
    pub(crate) fn new(display_name: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email_address: email_address.into(),
        }
    }

    /// The identity used by "Continue as Guest".
    pub fn guest() -> Self {
        Self::new(GUEST_NAME, GUEST_EMAIL)
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    /// Two-letter monogram for avatar badges.
    pub fn initials(&self) -> String {
        let mut out = String::with_capacity(2);
        for word in self.display_name.split_whitespace().take(2) {
            if let Some(ch) = word.chars().next() {
                out.extend(ch.to_uppercase());
            }
        }
        if out.is_empty() {
            out.push('?');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_identity() {
        let guest = Session::guest();
        assert_eq!(guest.display_name(), "Demo User");
        assert_eq!(guest.email_address(), "demo@radhagovind.com");
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(Session::new("Radha Krishna Das", "r@x.com").initials(), "RK");
        assert_eq!(Session::new("demo", "demo@x.com").initials(), "D");
        assert_eq!(Session::new("   ", "blank@x.com").initials(), "?");
    }

    #[test]
    fn serializes_with_field_names() {
        let json = serde_json::to_value(Session::new("Radha", "r@x.com")).unwrap();
        assert_eq!(json["display_name"], "Radha");
        assert_eq!(json["email_address"], "r@x.com");
    }
}
