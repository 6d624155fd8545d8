//! Field-level request validation.
//!
//! Handlers collect all problems with a request body before rejecting it, so
//! a response can report every bad field at once instead of the first one.

use serde::Serialize;

/// A single validation failure, attributed to a request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field as it appears on the wire.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulates [`FieldError`]s across the fields of one request.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error directly.
    pub fn error(&mut self, field: &str, message: &str) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    /// Require a non-empty (after trimming) string value.
    pub fn require(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.error(field, message);
        }
        self
    }

    /// Require a plausible email address.
    ///
    /// This is intentionally shallow: one `@` with a non-empty local part and
    /// a dotted domain. Anything stricter belongs in a confirmation email.
    pub fn require_email(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if !is_plausible_email(value) {
            self.error(field, message);
        }
        self
    }

    /// Consume the validator: `Ok(())` if nothing was recorded, otherwise the
    /// collected errors.
    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.split('.').count() >= 2 && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_when_nothing_recorded() {
        let mut v = Validator::new();
        v.require("username", "alice", "Username is required");
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut v = Validator::new();
        v.require("username", "", "Username is required")
            .require("password", "   ", "Password is required");
        let errors = v.finish().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "username");
        assert_eq!(errors[1].field, "password");
    }

    #[test]
    fn test_email_acceptance() {
        for good in ["a@b.co", "user.name@example.org", "x@sub.domain.io"] {
            assert!(is_plausible_email(good), "rejected {good}");
        }
        for bad in ["", "plain", "@example.com", "user@", "user@nodot", "user@.com"] {
            assert!(!is_plausible_email(bad), "accepted {bad}");
        }
    }

    #[test]
    fn test_field_error_serialize() {
        let err = FieldError::new("email", "Email is required");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"field\":\"email\""));
        assert!(json.contains("\"message\":\"Email is required\""));
    }
}
