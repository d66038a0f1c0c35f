//! Email value object.

use crate::ValidationError;
use std::fmt;

/// A trimmed email address that passed the directory's shape check.
///
/// The check is intentionally shallow: exactly one `@` with a non-empty local
/// part and a non-empty domain. Case is preserved because lookups are
/// exact-match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Trims and validates an email address.
    pub fn parse(email: &str) -> Result<Self, ValidationError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }

        let mut parts = email.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(email.to_string()))
            }
            _ => Err(ValidationError::MalformedEmail(email.to_string())),
        }
    }

    /// Returns the email as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let email = Email::parse("test@example.com").unwrap();
        assert_eq!(email.as_str(), "test@example.com");
    }

    #[test]
    fn test_email_is_trimmed_but_case_preserved() {
        let email = Email::parse("  Test@Example.COM  ").unwrap();
        assert_eq!(email.as_str(), "Test@Example.COM");
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(Email::parse(""), Err(ValidationError::EmptyEmail));
        assert_eq!(Email::parse("   "), Err(ValidationError::EmptyEmail));
    }

    #[test]
    fn test_malformed_email() {
        for raw in ["invalid", "@example.com", "test@", "@", "a@b@c", "a@@b"] {
            assert!(
                matches!(Email::parse(raw), Err(ValidationError::MalformedEmail(_))),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn test_shallow_check_accepts_odd_but_well_shaped_addresses() {
        assert!(Email::parse("a@b").is_ok());
        assert!(Email::parse("a b@c d").is_ok());
    }

    #[test]
    fn test_display_is_trimmed_value() {
        assert_eq!(Email::parse(" a@b.com ").unwrap().to_string(), "a@b.com");
    }

    #[test]
    fn test_malformed_email_reports_trimmed_value() {
        assert_eq!(
            Email::parse(" not-an-email "),
            Err(ValidationError::MalformedEmail("not-an-email".to_string()))
        );
    }
}
