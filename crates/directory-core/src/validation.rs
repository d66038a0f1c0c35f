//! Validation pipeline for user records.
//!
//! Records go through [`apply_defaults`], then [`sanitize`], then
//! [`validate`] before they are handed to a store.

use crate::{Email, User, ValidationError};
use chrono::{DateTime, Utc};

/// Fills in missing timestamps with the current time.
///
/// Timestamps that are already set are left untouched.
pub fn apply_defaults(user: &mut User) {
    apply_defaults_at(user, Utc::now());
}

/// Fills in missing timestamps with `now`.
pub fn apply_defaults_at(user: &mut User, now: DateTime<Utc>) {
    if user.created_at.is_none() {
        user.created_at = Some(now);
    }
    if user.updated_at.is_none() {
        user.updated_at = Some(now);
    }
}

/// Trims surrounding whitespace from every string field.
pub fn sanitize(user: &mut User) {
    trim_in_place(&mut user.first_name);
    trim_in_place(&mut user.last_name);
    trim_in_place(&mut user.email);
    trim_in_place(&mut user.mobile);
}

/// Checks that a sanitized user may be persisted.
pub fn validate(user: &User) -> Result<(), ValidationError> {
    if user.email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    validate_email(&user.email).map(|_| ())
}

/// Trims `email` and checks its shape.
pub fn validate_email(email: &str) -> Result<Email, ValidationError> {
    Email::parse(email)
}

/// Trims and checks an email used as a lookup key.
///
/// Any failure, including an empty key, is reported as
/// [`ValidationError::MalformedEmail`].
pub fn validate_lookup_email(email: &str) -> Result<Email, ValidationError> {
    Email::parse(email).map_err(|e| match e {
        ValidationError::EmptyEmail => ValidationError::MalformedEmail(String::new()),
        other => other,
    })
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn padded_user() -> User {
        User {
            first_name: "  Ada ".to_string(),
            last_name: "\tLovelace\n".to_string(),
            mobile: " +15550100 ".to_string(),
            email: "  ada@example.com  ".to_string(),
            ..User::default()
        }
    }

    #[test]
    fn test_apply_defaults_sets_missing_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut user = User::new("a@b.com");
        apply_defaults_at(&mut user, now);
        assert_eq!(user.created_at, Some(now));
        assert_eq!(user.updated_at, Some(now));
    }

    #[test]
    fn test_apply_defaults_preserves_existing_timestamps() {
        let earlier = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let now = earlier + Duration::days(30);
        let mut user = User {
            created_at: Some(earlier),
            ..User::new("a@b.com")
        };

        apply_defaults_at(&mut user, now);
        assert_eq!(user.created_at, Some(earlier));
        assert_eq!(user.updated_at, Some(now));
    }

    #[test]
    fn test_apply_defaults_uses_current_time() {
        let before = Utc::now();
        let mut user = User::new("a@b.com");
        apply_defaults(&mut user);
        let after = Utc::now();

        let created = user.created_at.unwrap();
        assert!(created >= before && created <= after);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_sanitize_trims_all_string_fields() {
        let mut user = padded_user();
        sanitize(&mut user);
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Lovelace");
        assert_eq!(user.mobile, "+15550100");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let mut once = padded_user();
        sanitize(&mut once);
        let mut twice = once.clone();
        sanitize(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_validate_empty_email() {
        let mut user = User::new("   ");
        sanitize(&mut user);
        assert_eq!(validate(&user), Err(ValidationError::EmptyEmail));
    }

    #[test]
    fn test_validate_malformed_email() {
        for raw in ["plainaddress", "a@b@c.com", "@b.com", "a@"] {
            let user = User::new(raw);
            assert!(
                matches!(validate(&user), Err(ValidationError::MalformedEmail(_))),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_email() {
        assert_eq!(validate(&User::new("a@b.com")), Ok(()));
    }

    #[test]
    fn test_validate_email_returns_trimmed_value() {
        let email = validate_email("  a@b.com ").unwrap();
        assert_eq!(email.as_str(), "a@b.com");
    }

    #[test]
    fn test_validate_lookup_email_reports_empty_as_malformed() {
        assert_eq!(
            validate_lookup_email("   "),
            Err(ValidationError::MalformedEmail(String::new()))
        );
        assert!(matches!(
            validate_lookup_email(" not-an-email "),
            Err(ValidationError::MalformedEmail(_))
        ));
        assert_eq!(validate_lookup_email(" a@b.com ").unwrap().as_str(), "a@b.com");
    }

    // Lowercase letters, dots, spaces and `@`, so the `@` count varies freely.
    fn arb_email_like() -> impl Strategy<Value = String> {
        "[a-z. @]{0,24}"
    }

    fn arb_padding() -> impl Strategy<Value = String> {
        "[ \t\r\n]{0,4}"
    }

    fn arb_user() -> impl Strategy<Value = User> {
        (any::<String>(), any::<String>(), any::<String>(), any::<String>()).prop_map(
            |(first_name, last_name, mobile, email)| User {
                first_name,
                last_name,
                mobile,
                email,
                ..User::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_sanitize_is_idempotent(user in arb_user()) {
            let mut once = user;
            sanitize(&mut once);
            let mut twice = once.clone();
            sanitize(&mut twice);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_blank_email_is_empty(email in arb_padding()) {
            let mut user = User::new(email);
            sanitize(&mut user);
            prop_assert_eq!(validate(&user), Err(ValidationError::EmptyEmail));
        }

        #[test]
        fn prop_email_without_single_at_is_malformed(email in arb_email_like()) {
            let trimmed = email.trim();
            prop_assume!(!trimmed.is_empty());
            prop_assume!(trimmed.matches('@').count() != 1);

            let mut user = User::new(email.clone());
            sanitize(&mut user);
            prop_assert!(matches!(validate(&user), Err(ValidationError::MalformedEmail(_))));
            prop_assert!(matches!(
                validate_lookup_email(&email),
                Err(ValidationError::MalformedEmail(_))
            ));
        }

        #[test]
        fn prop_padded_well_formed_email_is_accepted(
            local in "[a-z0-9.+]{1,12}",
            domain in "[a-z0-9.-]{1,12}",
            left in arb_padding(),
            right in arb_padding(),
        ) {
            let bare = format!("{}@{}", local, domain);
            let mut user = User::new(format!("{}{}{}", left, bare, right));
            sanitize(&mut user);

            prop_assert_eq!(validate(&user), Ok(()));
            prop_assert_eq!(&user.email, &bare);
            let looked_up = validate_lookup_email(&format!("{}{}{}", left, bare, right)).unwrap();
            prop_assert_eq!(looked_up.as_str(), bare.as_str());
        }
    }
}
