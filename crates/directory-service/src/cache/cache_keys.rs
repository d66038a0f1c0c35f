//! Cache key generators for consistent key naming.

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "directory:cache";

/// Generate a cache key for a user by email.
///
/// Emails are used as-is: lookups are exact-match, so the key is too.
#[must_use]
pub fn user_by_email(email: &str) -> String {
    format!("{}:user:email:{}", CACHE_PREFIX, email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_by_email_key() {
        assert_eq!(user_by_email("a@b.com"), "directory:cache:user:email:a@b.com");
    }

    #[test]
    fn test_user_by_email_keeps_case() {
        assert_ne!(user_by_email("A@b.com"), user_by_email("a@b.com"));
    }
}
