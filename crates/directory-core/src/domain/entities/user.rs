//! User entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record as stored in the directory.
///
/// Every field is optional on the wire so that partially filled records can be
/// received from callers; [`crate::validation`] fills in the timestamps and
/// decides whether the record may be persisted. The camelCase field names are
/// shared with the store and cache backends and must stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User's first name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,

    /// User's last name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,

    /// User's mobile number.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mobile: String,

    /// User's email address, the lookup key.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,

    /// Record creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a user with only an email set.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Sets the first and last name.
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Sets the mobile number.
    #[must_use]
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = mobile.into();
        self
    }
}
