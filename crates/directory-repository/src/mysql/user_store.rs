//! MySQL user store implementation.

use crate::{DatabasePoolInterface, StoreError, UserStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directory_core::{RequestContext, User};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

/// MySQL-backed user store.
///
/// The table name comes from configuration and is spliced into statements,
/// so it must already be a plain SQL identifier.
#[derive(Component, Clone)]
#[shaku(interface = UserStore)]
pub struct MySqlUserStore {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
    table: String,
}

impl MySqlUserStore {
    /// Creates a new MySQL user store over `table`.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// Creates the user table if it does not exist.
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        info!(table = %self.table, "Ensuring user table exists");
        sqlx::query(&create_table_sql(&self.table))
            .execute(self.pool.inner())
            .await?;
        Ok(())
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    first_name: String,
    last_name: String,
    mobile: String,
    email: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            first_name: row.first_name,
            last_name: row.last_name,
            mobile: row.mobile,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn create_table_sql(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS `{table}` (
            id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            first_name VARCHAR(255) NOT NULL DEFAULT '',
            last_name VARCHAR(255) NOT NULL DEFAULT '',
            mobile VARCHAR(64) NOT NULL DEFAULT '',
            email VARCHAR(320) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
            created_at TIMESTAMP(6) NULL,
            updated_at TIMESTAMP(6) NULL,
            KEY idx_email (email)
        )
        "#
    )
}

fn insert_sql(table: &str) -> String {
    format!(
        "INSERT INTO `{table}` (first_name, last_name, mobile, email, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?)"
    )
}

fn select_by_email_sql(table: &str) -> String {
    format!(
        "SELECT first_name, last_name, mobile, email, created_at, updated_at \
         FROM `{table}` WHERE email = ? ORDER BY id LIMIT 1"
    )
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn put(&self, ctx: &RequestContext, user: &User) -> Result<(), StoreError> {
        debug!("Inserting user with email: {}", user.email);

        let sql = insert_sql(&self.table);
        let query = sqlx::query(&sql)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.mobile)
            .bind(&user.email)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(self.pool.inner());

        ctx.run(query).await??;
        Ok(())
    }

    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> Result<User, StoreError> {
        debug!("Finding user by email: {}", email);

        let sql = select_by_email_sql(&self.table);
        let query = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(self.pool.inner());

        ctx.run(query)
            .await??
            .map(User::from)
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_quote_table_name() {
        assert!(insert_sql("directory_users").contains("INSERT INTO `directory_users`"));
        assert!(select_by_email_sql("directory_users").contains("FROM `directory_users`"));
        assert!(create_table_sql("directory_users")
            .contains("CREATE TABLE IF NOT EXISTS `directory_users`"));
    }

    #[test]
    fn test_select_returns_oldest_match() {
        let sql = select_by_email_sql("users");
        assert!(sql.contains("WHERE email = ?"));
        assert!(sql.ends_with("ORDER BY id LIMIT 1"));
    }

    #[test]
    fn test_email_column_is_not_unique() {
        let sql = create_table_sql("users");
        assert!(!sql.contains("UNIQUE"));
        assert!(sql.contains("KEY idx_email (email)"));
    }

    #[test]
    fn test_row_converts_to_user() {
        let now = Utc::now();
        let row = UserRow {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            mobile: String::new(),
            email: "ada@example.com".to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let user = User::from(row);
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Lovelace");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.created_at, Some(now));
        assert_eq!(user.updated_at, Some(now));
    }
}
