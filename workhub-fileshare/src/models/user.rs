/// User model and database operations
///
/// Users of the file-sharing service carry one of two flat roles: ops users
/// upload files, client users receive download links. This `User` type is
/// unrelated to the taskboard service's user type and must stay so.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_type AS ENUM ('ops', 'client');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(150) NOT NULL UNIQUE,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     user_type user_type NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of a file-sharing user
///
/// Roles are flat: neither is a superset of the other. Ops users may upload,
/// client users may request download links, and that is the entire model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Operation user - may upload files
    Ops,

    /// Client user - may request download links; must verify email via OTP
    Client,
}

impl UserType {
    /// Role as its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Ops => "ops",
            UserType::Client => "client",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ops" => Ok(UserType::Ops),
            "client" => Ok(UserType::Client),
            other => Err(format!(
                "Invalid user_type '{}': must be 'ops' or 'client'",
                other
            )),
        }
    }
}

/// User model representing a file-sharing account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Login name, unique across all users
    pub username: String,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Caller role
    pub user_type: UserType,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login name
    pub username: String,

    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Caller role
    pub user_type: UserType,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the username or email already exists (unique
    /// constraint violation) or the database operation fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, user_type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, user_type, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.user_type)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by login name
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, user_type, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, user_type, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_parse() {
        assert_eq!("ops".parse::<UserType>().unwrap(), UserType::Ops);
        assert_eq!("client".parse::<UserType>().unwrap(), UserType::Client);
        assert!("admin".parse::<UserType>().is_err());
        assert!("Ops".parse::<UserType>().is_err());
    }

    #[test]
    fn test_user_type_roundtrip() {
        for role in [UserType::Ops, UserType::Client] {
            assert_eq!(role.as_str().parse::<UserType>().unwrap(), role);
        }
    }

    #[test]
    fn test_user_type_serde() {
        assert_eq!(serde_json::to_string(&UserType::Ops).unwrap(), "\"ops\"");
        assert_eq!(
            serde_json::from_str::<UserType>("\"client\"").unwrap(),
            UserType::Client
        );
        assert!(serde_json::from_str::<UserType>("\"root\"").is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            user_type: UserType::Client,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("alice@example.com"));
    }

    // Integration tests for database operations require a running database
}
