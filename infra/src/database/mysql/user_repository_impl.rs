//! MySQL implementation of the UserRepository trait.
//!
//! Accounts live in the `users` table, keyed by a unique email. Roles are
//! stored as a JSON array of role names.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gk_core::domain::entities::user::{Role, User};
use gk_core::domain::value_objects::page::{Page, PageRequest};
use gk_core::errors::{AuthError, DomainError};
use gk_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn encode_roles(roles: &[Role]) -> Result<String, DomainError> {
        serde_json::to_string(roles).map_err(|e| DomainError::Internal {
            message: format!("Failed to encode roles: {}", e),
        })
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::storage(format!("Failed to get id: {}", e)))?;

        let roles: String = row
            .try_get("roles")
            .map_err(|e| DomainError::storage(format!("Failed to get roles: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::storage(format!("Failed to get email: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::storage(format!("Failed to get password_hash: {}", e)))?,
            roles: serde_json::from_str(&roles).map_err(|e| DomainError::Internal {
                message: format!("Invalid roles column: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::storage(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::storage(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check email: {}", e)))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::storage(format!("Failed to get count: {}", e)))?;

        Ok(total > 0)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, roles, created_at, updated_at
            FROM users
            WHERE email = ?
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find user by email: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, email, password_hash, roles, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(Self::encode_roles(&user.roles)?)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::DuplicateSubject {
                        email: user.email.clone(),
                    })
                }
                other => DomainError::storage(format!("Failed to save user: {}", other)),
            })?;

        tracing::debug!(user_id = %user.id, "User row inserted");

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, roles, created_at, updated_at
            FROM users
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find user by id: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        // Column and direction come from closed enums, never from raw input.
        let query = format!(
            r#"
            SELECT id, email, password_hash, roles, created_at, updated_at
            FROM users
            ORDER BY {} {}
            LIMIT ? OFFSET ?
            "#,
            request.sort_by.column(),
            request.direction.as_sql()
        );

        let rows = sqlx::query(&query)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let users = rows
            .iter()
            .map(Self::row_to_user)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(users, request, u64::try_from(total).unwrap_or(0)))
    }
}
