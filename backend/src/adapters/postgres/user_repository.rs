//! PostgreSQL implementation of UserRepository.
//!
//! The embedded subscription record lives in two nullable columns on the
//! `users` row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{SubscriptionRecord, SubscriptionStatus};
use crate::domain::user::{Email, Role, User};
use crate::ports::UserRepository;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    subscription_id: Option<String>,
    subscription_status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| corrupt("email", e))?;
        let role = row.role.parse::<Role>().map_err(|e| corrupt("role", e))?;
        let status = row
            .subscription_status
            .parse::<SubscriptionStatus>()
            .map_err(|e| corrupt("subscription_status", e))?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email,
            password_hash: row.password_hash,
            role,
            subscription: SubscriptionRecord::reconstitute(row.subscription_id, status),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn corrupt(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value in users row: {}", column, err),
    )
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "failed to {}", action);
    DomainError::database(format!("Failed to {}: {}", action, e))
}

const SELECT_USER: &str = r#"
    SELECT id, name, email, password_hash, role, subscription_id, subscription_status, created_at
    FROM users
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find user by email", e))?;

        row.map(User::try_from).transpose()
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, password_hash, role, subscription_id, subscription_status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                password_hash = EXCLUDED.password_hash,
                role = EXCLUDED.role,
                subscription_id = EXCLUDED.subscription_id,
                subscription_status = EXCLUDED.subscription_status
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.subscription.id)
        .bind(user.subscription.status.as_str())
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::Conflict,
                        "User already exists with this email",
                    );
                }
            }
            db_error("save user", e)
        })?;

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete user", e))?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at ASC", SELECT_USER))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("list users", e))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn count_users(&self) -> Result<u64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count users", e))?;
        Ok(count.max(0) as u64)
    }

    async fn count_active_subscriptions(&self) -> Result<u64, DomainError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE subscription_status = $1")
                .bind(SubscriptionStatus::Active.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("count active subscriptions", e))?;
        Ok(count.max(0) as u64)
    }
}
