//! PostgreSQL implementation of StatsRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, StatsId, Timestamp};
use crate::domain::stats::StatsSnapshot;
use crate::ports::StatsRepository;

pub struct PostgresStatsRepository {
    pool: PgPool,
}

impl PostgresStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    id: Uuid,
    users: i64,
    subscriptions: i64,
    views: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<StatsRow> for StatsSnapshot {
    type Error = DomainError;

    fn try_from(row: StatsRow) -> Result<Self, Self::Error> {
        Ok(StatsSnapshot {
            id: StatsId::from_uuid(row.id),
            users: to_count("users", row.users)?,
            subscriptions: to_count("subscriptions", row.subscriptions)?,
            views: to_count("views", row.views)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn to_count(column: &str, value: i64) -> Result<u64, DomainError> {
    u64::try_from(value).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Negative {} count in stats row: {}", column, value),
        )
    })
}

fn to_column(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "failed to {}", action);
    DomainError::database(format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl StatsRepository for PostgresStatsRepository {
    async fn append(&self, snapshot: &StatsSnapshot) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO stats (id, users, subscriptions, views, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(snapshot.id.as_uuid())
        .bind(to_column(snapshot.users))
        .bind(to_column(snapshot.subscriptions))
        .bind(to_column(snapshot.views))
        .bind(snapshot.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("append stats snapshot", e))?;

        Ok(())
    }

    async fn latest(&self, limit: usize) -> Result<Vec<StatsSnapshot>, DomainError> {
        let rows: Vec<StatsRow> = sqlx::query_as(
            r#"
            SELECT id, users, subscriptions, views, created_at
            FROM stats
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("load stats snapshots", e))?;

        rows.into_iter().map(StatsSnapshot::try_from).collect()
    }

    async fn update(&self, snapshot: &StatsSnapshot) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE stats SET
                users = $2,
                subscriptions = $3,
                views = $4,
                created_at = $5
            WHERE id = $1
            "#,
        )
        .bind(snapshot.id.as_uuid())
        .bind(to_column(snapshot.users))
        .bind(to_column(snapshot.subscriptions))
        .bind(to_column(snapshot.views))
        .bind(snapshot.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update stats snapshot", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("stats snapshot {} not found", snapshot.id),
            ));
        }

        Ok(())
    }
}
