use crate::database::StoreBackend;
use crate::database::migrations;
use crate::database::models::{ShiftMap, ShiftSession, UserShiftRecord};
use crate::error::StoreResult;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::debug;

/// SQLite tables holding the same mapping as the JSON file.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePool::connect_with(connect_options).await?;
        migrations::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// In-memory database (for testing). One connection, or every
    /// checkout would see a different empty database.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        use sqlx::sqlite::SqlitePoolOptions;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?;
        migrations::run_migrations(&pool).await?;

        Ok(Self { pool })
    }
}

impl StoreBackend for SqliteBackend {
    async fn read(&self) -> StoreResult<Option<ShiftMap>> {
        let mut shifts = ShiftMap::new();

        let users = sqlx::query("SELECT user_id, total, current_start FROM shift_users")
            .fetch_all(&self.pool)
            .await?;

        for row in users {
            let user_id: String = row.try_get("user_id")?;
            let record = UserShiftRecord {
                sessions: Vec::new(),
                total: row.try_get("total")?,
                current_start: row.try_get::<Option<DateTime<Utc>>, _>("current_start")?,
            };
            shifts.insert(user_id, record);
        }

        let sessions = sqlx::query(
            "SELECT user_id, start_time, end_time FROM shift_sessions ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        for row in sessions {
            let user_id: String = row.try_get("user_id")?;
            let session = ShiftSession {
                start: row.try_get("start_time")?,
                end: row.try_get("end_time")?,
            };
            shifts.entry(user_id).or_default().sessions.push(session);
        }

        Ok(Some(shifts))
    }

    async fn write(&self, shifts: &ShiftMap) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM shift_sessions")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM shift_users")
            .execute(&mut *tx)
            .await?;

        for (user_id, record) in shifts {
            sqlx::query("INSERT INTO shift_users (user_id, total, current_start) VALUES (?, ?, ?)")
                .bind(user_id)
                .bind(record.total)
                .bind(record.current_start)
                .execute(&mut *tx)
                .await?;

            for session in &record.sessions {
                sqlx::query(
                    "INSERT INTO shift_sessions (user_id, start_time, end_time) VALUES (?, ?, ?)",
                )
                .bind(user_id)
                .bind(session.start)
                .bind(session.end)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        debug!("Wrote {} shift records to sqlite", shifts.len());
        Ok(())
    }

    fn describe(&self) -> String {
        "sqlite database".to_string()
    }
}
