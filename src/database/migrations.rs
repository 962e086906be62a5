use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    create_shift_users_table(pool).await?;
    create_shift_sessions_table(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}

async fn create_shift_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shift_users (
            user_id TEXT PRIMARY KEY,
            total REAL NOT NULL DEFAULT 0,
            current_start DATETIME
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_shift_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shift_sessions (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            start_time DATETIME NOT NULL,
            end_time DATETIME NOT NULL,
            FOREIGN KEY (user_id) REFERENCES shift_users (user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
