use anyhow::Result;
use chrono::FixedOffset;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Json,
    Sqlite,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(anyhow::anyhow!(
                "STORAGE_BACKEND must be `json` or `sqlite`, got `{}`",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub storage_backend: StorageBackend,
    pub data_file: PathBuf,
    pub database_url: String,
    pub admin_role_id: Option<u64>,
    pub command_prefix: String,
    pub display_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow::anyhow!("DISCORD_TOKEN environment variable is required"))?;

        Self::from_vars(discord_token, |key| env::var(key).ok())
    }

    fn from_vars(discord_token: String, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage_backend = match var("STORAGE_BACKEND") {
            Some(value) => StorageBackend::parse(&value)?,
            None => StorageBackend::Json,
        };

        let data_file = var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data.json"));

        let database_url = var("DATABASE_URL").unwrap_or_else(|| "sqlite:shifts.db".to_string());

        let admin_role_id = var("ADMIN_ROLE_ID")
            .map(|id| {
                id.trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|id| *id != 0)
                    .ok_or_else(|| anyhow::anyhow!("ADMIN_ROLE_ID must be a numeric role id, got `{}`", id))
            })
            .transpose()?;

        let command_prefix = var("COMMAND_PREFIX").unwrap_or_else(|| "!".to_string());

        let offset_hours = match var("DISPLAY_UTC_OFFSET_HOURS") {
            Some(value) => value.trim().parse::<i32>().map_err(|_| {
                anyhow::anyhow!("DISPLAY_UTC_OFFSET_HOURS must be a whole number of hours, got `{}`", value)
            })?,
            None => 0,
        };
        let display_offset = offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow::anyhow!("DISPLAY_UTC_OFFSET_HOURS out of range: {}", offset_hours)
            })?;

        Ok(Config {
            discord_token,
            storage_backend,
            data_file,
            database_url,
            admin_role_id,
            command_prefix,
            display_offset,
        })
    }
}
