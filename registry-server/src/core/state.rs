//! Server State
//!
//! 服务器共享状态：配置与数据库连接池

use crate::core::Config;
use crate::db::DbService;
use crate::locations;
use shared::error::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;
use std::path::Path;

/// Shared state handed to every HTTP handler
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
}

impl ServerState {
    /// Prepare the work directory, open the database and optionally load
    /// the location catalogue named by `LOCATIONS_FILE`.
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config.ensure_work_dir_structure().map_err(|e| {
            AppError::with_message(
                ErrorCode::ConfigError,
                format!("Cannot create work dir {}: {}", config.work_dir, e),
            )
        })?;

        let db = DbService::new(&config.database_path().to_string_lossy()).await?;

        if let Some(file) = &config.locations_file {
            locations::load_from_path(&db.pool, Path::new(file))
                .await
                .map_err(AppError::from)?;
            tracing::info!("Location catalogue loaded from {}", file);
        }

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
        })
    }

    /// State over an already opened pool (tests, embedded use)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }
}
