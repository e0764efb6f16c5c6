//! 地区目录加载工具
//!
//! ```text
//! load-locations <locations.json>
//! ```
//!
//! 幂等：重复运行不会创建重复行，也不会重置排队号计数器。

use anyhow::Context;
use registry_server::core::Config;
use registry_server::db::DbService;
use registry_server::locations;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    registry_server::init_logger();

    let path = std::env::args()
        .nth(1)
        .context("usage: load-locations <locations.json>")?;

    let config = Config::from_env();
    config
        .ensure_work_dir_structure()
        .with_context(|| format!("cannot create work dir {}", config.work_dir))?;

    let db = DbService::new(&config.database_path().to_string_lossy()).await?;
    let summary = locations::load_from_path(&db.pool, std::path::Path::new(&path))
        .await
        .with_context(|| format!("loading {path}"))?;

    tracing::info!(
        "Done: {} areas created, {} already present, {} regions created",
        summary.areas_created,
        summary.areas_existing,
        summary.regions_created
    );
    Ok(())
}
