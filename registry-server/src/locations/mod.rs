//! Location catalogue loader
//!
//! Loads areas and their regions from a JSON file shaped as a top-level
//! array of `{name, code, subdivisions}` entries. Loading is idempotent:
//! existing areas and regions are recognized and skipped, re-running the
//! loader never duplicates rows and never resets a ticket counter.
//!
//! Each entry is applied in its own transaction, so a bad entry in the
//! middle of the file leaves earlier entries committed and later ones
//! untouched.

use crate::db::repository::{self, RepoError};
use crate::utils::validation::MAX_NAME_LEN;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use sqlx::SqlitePool;
use std::path::Path;
use thiserror::Error;

/// One area entry in the locations file
#[derive(Debug, Clone, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub subdivisions: Vec<String>,
}

/// Error while loading the location catalogue
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read locations file: {0}")]
    Io(#[from] std::io::Error),

    #[error("locations file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),

    /// The code is already taken by a differently named area. Assigning it
    /// anyway would re-prefix that area's tickets, so the entry is refused.
    #[error("code {code:?} already belongs to area {existing:?}, cannot assign it to {incoming:?}")]
    CodeConflict {
        code: String,
        existing: String,
        incoming: String,
    },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Invalid(msg) => AppError::validation(msg),
            LoadError::CodeConflict { .. } => {
                AppError::with_message(ErrorCode::AreaCodeExists, err.to_string())
            }
            LoadError::Io(_) | LoadError::Parse(_) => {
                AppError::with_message(ErrorCode::ConfigError, err.to_string())
            }
            LoadError::Repo(repo) => repo.into(),
        }
    }
}

/// What a load run actually did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub areas_created: u32,
    pub areas_existing: u32,
    pub regions_created: u32,
}

pub async fn load_from_path(pool: &SqlitePool, path: &Path) -> Result<LoadSummary, LoadError> {
    let raw = std::fs::read_to_string(path)?;
    load_from_str(pool, &raw).await
}

pub async fn load_from_str(pool: &SqlitePool, raw: &str) -> Result<LoadSummary, LoadError> {
    let entries: Vec<LocationEntry> = serde_json::from_str(raw)?;

    let mut summary = LoadSummary::default();
    for entry in &entries {
        apply_entry(pool, entry, &mut summary).await?;
    }

    tracing::info!(
        "Locations loaded: {} areas created, {} already present, {} regions created",
        summary.areas_created,
        summary.areas_existing,
        summary.regions_created
    );
    Ok(summary)
}

async fn apply_entry(
    pool: &SqlitePool,
    entry: &LocationEntry,
    summary: &mut LoadSummary,
) -> Result<(), LoadError> {
    if entry.name.trim().is_empty() || entry.name.len() > MAX_NAME_LEN {
        return Err(LoadError::Invalid(format!(
            "area name {:?} must be 1..={} characters",
            entry.name, MAX_NAME_LEN
        )));
    }
    let code = normalize_code(&entry.code)?;

    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let area_id = match repository::area::find_by_code(&mut *tx, &code).await? {
        None => {
            let id = repository::area::insert(&mut *tx, &entry.name, &code).await?;
            summary.areas_created += 1;
            id
        }
        Some(existing) if existing.name == entry.name => {
            summary.areas_existing += 1;
            existing.id
        }
        Some(existing) => {
            return Err(LoadError::CodeConflict {
                code,
                existing: existing.name,
                incoming: entry.name.clone(),
            });
        }
    };

    // INSERT OR IGNORE keeps an existing counter untouched: reloading the
    // catalogue must never rewind ticket numbering.
    repository::counter::ensure_row(&mut *tx, area_id).await?;

    for sub in &entry.subdivisions {
        if sub.trim().is_empty() || sub.len() > MAX_NAME_LEN {
            return Err(LoadError::Invalid(format!(
                "region name {:?} in area {:?} must be 1..={} characters",
                sub, entry.name, MAX_NAME_LEN
            )));
        }
        if repository::region::insert_if_absent(&mut *tx, area_id, sub).await? {
            summary.regions_created += 1;
        }
    }

    tx.commit().await.map_err(RepoError::from)?;
    Ok(())
}

fn normalize_code(raw: &str) -> Result<String, LoadError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase().to_string()),
        _ => Err(LoadError::Invalid(format!(
            "area code {raw:?} must be a single letter"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    const CATALOGUE: &str = r#"[
        {"name": "Almaty", "code": "A", "subdivisions": ["Medeu", "Bostandyk"]},
        {"name": "Burabay", "code": "B", "subdivisions": ["Borovoe"]},
        {"name": "Karaganda", "code": "K"}
    ]"#;

    /// In-memory pool with the real schema. Single connection: every
    /// `sqlite::memory:` connection is a separate database.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::raw_sql(include_str!("../../migrations/0001_init.sql"))
            .execute(&pool)
            .await
            .unwrap();

        pool
    }

    async fn count(pool: &SqlitePool, sql: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_creates_areas_regions_and_counters() {
        let pool = test_pool().await;

        let summary = load_from_str(&pool, CATALOGUE).await.unwrap();
        assert_eq!(
            summary,
            LoadSummary {
                areas_created: 3,
                areas_existing: 0,
                regions_created: 3,
            }
        );

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM area").await, 3);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM region").await, 3);
        // Every area got a counter row starting at zero
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM area_counter").await, 3);
        assert_eq!(
            count(&pool, "SELECT COALESCE(MAX(last_number), -1) FROM area_counter").await,
            0
        );
    }

    #[tokio::test]
    async fn test_reload_is_idempotent() {
        let pool = test_pool().await;

        load_from_str(&pool, CATALOGUE).await.unwrap();
        let second = load_from_str(&pool, CATALOGUE).await.unwrap();

        assert_eq!(
            second,
            LoadSummary {
                areas_created: 0,
                areas_existing: 3,
                regions_created: 0,
            }
        );
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM area").await, 3);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM region").await, 3);
    }

    #[tokio::test]
    async fn test_reload_appends_new_regions() {
        let pool = test_pool().await;
        load_from_str(&pool, CATALOGUE).await.unwrap();

        let extended = r#"[
            {"name": "Almaty", "code": "A", "subdivisions": ["Medeu", "Bostandyk", "Alatau"]}
        ]"#;
        let summary = load_from_str(&pool, extended).await.unwrap();

        assert_eq!(summary.areas_existing, 1);
        assert_eq!(summary.regions_created, 1);
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM region WHERE area_id = (SELECT id FROM area WHERE code = 'A')").await,
            3
        );
    }

    #[tokio::test]
    async fn test_reload_never_rewinds_counters() {
        let pool = test_pool().await;
        load_from_str(&pool, CATALOGUE).await.unwrap();

        sqlx::query("UPDATE area_counter SET last_number = 41 WHERE area_id = (SELECT id FROM area WHERE code = 'A')")
            .execute(&pool)
            .await
            .unwrap();

        load_from_str(&pool, CATALOGUE).await.unwrap();

        assert_eq!(
            count(&pool, "SELECT last_number FROM area_counter WHERE area_id = (SELECT id FROM area WHERE code = 'A')").await,
            41
        );
    }

    #[tokio::test]
    async fn test_code_conflict_refused() {
        let pool = test_pool().await;
        load_from_str(&pool, CATALOGUE).await.unwrap();

        let clashing = r#"[{"name": "Aktobe", "code": "A"}]"#;
        let err = load_from_str(&pool, clashing).await.unwrap_err();

        match err {
            LoadError::CodeConflict { code, existing, incoming } => {
                assert_eq!(code, "A");
                assert_eq!(existing, "Almaty");
                assert_eq!(incoming, "Aktobe");
            }
            other => panic!("expected CodeConflict, got {other:?}"),
        }
        // The existing area is untouched
        assert_eq!(
            count(&pool, "SELECT COUNT(*) FROM area WHERE code = 'A' AND name = 'Almaty'").await,
            1
        );
    }

    #[tokio::test]
    async fn test_earlier_entries_survive_a_bad_one() {
        let pool = test_pool().await;

        let mixed = r#"[
            {"name": "Almaty", "code": "A"},
            {"name": "Broken", "code": "XY"}
        ]"#;
        let err = load_from_str(&pool, mixed).await.unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));

        // Per-entry transactions: the first entry committed
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM area").await, 1);
    }

    #[tokio::test]
    async fn test_code_normalized_to_uppercase() {
        let pool = test_pool().await;

        load_from_str(&pool, r#"[{"name": "Almaty", "code": "a"}]"#)
            .await
            .unwrap();

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM area WHERE code = 'A'").await, 1);
    }

    #[tokio::test]
    async fn test_invalid_json_rejected() {
        let pool = test_pool().await;
        assert!(matches!(
            load_from_str(&pool, "not json").await.unwrap_err(),
            LoadError::Parse(_)
        ));
        // Top-level object instead of array
        assert!(matches!(
            load_from_str(&pool, r#"{"name": "Almaty"}"#).await.unwrap_err(),
            LoadError::Parse(_)
        ));
    }

    #[tokio::test]
    async fn test_blank_region_name_rejected() {
        let pool = test_pool().await;
        let bad = r#"[{"name": "Almaty", "code": "A", "subdivisions": ["  "]}]"#;
        let err = load_from_str(&pool, bad).await.unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }
}
