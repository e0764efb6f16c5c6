//! Region Repository

use super::RepoResult;
use shared::models::Region;
use sqlx::{SqliteConnection, SqlitePool};

const REGION_SELECT: &str = "SELECT id, name, area_id FROM region";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Region>> {
    let sql = format!("{} ORDER BY area_id, name", REGION_SELECT);
    let rows = sqlx::query_as::<_, Region>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Region>> {
    let sql = format!("{} WHERE id = ?", REGION_SELECT);
    let row = sqlx::query_as::<_, Region>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_area(pool: &SqlitePool, area_id: i64) -> RepoResult<Vec<Region>> {
    let sql = format!("{} WHERE area_id = ? ORDER BY name", REGION_SELECT);
    let rows = sqlx::query_as::<_, Region>(&sql)
        .bind(area_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a region unless one with the same name already exists in the area.
/// Returns true when a row was actually inserted.
pub async fn insert_if_absent(
    conn: &mut SqliteConnection,
    area_id: i64,
    name: &str,
) -> RepoResult<bool> {
    let rows = sqlx::query("INSERT OR IGNORE INTO region (name, area_id) VALUES (?1, ?2)")
        .bind(name)
        .bind(area_id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
