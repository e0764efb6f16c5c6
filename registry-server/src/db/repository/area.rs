//! Area Repository

use super::RepoResult;
use shared::models::Area;
use sqlx::{SqliteConnection, SqlitePool};

const AREA_SELECT: &str = "SELECT id, name, code FROM area";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Area>> {
    let sql = format!("{} ORDER BY code", AREA_SELECT);
    let rows = sqlx::query_as::<_, Area>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Area>> {
    let sql = format!("{} WHERE id = ?", AREA_SELECT);
    let row = sqlx::query_as::<_, Area>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Connection-based so the location loader sees its own uncommitted inserts.
pub async fn find_by_code(conn: &mut SqliteConnection, code: &str) -> RepoResult<Option<Area>> {
    let sql = format!("{} WHERE code = ?", AREA_SELECT);
    let row = sqlx::query_as::<_, Area>(&sql)
        .bind(code)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Insert a new area and return its id.
///
/// Connection-based so the location loader can create the area and its
/// counter row in one transaction.
pub async fn insert(conn: &mut SqliteConnection, name: &str, code: &str) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>("INSERT INTO area (name, code) VALUES (?1, ?2) RETURNING id")
        .bind(name)
        .bind(code)
        .fetch_one(&mut *conn)
        .await?;
    Ok(id)
}
