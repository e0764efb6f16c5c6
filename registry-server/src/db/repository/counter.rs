//! Area Counter Repository
//!
//! Each area owns one counter row holding the highest ticket number ever
//! issued for it. All functions take `&mut SqliteConnection` so allocation
//! participates in the caller's transaction: a reserved number only becomes
//! visible once the surrounding registration commits.

use super::RepoResult;
use shared::ticket::MAX_NUMBER;
use sqlx::SqliteConnection;

/// Atomically bump the counter and return the reserved number.
///
/// The WHERE guard stops the counter at the 7-digit cap, so the returned
/// number is always in `1..=MAX_NUMBER`. `None` means no row matched:
/// either the counter row is missing or the area is exhausted; the caller
/// must inspect [`last_number`] to tell the two apart.
pub async fn increment_if_below_cap(
    conn: &mut SqliteConnection,
    area_id: i64,
) -> RepoResult<Option<i64>> {
    let now = shared::util::now_millis();
    let n = sqlx::query_scalar::<_, i64>(
        "UPDATE area_counter SET last_number = last_number + 1, updated_at = ?1 WHERE area_id = ?2 AND last_number < ?3 RETURNING last_number",
    )
    .bind(now)
    .bind(area_id)
    .bind(MAX_NUMBER as i64)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(n)
}

pub async fn last_number(conn: &mut SqliteConnection, area_id: i64) -> RepoResult<Option<i64>> {
    let n = sqlx::query_scalar::<_, i64>(
        "SELECT last_number FROM area_counter WHERE area_id = ?",
    )
    .bind(area_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(n)
}

/// Create the counter row at zero if it does not exist.
pub async fn ensure_row(conn: &mut SqliteConnection, area_id: i64) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT OR IGNORE INTO area_counter (area_id, last_number, updated_at) VALUES (?1, 0, ?2)",
    )
    .bind(area_id)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Raise the counter to at least `floor`, creating the row if missing.
/// Never lowers an existing value, so already-reserved numbers stay burned.
pub async fn install_floor(
    conn: &mut SqliteConnection,
    area_id: i64,
    floor: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO area_counter (area_id, last_number, updated_at) VALUES (?1, ?2, ?3) ON CONFLICT(area_id) DO UPDATE SET last_number = MAX(last_number, excluded.last_number), updated_at = excluded.updated_at",
    )
    .bind(area_id)
    .bind(floor)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
