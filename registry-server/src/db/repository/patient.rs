//! Patient Repository

use super::{RepoError, RepoResult};
use shared::models::{Patient, PatientUpdate, PatientWithLocation, TicketEntry};
use sqlx::{SqliteConnection, SqlitePool};

const PATIENT_SELECT: &str = "SELECT id, username, role, phone, iin, area_id, region_id, ticket, link, manager_id, created_at, updated_at FROM patient";

const PATIENT_WITH_LOCATION_SELECT: &str = "SELECT p.id, p.username, p.role, p.phone, p.iin, p.area_id, a.name as area_name, a.code as area_code, p.region_id, r.name as region_name, p.ticket, p.link, p.manager_id, m.username as manager_username, p.created_at, p.updated_at FROM patient p LEFT JOIN area a ON p.area_id = a.id LEFT JOIN region r ON p.region_id = r.id LEFT JOIN patient m ON p.manager_id = m.id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<PatientWithLocation>> {
    let sql = format!(
        "{} ORDER BY p.created_at DESC",
        PATIENT_WITH_LOCATION_SELECT
    );
    let rows = sqlx::query_as::<_, PatientWithLocation>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<PatientWithLocation>> {
    let sql = format!("{} WHERE p.id = ?", PATIENT_WITH_LOCATION_SELECT);
    let row = sqlx::query_as::<_, PatientWithLocation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Plain patient row without joins (for validation lookups)
pub async fn find_patient_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Patient>> {
    let sql = format!("{} WHERE id = ?", PATIENT_SELECT);
    let row = sqlx::query_as::<_, Patient>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<Patient>> {
    let sql = format!("{} WHERE username = ?", PATIENT_SELECT);
    let row = sqlx::query_as::<_, Patient>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a fully built patient row.
///
/// Connection-based so registration can reserve the ticket number and write
/// the row in one transaction. Unique violations (username, iin, ticket)
/// surface as [`RepoError::Duplicate`] with the constraint name preserved.
pub async fn insert(conn: &mut SqliteConnection, p: &Patient) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO patient (id, username, role, phone, iin, area_id, region_id, ticket, link, manager_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )
    .bind(p.id)
    .bind(&p.username)
    .bind(p.role.clone())
    .bind(&p.phone)
    .bind(&p.iin)
    .bind(p.area_id)
    .bind(p.region_id)
    .bind(&p.ticket)
    .bind(&p.link)
    .bind(p.manager_id)
    .bind(p.created_at)
    .bind(p.updated_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: PatientUpdate,
) -> RepoResult<PatientWithLocation> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE patient SET role = COALESCE(?1, role), phone = COALESCE(?2, phone), region_id = COALESCE(?3, region_id), manager_id = COALESCE(?4, manager_id), link = COALESCE(?5, link), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.role)
    .bind(&data.phone)
    .bind(data.region_id)
    .bind(data.manager_id)
    .bind(&data.link)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Patient {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Patient {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM patient WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// All issued tickets with their location context, ordered by ticket.
///
/// `area_code` falls back to the ticket prefix when the issuing area row
/// has been deleted.
pub async fn tickets(pool: &SqlitePool) -> RepoResult<Vec<TicketEntry>> {
    let rows = sqlx::query_as::<_, TicketEntry>(
        "SELECT p.username, p.ticket, a.name as area_name, COALESCE(a.code, substr(p.ticket, 1, 1)) as area_code, r.name as region_name FROM patient p LEFT JOIN area a ON p.area_id = a.id LEFT JOIN region r ON p.region_id = r.id WHERE p.ticket IS NOT NULL ORDER BY p.ticket",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Raw ticket strings whose first character matches the area code.
///
/// Matches on the stored ticket text rather than `area_id` so tickets kept
/// by patients whose area link was cleared still count.
pub async fn ticket_strings_with_prefix(
    conn: &mut SqliteConnection,
    code: char,
) -> RepoResult<Vec<String>> {
    let rows = sqlx::query_scalar::<_, String>(
        "SELECT ticket FROM patient WHERE ticket IS NOT NULL AND substr(ticket, 1, 1) = ?",
    )
    .bind(code.to_string())
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PatientRole;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory pool with the real schema. Single connection: every
    /// `sqlite::memory:` connection is a separate database.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::raw_sql(include_str!("../../../migrations/0001_init.sql"))
            .execute(&pool)
            .await
            .unwrap();

        sqlx::query("INSERT INTO area (id, name, code) VALUES (1, 'Almaty', 'A')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO region (id, name, area_id) VALUES (10, 'Medeu', 1)")
            .execute(&pool)
            .await
            .unwrap();

        pool
    }

    fn sample_patient(id: i64, username: &str) -> Patient {
        Patient {
            id,
            username: username.to_string(),
            role: PatientRole::Patient,
            phone: Some("87001234567".to_string()),
            iin: None,
            area_id: Some(1),
            region_id: Some(10),
            ticket: Some(format!("A{:07}", id)),
            link: None,
            manager_id: None,
            created_at: 1000,
            updated_at: 1000,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_with_location() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut *conn, &sample_patient(1, "aigerim")).await.unwrap();
        drop(conn);

        let found = find_by_id(&pool, 1).await.unwrap().unwrap();
        assert_eq!(found.username, "aigerim");
        assert_eq!(found.role, PatientRole::Patient);
        assert_eq!(found.area_name.as_deref(), Some("Almaty"));
        assert_eq!(found.area_code.as_deref(), Some("A"));
        assert_eq!(found.region_name.as_deref(), Some("Medeu"));
        assert_eq!(found.ticket.as_deref(), Some("A0000001"));
    }

    #[tokio::test]
    async fn test_duplicate_username_reports_constraint() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut *conn, &sample_patient(1, "aigerim")).await.unwrap();

        let mut dup = sample_patient(2, "aigerim");
        dup.ticket = Some("A0000002".to_string());
        let err = insert(&mut *conn, &dup).await.unwrap_err();
        match err {
            RepoError::Duplicate(msg) => assert!(msg.contains("patient.username"), "{msg}"),
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut *conn, &sample_patient(1, "aigerim")).await.unwrap();
        drop(conn);

        let updated = update(
            &pool,
            1,
            PatientUpdate {
                phone: Some("87017654321".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.phone.as_deref(), Some("87017654321"));
        // Untouched fields survive
        assert_eq!(updated.username, "aigerim");
        assert_eq!(updated.ticket.as_deref(), Some("A0000001"));
    }

    #[tokio::test]
    async fn test_update_missing_patient() {
        let pool = test_pool().await;
        let err = update(&pool, 42, PatientUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut *conn, &sample_patient(1, "aigerim")).await.unwrap();
        drop(conn);

        assert!(delete(&pool, 1).await.unwrap());
        assert!(!delete(&pool, 1).await.unwrap());
        assert!(find_by_id(&pool, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tickets_skip_unticketed() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut *conn, &sample_patient(1, "aigerim")).await.unwrap();

        let mut no_ticket = sample_patient(2, "bolat");
        no_ticket.ticket = None;
        no_ticket.area_id = None;
        no_ticket.region_id = None;
        insert(&mut *conn, &no_ticket).await.unwrap();
        drop(conn);

        let entries = tickets(&pool).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].username, "aigerim");
        assert_eq!(entries[0].ticket, "A0000001");
        assert_eq!(entries[0].area_code, "A");
    }

    #[tokio::test]
    async fn test_ticket_strings_with_prefix() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO area (id, name, code) VALUES (2, 'Burabay', 'B')")
            .execute(&pool)
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        insert(&mut *conn, &sample_patient(1, "aigerim")).await.unwrap();
        insert(&mut *conn, &sample_patient(7, "bolat")).await.unwrap();

        let mut other_area = sample_patient(3, "dana");
        other_area.area_id = Some(2);
        other_area.region_id = None;
        other_area.ticket = Some("B0000001".to_string());
        insert(&mut *conn, &other_area).await.unwrap();

        let found = ticket_strings_with_prefix(&mut *conn, 'A').await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&"A0000001".to_string()));
        assert!(found.contains(&"A0000007".to_string()));
    }
}
