//! Patient registration
//!
//! Registration is the only place a ticket is ever created. The flow is:
//! validate the payload, resolve area/region/manager, then run one
//! transaction that reserves the ticket number and inserts the patient row.
//! Reservation and insert commit together, so a failed insert burns no
//! number and a committed patient always holds the number it reserved.
//!
//! Only a unique violation on `patient.ticket` is retried (the counter was
//! behind rows already in the table); it is resynced from stored tickets
//! first. Username and IIN conflicts, capacity exhaustion and malformed
//! stored tickets are final on the first attempt.

use super::allocator;
use crate::db::repository::{self, RepoError};
use crate::utils::validation::{
    self, MAX_LINK_LEN, MAX_PHONE_LEN, MAX_USERNAME_LEN,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Area, Patient, PatientCreate, PatientRole, PatientWithLocation};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const MAX_ALLOCATION_ATTEMPTS: u32 = 3;

/// Register a patient, reserving a ticket when an area is given.
pub async fn register(pool: &SqlitePool, data: PatientCreate) -> AppResult<PatientWithLocation> {
    validate(&data)?;

    let area = resolve_area(pool, &data).await?;
    resolve_region(pool, &data, area.as_ref()).await?;
    resolve_manager(pool, &data).await?;

    let mut last_error: Option<AppError> = None;
    for attempt in 0..MAX_ALLOCATION_ATTEMPTS {
        match try_register(pool, &data, area.as_ref()).await {
            Ok(patient) => return Ok(patient),
            Err(AttemptError::TicketCollision(msg)) => {
                tracing::warn!(
                    "Ticket collision for area {} (attempt {}/{}): {}",
                    area.as_ref().map(|a| a.code.as_str()).unwrap_or("?"),
                    attempt + 1,
                    MAX_ALLOCATION_ATTEMPTS,
                    msg
                );
                if let Some(area) = area.as_ref() {
                    let mut conn = pool.acquire().await.map_err(RepoError::from)?;
                    let floor = allocator::resync(&mut *conn, area).await?;
                    tracing::info!("Counter for area {} resynced to {}", area.code, floor);
                }
                last_error = Some(
                    AppError::with_message(
                        ErrorCode::TicketAllocationConflict,
                        format!("Ticket allocation kept colliding: {msg}"),
                    )
                    .with_detail("attempts", MAX_ALLOCATION_ATTEMPTS),
                );
            }
            Err(AttemptError::Fatal(err)) => return Err(err),
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::new(ErrorCode::TicketAllocationConflict)))
}

/// One registration attempt outcome that is not a success
enum AttemptError {
    /// Unique violation on `patient.ticket`; retried after a counter resync
    TicketCollision(String),
    /// Everything else; returned to the caller as-is
    Fatal(AppError),
}

async fn try_register(
    pool: &SqlitePool,
    data: &PatientCreate,
    area: Option<&Area>,
) -> Result<PatientWithLocation, AttemptError> {
    let mut tx = pool.begin().await.map_err(fatal_db)?;

    // Reserving first makes this transaction a writer immediately, so
    // concurrent registrations for the same area serialize on the counter
    // row instead of failing at commit.
    let ticket = match area {
        Some(area) => Some(
            allocator::reserve(&mut *tx, area)
                .await
                .map_err(|err| AttemptError::Fatal(err.into()))?,
        ),
        None => None,
    };

    let now = now_millis();
    let row = Patient {
        id: snowflake_id(),
        username: data.username.clone(),
        role: data.role.clone(),
        phone: data.phone.clone(),
        iin: data.iin.clone(),
        area_id: area.map(|a| a.id),
        region_id: data.region_id,
        ticket: ticket.map(|t| t.to_string()),
        link: data.link.clone(),
        manager_id: data.manager_id,
        created_at: now,
        updated_at: now,
    };

    if let Err(err) = repository::patient::insert(&mut *tx, &row).await {
        // Dropping the transaction rolls back the reserved number.
        return Err(classify_insert_error(err));
    }

    tx.commit().await.map_err(fatal_db)?;

    match repository::patient::find_by_id(pool, row.id).await {
        Ok(Some(created)) => Ok(created),
        Ok(None) => Err(AttemptError::Fatal(AppError::internal(format!(
            "Patient {} vanished after insert",
            row.id
        )))),
        Err(err) => Err(AttemptError::Fatal(err.into())),
    }
}

fn classify_insert_error(err: RepoError) -> AttemptError {
    match err {
        RepoError::Duplicate(msg) if msg.contains("patient.ticket") => {
            AttemptError::TicketCollision(msg)
        }
        RepoError::Duplicate(msg) if msg.contains("patient.username") => AttemptError::Fatal(
            AppError::with_message(ErrorCode::PatientUsernameExists, "Username already exists"),
        ),
        RepoError::Duplicate(msg) if msg.contains("patient.iin") => AttemptError::Fatal(
            AppError::with_message(ErrorCode::PatientIinExists, "IIN already exists"),
        ),
        other => AttemptError::Fatal(other.into()),
    }
}

fn fatal_db(err: sqlx::Error) -> AttemptError {
    AttemptError::Fatal(RepoError::from(err).into())
}

fn validate(data: &PatientCreate) -> AppResult<()> {
    validation::validate_required_text(&data.username, "username", MAX_USERNAME_LEN)?;
    validation::validate_optional_text(&data.phone, "phone", MAX_PHONE_LEN)?;
    validation::validate_optional_text(&data.link, "link", MAX_LINK_LEN)?;
    validation::validate_iin(&data.iin, "iin")?;
    Ok(())
}

async fn resolve_area(pool: &SqlitePool, data: &PatientCreate) -> AppResult<Option<Area>> {
    match data.area_id {
        Some(id) => {
            let area = repository::area::find_by_id(pool, id)
                .await
                .map_err(AppError::from)?
                .ok_or_else(|| {
                    AppError::with_message(ErrorCode::AreaNotFound, format!("Area {id} not found"))
                        .with_detail("area_id", id)
                })?;
            Ok(Some(area))
        }
        None => Ok(None),
    }
}

async fn resolve_region(
    pool: &SqlitePool,
    data: &PatientCreate,
    area: Option<&Area>,
) -> AppResult<()> {
    let Some(region_id) = data.region_id else {
        return Ok(());
    };
    let Some(area) = area else {
        return Err(AppError::validation("region_id requires an area_id"));
    };

    let region = repository::region::find_by_id(pool, region_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::RegionNotFound,
                format!("Region {region_id} not found"),
            )
            .with_detail("region_id", region_id)
        })?;

    if region.area_id != area.id {
        return Err(AppError::with_message(
            ErrorCode::RegionAreaMismatch,
            format!("Region {} does not belong to area {}", region.name, area.name),
        )
        .with_detail("region_id", region_id)
        .with_detail("area_id", area.id));
    }
    Ok(())
}

async fn resolve_manager(pool: &SqlitePool, data: &PatientCreate) -> AppResult<()> {
    let Some(manager_id) = data.manager_id else {
        return Ok(());
    };

    let manager = repository::patient::find_patient_by_id(pool, manager_id)
        .await
        .map_err(AppError::from)?;
    match manager {
        Some(m) if m.role == PatientRole::Manager => Ok(()),
        _ => Err(AppError::with_message(
            ErrorCode::ManagerInvalid,
            format!("Manager {manager_id} not found or not a manager"),
        )
        .with_detail("manager_id", manager_id)),
    }
}
