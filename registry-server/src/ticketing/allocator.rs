//! Ticket number allocation
//!
//! Every area owns a dedicated counter row (`area_counter.last_number`)
//! holding the highest number ever issued for it. Reserving a ticket is a
//! single guarded `UPDATE ... RETURNING` on that row, never a read of the
//! current maximum followed by a separate write, so two registrations
//! bumping the same area serialize on the row and can never observe the
//! same value.
//!
//! Reservation happens inside the caller's transaction: the counter bump
//! and the patient row commit together, so a failed registration burns
//! nothing and numbering stays dense.

use crate::db::repository::{RepoError, counter, patient};
use shared::error::{AppError, ErrorCode};
use shared::models::Area;
use shared::ticket::{MAX_NUMBER, TicketNumber, TicketParseError};
use sqlx::SqliteConnection;
use thiserror::Error;

/// Error during ticket number reservation
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The area has handed out all 9,999,999 numbers. Never retried.
    #[error("area {area_code} has no ticket numbers left")]
    CapacityExhausted { area_code: char },

    /// A stored ticket failed strict parsing while deriving the counter
    /// floor. Data-integrity problem: abort instead of guessing a number.
    #[error("stored ticket {ticket:?} is malformed")]
    MalformedTicket {
        ticket: String,
        #[source]
        source: TicketParseError,
    },

    /// The area row carries a code that is not a single uppercase letter.
    #[error("area code must be a single uppercase letter, got {0:?}")]
    InvalidAreaCode(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type AllocationResult<T> = Result<T, AllocationError>;

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::CapacityExhausted { area_code } => AppError::with_message(
                ErrorCode::TicketCapacityExhausted,
                format!("Area {} has no ticket numbers left", area_code),
            )
            .with_detail("area_code", area_code.to_string()),
            AllocationError::MalformedTicket { ticket, source } => AppError::with_message(
                ErrorCode::TicketMalformed,
                format!("Stored ticket {:?} is malformed: {}", ticket, source),
            )
            .with_detail("ticket", ticket),
            AllocationError::InvalidAreaCode(code) => {
                AppError::internal(format!("Area code {:?} is not a single uppercase letter", code))
            }
            AllocationError::Repo(repo) => repo.into(),
        }
    }
}

/// Reserve the next ticket number for `area` inside the caller's transaction.
///
/// The returned number only becomes visible to other allocations once the
/// transaction commits. On the first allocation for an area whose counter
/// row is missing, the floor is derived from stored tickets first so legacy
/// rows are never re-issued.
pub async fn reserve(conn: &mut SqliteConnection, area: &Area) -> AllocationResult<TicketNumber> {
    let code = area_code_char(area)?;

    if let Some(n) = counter::increment_if_below_cap(conn, area.id).await? {
        return ticket_from_reserved(code, n);
    }

    // No row matched the guarded UPDATE: either the counter row is missing
    // or the area is exhausted.
    match counter::last_number(conn, area.id).await? {
        Some(n) if n >= MAX_NUMBER as i64 => {
            Err(AllocationError::CapacityExhausted { area_code: code })
        }
        Some(n) => Err(AllocationError::Repo(RepoError::Database(format!(
            "counter bump for area {} matched no row at last_number={}",
            area.code, n
        )))),
        None => {
            let floor = scan_floor(conn, code).await?;
            counter::install_floor(conn, area.id, floor as i64).await?;
            match counter::increment_if_below_cap(conn, area.id).await? {
                Some(n) => ticket_from_reserved(code, n),
                None => Err(AllocationError::CapacityExhausted { area_code: code }),
            }
        }
    }
}

/// Raise the area's counter to the highest stored ticket number.
///
/// Called after a ticket unique violation: the counter was behind rows
/// already in the table (restored backup, hand-edited data). Runs on its
/// own connection so the correction persists even if the retried
/// registration fails again. Returns the installed floor.
pub async fn resync(conn: &mut SqliteConnection, area: &Area) -> AllocationResult<u32> {
    let code = area_code_char(area)?;
    let floor = scan_floor(conn, code).await?;
    counter::install_floor(conn, area.id, floor as i64).await?;
    Ok(floor)
}

/// Highest numeric suffix among stored tickets with this area prefix.
///
/// Every stored ticket must parse strictly. A malformed row aborts the scan:
/// guessing a floor from partial data risks re-issuing a live number.
async fn scan_floor(conn: &mut SqliteConnection, code: char) -> AllocationResult<u32> {
    let raw = patient::ticket_strings_with_prefix(conn, code).await?;
    let mut floor = 0u32;
    for stored in raw {
        let parsed: TicketNumber = stored.parse().map_err(|source: TicketParseError| {
            tracing::error!(ticket = %stored, error = %source, "Malformed ticket in patient table");
            AllocationError::MalformedTicket {
                ticket: stored.clone(),
                source,
            }
        })?;
        floor = floor.max(parsed.number());
    }
    Ok(floor)
}

fn area_code_char(area: &Area) -> AllocationResult<char> {
    let mut chars = area.code.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Ok(c),
        _ => Err(AllocationError::InvalidAreaCode(area.code.clone())),
    }
}

fn ticket_from_reserved(code: char, n: i64) -> AllocationResult<TicketNumber> {
    // The guarded UPDATE keeps last_number in 1..=MAX_NUMBER; a value
    // outside that range means the counter table was edited by hand.
    TicketNumber::new(code, n as u32).map_err(|err| {
        AllocationError::Repo(RepoError::Database(format!(
            "reserved number {} is outside the ticket space: {}",
            n, err
        )))
    })
}
