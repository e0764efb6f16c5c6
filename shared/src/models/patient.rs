//! Patient Model

use serde::{Deserialize, Serialize};

/// Patient role
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PatientRole {
    Admin,
    Manager,
    #[default]
    Patient,
}

/// Patient entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Patient {
    pub id: i64,
    pub username: String,
    pub role: PatientRole,
    pub phone: Option<String>,
    /// 12-digit personal identification number
    pub iin: Option<String>,
    pub area_id: Option<i64>,
    pub region_id: Option<i64>,
    /// Assigned once at registration, never reassigned afterwards
    pub ticket: Option<String>,
    pub link: Option<String>,
    pub manager_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCreate {
    pub username: String,
    #[serde(default)]
    pub role: PatientRole,
    pub phone: Option<String>,
    pub iin: Option<String>,
    pub area_id: Option<i64>,
    pub region_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub link: Option<String>,
}

/// Update patient payload
///
/// `area_id` and `ticket` are fixed at registration and deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PatientUpdate {
    pub role: Option<PatientRole>,
    pub phone: Option<String>,
    pub region_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub link: Option<String>,
}

/// Patient with location info (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PatientWithLocation {
    pub id: i64,
    pub username: String,
    pub role: PatientRole,
    pub phone: Option<String>,
    pub iin: Option<String>,
    pub area_id: Option<i64>,
    pub area_name: Option<String>,
    pub area_code: Option<String>,
    pub region_id: Option<i64>,
    pub region_name: Option<String>,
    pub ticket: Option<String>,
    pub link: Option<String>,
    pub manager_id: Option<i64>,
    pub manager_username: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Issued ticket view (for the ticket list endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TicketEntry {
    pub username: String,
    pub ticket: String,
    /// None when the issuing area has since been deleted
    pub area_name: Option<String>,
    pub area_code: String,
    pub region_name: Option<String>,
}
