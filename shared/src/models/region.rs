//! Region Model

use serde::{Deserialize, Serialize};

/// Region entity (subdivision of an area)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub area_id: i64,
}
