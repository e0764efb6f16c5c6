//! Area Model

use serde::{Deserialize, Serialize};

use super::region::Region;

/// Area entity (geographic partition)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Area {
    pub id: i64,
    pub name: String,
    /// Single uppercase letter, globally unique, used as the ticket prefix
    pub code: String,
}

/// Area with its regions (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AreaWithRegions {
    pub id: i64,
    pub name: String,
    pub code: String,

    // -- Relations (populated by application code, skipped by FromRow) --

    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub regions: Vec<Region>,
}
