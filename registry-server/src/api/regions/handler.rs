//! Region API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::region;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::Region;

/// GET /api/regions - 获取所有区域
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Region>>> {
    let regions = region::find_all(&state.pool).await?;
    Ok(Json(regions))
}

/// GET /api/regions/{id} - 获取单个区域
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Region>> {
    let region = region::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::RegionNotFound, format!("Region {} not found", id))
    })?;
    Ok(Json(region))
}
