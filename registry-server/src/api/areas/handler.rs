//! Area API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{area, region};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{AreaWithRegions, Region};

/// GET /api/areas - 获取所有地区（含区域）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AreaWithRegions>>> {
    let areas = area::find_all(&state.pool).await?;
    let regions = region::find_all(&state.pool).await?;

    let mut grouped: Vec<AreaWithRegions> = areas
        .into_iter()
        .map(|a| AreaWithRegions {
            id: a.id,
            name: a.name,
            code: a.code,
            regions: Vec::new(),
        })
        .collect();
    for r in regions {
        if let Some(entry) = grouped.iter_mut().find(|a| a.id == r.area_id) {
            entry.regions.push(r);
        }
    }

    Ok(Json(grouped))
}

/// GET /api/areas/{id} - 获取单个地区（含区域）
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AreaWithRegions>> {
    let area = area::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::AreaNotFound, format!("Area {} not found", id))
    })?;
    let regions = region::find_by_area(&state.pool, id).await?;

    Ok(Json(AreaWithRegions {
        id: area.id,
        name: area.name,
        code: area.code,
        regions,
    }))
}

/// GET /api/areas/{id}/regions - 获取地区下属区域
pub async fn regions(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Region>>> {
    area::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::AreaNotFound, format!("Area {} not found", id))
    })?;
    let regions = region::find_by_area(&state.pool, id).await?;
    Ok(Json(regions))
}
