//! Patient API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{patient, region};
use crate::ticketing;
use crate::utils::validation::{self, MAX_LINK_LEN, MAX_PHONE_LEN};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{PatientCreate, PatientRole, PatientUpdate, PatientWithLocation};

/// POST /api/patients - 登记患者并分配排队号
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PatientCreate>,
) -> AppResult<Json<PatientWithLocation>> {
    let created = ticketing::register(&state.pool, payload).await?;
    Ok(Json(created))
}

/// GET /api/patients - 获取所有患者
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PatientWithLocation>>> {
    let patients = patient::find_all(&state.pool).await?;
    Ok(Json(patients))
}

/// GET /api/patients/{id} - 获取单个患者
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PatientWithLocation>> {
    let found = patient::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::PatientNotFound, format!("Patient {} not found", id))
    })?;
    Ok(Json(found))
}

/// PUT /api/patients/{id} - 更新患者（地区和排队号登记后不可变更）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PatientUpdate>,
) -> AppResult<Json<PatientWithLocation>> {
    validation::validate_optional_text(&payload.phone, "phone", MAX_PHONE_LEN)?;
    validation::validate_optional_text(&payload.link, "link", MAX_LINK_LEN)?;

    let existing = patient::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::PatientNotFound, format!("Patient {} not found", id))
    })?;

    // The region may change, but only within the area fixed at registration
    if let Some(region_id) = payload.region_id {
        let region = region::find_by_id(&state.pool, region_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::RegionNotFound,
                    format!("Region {} not found", region_id),
                )
            })?;
        if existing.area_id != Some(region.area_id) {
            return Err(AppError::with_message(
                ErrorCode::RegionAreaMismatch,
                format!("Region {} does not belong to the patient's area", region.name),
            )
            .with_detail("region_id", region_id));
        }
    }

    if let Some(manager_id) = payload.manager_id {
        let manager = patient::find_patient_by_id(&state.pool, manager_id).await?;
        if !matches!(manager, Some(ref m) if m.role == PatientRole::Manager) {
            return Err(AppError::with_message(
                ErrorCode::ManagerInvalid,
                format!("Manager {} not found or not a manager", manager_id),
            ));
        }
    }

    let updated = patient::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/patients/{id} - 删除患者
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = patient::delete(&state.pool, id).await?;
    Ok(Json(result))
}
