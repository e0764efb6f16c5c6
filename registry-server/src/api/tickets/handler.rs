//! Ticket API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::patient;
use crate::utils::AppResult;
use shared::models::TicketEntry;

/// GET /api/tickets - 获取所有已发排队号（按号码排序）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TicketEntry>>> {
    let entries = patient::tickets(&state.pool).await?;
    Ok(Json(entries))
}
