//! Action history handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use planhub_core::error::AppError;
use planhub_core::result::AppResult;
use planhub_core::types::pagination::PageResponse;

use crate::dto::request::{ClearHistoryParams, RecordActionRequest};
use crate::dto::response::{ActionRecordResponse, ApiResponse, MessageResponse, ReplayResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, HistoryListParams};
use crate::state::AppState;

/// GET /api/action-history
pub async fn list_actions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HistoryListParams>,
) -> Result<Json<ApiResponse<PageResponse<ActionRecordResponse>>>, ApiError> {
    let workspace_id = params.workspace_id;
    let page = params.into_page_request(state.config.history.default_list_limit);

    let result = state.recorder.list(&auth, workspace_id, page).await?;
    let items = result
        .items
        .iter()
        .map(ActionRecordResponse::from_record)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(ApiResponse::ok(PageResponse {
        items,
        total: result.total,
        limit: result.limit,
        offset: result.offset,
    })))
}

/// POST /api/action-history
pub async fn record_action(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RecordActionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ActionRecordResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let record = state.recorder.record(&auth, req.into()).await?;
    let body = ActionRecordResponse::from_record(&record)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(body))))
}

/// GET /api/action-history/{id}
pub async fn get_action(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ActionRecordResponse>>, ApiError> {
    let record = state.recorder.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(ActionRecordResponse::from_record(
        &record,
    )?)))
}

/// POST /api/action-history/{id}/undo
pub async fn undo_action(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReplayResponse>>, ApiError> {
    let record = state.replay_engine.undo(&auth, id).await?;
    Ok(Json(ApiResponse::ok(ReplayResponse {
        message: "Action undone".to_string(),
        action: ActionRecordResponse::from_record(&record)?,
    })))
}

/// POST /api/action-history/{id}/redo
pub async fn redo_action(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReplayResponse>>, ApiError> {
    let record = state.replay_engine.redo(&auth, id).await?;
    Ok(Json(ApiResponse::ok(ReplayResponse {
        message: "Action redone".to_string(),
        action: ActionRecordResponse::from_record(&record)?,
    })))
}

/// DELETE /api/action-history
pub async fn clear_actions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ClearHistoryParams>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let deleted = state.recorder.clear(&auth, params.older_than).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Cleared {deleted} action records"),
    })))
}
