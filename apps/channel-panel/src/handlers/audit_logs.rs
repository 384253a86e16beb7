use axum::{
    Json,
    extract::{Path, Query as QueryParams, State, rejection::QueryRejection},
};
use channel_db::listing::Page;
use channel_db::models::audit_log::{AuditLog, AuditLogFilter};
use channel_shared::api::{ListParams, selected};

use super::{ApiResult, choice, list_query};
use crate::AppState;

pub async fn list_audit_logs(
    State(state): State<AppState>,
    params: Result<QueryParams<ListParams>, QueryRejection>,
) -> ApiResult<Json<Page<AuditLog>>> {
    let QueryParams(params) = params?;
    let mut query = list_query::<AuditLogFilter>(&params)?;
    query.fields = AuditLogFilter {
        module: selected(params.module.as_deref()).map(str::to_string),
        status: choice(params.status.as_deref())?,
        user: selected(params.user.as_deref()).map(str::to_string),
        action: selected(params.action.as_deref()).map(str::to_string),
    };

    let page = state
        .repos
        .audit_logs
        .list(&query, params.page(), params.limit())
        .await?;
    Ok(Json(page))
}

pub async fn get_audit_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AuditLog>> {
    Ok(Json(state.repos.audit_logs.get_by_id(&id).await?))
}
