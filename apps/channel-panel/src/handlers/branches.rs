use axum::{
    Json,
    extract::{Path, Query as QueryParams, State, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
};
use channel_db::listing::Page;
use channel_db::models::branch::{Branch, BranchFilter, BranchPatch, NewBranch};
use channel_shared::api::{DeleteResponse, ListParams};

use super::{ApiResult, ClientIp, choice, list_query};
use crate::AppState;

const MODULE: &str = "Branches";

pub async fn list_branches(
    State(state): State<AppState>,
    params: Result<QueryParams<ListParams>, QueryRejection>,
) -> ApiResult<Json<Page<Branch>>> {
    let QueryParams(params) = params?;
    let mut query = list_query::<BranchFilter>(&params)?;
    query.fields.status = choice(params.status.as_deref())?;
    query.fields.reference_type = choice(params.reference_type.as_deref())?;

    let page = state
        .repos
        .branches
        .list(&query, params.page(), params.limit())
        .await?;
    Ok(Json(page))
}

pub async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Branch>> {
    Ok(Json(state.repos.branches.get_by_id(&id).await?))
}

pub async fn create_branch(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    payload: Result<Json<NewBranch>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Branch>)> {
    let Json(input) = payload?;
    let branch = state.repos.branches.create(input).await?;

    state
        .activity
        .log(
            MODULE,
            "Branch Created",
            format!("Created branch: {} ({})", branch.branch_name, branch.branch_code),
            &ip,
        )
        .await;
    Ok((StatusCode::CREATED, Json(branch)))
}

pub async fn update_branch(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Path(id): Path<String>,
    patch: Result<Json<BranchPatch>, JsonRejection>,
) -> ApiResult<Json<Branch>> {
    let Json(patch) = patch?;
    let branch = state.repos.branches.update(&id, patch).await?;

    state
        .activity
        .log(
            MODULE,
            "Branch Updated",
            format!("Updated branch: {} ({})", branch.branch_name, branch.branch_code),
            &ip,
        )
        .await;
    Ok(Json(branch))
}

pub async fn delete_branch(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let removed = state.repos.branches.delete(&id).await?;

    state
        .activity
        .log(
            MODULE,
            "Branch Deleted",
            format!("Deleted branch: {} ({})", removed.branch_name, removed.branch_code),
            &ip,
        )
        .await;
    Ok(Json(DeleteResponse { success: true }))
}
