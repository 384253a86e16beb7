use axum::{
    Json,
    extract::{Path, Query as QueryParams, State, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
};
use channel_db::listing::Page;
use channel_db::models::agent::{Agent, AgentFilter, AgentPatch, NewAgent};
use channel_shared::api::{DeleteResponse, ListParams};

use super::{ApiResult, ClientIp, choice, list_query};
use crate::AppState;

const MODULE: &str = "Agents";

pub async fn list_agents(
    State(state): State<AppState>,
    params: Result<QueryParams<ListParams>, QueryRejection>,
) -> ApiResult<Json<Page<Agent>>> {
    let QueryParams(params) = params?;
    let mut query = list_query::<AgentFilter>(&params)?;
    query.fields.status = choice(params.status.as_deref())?;

    let page = state
        .repos
        .agents
        .list(&query, params.page(), params.limit())
        .await?;
    Ok(Json(page))
}

pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Agent>> {
    Ok(Json(state.repos.agents.get_by_id(&id).await?))
}

pub async fn create_agent(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    payload: Result<Json<NewAgent>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Agent>)> {
    let Json(input) = payload?;
    let agent = state.repos.agents.create(input).await?;

    state
        .activity
        .log(
            MODULE,
            "Agent Created",
            format!("Created agent: {} ({})", agent.agent_name, agent.agent_code),
            &ip,
        )
        .await;
    Ok((StatusCode::CREATED, Json(agent)))
}

pub async fn update_agent(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Path(id): Path<String>,
    patch: Result<Json<AgentPatch>, JsonRejection>,
) -> ApiResult<Json<Agent>> {
    let Json(patch) = patch?;
    let agent = state.repos.agents.update(&id, patch).await?;

    state
        .activity
        .log(
            MODULE,
            "Agent Updated",
            format!("Updated agent: {} ({})", agent.agent_name, agent.agent_code),
            &ip,
        )
        .await;
    Ok(Json(agent))
}

pub async fn delete_agent(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let removed = state.repos.agents.delete(&id).await?;

    state
        .activity
        .log(
            MODULE,
            "Agent Deleted",
            format!("Deleted agent: {} ({})", removed.agent_name, removed.agent_code),
            &ip,
        )
        .await;
    Ok(Json(DeleteResponse { success: true }))
}
