use axum::{
    Json,
    extract::{Path, Query as QueryParams, State, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
};
use channel_db::listing::Page;
use channel_db::models::discount::{
    Discount, DiscountFilter, DiscountPatch, DiscountPayload, NewDiscount,
};
use channel_shared::api::{DeleteResponse, ListParams};

use super::{ApiResult, ClientIp, choice, list_query};
use crate::AppState;

const MODULE: &str = "Discounts";

pub async fn list_discounts(
    State(state): State<AppState>,
    params: Result<QueryParams<ListParams>, QueryRejection>,
) -> ApiResult<Json<Page<Discount>>> {
    let QueryParams(params) = params?;
    let mut query = list_query::<DiscountFilter>(&params)?;
    query.fields.status = choice(params.status.as_deref())?;
    query.fields.applicable_for = choice(params.applicable_for.as_deref())?;

    let page = state
        .repos
        .discounts
        .list(&query, params.page(), params.limit())
        .await?;
    Ok(Json(page))
}

pub async fn get_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Discount>> {
    Ok(Json(state.repos.discounts.get_by_id(&id).await?))
}

pub async fn create_discount(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    payload: Result<Json<DiscountPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Discount>)> {
    let Json(payload) = payload?;
    let input = NewDiscount::try_from(payload)?;
    let discount = state.repos.discounts.create(input).await?;

    state
        .activity
        .log(
            MODULE,
            "Discount Created",
            format!("Created discount code: {}", discount.code),
            &ip,
        )
        .await;
    Ok((StatusCode::CREATED, Json(discount)))
}

pub async fn update_discount(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Path(id): Path<String>,
    patch: Result<Json<DiscountPatch>, JsonRejection>,
) -> ApiResult<Json<Discount>> {
    let Json(patch) = patch?;
    let discount = state.repos.discounts.update(&id, patch).await?;

    state
        .activity
        .log(
            MODULE,
            "Discount Updated",
            format!("Updated discount code: {}", discount.code),
            &ip,
        )
        .await;
    Ok(Json(discount))
}

pub async fn delete_discount(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let removed = state.repos.discounts.delete(&id).await?;

    state
        .activity
        .log(
            MODULE,
            "Discount Deleted",
            format!("Deleted discount code: {}", removed.code),
            &ip,
        )
        .await;
    Ok(Json(DeleteResponse { success: true }))
}

pub async fn toggle_discount(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Path(id): Path<String>,
) -> ApiResult<Json<Discount>> {
    let discount = state.repos.discounts.toggle_enabled(&id).await?;

    let verb = if discount.enabled { "Enabled" } else { "Disabled" };
    state
        .activity
        .log(
            MODULE,
            "Discount Toggled",
            format!("{verb} discount code: {}", discount.code),
            &ip,
        )
        .await;
    Ok(Json(discount))
}
