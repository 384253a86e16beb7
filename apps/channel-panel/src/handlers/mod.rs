pub mod agents;
pub mod audit_logs;
pub mod auth;
pub mod branches;
pub mod discounts;
pub mod health;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::str::FromStr;

use axum::{
    Json,
    extract::{
        ConnectInfo, FromRequestParts,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use channel_db::StoreError;
use channel_db::listing::Query;
use channel_db::utils::{DayBound, parse_instant};
use channel_shared::api::{ErrorResponse, ListParams, selected};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Validation(_)) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::InvalidStateTransition { .. }) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match status {
            StatusCode::CONFLICT | StatusCode::UNAUTHORIZED => warn!("Request rejected: {}", self),
            _ => debug!("Request rejected: {}", self),
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Best-effort client address: first `X-Forwarded-For` hop, else the peer.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(Self(
            forwarded.or(peer).unwrap_or_else(|| "unknown".to_string()),
        ))
    }
}

/// Text and date-range parts of a list query. Entity filters are filled in
/// by each handler.
pub fn list_query<F: Default>(params: &ListParams) -> ApiResult<Query<F>> {
    let date_from = params
        .date_from
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_instant(v, DayBound::Start))
        .transpose()?;
    let date_to = params
        .date_to
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_instant(v, DayBound::Through))
        .transpose()?;

    Ok(Query {
        text: params.q.clone(),
        date_from,
        date_to,
        fields: F::default(),
    })
}

/// Parses a categorical filter, ignoring blanks and `All`.
pub fn choice<T>(raw: Option<&str>) -> ApiResult<Option<T>>
where
    T: FromStr<Err = StoreError>,
{
    Ok(selected(raw).map(str::parse).transpose()?)
}
