//! Handlers for the link shortening endpoint.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::api::dto::shorten::{ShortenQuery, ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::request_origin;
use crate::utils::url_validator::UrlValidationError;

/// Creates a short link from a JSON body.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page?x=1" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "K3QF",
///   "url": "https://example.com/page?x=1",
///   "shortUrl": "https://sho.rt/s/K3QF",
///   "expiresAt": "2025-07-30T12:00:00.000Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is missing, not JSON, or the URL is invalid
/// - 503 if no free code could be allocated
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let url = match payload {
        Ok(Json(request)) => request.url,
        Err(rejection) => {
            debug!("Rejected shorten body: {}", rejection);
            None
        }
    };

    create_short_link(&state, &headers, url).await
}

/// Creates a short link from the `u` query parameter.
///
/// # Endpoint
///
/// `GET /api/shorten?u=<url>`
///
/// Same response and errors as [`shorten_handler`].
pub async fn shorten_query_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ShortenQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let url = query.ok().and_then(|Query(q)| q.u);

    create_short_link(&state, &headers, url).await
}

/// CORS preflight for the shorten endpoint.
///
/// # Endpoint
///
/// `OPTIONS /api/shorten`
pub async fn shorten_preflight_handler() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

async fn create_short_link(
    state: &AppState,
    headers: &HeaderMap,
    url: Option<String>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let url = url
        .filter(|u| !u.trim().is_empty())
        .ok_or(AppError::InvalidUrl(UrlValidationError::Missing))?;

    let origin = match &state.public_origin {
        Some(origin) => origin.clone(),
        None => request_origin(headers, state.behind_proxy)?,
    };

    let link = state.shorten_service.shorten(&url, &origin).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}
