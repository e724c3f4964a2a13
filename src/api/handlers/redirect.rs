//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::domain::entities::is_valid_code;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /s/{code}`
///
/// # Request Flow
///
/// 1. Reject codes outside `[A-Z2-7]{4,6}` without a storage lookup
/// 2. Resolve the code through [`crate::application::services::RedirectResolver`]
/// 3. Return `302 Found` with the stored URL in `Location`
///
/// # Errors
///
/// - 404 if the code is unknown or expired
/// - 500 if the stored record cannot be decoded or storage fails
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if !is_valid_code(&code) {
        return Err(AppError::NotFound { code });
    }

    let target = state.redirect_resolver.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]).into_response())
}
