//! API route configuration.

use crate::api::handlers::{shorten_handler, shorten_preflight_handler, shorten_query_handler};
use crate::state::AppState;
use axum::{
    Router,
    http::{HeaderValue, header},
    routing::get,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Public API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST    /shorten`        - Create a short link from a JSON body
/// - `GET     /shorten?u=...`  - Create a short link from a query parameter
/// - `OPTIONS /shorten`        - CORS preflight
///
/// Every response, errors included, allows any origin so browser clients
/// that pass the preflight can read the result.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shorten",
            get(shorten_query_handler)
                .post(shorten_handler)
                .options(shorten_preflight_handler),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}
