//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{RedirectResolver, ShortenService};
use crate::domain::clock::Clock;
use crate::domain::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub redirect_resolver: Arc<RedirectResolver>,
    pub storage: Arc<dyn Storage>,
    /// Fixed origin for short URLs; overrides the per-request origin when set.
    pub public_origin: Option<String>,
    /// Trust `X-Forwarded-*` headers when deriving the request origin.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires both services to the same storage backend and clock.
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shorten_service: Arc::new(ShortenService::new(storage.clone(), clock.clone())),
            redirect_resolver: Arc::new(RedirectResolver::new(storage.clone(), clock)),
            storage,
            public_origin: None,
            behind_proxy: false,
        }
    }

    pub fn with_public_origin(mut self, public_origin: Option<String>) -> Self {
        self.public_origin = public_origin.map(|o| o.trim_end_matches('/').to_string());
        self
    }

    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }
}
