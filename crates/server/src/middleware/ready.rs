use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use crate::error::AppError;
use crate::AppState;

/// Extractor that admits a request only while the backend session is ready.
pub struct Ready;

impl FromRequestParts<Arc<AppState>> for Ready {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if state.session.read().await.is_ready {
            Ok(Ready)
        } else {
            Err(AppError::NotReady)
        }
    }
}
