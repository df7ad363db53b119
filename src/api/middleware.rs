use crate::api::AppState;
use crate::error::{AppError, Result};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

/// Extractor guarding admin-only write endpoints. Expects
/// `Authorization: Bearer <ADMIN_TOKEN>`.
pub struct RequireAdmin;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        if token != state.admin_token {
            return Err(AppError::Forbidden);
        }

        Ok(RequireAdmin)
    }
}
