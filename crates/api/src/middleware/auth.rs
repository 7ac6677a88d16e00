//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use innovatehub_core::error::CoreError;
use innovatehub_core::roles::Role;
use innovatehub_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Every failure mode -- missing header, malformed value, expired token,
/// bad signature -- produces the same Unauthorized response, so a caller
/// cannot distinguish "expired" from "forged".
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The caller's role, parsed into the closed enum.
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized =
            || AppError::Core(CoreError::Unauthorized("Invalid or missing credentials".into()));

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(unauthorized)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| unauthorized())?;

        let role: Role = claims.role.parse().map_err(|_| unauthorized())?;

        Ok(AuthUser {
            user_id: claims.sub,
            role,
        })
    }
}
