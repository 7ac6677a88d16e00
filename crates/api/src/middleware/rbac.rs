//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the requirement. The role enum is matched exhaustively so a new
//! role cannot silently slip past an authorization check.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use innovatehub_core::error::CoreError;
use innovatehub_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Admin => Ok(RequireAdmin(user)),
            Role::Author | Role::Evaluator => Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            ))),
        }
    }
}

/// Requires `author` or `admin` (admins may act on behalf of authors).
pub struct RequireAuthor(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuthor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Author | Role::Admin => Ok(RequireAuthor(user)),
            Role::Evaluator => Err(AppError::Core(CoreError::Forbidden(
                "Author or Admin role required".into(),
            ))),
        }
    }
}

/// Requires exactly the `evaluator` role. Admins cannot record evaluations.
pub struct RequireEvaluator(pub AuthUser);

impl FromRequestParts<AppState> for RequireEvaluator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        match user.role {
            Role::Evaluator => Ok(RequireEvaluator(user)),
            Role::Author | Role::Admin => Err(AppError::Core(CoreError::Forbidden(
                "Evaluator role required".into(),
            ))),
        }
    }
}
