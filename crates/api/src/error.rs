use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use innovatehub_core::error::CoreError;
use innovatehub_db::repositories::AdmissionError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the shape `{ "error": <message>, "code": <KIND> }`, with a `details`
/// array of per-field messages for validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `innovatehub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A request failed field validation; one message per offending field.
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<AdmissionError> for AppError {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::Domain(core) => AppError::Core(core),
            AdmissionError::Db(db) => AppError::Database(db),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: invalid value"),
                })
            })
            .collect();
        details.sort();
        AppError::Validation(details)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => {
                let (status, code) = classify_core_error(core);
                if matches!(core, CoreError::Internal(_)) {
                    tracing::error!(error = %core, "Internal core error");
                    (status, code, "An internal error occurred".to_string())
                } else {
                    (status, code, core.to_string())
                }
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Field validation errors ---
            AppError::Validation(details) => {
                let body = json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "details": details,
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error to its HTTP status and stable error code.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str) {
    match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        CoreError::InvalidAuthors(_) => (StatusCode::BAD_REQUEST, "INVALID_AUTHORS"),
        CoreError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
        CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        CoreError::InvalidEvaluator(_) => (StatusCode::NOT_FOUND, "INVALID_EVALUATOR"),
        CoreError::SelfEvaluation { .. } => (StatusCode::BAD_REQUEST, "SELF_EVALUATION"),
        CoreError::DuplicateEvaluation { .. } => (StatusCode::CONFLICT, "DUPLICATE_EVALUATION"),
        CoreError::ProjectFullyEvaluated { .. } => {
            (StatusCode::CONFLICT, "PROJECT_FULLY_EVALUATED")
        }
        CoreError::InvalidScore(_) => (StatusCode::BAD_REQUEST, "INVALID_SCORE"),
        CoreError::InvalidOpinion => (StatusCode::BAD_REQUEST, "INVALID_OPINION"),
        CoreError::ProjectLocked { .. } => (StatusCode::CONFLICT, "PROJECT_LOCKED"),
        CoreError::HasEvaluations { .. } => (StatusCode::CONFLICT, "HAS_EVALUATIONS"),
        CoreError::HasProjects { .. } => (StatusCode::CONFLICT, "HAS_PROJECTS"),
        CoreError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on `uq_`-prefixed constraints map to 409; the
///   evaluation pair constraint keeps its own code so racing duplicate
///   submissions surface as `DUPLICATE_EVALUATION` even when they slip past
///   the pre-insert check.
/// - Foreign-key violations map to 409 (e.g. deleting an evaluator who has
///   recorded evaluations).
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");

            // PostgreSQL unique violation: error code 23505.
            if db_err.code().as_deref() == Some("23505") {
                if constraint == "uq_evaluations_project_evaluator" {
                    return (
                        StatusCode::CONFLICT,
                        "DUPLICATE_EVALUATION",
                        "An evaluation by this evaluator already exists for the project"
                            .to_string(),
                    );
                }
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }

            // PostgreSQL foreign-key violation: error code 23503.
            if db_err.code().as_deref() == Some("23503") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Operation violates reference constraint: {constraint}"),
                );
            }

            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
