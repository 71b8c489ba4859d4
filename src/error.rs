use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::models::ApiError;
use crate::services::VerificationError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Verification failed: {0}")]
    Verification(#[from] VerificationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Notification error: {0}")]
    NotificationError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    fn parts(&self) -> (actix_web::http::StatusCode, &'static str, String) {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Verification(err) => {
                log::warn!("OTP verification rejected: {err}");
                let code = match err {
                    VerificationError::NotFound => "OTP_NOT_FOUND",
                    VerificationError::Expired => "OTP_EXPIRED",
                    VerificationError::Mismatch => "OTP_MISMATCH",
                };
                (StatusCode::BAD_REQUEST, code, err.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Conflict(msg) => {
                log::warn!("Conflict: {msg}");
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::NotificationError(msg) => {
                log::error!("Notification error: {msg}");
                (StatusCode::BAD_GATEWAY, "NOTIFICATION_ERROR", msg.clone())
            }
            AppError::ExternalApiError(msg) => {
                log::error!("External API error: {msg}");
                (StatusCode::BAD_GATEWAY, "EXTERNAL_API_ERROR", msg.clone())
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, code, message) = self.parts();

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": ApiError {
                code: code.to_string(),
                message,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn verification_errors_map_to_distinct_codes() {
        let cases = [
            (VerificationError::NotFound, "OTP_NOT_FOUND"),
            (VerificationError::Expired, "OTP_EXPIRED"),
            (VerificationError::Mismatch, "OTP_MISMATCH"),
        ];
        for (err, expected) in cases {
            let (status, code, _) = AppError::from(err).parts();
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(code, expected);
        }
    }

    #[test]
    fn database_errors_hide_details() {
        let err = AppError::from(sea_orm::DbErr::Custom("relation leads does not exist".into()));
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "DATABASE_ERROR");
        assert_eq!(message, "Database error");
    }

    #[test]
    fn notification_errors_are_bad_gateway() {
        let err = AppError::NotificationError("brevo down".into());
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
