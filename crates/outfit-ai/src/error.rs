use crate::config::ConfigError;
use crate::recommendation::{RecommendationError, RecommendationServiceError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Parse(serde_json::Error),
    Recommendation(RecommendationServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Parse(err) => write!(f, "invalid json input: {}", err),
            AppError::Recommendation(err) => write!(f, "recommendation error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Parse(err) => Some(err),
            AppError::Recommendation(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Parse(_) => StatusCode::BAD_REQUEST,
            AppError::Recommendation(RecommendationServiceError::UserNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Recommendation(
                RecommendationServiceError::EmptyWardrobe
                | RecommendationServiceError::InvalidProfile(_),
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Recommendation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<RecommendationServiceError> for AppError {
    fn from(value: RecommendationServiceError) -> Self {
        Self::Recommendation(value)
    }
}

impl From<RecommendationError> for AppError {
    fn from(value: RecommendationError) -> Self {
        Self::Recommendation(RecommendationServiceError::Pipeline(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wardrobe::UserId;

    #[test]
    fn maps_service_errors_to_client_statuses() {
        let missing = AppError::from(RecommendationServiceError::UserNotFound(UserId(9)));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let empty = AppError::from(RecommendationServiceError::EmptyWardrobe);
        assert_eq!(
            empty.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn parse_errors_are_bad_requests_with_source() {
        let parse = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        let error = AppError::from(parse);

        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().starts_with("invalid json input"));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
