use crate::config::ConfigError;
use crate::deadlines::domain::InvalidDateError;
use crate::records::ImportError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("données de date invalides: {0}")]
    InvalidDate(#[from] InvalidDateError),
    #[error("import error: {0}")]
    Import(ImportError),
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        match value {
            ImportError::Date(err) => Self::InvalidDate(err),
            other => Self::Import(other),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidDate(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn invalid_dates_map_to_unprocessable_entity() {
        let error = AppError::from(InvalidDateError::OutOfRange {
            field: "due_date",
            date: NaiveDate::from_ymd_opt(1, 1, 1).expect("valid date"),
        });
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(error.to_string().starts_with("données de date invalides"));
    }

    #[test]
    fn import_date_errors_are_reported_as_invalid_dates() {
        let error = AppError::from(ImportError::Date(InvalidDateError::Unparsable {
            field: "due_date",
            value: "hier".to_string(),
        }));
        assert!(matches!(error, AppError::InvalidDate(_)));

        let error = AppError::from(ImportError::UnknownKind("audit".to_string()));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }
}
