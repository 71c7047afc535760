//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::ValidationErrors;

use cinedesk_core::error::{AppError, ErrorKind};

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Error body: `{ success: false, error, details? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
    /// Field-level messages for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// The HTTP status for an error kind.
    pub fn status(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::BadRequest | ErrorKind::Serialization => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Storage
            | ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = Self::status(err.kind);

        let body = if status.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?err.source,
                "Request failed"
            );
            ApiErrorResponse {
                success: false,
                error: "Internal server error".to_string(),
                details: None,
            }
        } else {
            ApiErrorResponse {
                success: false,
                error: err.message,
                details: err.details,
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = Map::new();
        let mut first = None;

        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        for (field, field_errors) in fields {
            let messages: Vec<Value> = field_errors
                .iter()
                .map(|e| {
                    let text = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", camel_case(&field)));
                    Value::String(text)
                })
                .collect();
            if first.is_none() {
                first = messages.first().and_then(|m| m.as_str()).map(String::from);
            }
            details.insert(camel_case(&field), Value::Array(messages));
        }

        let message = first.unwrap_or_else(|| "Validation failed".to_string());
        Self(AppError::validation(message).with_details(Value::Object(details)))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let err = match rejection {
            JsonRejection::JsonDataError(e) => AppError::validation(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => AppError::bad_request(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => AppError::bad_request(e.body_text()),
            other => AppError::bad_request(other.body_text()),
        };
        Self(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AppError::bad_request(rejection.body_text()))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self(AppError::bad_request(format!("Multipart error: {}", err.body_text())))
    }
}

/// `display_name` -> `displayName`, so details match the request body keys.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "stageName is required"))]
        stage_name: String,
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::status(ErrorKind::Validation), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::status(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(ApiError::status(ErrorKind::Serialization), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::status(ErrorKind::Database),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_errors_use_request_field_names() {
        let errors = Sample {
            stage_name: String::new(),
        }
        .validate()
        .unwrap_err();
        let ApiError(err) = ApiError::from(errors);
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "stageName is required");
        let details = err.details.unwrap();
        assert_eq!(details["stageName"][0], "stageName is required");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("sending_user_id"), "sendingUserId");
        assert_eq!(camel_case("title"), "title");
    }
}
