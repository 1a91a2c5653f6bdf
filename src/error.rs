//! Error types for the message board

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::types::MessageId;

/// Result type alias for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Main error type for the message board
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Message with id {0} not found")]
    NotFound(MessageId),

    #[error("Message with id {0} not found")]
    UnknownId(String),

    #[error("Service '{0}' not found")]
    UnknownService(String),

    #[error("Method '{0}' not allowed")]
    MethodNotAllowed(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Wire representation of an error, shared by REST and the socket protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
    pub code: u16,
    pub class_name: String,
}

impl BoardError {
    /// HTTP status for this error kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::NotFound(_) | BoardError::UnknownId(_) | BoardError::UnknownService(_) => {
                StatusCode::NOT_FOUND
            }
            BoardError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            BoardError::BadRequest(_) => StatusCode::BAD_REQUEST,
            BoardError::Serialization(_) | BoardError::Io(_) | BoardError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Error name as reported to clients
    pub fn name(&self) -> &'static str {
        match self.status_code() {
            StatusCode::NOT_FOUND => "NotFound",
            StatusCode::METHOD_NOT_ALLOWED => "MethodNotAllowed",
            StatusCode::BAD_REQUEST => "BadRequest",
            _ => "GeneralError",
        }
    }

    /// Kebab-case class name as reported to clients
    pub fn class_name(&self) -> &'static str {
        match self.status_code() {
            StatusCode::NOT_FOUND => "not-found",
            StatusCode::METHOD_NOT_ALLOWED => "method-not-allowed",
            StatusCode::BAD_REQUEST => "bad-request",
            _ => "general-error",
        }
    }

    /// Build the client-facing error body.
    ///
    /// Server errors never expose internal details.
    pub fn body(&self) -> ErrorBody {
        let status = self.status_code();
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        ErrorBody {
            name: self.name().to_string(),
            message,
            code: status.as_u16(),
            class_name: self.class_name().to_string(),
        }
    }

    /// Log this error at a level matching its severity
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Server error occurred");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Client error occurred");
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_body() {
        let body = BoardError::NotFound(7).body();
        assert_eq!(body.name, "NotFound");
        assert_eq!(body.code, 404);
        assert_eq!(body.class_name, "not-found");
        assert_eq!(body.message, "Message with id 7 not found");
    }

    #[test]
    fn test_status_table() {
        assert_eq!(
            BoardError::UnknownId("abc".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BoardError::MethodNotAllowed("frob".into()).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            BoardError::BadRequest("nope".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BoardError::Config("bad".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = BoardError::Config("secret path /etc/board".into());
        let body = err.body();
        assert_eq!(body.message, "Internal server error");
        assert_eq!(body.name, "GeneralError");
        assert_eq!(body.code, 500);
    }

    #[test]
    fn test_body_serializes_camel_case() {
        let json = serde_json::to_value(BoardError::NotFound(1).body()).unwrap();
        assert_eq!(json["className"], "not-found");
        assert!(json.get("class_name").is_none());
    }
}
