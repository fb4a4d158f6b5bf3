//! Admin API errors

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Admin API operation an error is attributed to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    GetVersion,
    ListRoutes,
    GetRoute,
    AddRoute,
    DeleteRoute,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetVersion => "get version",
            Operation::ListRoutes => "list APIs",
            Operation::GetRoute => "get API",
            Operation::AddRoute => "add API",
            Operation::DeleteRoute => "delete API",
        }
    }

    /// Status code a successful response must carry
    pub fn expected_status(&self) -> StatusCode {
        match self {
            Operation::AddRoute => StatusCode::CREATED,
            Operation::DeleteRoute => StatusCode::NO_CONTENT,
            _ => StatusCode::OK,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Admin API client errors
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("{operation}: Kong Admin API request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: Kong Admin API returned {status}: {body}")]
    UnexpectedStatus {
        operation: Operation,
        status: StatusCode,
        body: String,
    },

    #[error("{operation}: can't marshal object to JSON: {source}")]
    Encode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation}: can't unmarshal JSON returned from Kong Admin API: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation}: invalid API name '{name}'")]
    InvalidRouteName { operation: Operation, name: String },

    #[error("Invalid admin URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl AdminError {
    /// Operation that failed, if the error came from a call
    pub fn operation(&self) -> Option<Operation> {
        match self {
            AdminError::Transport { operation, .. }
            | AdminError::UnexpectedStatus { operation, .. }
            | AdminError::Encode { operation, .. }
            | AdminError::Decode { operation, .. }
            | AdminError::InvalidRouteName { operation, .. } => Some(*operation),
            AdminError::InvalidUrl { .. } | AdminError::HttpClient(_) => None,
        }
    }

    /// Response status for `UnexpectedStatus` errors
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AdminError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Kong answers 409 when a unique field such as `name` is taken
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AdminError::Transport { .. })
    }
}

pub type AdminResult<T> = Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_status() {
        assert_eq!(Operation::GetVersion.expected_status(), StatusCode::OK);
        assert_eq!(Operation::ListRoutes.expected_status(), StatusCode::OK);
        assert_eq!(Operation::AddRoute.expected_status(), StatusCode::CREATED);
        assert_eq!(
            Operation::DeleteRoute.expected_status(),
            StatusCode::NO_CONTENT
        );
    }

    #[test]
    fn test_unexpected_status_message() {
        let err = AdminError::UnexpectedStatus {
            operation: Operation::AddRoute,
            status: StatusCode::CONFLICT,
            body: r#"{"name":"already exists with value 'kong-test-api'"}"#.to_string(),
        };

        let message = err.to_string();
        assert!(message.starts_with("add API: "));
        assert!(message.contains("409 Conflict"));
        assert!(message.contains("already exists"));
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
        assert_eq!(err.operation(), Some(Operation::AddRoute));
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AdminError::Decode {
            operation: Operation::GetRoute,
            source,
        };

        assert!(std::error::Error::source(&err).is_some());
        assert!(err.status().is_none());
        assert!(err.to_string().starts_with("get API: can't unmarshal"));
    }

    #[test]
    fn test_invalid_url_has_no_operation() {
        let err = AdminError::InvalidUrl {
            url: "ftp://kong".to_string(),
            reason: "unsupported scheme".to_string(),
        };
        assert_eq!(err.operation(), None);
    }
}
