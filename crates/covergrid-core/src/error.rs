//! Structured errors for the JSON entry point.
//!
//! Every failure crossing [`crate::ffi::run_json`] becomes a [`CoreError`]
//! with a stable snake_case code.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use covergrid_types::CoverageError;

/// Error codes for covergrid operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Arguments were not valid JSON.
    InvalidJson,
    /// A field had the wrong type or shape.
    InvalidField,
    /// Arguments parsed but describe an invalid query.
    InvalidArgument,
    /// The exact fallback would exceed the enumeration limit.
    BudgetExceeded,
    /// Unknown operation mode.
    UnknownMode,
    /// Internal error (unexpected state).
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidJson => write!(f, "invalid_json"),
            ErrorCode::InvalidField => write!(f, "invalid_field"),
            ErrorCode::InvalidArgument => write!(f, "invalid_argument"),
            ErrorCode::BudgetExceeded => write!(f, "budget_exceeded"),
            ErrorCode::UnknownMode => write!(f, "unknown_mode"),
            ErrorCode::InternalError => write!(f, "internal_error"),
        }
    }
}

/// Structured error for binding-friendly reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreError {
    /// Error code for programmatic handling.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CoreError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn invalid_json(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidJson, format!("Invalid JSON: {}", err))
    }

    /// A field is present but not of the expected shape.
    pub fn invalid_field(field: &str, expected: &str) -> Self {
        Self::with_details(
            ErrorCode::InvalidField,
            format!("Invalid value for '{}'", field),
            format!("expected {}", expected),
        )
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::InvalidField,
            format!("Missing required field '{}'", field),
        )
    }

    pub fn unknown_mode(mode: &str) -> Self {
        Self::new(ErrorCode::UnknownMode, format!("Unknown mode: {}", mode))
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, format!("Internal error: {}", err))
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"code":"{}","message":"{}"}}"#,
                self.code, self.message
            )
        })
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "[{}] {}: {}", self.code, self.message, details)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for CoreError {}

impl From<CoverageError> for CoreError {
    fn from(err: CoverageError) -> Self {
        let code = match err {
            CoverageError::EnumerationBudgetExceeded { .. } => ErrorCode::BudgetExceeded,
            CoverageError::InvalidDimensions { .. }
            | CoverageError::NegativeThreshold(_)
            | CoverageError::GridTooLarge { .. } => ErrorCode::InvalidArgument,
        };
        Self::new(code, err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_json(err)
    }
}

/// The `{"ok": ..., ...}` wrapper around every JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CoreError>,
}

impl ResponseEnvelope {
    pub fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(err: &CoreError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(err.clone()),
        }
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            format!(
                r#"{{"ok":false,"error":{{"code":"internal_error","message":"{}"}}}}"#,
                err
            )
        })
    }
}
