//! Typed error handling for the directory service
//!
//! Every failure the query path can produce is one of the variants below,
//! so the transport layer can map it to a status code without inspecting
//! messages.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: a request parameter was rejected (400)
//! - [`StorageError`]: the backing store failed or did not answer in time
//!   (503 when unavailable, 500 otherwise)
//! - [`ConfigError`]: configuration could not be loaded or is inconsistent
//! - `Internal`: an invariant was violated; the detail is logged and never
//!   sent to the caller
//!
//! # Example
//!
//! ```rust,ignore
//! match resolver.resolve(&params).await {
//!     Ok(result) => println!("{} matches", result.total_count),
//!     Err(DirectoryError::Validation(ValidationError::InvalidSortField { value })) => {
//!         println!("cannot sort by {}", value);
//!     }
//!     Err(e) if e.is_store_unavailable() => println!("try again later"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::core::query::SortField;

/// The main error type for the directory service
#[derive(Debug)]
pub enum DirectoryError {
    /// A request parameter was rejected
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Invariant violation (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Validation(e) => write!(f, "{}", e),
            DirectoryError::Storage(e) => write!(f, "{}", e),
            DirectoryError::Config(e) => write!(f, "{}", e),
            DirectoryError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectoryError::Validation(e) => Some(e),
            DirectoryError::Storage(e) => Some(e),
            DirectoryError::Config(e) => Some(e),
            DirectoryError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DirectoryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DirectoryError::Validation(_) => StatusCode::BAD_REQUEST,
            DirectoryError::Storage(e) => e.status_code(),
            DirectoryError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DirectoryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DirectoryError::Validation(_) => "VALIDATION_ERROR",
            DirectoryError::Storage(e) => e.error_code(),
            DirectoryError::Config(_) => "CONFIG_ERROR",
            DirectoryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the store could not be reached or did not answer in time
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, DirectoryError::Storage(e) if e.is_unavailable())
    }

    /// Convert to an error response
    ///
    /// Internal and storage failure details stay in the logs; callers only
    /// see the category.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            DirectoryError::Validation(e) => e.to_string(),
            DirectoryError::Storage(e) if e.is_unavailable() => {
                "The directory store is temporarily unavailable".to_string()
            }
            DirectoryError::Storage(_) | DirectoryError::Config(_) | DirectoryError::Internal(_) => {
                "Internal server error".to_string()
            }
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DirectoryError::Validation(e) => Some(serde_json::json!({
                "parameter": e.parameter(),
                "value": e.value(),
            })),
            _ => None,
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A request parameter that could not be accepted
///
/// Each variant names the offending parameter and carries the raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Page number below 1
    InvalidPage { value: i64 },

    /// Page size outside `[1, max]`
    InvalidPageSize { value: i64, max: u32 },

    /// Sort field outside the whitelist
    InvalidSortField { value: String },

    /// Sort direction that is neither ascending nor descending
    InvalidSortDirection { value: String },

    /// A numeric parameter whose text is not an integer
    NotANumber {
        parameter: &'static str,
        value: String,
    },

    /// The query string itself could not be decoded
    MalformedQuery { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidPage { value } => {
                write!(f, "Invalid page '{}': page must be 1 or greater", value)
            }
            ValidationError::InvalidPageSize { value, max } => {
                write!(
                    f,
                    "Invalid pageSize '{}': pageSize must be between 1 and {}",
                    value, max
                )
            }
            ValidationError::InvalidSortField { value } => {
                let allowed: Vec<&str> = SortField::ALL.iter().map(|s| s.as_str()).collect();
                write!(
                    f,
                    "Invalid sortField '{}': must be one of {}",
                    value,
                    allowed.join(", ")
                )
            }
            ValidationError::InvalidSortDirection { value } => {
                write!(
                    f,
                    "Invalid sortDirection '{}': must be one of asc, ascending, desc, descending (any case)",
                    value
                )
            }
            ValidationError::NotANumber { parameter, value } => {
                write!(f, "Invalid {} '{}': must be an integer", parameter, value)
            }
            ValidationError::MalformedQuery { message } => {
                write!(f, "Malformed query string: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Name of the rejected request parameter
    pub fn parameter(&self) -> &'static str {
        match self {
            ValidationError::InvalidPage { .. } => "page",
            ValidationError::InvalidPageSize { .. } => "pageSize",
            ValidationError::InvalidSortField { .. } => "sortField",
            ValidationError::InvalidSortDirection { .. } => "sortDirection",
            ValidationError::NotANumber { parameter, .. } => parameter,
            ValidationError::MalformedQuery { .. } => "query",
        }
    }

    /// The rejected value as it was received
    pub fn value(&self) -> String {
        match self {
            ValidationError::InvalidPage { value } => value.to_string(),
            ValidationError::InvalidPageSize { value, .. } => value.to_string(),
            ValidationError::InvalidSortField { value } => value.clone(),
            ValidationError::InvalidSortDirection { value } => value.clone(),
            ValidationError::NotANumber { value, .. } => value.clone(),
            ValidationError::MalformedQuery { message } => message.clone(),
        }
    }
}

impl From<ValidationError> for DirectoryError {
    fn from(err: ValidationError) -> Self {
        DirectoryError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend could not be reached
    Unavailable { backend: String, message: String },

    /// The backend did not answer within the configured timeout
    Timeout { backend: String, timeout_ms: u64 },

    /// The backend answered with an error
    QueryFailed { backend: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable { backend, message } => {
                write!(f, "Storage backend '{}' is unavailable: {}", backend, message)
            }
            StorageError::Timeout {
                backend,
                timeout_ms,
            } => {
                write!(
                    f,
                    "Storage backend '{}' did not respond within {}ms",
                    backend, timeout_ms
                )
            }
            StorageError::QueryFailed { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    /// Transient failures the caller may retry
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StorageError::Unavailable { .. } | StorageError::Timeout { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_unavailable() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn error_code(&self) -> &'static str {
        if self.is_unavailable() {
            "STORE_UNAVAILABLE"
        } else {
            "STORAGE_ERROR"
        }
    }
}

impl From<StorageError> for DirectoryError {
    fn from(err: StorageError) -> Self {
        DirectoryError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { path, message } => {
                write!(f, "Failed to read config file '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for DirectoryError {
    fn from(err: ConfigError) -> Self {
        DirectoryError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;
