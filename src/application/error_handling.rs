// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Not found, forbidden and extraction failures get their own categories
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::domain::UnrecognizedHeroes;
use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// No such match series
    NotFound,

    /// Missing or wrong edit key
    PermissionDenied,

    /// Invalid input or domain rule violation
    Validation,

    /// A replay could not be turned into heroes
    Extraction,

    /// Database/persistence error
    Database,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::not_found("Match series"),

            // Says nothing about why the key was refused
            AppError::PermissionDenied => Self {
                success: false,
                error_type: ErrorType::PermissionDenied,
                message: AppError::PermissionDenied.to_string(),
                details: None,
            },

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::Validation,
                message: "Domain validation failed".to_string(),
                details: Some(domain_error.to_string()),
            },

            AppError::Extraction(message) => Self {
                success: false,
                error_type: ErrorType::Extraction,
                message,
                details: None,
            },

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::database("Database operation failed")
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::database("Database connection failed")
            }

            AppError::Catalog(catalog_error) => {
                log::error!("Hero catalog error: {}", catalog_error);
                Self::internal("Hero catalog is unavailable".to_string())
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::internal("Data serialization failed".to_string())
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::internal("File system operation failed".to_string())
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::internal(message)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::NotFound,
            message: format!("{} not found", resource),
            details: None,
        }
    }

    fn database(message: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Database,
            message: message.to_string(),
            details: Some("Check logs for details".to_string()),
        }
    }

    fn internal(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Internal,
            message,
            details: None,
        }
    }

    /// Serialized form handed to the UI
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl From<UnrecognizedHeroes> for ErrorResponse {
    fn from(error: UnrecognizedHeroes) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message: "Some of the hero names could not be recognized".to_string(),
            details: Some(error.names.join(", ")),
        }
    }
}

/// Helper trait to convert Results to serialized ErrorResponses
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T, E> ToErrorResponse<T> for Result<T, E>
where
    E: Into<ErrorResponse>,
{
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let response: ErrorResponse = e.into();
            response.to_json()
        })
    }
}
