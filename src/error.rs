use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use validator::ValidationErrors;

use crate::infrastructure::store::StoreError;

/// Serializable error description attached to per-item batch results.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidFormat { message: String, details: Value },
    #[error("{message}")]
    Collision { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    StorageFailure { message: String, details: Value },
}

impl AppError {
    pub fn invalid_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidFormat {
            message: message.into(),
            details,
        }
    }
    pub fn collision(message: impl Into<String>, details: Value) -> Self {
        Self::Collision {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn storage_failure(message: impl Into<String>, details: Value) -> Self {
        Self::StorageFailure {
            message: message.into(),
            details,
        }
    }

    /// Stable identifier of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidFormat { .. } => "invalid_format",
            AppError::Collision { .. } => "collision",
            AppError::NotFound { .. } => "not_found",
            AppError::StorageFailure { .. } => "storage_failure",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::InvalidFormat { details, .. }
            | AppError::Collision { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::StorageFailure { details, .. } => details,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::storage_failure("Storage error", json!({ "reason": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Validation failed".to_string());

        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);

        AppError::invalid_format(message, details)
    }
}
