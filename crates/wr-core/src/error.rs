//! Core error types for Work Radar

use std::collections::HashMap;
use thiserror::Error;

/// Core error type for all Work Radar operations
#[derive(Error, Debug)]
pub enum WrError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Conflict: {message}")]
    Conflict { message: String },
}

/// Validation errors collection
#[derive(Error, Debug, Default, Clone)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: HashMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

/// HTTP status code mapping for errors
impl WrError {
    pub fn status_code(&self) -> u16 {
        match self {
            WrError::NotFound { .. } => 404,
            WrError::Unauthorized { .. } => 401,
            WrError::Forbidden { .. } => 403,
            WrError::Validation(_) => 422,
            WrError::Conflict { .. } => 409,
            WrError::Database(_) | WrError::Internal(_) => 500,
            WrError::Config(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            WrError::NotFound { .. } => "not_found",
            WrError::Unauthorized { .. } => "unauthorized",
            WrError::Forbidden { .. } => "forbidden",
            WrError::Validation(_) => "validation_failed",
            WrError::Database(_) => "database_error",
            WrError::Internal(_) => "internal_error",
            WrError::Config(_) => "configuration_error",
            WrError::Conflict { .. } => "conflict",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_merge() {
        let mut a = ValidationErrors::new();
        a.add("email", "is invalid");

        let mut b = ValidationErrors::new();
        b.add("email", "is taken");
        b.add_base("something went wrong");

        a.merge(b);
        assert_eq!(a.get("email").map(Vec::len), Some(2));
        assert_eq!(a.base_errors.len(), 1);
    }

    #[test]
    fn test_status_codes() {
        let err = WrError::NotFound {
            entity: "Employee",
            field: "id",
            value: "42".into(),
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "not_found");
    }
}
