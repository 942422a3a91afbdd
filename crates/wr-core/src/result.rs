//! Result type aliases and the service result pattern

use crate::error::{ValidationErrors, WrError};

/// Standard Result type for Work Radar operations
pub type WrResult<T> = Result<T, WrError>;

/// Outcome of a service-layer operation.
///
/// Services validate input through contracts and either produce a value or
/// a set of validation errors; callers inspect which it was instead of
/// matching on error variants.
#[derive(Debug)]
pub struct ServiceResult<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// The result value (if successful)
    pub result: Option<T>,
    /// Errors (if failed)
    pub errors: ValidationErrors,
}

impl<T> ServiceResult<T> {
    /// Create a successful result
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
        }
    }

    /// Create a failed result with errors
    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }

    /// Create a failed result with a single error message
    pub fn failure_with_message(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        Self::failure(errors)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    /// Get the result value, panicking if not successful
    pub fn unwrap(self) -> T {
        self.result.expect("Called unwrap on a failed ServiceResult")
    }

    /// Borrow the result value
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Borrow the errors
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Map the result value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ServiceResult<U> {
        ServiceResult {
            success: self.success,
            result: self.result.map(f),
            errors: self.errors,
        }
    }

    /// Chain another service call
    pub fn and_then<U, F: FnOnce(T) -> ServiceResult<U>>(self, f: F) -> ServiceResult<U> {
        if self.success {
            if let Some(result) = self.result {
                return f(result);
            }
        }
        ServiceResult {
            success: false,
            result: None,
            errors: self.errors,
        }
    }

    /// Convert to standard Result
    pub fn into_result(self) -> WrResult<T> {
        if self.success {
            self.result.ok_or_else(|| {
                WrError::Internal("ServiceResult success but no result value".into())
            })
        } else {
            Err(WrError::Validation(self.errors))
        }
    }
}

impl<T> From<WrResult<T>> for ServiceResult<T> {
    fn from(result: WrResult<T>) -> Self {
        match result {
            Ok(value) => ServiceResult::success(value),
            Err(WrError::Validation(errors)) => ServiceResult::failure(errors),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}

impl<T> From<ServiceResult<T>> for WrResult<T> {
    fn from(result: ServiceResult<T>) -> Self {
        result.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_chaining() {
        let result = ServiceResult::success(2).and_then(|v| ServiceResult::success(v * 10));
        assert!(result.is_success());
        assert_eq!(result.unwrap(), 20);
    }

    #[test]
    fn test_failure_short_circuits() {
        let result: ServiceResult<i32> =
            ServiceResult::<i32>::failure_with_message("nope").and_then(ServiceResult::success);
        assert!(result.is_failure());
        assert_eq!(result.errors().base_errors, vec!["nope".to_string()]);
    }
}
