//! Base contract system

use wr_core::error::ValidationErrors;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;

    /// Check if an attribute is writable
    fn is_writable(&self, _attribute: &str) -> bool {
        true
    }
}

/// Fold `validator::Validate` derive errors into a `ValidationErrors`
pub fn merge_field_validations(
    errors: &mut ValidationErrors,
    result: Result<(), validator::ValidationErrors>,
) {
    if let Err(field_errors) = result {
        for (field, messages) in field_errors.field_errors() {
            for message in messages {
                let text = message
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("is invalid ({})", message.code));
                errors.add(field.to_string(), text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_merge_field_validations() {
        let mut errors = ValidationErrors::new();
        let named = Named { name: String::new() };
        merge_field_validations(&mut errors, named.validate());
        assert!(errors.has_error("name"));
    }

    #[test]
    fn test_merge_keeps_ok_empty() {
        let mut errors = ValidationErrors::new();
        let named = Named { name: "x".into() };
        merge_field_validations(&mut errors, named.validate());
        assert!(errors.is_empty());
    }
}
