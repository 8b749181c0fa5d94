//! Validation utilities.

use crate::{FieldError, RosterError};
use validator::ValidationErrors;

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `RosterError`.
#[must_use]
pub fn validation_errors_to_roster_error(errors: &ValidationErrors) -> RosterError {
    let message = field_errors(errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    RosterError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(length(min = 2, message = "name must be at least 2 characters"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_valid_request_passes() {
        let req = Signup {
            name: "Al".to_string(),
            email: "al@example.com".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_field_errors_use_message_or_code() {
        let req = Signup {
            name: "A".to_string(),
            email: "nope".to_string(),
        };
        let errors = req.validate().unwrap_err();
        let fields = field_errors(&errors);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "email");
        assert_eq!(fields[0].message, "email");
        assert_eq!(fields[1].field, "name");
        assert_eq!(fields[1].message, "name must be at least 2 characters");
    }

    #[test]
    fn test_maps_to_validation_error() {
        let req = Signup {
            name: "A".to_string(),
            email: "a@example.com".to_string(),
        };
        match validation_errors_to_roster_error(&req.validate().unwrap_err()) {
            RosterError::Validation(msg) => assert!(msg.contains("name")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}
