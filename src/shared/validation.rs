//! Validation Utilities

use validator::{Validate, ValidationErrors};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError.
///
/// Fields are reported in name order so the message is stable.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    let message = field_errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}

/// Validate a request body, mapping failures to `AppError::Validation`.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(validation_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Body {
        #[validate(length(min = 1, message = "must not be empty"))]
        alpha: String,
        #[validate(length(min = 1, message = "must not be empty"))]
        beta: String,
    }

    #[test]
    fn test_first_field_in_name_order() {
        let body = Body {
            alpha: String::new(),
            beta: String::new(),
        };
        match validate_body(&body) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "alpha: must not be empty"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_valid_body_passes() {
        let body = Body {
            alpha: "a".into(),
            beta: "b".into(),
        };
        assert!(validate_body(&body).is_ok());
    }
}
