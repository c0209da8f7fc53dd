//! Common validation utilities and helpers.

use mongodb::bson::oid::ObjectId;
use validator::ValidationErrors;

use crate::constants::{
    CODE_INVALID_ID, CODE_PASSWORD_MISMATCH, CODE_VALIDATION_FAILED, ERR_INVALID_ID,
    ERR_PASSWORD_MISMATCH,
};
use crate::errors::ApiError;

/// Convert validator errors to ApiError::ValidationError.
///
/// Messages are sorted so the response does not depend on hash map order.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut errors: Vec<String> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    errors.sort();
    ApiError::ValidationError {
        code: CODE_VALIDATION_FAILED.to_string(),
        errors,
    }
}

/// Validate that password confirmation matches the new password.
pub fn validate_password_match(new_password: &str, confirm_password: &str) -> Result<(), ApiError> {
    if new_password != confirm_password {
        return Err(ApiError::BadRequest {
            code: CODE_PASSWORD_MISMATCH.to_string(),
            message: ERR_PASSWORD_MISMATCH.to_string(),
        });
    }
    Ok(())
}

/// Parse a path id as a MongoDB ObjectId.
pub fn parse_object_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::BadRequest {
        code: CODE_INVALID_ID.to_string(),
        message: ERR_INVALID_ID.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "Name too short"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_validation_errors_collected() {
        let sample = Sample {
            name: "a".to_string(),
            email: "nope".to_string(),
        };
        match validation_errors_to_api_error(sample.validate().unwrap_err()) {
            ApiError::ValidationError { code, errors } => {
                assert_eq!(code, "VALIDATION_FAILED");
                assert_eq!(errors, vec!["Name too short", "email is invalid"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_password_match() {
        assert!(validate_password_match("secret1", "secret1").is_ok());
        assert!(matches!(
            validate_password_match("secret1", "secret2"),
            Err(ApiError::BadRequest { ref code, .. }) if code == "PASSWORD_MISMATCH"
        ));
    }

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("507f1f77bcf86cd799439011").is_ok());
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(ApiError::BadRequest { ref code, .. }) if code == "INVALID_ID"
        ));
    }
}
