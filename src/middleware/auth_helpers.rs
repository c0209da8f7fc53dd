//! Authorization helpers used at the start of protected handlers.

use actix_web::HttpRequest;
use log::warn;

use crate::constants::{CODE_FORBIDDEN, CODE_INVALID_TOKEN, ERR_AUTH_REQUIRED};
use crate::errors::ApiError;
use crate::models::Claims;

use super::RequestExt;

/// Extract claims from request or return Unauthorized error.
///
/// # Example
/// ```ignore
/// let claims = require_auth(&req)?;
/// ```
pub fn require_auth(req: &HttpRequest) -> Result<Claims, ApiError> {
    req.get_claims().ok_or_else(|| {
        warn!("Failed to get claims from request");
        ApiError::Unauthorized {
            code: CODE_INVALID_TOKEN.to_string(),
            message: ERR_AUTH_REQUIRED.to_string(),
        }
    })
}

/// Allow the action only on the caller's own account.
pub fn require_self(claims: &Claims, target_user_id: &str, denied_msg: &str) -> Result<(), ApiError> {
    if !claims.is_user(target_user_id) {
        warn!(
            "User {} attempted an owner-only action on user {}",
            claims.sub, target_user_id
        );
        return Err(ApiError::Forbidden {
            code: CODE_FORBIDDEN.to_string(),
            message: denied_msg.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test::TestRequest, HttpMessage};

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "a@x.com".to_string(),
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_require_auth() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            require_auth(&req),
            Err(ApiError::Unauthorized { .. })
        ));

        req.extensions_mut().insert(claims("abc"));
        assert_eq!(require_auth(&req).unwrap().sub, "abc");
    }

    #[test]
    fn test_require_self() {
        assert!(require_self(&claims("abc"), "abc", "no").is_ok());
        assert!(matches!(
            require_self(&claims("abc"), "def", "no"),
            Err(ApiError::Forbidden { ref message, .. }) if message == "no"
        ));
    }
}
