//! Authentication handler for login.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::errors::ApiError;
use crate::models::{LoginFailureResponse, LoginRequest, LoginResponse};
use crate::services::{AuthService, LoginOutcome};
use crate::validators::validation_errors_to_api_error;

/// Authenticate a user and get a JWT token
///
/// Repeated failures for one email lock that email out for a while. Locked
/// and failed attempts both answer 403 with the number of attempts left.
#[utoipa::path(
    post,
    path = "/api/authentication/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 403, description = "Wrong email or password, or too many attempts", body = LoginFailureResponse)
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    let outcome = auth_service.login(body.into_inner()).await?;
    Ok(login_response(outcome))
}

fn login_response(outcome: LoginOutcome) -> HttpResponse {
    match outcome {
        LoginOutcome::Authenticated(response) => HttpResponse::Ok().json(response),
        LoginOutcome::Locked { message } => HttpResponse::Forbidden().json(LoginFailureResponse {
            error: message,
            remaining_attempts: 0,
        }),
        LoginOutcome::InvalidCredentials { remaining_attempts } => {
            HttpResponse::Forbidden().json(LoginFailureResponse {
                error: crate::constants::ERR_WRONG_EMAIL_OR_PASSWORD.to_string(),
                remaining_attempts,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};

    async fn json_body(resp: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_success_body() {
        let resp = login_response(LoginOutcome::Authenticated(LoginResponse {
            email: "a@x.com".to_string(),
            name: "Ana".to_string(),
            user_id: "507f1f77bcf86cd799439011".to_string(),
            token: "tok".to_string(),
            remaining_attempts: 5,
        }));
        assert_eq!(resp.status(), StatusCode::OK);

        let json = json_body(resp).await;
        assert_eq!(json["user_id"], "507f1f77bcf86cd799439011");
        assert_eq!(json["token"], "tok");
        assert_eq!(json["remainingAttempts"], 5);
    }

    #[actix_web::test]
    async fn test_invalid_credentials_body() {
        let resp = login_response(LoginOutcome::InvalidCredentials {
            remaining_attempts: 3,
        });
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({ "error": "Wrong email or password", "remainingAttempts": 3 })
        );
    }

    #[actix_web::test]
    async fn test_locked_body() {
        let resp = login_response(LoginOutcome::Locked {
            message: "Too many failed login attempts. Please try again in 30 minutes."
                .to_string(),
        });
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let json = json_body(resp).await;
        assert_eq!(json["remainingAttempts"], 0);
        assert_eq!(
            json["error"],
            "Too many failed login attempts. Please try again in 30 minutes."
        );
    }
}
