//! JWT Authentication middleware for protected routes.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::debug;
use std::rc::Rc;

use crate::config::CONFIG;
use crate::constants::{CODE_INVALID_TOKEN, ERR_INVALID_AUTH_HEADER, ERR_INVALID_TOKEN};
use crate::errors::ApiError;
use crate::services::auth_service::decode_token;

/// JWT Authentication middleware.
///
/// Validates the bearer token from the Authorization header and adds the
/// decoded claims to the request extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok());

            let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
                Some(token) if !token.trim().is_empty() => token.trim(),
                _ => {
                    return Err(ApiError::Unauthorized {
                        code: CODE_INVALID_TOKEN.to_string(),
                        message: ERR_INVALID_AUTH_HEADER.to_string(),
                    }
                    .into());
                }
            };

            let claims = decode_token(token, &CONFIG.jwt_secret).map_err(|e| {
                debug!("Rejected bearer token: {}", e);
                ApiError::Unauthorized {
                    code: CODE_INVALID_TOKEN.to_string(),
                    message: ERR_INVALID_TOKEN.to_string(),
                }
            })?;

            req.extensions_mut().insert(claims);

            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::RequestExt;
    use crate::services::auth_service::generate_token;
    use actix_web::{http::StatusCode, test, web, App, HttpRequest, HttpResponse};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match req.get_claims() {
            Some(claims) => HttpResponse::Ok().body(claims.sub),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn test_missing_header_rejected() {
        let app = test::init_service(
            App::new().service(web::resource("/me").wrap(AuthMiddleware).to(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_bad_token_rejected() {
        let app = test::init_service(
            App::new().service(web::resource("/me").wrap(AuthMiddleware).to(whoami)),
        )
        .await;

        let forged = generate_token("507f1f77bcf86cd799439011", "a@x.com", "other").unwrap();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", forged)))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_valid_token_exposes_claims() {
        let app = test::init_service(
            App::new().service(web::resource("/me").wrap(AuthMiddleware).to(whoami)),
        )
        .await;

        let token =
            generate_token("507f1f77bcf86cd799439011", "a@x.com", &CONFIG.jwt_secret).unwrap();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(body, "507f1f77bcf86cd799439011");
    }
}
