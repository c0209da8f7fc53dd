//! Access to the claims the auth middleware attaches to a request.

use actix_web::HttpMessage;

use crate::models::Claims;

pub trait RequestExt {
    /// The authenticated caller's claims, if the request passed `AuthMiddleware`.
    fn get_claims(&self) -> Option<Claims>;
}

impl RequestExt for actix_web::HttpRequest {
    fn get_claims(&self) -> Option<Claims> {
        self.extensions().get::<Claims>().cloned()
    }
}
