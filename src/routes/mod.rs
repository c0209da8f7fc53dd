use actix_web::{web, HttpResponse};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::middleware::AuthMiddleware;
use crate::models::HealthResponse;
use crate::openapi::ApiDoc;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .service(
        web::scope("/api")
            // Health check
            .route("/health", web::get().to(health_check))
            // Login (public, throttled per email)
            .route("/authentication/login", web::post().to(handlers::login))
            // Users: creation is public, everything else needs a token
            .service(
                web::resource("/users")
                    .route(web::post().to(handlers::create_user))
                    .route(web::get().to(handlers::get_users).wrap(AuthMiddleware)),
            )
            .service(
                web::resource("/users/{id}")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(handlers::get_user))
                    .route(web::put().to(handlers::update_user))
                    .route(web::delete().to(handlers::delete_user)),
            )
            .service(
                web::resource("/users/{id}/change-password")
                    .wrap(AuthMiddleware)
                    .route(web::patch().to(handlers::change_password)),
            )
            // Products: reads are public, writes need a token
            .service(
                web::resource("/products")
                    .route(web::get().to(handlers::get_products))
                    .route(web::post().to(handlers::create_product).wrap(AuthMiddleware)),
            )
            .service(
                web::resource("/products/{id}")
                    .route(web::get().to(handlers::get_product))
                    .route(web::put().to(handlers::update_product).wrap(AuthMiddleware))
                    .route(web::delete().to(handlers::delete_product).wrap(AuthMiddleware)),
            ),
    );
}

/// Check that the server is up
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}
