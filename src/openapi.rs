use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::errors::ErrorResponse;
use crate::models::{
    ChangePasswordRequest, CreateProductRequest, CreateUserRequest, HealthResponse,
    LoginFailureResponse, LoginRequest, LoginResponse, MessageResponse, ProductPage,
    ProductResponse, UpdateProductRequest, UpdateUserRequest, UserPage, UserResponse,
};

/// OpenAPI documentation for the Storefront API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "REST API for a product catalog and its user accounts, with throttled login.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Authentication", description = "Login with per-email attempt throttling"),
        (name = "Users", description = "User accounts and password changes"),
        (name = "Products", description = "Product catalog")
    ),
    paths(
        crate::routes::health_check,
        crate::handlers::login,
        crate::handlers::create_user,
        crate::handlers::get_users,
        crate::handlers::get_user,
        crate::handlers::update_user,
        crate::handlers::delete_user,
        crate::handlers::change_password,
        crate::handlers::get_products,
        crate::handlers::get_product,
        crate::handlers::create_product,
        crate::handlers::update_product,
        crate::handlers::delete_product
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            LoginFailureResponse,
            CreateUserRequest,
            UpdateUserRequest,
            ChangePasswordRequest,
            UserResponse,
            UserPage,
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            ProductPage,
            ErrorResponse,
            MessageResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security configuration for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "JWT token obtained from the /api/authentication/login endpoint",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for path in [
            "/api/health",
            "/api/authentication/login",
            "/api/users",
            "/api/users/{id}",
            "/api/users/{id}/change-password",
            "/api/products",
            "/api/products/{id}",
        ] {
            assert!(paths.contains(&path), "missing {}", path);
        }
    }
}
