mod config;
mod constants;
mod errors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod repositories;
mod routes;
mod services;
mod utils;
mod validators;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use mongodb::{bson::doc, Client};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::config::CONFIG;
use crate::repositories::{ProductRepository, UserRepository};
use crate::services::{AuthService, CredentialGuard, LoginThrottle, ProductService, UserService};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&CONFIG.mongodb_uri)
        .await
        .map_err(|e| startup_error("Failed to connect to MongoDB", e))?;

    let db = client.database(&CONFIG.database_name);

    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| startup_error("Failed to ping MongoDB", e))?;
    info!("Connected to MongoDB successfully!");

    let user_repository = Arc::new(UserRepository::new(&db));
    let product_repository = Arc::new(ProductRepository::new(&db));

    user_repository
        .create_indexes()
        .await
        .map_err(|e| startup_error("Failed to create user indexes", e))?;
    product_repository
        .create_indexes()
        .await
        .map_err(|e| startup_error("Failed to create product indexes", e))?;

    // One throttle shared by login and password checks
    let throttle = LoginThrottle::from_config();
    info!(
        "Login throttle: {} attempts, {} minute lockout",
        throttle.max_attempts(),
        CONFIG.login_lockout_minutes
    );
    let guard = CredentialGuard::new(throttle.clone(), CONFIG.bcrypt_cost)
        .map_err(|e| startup_error("Failed to prepare credential guard", e))?;

    // Periodically drop throttle records whose lockout window has elapsed
    let purge_every = Duration::from_secs(CONFIG.throttle_purge_seconds.max(1));
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(purge_every);
        loop {
            interval.tick().await;
            throttle.purge_expired();
        }
    });

    // Initialize services
    let auth_service = web::Data::new(AuthService::new(
        Arc::clone(&user_repository),
        guard.clone(),
    ));
    let user_service = web::Data::new(UserService::new(user_repository, guard));
    let product_service = web::Data::new(ProductService::new(product_repository));

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);
    info!("Swagger UI available at http://{}/swagger-ui/", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(auth_service.clone())
            .app_data(user_service.clone())
            .app_data(product_service.clone())
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
