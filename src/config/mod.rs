use std::env;
use std::time::Duration;

use lazy_static::lazy_static;

use crate::constants::{DEFAULT_LOCKOUT_MINUTES, DEFAULT_MAX_LOGIN_ATTEMPTS};

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
    pub login_max_attempts: u32,
    pub login_lockout_minutes: u64,
    pub throttle_purge_seconds: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a valid number"),
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "storefront".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-super-secret-jwt-key-change-in-production".to_string()),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a valid number"),
            bcrypt_cost: env::var("BCRYPT_COST")
                .map(|v| v.parse().expect("BCRYPT_COST must be a valid number"))
                .unwrap_or(bcrypt::DEFAULT_COST),
            login_max_attempts: env::var("LOGIN_MAX_ATTEMPTS")
                .map(|v| v.parse().expect("LOGIN_MAX_ATTEMPTS must be a valid number"))
                .unwrap_or(DEFAULT_MAX_LOGIN_ATTEMPTS),
            login_lockout_minutes: env::var("LOGIN_LOCKOUT_MINUTES")
                .map(|v| {
                    v.parse()
                        .expect("LOGIN_LOCKOUT_MINUTES must be a valid number")
                })
                .unwrap_or(DEFAULT_LOCKOUT_MINUTES),
            throttle_purge_seconds: env::var("THROTTLE_PURGE_SECONDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("THROTTLE_PURGE_SECONDS must be a valid number"),
        }
    }

    /// How long a run of failed logins is remembered after the last failure.
    pub fn lockout_window(&self) -> Duration {
        Duration::from_secs(self.login_lockout_minutes * 60)
    }
}
