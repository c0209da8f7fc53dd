//! Authentication service for login, token handling, and password utilities.

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::config::CONFIG;
use crate::errors::ApiError;
use crate::models::{Claims, LoginRequest, LoginResponse, User};
use crate::repositories::UserRepository;
use crate::services::{CredentialCheck, CredentialGuard};
use crate::utils::mask_email;

/// Result of a login attempt that did not fail on infrastructure.
#[derive(Debug)]
pub enum LoginOutcome {
    Authenticated(LoginResponse),
    /// The email is locked out; the store was not consulted.
    Locked { message: String },
    /// Unknown email or wrong password, deliberately indistinguishable.
    InvalidCredentials { remaining_attempts: u32 },
}

/// Service for authentication operations.
pub struct AuthService {
    repository: Arc<UserRepository>,
    guard: CredentialGuard,
}

impl AuthService {
    pub fn new(repository: Arc<UserRepository>, guard: CredentialGuard) -> Self {
        Self { repository, guard }
    }

    /// Authenticate a user and issue a JWT token.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginOutcome, ApiError> {
        let repository = Arc::clone(&self.repository);
        let email = req.email.clone();
        let check = self
            .guard
            .verify(&req.email, &req.password, move || async move {
                repository.find_by_email(&email).await
            })
            .await?;

        login_outcome(&self.guard, &req.email, check, |user| {
            generate_token(&user.id_hex(), &user.email, &CONFIG.jwt_secret)
        })
    }
}

/// Turn a credential check into the login payload, issuing a token on success.
fn login_outcome<F>(
    guard: &CredentialGuard,
    email: &str,
    check: CredentialCheck,
    issue_token: F,
) -> Result<LoginOutcome, ApiError>
where
    F: FnOnce(&User) -> Result<String, ApiError>,
{
    match check {
        CredentialCheck::Verified { user } => {
            let token = issue_token(&user)?;
            info!("User {} logged in", mask_email(&user.email));
            Ok(LoginOutcome::Authenticated(LoginResponse {
                user_id: user.id_hex(),
                email: user.email,
                name: user.name,
                token,
                remaining_attempts: guard.throttle().max_attempts(),
            }))
        }
        CredentialCheck::Rejected {
            remaining_attempts, ..
        } => {
            warn!(
                "Login failed for {}, {} attempts remaining",
                mask_email(email),
                remaining_attempts
            );
            Ok(LoginOutcome::InvalidCredentials { remaining_attempts })
        }
        CredentialCheck::Locked => Ok(LoginOutcome::Locked {
            message: guard.throttle().lockout_message(),
        }),
    }
}

/// Hash a password using bcrypt.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    Ok(hash(password, CONFIG.bcrypt_cost)?)
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    Ok(verify(password, hash)?)
}

/// Generate a JWT token for a user.
pub fn generate_token(user_id: &str, email: &str, secret: &str) -> Result<String, ApiError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + (CONFIG.jwt_expiration_hours as usize * 3600);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp,
        iat: now,
    };

    debug!("Generated token for user {}", user_id);

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Decode and validate a JWT token.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LoginThrottle;
    use std::time::Duration;

    const SECRET: &str = "test-secret";

    fn guard() -> CredentialGuard {
        CredentialGuard::new(LoginThrottle::new(5, Duration::from_secs(1800)), 4).unwrap()
    }

    #[test]
    fn test_token_round_trip() {
        let token = generate_token("507f1f77bcf86cd799439011", "a@x.com", SECRET).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "507f1f77bcf86cd799439011");
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
        assert!(claims.is_user("507f1f77bcf86cd799439011"));
    }

    #[test]
    fn test_token_with_other_secret_rejected() {
        let token = generate_token("id", "a@x.com", SECRET).unwrap();
        assert!(matches!(
            decode_token(&token, "another-secret"),
            Err(ApiError::Unauthorized { .. })
        ));
        assert!(decode_token("not-a-jwt", SECRET).is_err());
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hashed = bcrypt::hash("secret123", 4).unwrap();
        assert!(verify_password("secret123", &hashed).unwrap());
        assert!(!verify_password("secret124", &hashed).unwrap());
    }

    #[actix_web::test]
    async fn test_successful_login_payload() {
        let guard = guard();
        let user = User::for_test("Ana", "a@x.com", "secret123");
        let user_id = user.id_hex();

        let check = guard
            .verify("a@x.com", "secret123", || async move { Ok(Some(user)) })
            .await
            .unwrap();
        let outcome = login_outcome(&guard, "a@x.com", check, |_| Ok("tok".to_string())).unwrap();

        match outcome {
            LoginOutcome::Authenticated(response) => {
                assert_eq!(response.user_id, user_id);
                assert_eq!(response.name, "Ana");
                assert_eq!(response.token, "tok");
                assert_eq!(response.remaining_attempts, 5);
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_failed_logins_report_remaining_then_lock() {
        let guard = guard();

        for expected in (0..5).rev() {
            let check = guard
                .verify("a@x.com", "wrong", || async { Ok(None) })
                .await
                .unwrap();
            let outcome = login_outcome(&guard, "a@x.com", check, |_| unreachable!()).unwrap();
            assert!(matches!(
                outcome,
                LoginOutcome::InvalidCredentials { remaining_attempts } if remaining_attempts == expected
            ));
        }

        let check = guard
            .verify("a@x.com", "wrong", || async { Ok(None) })
            .await
            .unwrap();
        match login_outcome(&guard, "a@x.com", check, |_| unreachable!()).unwrap() {
            LoginOutcome::Locked { message } => {
                assert_eq!(
                    message,
                    "Too many failed login attempts. Please try again in 30 minutes."
                );
            }
            other => panic!("expected lockout, got {:?}", other),
        }
    }
}
