//! Throttled password verification shared by every flow that checks a password.
//!
//! Callers supply the credential lookup as a closure so the guard can skip it
//! entirely for a locked-out identity. When the lookup finds nothing, the
//! submitted password is still compared against a filler hash of the same cost
//! as real hashes, so response timing does not reveal which emails exist.

use log::{debug, warn};
use std::future::Future;
use std::sync::Arc;

use crate::constants::DUMMY_PASSWORD_FILLER;
use crate::errors::ApiError;
use crate::models::User;
use crate::services::auth_service::verify_password;
use crate::services::LoginThrottle;
use crate::utils::mask_email;

/// Outcome of [`CredentialGuard::verify`].
#[derive(Debug)]
pub enum CredentialCheck {
    /// The identity is locked out and the lookup was not run.
    Locked,
    /// No account or wrong password. The failure has been recorded.
    Rejected {
        failed_count: u32,
        remaining_attempts: u32,
    },
    /// Password matched; the failure record has been cleared.
    Verified { user: User },
}

#[derive(Clone)]
pub struct CredentialGuard {
    throttle: LoginThrottle,
    dummy_hash: Arc<str>,
}

impl CredentialGuard {
    /// Create a guard whose filler hash uses `hash_cost` bcrypt rounds.
    pub fn new(throttle: LoginThrottle, hash_cost: u32) -> Result<Self, ApiError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD_FILLER, hash_cost)?;
        Ok(Self {
            throttle,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    pub fn throttle(&self) -> &LoginThrottle {
        &self.throttle
    }

    /// Check `password` for `identity`, consulting and updating the throttle.
    pub async fn verify<F, Fut>(
        &self,
        identity: &str,
        password: &str,
        lookup: F,
    ) -> Result<CredentialCheck, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<User>, ApiError>>,
    {
        let Some(permit) = self.throttle.try_reserve(identity) else {
            warn!(
                "Rejected attempt for locked identity {}",
                mask_email(identity)
            );
            return Ok(CredentialCheck::Locked);
        };
        debug!(
            "Checking password for {} ({} prior failures)",
            mask_email(identity),
            permit.prior_failures()
        );

        // An early return drops the permit, which frees the slot uncounted.
        let user = lookup().await?;
        let hash = user
            .as_ref()
            .map(|user| user.password_hash.as_str())
            .unwrap_or(&*self.dummy_hash);
        let matched = verify_password(password, hash)?;

        match user {
            Some(user) if matched => {
                permit.succeed();
                Ok(CredentialCheck::Verified { user })
            }
            _ => {
                let failed_count = permit.fail();
                Ok(CredentialCheck::Rejected {
                    failed_count,
                    remaining_attempts: self.throttle.remaining_attempts(failed_count),
                })
            }
        }
    }

    /// Spend one comparison against the filler hash.
    ///
    /// For call sites that must fail before they know which identity to
    /// throttle, so the failure costs the same as a real comparison.
    pub fn burn_dummy(&self, password: &str) -> Result<(), ApiError> {
        verify_password(password, &self.dummy_hash)?;
        Ok(())
    }
}
