//! Per-identity login throttle.
//!
//! This module keeps an in-memory table of consecutive failed login attempts
//! keyed by email. Once an identity reaches the configured threshold, further
//! attempts are refused without touching the credential store until either a
//! successful login clears the record or the lockout window elapses since the
//! last failure.
//!
//! The table lives only in this process. Each server instance enforces its own
//! threshold, so running several instances behind a load balancer multiplies
//! the effective number of guesses an attacker gets.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::CONFIG;
use crate::utils::mask_email;

/// Failed-attempt bookkeeping for one identity.
#[derive(Debug, Clone)]
struct AttemptRecord {
    failed_count: u32,
    /// Attempts admitted by [`LoginThrottle::try_reserve`] and not yet settled.
    in_flight: u32,
    last_failure_at: Instant,
}

impl AttemptRecord {
    fn new(now: Instant) -> Self {
        Self {
            failed_count: 0,
            in_flight: 0,
            last_failure_at: now,
        }
    }

    fn failures_expired(&self, window: Duration) -> bool {
        self.last_failure_at.elapsed() > window
    }

    /// Safe to drop: nothing pending and the failures have aged out.
    fn is_stale(&self, window: Duration) -> bool {
        self.in_flight == 0 && self.failures_expired(window)
    }
}

/// Outcome of [`LoginThrottle::check_attempt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptDecision {
    /// The attempt may proceed. Carries the failures recorded so far.
    Allowed { failed_count: u32 },
    /// The identity is locked out.
    Blocked,
}

/// Thread-safe failed-login counter using DashMap for concurrent access.
///
/// Cloning is cheap and every clone shares the same table.
#[derive(Clone)]
pub struct LoginThrottle {
    attempts: Arc<DashMap<String, AttemptRecord>>,
    max_attempts: u32,
    lockout_window: Duration,
}

impl LoginThrottle {
    /// Create a throttle with an explicit threshold and lockout window.
    pub fn new(max_attempts: u32, lockout_window: Duration) -> Self {
        Self {
            attempts: Arc::new(DashMap::new()),
            max_attempts,
            lockout_window,
        }
    }

    /// Create a throttle from `LOGIN_MAX_ATTEMPTS` and `LOGIN_LOCKOUT_MINUTES`.
    pub fn from_config() -> Self {
        Self::new(CONFIG.login_max_attempts, CONFIG.lockout_window())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decide whether a login attempt for `identity` may proceed.
    ///
    /// A record whose last failure is older than the lockout window is
    /// dropped here and the identity starts over.
    pub fn check_attempt(&self, identity: &str) -> AttemptDecision {
        let key = canonical_identity(identity);
        let window = self.lockout_window;

        if self
            .attempts
            .remove_if(&key, |_, record| record.is_stale(window))
            .is_some()
        {
            debug!("Lockout window elapsed for {}", mask_email(&key));
        }

        let failed_count = self
            .attempts
            .get(&key)
            .filter(|record| !record.failures_expired(window))
            .map(|record| record.failed_count)
            .unwrap_or(0);

        if failed_count >= self.max_attempts {
            AttemptDecision::Blocked
        } else {
            AttemptDecision::Allowed { failed_count }
        }
    }

    /// Admit one attempt for `identity`, or `None` if it is locked out.
    ///
    /// Attempts still being verified count against the threshold together
    /// with recorded failures, so concurrent guesses cannot all slip in
    /// before the first of them fails. The returned permit must be settled
    /// with [`AttemptPermit::fail`] or [`AttemptPermit::succeed`]; dropping it
    /// unsettled gives the slot back without counting a failure.
    pub fn try_reserve(&self, identity: &str) -> Option<AttemptPermit> {
        let key = canonical_identity(identity);
        let now = Instant::now();

        let mut record = self
            .attempts
            .entry(key.clone())
            .or_insert_with(|| AttemptRecord::new(now));

        if record.failures_expired(self.lockout_window) {
            record.failed_count = 0;
        }
        if record.failed_count.saturating_add(record.in_flight) >= self.max_attempts {
            return None;
        }
        record.in_flight += 1;
        let prior_failures = record.failed_count;
        drop(record);

        Some(AttemptPermit {
            throttle: self.clone(),
            key,
            prior_failures,
            settled: false,
        })
    }

    /// Record a failed attempt and return the new consecutive failure count.
    ///
    /// Settles one pending attempt for the identity, if there is one.
    pub fn record_failure(&self, identity: &str) -> u32 {
        let key = canonical_identity(identity);
        let now = Instant::now();

        // The entry guard holds the shard lock across read-increment-write.
        let mut record = self
            .attempts
            .entry(key.clone())
            .or_insert_with(|| AttemptRecord::new(now));

        record.in_flight = record.in_flight.saturating_sub(1);
        if record.failures_expired(self.lockout_window) {
            record.failed_count = 0;
        }
        record.failed_count += 1;
        record.last_failure_at = now;
        let failed_count = record.failed_count;
        drop(record);

        if failed_count == self.max_attempts {
            info!(
                "Identity {} locked out after {} failed login attempts",
                mask_email(&key),
                failed_count
            );
        } else {
            debug!(
                "Failed login for {}, attempt {} of {}",
                mask_email(&key),
                failed_count,
                self.max_attempts
            );
        }

        failed_count
    }

    /// Clear the failure count for `identity`. A no-op if no record exists.
    ///
    /// Settles one pending attempt; the record is kept while others remain.
    pub fn record_success(&self, identity: &str) {
        if let Entry::Occupied(mut entry) = self.attempts.entry(canonical_identity(identity)) {
            let record = entry.get_mut();
            record.in_flight = record.in_flight.saturating_sub(1);
            if record.in_flight == 0 {
                entry.remove();
            } else {
                record.failed_count = 0;
            }
        }
    }

    /// Give back an unsettled slot.
    fn release(&self, key: String) {
        if let Entry::Occupied(mut entry) = self.attempts.entry(key) {
            let record = entry.get_mut();
            record.in_flight = record.in_flight.saturating_sub(1);
            if record.in_flight == 0 && record.failed_count == 0 {
                entry.remove();
            }
        }
    }

    /// Attempts left before lockout after `failed_count` failures.
    pub fn remaining_attempts(&self, failed_count: u32) -> u32 {
        self.max_attempts.saturating_sub(failed_count)
    }

    /// Message shown to a locked-out client.
    pub fn lockout_message(&self) -> String {
        format!(
            "Too many failed login attempts. Please try again in {} minutes.",
            self.lockout_window.as_secs() / 60
        )
    }

    /// Remove all records whose lockout window has elapsed.
    pub fn purge_expired(&self) -> usize {
        let window = self.lockout_window;
        let before_count = self.attempts.len();

        self.attempts.retain(|_, record| !record.is_stale(window));

        let removed = before_count.saturating_sub(self.attempts.len());
        if removed > 0 {
            info!(
                "Login throttle cleanup: removed {} expired entries, {} remaining",
                removed,
                self.attempts.len()
            );
        }
        removed
    }

    /// Number of identities currently tracked.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}

/// One admitted login attempt, counted against the threshold until settled.
pub struct AttemptPermit {
    throttle: LoginThrottle,
    key: String,
    prior_failures: u32,
    settled: bool,
}

impl AttemptPermit {
    /// Failures recorded for the identity when the attempt was admitted.
    pub fn prior_failures(&self) -> u32 {
        self.prior_failures
    }

    /// Settle as a failure and return the new consecutive failure count.
    pub fn fail(mut self) -> u32 {
        self.settled = true;
        self.throttle.record_failure(&self.key)
    }

    /// Settle as a success, clearing the recorded failures.
    pub fn succeed(mut self) {
        self.settled = true;
        self.throttle.record_success(&self.key);
    }
}

impl Drop for AttemptPermit {
    fn drop(&mut self) {
        if !self.settled {
            self.throttle.release(std::mem::take(&mut self.key));
        }
    }
}

/// Key used for the attempt table: surrounding whitespace removed, lowercased.
pub fn canonical_identity(identity: &str) -> String {
    identity.trim().to_lowercase()
}
