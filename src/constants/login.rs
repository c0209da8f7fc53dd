//! Login throttling defaults.

/// Failed attempts allowed before an identity is locked out.
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 5;

/// Minutes a run of failures is remembered after the most recent one.
pub const DEFAULT_LOCKOUT_MINUTES: u64 = 30;

/// Plaintext hashed at startup to produce the filler hash compared against
/// when no account exists for the submitted email.
pub const DUMMY_PASSWORD_FILLER: &str = "<RANDOM_PASSWORD_FILLER>";
