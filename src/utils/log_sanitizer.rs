//! Log sanitization utilities for masking sensitive data.
//!
//! Emails are the throttle key and show up in most authentication log lines,
//! so they are masked before logging to avoid writing PII to the log stream.

/// Mask an email address for safe logging.
///
/// Shows only the first 3 characters (or fewer if the local part is shorter)
/// followed by asterisks and the domain.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_email("user@example.com"), "use***@example.com");
/// assert_eq!(mask_email("ab@test.org"), "ab***@test.org");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local_part, domain)) => format!("{}***@{}", visible_prefix(local_part), domain),
        // Not a valid email format, just mask most of it
        None => format!("{}***", visible_prefix(email)),
    }
}

fn visible_prefix(value: &str) -> String {
    value.chars().take(3).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email_normal() {
        assert_eq!(mask_email("user@example.com"), "use***@example.com");
        assert_eq!(mask_email("johndoe@test.org"), "joh***@test.org");
    }

    #[test]
    fn test_mask_email_short_local_part() {
        assert_eq!(mask_email("ab@test.org"), "ab***@test.org");
        assert_eq!(mask_email("a@test.org"), "a***@test.org");
    }

    #[test]
    fn test_mask_email_invalid() {
        assert_eq!(mask_email("notanemail"), "not***");
        assert_eq!(mask_email(""), "***");
    }

    #[test]
    fn test_mask_email_multibyte() {
        assert_eq!(mask_email("ñándú@test.org"), "ñán***@test.org");
    }
}
