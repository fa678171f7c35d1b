//! Phone-number identity cross-check.

use tracing::warn;

use crate::outcome::IdentityOutcome;

/// Strips whitespace, hyphens, and parentheses from a phone number.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// Compares a caller-supplied phone number against the number on file.
///
/// A missing or blank `supplied` value skips the check. A missing record
/// phone never matches a supplied one.
#[must_use]
pub fn check_identity(record_phone: Option<&str>, supplied: Option<&str>) -> IdentityOutcome {
    let Some(supplied) = supplied.filter(|phone| !phone.trim().is_empty()) else {
        return IdentityOutcome::Skipped;
    };

    if normalize_phone(record_phone.unwrap_or_default()) == normalize_phone(supplied) {
        IdentityOutcome::Pass
    } else {
        warn!("supplied phone number does not match the number on file");
        IdentityOutcome::Fail
    }
}
