//! Outcomes produced by individual checks.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Result of a single rule, ordered by severity: `Accept < Review < Deny`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckOutcome {
    /// The carrier meets the rule threshold.
    Accept,
    /// The carrier needs a closer look or ongoing monitoring.
    Review,
    /// The carrier fails the rule outright.
    Deny,
}

impl CheckOutcome {
    /// Returns the canonical upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "ACCEPT",
            Self::Review => "REVIEW",
            Self::Deny => "DENY",
        }
    }
}

impl Display for CheckOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the phone-number identity cross-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentityOutcome {
    /// The supplied phone matches the number on file.
    Pass,
    /// The supplied phone does not match; verification stops here.
    Fail,
    /// No phone was supplied.
    Skipped,
}

impl IdentityOutcome {
    /// Returns true when the outcome ends verification immediately.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Fail)
    }

    /// Returns the canonical upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skipped => "SKIPPED",
        }
    }
}

impl Display for IdentityOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_are_ordered_by_severity() {
        assert!(CheckOutcome::Accept < CheckOutcome::Review);
        assert!(CheckOutcome::Review < CheckOutcome::Deny);
        assert_eq!(
            [CheckOutcome::Review, CheckOutcome::Deny, CheckOutcome::Accept]
                .into_iter()
                .max(),
            Some(CheckOutcome::Deny)
        );
    }

    #[test]
    fn labels_match_serialized_form() {
        assert_eq!(
            serde_json::to_value(CheckOutcome::Review).unwrap(),
            serde_json::json!("REVIEW")
        );
        assert_eq!(
            serde_json::to_value(IdentityOutcome::Skipped).unwrap(),
            serde_json::json!("SKIPPED")
        );
        assert_eq!(CheckOutcome::Deny.to_string(), "DENY");
        assert!(IdentityOutcome::Fail.is_terminal());
        assert!(!IdentityOutcome::Pass.is_terminal());
    }
}
