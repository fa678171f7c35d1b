//! Final approval decisions and outcome aggregation.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::outcome::CheckOutcome;
use crate::rules::RuleOutcomes;

/// Number of REVIEW flags that turns an approval into a conditional one.
pub const CONDITIONAL_REVIEW_THRESHOLD: usize = 2;

/// Final onboarding decision for a carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinalDecision {
    /// The carrier is rejected.
    #[serde(rename = "AUTO-REJECT")]
    AutoReject,
    /// The carrier is approved subject to increased monitoring.
    #[serde(rename = "CONDITIONAL_APPROVAL")]
    ConditionalApproval,
    /// The carrier is approved.
    #[serde(rename = "FULL_APPROVAL")]
    FullApproval,
}

impl FinalDecision {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutoReject => "AUTO-REJECT",
            Self::ConditionalApproval => "CONDITIONAL_APPROVAL",
            Self::FullApproval => "FULL_APPROVAL",
        }
    }

    /// Returns true for either kind of approval.
    #[must_use]
    pub const fn is_approved(self) -> bool {
        !matches!(self, Self::AutoReject)
    }
}

impl Display for FinalDecision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final decision together with its human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    decision: FinalDecision,
    reason: String,
}

impl Verdict {
    /// Creates a verdict.
    #[must_use]
    pub fn new(decision: FinalDecision, reason: impl Into<String>) -> Self {
        Self {
            decision,
            reason: reason.into(),
        }
    }

    /// Verdict issued when the identity check fails.
    #[must_use]
    pub fn identity_mismatch() -> Self {
        Self::new(FinalDecision::AutoReject, "Phone number mismatch")
    }

    /// Returns the final decision.
    #[must_use]
    pub const fn decision(&self) -> FinalDecision {
        self.decision
    }

    /// Returns the reason string.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Splits the verdict into its parts.
    #[must_use]
    pub fn into_parts(self) -> (FinalDecision, String) {
        (self.decision, self.reason)
    }
}

/// Combines rule outcomes into a verdict.
///
/// Any DENY rejects. Two or more REVIEW flags give a conditional approval.
/// Everything else, including a single REVIEW flag, is a full approval.
#[must_use]
pub fn aggregate(outcomes: &RuleOutcomes) -> Verdict {
    let denies = outcomes.count(CheckOutcome::Deny);
    let reviews = outcomes.count(CheckOutcome::Review);

    if denies > 0 {
        Verdict::new(
            FinalDecision::AutoReject,
            format!("{denies} DENY flag(s) found"),
        )
    } else if reviews >= CONDITIONAL_REVIEW_THRESHOLD {
        Verdict::new(
            FinalDecision::ConditionalApproval,
            format!("{reviews} REVIEW flag(s) - requires increased monitoring"),
        )
    } else {
        Verdict::new(FinalDecision::FullApproval, "All checks passed")
    }
}
