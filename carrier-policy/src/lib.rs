//! Decision engine for motor-carrier verification.
//!
//! A fetched [`carrier_primitives::CarrierRecord`] runs through an optional
//! phone-number identity check and eight independent threshold rules. The
//! per-rule outcomes are then aggregated into a single approval decision.

#![warn(missing_docs, clippy::pedantic)]

pub mod contracts;
pub mod decision;
pub mod engine;
pub mod identity;
pub mod outcome;
pub mod rules;

pub use contracts::VerificationRequest;
pub use decision::{FinalDecision, Verdict, aggregate};
pub use engine::{
    VerificationEngine, VerificationError, VerificationResult, VerifyResult, verify_record,
    verify_record_at,
};
pub use identity::{check_identity, normalize_phone};
pub use outcome::{CheckOutcome, IdentityOutcome};
pub use rules::{RuleName, RuleOutcomes, evaluate, evaluate_at};
