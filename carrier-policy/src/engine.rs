//! Verification engine: fetch, identity check, rule evaluation, aggregation.

use std::fmt;
use std::sync::Arc;

use carrier_adapters::traits::{CarrierSource, SourceError};
use carrier_primitives::{CarrierRecord, UsdotNumber};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::contracts::VerificationRequest;
use crate::decision::{FinalDecision, Verdict, aggregate};
use crate::identity::check_identity;
use crate::outcome::IdentityOutcome;
use crate::rules::{RuleOutcomes, evaluate_at};

/// Display name used when the record carries no legal name.
pub const UNKNOWN_CARRIER: &str = "Unknown";

/// Errors surfaced by the verification engine.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The carrier record could not be fetched; no partial result exists.
    #[error("carrier data unavailable for USDOT {usdot}: {source}")]
    DataUnavailable {
        /// Identifier that was requested.
        usdot: UsdotNumber,
        /// Underlying source failure.
        #[source]
        source: SourceError,
    },
}

/// Result alias for verification operations.
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Outcome of verifying one carrier.
///
/// When the identity check fails, `checks` is empty: the rules never ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationResult {
    usdot: UsdotNumber,
    carrier_name: String,
    dba_name: String,
    identity_verification: IdentityOutcome,
    checks: RuleOutcomes,
    final_decision: FinalDecision,
    reason: String,
    raw_data: CarrierRecord,
}

impl VerificationResult {
    /// Returns the carrier identifier.
    #[must_use]
    pub const fn usdot(&self) -> UsdotNumber {
        self.usdot
    }

    /// Returns the carrier's legal name, or `"Unknown"`.
    #[must_use]
    pub fn carrier_name(&self) -> &str {
        &self.carrier_name
    }

    /// Returns the "doing business as" name, empty when absent.
    #[must_use]
    pub fn dba_name(&self) -> &str {
        &self.dba_name
    }

    /// Returns the identity check outcome.
    #[must_use]
    pub const fn identity(&self) -> IdentityOutcome {
        self.identity_verification
    }

    /// Returns the rule outcomes in evaluation order.
    #[must_use]
    pub fn checks(&self) -> &RuleOutcomes {
        &self.checks
    }

    /// Returns the final decision.
    #[must_use]
    pub const fn decision(&self) -> FinalDecision {
        self.final_decision
    }

    /// Returns the reason for the final decision.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the record the decision was based on.
    #[must_use]
    pub fn record(&self) -> &CarrierRecord {
        &self.raw_data
    }
}

/// Verifies carriers using records fetched from a [`CarrierSource`].
pub struct VerificationEngine<S>
where
    S: CarrierSource + ?Sized,
{
    source: Arc<S>,
}

impl<S> fmt::Debug for VerificationEngine<S>
where
    S: CarrierSource + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationEngine")
            .field("provider", &self.source.provider())
            .finish()
    }
}

impl<S> Clone for VerificationEngine<S>
where
    S: CarrierSource + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S> VerificationEngine<S>
where
    S: CarrierSource + ?Sized,
{
    /// Creates an engine backed by the supplied source.
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Returns the underlying source.
    #[must_use]
    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Fetches the carrier once, then checks identity, evaluates, and aggregates.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::DataUnavailable`] when the fetch fails.
    pub async fn verify(&self, request: &VerificationRequest) -> VerifyResult<VerificationResult> {
        let usdot = request.usdot();
        let record = self.source.fetch(usdot).await.map_err(|source| {
            warn!(
                %usdot,
                provider = self.source.provider(),
                error = %source,
                "carrier fetch failed"
            );
            VerificationError::DataUnavailable { usdot, source }
        })?;

        Ok(verify_record(request, record))
    }
}

/// Runs identity, rules, and aggregation on an already-fetched record.
#[must_use]
pub fn verify_record(request: &VerificationRequest, record: CarrierRecord) -> VerificationResult {
    verify_record_at(request, record, Utc::now())
}

/// Same as [`verify_record`], evaluating freshness as of `now`.
#[must_use]
pub fn verify_record_at(
    request: &VerificationRequest,
    record: CarrierRecord,
    now: DateTime<Utc>,
) -> VerificationResult {
    let usdot = request.usdot();
    let identity = check_identity(record.phone(), request.phone());

    let (checks, verdict) = if identity.is_terminal() {
        (RuleOutcomes::default(), Verdict::identity_mismatch())
    } else {
        let checks = evaluate_at(&record, now);
        let verdict = aggregate(&checks);
        (checks, verdict)
    };

    let (final_decision, reason) = verdict.into_parts();
    info!(%usdot, %identity, decision = %final_decision, %reason, "carrier verified");

    VerificationResult {
        usdot,
        carrier_name: record.legal_name().unwrap_or(UNKNOWN_CARRIER).to_owned(),
        dba_name: record.dba_name().unwrap_or_default().to_owned(),
        identity_verification: identity,
        checks,
        final_decision,
        reason,
        raw_data: record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use carrier_adapters::fixture::StaticSource;
    use carrier_adapters::traits::SourceResult;
    use chrono::{Duration, TimeZone};

    use crate::outcome::CheckOutcome;
    use crate::rules::RuleName;

    struct FailingSource;

    #[async_trait]
    impl CarrierSource for FailingSource {
        fn provider(&self) -> &'static str {
            "failing"
        }

        async fn fetch(&self, _usdot: UsdotNumber) -> SourceResult<CarrierRecord> {
            Err(SourceError::transport("connection reset"))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    fn usdot() -> UsdotNumber {
        UsdotNumber::new(44).unwrap()
    }

    fn clean_record() -> CarrierRecord {
        CarrierRecord::builder()
            .legal_name("ACME HAULING LLC")
            .phone("5551234567")
            .operating_status("ACTIVE")
            .mcs_150_form_date(
                (now().date_naive() - Duration::days(90))
                    .format("%Y-%m-%d")
                    .to_string(),
            )
            .vehicle_inspections(20, 2)
            .driver_inspections(20, 1)
            .crashes(0, 0, 0)
            .power_units(6)
            .safety_rating("SATISFACTORY")
            .build()
    }

    #[test]
    fn phone_mismatch_short_circuits() {
        let request = VerificationRequest::new(usdot()).with_phone("5559999999");
        let result = verify_record_at(&request, clean_record(), now());

        assert_eq!(result.identity(), IdentityOutcome::Fail);
        assert_eq!(result.decision(), FinalDecision::AutoReject);
        assert_eq!(result.reason(), "Phone number mismatch");
        assert!(result.checks().is_empty());
    }

    #[test]
    fn matching_phone_passes_and_rules_run() {
        let request = VerificationRequest::new(usdot()).with_phone("(555) 123-4567");
        let result = verify_record_at(&request, clean_record(), now());

        assert_eq!(result.identity(), IdentityOutcome::Pass);
        assert_eq!(result.checks().len(), RuleName::ALL.len());
        assert_eq!(result.decision(), FinalDecision::FullApproval);
    }

    #[test]
    fn names_default_when_absent() {
        let result = verify_record_at(
            &VerificationRequest::new(usdot()),
            CarrierRecord::default(),
            now(),
        );
        assert_eq!(result.carrier_name(), UNKNOWN_CARRIER);
        assert_eq!(result.dba_name(), "");
        assert_eq!(result.identity(), IdentityOutcome::Skipped);
        assert_eq!(
            result.checks().get(RuleName::FleetSize),
            Some(CheckOutcome::Deny)
        );
    }

    #[test]
    fn result_serializes_expected_shape() {
        let result = verify_record_at(&VerificationRequest::new(usdot()), clean_record(), now());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["usdot"], serde_json::json!(44));
        assert_eq!(value["carrier_name"], serde_json::json!("ACME HAULING LLC"));
        assert_eq!(value["identity_verification"], serde_json::json!("SKIPPED"));
        assert_eq!(value["checks"]["fleet_size"], serde_json::json!("ACCEPT"));
        assert_eq!(value["final_decision"], serde_json::json!("FULL_APPROVAL"));
        assert_eq!(value["raw_data"]["phone"], serde_json::json!("5551234567"));
    }

    #[tokio::test]
    async fn verify_fetches_exactly_once() {
        let source = Arc::new(StaticSource::new().with_record(usdot(), clean_record()));
        let engine = VerificationEngine::new(Arc::clone(&source));

        let result = engine
            .verify(&VerificationRequest::new(usdot()))
            .await
            .unwrap();
        assert_eq!(result.usdot(), usdot());
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_is_data_unavailable() {
        let engine = VerificationEngine::new(Arc::new(FailingSource));
        let err = engine
            .verify(&VerificationRequest::new(usdot()))
            .await
            .unwrap_err();

        let VerificationError::DataUnavailable { usdot, source } = err;
        assert_eq!(usdot.get(), 44);
        assert!(matches!(source, SourceError::Transport { .. }));
    }

    #[tokio::test]
    async fn unknown_carrier_is_data_unavailable() {
        let engine = VerificationEngine::new(Arc::new(StaticSource::new()));
        let err = engine
            .verify(&VerificationRequest::new(usdot()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("USDOT 44"));
    }
}
