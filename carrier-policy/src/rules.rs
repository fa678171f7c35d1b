//! Threshold rules evaluated against a carrier snapshot.
//!
//! Every rule is a total, pure function of the record (plus the evaluation
//! date for freshness). Missing data maps to a conservative outcome rather
//! than an error.

use std::fmt::{self, Display, Formatter};

use carrier_primitives::{CarrierRecord, InspectionCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::outcome::CheckOutcome;

/// Highest vehicle out-of-service rate (percent) that is accepted.
pub const VEHICLE_OOS_ACCEPT_PERCENT: u64 = 25;
/// Highest vehicle out-of-service rate (percent) that is sent to review.
pub const VEHICLE_OOS_REVIEW_PERCENT: u64 = 30;
/// Highest driver out-of-service rate (percent) that is accepted.
pub const DRIVER_OOS_ACCEPT_PERCENT: u64 = 7;
/// Highest driver out-of-service rate (percent) that is sent to review.
pub const DRIVER_OOS_REVIEW_PERCENT: u64 = 10;
/// National vehicle out-of-service average, for reporting.
pub const VEHICLE_OOS_NATIONAL_AVERAGE: f64 = 20.87;
/// National driver out-of-service average, for reporting.
pub const DRIVER_OOS_NATIONAL_AVERAGE: f64 = 5.51;
/// Minimum combined vehicle, driver, and hazmat inspections for a usable signal.
pub const MIN_INSPECTIONS: u64 = 10;
/// Smallest fleet that is accepted without review.
pub const FLEET_ACCEPT_UNITS: u64 = 5;
/// Smallest fleet that is sent to review instead of denied.
pub const FLEET_REVIEW_UNITS: u64 = 2;
/// MCS-150 age (months) up to which the census data counts as fresh.
pub const FRESH_MONTHS: f64 = 12.0;
/// MCS-150 age (months) up to which the census data is sent to review.
pub const STALE_MONTHS: f64 = 24.0;

const DAYS_PER_MONTH: f64 = 30.0;
const AUTHORITY_DENY: &[&str] = &["NOT AUTHORIZED", "INACTIVE", "OUT OF SERVICE"];
const AUTHORITY_ACCEPT: &[&str] = &["ACTIVE", "AUTHORIZED"];

/// Names of the eight rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    /// Operating authority status.
    AuthorityStatus,
    /// Age of the last MCS-150 census update.
    DataFreshness,
    /// Vehicle out-of-service rate.
    VehicleOosRate,
    /// Driver out-of-service rate.
    DriverOosRate,
    /// Fatal, injury, and tow-away crash counts.
    CrashHistory,
    /// Number of inspections backing the rates.
    InspectionVolume,
    /// Number of power units.
    FleetSize,
    /// Official safety rating.
    SafetyRating,
}

impl RuleName {
    /// All rules in the fixed evaluation order.
    pub const ALL: [Self; 8] = [
        Self::AuthorityStatus,
        Self::DataFreshness,
        Self::VehicleOosRate,
        Self::DriverOosRate,
        Self::CrashHistory,
        Self::InspectionVolume,
        Self::FleetSize,
        Self::SafetyRating,
    ];

    /// Returns the stable snake_case rule name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthorityStatus => "authority_status",
            Self::DataFreshness => "data_freshness",
            Self::VehicleOosRate => "vehicle_oos_rate",
            Self::DriverOosRate => "driver_oos_rate",
            Self::CrashHistory => "crash_history",
            Self::InspectionVolume => "inspection_volume",
            Self::FleetSize => "fleet_size",
            Self::SafetyRating => "safety_rating",
        }
    }

    /// Evaluates this rule against the record as of `today`.
    #[must_use]
    pub fn evaluate(self, record: &CarrierRecord, today: NaiveDate) -> CheckOutcome {
        match self {
            Self::AuthorityStatus => authority_status(record),
            Self::DataFreshness => data_freshness(record, today),
            Self::VehicleOosRate => vehicle_oos_rate(record),
            Self::DriverOosRate => driver_oos_rate(record),
            Self::CrashHistory => crash_history(record),
            Self::InspectionVolume => inspection_volume(record),
            Self::FleetSize => fleet_size(record),
            Self::SafetyRating => safety_rating(record),
        }
    }
}

impl Display for RuleName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule outcomes in evaluation order.
///
/// Serializes as a JSON object whose key order matches evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcomes {
    entries: Vec<(RuleName, CheckOutcome)>,
}

impl RuleOutcomes {
    /// Returns the outcome recorded for `rule`, if it ran.
    #[must_use]
    pub fn get(&self, rule: RuleName) -> Option<CheckOutcome> {
        self.entries
            .iter()
            .find_map(|(name, outcome)| (*name == rule).then_some(*outcome))
    }

    /// Iterates over `(rule, outcome)` pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleName, CheckOutcome)> + '_ {
        self.entries.iter().copied()
    }

    /// Counts rules that produced `outcome`.
    #[must_use]
    pub fn count(&self, outcome: CheckOutcome) -> usize {
        self.entries
            .iter()
            .filter(|(_, recorded)| *recorded == outcome)
            .count()
    }

    /// Returns the most severe outcome, or `None` when no rule ran.
    #[must_use]
    pub fn worst(&self) -> Option<CheckOutcome> {
        self.entries.iter().map(|(_, outcome)| *outcome).max()
    }

    /// Returns the number of recorded outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no rule ran.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(RuleName, CheckOutcome)> for RuleOutcomes {
    fn from_iter<I: IntoIterator<Item = (RuleName, CheckOutcome)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for RuleOutcomes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (rule, outcome) in &self.entries {
            map.serialize_entry(rule.as_str(), outcome)?;
        }
        map.end()
    }
}

/// Runs all eight rules against the record using the current UTC date.
#[must_use]
pub fn evaluate(record: &CarrierRecord) -> RuleOutcomes {
    evaluate_at(record, Utc::now())
}

/// Runs all eight rules against the record as of `now`.
#[must_use]
pub fn evaluate_at(record: &CarrierRecord, now: DateTime<Utc>) -> RuleOutcomes {
    let today = now.date_naive();
    RuleName::ALL
        .into_iter()
        .map(|rule| {
            let outcome = rule.evaluate(record, today);
            debug!(rule = rule.as_str(), %outcome, "rule evaluated");
            (rule, outcome)
        })
        .collect()
}

/// Operating authority: denial phrases win over acceptance phrases, since
/// "INACTIVE" contains "ACTIVE" and "NOT AUTHORIZED" contains "AUTHORIZED".
#[must_use]
pub fn authority_status(record: &CarrierRecord) -> CheckOutcome {
    let status = record.operating_status().unwrap_or_default().to_uppercase();

    if AUTHORITY_DENY.iter().any(|phrase| status.contains(phrase)) {
        CheckOutcome::Deny
    } else if AUTHORITY_ACCEPT.iter().any(|phrase| status.contains(phrase)) {
        CheckOutcome::Accept
    } else {
        CheckOutcome::Review
    }
}

/// Census freshness measured in 30-day months since the MCS-150 form date.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn data_freshness(record: &CarrierRecord, today: NaiveDate) -> CheckOutcome {
    let Some(filed) = record.mcs_150_date() else {
        return CheckOutcome::Deny;
    };

    let months_old = (today - filed).num_days() as f64 / DAYS_PER_MONTH;
    if months_old <= FRESH_MONTHS {
        CheckOutcome::Accept
    } else if months_old <= STALE_MONTHS {
        CheckOutcome::Review
    } else {
        CheckOutcome::Deny
    }
}

/// Vehicle out-of-service rate against the 25% / 30% thresholds.
#[must_use]
pub fn vehicle_oos_rate(record: &CarrierRecord) -> CheckOutcome {
    out_of_service_outcome(
        record.inspections().and_then(|summary| summary.vehicle()),
        VEHICLE_OOS_ACCEPT_PERCENT,
        VEHICLE_OOS_REVIEW_PERCENT,
    )
}

/// Driver out-of-service rate against the 7% / 10% thresholds.
#[must_use]
pub fn driver_oos_rate(record: &CarrierRecord) -> CheckOutcome {
    out_of_service_outcome(
        record.inspections().and_then(|summary| summary.driver()),
        DRIVER_OOS_ACCEPT_PERCENT,
        DRIVER_OOS_REVIEW_PERCENT,
    )
}

// Compares `oos / inspections * 100` against the limits without floating
// point, so a rate of exactly the limit is accepted.
fn out_of_service_outcome(
    category: Option<&InspectionCategory>,
    accept_percent: u64,
    review_percent: u64,
) -> CheckOutcome {
    let Some(category) = category.filter(|category| category.inspections() > 0) else {
        return CheckOutcome::Review;
    };

    let scaled = u128::from(category.out_of_service()) * 100;
    let inspections = u128::from(category.inspections());

    if scaled <= u128::from(accept_percent) * inspections {
        CheckOutcome::Accept
    } else if scaled <= u128::from(review_percent) * inspections {
        CheckOutcome::Review
    } else {
        CheckOutcome::Deny
    }
}

/// Crash history. A missing crash summary counts as a clean history.
#[must_use]
pub fn crash_history(record: &CarrierRecord) -> CheckOutcome {
    let Some(crashes) = record.crashes() else {
        return CheckOutcome::Accept;
    };

    if crashes.fatal() > 0 || crashes.injury() >= 2 {
        CheckOutcome::Deny
    } else if crashes.injury() == 1 {
        CheckOutcome::Review
    } else if crashes.tow() <= 1 {
        CheckOutcome::Accept
    } else {
        CheckOutcome::Review
    }
}

/// Inspection volume. Never denies; too few inspections only triggers review.
#[must_use]
pub fn inspection_volume(record: &CarrierRecord) -> CheckOutcome {
    let total = record
        .inspections()
        .map_or(0, carrier_primitives::InspectionSummary::total_inspections);

    if total < MIN_INSPECTIONS {
        CheckOutcome::Review
    } else {
        CheckOutcome::Accept
    }
}

/// Fleet size by power units.
#[must_use]
pub fn fleet_size(record: &CarrierRecord) -> CheckOutcome {
    match record.power_units() {
        units if units >= FLEET_ACCEPT_UNITS => CheckOutcome::Accept,
        units if units >= FLEET_REVIEW_UNITS => CheckOutcome::Review,
        _ => CheckOutcome::Deny,
    }
}

/// Official safety rating; an absent rating means "NOT RATED".
#[must_use]
pub fn safety_rating(record: &CarrierRecord) -> CheckOutcome {
    let rating = record
        .safety_rating()
        .map(str::trim)
        .filter(|rating| !rating.is_empty())
        .map_or_else(|| "NOT RATED".to_owned(), str::to_uppercase);

    match rating.as_str() {
        "SATISFACTORY" => CheckOutcome::Accept,
        "CONDITIONAL" | "UNSATISFACTORY" => CheckOutcome::Deny,
        _ => CheckOutcome::Review,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> String {
        (now().date_naive() - Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    fn with_status(status: &str) -> CarrierRecord {
        CarrierRecord::builder().operating_status(status).build()
    }

    #[test]
    fn authority_status_matches_phrases() {
        assert_eq!(authority_status(&with_status("ACTIVE")), CheckOutcome::Accept);
        assert_eq!(
            authority_status(&with_status("Authorized for Property")),
            CheckOutcome::Accept
        );
        assert_eq!(
            authority_status(&with_status("NOT AUTHORIZED")),
            CheckOutcome::Deny
        );
        assert_eq!(authority_status(&with_status("inactive")), CheckOutcome::Deny);
        assert_eq!(
            authority_status(&with_status("OUT OF SERVICE")),
            CheckOutcome::Deny
        );
        assert_eq!(authority_status(&with_status("PENDING")), CheckOutcome::Review);
        assert_eq!(
            authority_status(&CarrierRecord::default()),
            CheckOutcome::Review
        );
    }

    #[test]
    fn freshness_uses_thirty_day_months() {
        let outcome = |days| {
            let record = CarrierRecord::builder()
                .mcs_150_form_date(days_ago(days))
                .build();
            data_freshness(&record, now().date_naive())
        };

        assert_eq!(outcome(90), CheckOutcome::Accept);
        assert_eq!(outcome(360), CheckOutcome::Accept);
        assert_eq!(outcome(361), CheckOutcome::Review);
        assert_eq!(outcome(720), CheckOutcome::Review);
        assert_eq!(outcome(721), CheckOutcome::Deny);
        assert_eq!(outcome(-30), CheckOutcome::Accept);
    }

    #[test]
    fn freshness_denies_missing_or_unparsable_dates() {
        let today = now().date_naive();
        assert_eq!(
            data_freshness(&CarrierRecord::default(), today),
            CheckOutcome::Deny
        );
        let garbled = CarrierRecord::builder().mcs_150_form_date("soon").build();
        assert_eq!(data_freshness(&garbled, today), CheckOutcome::Deny);
    }

    #[test]
    fn vehicle_oos_boundaries() {
        let outcome = |inspections, oos| {
            vehicle_oos_rate(
                &CarrierRecord::builder()
                    .vehicle_inspections(inspections, oos)
                    .build(),
            )
        };

        assert_eq!(outcome(100, 25), CheckOutcome::Accept);
        assert_eq!(outcome(10_000, 2_501), CheckOutcome::Review);
        assert_eq!(outcome(100, 30), CheckOutcome::Review);
        assert_eq!(outcome(10_000, 3_001), CheckOutcome::Deny);
        assert_eq!(outcome(0, 0), CheckOutcome::Review);
        assert_eq!(vehicle_oos_rate(&CarrierRecord::default()), CheckOutcome::Review);
    }

    #[test]
    fn driver_oos_boundaries() {
        let outcome = |inspections, oos| {
            driver_oos_rate(
                &CarrierRecord::builder()
                    .driver_inspections(inspections, oos)
                    .build(),
            )
        };

        assert_eq!(outcome(100, 7), CheckOutcome::Accept);
        assert_eq!(outcome(10_000, 701), CheckOutcome::Review);
        assert_eq!(outcome(100, 10), CheckOutcome::Review);
        assert_eq!(outcome(10_000, 1_001), CheckOutcome::Deny);
        assert_eq!(outcome(0, 3), CheckOutcome::Review);
        assert_eq!(driver_oos_rate(&CarrierRecord::default()), CheckOutcome::Review);
    }

    #[test]
    fn crash_history_thresholds() {
        let outcome =
            |fatal, injury, tow| crash_history(&CarrierRecord::builder().crashes(fatal, injury, tow).build());

        assert_eq!(outcome(0, 0, 0), CheckOutcome::Accept);
        assert_eq!(outcome(0, 0, 1), CheckOutcome::Accept);
        assert_eq!(outcome(0, 1, 0), CheckOutcome::Review);
        assert_eq!(outcome(0, 0, 2), CheckOutcome::Review);
        assert_eq!(outcome(1, 0, 0), CheckOutcome::Deny);
        assert_eq!(outcome(0, 2, 0), CheckOutcome::Deny);
        assert_eq!(crash_history(&CarrierRecord::default()), CheckOutcome::Accept);
    }

    #[test]
    fn inspection_volume_never_denies() {
        let sparse = CarrierRecord::builder()
            .vehicle_inspections(4, 0)
            .driver_inspections(3, 0)
            .hazmat_inspections(2, 0)
            .iep_inspections(100, 0)
            .build();
        assert_eq!(inspection_volume(&sparse), CheckOutcome::Review);

        let enough = CarrierRecord::builder()
            .vehicle_inspections(4, 0)
            .driver_inspections(3, 0)
            .hazmat_inspections(3, 0)
            .build();
        assert_eq!(inspection_volume(&enough), CheckOutcome::Accept);
        assert_eq!(
            inspection_volume(&CarrierRecord::default()),
            CheckOutcome::Review
        );
    }

    #[test]
    fn fleet_size_thresholds() {
        let outcome = |units| fleet_size(&CarrierRecord::builder().power_units(units).build());
        assert_eq!(outcome(6), CheckOutcome::Accept);
        assert_eq!(outcome(5), CheckOutcome::Accept);
        assert_eq!(outcome(4), CheckOutcome::Review);
        assert_eq!(outcome(2), CheckOutcome::Review);
        assert_eq!(outcome(1), CheckOutcome::Deny);
        assert_eq!(outcome(0), CheckOutcome::Deny);
    }

    #[test]
    fn safety_rating_is_case_insensitive() {
        let outcome = |rating| safety_rating(&CarrierRecord::builder().safety_rating(rating).build());
        assert_eq!(outcome("Satisfactory"), CheckOutcome::Accept);
        assert_eq!(outcome("CONDITIONAL"), CheckOutcome::Deny);
        assert_eq!(outcome("unsatisfactory"), CheckOutcome::Deny);
        assert_eq!(outcome("NOT RATED"), CheckOutcome::Review);
        assert_eq!(outcome(""), CheckOutcome::Review);
        assert_eq!(safety_rating(&CarrierRecord::default()), CheckOutcome::Review);
    }

    #[test]
    fn empty_record_evaluates_every_rule() {
        let outcomes = evaluate_at(&CarrierRecord::default(), now());
        let names: Vec<_> = outcomes.iter().map(|(rule, _)| rule).collect();
        assert_eq!(names, RuleName::ALL);
        assert_eq!(outcomes.get(RuleName::AuthorityStatus), Some(CheckOutcome::Review));
        assert_eq!(outcomes.get(RuleName::DataFreshness), Some(CheckOutcome::Deny));
        assert_eq!(outcomes.get(RuleName::CrashHistory), Some(CheckOutcome::Accept));
        assert_eq!(outcomes.get(RuleName::FleetSize), Some(CheckOutcome::Deny));
        assert_eq!(outcomes.worst(), Some(CheckOutcome::Deny));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let record = CarrierRecord::builder()
            .operating_status("ACTIVE")
            .mcs_150_form_date(days_ago(400))
            .vehicle_inspections(20, 6)
            .driver_inspections(20, 2)
            .crashes(0, 1, 3)
            .power_units(3)
            .safety_rating("Conditional")
            .build();

        assert_eq!(evaluate_at(&record, now()), evaluate_at(&record, now()));
    }

    #[test]
    fn outcomes_serialize_in_evaluation_order() {
        let outcomes = evaluate_at(&CarrierRecord::default(), now());
        let json = serde_json::to_string(&outcomes).unwrap();
        let positions: Vec<_> = RuleName::ALL
            .iter()
            .map(|rule| json.find(rule.as_str()).expect("rule key present"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(json.starts_with(r#"{"authority_status":"REVIEW""#));
    }
}
