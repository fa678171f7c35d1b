//! Carrier snapshot records returned by the census data source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::parse::{lenient_count, lenient_text, parse_form_date};

/// Inspection counters for a single inspection category.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectionCategory {
    #[serde(default, deserialize_with = "lenient_count")]
    inspections: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    out_of_service: u64,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    out_of_service_percent: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    national_average: Option<String>,
}

impl InspectionCategory {
    /// Creates a category from inspection and out-of-service counts.
    #[must_use]
    pub fn new(inspections: u64, out_of_service: u64) -> Self {
        Self {
            inspections,
            out_of_service,
            out_of_service_percent: None,
            national_average: None,
        }
    }

    /// Returns the number of inspections performed.
    #[must_use]
    pub const fn inspections(&self) -> u64 {
        self.inspections
    }

    /// Returns the number of inspections that ended in an out-of-service order.
    #[must_use]
    pub const fn out_of_service(&self) -> u64 {
        self.out_of_service
    }

    /// Returns the out-of-service rate in percent, or `None` without inspections.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn out_of_service_rate(&self) -> Option<f64> {
        (self.inspections > 0)
            .then(|| self.out_of_service as f64 / self.inspections as f64 * 100.0)
    }

    /// Returns the upstream-reported rate text, when present.
    #[must_use]
    pub fn reported_percent(&self) -> Option<&str> {
        self.out_of_service_percent.as_deref()
    }

    /// Returns the upstream-reported national average text, when present.
    #[must_use]
    pub fn reported_national_average(&self) -> Option<&str> {
        self.national_average.as_deref()
    }
}

/// Inspection categories reported for US roadside inspections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectionSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vehicle: Option<InspectionCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    driver: Option<InspectionCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hazmat: Option<InspectionCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iep: Option<InspectionCategory>,
}

impl InspectionSummary {
    /// Returns vehicle inspection counters.
    #[must_use]
    pub fn vehicle(&self) -> Option<&InspectionCategory> {
        self.vehicle.as_ref()
    }

    /// Returns driver inspection counters.
    #[must_use]
    pub fn driver(&self) -> Option<&InspectionCategory> {
        self.driver.as_ref()
    }

    /// Returns hazardous-materials inspection counters.
    #[must_use]
    pub fn hazmat(&self) -> Option<&InspectionCategory> {
        self.hazmat.as_ref()
    }

    /// Returns intermodal equipment provider inspection counters.
    #[must_use]
    pub fn iep(&self) -> Option<&InspectionCategory> {
        self.iep.as_ref()
    }

    /// Sums vehicle, driver, and hazmat inspections. IEP inspections are excluded.
    #[must_use]
    pub fn total_inspections(&self) -> u64 {
        [&self.vehicle, &self.driver, &self.hazmat]
            .into_iter()
            .flatten()
            .fold(0, |total, category| {
                total.saturating_add(category.inspections)
            })
    }
}

/// Crash counts over the reporting window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashSummary {
    #[serde(default, deserialize_with = "lenient_count")]
    fatal: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    injury: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    tow: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    total: u64,
}

impl CrashSummary {
    /// Creates a summary; the total is the sum of the three categories.
    #[must_use]
    pub fn new(fatal: u64, injury: u64, tow: u64) -> Self {
        Self {
            fatal,
            injury,
            tow,
            total: fatal.saturating_add(injury).saturating_add(tow),
        }
    }

    /// Returns crashes involving a fatality.
    #[must_use]
    pub const fn fatal(&self) -> u64 {
        self.fatal
    }

    /// Returns crashes involving an injury.
    #[must_use]
    pub const fn injury(&self) -> u64 {
        self.injury
    }

    /// Returns crashes requiring a tow-away.
    #[must_use]
    pub const fn tow(&self) -> u64 {
        self.tow
    }

    /// Returns the total crash count as reported upstream.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }
}

/// Immutable snapshot of one carrier.
///
/// Field names follow the upstream snapshot payload. Keys the model does not
/// know are kept verbatim and re-emitted on serialization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierRecord {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    legal_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    dba_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    operating_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    power_units: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    drivers: u64,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    mcs_150_form_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    safety_rating: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    safety_rating_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    us_inspections: Option<InspectionSummary>,
    #[serde(
        default,
        rename = "united_states_crashes",
        skip_serializing_if = "Option::is_none"
    )]
    crashes: Option<CrashSummary>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl CarrierRecord {
    /// Starts building a [`CarrierRecord`].
    #[must_use]
    pub fn builder() -> CarrierRecordBuilder {
        CarrierRecordBuilder::default()
    }

    /// Returns the registered legal name.
    #[must_use]
    pub fn legal_name(&self) -> Option<&str> {
        self.legal_name.as_deref()
    }

    /// Returns the "doing business as" name.
    #[must_use]
    pub fn dba_name(&self) -> Option<&str> {
        self.dba_name.as_deref()
    }

    /// Returns the phone number on file.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the free-text operating status.
    #[must_use]
    pub fn operating_status(&self) -> Option<&str> {
        self.operating_status.as_deref()
    }

    /// Returns the number of power units (trucks and tractors).
    #[must_use]
    pub const fn power_units(&self) -> u64 {
        self.power_units
    }

    /// Returns the number of drivers.
    #[must_use]
    pub const fn drivers(&self) -> u64 {
        self.drivers
    }

    /// Returns the MCS-150 form date exactly as reported.
    #[must_use]
    pub fn mcs_150_form_date(&self) -> Option<&str> {
        self.mcs_150_form_date.as_deref()
    }

    /// Returns the MCS-150 form date when it can be parsed.
    #[must_use]
    pub fn mcs_150_date(&self) -> Option<NaiveDate> {
        self.mcs_150_form_date.as_deref().and_then(parse_form_date)
    }

    /// Returns the safety rating text, `None` meaning not rated.
    #[must_use]
    pub fn safety_rating(&self) -> Option<&str> {
        self.safety_rating.as_deref()
    }

    /// Returns the date the safety rating was issued.
    #[must_use]
    pub fn safety_rating_date(&self) -> Option<&str> {
        self.safety_rating_date.as_deref()
    }

    /// Returns US inspection counters.
    #[must_use]
    pub fn inspections(&self) -> Option<&InspectionSummary> {
        self.us_inspections.as_ref()
    }

    /// Returns US crash counts.
    #[must_use]
    pub fn crashes(&self) -> Option<&CrashSummary> {
        self.crashes.as_ref()
    }

    /// Returns upstream fields that are not modelled explicitly.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Builder for [`CarrierRecord`].
#[derive(Debug, Default)]
pub struct CarrierRecordBuilder {
    record: CarrierRecord,
}

impl CarrierRecordBuilder {
    /// Sets the legal name.
    #[must_use]
    pub fn legal_name(mut self, name: impl Into<String>) -> Self {
        self.record.legal_name = Some(name.into());
        self
    }

    /// Sets the "doing business as" name.
    #[must_use]
    pub fn dba_name(mut self, name: impl Into<String>) -> Self {
        self.record.dba_name = Some(name.into());
        self
    }

    /// Sets the phone number on file.
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.record.phone = Some(phone.into());
        self
    }

    /// Sets the operating status text.
    #[must_use]
    pub fn operating_status(mut self, status: impl Into<String>) -> Self {
        self.record.operating_status = Some(status.into());
        self
    }

    /// Sets the power unit count.
    #[must_use]
    pub fn power_units(mut self, units: u64) -> Self {
        self.record.power_units = units;
        self
    }

    /// Sets the driver count.
    #[must_use]
    pub fn drivers(mut self, drivers: u64) -> Self {
        self.record.drivers = drivers;
        self
    }

    /// Sets the MCS-150 form date text.
    #[must_use]
    pub fn mcs_150_form_date(mut self, date: impl Into<String>) -> Self {
        self.record.mcs_150_form_date = Some(date.into());
        self
    }

    /// Sets the safety rating text.
    #[must_use]
    pub fn safety_rating(mut self, rating: impl Into<String>) -> Self {
        self.record.safety_rating = Some(rating.into());
        self
    }

    /// Sets the safety rating date text.
    #[must_use]
    pub fn safety_rating_date(mut self, date: impl Into<String>) -> Self {
        self.record.safety_rating_date = Some(date.into());
        self
    }

    /// Sets vehicle inspection counters.
    #[must_use]
    pub fn vehicle_inspections(mut self, inspections: u64, out_of_service: u64) -> Self {
        self.summary().vehicle = Some(InspectionCategory::new(inspections, out_of_service));
        self
    }

    /// Sets driver inspection counters.
    #[must_use]
    pub fn driver_inspections(mut self, inspections: u64, out_of_service: u64) -> Self {
        self.summary().driver = Some(InspectionCategory::new(inspections, out_of_service));
        self
    }

    /// Sets hazmat inspection counters.
    #[must_use]
    pub fn hazmat_inspections(mut self, inspections: u64, out_of_service: u64) -> Self {
        self.summary().hazmat = Some(InspectionCategory::new(inspections, out_of_service));
        self
    }

    /// Sets IEP inspection counters.
    #[must_use]
    pub fn iep_inspections(mut self, inspections: u64, out_of_service: u64) -> Self {
        self.summary().iep = Some(InspectionCategory::new(inspections, out_of_service));
        self
    }

    /// Sets crash counts.
    #[must_use]
    pub fn crashes(mut self, fatal: u64, injury: u64, tow: u64) -> Self {
        self.record.crashes = Some(CrashSummary::new(fatal, injury, tow));
        self
    }

    /// Adds an unmodelled upstream field.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.record.extra.insert(key.into(), value);
        self
    }

    /// Finishes the record.
    #[must_use]
    pub fn build(self) -> CarrierRecord {
        self.record
    }

    fn summary(&mut self) -> &mut InspectionSummary {
        self.record
            .us_inspections
            .get_or_insert_with(InspectionSummary::default)
    }
}
