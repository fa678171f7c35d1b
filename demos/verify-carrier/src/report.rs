//! Plain-text rendering of verification results.

use std::fmt::Write;

use carrier_policy::rules::{DRIVER_OOS_NATIONAL_AVERAGE, VEHICLE_OOS_NATIONAL_AVERAGE};
use carrier_policy::{CheckOutcome, RuleName, VerificationResult};
use carrier_primitives::{CarrierRecord, InspectionCategory};

const RULE_WIDTH: usize = 60;

pub fn render(result: &VerificationResult) -> String {
    let mut out = String::new();
    let record = result.record();

    section(&mut out, "CARRIER");
    let _ = writeln!(out, "  Carrier: {}", result.carrier_name());
    if !result.dba_name().is_empty() {
        let _ = writeln!(out, "  DBA Name: {}", result.dba_name());
    }
    let _ = writeln!(out, "  USDOT: {}", result.usdot());
    let _ = writeln!(out, "  Identity Verification: {}", result.identity());

    for (rule, outcome) in result.checks().iter() {
        section(&mut out, title(rule));
        for line in details(rule, record) {
            let _ = writeln!(out, "  {line}");
        }
        let _ = writeln!(out, "  Verification Result: {outcome} {}", marker(outcome));
    }

    section(&mut out, "FINAL DECISION");
    let _ = writeln!(out, "  Final Decision: {}", result.decision());
    let _ = writeln!(out, "  Reason: {}", result.reason());
    out
}

fn section(out: &mut String, heading: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "\n{rule}\n{heading}\n{rule}");
}

fn title(rule: RuleName) -> &'static str {
    match rule {
        RuleName::AuthorityStatus => "Authority Status",
        RuleName::DataFreshness => "Data Freshness (MCS-150 Update)",
        RuleName::VehicleOosRate => "Vehicle Out-of-Service Rate",
        RuleName::DriverOosRate => "Driver Out-of-Service Rate",
        RuleName::CrashHistory => "Crash History",
        RuleName::InspectionVolume => "Inspection Volume",
        RuleName::FleetSize => "Fleet Size",
        RuleName::SafetyRating => "Safety Rating",
    }
}

fn marker(outcome: CheckOutcome) -> &'static str {
    match outcome {
        CheckOutcome::Accept => "[ok]",
        CheckOutcome::Review => "[review]",
        CheckOutcome::Deny => "[fail]",
    }
}

fn details(rule: RuleName, record: &CarrierRecord) -> Vec<String> {
    let inspections = record.inspections();
    match rule {
        RuleName::AuthorityStatus => vec![format!(
            "Operating Status: {}",
            record.operating_status().unwrap_or("N/A")
        )],
        RuleName::DataFreshness => vec![format!(
            "MCS-150 Form Date: {}",
            record.mcs_150_form_date().unwrap_or("N/A")
        )],
        RuleName::VehicleOosRate => oos_lines(
            inspections.and_then(|summary| summary.vehicle()),
            VEHICLE_OOS_NATIONAL_AVERAGE,
        ),
        RuleName::DriverOosRate => oos_lines(
            inspections.and_then(|summary| summary.driver()),
            DRIVER_OOS_NATIONAL_AVERAGE,
        ),
        RuleName::CrashHistory => {
            let crashes = record.crashes().cloned().unwrap_or_default();
            vec![
                format!("Total Crashes: {}", crashes.total()),
                format!("Fatal: {}", crashes.fatal()),
                format!("Injury: {}", crashes.injury()),
                format!("Tow: {}", crashes.tow()),
            ]
        }
        RuleName::InspectionVolume => {
            let count = |category: Option<&InspectionCategory>| {
                category.map_or(0, InspectionCategory::inspections)
            };
            vec![
                format!(
                    "Vehicle Inspections: {}",
                    count(inspections.and_then(|summary| summary.vehicle()))
                ),
                format!(
                    "Driver Inspections: {}",
                    count(inspections.and_then(|summary| summary.driver()))
                ),
                format!(
                    "Hazmat Inspections: {}",
                    count(inspections.and_then(|summary| summary.hazmat()))
                ),
                format!(
                    "Total Inspections: {}",
                    inspections.map_or(0, |summary| summary.total_inspections())
                ),
            ]
        }
        RuleName::FleetSize => vec![
            format!("Power Units: {}", record.power_units()),
            format!("Drivers: {}", record.drivers()),
        ],
        RuleName::SafetyRating => vec![
            format!(
                "Safety Rating: {}",
                record.safety_rating().unwrap_or("NOT RATED")
            ),
            format!(
                "Rating Date: {}",
                record.safety_rating_date().unwrap_or("N/A")
            ),
        ],
    }
}

fn oos_lines(category: Option<&InspectionCategory>, national_average: f64) -> Vec<String> {
    let Some(category) = category else {
        return vec!["Inspections: 0 (No data)".to_owned()];
    };
    match category.out_of_service_rate() {
        Some(rate) => vec![
            format!("Inspections: {}", category.inspections()),
            format!("Out of Service: {}", category.out_of_service()),
            format!("OOS Rate: {rate:.2}%"),
            format!("National Average: {national_average:.2}%"),
        ],
        None => vec![format!("Inspections: {} (No data)", category.inspections())],
    }
}
