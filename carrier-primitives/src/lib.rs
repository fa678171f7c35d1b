//! Core shared types for motor-carrier verification.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod parse;
mod record;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Identifier assigned to a carrier by the US Department of Transportation.
pub use ids::UsdotNumber;
/// Lenient parsers for upstream counters and dates.
pub use parse::{parse_count, parse_form_date};
/// Typed snapshot of a carrier as returned by the data source.
pub use record::{
    CarrierRecord, CarrierRecordBuilder, CrashSummary, InspectionCategory, InspectionSummary,
};
