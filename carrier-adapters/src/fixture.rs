//! In-memory carrier source for tests and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use carrier_primitives::{CarrierRecord, UsdotNumber};

use crate::traits::{CarrierSource, SourceError, SourceResult};

/// Serves pre-loaded records; unknown identifiers yield [`SourceError::NotFound`].
#[derive(Debug, Default)]
pub struct StaticSource {
    records: HashMap<UsdotNumber, CarrierRecord>,
    fetches: AtomicUsize,
}

impl StaticSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record and returns the updated source.
    #[must_use]
    pub fn with_record(mut self, usdot: UsdotNumber, record: CarrierRecord) -> Self {
        self.records.insert(usdot, record);
        self
    }

    /// Returns how many fetches have been served, including failed lookups.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CarrierSource for StaticSource {
    fn provider(&self) -> &'static str {
        "static"
    }

    async fn fetch(&self, usdot: UsdotNumber) -> SourceResult<CarrierRecord> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.records
            .get(&usdot)
            .cloned()
            .ok_or(SourceError::NotFound { usdot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_known_records_and_counts_fetches() {
        let usdot = UsdotNumber::new(44).unwrap();
        let source = StaticSource::new()
            .with_record(usdot, CarrierRecord::builder().legal_name("ACME").build());

        let record = source.fetch(usdot).await.unwrap();
        assert_eq!(record.legal_name(), Some("ACME"));

        let missing = source.fetch(UsdotNumber::new(45).unwrap()).await;
        assert!(matches!(missing, Err(SourceError::NotFound { .. })));
        assert_eq!(source.fetch_count(), 2);
    }
}
