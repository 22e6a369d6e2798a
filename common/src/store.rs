//! The in-memory flight dataset and the settings queries run with.

use crate::{DEFAULT_BUCKET_WIDTH, FlightRecord, QueryError};
use std::num::NonZeroU32;

/// Settings shared by every query against a store.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Width of each distance bucket in miles.
    pub bucket_width: NonZeroU32,
}

impl QueryConfig {
    pub fn new(bucket_width: NonZeroU32) -> Self {
        Self { bucket_width }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_WIDTH)
    }
}

/// The loaded dataset. Built once at startup and only read afterwards,
/// so it can be shared between request handlers without locking.
#[derive(Debug, Clone, Default)]
pub struct FlightStore {
    records: Vec<FlightRecord>,
    config: QueryConfig,
}

impl FlightStore {
    pub fn new(records: Vec<FlightRecord>, config: QueryConfig) -> Self {
        log::info!(
            "Flight store ready with {} record(s), distance buckets of {} miles",
            records.len(),
            config.bucket_width
        );
        Self { records, config }
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn config(&self) -> QueryConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All flights departing from `origin`, compared case-insensitively.
    pub fn filter_by_origin(&self, origin: &str) -> Vec<&FlightRecord> {
        self.records
            .iter()
            .filter(|r| r.origin.eq_ignore_ascii_case(origin))
            .collect()
    }

    /// Like [`FlightStore::filter_by_origin`], but an empty match is an error.
    ///
    /// # Errors
    /// Returns `OriginNotFound` if no flight departs from `origin`.
    pub fn flights_from(&self, origin: &str) -> Result<Vec<&FlightRecord>, QueryError> {
        let flights = self.filter_by_origin(origin);
        if flights.is_empty() {
            return Err(QueryError::OriginNotFound(origin.to_string()));
        }
        Ok(flights)
    }
}
