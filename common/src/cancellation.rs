//! Cancellation rates.

use crate::{FlightRecord, QueryError};
use serde::{Serialize, Serializer};
use std::fmt;

/// The share of flights in a bucket that were cancelled, in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct CancellationRate(f64);

impl CancellationRate {
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Rendered with two decimals, e.g. `0.33`. Halves round away from zero.
impl fmt::Display for CancellationRate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}", (self.0 * 100.0).round() / 100.0)
    }
}

impl Serialize for CancellationRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Compute the cancelled / total ratio for a bucket.
///
/// # Errors
/// Returns `EmptyBucketAggregation` if the bucket has no flights.
pub fn rate(bucket: &[&FlightRecord]) -> Result<CancellationRate, QueryError> {
    if bucket.is_empty() {
        return Err(QueryError::EmptyBucketAggregation);
    }
    let cancelled = bucket.iter().filter(|r| r.cancelled).count();

    #[allow(clippy::cast_precision_loss)]
    Ok(CancellationRate(cancelled as f64 / bucket.len() as f64))
}
