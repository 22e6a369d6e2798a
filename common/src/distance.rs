//! Fixed-width distance buckets.
//!
//! **Range semantics**: every bucket is a half-open interval [lower, upper),
//! where lower is inclusive, upper is exclusive, and upper - lower is the
//! configured width. Buckets are derived from the records being queried, so
//! the last one is the first interval that reaches the largest distance present.

use crate::FlightRecord;
use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroU32;

/// A half-open distance interval in miles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistanceBucket {
    pub lower: u64,
    pub upper: u64,
}

impl DistanceBucket {
    /// Check whether a distance falls inside this bucket.
    pub fn contains(&self, distance: u32) -> bool {
        let distance = u64::from(distance);
        self.lower <= distance && distance < self.upper
    }
}

impl fmt::Display for DistanceBucket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.lower, self.upper)
    }
}

/// The largest known distance among the records, if any have one.
pub fn max_distance(records: &[&FlightRecord]) -> Option<u32> {
    records.iter().filter_map(|r| r.distance).max()
}

/// Compute contiguous buckets of `width` miles covering [0, max distance].
///
/// There are `ceil((max + 1) / width)` of them. Records without a distance do
/// not count towards the maximum; if none has one the result is empty.
pub fn bins(records: &[&FlightRecord], width: NonZeroU32) -> Vec<DistanceBucket> {
    let Some(max) = max_distance(records) else {
        return Vec::new();
    };
    let width = u64::from(width.get());
    let count = u64::from(max) / width + 1;

    (0..count)
        .map(|i| DistanceBucket {
            lower: i * width,
            upper: (i + 1) * width,
        })
        .collect()
}

/// Find the unique bucket containing `distance`. Expects ordered, contiguous bins.
pub fn locate(bins: &[DistanceBucket], distance: u32) -> Option<DistanceBucket> {
    let target = u64::from(distance);
    bins.binary_search_by(|bucket| {
        if bucket.upper <= target {
            Ordering::Less
        } else if bucket.lower > target {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
    .ok()
    .map(|i| bins[i])
}
