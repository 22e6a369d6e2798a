//! Partition flights into labelled buckets by a group key.
//!
//! A flight with no value for the grouping field is left out of every bucket
//! and counted in [`GroupedRecords::excluded`] instead. There is no "unknown"
//! bucket, and no bucket is ever empty.

use crate::distance::{self, DistanceBucket};
use crate::weekday::{day_name, is_recognized};
use crate::{FlightRecord, GroupKey};
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

/// Sort slot for day codes that do not name a weekday, after Sunday.
const UNRECOGNIZED_DAY_SLOT: u8 = 8;

/// Internal bucket identity. Ordering gives a stable output order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum BucketKey {
    Text(String),
    Day(u8),
    Distance(DistanceBucket),
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BucketKey::Text(s) => write!(f, "{s}"),
            BucketKey::Day(code) => write!(f, "{}", day_name(*code)),
            BucketKey::Distance(bucket) => write!(f, "{bucket}"),
        }
    }
}

/// A labelled, non-empty partition of flights.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<'a> {
    pub label: String,
    pub records: Vec<&'a FlightRecord>,
}

/// The result of grouping a set of flights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedRecords<'a> {
    pub buckets: Vec<Bucket<'a>>,
    /// Flights left out because the grouping field was missing.
    pub excluded: usize,
}

impl<'a> GroupedRecords<'a> {
    /// Look up a bucket by its label.
    pub fn get(&self, label: &str) -> Option<&Bucket<'a>> {
        self.buckets.iter().find(|b| b.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Partition `records` by `key`.
///
/// Distance buckets of `bucket_width` miles are computed from `records`
/// themselves, so they span exactly the distances being grouped.
pub fn group_by<'a>(
    key: GroupKey,
    records: &[&'a FlightRecord],
    bucket_width: NonZeroU32,
) -> GroupedRecords<'a> {
    let bins = match key {
        GroupKey::Distance => distance::bins(records, bucket_width),
        _ => Vec::new(),
    };

    let bucket_key = |record: &FlightRecord| -> Option<BucketKey> {
        match key {
            GroupKey::Destination => record.dest.clone().map(BucketKey::Text),
            GroupKey::Carrier => record.unique_carrier.clone().map(BucketKey::Text),
            GroupKey::DayOfWeek => record.day_of_week.map(|code| {
                if is_recognized(code) {
                    BucketKey::Day(code)
                } else {
                    BucketKey::Day(UNRECOGNIZED_DAY_SLOT)
                }
            }),
            GroupKey::Distance => record
                .distance
                .and_then(|d| distance::locate(&bins, d))
                .map(BucketKey::Distance),
        }
    };

    let mut partitions: BTreeMap<BucketKey, Vec<&'a FlightRecord>> = BTreeMap::new();
    let mut excluded = 0;
    for &record in records {
        match bucket_key(record) {
            Some(k) => partitions.entry(k).or_default().push(record),
            None => excluded += 1,
        }
    }

    if excluded > 0 {
        log::debug!("Grouping by {key}: {excluded} flight(s) had no value and were excluded");
    }
    log::debug!(
        "Grouping by {key}: {} flight(s) in {} bucket(s)",
        records.len() - excluded,
        partitions.len()
    );

    GroupedRecords {
        buckets: partitions
            .into_iter()
            .map(|(k, records)| Bucket {
                label: k.to_string(),
                records,
            })
            .collect(),
        excluded,
    }
}
