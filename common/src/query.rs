//! End-to-end queries: filter by origin, group, then aggregate each bucket.

use crate::cancellation::{self, CancellationRate};
use crate::delay::{self, DelayStatus, DelaySummary};
use crate::grouping::group_by;
use crate::{FlightRecord, FlightStore, GroupKey, QueryError};
use itertools::Itertools;
use serde::Serialize;

/// Aggregated values for one group key, in bucket order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary<T> {
    pub key: GroupKey,
    pub buckets: Vec<(String, T)>,
    /// Flights left out because the grouping field was missing.
    pub excluded: usize,
}

impl<T> GroupSummary<T> {
    pub fn get(&self, label: &str) -> Option<&T> {
        self.buckets.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Summary<T> {
    /// One value over every flight from the origin.
    /// None if there was nothing to aggregate (e.g. no late flights).
    Overall(Option<T>),
    /// One entry per requested group key, in request order.
    Grouped(Vec<GroupSummary<T>>),
}

/// The answer to a query for a single origin.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryReport<T> {
    /// The origin as it was requested.
    pub origin: String,
    pub summary: Summary<T>,
}

/// How one flight from an origin arrived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightDelay {
    pub dest: Option<String>,
    pub unique_carrier: Option<String>,
    pub status: DelayStatus,
}

/// Parse requested group keys, dropping repeats but keeping first-seen order.
///
/// # Errors
/// Returns `InvalidGroupKey` for the first key outside the supported set.
pub fn parse_group_keys<S: AsRef<str>>(raw: &[S]) -> Result<Vec<GroupKey>, QueryError> {
    let keys = raw
        .iter()
        .map(|s| s.as_ref().parse::<GroupKey>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(keys.into_iter().unique().collect())
}

impl FlightStore {
    /// Summarize arrival delays for flights from `origin`.
    ///
    /// # Errors
    /// Returns `OriginNotFound` if no flight departs from `origin`.
    pub fn arrival_delay(
        &self,
        origin: &str,
        keys: &[GroupKey],
    ) -> Result<QueryReport<DelaySummary>, QueryError> {
        self.run(origin, keys, |bucket| Ok(delay::summarize(bucket)))
    }

    /// Compute cancellation rates for flights from `origin`.
    ///
    /// # Errors
    /// Returns `OriginNotFound` if no flight departs from `origin`.
    pub fn cancellation(
        &self,
        origin: &str,
        keys: &[GroupKey],
    ) -> Result<QueryReport<CancellationRate>, QueryError> {
        self.run(origin, keys, |bucket| cancellation::rate(bucket).map(Some))
    }

    /// Classify every flight from `origin` as late, early, on time or unknown.
    ///
    /// # Errors
    /// Returns `OriginNotFound` if no flight departs from `origin`.
    pub fn delay_statuses(&self, origin: &str) -> Result<Vec<FlightDelay>, QueryError> {
        Ok(self
            .flights_from(origin)?
            .into_iter()
            .map(|r| FlightDelay {
                dest: r.dest.clone(),
                unique_carrier: r.unique_carrier.clone(),
                status: r.delay_status(),
            })
            .collect())
    }

    /// Shared query pipeline. `aggregate` may return None to leave a bucket out.
    fn run<T, F>(
        &self,
        origin: &str,
        keys: &[GroupKey],
        aggregate: F,
    ) -> Result<QueryReport<T>, QueryError>
    where
        F: Fn(&[&FlightRecord]) -> Result<Option<T>, QueryError>,
    {
        let flights = self.flights_from(origin)?;
        log::debug!(
            "Query for {origin}: {} flight(s), group keys {keys:?}",
            flights.len()
        );

        let summary = if keys.is_empty() {
            Summary::Overall(aggregate(&flights)?)
        } else {
            let mut groups = Vec::with_capacity(keys.len());
            for &key in keys {
                let grouped = group_by(key, &flights, self.config().bucket_width);
                let mut buckets = Vec::with_capacity(grouped.len());
                for bucket in grouped.buckets {
                    if let Some(value) = aggregate(&bucket.records)? {
                        buckets.push((bucket.label, value));
                    }
                }
                groups.push(GroupSummary {
                    key,
                    buckets,
                    excluded: grouped.excluded,
                });
            }
            Summary::Grouped(groups)
        };

        Ok(QueryReport {
            origin: origin.to_string(),
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryConfig;
    use std::num::NonZeroU32;

    fn flight(dest: &str, distance: u32, arr_delay: Option<i32>, cancelled: bool) -> FlightRecord {
        FlightRecord {
            dest: Some(dest.to_string()),
            unique_carrier: Some("AA".to_string()),
            day_of_week: Some(2),
            distance: Some(distance),
            arr_delay,
            cancelled,
            ..FlightRecord::new("JFK")
        }
    }

    fn create_test_store(width: u32) -> FlightStore {
        FlightStore::new(
            vec![
                flight("BOS", 10, Some(-5), false),
                flight("LAX", 60, Some(-15), true),
                FlightRecord {
                    origin: "SFO".to_string(),
                    ..flight("LAX", 337, Some(-1), false)
                },
            ],
            QueryConfig::new(NonZeroU32::new(width).unwrap()),
        )
    }

    fn grouped<T: Clone>(report: &QueryReport<T>) -> Vec<GroupSummary<T>> {
        match &report.summary {
            Summary::Grouped(groups) => groups.clone(),
            Summary::Overall(_) => panic!("expected a grouped summary"),
        }
    }

    #[test_log::test]
    fn test_distance_scenario() {
        let store = create_test_store(50);

        let delays = store.arrival_delay("JFK", &[GroupKey::Distance]).unwrap();
        let groups = grouped(&delays);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, GroupKey::Distance);
        assert_eq!(
            groups[0].get("0 - 50").map(ToString::to_string),
            Some("5 minute(s) late".to_string())
        );
        assert_eq!(
            groups[0].get("50 - 100").map(ToString::to_string),
            Some("15 minute(s) late".to_string())
        );

        let rates = store.cancellation("JFK", &[GroupKey::Distance]).unwrap();
        let groups = grouped(&rates);
        assert_eq!(groups[0].get("0 - 50").map(|r| r.value()), Some(0.0));
        assert_eq!(groups[0].get("50 - 100").map(|r| r.value()), Some(1.0));
    }

    #[test_log::test]
    fn test_overall() {
        let store = create_test_store(100);

        let delays = store.arrival_delay("jfk", &[]).unwrap();
        assert_eq!(delays.origin, "jfk");
        assert_eq!(
            delays.summary,
            Summary::Overall(Some(DelaySummary::Range { min: 5, max: 15 }))
        );

        let rates = store.cancellation("JFK", &[]).unwrap();
        match rates.summary {
            Summary::Overall(Some(rate)) => assert_eq!(rate.to_string(), "0.50"),
            other => panic!("unexpected summary {other:?}"),
        }
    }

    #[test_log::test]
    fn test_overall_without_late_flights() {
        let store = FlightStore::new(
            vec![flight("BOS", 10, Some(3), false), flight("BOS", 10, None, false)],
            QueryConfig::default(),
        );
        let delays = store.arrival_delay("JFK", &[]).unwrap();
        assert_eq!(delays.summary, Summary::Overall(None));
    }

    #[test_log::test]
    fn test_buckets_without_late_flights_are_omitted() {
        let store = FlightStore::new(
            vec![
                flight("BOS", 10, Some(-20), false),
                flight("ORD", 740, Some(12), false),
                flight("ORD", 740, Some(0), true),
            ],
            QueryConfig::default(),
        );

        let delays = store.arrival_delay("JFK", &[GroupKey::Destination]).unwrap();
        let groups = grouped(&delays);
        assert_eq!(groups[0].buckets.len(), 1);
        assert!(groups[0].get("ORD").is_none());

        // cancellation still reports every bucket
        let rates = store.cancellation("JFK", &[GroupKey::Destination]).unwrap();
        let groups = grouped(&rates);
        assert_eq!(groups[0].buckets.len(), 2);
        assert_eq!(groups[0].get("ORD").map(ToString::to_string), Some("0.50".to_string()));
    }

    #[test_log::test]
    fn test_multiple_group_keys() {
        let store = create_test_store(100);
        let keys = [GroupKey::Carrier, GroupKey::DayOfWeek];
        let rates = store.cancellation("JFK", &keys).unwrap();
        let groups = grouped(&rates);

        assert_eq!(groups.iter().map(|g| g.key).collect::<Vec<_>>(), keys);
        assert_eq!(groups[0].get("AA").map(|r| r.value()), Some(0.5));
        assert_eq!(groups[1].get("Tuesday").map(|r| r.value()), Some(0.5));
    }

    #[test_log::test]
    fn test_excluded_count_is_reported() {
        let store = FlightStore::new(
            vec![flight("BOS", 10, Some(-5), false), FlightRecord::new("JFK")],
            QueryConfig::default(),
        );
        let rates = store.cancellation("JFK", &[GroupKey::Destination]).unwrap();
        assert_eq!(grouped(&rates)[0].excluded, 1);
    }

    #[test_log::test]
    fn test_unknown_origin() {
        let store = create_test_store(100);
        assert_eq!(
            store.arrival_delay("XXX", &[]),
            Err(QueryError::OriginNotFound("XXX".to_string()))
        );
        assert_eq!(
            store.cancellation("XXX", &[GroupKey::Distance]),
            Err(QueryError::OriginNotFound("XXX".to_string()))
        );
        assert!(store.delay_statuses("XXX").is_err());
    }

    #[test]
    fn test_parse_group_keys() {
        assert_eq!(
            parse_group_keys(&["distance", "dest", "distance", "destination"]),
            Ok(vec![GroupKey::Distance, GroupKey::Destination])
        );
        assert_eq!(parse_group_keys::<&str>(&[]), Ok(vec![]));
        assert_eq!(
            parse_group_keys(&["carrier".to_string(), "bogus_key".to_string()]),
            Err(QueryError::InvalidGroupKey("bogus_key".to_string()))
        );
    }

    #[test_log::test]
    fn test_delay_statuses() {
        let store = FlightStore::new(
            vec![
                flight("BOS", 10, Some(-5), false),
                flight("LAX", 60, Some(8), false),
                flight("ORD", 740, Some(0), false),
                flight("SFO", 2586, None, true),
            ],
            QueryConfig::default(),
        );
        let statuses: Vec<String> = store
            .delay_statuses("JFK")
            .unwrap()
            .iter()
            .map(|f| f.status.to_string())
            .collect();
        assert_eq!(
            statuses,
            vec!["5 minute(s) late", "8 minute(s) early", "on time", "NaN"]
        );
    }
}
