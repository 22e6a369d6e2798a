//! JSON bodies for query results, keyed the way existing consumers expect.

use ontime_common::query::{QueryReport, Summary};
use serde_json::{Map, Value};
use std::fmt::Display;

const FLYING_FROM: &str = "Flying_from";
const DELAY_OVERALL: &str = "Output - Expected time of Arrival Delay";
const DELAY_GROUP: &str = "Output - Expected time of Arrival Delay - Group: ";
const CANCELLATION_OVERALL: &str = "Output - Cancelled Possibility";
const CANCELLATION_GROUP: &str = "Output - Cancellation Possibility - Group: ";

/// Body for an arrival delay query.
pub fn delay_body<T: Display>(report: &QueryReport<T>) -> Value {
    render(report, DELAY_OVERALL, DELAY_GROUP)
}

/// Body for a cancellation query.
pub fn cancellation_body<T: Display>(report: &QueryReport<T>) -> Value {
    render(report, CANCELLATION_OVERALL, CANCELLATION_GROUP)
}

fn render<T: Display>(report: &QueryReport<T>, overall_key: &str, group_prefix: &str) -> Value {
    let mut body = Map::new();
    body.insert(FLYING_FROM.to_string(), Value::String(report.origin.clone()));

    match &report.summary {
        Summary::Overall(Some(value)) => {
            body.insert(overall_key.to_string(), Value::String(value.to_string()));
        }
        // nothing to report, leave the entry out
        Summary::Overall(None) => {}
        Summary::Grouped(groups) => {
            for group in groups {
                let buckets: Map<String, Value> = group
                    .buckets
                    .iter()
                    .map(|(label, value)| (label.clone(), Value::String(value.to_string())))
                    .collect();
                body.insert(
                    format!("{group_prefix}{}", group.key.label()),
                    Value::Object(buckets),
                );
            }
        }
    }

    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontime_common::GroupKey;
    use ontime_common::delay::DelaySummary;
    use ontime_common::query::GroupSummary;
    use serde_json::json;

    #[test]
    fn test_delay_body_overall() {
        let report = QueryReport {
            origin: "JFK".to_string(),
            summary: Summary::Overall(Some(DelaySummary::Range { min: 2, max: 30 })),
        };
        assert_eq!(
            delay_body(&report),
            json!({
                "Flying_from": "JFK",
                "Output - Expected time of Arrival Delay": "2 - 30 minute(s) late"
            })
        );
    }

    #[test]
    fn test_delay_body_nothing_late() {
        let report: QueryReport<DelaySummary> = QueryReport {
            origin: "JFK".to_string(),
            summary: Summary::Overall(None),
        };
        assert_eq!(delay_body(&report), json!({"Flying_from": "JFK"}));
    }

    #[test]
    fn test_delay_body_grouped() {
        let report = QueryReport {
            origin: "jfk".to_string(),
            summary: Summary::Grouped(vec![
                GroupSummary {
                    key: GroupKey::Distance,
                    buckets: vec![("0 - 50".to_string(), DelaySummary::Single(5))],
                    excluded: 0,
                },
                GroupSummary {
                    key: GroupKey::Carrier,
                    buckets: vec![],
                    excluded: 3,
                },
            ]),
        };
        assert_eq!(
            delay_body(&report),
            json!({
                "Flying_from": "jfk",
                "Output - Expected time of Arrival Delay - Group: Distance": {
                    "0 - 50": "5 minute(s) late"
                },
                "Output - Expected time of Arrival Delay - Group: Flight_Carrier": {}
            })
        );
    }

    #[test]
    fn test_cancellation_body_grouped() {
        let report = QueryReport {
            origin: "JFK".to_string(),
            summary: Summary::Grouped(vec![GroupSummary {
                key: GroupKey::DayOfWeek,
                buckets: vec![
                    ("Monday".to_string(), "0.25".to_string()),
                    ("Friday".to_string(), "1.00".to_string()),
                ],
                excluded: 0,
            }]),
        };
        assert_eq!(
            cancellation_body(&report),
            json!({
                "Flying_from": "JFK",
                "Output - Cancellation Possibility - Group: Day_of_the_Week": {
                    "Monday": "0.25",
                    "Friday": "1.00"
                }
            })
        );
    }
}
