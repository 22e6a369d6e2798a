//! The flight record and the lenient field parsing the source dataset needs.
//!
//! The on-time dataset stores most numbers as strings and encodes unknown
//! values as empty strings, so numeric fields accept a JSON number, a numeric
//! string, an empty string or `null`. Anything that cannot be read as the
//! target type is treated as missing.

use crate::delay::DelayStatus;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// A single historical flight. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Departure airport code.
    #[serde(deserialize_with = "deserialize_required_text")]
    pub origin: String,
    /// Arrival airport code.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dest: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub unique_carrier: Option<String>,
    /// 1 (Monday) through 7 (Sunday).
    #[serde(
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub day_of_week: Option<u8>,
    /// Flight distance in miles.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance: Option<u32>,
    /// Arrival delay in minutes. Negative values mean the flight arrived late.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub arr_delay: Option<i32>,
    #[serde(
        deserialize_with = "deserialize_flag",
        serialize_with = "serialize_flag"
    )]
    pub cancelled: bool,
    /// Every other column of the source row, kept verbatim for listings.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl FlightRecord {
    /// A record departing from `origin` with every optional field missing.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            dest: None,
            unique_carrier: None,
            day_of_week: None,
            distance: None,
            arr_delay: None,
            cancelled: false,
            extra: BTreeMap::new(),
        }
    }

    /// Classify this flight's arrival against its schedule.
    pub fn delay_status(&self) -> DelayStatus {
        DelayStatus::from_arr_delay(self.arr_delay)
    }
}

fn deserialize_required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        other => Err(D::Error::custom(format!(
            "expected a string, found {other}"
        ))),
    }
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<i64>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().and_then(|v| T::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let flag = match &value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim() {
            "0" | "false" => Some(false),
            "1" | "true" => Some(true),
            _ => None,
        },
        _ => None,
    };
    flag.ok_or_else(|| D::Error::custom(format!("expected a 0/1 cancellation flag, found {value}")))
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_flag<S>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*flag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_string_encoded_row() {
        let record: FlightRecord = serde_json::from_value(json!({
            "origin": "JFK",
            "dest": "LAX",
            "unique_carrier": "AA",
            "day_of_week": "3",
            "distance": "2475",
            "arr_delay": "-12",
            "cancelled": "0",
            "flight_num": "1"
        }))
        .unwrap();

        assert_eq!(record.origin, "JFK");
        assert_eq!(record.dest.as_deref(), Some("LAX"));
        assert_eq!(record.unique_carrier.as_deref(), Some("AA"));
        assert_eq!(record.day_of_week, Some(3));
        assert_eq!(record.distance, Some(2475));
        assert_eq!(record.arr_delay, Some(-12));
        assert!(!record.cancelled);
        assert_eq!(record.extra.get("flight_num"), Some(&json!("1")));
    }

    #[test]
    fn test_deserialize_native_numbers() {
        let record: FlightRecord = serde_json::from_value(json!({
            "origin": "SFO",
            "day_of_week": 7,
            "distance": 337,
            "arr_delay": 4,
            "cancelled": 1
        }))
        .unwrap();

        assert_eq!(record.day_of_week, Some(7));
        assert_eq!(record.distance, Some(337));
        assert_eq!(record.arr_delay, Some(4));
        assert!(record.cancelled);
        assert_eq!(record.dest, None);
    }

    #[test]
    fn test_unknown_values_become_missing() {
        let record: FlightRecord = serde_json::from_value(json!({
            "origin": "JFK",
            "dest": "",
            "day_of_week": "",
            "distance": "far",
            "arr_delay": null,
            "cancelled": "0"
        }))
        .unwrap();

        assert_eq!(record.dest, None);
        assert_eq!(record.day_of_week, None);
        assert_eq!(record.distance, None);
        assert_eq!(record.arr_delay, None);
        // absent columns are missing too
        assert_eq!(record.unique_carrier, None);
    }

    #[test]
    fn test_negative_distance_is_missing() {
        let record: FlightRecord =
            serde_json::from_value(json!({"origin": "JFK", "distance": -5, "cancelled": 0}))
                .unwrap();
        assert_eq!(record.distance, None);
    }

    #[test]
    fn test_required_fields() {
        assert!(serde_json::from_value::<FlightRecord>(json!({"cancelled": "0"})).is_err());
        assert!(serde_json::from_value::<FlightRecord>(json!({"origin": "JFK"})).is_err());
        assert!(
            serde_json::from_value::<FlightRecord>(json!({"origin": "JFK", "cancelled": "2"}))
                .is_err()
        );
    }

    #[test]
    fn test_serialize_omits_missing_fields() {
        let record = FlightRecord {
            distance: Some(60),
            cancelled: true,
            ..FlightRecord::new("JFK")
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"origin": "JFK", "distance": 60, "cancelled": 1})
        );
    }
}
