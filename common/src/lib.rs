//! A library for answering aggregate queries over historical on-time flight data.

pub mod cancellation;
pub mod dataset;
pub mod delay;
pub mod distance;
pub mod error;
pub mod grouping;
pub mod query;
pub mod record;
pub mod store;
pub mod weekday;

pub use error::QueryError;
pub use record::FlightRecord;
pub use store::{FlightStore, QueryConfig};

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Width of each distance bucket (in miles) when nothing else is configured.
pub const DEFAULT_BUCKET_WIDTH: NonZeroU32 = NonZeroU32::new(100).expect("non-zero literal");

/// Bucket label for a day-of-week code outside 1-7.
pub const UNRECOGNIZED_DAY: &str = "NOT_RECOGNIZED";

/// Each attribute a query can partition flights by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    /// The arrival airport (`dest`).
    Destination,
    /// The operating airline (`unique_carrier`).
    Carrier,
    /// The weekday the flight departed on, by name.
    DayOfWeek,
    /// Fixed-width distance intervals spanning the queried flights.
    Distance,
}

impl GroupKey {
    pub const ALL: [GroupKey; 4] = [
        GroupKey::Destination,
        GroupKey::Carrier,
        GroupKey::DayOfWeek,
        GroupKey::Distance,
    ];

    /// The name used for this key in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            GroupKey::Destination => "destination",
            GroupKey::Carrier => "carrier",
            GroupKey::DayOfWeek => "day_of_week",
            GroupKey::Distance => "distance",
        }
    }

    /// The display label used when labelling grouped output.
    pub fn label(self) -> &'static str {
        match self {
            GroupKey::Destination => "Destination",
            GroupKey::Carrier => "Flight_Carrier",
            GroupKey::DayOfWeek => "Day_of_the_Week",
            GroupKey::Distance => "Distance",
        }
    }
}

impl FromStr for GroupKey {
    type Err = QueryError;

    /// Accepts the key names as well as the raw dataset field they group on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "destination" | "dest" => Ok(GroupKey::Destination),
            "carrier" | "unique_carrier" => Ok(GroupKey::Carrier),
            "day_of_week" => Ok(GroupKey::DayOfWeek),
            "distance" => Ok(GroupKey::Distance),
            other => Err(QueryError::InvalidGroupKey(other.to_string())),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
