/// Everything that can make a flight query fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No flight departs from the requested origin.
    OriginNotFound(String),

    /// A group key outside the supported set was requested.
    InvalidGroupKey(String),

    /// A bucket with no flights reached an aggregator.
    /// Grouping never produces one, so this is a bug rather than bad input.
    EmptyBucketAggregation,
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OriginNotFound(origin) => {
                write!(f, "No flights found departing from {origin}")
            }
            Self::InvalidGroupKey(key) => {
                write!(
                    f,
                    "Unsupported group key {key:?}, expected one of destination, carrier, day_of_week, distance"
                )
            }
            Self::EmptyBucketAggregation => {
                write!(f, "Attempted to aggregate an empty bucket")
            }
        }
    }
}

impl std::error::Error for QueryError {}

/// Result helper type
pub type Result<T> = std::result::Result<T, QueryError>;
