//! Arrival delay classification and summaries.
//!
//! In this dataset `arr_delay` counts minutes *under* schedule: a negative
//! value is a late arrival and a positive value an early one.

use crate::FlightRecord;
use itertools::{Itertools, MinMaxResult};
use serde::{Serialize, Serializer};
use std::fmt;

/// How a single flight arrived relative to its schedule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DelayStatus {
    /// Arrived this many minutes late.
    Late(u32),
    /// Arrived this many minutes early.
    Early(u32),
    OnTime,
    /// No arrival delay was recorded.
    Unknown,
}

impl DelayStatus {
    pub fn from_arr_delay(arr_delay: Option<i32>) -> Self {
        match arr_delay {
            None => DelayStatus::Unknown,
            Some(0) => DelayStatus::OnTime,
            Some(d) if d < 0 => DelayStatus::Late(d.unsigned_abs()),
            Some(d) => DelayStatus::Early(d.unsigned_abs()),
        }
    }

    /// The lateness in minutes, for late flights only.
    pub fn late_minutes(self) -> Option<u32> {
        match self {
            DelayStatus::Late(minutes) => Some(minutes),
            _ => None,
        }
    }
}

impl fmt::Display for DelayStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DelayStatus::Late(m) => write!(f, "{m} minute(s) late"),
            DelayStatus::Early(m) => write!(f, "{m} minute(s) early"),
            DelayStatus::OnTime => write!(f, "on time"),
            DelayStatus::Unknown => write!(f, "NaN"),
        }
    }
}

impl Serialize for DelayStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The spread of lateness among the late flights of a bucket.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DelaySummary {
    /// Every late flight was late by the same amount.
    Single(u32),
    Range { min: u32, max: u32 },
}

impl fmt::Display for DelaySummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DelaySummary::Single(m) => write!(f, "{m} minute(s) late"),
            DelaySummary::Range { min, max } => write!(f, "{min} - {max} minute(s) late"),
        }
    }
}

impl Serialize for DelaySummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Summarize how late the late flights in a bucket were.
/// Returns None if no flight in the bucket arrived late.
pub fn summarize(bucket: &[&FlightRecord]) -> Option<DelaySummary> {
    let late = bucket.iter().filter_map(|r| r.delay_status().late_minutes());
    match late.minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(m) => Some(DelaySummary::Single(m)),
        MinMaxResult::MinMax(min, max) if min == max => Some(DelaySummary::Single(min)),
        MinMaxResult::MinMax(min, max) => Some(DelaySummary::Range { min, max }),
    }
}
