//! Day-of-week names.

use crate::UNRECOGNIZED_DAY;

/// Get the full name of a weekday from its dataset code (1 = Monday).
/// Codes outside 1-7 resolve to [`UNRECOGNIZED_DAY`].
pub fn day_name(code: u8) -> &'static str {
    match code {
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        7 => "Sunday",
        _ => UNRECOGNIZED_DAY,
    }
}

/// Whether a code names a real weekday.
pub fn is_recognized(code: u8) -> bool {
    (1..=7).contains(&code)
}
