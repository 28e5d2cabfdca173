// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Votes on candidate windows (availability-poll model only).
//!
//! During the voting stage each member holds at most one vote, keyed by an
//! encoded date-range string. Resubmission replaces the member's prior vote.

use crate::error::DomainError;
use crate::window::{PlanningWindow, TripWindow};
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

/// A member's vote for one candidate window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// The encoded date-range key of the chosen window.
    pub option_key: String,
}

impl Vote {
    /// Creates a new `Vote`.
    ///
    /// # Arguments
    ///
    /// * `option_key` - The encoded date-range key
    #[must_use]
    pub const fn new(option_key: String) -> Self {
        Self { option_key }
    }
}

/// Encodes a trip window as a vote option key.
///
/// The key format is `<start>_<end>` with ISO calendar dates, e.g.
/// `2025-06-04_2025-06-06`.
#[must_use]
pub fn encode_option_key(window: &TripWindow) -> String {
    let format = format_description!("[year]-[month]-[day]");
    // Formatting a valid Date with this description cannot fail.
    let start = window.start().format(&format).unwrap_or_default();
    let end = window.end().format(&format).unwrap_or_default();
    format!("{start}_{end}")
}

/// Decodes a vote option key back into a trip window and validates it.
///
/// # Arguments
///
/// * `key` - The encoded date-range key
/// * `planning` - The trip's planning window
/// * `trip_length_days` - The fixed trip length
///
/// # Errors
///
/// Returns an error if:
/// - The key is not two `_`-separated ISO dates (`InvalidOptionKey`)
/// - The decoded range does not match the trip length (`InvalidOptionKey`)
/// - The window does not fit the planning window (`InvalidWindow`)
pub fn decode_option_key(
    key: &str,
    planning: &PlanningWindow,
    trip_length_days: u16,
) -> Result<TripWindow, DomainError> {
    let Some((start_part, end_part)) = key.split_once('_') else {
        return Err(DomainError::InvalidOptionKey(key.to_string()));
    };
    let start = parse_iso_date(start_part)?;
    let end = parse_iso_date(end_part)?;

    let window = planning.validate_window(start, trip_length_days)?;
    if window.end() != end {
        return Err(DomainError::InvalidOptionKey(key.to_string()));
    }
    Ok(window)
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format).map_err(|err| DomainError::DateParseError {
        date_string: value.to_string(),
        error: err.to_string(),
    })
}
