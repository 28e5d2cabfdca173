// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ranked date picks for the ranked scheduling model.
//!
//! A member holds at most one pick per rank (love / can / might) with three
//! distinct start days across them. Resubmission replaces the member's whole
//! pick set. Picks are scored directly by window, never expanded to per-day
//! records.

use crate::error::DomainError;
use crate::types::PickRank;
use crate::window::PlanningWindow;
use serde::{Deserialize, Serialize};
use time::Date;

/// A ranked preference for a trip-length window's start day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePick {
    /// The preference rank.
    pub rank: PickRank,
    /// The start day of the preferred window.
    pub start: Date,
}

impl DatePick {
    /// Creates a new `DatePick`.
    ///
    /// # Arguments
    ///
    /// * `rank` - The preference rank
    /// * `start` - The start day of the preferred window
    #[must_use]
    pub const fn new(rank: PickRank, start: Date) -> Self {
        Self { rank, start }
    }
}

/// Validates a member's full pick set.
///
/// A pick set may hold one to three picks. Each rank appears at most once,
/// start days are distinct across ranks, and every start must open a window
/// that fits the planning window.
///
/// # Arguments
///
/// * `picks` - The pick set to validate
/// * `planning` - The trip's planning window
/// * `trip_length_days` - The fixed trip length
///
/// # Errors
///
/// Returns an error if:
/// - The set is empty (`InvalidRecord`)
/// - A rank appears twice (`DuplicateRank`)
/// - A start day appears under two ranks (`DuplicatePickStart`)
/// - A start opens a window running past the planning window (`InvalidWindow`)
pub fn validate_picks(
    picks: &[DatePick],
    planning: &PlanningWindow,
    trip_length_days: u16,
) -> Result<(), DomainError> {
    if picks.is_empty() {
        return Err(DomainError::InvalidRecord {
            reason: String::from("pick set lists no picks"),
        });
    }

    let mut seen_ranks: Vec<PickRank> = Vec::with_capacity(picks.len());
    let mut seen_starts: Vec<Date> = Vec::with_capacity(picks.len());
    for pick in picks {
        if seen_ranks.contains(&pick.rank) {
            return Err(DomainError::DuplicateRank(pick.rank));
        }
        if seen_starts.contains(&pick.start) {
            return Err(DomainError::DuplicatePickStart(pick.start));
        }
        planning.validate_window(pick.start, trip_length_days)?;
        seen_ranks.push(pick.rank);
        seen_starts.push(pick.start);
    }
    Ok(())
}
