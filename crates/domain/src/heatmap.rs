// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Heatmap aggregation for the availability model.
//!
//! This module folds every member's effective per-day statuses into one score
//! per valid start day. Scores are **computed, not stored**: they are a pure
//! function of the already-committed records and the roster at read time, so
//! there is no derived state to go stale.

use crate::availability::{AvailabilityRecord, effective_days};
use crate::error::DomainError;
use crate::types::UserId;
use crate::window::{PlanningWindow, TripWindow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The aggregate score of one candidate window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowScore {
    /// The scored window.
    pub window: TripWindow,
    /// Raw score: sum of per-day weights across all responding members and
    /// all days in the window. Unavailable days contribute zero, never a
    /// negative penalty.
    pub raw: f64,
    /// Raw score normalized into `[0, 1]` for presentation: raw divided by
    /// `trip_length_days × active_member_count`.
    pub intensity: f64,
}

/// Scores every valid start day of the planning window.
///
/// Members outside the roster (those who left the trip) are skipped; days a
/// responding member did not cover contribute zero.
///
/// # Arguments
///
/// * `records` - Per-member stored availability records
/// * `roster` - The active member roster at read time
/// * `planning` - The trip's planning window
/// * `trip_length_days` - The fixed trip length
///
/// # Returns
///
/// One [`WindowScore`] per valid start day, in start-day order.
///
/// # Errors
///
/// Returns `DomainError::InvalidRange` if `trip_length_days` is zero.
pub fn score_windows(
    records: &BTreeMap<UserId, Vec<AvailabilityRecord>>,
    roster: &[UserId],
    planning: &PlanningWindow,
    trip_length_days: u16,
) -> Result<Vec<WindowScore>, DomainError> {
    let member_days: Vec<_> = roster
        .iter()
        .filter_map(|member| records.get(member))
        .filter(|member_records| !member_records.is_empty())
        .map(|member_records| effective_days(member_records))
        .collect();

    let active_count = roster.len();
    let denominator = f64::from(trip_length_days) * usize_to_f64(active_count);

    let mut scores = Vec::new();
    for start in planning.valid_starts(trip_length_days)? {
        let window = TripWindow::from_start(start, trip_length_days)?;
        let mut raw = 0.0_f64;
        for days in &member_days {
            for day in window.days() {
                if let Some(status) = days.get(&day) {
                    raw += status.weight();
                }
            }
        }
        let intensity = if denominator > 0.0 {
            (raw / denominator).clamp(0.0, 1.0)
        } else {
            0.0
        };
        scores.push(WindowScore {
            window,
            raw,
            intensity,
        });
    }
    Ok(scores)
}

/// Counts roster members who have submitted at least one availability record.
#[must_use]
pub fn count_respondents(
    records: &BTreeMap<UserId, Vec<AvailabilityRecord>>,
    roster: &[UserId],
) -> usize {
    roster
        .iter()
        .filter(|member| records.get(member).is_some_and(|r| !r.is_empty()))
        .count()
}

/// Converts a count to `f64` for normalization.
///
/// Rosters are far below the 2^52 precision bound.
#[allow(clippy::cast_precision_loss)]
const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}
