// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Promising-window selection for the refinement pass.
//!
//! Once a first preference pass exists in the availability model, the
//! highest-scoring windows are offered back to the group for a second,
//! per-day-only pass. The refinement date set is the union of those windows'
//! days. A member's "responded" and "refined" flags are independent:
//! responded means any availability record exists, refined means at least one
//! per-day record falls inside the refinement set.

use crate::availability::AvailabilityRecord;
use crate::ranking::Candidate;
use crate::types::UserId;
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// A window is promising when its score reaches this share of the top score.
pub const PROMISING_SCORE_RATIO: f64 = 0.6;

/// At most this many windows are offered for refinement.
pub const MAX_PROMISING_WINDOWS: usize = 5;

/// Selects the promising windows from a ranked candidate list.
///
/// # Arguments
///
/// * `candidates` - Candidates sorted by the ranking order
///
/// # Returns
///
/// The candidates scoring at least [`PROMISING_SCORE_RATIO`] of the best,
/// capped at [`MAX_PROMISING_WINDOWS`]. Empty when no candidate has a
/// positive score.
#[must_use]
pub fn promising_windows(candidates: &[Candidate]) -> Vec<Candidate> {
    let Some(best) = candidates.first() else {
        return Vec::new();
    };
    if best.score <= 0.0 {
        return Vec::new();
    }
    let threshold = best.score * PROMISING_SCORE_RATIO;
    candidates
        .iter()
        .filter(|candidate| candidate.score >= threshold)
        .take(MAX_PROMISING_WINDOWS)
        .copied()
        .collect()
}

/// Unions the covered days of the promising windows.
#[must_use]
pub fn refinement_date_set(promising: &[Candidate]) -> BTreeSet<Date> {
    promising
        .iter()
        .flat_map(|candidate| candidate.window.days())
        .collect()
}

/// Returns whether a member has refined: at least one per-day record whose
/// day falls inside the refinement set.
#[must_use]
pub fn has_refined(records: &[AvailabilityRecord], refinement_set: &BTreeSet<Date>) -> bool {
    records.iter().any(|record| match record {
        AvailabilityRecord::Day { day, .. } => refinement_set.contains(day),
        AvailabilityRecord::Span { .. } => false,
    })
}

/// Counts roster members who have refined.
#[must_use]
pub fn count_refined(
    records: &BTreeMap<UserId, Vec<AvailabilityRecord>>,
    roster: &[UserId],
    refinement_set: &BTreeSet<Date>,
) -> usize {
    roster
        .iter()
        .filter(|member| {
            records
                .get(member)
                .is_some_and(|r| has_refined(r, refinement_set))
        })
        .count()
}
