// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate ranking.
//!
//! Reduces a score surface (ranked picks or heatmap window scores) into an
//! ordered list of candidate windows. Ordering is deterministic: descending
//! score, ties broken by earliest start day, so re-running with unchanged
//! input always yields an identical list.

use crate::error::DomainError;
use crate::heatmap::WindowScore;
use crate::picks::DatePick;
use crate::types::{PickRank, UserId};
use crate::window::TripWindow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The number of candidates surfaced to the group by default.
pub const DEFAULT_CANDIDATE_COUNT: usize = 3;

/// A scored, rankable date window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// The candidate window.
    pub window: TripWindow,
    /// The ranking score. For the ranked model this is the composite
    /// `3·love + 2·can + 1·might`; for the availability model it is the raw
    /// window score.
    pub score: f64,
    /// Number of rank-1 (love) picks. Zero in the availability model.
    pub love_count: usize,
    /// Number of rank-2 (can) picks. Zero in the availability model.
    pub can_count: usize,
    /// Number of rank-3 (might) picks. Zero in the availability model.
    pub might_count: usize,
}

/// Ranks candidates from members' date picks (ranked model).
///
/// Every distinct start day appearing in an active member's picks becomes a
/// candidate; picks from members who left the trip are skipped.
///
/// # Arguments
///
/// * `picks` - Per-member stored pick sets
/// * `roster` - The active member roster at read time
/// * `trip_length_days` - The fixed trip length
///
/// # Errors
///
/// Returns an error if a stored start day can no longer form a window
/// (`DateArithmeticOverflow`).
pub fn rank_picks(
    picks: &BTreeMap<UserId, Vec<DatePick>>,
    roster: &[UserId],
    trip_length_days: u16,
) -> Result<Vec<Candidate>, DomainError> {
    #[derive(Default)]
    struct Tally {
        love: usize,
        can: usize,
        might: usize,
    }

    let mut tallies: BTreeMap<time::Date, Tally> = BTreeMap::new();
    for member in roster {
        let Some(member_picks) = picks.get(member) else {
            continue;
        };
        for pick in member_picks {
            let tally = tallies.entry(pick.start).or_default();
            match pick.rank {
                PickRank::Love => tally.love += 1,
                PickRank::Can => tally.can += 1,
                PickRank::Might => tally.might += 1,
            }
        }
    }

    let mut candidates = Vec::with_capacity(tallies.len());
    for (start, tally) in tallies {
        let window = TripWindow::from_start(start, trip_length_days)?;
        let composite = PickRank::Love.weight() * count_to_u32(tally.love)
            + PickRank::Can.weight() * count_to_u32(tally.can)
            + PickRank::Might.weight() * count_to_u32(tally.might);
        candidates.push(Candidate {
            window,
            score: f64::from(composite),
            love_count: tally.love,
            can_count: tally.can,
            might_count: tally.might,
        });
    }
    sort_candidates(&mut candidates);
    Ok(candidates)
}

/// Ranks candidates from heatmap window scores (availability model).
#[must_use]
pub fn rank_windows(scores: &[WindowScore]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = scores
        .iter()
        .map(|score| Candidate {
            window: score.window,
            score: score.raw,
            love_count: 0,
            can_count: 0,
            might_count: 0,
        })
        .collect();
    sort_candidates(&mut candidates);
    candidates
}

/// Truncates a ranked candidate list to its top `n` entries.
#[must_use]
pub fn top_n(mut candidates: Vec<Candidate>, n: usize) -> Vec<Candidate> {
    candidates.truncate(n);
    candidates
}

/// Sorts descending by score, ties broken by earliest start day.
fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.window.start().cmp(&b.window.start()))
    });
}

/// Converts a tally count to `u32` for the composite score.
fn count_to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
