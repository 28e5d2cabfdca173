// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the engine's
//! contract with the request layer.

use time::Date;

/// Response for a successful availability submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitAvailabilityResponse {
    /// The number of records accepted from this submission.
    pub accepted: usize,
    /// The number of records now held for the member.
    pub stored: usize,
}

/// Response for a successful date-pick submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitDatePicksResponse {
    /// The number of picks accepted (the member's full replacement set).
    pub accepted: usize,
}

/// Response for a successful vote.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CastVoteResponse {
    /// The option key the vote was recorded for.
    pub option_key: String,
}

/// One scored candidate window.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CandidateInfo {
    /// First day of the candidate window.
    pub start_date: Date,
    /// Last day of the candidate window.
    pub end_date: Date,
    /// The ranking score (composite for ranked trips, raw window score for
    /// availability trips).
    pub score: f64,
    /// Number of rank-1 (love) picks.
    pub love_count: usize,
    /// Number of rank-2 (can) picks.
    pub can_count: usize,
    /// Number of rank-3 (might) picks.
    pub might_count: usize,
}

/// One window offered for the refinement pass.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PromisingWindowInfo {
    /// First day of the window.
    pub start_date: Date,
    /// Last day of the window.
    pub end_date: Date,
    /// The window's ranking score.
    pub score: f64,
}

/// One heatmap cell: a valid start day and its normalized intensity.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeatmapCellInfo {
    /// The valid start day.
    pub start_date: Date,
    /// Last day of the window this start opens.
    pub end_date: Date,
    /// Normalized intensity in `[0, 1]`.
    pub intensity: f64,
}

/// The vote tally for one candidate window.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VoteCountInfo {
    /// The encoded date-range key of the window.
    pub option_key: String,
    /// Number of votes currently held by the window.
    pub votes: usize,
}

/// The read-side view of a trip's scheduling state.
///
/// The view is recomputed from committed records on every read and never
/// persisted, so it cannot go stale.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleView {
    /// The trip's current lifecycle status.
    pub status: String,
    /// Top candidate windows, ranking order.
    pub candidates: Vec<CandidateInfo>,
    /// Windows offered for the refinement pass (availability trips while
    /// still scheduling; empty otherwise).
    pub promising_windows: Vec<PromisingWindowInfo>,
    /// Per-start-day intensities (availability trips; empty for ranked).
    pub heatmap: Vec<HeatmapCellInfo>,
    /// Vote tallies (during the voting stage; empty otherwise).
    pub vote_counts: Vec<VoteCountInfo>,
    /// Number of active members who have responded.
    pub responded_count: usize,
    /// Number of active members who have refined.
    pub refined_count: usize,
    /// Size of the active member roster at read time.
    pub active_member_count: usize,
}

/// Response for a successful lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionResponse {
    /// The trip's new status.
    pub status: String,
}

/// Response for a successful lock.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LockResponse {
    /// First day of the locked trip.
    pub locked_start_date: Date,
    /// Last day of the locked trip.
    pub locked_end_date: Date,
}
