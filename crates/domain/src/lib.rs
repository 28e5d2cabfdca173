// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod error;
mod heatmap;
mod picks;
mod ranking;
mod refinement;
mod types;
mod vote;
mod window;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use availability::{
    AvailabilityRecord, AvailabilitySubmission, DayEntry, WeekBlock, apply_submission,
    effective_days,
};
pub use error::DomainError;
pub use heatmap::{WindowScore, count_respondents, score_windows};
pub use picks::{DatePick, validate_picks};
pub use ranking::{Candidate, DEFAULT_CANDIDATE_COUNT, rank_picks, rank_windows, top_n};
pub use refinement::{
    MAX_PROMISING_WINDOWS, PROMISING_SCORE_RATIO, count_refined, has_refined, promising_windows,
    refinement_date_set,
};
pub use types::{
    AvailabilityStatus, CircleId, PickRank, SchedulingMode, Trip, TripId, TripKind, TripStatus,
    UserId,
};
pub use vote::{Vote, decode_option_key, encode_option_key};
pub use window::{PlanningWindow, TripWindow};
