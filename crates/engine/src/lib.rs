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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::{
    EngineError, translate_core_error, translate_domain_error, translate_read_error,
    translate_store_error,
};
pub use handlers::{
    cancel, cast_vote, complete, get_schedule_view, lock, open_scheduling, open_voting,
    submit_availability, submit_date_picks,
};
pub use request_response::{
    CandidateInfo, CastVoteResponse, HeatmapCellInfo, LockResponse, PromisingWindowInfo,
    ScheduleView, SubmitAvailabilityResponse, SubmitDatePicksResponse, TransitionResponse,
    VoteCountInfo,
};
