// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine handler functions for state-changing and read-only operations.
//!
//! Write operations load the trip's state, run the pure state machine, and
//! persist the effects: per-member upserts for preference writes, a single
//! conditional status update for lifecycle transitions. Reads recompute the
//! schedule view from committed records and never write anything back.

use crate::error::{
    EngineError, translate_core_error, translate_domain_error, translate_read_error,
    translate_store_error,
};
use crate::request_response::{
    CandidateInfo, CastVoteResponse, HeatmapCellInfo, LockResponse, PromisingWindowInfo,
    ScheduleView, SubmitAvailabilityResponse, SubmitDatePicksResponse, TransitionResponse,
    VoteCountInfo,
};
use circle_trips::{Command, TransitionResult, TripState, apply};
use circle_trips_audit::{Actor, Cause};
use circle_trips_domain::{
    AvailabilitySubmission, Candidate, DEFAULT_CANDIDATE_COUNT, DatePick, SchedulingMode,
    TripId, TripStatus, UserId, count_refined, count_respondents, promising_windows, rank_picks,
    rank_windows, refinement_date_set, score_windows, top_n,
};
use circle_trips_store::{MembershipProvider, TripStore};
use std::collections::BTreeMap;
use time::Date;

/// Submits or replaces a member's availability.
///
/// # Arguments
///
/// * `store` - The trip store
/// * `trip_id` - The trip to submit for
/// * `user_id` - The submitting member
/// * `submission` - The submission, in any of the three accepted shapes
///
/// # Errors
///
/// Returns `TripLocked`/`TripCanceled` once the trip stopped accepting
/// writes, `InvalidRecord` for a malformed submission, and store errors.
pub fn submit_availability(
    store: &dyn TripStore,
    trip_id: &TripId,
    user_id: &UserId,
    submission: AvailabilitySubmission,
) -> Result<SubmitAvailabilityResponse, EngineError> {
    let state = load_state(store, trip_id)?;

    let result = apply(
        &state,
        Command::SubmitAvailability {
            user_id: user_id.clone(),
            submission: submission.clone(),
        },
        member_actor(user_id),
        operation_cause("submit-availability"),
    )
    .map_err(translate_core_error)?;

    // Validation already passed inside apply; this only recovers the count.
    let accepted = submission
        .to_records(&state.trip.planning_window)
        .map_err(translate_domain_error)?
        .len();

    let merged = result
        .new_state
        .availability
        .get(user_id)
        .cloned()
        .unwrap_or_default();
    let stored = store
        .upsert_records(trip_id, user_id, merged)
        .map_err(translate_read_error)?;
    store
        .append_audit(trip_id, result.audit_event)
        .map_err(translate_read_error)?;

    tracing::info!(trip_id = %trip_id, user_id = %user_id, accepted, "availability submitted");
    Ok(SubmitAvailabilityResponse { accepted, stored })
}

/// Submits or replaces a member's ranked date picks.
///
/// # Arguments
///
/// * `store` - The trip store
/// * `trip_id` - The trip to submit for
/// * `user_id` - The submitting member
/// * `picks` - The full replacement pick set (one to three picks)
///
/// # Errors
///
/// Returns `TripLocked`/`TripCanceled` once the trip stopped accepting
/// writes, `DuplicateRank` for a rank submitted twice, `InvalidWindow` for a
/// pick past the planning window, and store errors.
pub fn submit_date_picks(
    store: &dyn TripStore,
    trip_id: &TripId,
    user_id: &UserId,
    picks: Vec<DatePick>,
) -> Result<SubmitDatePicksResponse, EngineError> {
    let state = load_state(store, trip_id)?;
    let accepted = picks.len();

    let result = apply(
        &state,
        Command::SubmitDatePicks {
            user_id: user_id.clone(),
            picks,
        },
        member_actor(user_id),
        operation_cause("submit-date-picks"),
    )
    .map_err(translate_core_error)?;

    let replacement = result
        .new_state
        .picks
        .get(user_id)
        .cloned()
        .unwrap_or_default();
    store
        .upsert_picks(trip_id, user_id, replacement)
        .map_err(translate_read_error)?;
    store
        .append_audit(trip_id, result.audit_event)
        .map_err(translate_read_error)?;

    tracing::info!(trip_id = %trip_id, user_id = %user_id, accepted, "date picks submitted");
    Ok(SubmitDatePicksResponse { accepted })
}

/// Casts or replaces a member's vote for a candidate window.
///
/// # Arguments
///
/// * `store` - The trip store
/// * `trip_id` - The trip to vote on
/// * `user_id` - The voting member
/// * `option_key` - The encoded date-range key of the chosen window
///
/// # Errors
///
/// Returns `InvalidTransition` while the voting stage is not open,
/// `TripLocked`/`TripCanceled` once writes stopped, `InvalidRecord`/
/// `InvalidWindow` for a malformed key, and store errors.
pub fn cast_vote(
    store: &dyn TripStore,
    trip_id: &TripId,
    user_id: &UserId,
    option_key: String,
) -> Result<CastVoteResponse, EngineError> {
    let state = load_state(store, trip_id)?;

    let result = apply(
        &state,
        Command::CastVote {
            user_id: user_id.clone(),
            option_key: option_key.clone(),
        },
        member_actor(user_id),
        operation_cause("cast-vote"),
    )
    .map_err(translate_core_error)?;

    let Some(vote) = result.new_state.votes.get(user_id).cloned() else {
        return Err(EngineError::Store {
            message: String::from("vote transition recorded no vote"),
        });
    };
    store
        .upsert_vote(trip_id, user_id, vote)
        .map_err(translate_read_error)?;
    store
        .append_audit(trip_id, result.audit_event)
        .map_err(translate_read_error)?;

    Ok(CastVoteResponse { option_key })
}

/// Computes the read-side schedule view for a trip.
///
/// Aggregation, ranking, and refinement run on every read; nothing is
/// persisted, so the view cannot go stale.
///
/// # Arguments
///
/// * `store` - The trip store
/// * `membership` - The active-member roster provider
/// * `trip_id` - The trip to view
///
/// # Errors
///
/// Returns store errors only; the computation itself is total for stored
/// records.
#[allow(clippy::too_many_lines)]
pub fn get_schedule_view(
    store: &dyn TripStore,
    membership: &dyn MembershipProvider,
    trip_id: &TripId,
) -> Result<ScheduleView, EngineError> {
    let trip = store.get_trip(trip_id).map_err(translate_read_error)?;
    let roster = membership
        .active_members(trip_id)
        .map_err(translate_read_error)?;

    match trip.scheduling_mode {
        SchedulingMode::RankedPicks => {
            let picks = store.get_picks(trip_id).map_err(translate_read_error)?;
            let ranked = rank_picks(&picks, &roster, trip.trip_length_days)
                .map_err(translate_domain_error)?;
            let responded_count = roster
                .iter()
                .filter(|member| picks.get(member).is_some_and(|p| !p.is_empty()))
                .count();

            Ok(ScheduleView {
                status: trip.status.to_string(),
                candidates: candidate_infos(&top_n(ranked, DEFAULT_CANDIDATE_COUNT)),
                promising_windows: Vec::new(),
                heatmap: Vec::new(),
                vote_counts: Vec::new(),
                responded_count,
                refined_count: 0,
                active_member_count: roster.len(),
            })
        }
        SchedulingMode::AvailabilityPoll => {
            let records = store.get_records(trip_id).map_err(translate_read_error)?;
            let scores = score_windows(&records, &roster, &trip.planning_window, trip.trip_length_days)
                .map_err(translate_domain_error)?;
            let ranked = rank_windows(&scores);
            let responded_count = count_respondents(&records, &roster);

            // The refinement pass is offered only while the group is still
            // scheduling and at least one first pass exists.
            let promising = if trip.status == TripStatus::Scheduling && responded_count > 0 {
                promising_windows(&ranked)
            } else {
                Vec::new()
            };
            let refinement_set = refinement_date_set(&promising);
            let refined_count = count_refined(&records, &roster, &refinement_set);

            let vote_counts = if trip.status == TripStatus::Voting {
                let votes = store.get_votes(trip_id).map_err(translate_read_error)?;
                tally_votes(&votes, &roster)
            } else {
                Vec::new()
            };

            let heatmap = scores
                .iter()
                .map(|score| HeatmapCellInfo {
                    start_date: score.window.start(),
                    end_date: score.window.end(),
                    intensity: score.intensity,
                })
                .collect();

            Ok(ScheduleView {
                status: trip.status.to_string(),
                candidates: candidate_infos(&top_n(ranked, DEFAULT_CANDIDATE_COUNT)),
                promising_windows: promising
                    .iter()
                    .map(|candidate| PromisingWindowInfo {
                        start_date: candidate.window.start(),
                        end_date: candidate.window.end(),
                        score: candidate.score,
                    })
                    .collect(),
                heatmap,
                vote_counts,
                responded_count,
                refined_count,
                active_member_count: roster.len(),
            })
        }
    }
}

/// Opens the scheduling stage. Leader only.
///
/// # Errors
///
/// Returns `NotLeader` for a non-leader requester and `InvalidTransition`
/// from any status other than `Proposed`.
pub fn open_scheduling(
    store: &dyn TripStore,
    trip_id: &TripId,
    requested_by: &UserId,
) -> Result<TransitionResponse, EngineError> {
    let state = load_state(store, trip_id)?;
    let result = apply(
        &state,
        Command::OpenScheduling {
            requested_by: requested_by.clone(),
        },
        member_actor(requested_by),
        operation_cause("open-scheduling"),
    )
    .map_err(translate_core_error)?;

    commit_transition(store, trip_id, &state, &result, None)
}

/// Opens the voting stage (availability-poll mode only). Leader only.
///
/// # Errors
///
/// Returns `NotLeader` for a non-leader requester, `InvalidTransition` from
/// any status other than `Scheduling` or for a ranked trip, and `TripLocked`
/// after the dates were locked.
pub fn open_voting(
    store: &dyn TripStore,
    trip_id: &TripId,
    requested_by: &UserId,
) -> Result<TransitionResponse, EngineError> {
    let state = load_state(store, trip_id)?;
    let result = apply(
        &state,
        Command::OpenVoting {
            requested_by: requested_by.clone(),
        },
        member_actor(requested_by),
        operation_cause("open-voting"),
    )
    .map_err(translate_core_error)?;

    commit_transition(store, trip_id, &state, &result, None)
}

/// Irreversibly locks the trip's dates. Leader only.
///
/// The chosen window must pass window math but is otherwise an arbitrary
/// leader choice; top-ranked candidates are suggestions, not constraints.
/// The status change goes through the store's conditional update, so of two
/// concurrent lock attempts exactly one succeeds and the other observes
/// `AlreadyLocked`.
///
/// # Arguments
///
/// * `store` - The trip store
/// * `trip_id` - The trip to lock
/// * `requested_by` - The requesting member (must be the leader)
/// * `chosen_start` - The start day of the chosen window
///
/// # Errors
///
/// Returns `NotLeader`, `InvalidTransition` from a non-lockable status,
/// `InvalidWindow` for a window failing validation, and `AlreadyLocked` when
/// a concurrent lock won.
pub fn lock(
    store: &dyn TripStore,
    trip_id: &TripId,
    requested_by: &UserId,
    chosen_start: Date,
) -> Result<LockResponse, EngineError> {
    let state = load_state(store, trip_id)?;
    let result = apply(
        &state,
        Command::Lock {
            requested_by: requested_by.clone(),
            chosen_start,
        },
        member_actor(requested_by),
        operation_cause("lock"),
    )
    .map_err(translate_core_error)?;

    let Some(window) = result.new_state.trip.locked_window else {
        return Err(EngineError::Store {
            message: String::from("lock transition produced no window"),
        });
    };

    commit_transition(store, trip_id, &state, &result, Some(window))?;

    tracing::info!(trip_id = %trip_id, window = %window, "trip dates locked");
    Ok(LockResponse {
        locked_start_date: window.start(),
        locked_end_date: window.end(),
    })
}

/// Cancels the trip. Leader only; terminal.
///
/// # Errors
///
/// Returns `NotLeader` for a non-leader requester and `InvalidTransition`
/// from `Locked` or a terminal status.
pub fn cancel(
    store: &dyn TripStore,
    trip_id: &TripId,
    requested_by: &UserId,
) -> Result<TransitionResponse, EngineError> {
    let state = load_state(store, trip_id)?;
    let result = apply(
        &state,
        Command::Cancel {
            requested_by: requested_by.clone(),
        },
        member_actor(requested_by),
        operation_cause("cancel"),
    )
    .map_err(translate_core_error)?;

    commit_transition(store, trip_id, &state, &result, None)
}

/// Marks a locked trip as completed.
///
/// Completion is a time-based external trigger, so it is not leader-gated;
/// the engine only accepts the transition.
///
/// # Errors
///
/// Returns `InvalidTransition` from any status other than `Locked`.
pub fn complete(store: &dyn TripStore, trip_id: &TripId) -> Result<TransitionResponse, EngineError> {
    let state = load_state(store, trip_id)?;
    let result = apply(
        &state,
        Command::Complete,
        Actor::new(String::from("scheduler"), String::from("system")),
        operation_cause("complete"),
    )
    .map_err(translate_core_error)?;

    commit_transition(store, trip_id, &state, &result, None)
}

/// Loads a trip's full scheduling state.
fn load_state(store: &dyn TripStore, trip_id: &TripId) -> Result<TripState, EngineError> {
    let trip = store.get_trip(trip_id).map_err(translate_read_error)?;
    let availability = store.get_records(trip_id).map_err(translate_read_error)?;
    let picks = store.get_picks(trip_id).map_err(translate_read_error)?;
    let votes = store.get_votes(trip_id).map_err(translate_read_error)?;

    let mut state = TripState::new(trip);
    state.availability = availability;
    state.picks = picks;
    state.votes = votes;
    Ok(state)
}

/// Persists a status transition through the store's conditional update and
/// appends the audit event.
fn commit_transition(
    store: &dyn TripStore,
    trip_id: &TripId,
    state: &TripState,
    result: &TransitionResult,
    locked_window: Option<circle_trips_domain::TripWindow>,
) -> Result<TransitionResponse, EngineError> {
    let expected = state.trip.status;
    let target = result.new_state.trip.status;

    store
        .cas_trip_status(trip_id, expected, target, locked_window)
        .map_err(|err| translate_store_error(err, target))?;
    store
        .append_audit(trip_id, result.audit_event.clone())
        .map_err(translate_read_error)?;

    tracing::info!(trip_id = %trip_id, from = %expected, to = %target, "trip transitioned");
    Ok(TransitionResponse {
        status: target.to_string(),
    })
}

/// Builds an actor for a member-initiated operation.
fn member_actor(user_id: &UserId) -> Actor {
    Actor::new(user_id.value().to_string(), String::from("member"))
}

/// Builds the cause record for an engine operation.
fn operation_cause(operation: &str) -> Cause {
    Cause::new(
        format!("engine-{operation}"),
        format!("Engine operation '{operation}'"),
    )
}

/// Converts ranked candidates into response DTOs.
fn candidate_infos(candidates: &[Candidate]) -> Vec<CandidateInfo> {
    candidates
        .iter()
        .map(|candidate| CandidateInfo {
            start_date: candidate.window.start(),
            end_date: candidate.window.end(),
            score: candidate.score,
            love_count: candidate.love_count,
            can_count: candidate.can_count,
            might_count: candidate.might_count,
        })
        .collect()
}

/// Tallies active members' votes per option key, most votes first, ties by
/// key order.
fn tally_votes(
    votes: &BTreeMap<UserId, circle_trips_domain::Vote>,
    roster: &[UserId],
) -> Vec<VoteCountInfo> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for member in roster {
        if let Some(vote) = votes.get(member) {
            *counts.entry(vote.option_key.clone()).or_insert(0) += 1;
        }
    }
    let mut tallies: Vec<VoteCountInfo> = counts
        .into_iter()
        .map(|(option_key, count)| VoteCountInfo {
            option_key,
            votes: count,
        })
        .collect();
    tallies.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.option_key.cmp(&b.option_key)));
    tallies
}
