// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{TransitionResult, TripState};
use circle_trips_audit::{Action, Actor, AuditEvent, Cause};
use circle_trips_domain::{
    SchedulingMode, Trip, TripStatus, UserId, Vote, apply_submission, decode_option_key,
    validate_picks,
};

/// Applies a command to the state, producing a new state and audit event.
///
/// The function is pure: the input state is never mutated, and the same
/// inputs always produce the same result. Persisting the new state — and in
/// particular applying status changes through a conditional update — is the
/// caller's responsibility.
///
/// # Arguments
///
/// * `state` - The current trip state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates a domain rule, the requester is
/// not the leader of a leader-only transition, or the trip's status does not
/// admit the command.
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &TripState,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SubmitAvailability {
            user_id,
            submission,
        } => {
            ensure_accepts_writes(&state.trip)?;

            let incoming = submission.to_records(&state.trip.planning_window)?;
            let merged = state.availability.get(&user_id).map_or_else(
                || incoming.clone(),
                |existing| apply_submission(existing, &incoming),
            );

            let before = state.to_snapshot();
            let mut new_state = state.clone();
            new_state.availability.insert(user_id.clone(), merged);

            let action = Action::new(
                String::from("SubmitAvailability"),
                Some(format!(
                    "Member {user_id} submitted {} availability record(s)",
                    incoming.len()
                )),
            );
            let audit_event = AuditEvent::new(
                state.trip.id.clone(),
                actor,
                cause,
                action,
                before,
                new_state.to_snapshot(),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::SubmitDatePicks { user_id, picks } => {
            ensure_accepts_writes(&state.trip)?;
            validate_picks(
                &picks,
                &state.trip.planning_window,
                state.trip.trip_length_days,
            )?;

            let before = state.to_snapshot();
            let mut new_state = state.clone();
            let pick_count = picks.len();
            new_state.picks.insert(user_id.clone(), picks);

            let action = Action::new(
                String::from("SubmitDatePicks"),
                Some(format!("Member {user_id} submitted {pick_count} pick(s)")),
            );
            let audit_event = AuditEvent::new(
                state.trip.id.clone(),
                actor,
                cause,
                action,
                before,
                new_state.to_snapshot(),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::CastVote {
            user_id,
            option_key,
        } => {
            ensure_accepts_writes(&state.trip)?;
            if state.trip.status != TripStatus::Voting {
                return Err(CoreError::InvalidTransition {
                    from: state.trip.status,
                    to: TripStatus::Voting,
                });
            }
            decode_option_key(
                &option_key,
                &state.trip.planning_window,
                state.trip.trip_length_days,
            )?;

            let before = state.to_snapshot();
            let mut new_state = state.clone();
            new_state
                .votes
                .insert(user_id.clone(), Vote::new(option_key.clone()));

            let action = Action::new(
                String::from("CastVote"),
                Some(format!("Member {user_id} voted for {option_key}")),
            );
            let audit_event = AuditEvent::new(
                state.trip.id.clone(),
                actor,
                cause,
                action,
                before,
                new_state.to_snapshot(),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::OpenScheduling { requested_by } => transition_status(
            state,
            &requested_by,
            TripStatus::Scheduling,
            "OpenScheduling",
            actor,
            cause,
        ),
        Command::OpenVoting { requested_by } => {
            ensure_accepts_writes(&state.trip)?;
            // Ranked trips have no voting stage; candidates come straight
            // from the picks.
            if state.trip.scheduling_mode != SchedulingMode::AvailabilityPoll {
                return Err(CoreError::InvalidTransition {
                    from: state.trip.status,
                    to: TripStatus::Voting,
                });
            }
            transition_status(
                state,
                &requested_by,
                TripStatus::Voting,
                "OpenVoting",
                actor,
                cause,
            )
        }
        Command::Lock {
            requested_by,
            chosen_start,
        } => {
            if !state.trip.is_leader(&requested_by) {
                return Err(CoreError::NotLeader {
                    user_id: requested_by,
                });
            }
            match state.trip.status {
                TripStatus::Locked => return Err(CoreError::AlreadyLocked),
                TripStatus::Canceled => return Err(CoreError::TripCanceled),
                status if !status.is_lockable() => {
                    return Err(CoreError::InvalidTransition {
                        from: status,
                        to: TripStatus::Locked,
                    });
                }
                _ => {}
            }
            // Any window that passes window math may be locked; the leader
            // is not restricted to top-ranked candidates.
            let window = state
                .trip
                .planning_window
                .validate_window(chosen_start, state.trip.trip_length_days)?;

            let before = state.to_snapshot();
            let mut new_state = state.clone();
            new_state.trip.status = TripStatus::Locked;
            new_state.trip.locked_window = Some(window);

            let action = Action::new(
                String::from("LockDates"),
                Some(format!("Locked trip dates to {window}")),
            );
            let audit_event = AuditEvent::new(
                state.trip.id.clone(),
                actor,
                cause,
                action,
                before,
                new_state.to_snapshot(),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
        Command::Cancel { requested_by } => transition_status(
            state,
            &requested_by,
            TripStatus::Canceled,
            "CancelTrip",
            actor,
            cause,
        ),
        Command::Complete => {
            // Completion is a time-based external trigger, not leader-gated.
            if !state.trip.status.can_transition_to(TripStatus::Completed) {
                return Err(CoreError::InvalidTransition {
                    from: state.trip.status,
                    to: TripStatus::Completed,
                });
            }

            let before = state.to_snapshot();
            let mut new_state = state.clone();
            new_state.trip.status = TripStatus::Completed;

            let action = Action::new(String::from("CompleteTrip"), None);
            let audit_event = AuditEvent::new(
                state.trip.id.clone(),
                actor,
                cause,
                action,
                before,
                new_state.to_snapshot(),
            );

            Ok(TransitionResult {
                new_state,
                audit_event,
            })
        }
    }
}

/// Rejects preference writes once a trip is locked, completed, or canceled.
fn ensure_accepts_writes(trip: &Trip) -> Result<(), CoreError> {
    match trip.status {
        TripStatus::Canceled => Err(CoreError::TripCanceled),
        status if !status.accepts_writes() => Err(CoreError::TripLocked),
        _ => Ok(()),
    }
}

/// Applies a leader-gated status transition.
fn transition_status(
    state: &TripState,
    requested_by: &UserId,
    target: TripStatus,
    action_name: &str,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    if !state.trip.is_leader(requested_by) {
        return Err(CoreError::NotLeader {
            user_id: requested_by.clone(),
        });
    }
    if !state.trip.status.can_transition_to(target) {
        return Err(CoreError::InvalidTransition {
            from: state.trip.status,
            to: target,
        });
    }

    let before = state.to_snapshot();
    let mut new_state = state.clone();
    new_state.trip.status = target;

    let action = Action::new(
        action_name.to_string(),
        Some(format!("Trip moved to {target}")),
    );
    let audit_event = AuditEvent::new(
        state.trip.id.clone(),
        actor,
        cause,
        action,
        before,
        new_state.to_snapshot(),
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
    })
}
