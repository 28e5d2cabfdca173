// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for lifecycle transition commands and their gating.

use super::helpers::{
    create_test_actor, create_test_cause, create_test_state, leader, member,
};
use crate::{Command, CoreError, apply};
use circle_trips_domain::{
    AvailabilityStatus, AvailabilitySubmission, DatePick, PickRank, SchedulingMode, TripStatus,
};
use time::macros::date;

#[test]
fn test_leader_opens_scheduling() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Proposed);

    let result = apply(
        &state,
        Command::OpenScheduling {
            requested_by: leader(),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_state.trip.status, TripStatus::Scheduling);
    assert_eq!(result.audit_event.action.name, "OpenScheduling");
}

#[test]
fn test_non_leader_cannot_open_scheduling() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Proposed);

    let result = apply(
        &state,
        Command::OpenScheduling {
            requested_by: member("a"),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::NotLeader {
            user_id: member("a")
        })
    );
}

#[test]
fn test_leader_opens_voting_from_scheduling() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Scheduling);

    let result = apply(
        &state,
        Command::OpenVoting {
            requested_by: leader(),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_state.trip.status, TripStatus::Voting);
}

#[test]
fn test_open_voting_rejected_for_ranked_trips() {
    let state = create_test_state(SchedulingMode::RankedPicks, TripStatus::Scheduling);

    let result = apply(
        &state,
        Command::OpenVoting {
            requested_by: leader(),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::InvalidTransition {
            from: TripStatus::Scheduling,
            to: TripStatus::Voting,
        })
    );
}

#[test]
fn test_open_voting_rejected_from_proposed() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Proposed);

    let result = apply(
        &state,
        Command::OpenVoting {
            requested_by: leader(),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::InvalidTransition {
            from: TripStatus::Proposed,
            to: TripStatus::Voting,
        })
    );
}

#[test]
fn test_lock_from_scheduling_sets_window() {
    let state = create_test_state(SchedulingMode::RankedPicks, TripStatus::Scheduling);

    let result = apply(
        &state,
        Command::Lock {
            requested_by: leader(),
            chosen_start: date!(2025 - 06 - 04),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_state.trip.status, TripStatus::Locked);
    let window = result.new_state.trip.locked_window.unwrap();
    assert_eq!(window.start(), date!(2025 - 06 - 04));
    assert_eq!(window.end(), date!(2025 - 06 - 06));
}

#[test]
fn test_lock_from_voting_is_legal() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Voting);

    let result = apply(
        &state,
        Command::Lock {
            requested_by: leader(),
            chosen_start: date!(2025 - 06 - 01),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_lock_from_proposed_is_rejected() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Proposed);

    let result = apply(
        &state,
        Command::Lock {
            requested_by: leader(),
            chosen_start: date!(2025 - 06 - 01),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::InvalidTransition {
            from: TripStatus::Proposed,
            to: TripStatus::Locked,
        })
    );
}

#[test]
fn test_lock_requires_leader() {
    let state = create_test_state(SchedulingMode::RankedPicks, TripStatus::Scheduling);

    let result = apply(
        &state,
        Command::Lock {
            requested_by: member("a"),
            chosen_start: date!(2025 - 06 - 04),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::NotLeader {
            user_id: member("a")
        })
    );
}

#[test]
fn test_lock_rejects_invalid_window() {
    let state = create_test_state(SchedulingMode::RankedPicks, TripStatus::Scheduling);

    // A 3-day window starting June 9 runs past the June 10 end.
    let result = apply(
        &state,
        Command::Lock {
            requested_by: leader(),
            chosen_start: date!(2025 - 06 - 09),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}

#[test]
fn test_second_lock_observes_already_locked() {
    let state = create_test_state(SchedulingMode::RankedPicks, TripStatus::Scheduling);

    let locked = apply(
        &state,
        Command::Lock {
            requested_by: leader(),
            chosen_start: date!(2025 - 06 - 04),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let again = apply(
        &locked.new_state,
        Command::Lock {
            requested_by: leader(),
            chosen_start: date!(2025 - 06 - 01),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(again, Err(CoreError::AlreadyLocked));
    // The winner's window is untouched.
    assert_eq!(
        locked.new_state.trip.locked_window.unwrap().start(),
        date!(2025 - 06 - 04)
    );
}

#[test]
fn test_post_lock_writes_fail_with_trip_locked() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Scheduling);
    let locked = apply(
        &state,
        Command::Lock {
            requested_by: leader(),
            chosen_start: date!(2025 - 06 - 04),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let submit = apply(
        &locked.new_state,
        Command::SubmitAvailability {
            user_id: member("a"),
            submission: AvailabilitySubmission::Broad(AvailabilityStatus::Available),
        },
        create_test_actor(),
        create_test_cause(),
    );
    assert_eq!(submit, Err(CoreError::TripLocked));

    let picks = apply(
        &locked.new_state,
        Command::SubmitDatePicks {
            user_id: member("a"),
            picks: vec![DatePick::new(PickRank::Love, date!(2025 - 06 - 01))],
        },
        create_test_actor(),
        create_test_cause(),
    );
    assert_eq!(picks, Err(CoreError::TripLocked));

    let voting = apply(
        &locked.new_state,
        Command::OpenVoting {
            requested_by: leader(),
        },
        create_test_actor(),
        create_test_cause(),
    );
    assert_eq!(voting, Err(CoreError::TripLocked));
}

#[test]
fn test_cancel_is_legal_from_any_pre_lock_status() {
    for status in [
        TripStatus::Proposed,
        TripStatus::Scheduling,
        TripStatus::Voting,
    ] {
        let state = create_test_state(SchedulingMode::AvailabilityPoll, status);
        let result = apply(
            &state,
            Command::Cancel {
                requested_by: leader(),
            },
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
        assert_eq!(result.new_state.trip.status, TripStatus::Canceled);
    }
}

#[test]
fn test_cancel_is_rejected_after_lock() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Locked);

    let result = apply(
        &state,
        Command::Cancel {
            requested_by: leader(),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::InvalidTransition {
            from: TripStatus::Locked,
            to: TripStatus::Canceled,
        })
    );
}

#[test]
fn test_canceled_trip_rejects_writes_with_trip_canceled() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Canceled);

    let result = apply(
        &state,
        Command::SubmitAvailability {
            user_id: member("a"),
            submission: AvailabilitySubmission::Broad(AvailabilityStatus::Available),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(result, Err(CoreError::TripCanceled));
}

#[test]
fn test_complete_from_locked() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Locked);

    let result = apply(
        &state,
        Command::Complete,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_state.trip.status, TripStatus::Completed);
}

#[test]
fn test_complete_is_rejected_before_lock() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Scheduling);

    let result = apply(
        &state,
        Command::Complete,
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::InvalidTransition {
            from: TripStatus::Scheduling,
            to: TripStatus::Completed,
        })
    );
}

#[test]
fn test_records_survive_transitions() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Scheduling);

    let submitted = apply(
        &state,
        Command::SubmitAvailability {
            user_id: member("a"),
            submission: AvailabilitySubmission::Broad(AvailabilityStatus::Maybe),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let locked = apply(
        &submitted.new_state,
        Command::Lock {
            requested_by: leader(),
            chosen_start: date!(2025 - 06 - 04),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    // Records are never deleted on transition; they remain as history.
    assert_eq!(locked.new_state.availability.len(), 1);
}
