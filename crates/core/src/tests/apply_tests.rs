// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for preference-write commands.

use super::helpers::{create_test_actor, create_test_cause, create_test_state, member};
use crate::{Command, CoreError, apply};
use circle_trips_domain::{
    AvailabilityStatus, AvailabilitySubmission, DatePick, DayEntry, DomainError, PickRank,
    SchedulingMode, TripStatus, effective_days,
};
use time::macros::date;

fn per_day(day: time::Date, status: AvailabilityStatus) -> DayEntry {
    DayEntry { day, status }
}

#[test]
fn test_submit_availability_records_member_response() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Scheduling);

    let result = apply(
        &state,
        Command::SubmitAvailability {
            user_id: member("a"),
            submission: AvailabilitySubmission::Broad(AvailabilityStatus::Available),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_state.availability.len(), 1);
    let days = effective_days(&result.new_state.availability[&member("a")]);
    assert_eq!(days.len(), 10);
    assert_eq!(result.audit_event.action.name, "SubmitAvailability");
}

#[test]
fn test_submit_availability_is_idempotent() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Scheduling);
    let submission = AvailabilitySubmission::PerDay(vec![
        per_day(date!(2025 - 06 - 02), AvailabilityStatus::Available),
        per_day(date!(2025 - 06 - 03), AvailabilityStatus::Maybe),
    ]);

    let once = apply(
        &state,
        Command::SubmitAvailability {
            user_id: member("a"),
            submission: submission.clone(),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let twice = apply(
        &once.new_state,
        Command::SubmitAvailability {
            user_id: member("a"),
            submission,
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(
        effective_days(&once.new_state.availability[&member("a")]),
        effective_days(&twice.new_state.availability[&member("a")])
    );
}

#[test]
fn test_resubmission_supersedes_covered_days_only() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Scheduling);

    let first = apply(
        &state,
        Command::SubmitAvailability {
            user_id: member("a"),
            submission: AvailabilitySubmission::PerDay(vec![
                per_day(date!(2025 - 06 - 02), AvailabilityStatus::Available),
                per_day(date!(2025 - 06 - 03), AvailabilityStatus::Available),
            ]),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let second = apply(
        &first.new_state,
        Command::SubmitAvailability {
            user_id: member("a"),
            submission: AvailabilitySubmission::PerDay(vec![per_day(
                date!(2025 - 06 - 03),
                AvailabilityStatus::Unavailable,
            )]),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let days = effective_days(&second.new_state.availability[&member("a")]);
    assert_eq!(days[&date!(2025 - 06 - 02)], AvailabilityStatus::Available);
    assert_eq!(days[&date!(2025 - 06 - 03)], AvailabilityStatus::Unavailable);
}

#[test]
fn test_submit_availability_rejects_day_outside_window() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Scheduling);

    let result = apply(
        &state,
        Command::SubmitAvailability {
            user_id: member("a"),
            submission: AvailabilitySubmission::PerDay(vec![per_day(
                date!(2025 - 07 - 01),
                AvailabilityStatus::Available,
            )]),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidRecord { .. }))
    ));
}

#[test]
fn test_submit_picks_replaces_prior_set() {
    let state = create_test_state(SchedulingMode::RankedPicks, TripStatus::Scheduling);

    let first = apply(
        &state,
        Command::SubmitDatePicks {
            user_id: member("a"),
            picks: vec![
                DatePick::new(PickRank::Love, date!(2025 - 06 - 01)),
                DatePick::new(PickRank::Can, date!(2025 - 06 - 04)),
            ],
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let second = apply(
        &first.new_state,
        Command::SubmitDatePicks {
            user_id: member("a"),
            picks: vec![DatePick::new(PickRank::Love, date!(2025 - 06 - 07))],
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let picks = &second.new_state.picks[&member("a")];
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].start, date!(2025 - 06 - 07));
}

#[test]
fn test_submit_picks_rejects_duplicate_rank() {
    let state = create_test_state(SchedulingMode::RankedPicks, TripStatus::Scheduling);

    let result = apply(
        &state,
        Command::SubmitDatePicks {
            user_id: member("a"),
            picks: vec![
                DatePick::new(PickRank::Love, date!(2025 - 06 - 01)),
                DatePick::new(PickRank::Love, date!(2025 - 06 - 04)),
            ],
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::DuplicateRank(
            PickRank::Love
        )))
    );
}

#[test]
fn test_submit_picks_rejects_window_past_end() {
    let state = create_test_state(SchedulingMode::RankedPicks, TripStatus::Scheduling);

    let result = apply(
        &state,
        Command::SubmitDatePicks {
            user_id: member("a"),
            picks: vec![DatePick::new(PickRank::Love, date!(2025 - 06 - 09))],
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidWindow { .. }))
    ));
}

#[test]
fn test_cast_vote_requires_voting_stage() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Scheduling);

    let result = apply(
        &state,
        Command::CastVote {
            user_id: member("a"),
            option_key: String::from("2025-06-04_2025-06-06"),
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
fn test_cast_vote_replaces_prior_vote() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Voting);

    let first = apply(
        &state,
        Command::CastVote {
            user_id: member("a"),
            option_key: String::from("2025-06-01_2025-06-03"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let second = apply(
        &first.new_state,
        Command::CastVote {
            user_id: member("a"),
            option_key: String::from("2025-06-04_2025-06-06"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(second.new_state.votes.len(), 1);
    assert_eq!(
        second.new_state.votes[&member("a")].option_key,
        "2025-06-04_2025-06-06"
    );
}

#[test]
fn test_cast_vote_rejects_malformed_key() {
    let state = create_test_state(SchedulingMode::AvailabilityPoll, TripStatus::Voting);

    let result = apply(
        &state,
        Command::CastVote {
            user_id: member("a"),
            option_key: String::from("not-a-range"),
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}
