// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::TripState;
use circle_trips_audit::{Actor, Cause};
use circle_trips_domain::{
    CircleId, PlanningWindow, SchedulingMode, Trip, TripId, TripStatus, UserId,
};
use time::macros::date;

pub fn leader() -> UserId {
    UserId::new("leader")
}

pub fn member(id: &str) -> UserId {
    UserId::new(id)
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("member-123"), String::from("member"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Member request"))
}

pub fn create_test_trip(mode: SchedulingMode) -> Trip {
    Trip::collaborative(
        TripId::new("trip-1"),
        CircleId::new("circle-1"),
        leader(),
        mode,
        PlanningWindow::new(date!(2025 - 06 - 01), date!(2025 - 06 - 10)).unwrap(),
        3,
    )
    .unwrap()
}

pub fn create_test_state(mode: SchedulingMode, status: TripStatus) -> TripState {
    let mut trip = create_test_trip(mode);
    trip.status = status;
    TripState::new(trip)
}
