// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use circle_trips_domain::{
    CircleId, PlanningWindow, SchedulingMode, Trip, TripId, TripStatus, UserId,
};
use circle_trips_store::{MemoryStore, TripStore};
use time::macros::date;

pub fn trip_id() -> TripId {
    TripId::new("trip-1")
}

pub fn leader() -> UserId {
    UserId::new("leader")
}

pub fn member(id: &str) -> UserId {
    UserId::new(id)
}

/// A 10-day June planning window for 3-day trips, matching the scenarios in
/// the schedule-view tests.
pub fn create_test_trip(mode: SchedulingMode, status: TripStatus) -> Trip {
    let mut trip = Trip::collaborative(
        trip_id(),
        CircleId::new("circle-1"),
        leader(),
        mode,
        PlanningWindow::new(date!(2025 - 06 - 01), date!(2025 - 06 - 10)).unwrap(),
        3,
    )
    .unwrap();
    trip.status = status;
    trip
}

/// Seeds a store with a trip and an active roster.
pub fn seeded_store(mode: SchedulingMode, status: TripStatus, roster: &[&str]) -> MemoryStore {
    let store = MemoryStore::new();
    store.put_trip(&create_test_trip(mode, status)).unwrap();
    store
        .set_roster(&trip_id(), roster.iter().map(|id| member(id)).collect())
        .unwrap();
    store
}
