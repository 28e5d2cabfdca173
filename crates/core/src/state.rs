// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use circle_trips_audit::{AuditEvent, StateSnapshot};
use circle_trips_domain::{AvailabilityRecord, DatePick, Trip, UserId, Vote};
use std::collections::BTreeMap;

/// The complete scheduling state of a single trip.
///
/// The state holds the trip record plus every member's preference records.
/// Records are never deleted on transition; they remain as a historical log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripState {
    /// The trip record.
    pub trip: Trip,
    /// Per-member availability records, oldest first within each member.
    pub availability: BTreeMap<UserId, Vec<AvailabilityRecord>>,
    /// Per-member ranked pick sets.
    pub picks: BTreeMap<UserId, Vec<DatePick>>,
    /// Per-member votes (availability-poll mode, voting stage).
    pub votes: BTreeMap<UserId, Vote>,
}

impl TripState {
    /// Creates an empty scheduling state for a trip.
    ///
    /// # Arguments
    ///
    /// * `trip` - The trip record
    #[must_use]
    pub const fn new(trip: Trip) -> Self {
        Self {
            trip,
            availability: BTreeMap::new(),
            picks: BTreeMap::new(),
            votes: BTreeMap::new(),
        }
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "status={},responses={},picks={},votes={}",
            self.trip.status,
            self.availability.len(),
            self.picks.len(),
            self.votes.len()
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: TripState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
