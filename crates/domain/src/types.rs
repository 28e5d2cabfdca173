// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::window::{PlanningWindow, TripWindow};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents a trip identifier.
///
/// Trip identifiers are opaque strings assigned by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TripId {
    /// The identifier value.
    value: String,
}

impl TripId {
    /// Creates a new `TripId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for TripId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a member identifier within a circle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId {
    /// The identifier value.
    value: String,
}

impl UserId {
    /// Creates a new `UserId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a circle identifier.
///
/// A circle is the persistent group of members a trip belongs to. Circle
/// membership itself is managed by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircleId {
    /// The identifier value.
    value: String,
}

impl CircleId {
    /// Creates a new `CircleId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Represents the kind of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TripKind {
    /// Dates are decided by the group through the consensus engine.
    #[default]
    Collaborative,
    /// Dates are fixed by the host at creation; scheduling is skipped.
    Hosted,
}

impl TripKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Collaborative => "Collaborative",
            Self::Hosted => "Hosted",
        }
    }
}

impl FromStr for TripKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Collaborative" => Ok(Self::Collaborative),
            "Hosted" => Ok(Self::Hosted),
            _ => Err(DomainError::InvalidKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for TripKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents how a trip's dates are decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SchedulingMode {
    /// Members submit per-day, broad, or weekly availability; a voting stage
    /// may follow before the leader locks.
    #[default]
    AvailabilityPoll,
    /// Members submit up to three ranked start days; candidates are scored
    /// directly by window and no voting stage exists.
    RankedPicks,
}

impl SchedulingMode {
    /// Converts this mode to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AvailabilityPoll => "AvailabilityPoll",
            Self::RankedPicks => "RankedPicks",
        }
    }
}

impl FromStr for SchedulingMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AvailabilityPoll" => Ok(Self::AvailabilityPoll),
            "RankedPicks" => Ok(Self::RankedPicks),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for SchedulingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the lifecycle state of a trip.
///
/// Explicit lifecycle states govern which operations are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TripStatus {
    /// Initial state after creation. No preferences collected yet.
    #[default]
    Proposed,
    /// Members are submitting availability or ranked picks.
    Scheduling,
    /// Members are voting on candidate windows (availability-poll mode only).
    Voting,
    /// Dates are fixed. All preference writes are rejected.
    Locked,
    /// The trip has taken place. Terminal.
    Completed,
    /// The trip was abandoned before locking. Terminal.
    Canceled,
}

impl FromStr for TripStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Proposed" => Ok(Self::Proposed),
            "Scheduling" => Ok(Self::Scheduling),
            "Voting" => Ok(Self::Voting),
            "Locked" => Ok(Self::Locked),
            "Completed" => Ok(Self::Completed),
            "Canceled" => Ok(Self::Canceled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TripStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "Proposed",
            Self::Scheduling => "Scheduling",
            Self::Voting => "Voting",
            Self::Locked => "Locked",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Proposed → Scheduling
    /// - Scheduling → Voting
    /// - Scheduling → Locked
    /// - Voting → Locked
    /// - Locked → Completed
    /// - Proposed | Scheduling | Voting → Canceled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Proposed, Self::Scheduling)
                | (Self::Scheduling, Self::Voting | Self::Locked)
                | (Self::Voting, Self::Locked)
                | (Self::Locked, Self::Completed)
                | (Self::Proposed | Self::Scheduling | Self::Voting, Self::Canceled)
        )
    }

    /// Returns whether this status is terminal (no further transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }

    /// Returns whether preference writes (availability, picks, votes) are
    /// accepted in this status.
    ///
    /// Writes are rejected once a trip is locked, completed, or canceled.
    #[must_use]
    pub const fn accepts_writes(&self) -> bool {
        matches!(self, Self::Proposed | Self::Scheduling | Self::Voting)
    }

    /// Returns whether the leader may lock dates from this status.
    #[must_use]
    pub const fn is_lockable(&self) -> bool {
        matches!(self, Self::Scheduling | Self::Voting)
    }
}

/// Represents a member's availability for one or more days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    /// The member can travel on this day.
    Available,
    /// The member might be able to travel on this day.
    Maybe,
    /// The member cannot travel on this day.
    Unavailable,
}

impl AvailabilityStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Maybe => "Maybe",
            Self::Unavailable => "Unavailable",
        }
    }

    /// Returns the scoring weight of this status.
    ///
    /// Weights feed the heatmap aggregation: available days count in full,
    /// maybes count half, unavailable days contribute nothing (never a
    /// negative penalty).
    #[must_use]
    pub const fn weight(&self) -> f64 {
        match self {
            Self::Available => 1.0,
            Self::Maybe => 0.5,
            Self::Unavailable => 0.0,
        }
    }
}

impl FromStr for AvailabilityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(Self::Available),
            "Maybe" => Ok(Self::Maybe),
            "Unavailable" => Ok(Self::Unavailable),
            _ => Err(DomainError::InvalidAvailability(s.to_string())),
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the rank of a date pick in the ranked model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PickRank {
    /// Rank 1: the member loves this window.
    Love,
    /// Rank 2: the member can make this window work.
    Can,
    /// Rank 3: the member might make this window work.
    Might,
}

impl PickRank {
    /// Returns the 1-based rank value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        match self {
            Self::Love => 1,
            Self::Can => 2,
            Self::Might => 3,
        }
    }

    /// Returns the composite-score weight of this rank.
    ///
    /// A window's composite score is `3·love + 2·can + 1·might`.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        match self {
            Self::Love => 3,
            Self::Can => 2,
            Self::Might => 1,
        }
    }

    /// Creates a rank from its 1-based value.
    ///
    /// # Arguments
    ///
    /// * `value` - The rank value (1, 2, or 3)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRank` for any other value.
    pub const fn from_value(value: u8) -> Result<Self, DomainError> {
        match value {
            1 => Ok(Self::Love),
            2 => Ok(Self::Can),
            3 => Ok(Self::Might),
            _ => Err(DomainError::InvalidRank(value)),
        }
    }
}

impl std::fmt::Display for PickRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A trip: one planning unit with a target date window and lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// The trip identifier.
    pub id: TripId,
    /// The circle this trip belongs to.
    pub circle_id: CircleId,
    /// The member who created the trip. This member is the leader and the
    /// only one who may trigger lifecycle transitions.
    pub created_by: UserId,
    /// Whether dates are decided collaboratively or fixed by a host.
    pub kind: TripKind,
    /// How member preferences are collected and scored.
    pub scheduling_mode: SchedulingMode,
    /// Inclusive bounds members may choose dates within.
    pub planning_window: PlanningWindow,
    /// Fixed window length, in days, a locked trip will occupy.
    pub trip_length_days: u16,
    /// The current lifecycle status.
    pub status: TripStatus,
    /// The locked dates. Set exactly once, by the lock transition; `None`
    /// until then and for canceled trips.
    pub locked_window: Option<TripWindow>,
}

impl Trip {
    /// Creates a new collaborative trip in the `Proposed` status.
    ///
    /// # Arguments
    ///
    /// * `id` - The trip identifier
    /// * `circle_id` - The owning circle
    /// * `created_by` - The creating member (the leader)
    /// * `scheduling_mode` - How preferences are collected
    /// * `planning_window` - Inclusive bounds for member preferences
    /// * `trip_length_days` - Fixed window length in days
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if `trip_length_days` is zero or
    /// longer than the planning window.
    pub fn collaborative(
        id: TripId,
        circle_id: CircleId,
        created_by: UserId,
        scheduling_mode: SchedulingMode,
        planning_window: PlanningWindow,
        trip_length_days: u16,
    ) -> Result<Self, DomainError> {
        // A trip must have at least one valid start day.
        let starts = planning_window.valid_starts(trip_length_days)?;
        if starts.is_empty() {
            return Err(DomainError::InvalidRange {
                reason: format!(
                    "trip length of {trip_length_days} days does not fit the planning window"
                ),
            });
        }

        Ok(Self {
            id,
            circle_id,
            created_by,
            kind: TripKind::Collaborative,
            scheduling_mode,
            planning_window,
            trip_length_days,
            status: TripStatus::Proposed,
            locked_window: None,
        })
    }

    /// Creates a new hosted trip with fixed dates.
    ///
    /// Hosted trips skip the consensus lifecycle entirely: the host fixes the
    /// dates at creation and the trip begins in the `Locked` status.
    ///
    /// # Arguments
    ///
    /// * `id` - The trip identifier
    /// * `circle_id` - The owning circle
    /// * `created_by` - The hosting member
    /// * `start` - The first day of the trip
    /// * `trip_length_days` - Fixed window length in days
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be constructed.
    pub fn hosted(
        id: TripId,
        circle_id: CircleId,
        created_by: UserId,
        start: time::Date,
        trip_length_days: u16,
    ) -> Result<Self, DomainError> {
        let window = TripWindow::from_start(start, trip_length_days)?;
        let planning_window = PlanningWindow::new(window.start(), window.end())?;

        Ok(Self {
            id,
            circle_id,
            created_by,
            kind: TripKind::Hosted,
            scheduling_mode: SchedulingMode::AvailabilityPoll,
            planning_window,
            trip_length_days,
            status: TripStatus::Locked,
            locked_window: Some(window),
        })
    }

    /// Checks whether a member is the trip's leader.
    #[must_use]
    pub fn is_leader(&self, user_id: &UserId) -> bool {
        &self.created_by == user_id
    }
}
