// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use circle_trips_domain::{DomainError, TripStatus, UserId};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requester is not the trip's leader.
    NotLeader {
        /// The member who attempted the transition.
        user_id: UserId,
    },
    /// The requested transition is not legal from the current status.
    InvalidTransition {
        /// The trip's current status.
        from: TripStatus,
        /// The status the transition targets.
        to: TripStatus,
    },
    /// The trip's dates are locked; no further preference writes are
    /// accepted.
    TripLocked,
    /// The trip was canceled; no further writes are accepted.
    TripCanceled,
    /// Another lock attempt won the race; the trip is already locked.
    AlreadyLocked,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NotLeader { user_id } => {
                write!(f, "Member '{user_id}' is not the trip leader")
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot transition from {from} to {to}")
            }
            Self::TripLocked => write!(f, "Trip dates are locked"),
            Self::TripCanceled => write!(f, "Trip has been canceled"),
            Self::AlreadyLocked => write!(f, "Trip was locked by a concurrent request"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
