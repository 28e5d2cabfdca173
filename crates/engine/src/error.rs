// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the engine's operation boundary.

use circle_trips::CoreError;
use circle_trips_domain::{DomainError, TripStatus, UserId};
use circle_trips_store::StoreError;

/// Engine-level errors.
///
/// These are the errors the request layer sees. Validation errors are
/// caller-correctable and surfaced verbatim; authorization errors are
/// permission failures; state errors indicate a race or stale client view
/// and tell the caller to refresh and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An availability record or pick set failed validation.
    InvalidRecord {
        /// A human-readable description of the error.
        message: String,
    },
    /// A chosen window failed window math validation.
    InvalidWindow {
        /// A human-readable description of the error.
        message: String,
    },
    /// Planning range bounds are invalid.
    InvalidRange {
        /// A human-readable description of the error.
        message: String,
    },
    /// A pick set holds more than one pick for a rank.
    DuplicateRank {
        /// A human-readable description of the error.
        message: String,
    },
    /// The requester is not the trip's leader.
    NotLeader {
        /// The member who attempted the operation.
        user_id: UserId,
    },
    /// The requested transition is not legal from the current status.
    InvalidTransition {
        /// The trip's current status.
        from: TripStatus,
        /// The status the transition targets.
        to: TripStatus,
    },
    /// The trip's dates are locked; writes are rejected.
    TripLocked,
    /// The trip was canceled; writes are rejected.
    TripCanceled,
    /// Another lock attempt won the race.
    AlreadyLocked,
    /// The requested trip was not found.
    TripNotFound {
        /// The trip identifier that was not found.
        trip_id: String,
    },
    /// The backing store failed.
    Store {
        /// A description of the store failure.
        message: String,
    },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRecord { message } => write!(f, "Invalid record: {message}"),
            Self::InvalidWindow { message } => write!(f, "Invalid window: {message}"),
            Self::InvalidRange { message } => write!(f, "Invalid range: {message}"),
            Self::DuplicateRank { message } => write!(f, "Duplicate rank: {message}"),
            Self::NotLeader { user_id } => {
                write!(f, "Member '{user_id}' is not the trip leader")
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot transition from {from} to {to}")
            }
            Self::TripLocked => write!(f, "Trip dates are locked"),
            Self::TripCanceled => write!(f, "Trip has been canceled"),
            Self::AlreadyLocked => write!(f, "Trip was locked by a concurrent request"),
            Self::TripNotFound { trip_id } => write!(f, "Trip '{trip_id}' not found"),
            Self::Store { message } => write!(f, "Store failure: {message}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Translates a domain error into an engine error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> EngineError {
    match err {
        DomainError::InvalidRange { .. } => EngineError::InvalidRange {
            message: err.to_string(),
        },
        DomainError::InvalidWindow { .. } => EngineError::InvalidWindow {
            message: err.to_string(),
        },
        DomainError::DuplicateRank(_) => EngineError::DuplicateRank {
            message: err.to_string(),
        },
        DomainError::InvalidRecord { .. }
        | DomainError::DuplicatePickStart(_)
        | DomainError::InvalidOptionKey(_)
        | DomainError::InvalidStatus(_)
        | DomainError::InvalidKind(_)
        | DomainError::InvalidMode(_)
        | DomainError::InvalidAvailability(_)
        | DomainError::InvalidRank(_)
        | DomainError::DateArithmeticOverflow { .. }
        | DomainError::DateParseError { .. } => EngineError::InvalidRecord {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an engine error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> EngineError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotLeader { user_id } => EngineError::NotLeader { user_id },
        CoreError::InvalidTransition { from, to } => EngineError::InvalidTransition { from, to },
        CoreError::TripLocked => EngineError::TripLocked,
        CoreError::TripCanceled => EngineError::TripCanceled,
        CoreError::AlreadyLocked => EngineError::AlreadyLocked,
    }
}

/// Translates a store error into an engine error.
///
/// A status conflict is interpreted against the transition's target: a trip
/// found already locked means a lost lock race, a trip found canceled means
/// the writes are over, anything else is a stale view of the lifecycle.
#[must_use]
pub fn translate_store_error(err: StoreError, target: TripStatus) -> EngineError {
    match err {
        StoreError::TripNotFound(trip_id) => EngineError::TripNotFound { trip_id },
        StoreError::StatusConflict { actual, .. } => match actual {
            TripStatus::Locked => EngineError::AlreadyLocked,
            TripStatus::Canceled => EngineError::TripCanceled,
            _ => EngineError::InvalidTransition {
                from: actual,
                to: target,
            },
        },
        StoreError::Backend(message) => EngineError::Store { message },
    }
}

/// Translates a store error from a plain read or write (no transition).
#[must_use]
pub fn translate_read_error(err: StoreError) -> EngineError {
    match err {
        StoreError::TripNotFound(trip_id) => EngineError::TripNotFound { trip_id },
        StoreError::StatusConflict { expected, actual } => EngineError::Store {
            message: format!("unexpected status conflict: expected {expected}, found {actual}"),
        },
        StoreError::Backend(message) => EngineError::Store { message },
    }
}
