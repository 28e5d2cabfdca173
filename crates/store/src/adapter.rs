// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store adapter interfaces.
//!
//! The engine owns no storage. It consumes these traits, which a deployment
//! implements over its actual database; [`crate::MemoryStore`] is the
//! reference implementation the tests run against.
//!
//! ## Contracts
//!
//! - Per-member writes (`upsert_*`) fully replace that member's prior value
//!   for the covered scope and never touch other members' records
//! - `cas_trip_status` must be a single conditional update: compare the
//!   stored status against `expected` and apply the change only on a match,
//!   atomically with respect to concurrent calls
//! - Reads return already-committed data; the engine never asks a store to
//!   retry — transient-failure policy belongs to the adapter

use crate::error::StoreError;
use circle_trips_audit::AuditEvent;
use circle_trips_domain::{
    AvailabilityRecord, DatePick, Trip, TripId, TripStatus, TripWindow, UserId, Vote,
};
use std::collections::BTreeMap;

/// Key-value repository for trips and their preference records.
pub trait TripStore {
    /// Loads a trip record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    fn get_trip(&self, trip_id: &TripId) -> Result<Trip, StoreError>;

    /// Creates or replaces a trip record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn put_trip(&self, trip: &Trip) -> Result<(), StoreError>;

    /// Loads every member's availability records for a trip.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    fn get_records(
        &self,
        trip_id: &TripId,
    ) -> Result<BTreeMap<UserId, Vec<AvailabilityRecord>>, StoreError>;

    /// Replaces one member's availability records.
    ///
    /// # Returns
    ///
    /// The number of records now held for the member.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    fn upsert_records(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
        records: Vec<AvailabilityRecord>,
    ) -> Result<usize, StoreError>;

    /// Loads every member's pick set for a trip.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    fn get_picks(&self, trip_id: &TripId)
    -> Result<BTreeMap<UserId, Vec<DatePick>>, StoreError>;

    /// Replaces one member's pick set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    fn upsert_picks(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
        picks: Vec<DatePick>,
    ) -> Result<(), StoreError>;

    /// Loads every member's vote for a trip.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    fn get_votes(&self, trip_id: &TripId) -> Result<BTreeMap<UserId, Vote>, StoreError>;

    /// Replaces one member's vote.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    fn upsert_vote(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
        vote: Vote,
    ) -> Result<(), StoreError>;

    /// Conditionally transitions a trip's status.
    ///
    /// The update applies only if the stored status equals `expected`; the
    /// comparison and write are atomic with respect to concurrent calls.
    /// When `locked_window` is given it is stored alongside the new status
    /// (the lock transition); it is never cleared by later transitions.
    ///
    /// # Returns
    ///
    /// The updated trip record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist and
    /// `StoreError::StatusConflict` if the stored status does not match
    /// `expected`.
    fn cas_trip_status(
        &self,
        trip_id: &TripId,
        expected: TripStatus,
        next: TripStatus,
        locked_window: Option<TripWindow>,
    ) -> Result<Trip, StoreError>;

    /// Appends an audit event to the trip's historical log.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    fn append_audit(&self, trip_id: &TripId, event: AuditEvent) -> Result<(), StoreError>;
}

/// Provides the active member roster for a trip.
///
/// Circle membership is owned by an external collaborator; the engine only
/// needs the roster size and identities at read time. Members who left the
/// trip must not appear.
pub trait MembershipProvider {
    /// Returns the active members of a trip.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    fn active_members(&self, trip_id: &TripId) -> Result<Vec<UserId>, StoreError>;
}
