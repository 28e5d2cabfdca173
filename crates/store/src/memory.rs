// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory store backend.
//!
//! This backend is the reference implementation of the adapter contracts and
//! the fixture the engine tests run against. A single `Mutex` guards the
//! whole map; `cas_trip_status` performs its compare and write under that
//! lock, which is the atomicity a production adapter must reproduce with its
//! database's conditional update.

use crate::adapter::{MembershipProvider, TripStore};
use crate::error::StoreError;
use circle_trips_audit::AuditEvent;
use circle_trips_domain::{
    AvailabilityRecord, DatePick, Trip, TripId, TripStatus, TripWindow, UserId, Vote,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

/// Everything stored for one trip.
#[derive(Debug, Clone)]
struct TripRow {
    trip: Trip,
    availability: BTreeMap<UserId, Vec<AvailabilityRecord>>,
    picks: BTreeMap<UserId, Vec<DatePick>>,
    votes: BTreeMap<UserId, Vote>,
    roster: Vec<UserId>,
    audit_log: Vec<AuditEvent>,
}

impl TripRow {
    const fn new(trip: Trip) -> Self {
        Self {
            trip,
            availability: BTreeMap::new(),
            picks: BTreeMap::new(),
            votes: BTreeMap::new(),
            roster: Vec::new(),
            audit_log: Vec::new(),
        }
    }
}

/// A thread-safe in-memory trip store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<TripId, TripRow>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the active member roster for a trip.
    ///
    /// Membership is owned by an external collaborator in production; tests
    /// seed it directly.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    pub fn set_roster(&self, trip_id: &TripId, roster: Vec<UserId>) -> Result<(), StoreError> {
        let mut rows = self.rows()?;
        let row = row_mut(&mut rows, trip_id)?;
        row.roster = roster;
        Ok(())
    }

    /// Returns a copy of a trip's audit log.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TripNotFound` if the trip does not exist.
    pub fn audit_log(&self, trip_id: &TripId) -> Result<Vec<AuditEvent>, StoreError> {
        let rows = self.rows()?;
        let row = row_ref(&rows, trip_id)?;
        Ok(row.audit_log.clone())
    }

    fn rows(&self) -> Result<MutexGuard<'_, HashMap<TripId, TripRow>>, StoreError> {
        self.rows
            .lock()
            .map_err(|_| StoreError::Backend(String::from("store mutex poisoned")))
    }
}

fn row_ref<'a>(
    rows: &'a HashMap<TripId, TripRow>,
    trip_id: &TripId,
) -> Result<&'a TripRow, StoreError> {
    rows.get(trip_id)
        .ok_or_else(|| StoreError::TripNotFound(trip_id.value().to_string()))
}

fn row_mut<'a>(
    rows: &'a mut HashMap<TripId, TripRow>,
    trip_id: &TripId,
) -> Result<&'a mut TripRow, StoreError> {
    rows.get_mut(trip_id)
        .ok_or_else(|| StoreError::TripNotFound(trip_id.value().to_string()))
}

impl TripStore for MemoryStore {
    fn get_trip(&self, trip_id: &TripId) -> Result<Trip, StoreError> {
        let rows = self.rows()?;
        Ok(row_ref(&rows, trip_id)?.trip.clone())
    }

    fn put_trip(&self, trip: &Trip) -> Result<(), StoreError> {
        let mut rows = self.rows()?;
        rows.entry(trip.id.clone())
            .and_modify(|row| row.trip = trip.clone())
            .or_insert_with(|| TripRow::new(trip.clone()));
        tracing::debug!(trip_id = %trip.id, "stored trip");
        Ok(())
    }

    fn get_records(
        &self,
        trip_id: &TripId,
    ) -> Result<BTreeMap<UserId, Vec<AvailabilityRecord>>, StoreError> {
        let rows = self.rows()?;
        Ok(row_ref(&rows, trip_id)?.availability.clone())
    }

    fn upsert_records(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
        records: Vec<AvailabilityRecord>,
    ) -> Result<usize, StoreError> {
        let mut rows = self.rows()?;
        let row = row_mut(&mut rows, trip_id)?;
        let count = records.len();
        row.availability.insert(user_id.clone(), records);
        tracing::debug!(trip_id = %trip_id, user_id = %user_id, count, "upserted availability");
        Ok(count)
    }

    fn get_picks(
        &self,
        trip_id: &TripId,
    ) -> Result<BTreeMap<UserId, Vec<DatePick>>, StoreError> {
        let rows = self.rows()?;
        Ok(row_ref(&rows, trip_id)?.picks.clone())
    }

    fn upsert_picks(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
        picks: Vec<DatePick>,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows()?;
        let row = row_mut(&mut rows, trip_id)?;
        row.picks.insert(user_id.clone(), picks);
        tracing::debug!(trip_id = %trip_id, user_id = %user_id, "upserted picks");
        Ok(())
    }

    fn get_votes(&self, trip_id: &TripId) -> Result<BTreeMap<UserId, Vote>, StoreError> {
        let rows = self.rows()?;
        Ok(row_ref(&rows, trip_id)?.votes.clone())
    }

    fn upsert_vote(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
        vote: Vote,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows()?;
        let row = row_mut(&mut rows, trip_id)?;
        row.votes.insert(user_id.clone(), vote);
        Ok(())
    }

    fn cas_trip_status(
        &self,
        trip_id: &TripId,
        expected: TripStatus,
        next: TripStatus,
        locked_window: Option<TripWindow>,
    ) -> Result<Trip, StoreError> {
        let mut rows = self.rows()?;
        let row = row_mut(&mut rows, trip_id)?;

        if row.trip.status != expected {
            tracing::warn!(
                trip_id = %trip_id,
                expected = %expected,
                actual = %row.trip.status,
                "conditional status update lost"
            );
            return Err(StoreError::StatusConflict {
                expected,
                actual: row.trip.status,
            });
        }

        row.trip.status = next;
        if let Some(window) = locked_window {
            row.trip.locked_window = Some(window);
        }
        tracing::info!(trip_id = %trip_id, from = %expected, to = %next, "trip status changed");
        Ok(row.trip.clone())
    }

    fn append_audit(&self, trip_id: &TripId, event: AuditEvent) -> Result<(), StoreError> {
        let mut rows = self.rows()?;
        let row = row_mut(&mut rows, trip_id)?;
        row.audit_log.push(event);
        Ok(())
    }
}

impl MembershipProvider for MemoryStore {
    fn active_members(&self, trip_id: &TripId) -> Result<Vec<UserId>, StoreError> {
        let rows = self.rows()?;
        Ok(row_ref(&rows, trip_id)?.roster.clone())
    }
}
