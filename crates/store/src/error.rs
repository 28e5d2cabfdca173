// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use circle_trips_domain::TripStatus;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The requested trip was not found.
    #[error("Trip '{0}' not found")]
    TripNotFound(String),

    /// A conditional status update failed: the trip's status no longer
    /// matches the value the caller read.
    ///
    /// This is the store's only coordination primitive. Callers decide
    /// whether the conflict means a lost lock race or a stale client view.
    #[error("Status conflict: expected {expected}, found {actual}")]
    StatusConflict {
        /// The status the caller expected to find.
        expected: TripStatus,
        /// The status actually stored.
        actual: TripStatus,
    },

    /// The backing store failed.
    #[error("Store backend error: {0}")]
    Backend(String),
}
