// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Window math for trip date planning.
//!
//! This module computes valid start days, date-range bounds, and day
//! enumeration for a fixed trip length within a bounded planning window.
//!
//! ## Invariants
//!
//! - All functions are pure and stateless
//! - A day `d` is a valid start iff `d + trip_length_days - 1` does not pass
//!   the planning window's end
//! - Both planning window bounds are inclusive

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

/// The inclusive date bounds members may choose within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningWindow {
    /// First day members may choose (inclusive).
    start: Date,
    /// Last day members may choose (inclusive).
    end: Date,
}

impl PlanningWindow {
    /// Creates a new `PlanningWindow`.
    ///
    /// # Arguments
    ///
    /// * `start` - First day (inclusive)
    /// * `end` - Last day (inclusive)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if `end` is before `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidRange {
                reason: format!("end {end} is before start {start}"),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns the first day of the window.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of the window.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether a day falls inside the window.
    #[must_use]
    pub fn contains(&self, day: Date) -> bool {
        day >= self.start && day <= self.end
    }

    /// Enumerates every day in the window, in order.
    #[must_use]
    pub fn days(&self) -> Vec<Date> {
        enumerate_days(self.start, self.end)
    }

    /// Returns the number of days in the window.
    #[must_use]
    pub fn len_days(&self) -> u32 {
        // Bounds are validated on construction, so the difference is >= 0.
        u32::try_from((self.end - self.start).whole_days() + 1).unwrap_or(0)
    }

    /// Computes every valid start day for a trip of the given length.
    ///
    /// A day is a valid start iff the window it opens ends on or before the
    /// planning window's last day.
    ///
    /// # Arguments
    ///
    /// * `trip_length_days` - The fixed trip length
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if `trip_length_days` is zero.
    pub fn valid_starts(&self, trip_length_days: u16) -> Result<Vec<Date>, DomainError> {
        if trip_length_days == 0 {
            return Err(DomainError::InvalidRange {
                reason: String::from("trip length must be at least 1 day"),
            });
        }

        let last_start = self
            .end
            .checked_sub(Duration::days(i64::from(trip_length_days) - 1))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: String::from("computing the last valid start day"),
            })?;

        if last_start < self.start {
            return Ok(Vec::new());
        }
        Ok(enumerate_days(self.start, last_start))
    }

    /// Validates a chosen start day and materializes its trip window.
    ///
    /// # Arguments
    ///
    /// * `start` - The chosen start day
    /// * `trip_length_days` - The fixed trip length
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWindow` if the start day falls outside
    /// the planning window or the window it opens runs past the end.
    pub fn validate_window(
        &self,
        start: Date,
        trip_length_days: u16,
    ) -> Result<TripWindow, DomainError> {
        if trip_length_days == 0 {
            return Err(DomainError::InvalidRange {
                reason: String::from("trip length must be at least 1 day"),
            });
        }
        if !self.contains(start) {
            return Err(DomainError::InvalidWindow {
                start,
                reason: format!("start is outside the planning window {}..{}", self.start, self.end),
            });
        }

        let window = TripWindow::from_start(start, trip_length_days)?;
        if window.end() > self.end {
            return Err(DomainError::InvalidWindow {
                start,
                reason: format!(
                    "window ends {} after the planning window end {}",
                    window.end(),
                    self.end
                ),
            });
        }
        Ok(window)
    }
}

/// A concrete trip window: `trip_length_days` consecutive calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TripWindow {
    /// First day of the trip (inclusive).
    start: Date,
    /// Last day of the trip (inclusive).
    end: Date,
}

impl TripWindow {
    /// Materializes the window opened by a start day.
    ///
    /// The window's end is `start + trip_length_days - 1`.
    ///
    /// # Arguments
    ///
    /// * `start` - The first day of the trip
    /// * `trip_length_days` - The fixed trip length
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` for a zero length and
    /// `DomainError::DateArithmeticOverflow` if the end day is not
    /// representable.
    pub fn from_start(start: Date, trip_length_days: u16) -> Result<Self, DomainError> {
        if trip_length_days == 0 {
            return Err(DomainError::InvalidRange {
                reason: String::from("trip length must be at least 1 day"),
            });
        }
        let end = start
            .checked_add(Duration::days(i64::from(trip_length_days) - 1))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("extending {start} by {trip_length_days} days"),
            })?;
        Ok(Self { start, end })
    }

    /// Returns the first day of the trip.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of the trip.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether a day belongs to the trip window.
    #[must_use]
    pub fn contains(&self, day: Date) -> bool {
        day >= self.start && day <= self.end
    }

    /// Enumerates the calendar days belonging to the window, in order.
    #[must_use]
    pub fn days(&self) -> Vec<Date> {
        enumerate_days(self.start, self.end)
    }
}

impl std::fmt::Display for TripWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Enumerates every day from `start` to `end` inclusive.
fn enumerate_days(start: Date, end: Date) -> Vec<Date> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        let Some(next) = current.checked_add(Duration::days(1)) else {
            break;
        };
        current = next;
    }
    days
}
