// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability records and submission shapes.
//!
//! Members express availability in one of three shapes: per-day, broad (one
//! status for the whole planning window), or weekly (one status per calendar
//! week block). Broad and weekly submissions are stored as day spans and
//! expanded to per-day statuses at read time only; which shape a caller picks
//! is a caller concern and is never enforced here.
//!
//! ## Invariants
//!
//! - For a given member and day there is at most one effective status: spans
//!   expand in submission order (later spans win), then per-day records
//!   override
//! - A later submission fully replaces the member's prior records for the
//!   day set it covers; days outside it retain their prior values
//! - Records are immutable once written; replacement drops records, it never
//!   edits them

use crate::error::DomainError;
use crate::types::AvailabilityStatus;
use crate::window::PlanningWindow;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::{Date, Duration};

/// A stored availability record for one member.
///
/// Records are shape-tagged so a refinement pass (per-day) can be told apart
/// from the broad or weekly pass it supersedes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityRecord {
    /// One status for a single calendar day.
    Day {
        /// The day the status applies to.
        day: Date,
        /// The member's availability on that day.
        status: AvailabilityStatus,
    },
    /// One status for a consecutive run of days (a broad submission or one
    /// weekly block).
    Span {
        /// First day of the span (inclusive).
        start: Date,
        /// Last day of the span (inclusive).
        end: Date,
        /// The member's availability across the span.
        status: AvailabilityStatus,
    },
}

impl AvailabilityRecord {
    /// Enumerates the days this record covers.
    #[must_use]
    pub fn covered_days(&self) -> Vec<Date> {
        match self {
            Self::Day { day, .. } => vec![*day],
            Self::Span { start, end, .. } => {
                let mut days = Vec::new();
                let mut current = *start;
                while current <= *end {
                    days.push(current);
                    let Some(next) = current.checked_add(Duration::days(1)) else {
                        break;
                    };
                    current = next;
                }
                days
            }
        }
    }

    /// Returns whether this is a per-day record.
    #[must_use]
    pub const fn is_per_day(&self) -> bool {
        matches!(self, Self::Day { .. })
    }
}

/// One entry of a per-day submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// The day the status applies to.
    pub day: Date,
    /// The member's availability on that day.
    pub status: AvailabilityStatus,
}

/// One block of a weekly submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBlock {
    /// First day of the week block.
    pub week_start: Date,
    /// The member's availability across the block.
    pub status: AvailabilityStatus,
}

/// A member's availability submission, in one of the three accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilitySubmission {
    /// One status per listed day.
    PerDay(Vec<DayEntry>),
    /// A single status for the whole planning window.
    Broad(AvailabilityStatus),
    /// One status per calendar week block, clipped to the planning window.
    Weekly(Vec<WeekBlock>),
}

impl AvailabilitySubmission {
    /// Validates this submission against the planning window and converts it
    /// to stored records.
    ///
    /// # Arguments
    ///
    /// * `planning` - The trip's planning window
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRecord` if the submission is empty, lists
    /// a day twice, or covers days outside the planning window.
    pub fn to_records(
        &self,
        planning: &PlanningWindow,
    ) -> Result<Vec<AvailabilityRecord>, DomainError> {
        match self {
            Self::PerDay(entries) => {
                if entries.is_empty() {
                    return Err(DomainError::InvalidRecord {
                        reason: String::from("per-day submission lists no days"),
                    });
                }
                let mut seen: BTreeSet<Date> = BTreeSet::new();
                for entry in entries {
                    if !planning.contains(entry.day) {
                        return Err(DomainError::InvalidRecord {
                            reason: format!("day {} is outside the planning window", entry.day),
                        });
                    }
                    if !seen.insert(entry.day) {
                        return Err(DomainError::InvalidRecord {
                            reason: format!("day {} is listed more than once", entry.day),
                        });
                    }
                }
                Ok(entries
                    .iter()
                    .map(|entry| AvailabilityRecord::Day {
                        day: entry.day,
                        status: entry.status,
                    })
                    .collect())
            }
            Self::Broad(status) => Ok(vec![AvailabilityRecord::Span {
                start: planning.start(),
                end: planning.end(),
                status: *status,
            }]),
            Self::Weekly(blocks) => {
                if blocks.is_empty() {
                    return Err(DomainError::InvalidRecord {
                        reason: String::from("weekly submission lists no blocks"),
                    });
                }
                let mut records = Vec::with_capacity(blocks.len());
                let mut covered: BTreeSet<Date> = BTreeSet::new();
                for block in blocks {
                    let record = expand_week_block(block, planning)?;
                    for day in record.covered_days() {
                        if !covered.insert(day) {
                            return Err(DomainError::InvalidRecord {
                                reason: format!("week blocks overlap on {day}"),
                            });
                        }
                    }
                    records.push(record);
                }
                Ok(records)
            }
        }
    }
}

/// Clips one weekly block to the planning window and validates its start.
fn expand_week_block(
    block: &WeekBlock,
    planning: &PlanningWindow,
) -> Result<AvailabilityRecord, DomainError> {
    if !planning.contains(block.week_start) {
        return Err(DomainError::InvalidRecord {
            reason: format!(
                "week starting {} is outside the planning window",
                block.week_start
            ),
        });
    }
    let nominal_end = block
        .week_start
        .checked_add(Duration::days(6))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("extending week block {}", block.week_start),
        })?;
    let end = nominal_end.min(planning.end());
    Ok(AvailabilityRecord::Span {
        start: block.week_start,
        end,
        status: block.status,
    })
}

/// Applies replacement semantics for a new submission.
///
/// The incoming records' covered day set supersedes the member's prior state
/// for exactly those days: prior per-day records inside the set are dropped,
/// prior spans entirely inside the set are dropped, and partially-overlapping
/// spans survive to keep their statuses for the days outside the set (the
/// overlap is shadowed at read time by [`effective_days`]).
///
/// # Arguments
///
/// * `existing` - The member's current records, oldest first
/// * `incoming` - The validated records of the new submission
///
/// # Returns
///
/// The member's full replacement record list, oldest first.
#[must_use]
pub fn apply_submission(
    existing: &[AvailabilityRecord],
    incoming: &[AvailabilityRecord],
) -> Vec<AvailabilityRecord> {
    let replaced: BTreeSet<Date> = incoming
        .iter()
        .flat_map(AvailabilityRecord::covered_days)
        .collect();

    let mut result: Vec<AvailabilityRecord> = existing
        .iter()
        .filter(|record| match record {
            AvailabilityRecord::Day { day, .. } => !replaced.contains(day),
            AvailabilityRecord::Span { .. } => record
                .covered_days()
                .iter()
                .any(|day| !replaced.contains(day)),
        })
        .copied()
        .collect();
    result.extend_from_slice(incoming);
    result
}

/// Computes a member's effective per-day status map.
///
/// Spans are expanded in record order so later submissions win, then per-day
/// records override. This is what lets a refinement pass supersede a broad
/// pass only for the days it names.
#[must_use]
pub fn effective_days(records: &[AvailabilityRecord]) -> BTreeMap<Date, AvailabilityStatus> {
    let mut days: BTreeMap<Date, AvailabilityStatus> = BTreeMap::new();
    for record in records {
        if let AvailabilityRecord::Span { status, .. } = record {
            for day in record.covered_days() {
                days.insert(day, *status);
            }
        }
    }
    for record in records {
        if let AvailabilityRecord::Day { day, status } = record {
            days.insert(*day, *status);
        }
    }
    days
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    fn planning() -> PlanningWindow {
        PlanningWindow::new(date!(2025 - 06 - 01), date!(2025 - 06 - 30)).unwrap()
    }

    #[test]
    fn test_per_day_submission_rejects_day_outside_window() {
        let submission = AvailabilitySubmission::PerDay(vec![DayEntry {
            day: date!(2025 - 07 - 01),
            status: AvailabilityStatus::Available,
        }]);
        let result = submission.to_records(&planning());
        assert!(matches!(result, Err(DomainError::InvalidRecord { .. })));
    }

    #[test]
    fn test_per_day_submission_rejects_duplicate_day() {
        let entry = DayEntry {
            day: date!(2025 - 06 - 05),
            status: AvailabilityStatus::Available,
        };
        let submission = AvailabilitySubmission::PerDay(vec![entry, entry]);
        let result = submission.to_records(&planning());
        assert!(matches!(result, Err(DomainError::InvalidRecord { .. })));
    }

    #[test]
    fn test_empty_submission_is_rejected() {
        let submission = AvailabilitySubmission::PerDay(Vec::new());
        assert!(submission.to_records(&planning()).is_err());
    }

    #[test]
    fn test_broad_submission_covers_whole_window() {
        let submission = AvailabilitySubmission::Broad(AvailabilityStatus::Maybe);
        let records = submission.to_records(&planning()).unwrap();

        assert_eq!(records.len(), 1);
        let days = effective_days(&records);
        assert_eq!(days.len(), 30);
        assert_eq!(days[&date!(2025 - 06 - 01)], AvailabilityStatus::Maybe);
        assert_eq!(days[&date!(2025 - 06 - 30)], AvailabilityStatus::Maybe);
    }

    #[test]
    fn test_weekly_block_is_clipped_to_window_end() {
        let submission = AvailabilitySubmission::Weekly(vec![WeekBlock {
            week_start: date!(2025 - 06 - 28),
            status: AvailabilityStatus::Available,
        }]);
        let records = submission.to_records(&planning()).unwrap();
        let days = effective_days(&records);

        assert_eq!(days.len(), 3);
        assert!(days.contains_key(&date!(2025 - 06 - 30)));
        assert!(!days.contains_key(&date!(2025 - 07 - 01)));
    }

    #[test]
    fn test_weekly_blocks_reject_overlap() {
        let submission = AvailabilitySubmission::Weekly(vec![
            WeekBlock {
                week_start: date!(2025 - 06 - 01),
                status: AvailabilityStatus::Available,
            },
            WeekBlock {
                week_start: date!(2025 - 06 - 04),
                status: AvailabilityStatus::Unavailable,
            },
        ]);
        let result = submission.to_records(&planning());
        assert!(matches!(result, Err(DomainError::InvalidRecord { .. })));
    }

    #[test]
    fn test_resubmission_replaces_covered_days_only() {
        let planning = planning();
        let first = AvailabilitySubmission::PerDay(vec![
            DayEntry {
                day: date!(2025 - 06 - 01),
                status: AvailabilityStatus::Available,
            },
            DayEntry {
                day: date!(2025 - 06 - 02),
                status: AvailabilityStatus::Available,
            },
        ])
        .to_records(&planning)
        .unwrap();
        let second = AvailabilitySubmission::PerDay(vec![DayEntry {
            day: date!(2025 - 06 - 02),
            status: AvailabilityStatus::Unavailable,
        }])
        .to_records(&planning)
        .unwrap();

        let merged = apply_submission(&first, &second);
        let days = effective_days(&merged);

        // June 1 retains the prior value; June 2 is superseded.
        assert_eq!(days[&date!(2025 - 06 - 01)], AvailabilityStatus::Available);
        assert_eq!(days[&date!(2025 - 06 - 02)], AvailabilityStatus::Unavailable);
    }

    #[test]
    fn test_broad_resubmission_replaces_everything() {
        let planning = planning();
        let first = AvailabilitySubmission::PerDay(vec![DayEntry {
            day: date!(2025 - 06 - 10),
            status: AvailabilityStatus::Unavailable,
        }])
        .to_records(&planning)
        .unwrap();
        let second = AvailabilitySubmission::Broad(AvailabilityStatus::Available)
            .to_records(&planning)
            .unwrap();

        let merged = apply_submission(&first, &second);

        assert_eq!(merged.len(), 1);
        let days = effective_days(&merged);
        assert_eq!(days[&date!(2025 - 06 - 10)], AvailabilityStatus::Available);
    }

    #[test]
    fn test_per_day_pass_shadows_broad_pass_inside_its_days_only() {
        let planning = planning();
        let broad = AvailabilitySubmission::Broad(AvailabilityStatus::Maybe)
            .to_records(&planning)
            .unwrap();
        let refinement = AvailabilitySubmission::PerDay(vec![DayEntry {
            day: date!(2025 - 06 - 15),
            status: AvailabilityStatus::Available,
        }])
        .to_records(&planning)
        .unwrap();

        let merged = apply_submission(&broad, &refinement);
        let days = effective_days(&merged);

        // The broad span survives for every other day.
        assert_eq!(days[&date!(2025 - 06 - 15)], AvailabilityStatus::Available);
        assert_eq!(days[&date!(2025 - 06 - 14)], AvailabilityStatus::Maybe);
        assert_eq!(days[&date!(2025 - 06 - 16)], AvailabilityStatus::Maybe);
    }

    #[test]
    fn test_idempotent_resubmission() {
        let planning = planning();
        let records = AvailabilitySubmission::PerDay(vec![DayEntry {
            day: date!(2025 - 06 - 05),
            status: AvailabilityStatus::Maybe,
        }])
        .to_records(&planning)
        .unwrap();

        let once = apply_submission(&[], &records);
        let twice = apply_submission(&once, &records);

        assert_eq!(effective_days(&once), effective_days(&twice));
    }
}
