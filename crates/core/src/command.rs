// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use circle_trips_domain::{AvailabilitySubmission, DatePick, UserId};
use time::Date;

/// A command represents member or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit or replace a member's availability.
    SubmitAvailability {
        /// The submitting member.
        user_id: UserId,
        /// The submission, in any of the three accepted shapes.
        submission: AvailabilitySubmission,
    },
    /// Submit or replace a member's ranked date picks.
    SubmitDatePicks {
        /// The submitting member.
        user_id: UserId,
        /// The full replacement pick set (one to three picks).
        picks: Vec<DatePick>,
    },
    /// Cast or replace a member's vote for a candidate window.
    CastVote {
        /// The voting member.
        user_id: UserId,
        /// The encoded date-range key of the chosen window.
        option_key: String,
    },
    /// Open the scheduling stage. Leader only.
    OpenScheduling {
        /// The member requesting the transition.
        requested_by: UserId,
    },
    /// Open the voting stage (availability-poll mode only). Leader only.
    OpenVoting {
        /// The member requesting the transition.
        requested_by: UserId,
    },
    /// Irreversibly lock the trip's dates. Leader only.
    Lock {
        /// The member requesting the lock.
        requested_by: UserId,
        /// The start day of the chosen window. The leader is not restricted
        /// to top-ranked candidates.
        chosen_start: Date,
    },
    /// Cancel the trip. Leader only; terminal.
    Cancel {
        /// The member requesting the cancellation.
        requested_by: UserId,
    },
    /// Mark a locked trip as completed. Externally triggered.
    Complete,
}
