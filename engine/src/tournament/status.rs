//! Tournament lifecycle classification.
//!
//! Status is a function of the stored window and wall-clock time, so it is
//! recomputed on every read. All timestamps are epoch milliseconds.

use fw_common::{StatusFilter, TournamentStatus};
use serde::{Deserialize, Serialize};

/// Classify a tournament window at `now`.
///
/// A window missing either bound is `Future`. Both bounds are inclusive.
///
/// # Examples
///
/// ```
/// use fw_common::TournamentStatus;
/// use fw_engine::tournament::classify;
///
/// assert_eq!(classify(Some(1000), Some(2000), 1000), TournamentStatus::Active);
/// assert_eq!(classify(Some(1000), Some(2000), 2001), TournamentStatus::Past);
/// assert_eq!(classify(None, Some(2000), 1500), TournamentStatus::Future);
/// ```
#[must_use]
pub const fn classify(start_date: Option<i64>, end_date: Option<i64>, now: i64) -> TournamentStatus {
    let (Some(start), Some(end)) = (start_date, end_date) else {
        return TournamentStatus::Future;
    };

    if now < start {
        TournamentStatus::Future
    } else if now > end {
        TournamentStatus::Past
    } else {
        TournamentStatus::Active
    }
}

/// Check whether a tournament window is in progress at `now`.
#[must_use]
pub const fn is_active(start_date: Option<i64>, end_date: Option<i64>, now: i64) -> bool {
    matches!(classify(start_date, end_date, now), TournamentStatus::Active)
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Scheduled span of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TournamentWindow {
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

impl TournamentWindow {
    #[must_use]
    pub const fn new(start_date: Option<i64>, end_date: Option<i64>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    #[must_use]
    pub const fn status(&self, now: i64) -> TournamentStatus {
        classify(self.start_date, self.end_date, now)
    }

    #[must_use]
    pub const fn is_active(&self, now: i64) -> bool {
        is_active(self.start_date, self.end_date, now)
    }

    /// Status against the system clock.
    pub fn current_status(&self) -> TournamentStatus {
        self.status(now_millis())
    }

    /// Check whether this tournament belongs in a listing at `now`.
    #[must_use]
    pub const fn matches(&self, filter: StatusFilter, now: i64) -> bool {
        filter.matches(self.start_date, self.end_date, now)
    }
}
