//! Tournament Lifecycle Types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lifecycle state derived from a tournament's start/end window.
///
/// Never stored; recomputed from the window and the current time on every
/// read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    /// Not started yet, or not fully scheduled.
    Future,
    /// In progress.
    Active,
    /// Finished.
    Past,
}

impl TournamentStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Future => "future",
            Self::Active => "active",
            Self::Past => "past",
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter used by tournament listings.
///
/// Filters compare the stored bounds directly rather than the derived
/// [`TournamentStatus`]: a tournament with no end date is only listed under
/// `All`, and one that has ended is `Finished` even without a start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Not yet ended: `end >= now`.
    #[default]
    Upcoming,
    /// In progress: `start <= now <= end`.
    Active,
    /// Ended: `end < now`.
    Finished,
    All,
}

impl StatusFilter {
    /// Check whether a tournament with the given bounds belongs in this
    /// listing at `now`. A missing bound never satisfies a comparison.
    #[must_use]
    pub const fn matches(self, start_date: Option<i64>, end_date: Option<i64>, now: i64) -> bool {
        match (self, start_date, end_date) {
            (Self::All, _, _) => true,
            (Self::Upcoming, _, Some(end)) => end >= now,
            (Self::Active, Some(start), Some(end)) => start <= now && now <= end,
            (Self::Finished, _, Some(end)) => end < now,
            _ => false,
        }
    }

    /// Filter named by a listing query parameter.
    ///
    /// Absent or unrecognized values select [`StatusFilter::Upcoming`].
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            "all" => Ok(Self::All),
            other => Err(Error::UnknownStatusFilter(other.to_string())),
        }
    }
}
