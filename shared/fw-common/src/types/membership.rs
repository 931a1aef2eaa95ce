//! Tournament Membership Types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The only membership status that confers any privilege.
pub const ACTIVE_STATUS: &str = "active";

/// Status reported for a membership whose `expires_at` has passed.
pub const EXPIRED_STATUS: &str = "expired";

/// Tournament-scoped role.
///
/// Listed in descending privilege. The numeric ranking lives in the engine's
/// role hierarchy and is not derived from this declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentRole {
    Owner,
    Admin,
    /// Tournament director.
    Td,
    Scorer,
    Viewer,
}

impl TournamentRole {
    /// Stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Td => "td",
            Self::Scorer => "scorer",
            Self::Viewer => "viewer",
        }
    }

    /// Every tournament role.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Owner,
            Self::Admin,
            Self::Td,
            Self::Scorer,
            Self::Viewer,
        ]
    }
}

impl fmt::Display for TournamentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| Error::UnknownTournamentRole(s.to_string()))
    }
}

/// Authorization-relevant projection of a membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentContext {
    pub tournament_id: i64,
    pub organization_id: String,
    pub role: TournamentRole,
    /// Raw membership status. Anything other than `"active"` is inert.
    pub status: String,
}

impl TournamentContext {
    pub fn new(
        tournament_id: i64,
        organization_id: impl Into<String>,
        role: TournamentRole,
        status: impl Into<String>,
    ) -> Self {
        Self {
            tournament_id,
            organization_id: organization_id.into(),
            role,
            status: status.into(),
        }
    }

    /// Build an active context.
    pub fn active(
        tournament_id: i64,
        organization_id: impl Into<String>,
        role: TournamentRole,
    ) -> Self {
        Self::new(tournament_id, organization_id, role, ACTIVE_STATUS)
    }

    /// Check the status is exactly `"active"`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// Stored membership binding a user to a tournament within an organization.
///
/// Timestamps are epoch milliseconds. The role is kept as its stored string
/// and parsed when projected into a [`TournamentContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentMembership {
    pub id: String,
    pub tournament_id: i64,
    pub user_id: String,
    pub organization_id: String,
    pub role: String,
    /// active, suspended, expired, pending, ...
    pub status: String,
    pub expires_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl TournamentMembership {
    /// Parse the stored role.
    pub fn parse_role(&self) -> Result<TournamentRole> {
        self.role.parse()
    }

    /// Check whether the membership has expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    /// Project this row into the context consumed by the permission engine.
    ///
    /// An expired membership projects with status `"expired"` regardless of
    /// its stored status.
    pub fn context(&self, now: i64) -> Result<TournamentContext> {
        let status = if self.is_expired(now) {
            EXPIRED_STATUS.to_string()
        } else {
            self.status.clone()
        };

        Ok(TournamentContext {
            tournament_id: self.tournament_id,
            organization_id: self.organization_id.clone(),
            role: self.parse_role()?,
            status,
        })
    }
}
