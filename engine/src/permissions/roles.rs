//! Role hierarchy tables.

use fw_common::{GlobalRole, TournamentRole};

/// The one global role that bypasses every tournament-scoped check.
pub const SYSADMIN_ROLE: GlobalRole = GlobalRole::Admin;

/// Highest rank on the tournament scale (owner).
pub const MAX_RANK: u8 = 5;

/// Check whether a global role is the sysadmin marker.
#[must_use]
pub const fn is_sysadmin(role: GlobalRole) -> bool {
    matches!(role, SYSADMIN_ROLE)
}

/// Rank of a tournament role, 5 (owner) down to 1 (viewer).
///
/// # Examples
///
/// ```
/// use fw_common::TournamentRole;
/// use fw_engine::permissions::rank;
///
/// assert!(rank(TournamentRole::Td) > rank(TournamentRole::Scorer));
/// ```
#[must_use]
pub const fn rank(role: TournamentRole) -> u8 {
    match role {
        TournamentRole::Owner => 5,
        TournamentRole::Admin => 4,
        TournamentRole::Td => 3,
        TournamentRole::Scorer => 2,
        TournamentRole::Viewer => 1,
    }
}

/// The tournament role holding exactly `rank`, if any.
#[must_use]
pub fn role_for_rank(rank_value: u8) -> Option<TournamentRole> {
    TournamentRole::all()
        .iter()
        .copied()
        .find(|role| rank(*role) == rank_value)
}
