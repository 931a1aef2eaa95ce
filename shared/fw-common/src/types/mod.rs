//! Shared Types

mod membership;
mod tournament;
mod user;

pub use membership::{
    TournamentContext, TournamentMembership, TournamentRole, ACTIVE_STATUS, EXPIRED_STATUS,
};
pub use tournament::{StatusFilter, TournamentStatus};
pub use user::{GlobalRole, User};
