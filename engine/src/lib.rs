//! Fairway Engine
//!
//! Pure authorization and tournament-lifecycle core. Callers resolve the
//! session user and membership row; this crate turns them into verdicts,
//! lifecycle states and unique slugs.

pub mod config;
pub mod observability;
pub mod permissions;
pub mod tournament;
