//! Error Types

/// Errors raised while parsing stored values into shared types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown global role: {0}")]
    UnknownGlobalRole(String),

    #[error("Unknown tournament role: {0}")]
    UnknownTournamentRole(String),

    #[error("Unknown status filter: {0}")]
    UnknownStatusFilter(String),
}

/// Result alias for shared type parsing.
pub type Result<T> = std::result::Result<T, Error>;
