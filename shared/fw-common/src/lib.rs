//! Fairway Common Library
//!
//! Shared identity, membership and tournament types consumed by the
//! authorization engine and by the storage and API layers that feed it.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
