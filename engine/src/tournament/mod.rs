//! Tournament lifecycle and identifiers.

pub mod slug;
pub mod status;

pub use slug::{
    candidates, resolve_unique, slugify, InMemorySlugs, SlugError, SlugLookup, SlugResolver,
    FALLBACK_SLUG,
};
pub use status::{classify, is_active, now_millis, TournamentWindow};
