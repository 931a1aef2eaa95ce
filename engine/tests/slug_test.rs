//! Slug derivation and unique resolution.
//!
//! Run with: `cargo test --test slug_test`

use std::sync::atomic::{AtomicUsize, Ordering};

use fw_engine::config::Config;
use fw_engine::tournament::{
    resolve_unique, slugify, InMemorySlugs, SlugError, SlugLookup, SlugResolver, FALLBACK_SLUG,
};
use proptest::prelude::*;

#[test]
fn test_documented_slugs() {
    assert_eq!(slugify("  Winter Classic!! 2026  "), "winter-classic-2026");
    assert_eq!(slugify("!!!"), FALLBACK_SLUG);
    assert_eq!(slugify("Spring Cup"), "spring-cup");
}

#[test]
fn test_documented_resolution() {
    let taken = ["spring-cup", "spring-cup-2"];
    let slug = resolve_unique(
        "Spring Cup",
        |slug, _| Ok::<_, std::convert::Infallible>(taken.contains(&slug)),
        None,
    )
    .unwrap();
    assert_eq!(slug, "spring-cup-3");
}

#[tokio::test]
async fn test_resolve_with_registry() {
    let mut registry = InMemorySlugs::new();
    registry.insert("club-open", 1);
    registry.insert("club-open-2", 2);
    registry.insert("club-open-4", 4);

    let slug = SlugResolver::default()
        .resolve_with("Club Open", &registry, None)
        .await
        .unwrap();
    assert_eq!(slug, "club-open-3");
}

#[tokio::test]
async fn test_rename_keeps_own_slug() {
    let mut registry = InMemorySlugs::new();
    registry.insert("club-open", 1);

    let resolver = SlugResolver::default();
    let own = resolver.resolve_with("Club Open", &registry, Some(1)).await.unwrap();
    assert_eq!(own, "club-open");

    let other = resolver.resolve_with("Club Open", &registry, Some(9)).await.unwrap();
    assert_eq!(other, "club-open-2");
}

#[tokio::test]
async fn test_fallback_slug_gets_suffixes() {
    let mut registry = InMemorySlugs::new();
    registry.insert(FALLBACK_SLUG, 1);

    let slug = SlugResolver::default()
        .resolve_with("???", &registry, None)
        .await
        .unwrap();
    assert_eq!(slug, "tournament-2");
}

/// Lookup that fails after a fixed number of calls.
struct FlakyLookup {
    calls: AtomicUsize,
    fail_after: usize,
}

#[derive(Debug, PartialEq, Eq)]
struct LookupDown;

impl SlugLookup for FlakyLookup {
    type Error = LookupDown;

    async fn slug_exists(&self, _slug: &str, _exclude_id: Option<i64>) -> Result<bool, LookupDown> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.fail_after {
            Err(LookupDown)
        } else {
            Ok(true)
        }
    }
}

#[tokio::test]
async fn test_lookup_error_aborts_resolution() {
    let lookup = FlakyLookup {
        calls: AtomicUsize::new(0),
        fail_after: 2,
    };

    let result = SlugResolver::default()
        .resolve_with("Club Open", &lookup, None)
        .await;

    assert!(matches!(result, Err(SlugError::Lookup(LookupDown))));
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_configured_cap_exhausts() {
    let config = Config::default_for_test();
    let lookup = FlakyLookup {
        calls: AtomicUsize::new(0),
        fail_after: usize::MAX,
    };

    let result = config
        .slug_resolver()
        .resolve_with("Club Open", &lookup, None)
        .await;

    match result {
        Err(SlugError::Exhausted { base, attempts }) => {
            assert_eq!(base, "club-open");
            assert_eq!(attempts, 100);
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 100);
}

proptest! {
    #[test]
    fn slugify_is_idempotent(name in ".{0,64}") {
        let once = slugify(&name);
        prop_assert_eq!(slugify(&once), once.clone());
    }

    #[test]
    fn slugify_output_is_url_safe(name in ".{0,64}") {
        let slug = slugify(&name);
        prop_assert!(!slug.is_empty());
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn resolved_slug_is_first_free_candidate(taken in 0usize..20) {
        let slug = resolve_unique(
            "Club Open",
            |slug, _| {
                let index = match slug.strip_prefix("club-open") {
                    Some("") => 1,
                    Some(rest) => rest.trim_start_matches('-').parse::<usize>().unwrap_or(usize::MAX),
                    None => usize::MAX,
                };
                Ok::<_, std::convert::Infallible>(index <= taken)
            },
            None,
        )
        .unwrap();

        let expected = if taken == 0 {
            "club-open".to_string()
        } else {
            format!("club-open-{}", taken + 1)
        };
        prop_assert_eq!(slug, expected);
    }
}
