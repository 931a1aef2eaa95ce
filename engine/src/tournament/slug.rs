//! Tournament slug derivation.
//!
//! `slugify` normalizes a display name into a URL-safe token. The resolver
//! then appends `-2`, `-3`, ... until the caller-supplied existence check
//! reports the candidate as free.

use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Slug used when a name normalizes to nothing.
pub const FALLBACK_SLUG: &str = "tournament";

/// Word separators: space separators, line terminators and the byte-order
/// mark. Narrower than Unicode `White_Space` (no U+0085).
const SEPARATOR_CLASS: &str =
    r"\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[^a-z0-9{SEPARATOR_CLASS}-]")).expect("valid regex")
});
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("[{SEPARATOR_CLASS}]+")).expect("valid regex"));
static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid regex"));

/// Normalize a display name into a slug.
///
/// Never returns an empty string.
///
/// # Examples
///
/// ```
/// use fw_engine::tournament::slugify;
///
/// assert_eq!(slugify("  Winter Classic!! 2026  "), "winter-classic-2026");
/// assert_eq!(slugify("!!!"), "tournament");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = DISALLOWED_CHARS.replace_all(lowered.trim_matches(is_separator), "");
    let hyphenated = SEPARATOR_RUNS.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&hyphenated, "-");
    let slug = collapsed.trim_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

const fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Candidate slugs for `base`, in the order they are tried.
///
/// ```
/// use fw_engine::tournament::candidates;
///
/// let first: Vec<String> = candidates("cup").take(3).collect();
/// assert_eq!(first, ["cup", "cup-2", "cup-3"]);
/// ```
pub fn candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    (0u64..).map(move |index| nth_candidate(base, index))
}

fn nth_candidate(base: &str, index: u64) -> String {
    if index == 0 {
        base.to_string()
    } else {
        format!("{base}-{}", index + 1)
    }
}

/// Slug resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum SlugError<E> {
    /// The existence check failed.
    #[error("Slug lookup failed: {0}")]
    Lookup(#[source] E),

    /// Every permitted candidate was taken.
    #[error("No free slug for '{base}' after {attempts} attempts")]
    Exhausted { base: String, attempts: u32 },
}

/// Storage-backed existence check used by [`SlugResolver::resolve_with`].
///
/// `exclude_id` names a tournament whose own slug must not count as a
/// conflict (renames).
pub trait SlugLookup {
    type Error;

    fn slug_exists(
        &self,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

/// Unique-slug resolver.
///
/// Unbounded by default; `max_attempts` caps the number of candidates
/// checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlugResolver {
    pub max_attempts: Option<u32>,
}

impl SlugResolver {
    #[must_use]
    pub const fn new(max_attempts: Option<u32>) -> Self {
        Self { max_attempts }
    }

    /// Resolve a unique slug using a synchronous existence check.
    pub fn resolve<F, E>(
        &self,
        name: &str,
        mut exists: F,
        exclude_id: Option<i64>,
    ) -> Result<String, SlugError<E>>
    where
        F: FnMut(&str, Option<i64>) -> Result<bool, E>,
    {
        let base = slugify(name);

        for index in 0u64.. {
            self.check_budget(&base, index)?;
            let candidate = nth_candidate(&base, index);

            if !exists(&candidate, exclude_id).map_err(SlugError::Lookup)? {
                return Ok(candidate);
            }
            debug!(slug = %candidate, "Slug taken, trying next suffix");
        }

        Err(self.exhausted(&base))
    }

    /// Resolve a unique slug against an async lookup.
    pub async fn resolve_with<L>(
        &self,
        name: &str,
        lookup: &L,
        exclude_id: Option<i64>,
    ) -> Result<String, SlugError<L::Error>>
    where
        L: SlugLookup + Sync,
    {
        let base = slugify(name);

        for index in 0u64.. {
            self.check_budget(&base, index)?;
            let candidate = nth_candidate(&base, index);

            if !lookup
                .slug_exists(&candidate, exclude_id)
                .await
                .map_err(SlugError::Lookup)?
            {
                return Ok(candidate);
            }
            debug!(slug = %candidate, "Slug taken, trying next suffix");
        }

        Err(self.exhausted(&base))
    }

    fn check_budget<E>(&self, base: &str, attempts: u64) -> Result<(), SlugError<E>> {
        match self.max_attempts {
            Some(max) if attempts >= u64::from(max) => Err(self.exhausted(base)),
            _ => Ok(()),
        }
    }

    fn exhausted<E>(&self, base: &str) -> SlugError<E> {
        SlugError::Exhausted {
            base: base.to_string(),
            attempts: self.max_attempts.unwrap_or(u32::MAX),
        }
    }
}

/// Resolve a unique slug for `name` with an unbounded resolver.
///
/// ```
/// use fw_engine::tournament::resolve_unique;
///
/// let taken = ["spring-cup", "spring-cup-2"];
/// let slug = resolve_unique(
///     "Spring Cup",
///     |slug, _| Ok::<_, std::convert::Infallible>(taken.contains(&slug)),
///     None,
/// )
/// .unwrap();
/// assert_eq!(slug, "spring-cup-3");
/// ```
pub fn resolve_unique<F, E>(
    name: &str,
    exists: F,
    exclude_id: Option<i64>,
) -> Result<String, SlugError<E>>
where
    F: FnMut(&str, Option<i64>) -> Result<bool, E>,
{
    SlugResolver::default().resolve(name, exists, exclude_id)
}

/// In-memory slug registry mapping slug to its owning tournament.
///
/// Reserved slugs have no owner and conflict for every caller.
#[derive(Debug, Clone, Default)]
pub struct InMemorySlugs {
    slugs: HashMap<String, Option<i64>>,
}

impl InMemorySlugs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `slug` as owned by `tournament_id`.
    pub fn insert(&mut self, slug: impl Into<String>, tournament_id: i64) {
        self.slugs.insert(slug.into(), Some(tournament_id));
    }

    /// Record `slug` as taken without an owner.
    pub fn reserve(&mut self, slug: impl Into<String>) {
        self.slugs.insert(slug.into(), None);
    }

    /// Check whether `slug` is taken by anything other than `exclude_id`.
    pub fn contains(&self, slug: &str, exclude_id: Option<i64>) -> bool {
        self.slugs
            .get(slug)
            .is_some_and(|owner| owner.is_none() || *owner != exclude_id)
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

impl SlugLookup for InMemorySlugs {
    type Error = Infallible;

    async fn slug_exists(&self, slug: &str, exclude_id: Option<i64>) -> Result<bool, Infallible> {
        Ok(self.contains(slug, exclude_id))
    }
}
