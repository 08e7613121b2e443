//! Review slug generation and collision handling
//!
//! A slug is the deterministic, normalized join of category, lastname, city
//! and installation year. Collisions resolve to the lowest free `-N` suffix
//! (N >= 2) by probing the store sequentially. Once assigned, a slug only
//! changes when one of its seed fields changes.

use chrono::{Datelike, NaiveDate};
use surrealdb::RecordId;

use crate::db::repository::RepoResult;

/// Async slug existence probe, implemented by the review repository.
///
/// `exclude` carries the record id being edited so that a review keeping
/// its own slug does not collide with itself.
#[allow(async_fn_in_trait)]
pub trait SlugStore {
    async fn slug_exists(&self, candidate: &str, exclude: Option<&RecordId>) -> RepoResult<bool>;
}

/// Normalize text into slug form
///
/// Lowercases, transliterates German umlauts (ä→ae, ö→oe, ü→ue, ß→ss),
/// collapses every run of other non-alphanumerics into a single hyphen and
/// trims hyphens at both ends.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_dash = false;
    for c in text.to_lowercase().chars() {
        match c {
            'ä' => {
                out.push_str("ae");
                prev_dash = false;
            }
            'ö' => {
                out.push_str("oe");
                prev_dash = false;
            }
            'ü' => {
                out.push_str("ue");
                prev_dash = false;
            }
            'ß' => {
                out.push_str("ss");
                prev_dash = false;
            }
            'a'..='z' | '0'..='9' => {
                out.push(c);
                prev_dash = false;
            }
            _ => {
                if !prev_dash && !out.is_empty() {
                    out.push('-');
                    prev_dash = true;
                }
            }
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Base slug for a review: `{category}-{lastname}-{city}-{year}`
pub fn base_slug(category: &str, lastname: &str, city: &str, year: i32) -> String {
    format!(
        "{}-{}-{}-{}",
        normalize(category),
        normalize(lastname),
        normalize(city),
        year
    )
}

/// Year component for slug seeding, tolerant of malformed stored dates
///
/// New dates are validated at the API boundary; stored rows written by
/// earlier tooling may still carry junk, which maps to year 0 so that two
/// equally unparseable dates compare equal in [`should_regenerate`].
pub fn slug_year(date: &str) -> i32 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.year())
        .unwrap_or(0)
}

/// The slug-relevant subset of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugSource<'a> {
    pub category: &'a str,
    pub lastname: &'a str,
    pub city: &'a str,
    pub installation_year: i32,
}

/// Whether an edit requires a fresh slug
///
/// True iff lastname, city, category or installation year changed. Cosmetic
/// edits (text, rating, images) keep the published URL stable.
pub fn should_regenerate(old: &SlugSource, new: &SlugSource) -> bool {
    old != new
}

/// Resolve `candidate` to a free slug
///
/// Returns `candidate` unchanged when free, otherwise probes `candidate-2`,
/// `candidate-3`, ... strictly in sequence until a free value turns up. A
/// store failure propagates unmodified; no guessed slug is ever returned.
pub async fn ensure_unique<S: SlugStore>(
    store: &S,
    candidate: &str,
    exclude: Option<&RecordId>,
) -> RepoResult<String> {
    if !store.slug_exists(candidate, exclude).await? {
        return Ok(candidate.to_string());
    }
    let mut n: u32 = 2;
    loop {
        let probe = format!("{candidate}-{n}");
        if !store.slug_exists(&probe, exclude).await? {
            return Ok(probe);
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepoError;

    struct FixedStore {
        taken: Vec<&'static str>,
    }

    impl SlugStore for FixedStore {
        async fn slug_exists(
            &self,
            candidate: &str,
            _exclude: Option<&RecordId>,
        ) -> RepoResult<bool> {
            Ok(self.taken.contains(&candidate))
        }
    }

    struct FailingStore;

    impl SlugStore for FailingStore {
        async fn slug_exists(
            &self,
            _candidate: &str,
            _exclude: Option<&RecordId>,
        ) -> RepoResult<bool> {
            Err(RepoError::Database("connection lost".to_string()))
        }
    }

    #[test]
    fn test_normalize_transliterates_umlauts() {
        assert_eq!(normalize("Müller"), "mueller");
        assert_eq!(normalize("Köln"), "koeln");
        assert_eq!(normalize("Straße"), "strasse");
        assert_eq!(normalize("Kachelöfen & Kamine"), "kacheloefen-kamine");
    }

    #[test]
    fn test_normalize_collapses_separator_runs() {
        assert_eq!(normalize("Bad   Staffelstein"), "bad-staffelstein");
        assert_eq!(normalize("a---b"), "a-b");
        assert_eq!(normalize("a / b / c"), "a-b-c");
    }

    #[test]
    fn test_normalize_trims_edge_hyphens() {
        assert_eq!(normalize("  Kaminofen  "), "kaminofen");
        assert_eq!(normalize("---x---"), "x");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_normalize_keeps_digits() {
        assert_eq!(normalize("Ofen 2000"), "ofen-2000");
    }

    #[test]
    fn test_base_slug_shape() {
        assert_eq!(
            base_slug("Kaminofen", "Müller", "Bamberg", 2024),
            "kaminofen-mueller-bamberg-2024"
        );
    }

    #[test]
    fn test_slug_year_tolerates_junk() {
        assert_eq!(slug_year("2024-06-12"), 2024);
        assert_eq!(slug_year("im Sommer"), 0);
        assert_eq!(slug_year(""), 0);
    }

    #[test]
    fn test_should_regenerate_only_on_seed_changes() {
        let old = SlugSource {
            category: "Kaminofen",
            lastname: "Müller",
            city: "Bamberg",
            installation_year: 2024,
        };
        assert!(!should_regenerate(&old, &old));

        let city_changed = SlugSource {
            city: "Coburg",
            ..old
        };
        assert!(should_regenerate(&old, &city_changed));

        let year_changed = SlugSource {
            installation_year: 2025,
            ..old
        };
        assert!(should_regenerate(&old, &year_changed));
    }

    #[tokio::test]
    async fn test_ensure_unique_returns_free_candidate() {
        let store = FixedStore { taken: vec![] };
        let slug = ensure_unique(&store, "kaminofen-mueller-bamberg-2024", None)
            .await
            .unwrap();
        assert_eq!(slug, "kaminofen-mueller-bamberg-2024");
    }

    #[tokio::test]
    async fn test_ensure_unique_probes_sequentially() {
        let store = FixedStore {
            taken: vec![
                "kaminofen-mueller-bamberg-2024",
                "kaminofen-mueller-bamberg-2024-2",
            ],
        };
        let slug = ensure_unique(&store, "kaminofen-mueller-bamberg-2024", None)
            .await
            .unwrap();
        assert_eq!(slug, "kaminofen-mueller-bamberg-2024-3");
    }

    #[tokio::test]
    async fn test_ensure_unique_takes_lowest_free_suffix() {
        // -2 free even though -3 is taken: the lowest free suffix wins
        let store = FixedStore {
            taken: vec!["base", "base-3"],
        };
        let slug = ensure_unique(&store, "base", None).await.unwrap();
        assert_eq!(slug, "base-2");
    }

    #[tokio::test]
    async fn test_ensure_unique_propagates_store_failure() {
        let err = ensure_unique(&FailingStore, "base", None).await.unwrap_err();
        assert!(matches!(err, RepoError::Database(_)));
    }
}
