//! Candidate generation for catalog matching.
//!
//! A route path can name a document in several ways. Candidates are tried in
//! this order, most specific first, with duplicates dropped:
//!
//! 1. trailing segments joined (deep routes only)
//! 2. `primary/trailing...`
//! 3. the full path `prefix/primary/trailing...`
//! 4. the last segment alone
//!
//! When the prefix is a locale tag, form 3 is the same as form 2 with the
//! language marker removed, so it collapses into form 2.

use serde::Serialize;

use crate::config::ResolverConfig;
use crate::types::{to_canonical_id, CanonicalId, RoutePath};

/// Ordered, deduplicated slug and identifier candidates for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSet {
    slugs: Vec<String>,
    ids: Vec<CanonicalId>,
}

impl CandidateSet {
    /// Slug candidates, highest precedence first.
    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    /// Identifier candidates, in the order of the slugs they came from.
    pub fn ids(&self) -> &[CanonicalId] {
        &self.ids
    }

    /// Whether `slug` is one of the slug candidates.
    pub fn has_slug(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| s == slug)
    }

    /// Whether `id` names one of the identifier candidates.
    pub fn has_id(&self, id: &str) -> bool {
        match to_canonical_id(id) {
            Ok(id) => self.ids.contains(&id),
            Err(_) => false,
        }
    }
}

/// Builds candidate sets from route paths.
#[derive(Debug, Clone)]
pub struct CandidateGenerator<'a> {
    config: &'a ResolverConfig,
}

impl<'a> CandidateGenerator<'a> {
    /// Create a generator using the configured locale tags.
    pub fn new(config: &'a ResolverConfig) -> Self {
        Self { config }
    }

    /// Generate candidates for a path.
    pub fn generate(&self, path: &RoutePath) -> CandidateSet {
        let trailing = path.trailing_joined();

        let without_prefix = if path.is_deep() {
            format!("{}/{}", path.primary(), trailing)
        } else {
            path.primary().to_string()
        };

        let full = if self.config.is_locale_tag(path.prefix()) {
            without_prefix.clone()
        } else {
            path.to_string()
        };

        let mut slugs: Vec<String> = Vec::with_capacity(4);
        let ordered = [
            (!trailing.is_empty()).then_some(trailing),
            Some(without_prefix),
            Some(full),
            Some(path.to_string()),
            Some(path.last_segment().to_string()),
        ];
        for candidate in ordered.into_iter().flatten() {
            if !slugs.contains(&candidate) {
                slugs.push(candidate);
            }
        }

        let mut ids: Vec<CanonicalId> = Vec::new();
        for slug in &slugs {
            if let Ok(id) = to_canonical_id(slug) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }

        tracing::debug!(path = %path, slugs = ?slugs, id_count = ids.len(), "generated candidates");

        CandidateSet { slugs, ids }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gen(path: &str) -> CandidateSet {
        let config = ResolverConfig::default();
        CandidateGenerator::new(&config).generate(&RoutePath::parse(path).unwrap())
    }

    #[test]
    fn test_deep_route_order() {
        let set = gen("article/2023/10/hello");
        assert_eq!(
            set.slugs(),
            &["10/hello", "2023/10/hello", "article/2023/10/hello", "hello"]
        );
    }

    #[test]
    fn test_locale_prefix_collapses() {
        let set = gen("en/article/my-post");
        assert_eq!(
            set.slugs(),
            &["my-post", "article/my-post", "en/article/my-post"]
        );
    }

    #[test]
    fn test_two_segment_route() {
        let set = gen("article/hello-world");
        assert_eq!(set.slugs(), &["hello-world", "article/hello-world"]);
        assert!(set.ids().is_empty());
    }

    #[test]
    fn test_identifier_candidates() {
        let raw = "0123456789abcdef0123456789abcdef";
        let set = gen(&format!("article/{}", raw));
        assert_eq!(set.ids().len(), 1);
        assert!(set.has_id("01234567-89ab-cdef-0123-456789abcdef"));
        assert!(set.has_slug(raw));
    }
}
