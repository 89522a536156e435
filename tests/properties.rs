//! Property tests for candidate generation, matching, synthesis and lookup.

use proptest::prelude::*;
use uuid::Uuid;

use slug_resolver::synth::page_id;
use slug_resolver::{
    to_canonical_id, CandidateGenerator, CatalogEntry, CatalogMatcher, DirectFetcher,
    GraphSynthesizer, InMemoryDocumentStore, ResolverConfig, RoutePath,
};

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9][a-z0-9-]{0,11}",
        Just("en".to_string()),
        Just("zh".to_string()),
    ]
}

fn route_path() -> impl Strategy<Value = RoutePath> {
    (segment(), segment(), prop::collection::vec(segment(), 0..4))
        .prop_map(|(prefix, primary, trailing)| RoutePath::new(prefix, primary, trailing).unwrap())
}

fn entry_type() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Post", "Page", "Menu", "SubMenu", "Notice"]).prop_map(str::to_string)
}

proptest! {
    #[test]
    fn candidates_are_nonempty_unique_and_trailing_first(path in route_path()) {
        let config = ResolverConfig::default();
        let candidates = CandidateGenerator::new(&config).generate(&path);
        let slugs = candidates.slugs();

        prop_assert!(!slugs.is_empty());
        for (i, slug) in slugs.iter().enumerate() {
            prop_assert!(!slugs[i + 1..].contains(slug));
        }

        let expected_first = if path.is_deep() {
            path.trailing_joined()
        } else {
            path.primary().to_string()
        };
        prop_assert_eq!(&slugs[0], &expected_first);
        prop_assert!(candidates.has_slug(&path.to_string()));
        prop_assert!(candidates.has_slug(path.last_segment()));
    }

    #[test]
    fn candidate_generation_is_deterministic(path in route_path()) {
        let config = ResolverConfig::default();
        let generator = CandidateGenerator::new(&config);
        prop_assert_eq!(generator.generate(&path), generator.generate(&path));
    }

    #[test]
    fn matcher_never_returns_navigation(
        path in route_path(),
        types in prop::collection::vec(entry_type(), 1..8),
    ) {
        let config = ResolverConfig::default();
        let candidates = CandidateGenerator::new(&config).generate(&path);
        let catalog: Vec<CatalogEntry> = types
            .into_iter()
            .enumerate()
            .map(|(i, document_type)| CatalogEntry {
                id: i.to_string(),
                slug: path.to_string(),
                document_type,
                status: "Published".to_string(),
            })
            .collect();

        let found = CatalogMatcher::find(&catalog, &candidates);
        let first_content = catalog.iter().find(|e| !e.document_type.contains("Menu"));
        prop_assert_eq!(found, first_content);
    }

    #[test]
    fn synthesis_builds_root_plus_one_node_per_line(
        id in 0i64..1_000_000,
        lines in prop::collection::vec("[A-Za-z][A-Za-z ]{0,15}", 0..12),
        separator in prop::sample::select(vec!["\n", "\n\n", "\r\n", "\n \n"]),
    ) {
        let content = lines.join(separator);
        let graph = GraphSynthesizer::synthesize(page_id(id), "Title", Some(&content)).unwrap();

        prop_assert_eq!(graph.len(), lines.len() + 1);
        prop_assert!(graph.validate_chain().is_ok());

        let chain: Vec<String> = graph
            .chain()
            .iter()
            .map(|n| n.title.clone().unwrap_or_default())
            .collect();
        prop_assert_eq!(chain, lines);
    }

    #[test]
    fn codec_is_idempotent(raw in any::<u128>(), dashed in any::<bool>()) {
        let uuid = Uuid::from_u128(raw);
        let input = if dashed {
            uuid.hyphenated().to_string()
        } else {
            uuid.simple().to_string()
        };

        let once = to_canonical_id(&input).unwrap();
        let twice = to_canonical_id(&once.to_string()).unwrap();
        prop_assert_eq!(once, twice);
        prop_assert_eq!(once.to_string(), uuid.hyphenated().to_string());
    }

    #[test]
    fn short_tails_never_reach_the_store(tail in "[a-zA-Z0-9-]{0,31}") {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let store = InMemoryDocumentStore::new();

        let found = runtime.block_on(DirectFetcher::new(&store).fetch_by_id(&tail)).unwrap();
        prop_assert!(found.is_none());
        prop_assert_eq!(store.lookup_count(), 0);
    }
}
