//! Property tests: determinism, result bounds, score ordering.

use proptest::prelude::*;

use rhc::dataset::{Dataset, Record};
use rhc::search::{
    HashEmbedder, KeywordMap, RESULT_LIMIT, SCORE_FLOOR, SearchEngine, fuzzy,
    semantic::Embedder,
};

fn record(unit_name: &str, vocabulary: &str, genres: &str, reading: &str) -> Record {
    Record {
        level: "3".to_string(),
        unit: "1".to_string(),
        part: "1".to_string(),
        unit_name: unit_name.to_string(),
        vocabulary: Some(vocabulary.to_string()),
        genres: Some(genres.to_string()),
        reading_skill: Some(reading.to_string()),
        ..Record::default()
    }
}

fn fixture_engine() -> SearchEngine {
    let records = vec![
        record("A", "energy power heat", "Science Article", "Main Idea"),
        record("B", "storm wind rain", "Realistic Fiction", "Summarize"),
        record("C", "citizen volunteer help", "Biography", "Draw Conclusions"),
        record("D", "clue detective mystery", "Mystery, Adventure", "Make Inferences"),
        record("E", "light bulb current", "Science Article", "Main Idea and Details"),
        record("F", "soil seed harvest", "Poem", "Sequence"),
        record("G", "river valley mountain", "Legend", "Compare and Contrast"),
    ];
    SearchEngine::simple(Dataset::new(records), KeywordMap::builtin())
}

proptest! {
    #[test]
    fn result_sets_are_bounded(query in "[a-z]{1,12}( [a-z]{1,12}){0,2}") {
        let engine = fixture_engine();
        prop_assert!(engine.topic_search(&query).unwrap().len() <= RESULT_LIMIT);
        prop_assert!(engine.skill_search(&query).unwrap().len() <= RESULT_LIMIT);
        prop_assert!(engine.genre_search(&query).unwrap().len() <= RESULT_LIMIT);
    }

    #[test]
    fn searches_are_deterministic(query in "[a-z]{1,12}( [a-z]{1,12}){0,2}") {
        let engine = fixture_engine();
        prop_assert_eq!(
            engine.topic_search(&query).unwrap(),
            engine.topic_search(&query).unwrap()
        );
        prop_assert_eq!(
            engine.skill_search(&query).unwrap(),
            engine.skill_search(&query).unwrap()
        );
        prop_assert_eq!(
            engine.genre_search(&query).unwrap(),
            engine.genre_search(&query).unwrap()
        );
    }

    #[test]
    fn skill_and_genre_scores_qualify_and_descend(query in "[a-z]{1,12}( [a-z]{1,12}){0,2}") {
        let engine = fixture_engine();

        let skills = engine.skill_search(&query).unwrap();
        for m in &skills {
            prop_assert!(m.score > SCORE_FLOOR);
        }
        for pair in skills.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }

        let genres = engine.genre_search(&query).unwrap();
        for m in &genres {
            prop_assert!(m.score > SCORE_FLOOR);
        }
        for pair in genres.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn topic_ordering_is_monotone(query in "[a-z]{1,12}") {
        let engine = fixture_engine();
        let matches = engine.topic_search(&query).unwrap();
        for pair in matches.windows(2) {
            prop_assert!(
                pair[0].overlap > pair[1].overlap
                    || (pair[0].overlap == pair[1].overlap && pair[0].fuzzy >= pair[1].fuzzy)
            );
        }
    }

    #[test]
    fn fuzzy_scores_stay_in_range(a in ".{0,40}", b in ".{0,40}") {
        let token_set = fuzzy::token_set_ratio(&a, &b);
        prop_assert!((0.0..=100.0).contains(&token_set));
        let partial = fuzzy::partial_ratio(&a, &b);
        prop_assert!((0.0..=100.0).contains(&partial));
    }

    #[test]
    fn fuzzy_identity_scores_100(a in "[a-z]{1,10}( [a-z]{1,10}){0,3}") {
        prop_assert_eq!(fuzzy::token_set_ratio(&a, &a), 100.0);
    }

    #[test]
    fn hash_embeddings_are_deterministic(text in ".{0,60}", dim in 1usize..256usize) {
        let embedder = HashEmbedder::new(dim);
        let first = embedder.embed(&text).unwrap();
        let second = embedder.embed(&text).unwrap();
        prop_assert_eq!(first.len(), dim);
        prop_assert_eq!(first, second);
    }
}
