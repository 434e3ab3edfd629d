//! Search throughput benchmarks over a synthetic curriculum table.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use rhc::dataset::{Dataset, Record};
use rhc::search::{KeywordMap, SearchEngine};

const VOCAB_POOL: &[&str] = &[
    "energy", "power", "electricity", "storm", "climate", "citizen", "volunteer", "detective",
    "mystery", "harvest", "current", "circuit", "rain", "wind", "neighborhood", "clue",
];

const GENRE_POOL: &[&str] = &[
    "Science Article",
    "Realistic Fiction",
    "Mystery, Adventure",
    "Biography",
    "Poem",
];

const SKILL_POOL: &[&str] = &[
    "Identify Main Idea",
    "Cause and Effect",
    "Sequence",
    "Summarize",
    "Make Inferences",
    "Draw Conclusions",
];

fn synthetic_dataset(rows: usize) -> Dataset {
    let records = (0..rows)
        .map(|i| {
            let vocabulary = format!(
                "{} {} {}",
                VOCAB_POOL[i % VOCAB_POOL.len()],
                VOCAB_POOL[(i * 3 + 1) % VOCAB_POOL.len()],
                VOCAB_POOL[(i * 7 + 2) % VOCAB_POOL.len()],
            );
            Record {
                level: format!("{}", i % 5 + 1),
                unit: format!("{}", i % 8 + 1),
                part: format!("{}", i % 2 + 1),
                unit_name: format!("Unit {i}"),
                vocabulary: Some(vocabulary),
                related_words: Some(VOCAB_POOL[(i * 5) % VOCAB_POOL.len()].to_string()),
                reading_skill: Some(SKILL_POOL[i % SKILL_POOL.len()].to_string()),
                thinking_map_skill: Some(SKILL_POOL[(i + 2) % SKILL_POOL.len()].to_string()),
                genres: Some(GENRE_POOL[i % GENRE_POOL.len()].to_string()),
                ..Record::default()
            }
        })
        .collect();
    Dataset::new(records)
}

fn bench_searches(c: &mut Criterion) {
    let engine = SearchEngine::simple(synthetic_dataset(500), KeywordMap::builtin());

    c.bench_function("topic_search_500", |b| {
        b.iter(|| engine.topic_search(black_box("energy")).unwrap());
    });

    c.bench_function("skill_search_500", |b| {
        b.iter(|| engine.skill_search(black_box("main idea")).unwrap());
    });

    c.bench_function("genre_search_500", |b| {
        b.iter(|| engine.genre_search(black_box("mystery")).unwrap());
    });
}

criterion_group!(benches, bench_searches);
criterion_main!(benches);
