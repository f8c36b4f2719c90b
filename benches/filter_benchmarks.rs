//! Benchmarks for the filter engine.
//!
//! Run with: cargo bench --bench filter_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use notekeeper::domain::{Category, CategoryId, Note, NoteId};
use notekeeper::filter::{FilterCache, Selection, filter_notes};
use std::hint::black_box;

// =============================================================================
// Test Data Generation
// =============================================================================

const CATEGORIES: &[&str] = &["Misc", "Home", "Work", "Travel", "Reading", "Health"];

const TAGS: &[&str] = &["urgent", "someday", "errands", "ideas", "review"];

const WORDS: &[&str] = &[
    "milk", "report", "budget", "flight", "doctor", "garden", "meeting", "invoice", "novel",
    "recipe", "train", "backup", "dentist", "groceries", "slides", "tickets",
];

fn categories() -> Vec<Category> {
    let mut all = vec![Category::all()];
    all.extend(
        CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, name)| Category::new(CategoryId::Id(i as u64 + 1), *name, "#9e9e9e")),
    );
    all
}

/// Deterministic notes spread over every category.
fn notes(count: usize) -> Vec<Note> {
    (0..count)
        .map(|i| {
            let description: Vec<&str> =
                (0..12).map(|j| WORDS[(i + j * 3) % WORDS.len()]).collect();
            let title = format!("{} {}", WORDS[i % WORDS.len()], i);
            Note::builder(NoteId::new(i as u64 + 1), title)
                .description(description.join(" "))
                .category_id(CategoryId::Id((i % CATEGORIES.len()) as u64 + 1))
                .tags(vec![TAGS[i % TAGS.len()].to_string()])
                .build()
        })
        .collect()
}

// =============================================================================
// Filter Benchmarks
// =============================================================================

fn bench_filter(c: &mut Criterion) {
    let categories = categories();
    let selections = [
        ("all", Selection::default()),
        ("category", Selection::new("", CategoryId::Id(3))),
        ("query", Selection::new("Invoice", CategoryId::All)),
        ("category_and_query", Selection::new("urgent", CategoryId::Id(2))),
    ];

    let mut group = c.benchmark_group("filter_notes");
    for size in [100, 1_000, 10_000] {
        let notes = notes(size);
        group.throughput(Throughput::Elements(size as u64));
        for (name, selection) in &selections {
            group.bench_with_input(BenchmarkId::new(*name, size), &notes, |b, notes| {
                b.iter(|| filter_notes(black_box(notes), &categories, black_box(selection)).len())
            });
        }
    }
    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let categories = categories();
    let notes = notes(10_000);
    let selection = Selection::new("milk", CategoryId::All);

    let mut group = c.benchmark_group("filter_cache");

    group.bench_function("hit", |b| {
        let mut cache = FilterCache::new();
        cache.visible(&notes, 1, &categories, 1, &selection);
        b.iter(|| cache.visible(&notes, 1, &categories, 1, black_box(&selection)).len())
    });

    group.bench_function("miss", |b| {
        let mut cache = FilterCache::new();
        let mut revision = 0;
        b.iter(|| {
            revision += 1;
            cache.visible(&notes, revision, &categories, 1, &selection).len()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_filter, bench_cache);
criterion_main!(benches);
