// Criterion benchmarks for Mooza Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mooza_match::core::{matcher::rank_candidates, russian_cmp, Taxonomy};
use mooza_match::models::{RankQuery, SortKey, UserProfile};

const CITIES: &[&str] = &["Москва", "Санкт-Петербург", "Казань", "Ёшкар-Ола", "Новосибирск", "Екатеринбург"];

fn all_tags() -> Vec<String> {
    let taxonomy = Taxonomy::builtin();
    taxonomy
        .categories()
        .iter()
        .flat_map(|c| c.subcategories.iter())
        .flat_map(|s| s.tags.iter().cloned())
        .collect()
}

fn create_candidate(id: usize, tags: &[String]) -> UserProfile {
    let interests = (0..(3 + id % 6))
        .map(|i| tags[(id * 7 + i * 13) % tags.len()].clone())
        .collect();

    UserProfile {
        user_id: id.to_string(),
        name: Some(format!("Музыкант {}", id)),
        city: Some(CITIES[id % CITIES.len()].to_string()),
        country: Some("Россия".to_string()),
        interests: Some(interests),
        ..UserProfile::default()
    }
}

fn create_viewer(tags: &[String]) -> UserProfile {
    UserProfile {
        user_id: "viewer".to_string(),
        interests: Some(tags.iter().step_by(5).cloned().collect()),
        ..UserProfile::default()
    }
}

fn bench_russian_cmp(c: &mut Criterion) {
    c.bench_function("russian_cmp", |b| {
        b.iter(|| russian_cmp(black_box("Ёшкар-Ола"), black_box("Екатеринбург")));
    });
}

fn bench_rank_candidates(c: &mut Criterion) {
    let tags = all_tags();
    let viewer = create_viewer(&tags);

    let mut group = c.benchmark_group("rank_candidates");

    for size in [100, 1_000, 10_000].iter() {
        let candidates: Vec<UserProfile> = (0..*size).map(|i| create_candidate(i, &tags)).collect();

        for (label, sort_key) in [("by_count", SortKey::MatchCount), ("by_city", SortKey::City)] {
            let query = RankQuery {
                selected_tags: vec![],
                strict_mode: true,
                sort_key,
                limit: Some(50),
            };

            group.bench_with_input(BenchmarkId::new(label, size), size, |b, _| {
                b.iter(|| rank_candidates(black_box(&viewer), black_box(&candidates), black_box(&query)));
            });
        }
    }

    group.finish();
}

fn bench_strict_tag_filter(c: &mut Criterion) {
    let tags = all_tags();
    let viewer = create_viewer(&tags);
    let candidates: Vec<UserProfile> = (0..5_000).map(|i| create_candidate(i, &tags)).collect();

    let query = RankQuery {
        selected_tags: vec![tags[0].clone(), tags[13].clone()],
        strict_mode: true,
        sort_key: SortKey::Name,
        limit: None,
    };

    c.bench_function("strict_tag_filter_5000", |b| {
        b.iter(|| rank_candidates(black_box(&viewer), black_box(&candidates), black_box(&query)));
    });
}

criterion_group!(benches, bench_russian_cmp, bench_rank_candidates, bench_strict_tag_filter);
criterion_main!(benches);
