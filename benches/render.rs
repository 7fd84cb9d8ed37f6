//! Benchmarks for message rendering.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use slackport::identity::IdentityMap;
use slackport::render::fill_references;

fn generate_maps(count: usize) -> (IdentityMap, IdentityMap) {
    let mut users = IdentityMap::new();
    let mut channels = IdentityMap::new();
    for i in 0..count {
        users.insert(format!("U{i:06}"), format!("user-{i}"));
        channels.insert(format!("C{i:06}"), format!("channel-{i}"));
    }
    (users, channels)
}

fn generate_body(mentions: usize) -> String {
    let mut body = String::new();
    for i in 0..mentions {
        body.push_str(&format!("word <@U{:06}> more text <#C{:06}> ", i, i));
    }
    body
}

fn bench_fill_references(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_references");

    for map_size in [10, 100, 1000] {
        let (users, channels) = generate_maps(map_size);
        let body = generate_body(8);
        group.bench_with_input(
            BenchmarkId::new("map_size", map_size),
            &map_size,
            |b, _| {
                b.iter(|| {
                    fill_references(
                        black_box(&body),
                        black_box(&users),
                        black_box(&channels),
                        &[],
                        1940,
                    )
                });
            },
        );
    }
    group.finish();
}

fn bench_truncation(c: &mut Criterion) {
    let (users, channels) = generate_maps(10);
    let long_body = "x".repeat(10_000);
    let urls = ["https://files.example/a.pdf", "https://files.example/b.zip"];

    c.bench_function("truncate_long_body", |b| {
        b.iter(|| {
            fill_references(
                black_box(&long_body),
                black_box(&users),
                black_box(&channels),
                black_box(&urls),
                1940,
            )
        });
    });
}

criterion_group!(benches, bench_fill_references, bench_truncation);
criterion_main!(benches);
