use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sitebot_vector_store::{CorpusStore, Document, cosine_similarity};

const DIMENSION: usize = 384;

fn create_test_store(doc_count: usize) -> CorpusStore {
    let documents = (0..doc_count)
        .map(|i| Document::new(format!("https://example.com/page/{i}"), format!("Page {i}")))
        .collect();
    let embeddings = (0..doc_count)
        .map(|i| {
            (0..DIMENSION)
                .map(|d| ((i * 31 + d * 7) % 97) as f32 / 97.0 - 0.5)
                .collect()
        })
        .collect();
    CorpusStore::from_parts(documents, embeddings).unwrap()
}

fn query_embedding() -> Vec<f32> {
    (0..DIMENSION).map(|d| (d % 13) as f32 / 13.0).collect()
}

fn bench_search_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_search");
    let query = query_embedding();

    for doc_count in [100, 1000, 5000] {
        group.throughput(Throughput::Elements(doc_count as u64));
        let store = create_test_store(doc_count);

        group.bench_with_input(BenchmarkId::from_parameter(doc_count), &doc_count, |b, _| {
            b.iter(|| {
                let results = store.search(black_box(&query), 5).unwrap();
                black_box(results);
            });
        });
    }

    group.finish();
}

fn bench_cosine_similarity(c: &mut Criterion) {
    let a = query_embedding();
    let b: Vec<f32> = a.iter().rev().copied().collect();

    c.bench_function("cosine_similarity_384", |bench| {
        bench.iter(|| black_box(cosine_similarity(black_box(&a), black_box(&b))));
    });
}

criterion_group!(benches, bench_search_latency, bench_cosine_similarity);
criterion_main!(benches);
