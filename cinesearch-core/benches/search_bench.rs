use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cinesearch_core::error::Result;
use cinesearch_core::{Document, Embedder, RolePrefixes, SearchIndex};

/// Cheap deterministic pseudo-embedder so the benchmark measures ranking,
/// not model inference.
struct ByteFoldEmbedder {
    dimension: usize,
}

impl Embedder for ByteFoldEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimension];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % self.dimension] += f32::from(byte) / 255.0;
        }
        Ok(vector)
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

fn bench_cosine_topk(c: &mut Criterion) {
    let mut group = c.benchmark_group("cosine_topk");

    for &docs in &[100, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(docs), &docs, |b, &docs| {
            let embedder = ByteFoldEmbedder { dimension: 768 };
            let corpus: Vec<Document> = (0..docs)
                .map(|i| {
                    Document::new(
                        i,
                        format!("Movie {i}"),
                        format!("a plot about topic {} and some details", i % 10),
                    )
                })
                .collect();
            let index = SearchIndex::build(&embedder, corpus, RolePrefixes::default()).unwrap();

            b.iter(|| {
                index
                    .search(&embedder, black_box("topic 3 details"), black_box(10))
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cosine_topk);
criterion_main!(benches);
