use ariadne::{generate_batch, Algorithm, MazeGenerator as _};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const WIDTH: i32 = 60;
const HEIGHT: i32 = 40;

pub fn single(c: &mut Criterion) {
    for algorithm in Algorithm::all() {
        c.bench_function(&format!("{:?}", algorithm), |b| {
            b.iter(|| {
                algorithm
                    .generator()
                    .generate_seeded(black_box(WIDTH), black_box(HEIGHT), 0)
                    .unwrap()
            })
        });
    }
}

pub fn batch_with_rayon(c: &mut Criterion) {
    c.bench_function("batch_with_rayon", |b| {
        b.iter(|| {
            generate_batch(
                Algorithm::RecursiveBacktracker.generator(),
                black_box(WIDTH),
                black_box(HEIGHT),
                16,
                0,
            )
            .unwrap()
        })
    });
}

criterion_group! {name = benches; config = Criterion::default().sample_size(10); targets = single, batch_with_rayon}
criterion_main!(benches);
