use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gms_filter::{GmsFilter, GmsParams, ImageSize, Keypoint, PutativeMatch};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Half the matches follow a global translation, half are random.
fn synthetic_scene(n: usize) -> (Vec<Keypoint>, Vec<Keypoint>, Vec<PutativeMatch>) {
    let mut rng = StdRng::seed_from_u64(17);
    let mut kp1 = Vec::with_capacity(n);
    let mut kp2 = Vec::with_capacity(n);
    let mut matches = Vec::with_capacity(n);
    for i in 0..n {
        let x = rng.random_range(0.0..1280.0f32);
        let y = rng.random_range(0.0..720.0f32);
        kp1.push(Keypoint::new(x, y));
        if i % 2 == 0 {
            kp2.push(Keypoint::new((x + 40.0).min(1279.0), (y + 15.0).min(719.0)));
        } else {
            kp2.push(Keypoint::new(
                rng.random_range(0.0..1280.0),
                rng.random_range(0.0..720.0),
            ));
        }
        matches.push(PutativeMatch::new(i, i, rng.random_range(0.0..64.0)));
    }
    (kp1, kp2, matches)
}

fn bench_filter(c: &mut Criterion) {
    let size = ImageSize::new(1280, 720);
    let filter = GmsFilter::new(GmsParams::default()).expect("filter");

    for n in [1_000usize, 10_000] {
        let (kp1, kp2, matches) = synthetic_scene(n);
        c.bench_function(&format!("gms_filter_{n}"), |b| {
            b.iter(|| {
                filter
                    .filter(
                        black_box(size),
                        black_box(size),
                        black_box(&kp1),
                        black_box(&kp2),
                        black_box(&matches),
                    )
                    .expect("filter")
            })
        });
    }
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
