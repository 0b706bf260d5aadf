use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use shamir_recover::{
    BigInt, Config, Polynomial, SearchMode, SecretReconstructor, Share, ShareDocument, fit,
};

fn secret_polynomial(k: usize) -> Polynomial {
    let secret: BigInt = "170141183460469231731687303715884105727".parse().unwrap();
    let mut coefficients = vec![secret];
    coefficients.extend((1..k).map(|i| BigInt::from(i as i64 * 7919 - 40_000)));
    Polynomial::new(coefficients)
}

/// `n` shares of a degree `k - 1` polynomial with the first `corrupted` pushed off the curve
fn corrupted_shares(n: usize, k: usize, corrupted: usize) -> Vec<Share> {
    let poly = secret_polynomial(k);
    (1..=n as i64)
        .map(|x| {
            let y = poly.evaluate(&BigInt::from(x));
            if (x as usize) <= corrupted {
                Share::new(x, y + 1)
            } else {
                Share::new(x, y)
            }
        })
        .collect()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");

    // Benchmark different thresholds
    for k in [3, 6, 10].iter() {
        let shares = corrupted_shares(*k, *k, 0);
        let points: Vec<&Share> = shares.iter().collect();

        group.bench_function(format!("fit_k{}", k), |b| {
            b.iter(|| {
                black_box(fit(black_box(&points)).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    // The first two shares are corrupted, so every candidate containing
    // either of them is rejected before the search succeeds
    for (n, k) in [(8, 4), (12, 6), (14, 7)].iter() {
        let shares = corrupted_shares(*n, *k, 2);

        for mode in [SearchMode::Sequential, SearchMode::Parallel] {
            let reconstructor = SecretReconstructor::builder(*k)
                .with_config(Config::new().with_mode(mode))
                .build()
                .unwrap();

            group.bench_function(format!("{:?}_n{}_k{}", mode, n, k), |b| {
                b.iter(|| {
                    black_box(reconstructor.reconstruct(black_box(&shares)).unwrap());
                });
            });
        }
    }

    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");

    let shares = corrupted_shares(10, 7, 3);
    let entries: Vec<String> = shares
        .iter()
        .map(|share| {
            format!(
                r#""{}": {{ "base": "16", "value": "{}" }}"#,
                share.x(),
                share.y().to_str_radix(16)
            )
        })
        .collect();
    let text = format!(r#"{{ "keys": {{ "n": 10, "k": 7 }}, {} }}"#, entries.join(", "));

    group.bench_function("parse_and_decode", |b| {
        b.iter(|| {
            let doc = ShareDocument::from_json_str(black_box(&text)).unwrap();
            black_box(doc.shares().unwrap());
        });
    });

    group.bench_function("full_workflow", |b| {
        b.iter(|| {
            let doc = ShareDocument::from_json_str(black_box(&text)).unwrap();
            let shares = doc.shares().unwrap();
            let reconstructor = SecretReconstructor::builder(doc.threshold()).build().unwrap();
            black_box(reconstructor.reconstruct(&shares).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_fit, bench_search, bench_document);
criterion_main!(benches);
