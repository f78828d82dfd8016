use chrono::Duration;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use secrecy::SecretString;
use sessiongate::auth::Signer;

fn bench_issue(c: &mut Criterion) {
    let signer = Signer::new(&SecretString::from("bench-secret".to_string())).unwrap();

    c.bench_function("token_issue", |b| {
        b.iter(|| {
            signer.issue(
                black_box("66556d1c5dcf848d421888be"),
                black_box("user@example.com"),
                Duration::hours(1),
            )
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let signer = Signer::new(&SecretString::from("bench-secret".to_string())).unwrap();
    let token = signer
        .issue("66556d1c5dcf848d421888be", "user@example.com", Duration::hours(1))
        .unwrap();

    c.bench_function("token_verify", |b| {
        b.iter(|| signer.verify(black_box(&token)))
    });

    c.bench_function("token_verify_malformed", |b| {
        b.iter(|| signer.verify(black_box("not.a.token")))
    });
}

criterion_group!(benches, bench_issue, bench_verify);
criterion_main!(benches);
