use criterion::{Criterion, black_box, criterion_group, criterion_main};

use partita_iva::*;

fn bench_check_structure(c: &mut Criterion) {
    c.bench_function("check_structure valid", |b| {
        b.iter(|| check_structure(black_box("01743030304")))
    });
    c.bench_function("check_structure checksum failure", |b| {
        b.iter(|| check_structure(black_box("12345678901")))
    });
    c.bench_function("check_structure too long", |b| {
        b.iter(|| check_structure(black_box("123456789012")))
    });
}

fn bench_check_digit(c: &mut Criterion) {
    let head = [0, 1, 7, 4, 3, 0, 3, 0, 3, 0];
    c.bench_function("check_digit", |b| b.iter(|| check_digit(black_box(&head))));
}

fn bench_offline_validator(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let validator = VatNumberValidator::offline();
    c.bench_function("offline validate_str", |b| {
        b.iter(|| rt.block_on(validator.validate_str(black_box(Some("01743030304")))))
    });
}

criterion_group!(
    benches,
    bench_check_structure,
    bench_check_digit,
    bench_offline_validator
);
criterion_main!(benches);
